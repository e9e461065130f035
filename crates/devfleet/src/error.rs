use strum::Display;

/// Abstract category of a failure, independent of the concrete error type.
///
/// Callers that only care about *what kind* of rule was broken match on this
/// instead of on the individual error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// A value failed validation (battery out of range, malformed IP address).
    #[strum(serialize = "ValidationError")]
    Validation,

    /// A device refused to turn on because its precondition does not hold.
    #[strum(serialize = "PreconditionError")]
    Precondition,

    /// An embedded device is not on an accepted network.
    #[strum(serialize = "ConnectionError")]
    Connection,

    /// The registry is already at its maximum size.
    #[strum(serialize = "CapacityError")]
    Capacity,

    /// A bulk-load line could not be understood.
    #[strum(serialize = "ParseError")]
    Parse,

    /// No device with the requested id is registered.
    #[strum(serialize = "NotFoundError")]
    NotFound,
}
