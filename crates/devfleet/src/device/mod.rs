//! Device model for devfleet.
//!
//! Every device shares a [`DeviceInfo`] record (id, name, power state) and the
//! on/off lifecycle from [`PowerControl`]. The three variants add their own
//! validated state and power-on precondition. [`Device`] is the closed set of
//! variants that the registry stores.

mod computer;
mod embedded;
mod error;
mod smartwatch;

use std::fmt;

use strum::Display;
use strum::EnumString;
use tracing::info;

pub use computer::PersonalComputer;
pub use embedded::EmbeddedDevice;
pub use embedded::REQUIRED_NETWORK;
pub use error::DeviceError;
pub use smartwatch::Smartwatch;
pub use smartwatch::LOW_BATTERY_THRESHOLD;
pub use smartwatch::MIN_BATTERY_TO_TURN_ON;
pub use smartwatch::TURN_ON_DRAIN;

/// Identity and power state shared by every device variant.
///
/// Identity is fixed at construction; power state only changes through
/// [`PowerControl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Caller supplied identifier. Uniqueness is not enforced.
    id: i32,

    /// Human-readable name
    name: String,

    /// Only changed through `power_on` / `power_off`
    powered: bool,
}

impl DeviceInfo {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            powered: false,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_on(&self) -> bool {
        self.powered
    }

    fn power_on(&mut self) {
        self.powered = true;
        info!(device = self.id, "{} is now turned ON", self.name);
    }

    fn power_off(&mut self) {
        self.powered = false;
        info!(device = self.id, "{} is now OFF", self.name);
    }

    fn status(&self) -> &'static str {
        if self.powered { "ON" } else { "OFF" }
    }
}

/// Power lifecycle implemented by every device variant.
pub trait PowerControl {
    fn info(&self) -> &DeviceInfo;

    fn info_mut(&mut self) -> &mut DeviceInfo;

    /// Turn the device on.
    ///
    /// Variants check their own precondition first and leave the device
    /// untouched when it does not hold.
    fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.info_mut().power_on();
        Ok(())
    }

    /// Turn the device off. Always succeeds, even when already off.
    fn turn_off(&mut self) {
        self.info_mut().power_off();
    }

    /// Variant-specific tail of the listing line, starting with `", "`.
    fn details(&self) -> String;
}

/// Device type, displayed as its prefix code in the bulk-load format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum DeviceKind {
    #[strum(serialize = "SW")]
    Smartwatch,
    #[strum(serialize = "P")]
    PersonalComputer,
    #[strum(serialize = "ED")]
    Embedded,
}

/// Any device the registry can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    Smartwatch(Smartwatch),
    PersonalComputer(PersonalComputer),
    Embedded(EmbeddedDevice),
}

impl Device {
    fn control(&self) -> &dyn PowerControl {
        match self {
            Device::Smartwatch(watch) => watch,
            Device::PersonalComputer(computer) => computer,
            Device::Embedded(embedded) => embedded,
        }
    }

    fn control_mut(&mut self) -> &mut dyn PowerControl {
        match self {
            Device::Smartwatch(watch) => watch,
            Device::PersonalComputer(computer) => computer,
            Device::Embedded(embedded) => embedded,
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::Smartwatch(_) => DeviceKind::Smartwatch,
            Device::PersonalComputer(_) => DeviceKind::PersonalComputer,
            Device::Embedded(_) => DeviceKind::Embedded,
        }
    }

    pub fn info(&self) -> &DeviceInfo {
        self.control().info()
    }

    pub fn id(&self) -> i32 {
        self.info().id()
    }

    pub fn name(&self) -> &str {
        self.info().name()
    }

    pub fn is_on(&self) -> bool {
        self.info().is_on()
    }

    pub fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.control_mut().turn_on()
    }

    pub fn turn_off(&mut self) {
        self.control_mut().turn_off();
    }

    pub fn as_smartwatch(&self) -> Option<&Smartwatch> {
        match self {
            Device::Smartwatch(watch) => Some(watch),
            _ => None,
        }
    }

    pub fn as_smartwatch_mut(&mut self) -> Option<&mut Smartwatch> {
        match self {
            Device::Smartwatch(watch) => Some(watch),
            _ => None,
        }
    }

    pub fn as_computer(&self) -> Option<&PersonalComputer> {
        match self {
            Device::PersonalComputer(computer) => Some(computer),
            _ => None,
        }
    }

    pub fn as_computer_mut(&mut self) -> Option<&mut PersonalComputer> {
        match self {
            Device::PersonalComputer(computer) => Some(computer),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&EmbeddedDevice> {
        match self {
            Device::Embedded(embedded) => Some(embedded),
            _ => None,
        }
    }

    pub fn as_embedded_mut(&mut self) -> Option<&mut EmbeddedDevice> {
        match self {
            Device::Embedded(embedded) => Some(embedded),
            _ => None,
        }
    }
}

/// One listing line: `ID: <id>, Name: <name>, Status: <ON|OFF>` plus the
/// variant details.
impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info();
        write!(
            f,
            "ID: {}, Name: {}, Status: {}{}",
            info.id(),
            info.name(),
            info.status(),
            self.control().details()
        )
    }
}

impl From<Smartwatch> for Device {
    fn from(watch: Smartwatch) -> Self {
        Device::Smartwatch(watch)
    }
}

impl From<PersonalComputer> for Device {
    fn from(computer: PersonalComputer) -> Self {
        Device::PersonalComputer(computer)
    }
}

impl From<EmbeddedDevice> for Device {
    fn from(embedded: EmbeddedDevice) -> Self {
        Device::Embedded(embedded)
    }
}
