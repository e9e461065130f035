//! Parser for a single line of the device file format.
//!
//! ```text
//! SW-<id>,<name>,,<battery>%
//! P-<id>,<name>,,<os>
//! ED-<id>,<name>,<ip>,<network>
//! ```

use std::str::FromStr;

use chumsky::prelude::*;

use super::RegistryError;
use crate::device::Device;
use crate::device::DeviceError;
use crate::device::DeviceKind;
use crate::device::EmbeddedDevice;
use crate::device::PersonalComputer;
use crate::device::Smartwatch;
use crate::ErrorKind;

/// Why a single line of a device file was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Malformed device tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Unrecognized device type '{0}'")]
    UnknownPrefix(String),

    #[error("Missing field {index} ({field})")]
    MissingField { index: usize, field: &'static str },

    #[error("Invalid battery value '{0}'")]
    InvalidBattery(String),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::MalformedTag { .. }
            | RecordError::UnknownPrefix(_)
            | RecordError::MissingField { .. }
            | RecordError::InvalidBattery(_) => ErrorKind::Parse,
            RecordError::Device(e) => e.kind(),
            RecordError::Registry(e) => e.kind(),
        }
    }
}

/// `<Prefix>-<Id>`: ASCII letters, a hyphen, then decimal digits.
fn tag<'a>() -> impl Parser<'a, &'a str, (&'a str, i32), extra::Err<Rich<'a, char>>> {
    let prefix = any()
        .filter(|c: &char| c.is_ascii_alphabetic())
        .repeated()
        .at_least(1)
        .to_slice()
        .labelled("device type");

    let id = text::digits(10)
        .to_slice()
        .try_map(|digits: &str, span| {
            digits
                .parse::<i32>()
                .map_err(|e| Rich::custom(span, format!("invalid id '{}': {}", digits, e)))
        })
        .labelled("device id");

    prefix
        .then_ignore(just('-'))
        .then(id)
        .then_ignore(end())
}

fn parse_tag(field: &str) -> Result<(&str, i32), RecordError> {
    tag().parse(field).into_result().map_err(|errs| {
        let reason = errs
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "expected <type>-<id>".to_string());
        RecordError::MalformedTag {
            tag: field.to_string(),
            reason,
        }
    })
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    fields
        .get(index)
        .copied()
        .ok_or(RecordError::MissingField { index, field: name })
}

fn parse_battery(raw: &str) -> Result<i32, RecordError> {
    let digits = raw.strip_suffix('%').unwrap_or(raw).trim();
    digits
        .parse()
        .map_err(|_| RecordError::InvalidBattery(raw.to_string()))
}

/// Parse and validate one line into a device.
///
/// Fields are trimmed of surrounding whitespace. The prefix is checked before
/// any other field so unknown device types are reported as such.
pub fn parse_record(line: &str) -> Result<Device, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let (prefix, id) = parse_tag(fields[0])?;
    let kind = DeviceKind::from_str(prefix)
        .map_err(|_| RecordError::UnknownPrefix(prefix.to_string()))?;
    let name = field(&fields, 1, "name")?;

    let device = match kind {
        DeviceKind::Smartwatch => {
            let battery = parse_battery(field(&fields, 3, "battery")?)?;
            Smartwatch::new(id, name, battery)?.into()
        }
        DeviceKind::PersonalComputer => {
            let operating_system = fields
                .get(3)
                .filter(|os| !os.is_empty())
                .map(|os| os.to_string());
            PersonalComputer::new(id, name, operating_system).into()
        }
        DeviceKind::Embedded => {
            let ip_address = field(&fields, 2, "IP address")?;
            let network_name = field(&fields, 3, "network name")?;
            EmbeddedDevice::new(id, name, ip_address, network_name)?.into()
        }
    };

    Ok(device)
}
