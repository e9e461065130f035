//! Capacity-bounded device registry and its bulk loader.
//!
//! A [`DeviceRegistry`] owns its devices in insertion order and refuses new
//! ones once [`MAX_CAPACITY`] is reached. Registries can be populated from the
//! line-oriented device file format, see [`DeviceRegistry::from_file`].

mod diagnostics;
mod loader;
mod record;


use std::io;

use tracing::info;

pub use diagnostics::format_diagnostics;
pub use diagnostics::Diagnostic;
pub use diagnostics::LineError;
pub use diagnostics::SourceInfo;
pub use diagnostics::Warning;
pub use loader::LoadError;
pub use loader::LoadReport;
pub use record::parse_record;
pub use record::RecordError;

use crate::device::Device;
use crate::device::DeviceError;
use crate::ErrorKind;

/// Maximum number of devices a registry holds at once
pub const MAX_CAPACITY: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Device registry is full (capacity {capacity})")]
    Full { capacity: usize },

    #[error("No device with id {0}")]
    NotFound(i32),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Full { .. } => ErrorKind::Capacity,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::Device(e) => e.kind(),
        }
    }
}

/// Ordered, capacity-bounded collection of devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        MAX_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Append a device. Duplicate ids are accepted.
    pub fn add(&mut self, device: impl Into<Device>) -> Result<(), RegistryError> {
        if self.devices.len() >= MAX_CAPACITY {
            return Err(RegistryError::Full {
                capacity: MAX_CAPACITY,
            });
        }

        let device = device.into();
        info!(device = device.id(), "Device {} added.", device.name());
        self.devices.push(device);
        Ok(())
    }

    /// Remove and return the first device with the given id.
    pub fn remove(&mut self, id: i32) -> Result<Device, RegistryError> {
        let index = self
            .devices
            .iter()
            .position(|d| d.id() == id)
            .ok_or(RegistryError::NotFound(id))?;

        let device = self.devices.remove(index);
        info!(device = id, "Device {} removed.", device.name());
        Ok(device)
    }

    /// First device with the given id.
    pub fn get(&self, id: i32) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: i32) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id() == id)
    }

    pub fn turn_on(&mut self, id: i32) -> Result<&Device, RegistryError> {
        let device = self.get_mut(id).ok_or(RegistryError::NotFound(id))?;
        device.turn_on()?;
        Ok(&*device)
    }

    pub fn turn_off(&mut self, id: i32) -> Result<&Device, RegistryError> {
        let device = self.get_mut(id).ok_or(RegistryError::NotFound(id))?;
        device.turn_off();
        Ok(&*device)
    }

    /// One listing line per device, in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.devices.iter().map(Device::to_string).collect()
    }

    /// Write the listing to `out`, one line per device.
    pub fn show_all<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for device in &self.devices {
            writeln!(out, "{}", device)?;
        }
        Ok(())
    }
}
