use chumsky::prelude::*;
use tracing::debug;

use super::DeviceError;
use super::DeviceInfo;
use super::PowerControl;

/// Substring a network name must contain for [`EmbeddedDevice::connect`] to succeed
pub const REQUIRED_NETWORK: &str = "MD Ltd.";

/// Dotted-quad shape: four groups of 1-3 ASCII digits separated by dots.
///
/// Only the shape is checked. Group values are not range checked, so
/// `999.999.999.999` is accepted.
fn ipv4_shape<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> {
    let group = text::digits(10).at_most(3);

    group
        .separated_by(just('.'))
        .exactly(4)
        .then_ignore(end())
}

/// A network node that only powers on when attached to an accepted network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedDevice {
    info: DeviceInfo,
    ip_address: String,
    network_name: String,
}

impl EmbeddedDevice {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        ip_address: impl Into<String>,
        network_name: impl Into<String>,
    ) -> Result<Self, DeviceError> {
        let mut device = Self {
            info: DeviceInfo::new(id, name),
            ip_address: String::new(),
            network_name: network_name.into(),
        };
        device.set_ip_address(ip_address)?;
        Ok(device)
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Replace the IP address, keeping the old one when the new value does not
    /// have the dotted-quad shape.
    pub fn set_ip_address(&mut self, ip_address: impl Into<String>) -> Result<(), DeviceError> {
        let ip_address = ip_address.into();
        if ipv4_shape().parse(ip_address.as_str()).has_errors() {
            return Err(DeviceError::InvalidIpAddress(ip_address));
        }

        self.ip_address = ip_address;
        Ok(())
    }

    pub fn set_network_name(&mut self, network_name: impl Into<String>) {
        self.network_name = network_name.into();
    }

    /// Check that the device is on an accepted network. No I/O is performed.
    pub fn connect(&self) -> Result<(), DeviceError> {
        if !self.network_name.contains(REQUIRED_NETWORK) {
            return Err(DeviceError::Connection {
                name: self.info.name.clone(),
                network: self.network_name.clone(),
            });
        }

        debug!(
            device = self.info.id,
            "{} connected to {}", self.info.name, self.network_name
        );
        Ok(())
    }
}

impl PowerControl for EmbeddedDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        self.connect()?;
        self.info.power_on();
        Ok(())
    }

    fn details(&self) -> String {
        format!(
            ", IP: {}, Network: {}",
            self.ip_address, self.network_name
        )
    }
}
