use tracing::warn;

use super::DeviceError;
use super::DeviceInfo;
use super::PowerControl;

/// Battery percentages below this raise a low-battery notification
pub const LOW_BATTERY_THRESHOLD: u8 = 20;

/// Minimum battery percentage required to turn a watch on
pub const MIN_BATTERY_TO_TURN_ON: u8 = 11;

/// Battery consumed by every successful turn-on
pub const TURN_ON_DRAIN: u8 = 10;

/// A wearable with a battery that must stay within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smartwatch {
    info: DeviceInfo,
    battery: u8,
    low_battery_alerts: u32,
}

impl Smartwatch {
    /// Create a watch, validating the initial battery percentage through
    /// [`Smartwatch::set_battery`].
    pub fn new(id: i32, name: impl Into<String>, battery: i32) -> Result<Self, DeviceError> {
        let mut watch = Self {
            info: DeviceInfo::new(id, name),
            battery: 0,
            low_battery_alerts: 0,
        };
        watch.set_battery(battery)?;
        Ok(watch)
    }

    pub fn battery(&self) -> u8 {
        self.battery
    }

    /// Number of low-battery notifications raised so far.
    pub fn low_battery_alerts(&self) -> u32 {
        self.low_battery_alerts
    }

    /// Set the battery percentage.
    ///
    /// Values outside 0..=100 are rejected and the previous value is kept.
    /// Every accepted value below [`LOW_BATTERY_THRESHOLD`] raises exactly one
    /// low-battery notification; the set itself still succeeds.
    pub fn set_battery(&mut self, value: i32) -> Result<(), DeviceError> {
        let percentage = u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(DeviceError::BatteryOutOfRange(value))?;

        self.battery = percentage;
        if percentage < LOW_BATTERY_THRESHOLD {
            self.notify_low_battery();
        }
        Ok(())
    }

    fn notify_low_battery(&mut self) {
        self.low_battery_alerts += 1;
        warn!(
            device = self.info.id,
            "{} has low battery: {}%", self.info.name, self.battery
        );
    }
}

impl PowerControl for Smartwatch {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        if self.battery < MIN_BATTERY_TO_TURN_ON {
            return Err(DeviceError::BatteryTooLow {
                name: self.info.name.clone(),
                battery: self.battery,
            });
        }

        self.info.power_on();
        // Goes through the setter so a drained watch still raises its alert
        self.set_battery(i32::from(self.battery - TURN_ON_DRAIN))
    }

    fn details(&self) -> String {
        format!(", Battery: {}%", self.battery)
    }
}
