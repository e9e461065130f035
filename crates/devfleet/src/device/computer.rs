use tracing::info;

use super::DeviceError;
use super::DeviceInfo;
use super::PowerControl;

/// A computer that needs an operating system before it can boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalComputer {
    info: DeviceInfo,

    /// `None` or an empty string both mean "not installed"
    operating_system: Option<String>,
}

impl PersonalComputer {
    pub fn new(id: i32, name: impl Into<String>, operating_system: Option<String>) -> Self {
        Self {
            info: DeviceInfo::new(id, name),
            operating_system,
        }
    }

    /// The installed operating system, if any.
    pub fn operating_system(&self) -> Option<&str> {
        self.operating_system
            .as_deref()
            .filter(|os| !os.is_empty())
    }

    pub fn install_os(&mut self, operating_system: impl Into<String>) {
        let operating_system = operating_system.into();
        info!(
            device = self.info.id,
            "Installing {} on {}", operating_system, self.info.name
        );
        self.operating_system = Some(operating_system);
    }
}

impl PowerControl for PersonalComputer {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        if self.operating_system().is_none() {
            return Err(DeviceError::EmptySystem {
                name: self.info.name.clone(),
            });
        }

        self.info.power_on();
        Ok(())
    }

    fn details(&self) -> String {
        format!(
            ", OS: {}",
            self.operating_system().unwrap_or("Not Installed")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_turn_on_without_os() {
        let mut computer = PersonalComputer::new(1, "Desktop", None);
        let err = computer.turn_on().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(
            err,
            DeviceError::EmptySystem {
                name: "Desktop".to_string()
            }
        );
        assert!(!computer.info().is_on());
    }

    #[test]
    fn test_empty_os_counts_as_not_installed() {
        let mut computer = PersonalComputer::new(1, "Desktop", Some(String::new()));
        assert_eq!(computer.operating_system(), None);
        assert!(computer.turn_on().is_err());
        assert_eq!(computer.details(), ", OS: Not Installed");
    }

    #[test]
    fn test_install_then_turn_on() {
        let mut computer = PersonalComputer::new(1, "Desktop", None);
        computer.install_os("Linux Mint");
        assert_eq!(computer.operating_system(), Some("Linux Mint"));

        computer.turn_on().unwrap();
        assert!(computer.info().is_on());
        assert_eq!(computer.details(), ", OS: Linux Mint");
    }

    #[test]
    fn test_install_replaces_os() {
        let mut computer = PersonalComputer::new(1, "Desktop", Some("Windows".to_string()));
        computer.install_os("FreeBSD");
        assert_eq!(computer.operating_system(), Some("FreeBSD"));

        // Installing nothing uninstalls
        computer.install_os("");
        assert_eq!(computer.operating_system(), None);
    }
}
