pub mod config;
pub mod device;
mod error;
pub mod registry;

pub use config::Config;
pub use config::LogLevel;
pub use device::Device;
pub use device::DeviceError;
pub use device::DeviceInfo;
pub use device::DeviceKind;
pub use device::EmbeddedDevice;
pub use device::PersonalComputer;
pub use device::PowerControl;
pub use device::Smartwatch;
pub use error::ErrorKind;
pub use registry::format_diagnostics;
pub use registry::Diagnostic;
pub use registry::DeviceRegistry;
pub use registry::LoadError;
pub use registry::LoadReport;
pub use registry::RecordError;
pub use registry::RegistryError;
pub use registry::MAX_CAPACITY;
