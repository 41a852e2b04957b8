//! Device server: configuration, control surface, and the scheduler loop

pub mod config;
pub mod control;
pub mod driver;

pub use config::ServerConfig;
pub use control::ControlCommand;
pub use driver::{CameraServer, DeviceStatus, EventSender};
