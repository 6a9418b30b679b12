pub mod instance_locator;

pub use instance_locator::{InstanceLocator, LocatorError};
