// Service exports
pub mod registry;

pub use registry::{parse_predictions, RegistryClient, RegistryError};
