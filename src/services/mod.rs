// Service exports
pub mod registry;

pub use registry::{DonorRegistry, RegistryError, read_donors, registry_options};
