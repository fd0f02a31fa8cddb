/// Adapters - service-specific implementations
///
/// These modules implement the port traits for specific providers.
pub mod services;
