//! Utility modules

pub mod keychain;
