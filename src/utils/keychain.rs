//! Secure API key storage using OS keychain
//!
//! This module provides secure storage for API keys using:
//! - Windows: Windows Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//! - macOS: macOS Keychain

use crate::error::{AppError, Result};
use keyring::Entry;

/// Keychain service name for VibeTune
const SERVICE_NAME: &str = "vibetune";

/// Trait for keychain operations - allows for mocking in tests
pub trait KeychainPort: Send + Sync {
    fn save_api_key(&self, service_type: &str, provider: &str, api_key: &str) -> Result<()>;
    fn get_api_key(&self, service_type: &str, provider: &str) -> Result<String>;
    fn delete_api_key(&self, service_type: &str, provider: &str) -> Result<()>;

    fn has_api_key(&self, service_type: &str, provider: &str) -> bool {
        self.get_api_key(service_type, provider).is_ok()
    }
}

/// Keychain manager for secure API key storage using OS keychain
#[derive(Default)]
pub struct KeychainManager;

impl KeychainManager {
    pub fn new() -> Self {
        Self
    }

    fn entry(service_type: &str, provider: &str) -> Result<Entry> {
        let account = format!("{}_{}", service_type, provider);
        Ok(Entry::new(SERVICE_NAME, &account)?)
    }
}

impl KeychainPort for KeychainManager {
    fn save_api_key(&self, service_type: &str, provider: &str, api_key: &str) -> Result<()> {
        Self::entry(service_type, provider)?
            .set_password(api_key)
            .map_err(|e| AppError::Keychain(format!("Failed to save API key: {}", e)))?;

        log::info!("API key saved for {}:{}", service_type, provider);
        Ok(())
    }

    fn get_api_key(&self, service_type: &str, provider: &str) -> Result<String> {
        Self::entry(service_type, provider)?
            .get_password()
            .map_err(|e| AppError::Keychain(format!("Failed to retrieve API key: {}", e)))
    }

    fn delete_api_key(&self, service_type: &str, provider: &str) -> Result<()> {
        Self::entry(service_type, provider)?
            .delete_password()
            .map_err(|e| AppError::Keychain(format!("Failed to delete API key: {}", e)))?;

        log::info!("API key deleted for {}:{}", service_type, provider);
        Ok(())
    }
}

/// Stored-key status; the full key is never exposed
#[derive(Debug, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub has_key: bool,
    pub masked_key: Option<String>, // Shows last 4 chars: "...c123"
}

impl ApiKeyStatus {
    pub fn lookup(keychain: &dyn KeychainPort, service_type: &str, provider: &str) -> Self {
        match keychain.get_api_key(service_type, provider) {
            Ok(key) => Self {
                has_key: true,
                masked_key: Some(mask_api_key(&key)),
            },
            Err(_) => Self {
                has_key: false,
                masked_key: None,
            },
        }
    }
}

/// Mask a key, showing only its last 4 characters
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("...{}", tail)
    } else {
        "...".to_string()
    }
}

/// Mock keychain implementation for testing (in-memory storage)
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockKeychain {
    storage: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MockKeychain {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeychainPort for MockKeychain {
    fn save_api_key(&self, service_type: &str, provider: &str, api_key: &str) -> Result<()> {
        let key = format!("{}_{}", service_type, provider);
        self.storage
            .lock()
            .unwrap()
            .insert(key, api_key.to_string());
        Ok(())
    }

    fn get_api_key(&self, service_type: &str, provider: &str) -> Result<String> {
        let key = format!("{}_{}", service_type, provider);
        self.storage
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::Keychain(format!("API key not found for {}", key)))
    }

    fn delete_api_key(&self, service_type: &str, provider: &str) -> Result<()> {
        let key = format!("{}_{}", service_type, provider);
        self.storage.lock().unwrap().remove(&key);
        Ok(())
    }
}
