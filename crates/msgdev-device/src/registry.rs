use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::device::Device;
use crate::error::{DeviceError, Result};

/// Well-known name under which the message device registers.
///
/// This is the fixed identifier agreed between the client library and the
/// control dispatcher; both sides resolve the same handle through it.
pub const DEVICE_NAME: &str = "msgdev";

/// Name-to-device table standing in for the host runtime's resource
/// registration.
///
/// The host collaborator is reduced to its contract: register a resource
/// under a name, resolve it, unregister it. Registration is the device's
/// documented construction point; unregistering drops the registry's
/// handle, and the device goes away with the last outstanding clone.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Mutex<HashMap<String, Arc<Device>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `device` under `name`. Duplicate names are rejected.
    pub fn register(&self, name: &str, device: Arc<Device>) -> Result<()> {
        let mut devices = self.lock();
        if devices.contains_key(name) {
            return Err(DeviceError::AlreadyRegistered(name.to_string()));
        }
        devices.insert(name.to_string(), device);
        info!(name, "device registered");
        Ok(())
    }

    /// Remove a registration, returning the device handle if one existed.
    pub fn unregister(&self, name: &str) -> Option<Arc<Device>> {
        let removed = self.lock().remove(name);
        if removed.is_some() {
            info!(name, "device unregistered");
        }
        removed
    }

    /// Resolve a registered device by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<Device>> {
        self.lock().get(name).cloned()
    }

    /// Names currently registered, sorted for stable output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Device>>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
