//! localStorage-backed template store: the durable local source of truth
//! between editing sessions.

use common::session::TemplateStore;

/// The single well-known localStorage key holding the serialized template.
const STORAGE_KEY: &str = "template";

pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Grabs a localStorage handle. Absence (private browsing, storage
    /// disabled) degrades to a store where reads find nothing and writes
    /// fail best-effort, which the session already tolerates.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            gloo_console::warn!("localStorage unavailable, templates will not persist");
        }
        LocalStore { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for LocalStore {
    fn read(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(STORAGE_KEY).ok().flatten()
    }

    fn write(&mut self, raw: &str) -> Result<(), String> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(STORAGE_KEY, raw)
            .map_err(|err| format!("{err:?}"))
    }

    fn clear(&mut self) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
