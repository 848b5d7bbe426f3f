use std::sync::Arc;

use common::error::{AppError, Res};
use db::{
    dtos::key::KeyCreateRequest,
    models::key::{ApiKey, KeyStatus},
    store::KeyStore,
};
use uuid::Uuid;

use crate::dtos::key::KeyForm;

/// The in-memory key set, newest first, kept in step with the store.
///
/// Every operation awaits the store before touching the set, so a failed
/// call leaves the set exactly as it was.
pub struct KeyBook {
    store: Arc<dyn KeyStore>,
    records: Vec<ApiKey>,
}

impl KeyBook {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[ApiKey] {
        &self.records
    }

    pub fn find(&self, key_id: Uuid) -> Res<&ApiKey> {
        self.records
            .iter()
            .find(|r| r.id == key_id)
            .ok_or_else(|| AppError::NotFound(format!("API key {}", key_id)))
    }

    /// Replaces the set with the store's current contents.
    pub async fn load(&mut self) -> Res<&[ApiKey]> {
        let records = self
            .store
            .list()
            .await
            .map_err(|e| e.with_context("Failed to load API keys"))?;
        log::debug!("Loaded {} API keys", records.len());
        self.records = records;
        Ok(&self.records)
    }

    /// Generates a key, stores the new record and puts it first.
    pub async fn create(&mut self, form: KeyForm) -> Res<&ApiKey> {
        form.validate()?;

        let created = self
            .store
            .insert(KeyCreateRequest {
                name: form.name,
                key: common::key::generate_api_key(),
                description: form.description,
                permissions: form.permissions,
            })
            .await
            .map_err(|e| e.with_context("Failed to create API key"))?;

        log::info!("Created API key {} ({})", created.id, created.name);
        self.records.insert(0, created);
        Ok(&self.records[0])
    }

    /// Sends the editable fields and swaps in the stored record, keeping its position.
    pub async fn update(&mut self, key_id: Uuid, form: KeyForm) -> Res<&ApiKey> {
        form.validate()?;
        self.find(key_id)?;

        let updated = self
            .store
            .update_fields(key_id, form.into())
            .await
            .map_err(|e| e.with_context("Failed to update API key"))?;

        log::info!("Updated API key {}", key_id);
        self.replace(updated)
    }

    pub async fn remove(&mut self, key_id: Uuid) -> Res<()> {
        self.store
            .delete_by_id(key_id)
            .await
            .map_err(|e| e.with_context("Failed to delete API key"))?;

        log::info!("Deleted API key {}", key_id);
        self.records.retain(|r| r.id != key_id);
        Ok(())
    }

    /// Flips the key between active and inactive.
    pub async fn toggle_status(&mut self, key_id: Uuid) -> Res<(&ApiKey, KeyStatus)> {
        let new_status = self.find(key_id)?.status.complement();

        let updated = self
            .store
            .update_status(key_id, new_status)
            .await
            .map_err(|e| e.with_context("Failed to change API key status"))?;

        log::info!("API key {} is now {}", key_id, new_status);
        let record = self.replace(updated)?;
        Ok((record, new_status))
    }

    /// Counts one use of the key and stamps `last_used`.
    pub async fn record_usage(&mut self, key_id: Uuid) -> Res<&ApiKey> {
        let updated = self
            .store
            .increment_usage(key_id)
            .await
            .map_err(|e| e.with_context("Failed to record API key usage"))?;

        self.replace(updated)
    }

    fn replace(&mut self, updated: ApiKey) -> Res<&ApiKey> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == updated.id)
            .ok_or_else(|| AppError::NotFound(format!("API key {}", updated.id)))?;
        self.records[index] = updated;
        Ok(&self.records[index])
    }
}
