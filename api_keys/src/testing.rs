//! In-memory `KeyStore` and record builders shared by the unit tests.
use async_trait::async_trait;
use chrono::Utc;
use common::error::{AppError, Res};
use db::{
    dtos::key::{KeyCreateRequest, KeyUpdateRequest},
    models::key::{ApiKey, KeyStatus, Permission},
    store::KeyStore,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dtos::key::KeyForm;

pub fn key(name: &str, description: &str, secret: &str, status: KeyStatus) -> ApiKey {
    let now = Utc::now().naive_utc();
    ApiKey {
        id: Uuid::new_v4(),
        name: name.to_string(),
        key: secret.to_string(),
        description: description.to_string(),
        permissions: [Permission::Read].into_iter().collect(),
        status,
        usage: 0,
        created_at: now,
        last_used: None,
        updated_at: now,
    }
}

pub fn form(name: &str, description: &str, permissions: &[Permission]) -> KeyForm {
    KeyForm {
        name: name.to_string(),
        description: description.to_string(),
        permissions: permissions.iter().copied().collect(),
    }
}

#[derive(Default)]
pub struct MemoryKeyStore {
    records: Mutex<Vec<ApiKey>>,
    failure: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    /// Records are kept in the given order, which `list` treats as newest first.
    pub fn with_records(records: Vec<ApiKey>) -> Self {
        Self {
            records: Mutex::new(records),
            failure: Mutex::new(None),
        }
    }

    /// Makes the next store call fail with a data-access error.
    pub async fn fail_next(&self, cause: &str) {
        *self.failure.lock().await = Some(cause.to_string());
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    async fn check(&self) -> Res<()> {
        match self.failure.lock().await.take() {
            Some(cause) => Err(AppError::Access(cause)),
            None => Ok(()),
        }
    }

    async fn modify<F>(&self, key_id: Uuid, change: F) -> Res<ApiKey>
    where
        F: FnOnce(&mut ApiKey),
    {
        self.check().await?;
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == key_id)
            .ok_or_else(|| AppError::NotFound("API key".to_string()))?;
        change(record);
        record.updated_at = Utc::now().naive_utc();
        Ok(record.clone())
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn list(&self) -> Res<Vec<ApiKey>> {
        self.check().await?;
        Ok(self.records.lock().await.clone())
    }

    async fn insert(&self, data: KeyCreateRequest) -> Res<ApiKey> {
        self.check().await?;
        let mut record = key(&data.name, &data.description, &data.key, KeyStatus::Active);
        record.permissions = data.permissions;
        self.records.lock().await.insert(0, record.clone());
        Ok(record)
    }

    async fn update_fields(&self, key_id: Uuid, data: KeyUpdateRequest) -> Res<ApiKey> {
        self.modify(key_id, |r| {
            r.name = data.name;
            r.description = data.description;
            r.permissions = data.permissions;
        })
        .await
    }

    async fn update_status(&self, key_id: Uuid, status: KeyStatus) -> Res<ApiKey> {
        self.modify(key_id, |r| r.status = status).await
    }

    async fn increment_usage(&self, key_id: Uuid) -> Res<ApiKey> {
        self.modify(key_id, |r| {
            r.usage += 1;
            r.last_used = Some(Utc::now().naive_utc());
        })
        .await
    }

    async fn delete_by_id(&self, key_id: Uuid) -> Res<()> {
        self.check().await?;
        self.records.lock().await.retain(|r| r.id != key_id);
        Ok(())
    }
}
