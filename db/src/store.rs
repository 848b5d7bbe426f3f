//! The data-service contract the dashboard talks to.
//!
//! `KeyStore` is the seam between the in-memory key book and persistence;
//! `PgKeyStore` backs it with the `api_keys` table.
use std::sync::Arc;

use async_trait::async_trait;
use common::error::Res;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::key::{KeyCreateRequest, KeyUpdateRequest},
    models::key::{ApiKey, KeyStatus},
};

#[async_trait]
pub trait KeyStore: Send + Sync {
    /// All keys, newest first.
    async fn list(&self) -> Res<Vec<ApiKey>>;
    async fn insert(&self, data: KeyCreateRequest) -> Res<ApiKey>;
    async fn update_fields(&self, key_id: Uuid, data: KeyUpdateRequest) -> Res<ApiKey>;
    async fn update_status(&self, key_id: Uuid, status: KeyStatus) -> Res<ApiKey>;
    async fn increment_usage(&self, key_id: Uuid) -> Res<ApiKey>;
    async fn delete_by_id(&self, key_id: Uuid) -> Res<()>;
}

#[derive(Clone)]
pub struct PgKeyStore {
    pool: Arc<PgPool>,
}

impl PgKeyStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgKeyStore {
    async fn list(&self) -> Res<Vec<ApiKey>> {
        crate::key::get_keys(&*self.pool).await
    }

    async fn insert(&self, data: KeyCreateRequest) -> Res<ApiKey> {
        crate::key::insert_key(&*self.pool, data).await
    }

    async fn update_fields(&self, key_id: Uuid, data: KeyUpdateRequest) -> Res<ApiKey> {
        crate::key::update_key(&*self.pool, key_id, data).await
    }

    async fn update_status(&self, key_id: Uuid, status: KeyStatus) -> Res<ApiKey> {
        crate::key::update_key_status(&*self.pool, key_id, status).await
    }

    async fn increment_usage(&self, key_id: Uuid) -> Res<ApiKey> {
        crate::key::increment_key_usage(&*self.pool, key_id).await
    }

    async fn delete_by_id(&self, key_id: Uuid) -> Res<()> {
        crate::key::delete_key(&*self.pool, key_id).await
    }
}
