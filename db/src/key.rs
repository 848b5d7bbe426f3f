use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::key::{KeyCreateRequest, KeyUpdateRequest, permission_names},
    models::key::{ApiKey, ApiKeyRow, KeyStatus},
};

pub async fn get_keys<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<ApiKey>> {
    sqlx::query_as::<_, ApiKeyRow>("SELECT * FROM api_keys ORDER BY created_at DESC")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(ApiKey::try_from)
        .collect()
}

pub async fn insert_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: KeyCreateRequest,
) -> Res<ApiKey> {
    sqlx::query_as::<_, ApiKeyRow>(
        r#"
        INSERT INTO api_keys (name, "key", description, permissions, status, "usage", last_used)
        VALUES ($1, $2, $3, $4, $5, 0, NULL)
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.key)
    .bind(data.description)
    .bind(permission_names(&data.permissions))
    .bind(KeyStatus::Active.as_str())
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
    .and_then(ApiKey::try_from)
}

pub async fn update_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: Uuid,
    data: KeyUpdateRequest,
) -> Res<ApiKey> {
    sqlx::query_as::<_, ApiKeyRow>(
        r#"
        UPDATE api_keys
        SET name = $1, description = $2, permissions = $3,
            updated_at = (now() AT TIME ZONE 'utc')
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(data.name)
    .bind(data.description)
    .bind(permission_names(&data.permissions))
    .bind(key_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
    .and_then(ApiKey::try_from)
}

pub async fn update_key_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: Uuid,
    status: KeyStatus,
) -> Res<ApiKey> {
    sqlx::query_as::<_, ApiKeyRow>(
        r#"
        UPDATE api_keys
        SET status = $1, updated_at = (now() AT TIME ZONE 'utc')
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(key_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
    .and_then(ApiKey::try_from)
}

pub async fn increment_key_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: Uuid,
) -> Res<ApiKey> {
    sqlx::query_as::<_, ApiKeyRow>(
        r#"
        UPDATE api_keys
        SET "usage" = "usage" + 1,
            last_used = (now() AT TIME ZONE 'utc'),
            updated_at = (now() AT TIME ZONE 'utc')
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(key_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
    .and_then(ApiKey::try_from)
}

pub async fn delete_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    key_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM api_keys WHERE id = $1")
        .bind(key_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;

    Ok(())
}
