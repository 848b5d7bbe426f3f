use actix_web::{
    Responder, delete, get, post, put,
    web::{self},
};
use common::{error::Res, http::Success};
use uuid::Uuid;

use crate::{
    DashboardState,
    dtos::key::{
        CopyResponse, KeyForm, MutationResponse, PageRequest, QueryRequest, ReloadResponse,
        ToggleStatusResponse, VisibilityResponse,
    },
};

/// Returns the current page of the key list.
///
/// Keys are masked unless they were revealed through the visibility toggle.
#[get("/keys")]
pub async fn get_keys(dashboard: web::Data<DashboardState>) -> Res<impl Responder> {
    let dashboard = dashboard.lock().await;
    Success::ok(dashboard.page())
}

/// Reloads all keys from the database.
///
/// # Returns
///
/// A `Result` containing the fresh stats, or an `AppError` the client can retry on.
#[post("/keys/reload")]
pub async fn post_reload(dashboard: web::Data<DashboardState>) -> Res<impl Responder> {
    let mut dashboard = dashboard.lock().await;
    let notice = dashboard.load().await?;
    Success::ok(ReloadResponse {
        success: true,
        stats: dashboard.stats(),
        notice,
    })
}

#[get("/keys/stats")]
pub async fn get_stats(dashboard: web::Data<DashboardState>) -> Res<impl Responder> {
    Success::ok(dashboard.lock().await.stats())
}

/// Creates a new API key.
///
/// # Arguments
///
/// * `dashboard` - The dashboard session.
/// * `req` - Name, description and permissions of the new key.
///
/// # Returns
///
/// A `Result` containing a `Created` response with the new key or an `AppError` if an error occurs.
#[post("/keys")]
pub async fn post_create_key(
    dashboard: web::Data<DashboardState>,
    req: web::Json<KeyForm>,
) -> Res<impl Responder> {
    let (key, notice) = dashboard.lock().await.create(req.into_inner()).await?;
    Success::created(MutationResponse {
        success: true,
        key: Some(key),
        notice,
    })
}

/// Sets the search term and/or the status filter. Either change sends the list back to page 1.
#[put("/keys/query")]
pub async fn put_query(
    dashboard: web::Data<DashboardState>,
    req: web::Json<QueryRequest>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let mut dashboard = dashboard.lock().await;
    if let Some(search) = req.search {
        dashboard.search(search);
    }
    if let Some(status) = req.status {
        dashboard.filter(status);
    }
    Success::ok(dashboard.page())
}

#[put("/keys/page")]
pub async fn put_page(
    dashboard: web::Data<DashboardState>,
    req: web::Json<PageRequest>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let mut dashboard = dashboard.lock().await;
    if let Some(page) = req.page {
        dashboard.go_to_page(page);
    }
    if let Some(step) = req.step {
        dashboard.step_page(step);
    }
    Success::ok(dashboard.page())
}

/// Updates the name, description and permissions of a key.
///
/// # Arguments
///
/// * `dashboard` - The dashboard session.
/// * `key_id` - The ID of the key to update.
/// * `req` - The new editable fields.
///
/// # Returns
///
/// A `Result` containing a `Success` response with the updated key or an `AppError` if an error occurs.
#[put("/keys/{key_id}")]
pub async fn put_key(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
    req: web::Json<KeyForm>,
) -> Res<impl Responder> {
    let (key, notice) = dashboard
        .lock()
        .await
        .update(key_id.into_inner(), req.into_inner())
        .await?;
    Success::ok(MutationResponse {
        success: true,
        key: Some(key),
        notice,
    })
}

#[delete("/keys/{key_id}")]
pub async fn delete_key(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
) -> Res<impl Responder> {
    let notice = dashboard.lock().await.remove(key_id.into_inner()).await?;
    Success::ok(MutationResponse {
        success: true,
        key: None,
        notice,
    })
}

/// Switches a key between active and inactive.
#[post("/keys/{key_id}/toggle")]
pub async fn post_toggle_status(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
) -> Res<impl Responder> {
    let (key, new_status, notice) = dashboard
        .lock()
        .await
        .toggle_status(key_id.into_inner())
        .await?;
    Success::ok(ToggleStatusResponse {
        success: true,
        key,
        new_status,
        notice,
    })
}

#[post("/keys/{key_id}/usage")]
pub async fn post_usage(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
) -> Res<impl Responder> {
    let key = dashboard
        .lock()
        .await
        .record_usage(key_id.into_inner())
        .await?;
    Success::ok(key)
}

#[post("/keys/{key_id}/visibility")]
pub async fn post_toggle_visibility(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
) -> Res<impl Responder> {
    let (key, notice) = dashboard
        .lock()
        .await
        .toggle_visibility(key_id.into_inner())?;
    Success::ok(VisibilityResponse {
        id: key.id,
        visible: key.visible,
        key: key.key,
        notice,
    })
}

/// Returns the full secret for the clipboard, regardless of masking.
#[get("/keys/{key_id}/copy")]
pub async fn get_copy(
    dashboard: web::Data<DashboardState>,
    key_id: web::Path<Uuid>,
) -> Res<impl Responder> {
    let id = key_id.into_inner();
    let (text, notice) = dashboard.lock().await.copy(id)?;
    Success::ok(CopyResponse { id, text, notice })
}
