use actix_web::HttpResponse;
use serde::Serialize;

use crate::error::Res;

/// JSON bodies for handlers that succeeded.
pub struct Success;

impl Success {
    /// `201 Created` with `body`.
    pub fn created<T: Serialize>(body: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Created().json(body))
    }

    pub fn ok<T: Serialize>(body: T) -> Res<HttpResponse> {
        Ok(HttpResponse::Ok().json(body))
    }
}
