use actix_web::web;
use tokio::sync::Mutex;

pub mod dashboard;
pub mod notice;
pub mod view;
pub mod visibility;

pub mod routes {
    pub mod key;
}

pub mod service {
    pub mod key;
    pub mod stats;
}
pub mod dtos {
    pub mod key;
}

#[cfg(test)]
pub(crate) mod testing;

/// The single dashboard session shared by all workers.
pub type DashboardState = Mutex<dashboard::Dashboard>;

pub fn mount_keys() -> actix_web::Scope {
    web::scope("/dashboard")
        .service(routes::key::get_keys)
        .service(routes::key::get_stats)
        .service(routes::key::post_reload)
        .service(routes::key::post_create_key)
        .service(routes::key::put_query)
        .service(routes::key::put_page)
        .service(routes::key::put_key)
        .service(routes::key::delete_key)
        .service(routes::key::post_toggle_status)
        .service(routes::key::post_usage)
        .service(routes::key::post_toggle_visibility)
        .service(routes::key::get_copy)
}
