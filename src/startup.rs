use actix_web::web;
use log::warn;

use crate::errors::AppError;
use crate::handlers;

/// JSON extractor settings. Bodies carry base64 images, so the limit is
/// well above actix's default.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            warn!("Rejecting request body: {}", err);
            AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
        })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(handlers::index)))
        .service(
            web::resource("/api/register")
                .route(web::post().to(handlers::auth::register)),
        )
        .service(
            web::resource("/api/login")
                .route(web::post().to(handlers::auth::login)),
        )
        .service(
            web::resource("/api/user/{id}")
                .route(web::get().to(handlers::profile::get_profile))
                .route(web::put().to(handlers::profile::update_profile))
                .route(web::delete().to(handlers::profile::delete_profile)),
        )
        .service(
            web::resource("/api/ask/{id}")
                .route(web::post().to(handlers::ask::ask)),
        )
        .service(
            web::resource("/api/ask_with_picture/{id}")
                .route(web::post().to(handlers::ask::ask_with_picture)),
        );
}
