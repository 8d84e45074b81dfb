pub mod ask;
pub mod auth;
pub mod profile;

use actix_web::HttpResponse;

// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Health & Nutrition AI API Running!")
}
