use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;
use chrono::Utc;
use log::info;
use crate::db::{find_profile, save_profile};
use crate::models::user::ProfileUpdate;
use crate::errors::AppError;

// GET /api/user/{id}
pub async fn get_profile(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user = find_profile(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

// PUT /api/user/{id}
pub async fn update_profile(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
    updates: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let mut user = find_profile(&pool, path.into_inner()).await?;
    user.apply(updates.into_inner());
    user.updated_at = Utc::now();

    save_profile(&pool, &user).await?;

    info!("Updated profile {}", user.id);

    Ok(HttpResponse::Ok().json(json!({ "message": "User profile updated successfully!" })))
}

// DELETE /api/user/{id}
pub async fn delete_profile(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let result = sqlx::query("DELETE FROM user_profiles WHERE id = ?")
        .bind(user_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!("Deleted profile {}", user_id);

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully!" })))
}
