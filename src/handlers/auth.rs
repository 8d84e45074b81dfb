use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use chrono::Utc;
use bcrypt::{hash, verify};
use validator::Validate;
use log::{info, warn};
use crate::config::Config;
use crate::models::user::{self, ProfileFields};
use crate::errors::AppError;
use crate::utils::validation::{validate_password_length, validate_payload};
use actix_web::rt::task::spawn_blocking;

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[validate(custom = "validate_password_length")]
    password: String,

    #[serde(flatten)]
    profile: ProfileFields,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[validate(custom = "validate_password_length")]
    password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    message: &'static str,
    user_id: i64,
}

// POST /api/register
pub async fn register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let RegisterRequest { email, password, profile } = req.into_inner();

    let cost = config.bcrypt_cost;
    let password_hash = spawn_blocking(move || hash(&password, cost))
        .await
        .map_err(|_| AppError::InternalServerError("Hashing failed".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let bmi = user::calculate_bmi(profile.height, profile.weight);
    let now = Utc::now();

    // The unique index on email turns a duplicate into "no row returned".
    let user_id: Option<i64> = sqlx::query_scalar(
        "INSERT INTO user_profiles (
            email, password_hash, age, gender, height, weight, bmi, body_fat,
            existing_conditions, allergies, medications, diet_type, meal_pattern,
            water_intake, sugar_salt_intake, activity_level, preferred_exercises,
            workout_duration, primary_goal, target_weight, timeframe, sleep_duration,
            stress_level, smoking_alcohol, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (email) DO NOTHING
        RETURNING id",
    )
    .bind(&email)
    .bind(password_hash)
    .bind(profile.age)
    .bind(profile.gender)
    .bind(profile.height)
    .bind(profile.weight)
    .bind(bmi)
    .bind(profile.body_fat)
    .bind(profile.existing_conditions)
    .bind(profile.allergies)
    .bind(profile.medications)
    .bind(profile.diet_type)
    .bind(profile.meal_pattern)
    .bind(profile.water_intake)
    .bind(profile.sugar_salt_intake)
    .bind(profile.activity_level)
    .bind(profile.preferred_exercises)
    .bind(profile.workout_duration)
    .bind(profile.primary_goal)
    .bind(profile.target_weight)
    .bind(profile.timeframe)
    .bind(profile.sleep_duration)
    .bind(profile.stress_level)
    .bind(profile.smoking_alcohol)
    .bind(now)
    .bind(now)
    .fetch_optional(&**pool)
    .await?;

    let user_id = user_id.ok_or_else(|| {
        warn!("Registration rejected, email already in use");
        AppError::Conflict("Email already registered".to_string())
    })?;

    info!("Registered user {}", user_id);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully!",
        user_id,
    }))
}

// POST /api/login
pub async fn login(
    req: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let LoginRequest { email, password } = req.into_inner();

    let user = sqlx::query_as::<_, user::Credentials>(
        "SELECT id, password_hash FROM user_profiles WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let stored_hash = user.password_hash;
    let is_valid = spawn_blocking(move || verify(password.as_str(), &stored_hash))
        .await
        .map_err(|_| AppError::InternalServerError("Password verification error".to_string()))?
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful!",
        user_id: user.id,
    }))
}
