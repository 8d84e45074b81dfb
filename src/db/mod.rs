use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::user::UserProfile;

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn find_profile(pool: &SqlitePool, id: i64) -> Result<UserProfile, AppError> {
    sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Writes every mutable column of `user` back. A row deleted since it was
/// read is reported as not found.
pub async fn save_profile(pool: &SqlitePool, user: &UserProfile) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE user_profiles SET
            age = ?, gender = ?, height = ?, weight = ?, bmi = ?, body_fat = ?,
            existing_conditions = ?, allergies = ?, medications = ?, diet_type = ?,
            meal_pattern = ?, water_intake = ?, sugar_salt_intake = ?, activity_level = ?,
            preferred_exercises = ?, workout_duration = ?, primary_goal = ?,
            target_weight = ?, timeframe = ?, sleep_duration = ?, stress_level = ?,
            smoking_alcohol = ?, updated_at = ?
        WHERE id = ?",
    )
    .bind(user.age)
    .bind(&user.gender)
    .bind(user.height)
    .bind(user.weight)
    .bind(user.bmi)
    .bind(user.body_fat)
    .bind(&user.existing_conditions)
    .bind(&user.allergies)
    .bind(&user.medications)
    .bind(&user.diet_type)
    .bind(&user.meal_pattern)
    .bind(user.water_intake)
    .bind(&user.sugar_salt_intake)
    .bind(&user.activity_level)
    .bind(&user.preferred_exercises)
    .bind(user.workout_duration)
    .bind(&user.primary_goal)
    .bind(user.target_weight)
    .bind(&user.timeframe)
    .bind(user.sleep_duration)
    .bind(&user.stress_level)
    .bind(&user.smoking_alcohol)
    .bind(user.updated_at)
    .bind(user.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(())
}
