use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub body_fat: Option<f64>,
    pub existing_conditions: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub diet_type: Option<String>,
    pub meal_pattern: Option<String>,
    pub water_intake: Option<f64>,
    pub sugar_salt_intake: Option<String>,
    pub activity_level: Option<String>,
    pub preferred_exercises: Option<String>,
    pub workout_duration: Option<i64>,
    pub primary_goal: Option<String>,
    pub target_weight: Option<f64>,
    pub timeframe: Option<String>,
    pub sleep_duration: Option<f64>,
    pub stress_level: Option<String>,
    pub smoking_alcohol: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
}

/// Health and lifestyle attributes a client may send on registration.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProfileFields {
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub existing_conditions: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub diet_type: Option<String>,
    pub meal_pattern: Option<String>,
    pub water_intake: Option<f64>,
    pub sugar_salt_intake: Option<String>,
    pub activity_level: Option<String>,
    pub preferred_exercises: Option<String>,
    pub workout_duration: Option<i64>,
    pub primary_goal: Option<String>,
    pub target_weight: Option<f64>,
    pub timeframe: Option<String>,
    pub sleep_duration: Option<f64>,
    pub stress_level: Option<String>,
    pub smoking_alcohol: Option<String>,
}

/// Partial update. The outer `Option` is whether the key was sent at all,
/// the inner one is its value, so `{"height": null}` clears the column
/// while a missing key keeps it.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub body_fat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub existing_conditions: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub allergies: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub medications: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub diet_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub meal_pattern: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub water_intake: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub sugar_salt_intake: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub activity_level: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub preferred_exercises: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub workout_duration: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub primary_goal: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub target_weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub timeframe: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub sleep_duration: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub stress_level: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub smoking_alcohol: Option<Option<String>>,
}

// Only called when the key exists, so it always yields `Some`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UserProfile {
    /// Applies the sent fields over the stored ones and recomputes BMI.
    pub fn apply(&mut self, update: ProfileUpdate) {
        macro_rules! patch {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = update.$field {
                        self.$field = value;
                    }
                )+
            };
        }

        patch!(
            age,
            gender,
            height,
            weight,
            body_fat,
            existing_conditions,
            allergies,
            medications,
            diet_type,
            meal_pattern,
            water_intake,
            sugar_salt_intake,
            activity_level,
            preferred_exercises,
            workout_duration,
            primary_goal,
            target_weight,
            timeframe,
            sleep_duration,
            stress_level,
            smoking_alcohol,
        );

        self.bmi = calculate_bmi(self.height, self.weight);
    }
}

/// BMI from height in centimetres and weight in kilograms, rounded to two
/// decimals. Missing or zero inputs yield `None`.
pub fn calculate_bmi(height: Option<f64>, weight: Option<f64>) -> Option<f64> {
    match (height, weight) {
        (Some(h), Some(w)) if h != 0.0 && w != 0.0 => {
            let metres = h / 100.0;
            Some((w / (metres * metres) * 100.0).round() / 100.0)
        }
        _ => None,
    }
}
