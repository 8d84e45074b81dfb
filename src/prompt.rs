use std::fmt::Display;

use crate::models::user::UserProfile;

/// Appended to image questions so the vision model keeps answers short.
pub const CONCISE_INSTRUCTION: &str = "be concise and short as possible";

// Absent values print as `None`, floats always keep a decimal point.
fn show<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn show_float(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "None".to_string(),
    }
}

/// Renders the stored profile as the context block sent with every question.
pub fn user_context(user: &UserProfile) -> String {
    format!(
        "\n    User Details:\n    \
         Age: {}, Gender: {}, Height: {} cm, Weight: {} kg, BMI: {}\n    \
         Health Conditions: {}, Allergies: {}, Diet Type: {}\n    \
         Activity Level: {}, Primary Goal: {}, Stress Level: {}\n    ",
        show(&user.age),
        show(&user.gender),
        show_float(&user.height),
        show_float(&user.weight),
        show_float(&user.bmi),
        show(&user.existing_conditions),
        show(&user.allergies),
        show(&user.diet_type),
        show(&user.activity_level),
        show(&user.primary_goal),
        show(&user.stress_level),
    )
}

pub fn question_prompt(question: &str, user: &UserProfile) -> String {
    format!("{}{}", question, user_context(user))
}

pub fn image_prompt(question: &str, user: &UserProfile) -> String {
    format!("{} {}{}", question, CONCISE_INSTRUCTION, user_context(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: 7,
            email: "sam@example.com".to_string(),
            password_hash: "secret".to_string(),
            age: Some(42),
            gender: Some("male".to_string()),
            height: Some(180.0),
            weight: Some(81.5),
            bmi: Some(25.15),
            body_fat: None,
            existing_conditions: Some("asthma".to_string()),
            allergies: None,
            medications: Some("inhaler".to_string()),
            diet_type: Some("vegetarian".to_string()),
            meal_pattern: None,
            water_intake: None,
            sugar_salt_intake: None,
            activity_level: Some("moderate".to_string()),
            preferred_exercises: None,
            workout_duration: None,
            primary_goal: Some("build muscle".to_string()),
            target_weight: None,
            timeframe: None,
            sleep_duration: None,
            stress_level: Some("high".to_string()),
            smoking_alcohol: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn context_matches_fixed_template() {
        assert_eq!(
            user_context(&user()),
            "\n    User Details:\n    \
             Age: 42, Gender: male, Height: 180.0 cm, Weight: 81.5 kg, BMI: 25.15\n    \
             Health Conditions: asthma, Allergies: None, Diet Type: vegetarian\n    \
             Activity Level: moderate, Primary Goal: build muscle, Stress Level: high\n    "
        );
    }

    #[test]
    fn context_leaves_out_private_fields() {
        let context = user_context(&user());
        assert!(!context.contains("inhaler"));
        assert!(!context.contains("secret"));
    }

    #[test]
    fn missing_measurements_print_none() {
        let mut user = user();
        user.age = None;
        user.height = None;
        user.bmi = None;
        let context = user_context(&user);
        assert!(context.contains("Age: None, Gender: male, Height: None cm, Weight: 81.5 kg, BMI: None"));
    }

    #[test]
    fn question_comes_before_context() {
        let prompt = question_prompt("What should I eat?", &user());
        assert!(prompt.starts_with("What should I eat?\n    User Details:\n    Age: 42"));
    }

    #[test]
    fn image_prompt_asks_for_brevity() {
        let prompt = image_prompt("Is this healthy?", &user());
        assert!(prompt.starts_with("Is this healthy? be concise and short as possible\n    User Details:"));
    }
}
