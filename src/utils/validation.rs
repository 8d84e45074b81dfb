use validator::{Validate, ValidationError, ValidationErrors};
use crate::errors::AppError;

/// bcrypt ignores everything past this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(first_message(&err)))
}

pub fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_length");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

// Fields are reported in name order so the message is stable.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Credentials {
        #[validate(required(message = "Email and password are required"), length(min = 1, message = "Email and password are required"))]
        email: Option<String>,
        #[validate(required(message = "Email and password are required"), length(min = 1, message = "Email and password are required"))]
        password: Option<String>,
    }

    #[test]
    fn missing_field_uses_custom_message() {
        let payload = Credentials { email: Some("a@b.c".to_string()), password: None };
        match validate_payload(&payload) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Email and password are required"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let payload = Credentials { email: Some(String::new()), password: Some("pw".to_string()) };
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn password_length_is_counted_in_bytes() {
        assert!(validate_password_length(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
        assert!(validate_password_length(&"a".repeat(MAX_PASSWORD_BYTES + 1)).is_err());
        // 36 two-byte characters fill the limit exactly.
        assert!(validate_password_length(&"é".repeat(36)).is_ok());
        assert!(validate_password_length(&"é".repeat(37)).is_err());
    }

    #[test]
    fn complete_payload_passes() {
        let payload = Credentials { email: Some("a@b.c".to_string()), password: Some("pw".to_string()) };
        assert!(validate_payload(&payload).is_ok());
    }
}
