pub mod admin;
pub mod dashboard;
pub mod parking;
pub mod report;
pub mod review;
pub mod vendor;
pub mod volunteer;

use validator::ValidationError;

/// Contact numbers throughout the system are plain 10-digit strings.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Please provide a valid 10-digit phone number".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::validate_phone;

    #[test]
    fn phone_accepts_ten_digits() {
        assert!(validate_phone("9876543210").is_ok());
    }

    #[test]
    fn phone_rejects_short_or_alpha() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("987654321x").is_err());
        assert!(validate_phone("98765432100").is_err());
    }
}
