use validator::ValidationError;

const MIN_LENGTH: usize = 8;

pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_LENGTH {
        let mut error = ValidationError::new("password_length");
        error.message = Some(format!("Must be at least {} characters", MIN_LENGTH).into());
        return Err(error);
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| "!@#$%^&*".contains(c));

    if !(has_upper && has_digit && has_symbol) {
        let mut error = ValidationError::new("password_complexity");
        error.message = Some("Must include uppercase, number, and symbol".into());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complex_password() {
        assert!(validate_password_complexity("Sup3rSecret!").is_ok());
    }

    #[test]
    fn rejects_short_or_plain_passwords() {
        assert!(validate_password_complexity("Ab1!").is_err());
        assert!(validate_password_complexity("alllowercase1!").is_err());
        assert!(validate_password_complexity("NoSymbols123").is_err());
    }
}
