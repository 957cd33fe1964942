//! Field validation rules.
//!
//! Every rule is a pure function over raw input. Nothing here touches the
//! session or performs I/O, so rules can be called from anywhere.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{FieldError, SignupField};
use crate::account::{ProfileDraft, RoleProfile};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const VERIFICATION_CODE_LEN: usize = 6;
pub const MAX_BIO_CHARS: usize = 500;
pub const MAX_EXPERIENCE_YEARS: u8 = 60;

/// Symbols accepted by the password rule.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn into_field_error(self, field: SignupField) -> Option<FieldError> {
        if self.valid {
            return None;
        }
        Some(FieldError::new(
            field,
            self.message.unwrap_or_else(|| "Invalid value".to_string()),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

fn is_password_symbol(c: char) -> bool {
    PASSWORD_SYMBOLS.contains(c)
}

pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::invalid("Email is required");
    }
    if !EMAIL_PATTERN.is_match(email) {
        return ValidationResult::invalid("Please enter a valid email address");
    }
    ValidationResult::ok()
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return ValidationResult::invalid("Password must contain at least one number");
    }
    if !password.chars().any(is_password_symbol) {
        return ValidationResult::invalid("Password must contain at least one special character");
    }
    ValidationResult::ok()
}

/// Heuristic strength score: five independent checks bucketed into tiers.
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(is_password_symbol),
    ];
    match checks.iter().filter(|passed| **passed).count() {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

pub fn validate_password_match(password: &str, confirm_password: &str) -> ValidationResult {
    if confirm_password.is_empty() {
        return ValidationResult::invalid("Please confirm your password");
    }
    if password != confirm_password {
        return ValidationResult::invalid("Passwords do not match");
    }
    ValidationResult::ok()
}

pub fn validate_verification_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.len() != VERIFICATION_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return ValidationResult::invalid(format!(
            "Enter the {VERIFICATION_CODE_LEN}-digit code from your email"
        ));
    }
    ValidationResult::ok()
}

/// Runs the three credential rules and collects every failure.
pub fn validate_credentials(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<FieldError> {
    [
        validate_email(email).into_field_error(SignupField::Email),
        validate_password(password).into_field_error(SignupField::Password),
        validate_password_match(password, confirm_password)
            .into_field_error(SignupField::ConfirmPassword),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn validate_profile(profile: &ProfileDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if profile.full_name.trim().is_empty() {
        errors.push(FieldError::new(SignupField::FullName, "Full name is required"));
    }
    match &profile.details {
        RoleProfile::Student(student) => {
            if let Some(grade) = student.grade {
                if !(1..=12).contains(&grade) {
                    errors.push(FieldError::new(
                        SignupField::Grade,
                        "Grade must be between 1 and 12",
                    ));
                }
            }
        }
        RoleProfile::Teacher(teacher) => {
            if let Some(years) = teacher.experience_years {
                if years > MAX_EXPERIENCE_YEARS {
                    errors.push(FieldError::new(
                        SignupField::ExperienceYears,
                        format!("Experience must be at most {MAX_EXPERIENCE_YEARS} years"),
                    ));
                }
            }
            if let Some(bio) = &teacher.bio {
                if bio.chars().count() > MAX_BIO_CHARS {
                    errors.push(FieldError::new(
                        SignupField::Bio,
                        format!("Bio must be at most {MAX_BIO_CHARS} characters"),
                    ));
                }
            }
        }
        RoleProfile::Admin(_) => {}
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Role, StudentProfile, TeacherProfile};

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "",
            "   ",
            "plainaddress",
            "missing-at.example.com",
            "user@nodot",
            "user@",
            "@example.com",
            "two@@example.com",
            "spa ce@example.com",
        ] {
            assert!(!validate_email(email).valid, "{email:?} should be invalid");
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for email in ["a@b.co", "first.last@school.edu", "  kid+1@mail.example.org "] {
            assert!(validate_email(email).valid, "{email:?} should be valid");
        }
    }

    #[test]
    fn empty_email_reports_required() {
        assert_eq!(
            validate_email("").message.as_deref(),
            Some("Email is required")
        );
    }

    #[test]
    fn password_rules_reject_each_missing_requirement() {
        let short = validate_password("Ab1!");
        assert!(!short.valid);
        assert!(short.message.unwrap().contains("at least 8"));

        let no_digit = validate_password("Abcdefgh!");
        assert!(!no_digit.valid);
        assert!(no_digit.message.unwrap().contains("number"));

        let no_symbol = validate_password("Abcdefg1");
        assert!(!no_symbol.valid);
        assert!(no_symbol.message.unwrap().contains("special"));

        let foreign_symbol = validate_password("Abcdefg1~");
        assert!(!foreign_symbol.valid);
    }

    #[test]
    fn reference_password_is_valid_and_strong() {
        assert!(validate_password("Abc12345!").valid);
        assert_eq!(password_strength("Abc12345!"), PasswordStrength::Strong);
    }

    #[test]
    fn strength_buckets_by_number_of_checks() {
        // lowercase only
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        // length + lowercase
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
        // length + lowercase + digit
        assert_eq!(password_strength("abcdefg1"), PasswordStrength::Medium);
        // length + lowercase + uppercase + digit
        assert_eq!(password_strength("Abcdefg1"), PasswordStrength::Medium);
        assert_eq!(password_strength(""), PasswordStrength::Weak);
    }

    #[test]
    fn password_match_requires_equal_non_empty() {
        assert!(validate_password_match("Abc12345!", "Abc12345!").valid);
        assert!(!validate_password_match("Abc12345!", "Abc12345?").valid);
        assert!(!validate_password_match("", "").valid);
        assert!(!validate_password_match("Abc12345!", "").valid);
    }

    #[test]
    fn password_match_is_idempotent() {
        let pairs = [
            ("Abc12345!", "Abc12345!"),
            ("Abc12345!", "abc12345!"),
            ("x", "y"),
        ];
        for (a, b) in pairs {
            assert_eq!(validate_password_match(a, b), validate_password_match(a, b));
        }
    }

    #[test]
    fn verification_code_must_be_six_ascii_digits() {
        assert!(validate_verification_code("123456").valid);
        assert!(validate_verification_code(" 123456 ").valid);
        assert!(!validate_verification_code("12345").valid);
        assert!(!validate_verification_code("1234567").valid);
        assert!(!validate_verification_code("12a456").valid);
        assert!(!validate_verification_code("١٢٣٤٥٦").valid);
    }

    #[test]
    fn validate_credentials_collects_all_failures() {
        let errors = validate_credentials("nope", "short", "other");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                SignupField::Email,
                SignupField::Password,
                SignupField::ConfirmPassword
            ]
        );
        assert!(validate_credentials("a@b.co", "Abc12345!", "Abc12345!").is_empty());
    }

    #[test]
    fn profile_rules_check_role_specific_ranges() {
        let mut student = ProfileDraft::empty(Role::Student);
        student.full_name = "Kid".to_string();
        student.details = RoleProfile::Student(StudentProfile {
            grade: Some(13),
            ..StudentProfile::default()
        });
        let errors = validate_profile(&student);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, SignupField::Grade);

        let teacher = ProfileDraft {
            full_name: String::new(),
            phone: None,
            details: RoleProfile::Teacher(TeacherProfile {
                experience_years: Some(61),
                bio: Some("x".repeat(MAX_BIO_CHARS + 1)),
                ..TeacherProfile::default()
            }),
        };
        let fields: Vec<_> = validate_profile(&teacher).iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                SignupField::FullName,
                SignupField::ExperienceYears,
                SignupField::Bio
            ]
        );

        let mut admin = ProfileDraft::empty(Role::Admin);
        admin.full_name = "Root".to_string();
        assert!(validate_profile(&admin).is_empty());
    }
}
