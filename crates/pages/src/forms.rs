//! Registration forms filled in on the admin dashboard
//!
//! Forms hold raw input exactly as typed. `validated` trims it, checks it
//! and produces the payload the backend expects.

use learnloop_client::{NewStudent, NewTeacher};
use regex::Regex;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

lazy_static::lazy_static! {
    /// Australian phone number once spaces, hyphens and parentheses are removed
    pub static ref AU_PHONE_REGEX: Regex = Regex::new(r"^\+61\d{9}$").unwrap();
}

/// Characters people type into phone numbers that carry no digits
const PHONE_SEPARATORS: [char; 4] = [' ', '-', '(', ')'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Full name, email, password, and class are required.")]
    MissingStudentFields,

    #[error("Full name, email, and password are required.")]
    MissingTeacherFields,

    #[error("Phone must be Australian format: +61 followed by 9 digits (e.g., +61412345678).")]
    InvalidPhone,

    #[error("{0}")]
    Invalid(String),
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{}: {}", field, reason)
            })
            .collect::<Vec<_>>()
            .join("; ");

        FormError::Invalid(message)
    }
}

/// Strip separators; `None` for an empty number
pub fn normalize_phone(raw: &str) -> Option<String> {
    let phone: String = raw.chars().filter(|c| !PHONE_SEPARATORS.contains(c)).collect();
    if phone.is_empty() {
        None
    } else {
        Some(phone)
    }
}

pub fn is_valid_au_phone(phone: &str) -> bool {
    AU_PHONE_REGEX.is_match(phone)
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct StudentForm {
    pub full_name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: String,

    pub grade: String,

    pub class_name: String,
}

impl StudentForm {
    pub fn validated(&self) -> Result<NewStudent, FormError> {
        let form = StudentForm {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            grade: self.grade.trim().to_string(),
            class_name: self.class_name.trim().to_string(),
        };

        if form.full_name.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.class_name.is_empty()
        {
            return Err(FormError::MissingStudentFields);
        }
        form.validate()?;

        Ok(NewStudent {
            grade: blank_to_none(&form.grade),
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            class_name: form.class_name,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct TeacherForm {
    pub full_name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6 to 128 characters"))]
    pub password: String,

    pub subject: String,
    pub department: String,
    pub employee_code: String,
    pub phone: String,
}

impl TeacherForm {
    pub fn validated(&self) -> Result<NewTeacher, FormError> {
        let form = TeacherForm {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };

        if form.full_name.is_empty() || form.email.is_empty() || form.password.is_empty() {
            return Err(FormError::MissingTeacherFields);
        }

        let phone = normalize_phone(&form.phone);
        if let Some(phone) = phone.as_deref() {
            if !is_valid_au_phone(phone) {
                return Err(FormError::InvalidPhone);
            }
        }
        form.validate()?;

        Ok(NewTeacher {
            subject: blank_to_none(&form.subject),
            department: blank_to_none(&form.department),
            employee_code: blank_to_none(&form.employee_code),
            phone,
            full_name: form.full_name,
            email: form.email,
            password: form.password,
        })
    }
}
