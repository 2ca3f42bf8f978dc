//! Input validation helpers shared by request DTOs.
//!
//! DTOs derive [`validator::Validate`] with localized messages; [`validate_input`]
//! turns a failed validation into a single [`CoreError::Validation`] whose
//! message lists every failure joined with `, `.

use std::borrow::Cow;

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Validate `input`, flattening nested and list errors into one message.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    match input.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let mut messages = Vec::new();
            collect_messages(&errors, "", &mut messages);
            messages.sort();
            messages.dedup();
            Err(CoreError::Validation(messages.join(", ")))
        }
    }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(format!("{path}: {}", err.code)));
                    out.push(message.into_owned());
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_messages(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

/// Clamp a percentage-like value into `0..=100`.
pub fn clamp_percent(value: i64) -> i64 {
    value.clamp(0, 100)
}

/// Reject strings that are empty after trimming.
pub fn require_non_blank(value: &str, message: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}
