//! Validation of post-creation requests.
//!
//! Input arrives as an untyped JSON value. The payload must be an object.
//! Each field is then checked for type (string, absent or null) and, when it
//! is a string, for length. Lengths are counted in Unicode scalar values.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MAX_CHARS: usize = 10_000;

/// A create-post request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct CreatePostInput {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_content"))]
    pub content: String,
}

/// Field of a create-post request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostField {
    Title,
    Content,
}

impl PostField {
    pub fn as_str(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Content => "content",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PostField::Title => "Title",
            PostField::Content => "Content",
        }
    }

    fn max_chars(self) -> usize {
        match self {
            PostField::Title => TITLE_MAX_CHARS,
            PostField::Content => CONTENT_MAX_CHARS,
        }
    }
}

/// The rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Empty, absent or null.
    Required,
    TooLong { max: usize },
    /// Present with a non-string JSON type.
    NotAString,
}

impl Constraint {
    /// Machine-readable name of the rule.
    pub fn code(self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::TooLong { .. } => "too_long",
            Constraint::NotAString => "not_a_string",
        }
    }

    fn message(self, field: PostField) -> String {
        match self {
            Constraint::Required => format!("{} is required", field.label()),
            Constraint::TooLong { max } => {
                format!("{} must be at most {} characters", field.label(), max)
            }
            Constraint::NotAString => format!("{} must be a string", field.label()),
        }
    }
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: PostField,
    pub constraint: Constraint,
    pub message: String,
}

/// Why a create-post request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostValidationError {
    /// The payload is not an object.
    #[error("Malformed post: {0}")]
    Malformed(String),

    /// Every violated field, title first.
    #[error("{}", join_messages(.0))]
    Invalid(Vec<FieldViolation>),
}

impl PostValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            PostValidationError::Malformed(_) => &[],
            PostValidationError::Invalid(violations) => violations,
        }
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate an untyped create-post payload.
///
/// Pure and synchronous. Unknown fields are ignored.
pub fn validate_create_post(payload: &Value) -> Result<CreatePostInput, PostValidationError> {
    if !payload.is_object() {
        return Err(PostValidationError::Malformed(
            "expected an object with `title` and `content`".to_string(),
        ));
    }

    let title = string_field(payload, PostField::Title);
    let content = string_field(payload, PostField::Content);
    let mistyped = [title.is_none(), content.is_none()];

    let input = CreatePostInput {
        title: title.unwrap_or_default(),
        content: content.unwrap_or_default(),
    };

    let length_errors = input.validate().err();
    if mistyped.contains(&true) || length_errors.is_some() {
        return Err(PostValidationError::Invalid(collect_violations(
            mistyped,
            length_errors.as_ref(),
        )));
    }

    Ok(input)
}

/// The string value of `field`; `Some("")` when absent or null, `None` when
/// the value has another JSON type.
fn string_field(payload: &Value, field: PostField) -> Option<String> {
    match payload.get(field.as_str()) {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => None,
    }
}

fn collect_violations(
    mistyped: [bool; 2],
    errors: Option<&ValidationErrors>,
) -> Vec<FieldViolation> {
    let fields = errors.map(ValidationErrors::field_errors);
    let mut violations = Vec::new();

    for (field, mistyped) in [PostField::Title, PostField::Content]
        .into_iter()
        .zip(mistyped)
    {
        if mistyped {
            violations.push(FieldViolation {
                field,
                constraint: Constraint::NotAString,
                message: Constraint::NotAString.message(field),
            });
            continue;
        }
        let Some(field_errors) = fields.as_ref().and_then(|f| f.get(field.as_str())) else {
            continue;
        };
        for err in field_errors.iter() {
            let constraint = if err.code == Constraint::Required.code() {
                Constraint::Required
            } else {
                Constraint::TooLong {
                    max: field.max_chars(),
                }
            };
            let message = err
                .message
                .as_deref()
                .map(str::to_owned)
                .unwrap_or_else(|| constraint.message(field));
            violations.push(FieldViolation {
                field,
                constraint,
                message,
            });
        }
    }

    violations
}

fn check_length(value: &str, field: PostField) -> Result<(), ValidationError> {
    let len = value.chars().count();
    let constraint = if len == 0 {
        Constraint::Required
    } else if len > field.max_chars() {
        Constraint::TooLong {
            max: field.max_chars(),
        }
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new(constraint.code());
    if let Constraint::TooLong { max } = constraint {
        err.add_param(Cow::Borrowed("max"), &max);
        err.add_param(Cow::Borrowed("actual"), &len);
    }
    err.message = Some(Cow::Owned(constraint.message(field)));
    Err(err)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_length(title, PostField::Title)
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    check_length(content, PostField::Content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_valid_input() {
        let input = validate_create_post(&json!({"title": "Hello", "content": "World"})).unwrap();
        assert_eq!(input.title, "Hello");
        assert_eq!(input.content, "World");
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let input = validate_create_post(&json!({
            "title": "Hello",
            "content": "World",
            "authorId": "someone"
        }))
        .unwrap();
        assert_eq!(
            input,
            CreatePostInput {
                title: "Hello".to_string(),
                content: "World".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_title_is_required() {
        let err = validate_create_post(&json!({"title": "", "content": "x"})).unwrap_err();
        assert_eq!(
            err.violations(),
            &[FieldViolation {
                field: PostField::Title,
                constraint: Constraint::Required,
                message: "Title is required".to_string(),
            }]
        );
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_absent_and_null_fields_are_required() {
        let err = validate_create_post(&json!({})).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![PostField::Title, PostField::Content]);

        let err = validate_create_post(&json!({"title": null, "content": "x"})).unwrap_err();
        assert_eq!(err.violations()[0].constraint, Constraint::Required);
    }

    #[test]
    fn test_length_limits_are_inclusive() {
        let title = "a".repeat(TITLE_MAX_CHARS);
        let content = "b".repeat(CONTENT_MAX_CHARS);
        assert!(validate_create_post(&json!({"title": title, "content": content})).is_ok());

        let title = "a".repeat(TITLE_MAX_CHARS + 1);
        let err = validate_create_post(&json!({"title": title, "content": "x"})).unwrap_err();
        assert_eq!(
            err.violations()[0].constraint,
            Constraint::TooLong { max: TITLE_MAX_CHARS }
        );
        assert_eq!(err.to_string(), "Title must be at most 200 characters");
    }

    #[test]
    fn test_reports_every_violated_field() {
        let content = "b".repeat(CONTENT_MAX_CHARS + 1);
        let err = validate_create_post(&json!({"title": "", "content": content})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Title is required, Content must be at most 10000 characters"
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 200 three-byte characters
        let title = "あ".repeat(TITLE_MAX_CHARS);
        assert!(validate_create_post(&json!({"title": title, "content": "本文"})).is_ok());
    }

    #[test]
    fn test_rejects_malformed_payloads() {
        for payload in [
            json!(null),
            json!("title"),
            json!(["Hello", "World"]),
        ] {
            assert!(matches!(
                validate_create_post(&payload),
                Err(PostValidationError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_wrong_types_name_each_field() {
        let err = validate_create_post(&json!({"title": 42, "content": 7})).unwrap_err();
        assert_eq!(
            err.violations(),
            &[
                FieldViolation {
                    field: PostField::Title,
                    constraint: Constraint::NotAString,
                    message: "Title must be a string".to_string(),
                },
                FieldViolation {
                    field: PostField::Content,
                    constraint: Constraint::NotAString,
                    message: "Content must be a string".to_string(),
                },
            ]
        );
        assert_eq!(
            err.to_string(),
            "Title must be a string, Content must be a string"
        );
    }

    #[test]
    fn test_wrong_type_is_reported_alongside_length_errors() {
        let err = validate_create_post(&json!({"title": ["Hello"], "content": ""})).unwrap_err();
        let found: Vec<_> = err
            .violations()
            .iter()
            .map(|v| (v.field, v.constraint))
            .collect();
        assert_eq!(
            found,
            vec![
                (PostField::Title, Constraint::NotAString),
                (PostField::Content, Constraint::Required),
            ]
        );
    }
}
