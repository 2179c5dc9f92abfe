/// Typed request forms and validation
///
/// Form input is deserialized into explicit structs and validated by an
/// explicit function returning either the validated values or field-level
/// errors for re-rendering; nothing is persisted on failure.
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Outcome of validating a form: the typed values, or errors to re-render.
#[derive(Debug)]
pub enum Validated<T> {
    Valid(T),
    Invalid(FieldErrors),
}

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level validation errors, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errs: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errors) in errs.field_errors() {
            for err in errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                out.push(field, message);
            }
        }
        out
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Text must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Create/edit post form.
///
/// `group` carries the selected group's slug (empty string for "no group");
/// `image_key` references an already-uploaded image in external storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostForm {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image_key: Option<String>,
}

impl PostForm {
    /// Selected group slug, with the empty form value normalized away.
    pub fn group_slug(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Image key, with the empty form value normalized away.
    pub fn image(&self) -> Option<&str> {
        self.image_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Add-comment form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

/// Validated values for creating or editing a post, with the group
/// reference already resolved.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_post_text_is_invalid() {
        for text in ["", "   ", "\n\t"] {
            let form = PostForm {
                text: text.to_string(),
                group: None,
                image_key: None,
            };
            let errs: FieldErrors = form.validate().unwrap_err().into();
            let errs = errs.into_vec();
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].field, "text");
            assert_eq!(errs[0].message, "Text must not be empty");
        }
    }

    #[test]
    fn populated_post_form_is_valid() {
        let form = PostForm {
            text: "hello".to_string(),
            group: Some("rust".to_string()),
            image_key: Some("posts/cat.png".to_string()),
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.group_slug(), Some("rust"));
        assert_eq!(form.image(), Some("posts/cat.png"));
    }

    #[test]
    fn empty_select_value_normalizes_to_none() {
        let form = PostForm {
            text: "hello".to_string(),
            group: Some(String::new()),
            image_key: Some("  ".to_string()),
        };
        assert_eq!(form.group_slug(), None);
        assert_eq!(form.image(), None);
    }

    #[test]
    fn blank_comment_is_invalid() {
        let form = CommentForm {
            text: "  ".to_string(),
        };
        assert!(form.validate().is_err());
    }
}
