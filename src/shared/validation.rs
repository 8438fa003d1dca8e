use crate::shared::error::AppError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// The rule a field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rule {
    Required,
    MaxLength { max: u64 },
    NotInEnum,
    Malformed,
}

impl Rule {
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::MaxLength { .. } => "length",
            Rule::NotInEnum => "enum",
            Rule::Malformed => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// camelCase dotted path, e.g. `name.firstName`
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

impl FieldViolation {
    fn from_error(field: String, error: &ValidationError) -> Self {
        let rule = match &*error.code {
            "required" => Rule::Required,
            "length" => Rule::MaxLength {
                max: error
                    .params
                    .get("max")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or_default(),
            },
            "enum" => Rule::NotInEnum,
            _ => Rule::Malformed,
        };
        let message = match error.message.as_deref() {
            Some(message) => message.to_string(),
            None => match &rule {
                Rule::Required => format!("{field} is required"),
                Rule::MaxLength { max } => format!("{field} can not be more than {max} characters"),
                Rule::NotInEnum => format!("{field} has an invalid value"),
                Rule::Malformed => format!("{field} is malformed"),
            },
        };

        Self {
            field,
            rule,
            message,
        }
    }
}

/// Every field-level violation found while validating one candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn single(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                rule,
                message: message.into(),
            }],
        }
    }

    pub fn required(field: &str) -> Self {
        Self::single(field, Rule::Required, format!("{field} is required"))
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::single("body", Rule::Malformed, message)
    }

    /// Looks up the violation reported for `field`, if any.
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        collect_violations(&errors, None, &mut violations);
        // HashMap order is unstable; keep responses deterministic
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self { violations }
    }
}

fn collect_violations(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut Vec<FieldViolation>,
) {
    for (field, kind) in errors.errors() {
        let name = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name,
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldViolation::from_error(path.clone(), e)));
            }
            ValidationErrorsKind::Struct(nested) => collect_violations(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_violations(nested, Some(&format!("{path}.{index}")), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Rejects empty or whitespace-only strings, reported as a missing value.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Builds the error reported when a value is outside a closed set.
pub fn not_in_enum(value: &str, kind: &str) -> ValidationError {
    let mut error = ValidationError::new("enum");
    error.message = Some(Cow::Owned(format!("{value} is not a valid {kind}")));
    error.add_param(Cow::Borrowed("value"), &value);
    error
}

/// JSON body extractor whose rejections (bad syntax, wrong types, missing
/// content type) are reported as a malformed-input validation failure. Type
/// errors name the offending field. Field rules are checked later, when the
/// value is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::warn!("Rejected request body: {}", e.body_text());
                AppError::ValidationError(ValidationFailure::malformed(e.body_text()))
            })?;

        let value = serde_path_to_error::deserialize(raw).map_err(|e| {
            let field = body_field(e.path());
            tracing::warn!(%field, "Rejected request body: {}", e.inner());
            AppError::ValidationError(ValidationFailure::single(
                field,
                Rule::Malformed,
                e.inner().to_string(),
            ))
        })?;

        Ok(JsonBody(value))
    }
}

/// Dotted field path of a deserialization error, or `body` at the root.
fn body_field(path: &serde_path_to_error::Path) -> String {
    match path.to_string().as_str() {
        "." => "body".to_string(),
        field => field.to_string(),
    }
}
