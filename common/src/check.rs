//! Structural validation of untrusted template payloads.
//!
//! Every ingress point (localStorage, file import, catalog fetch, the
//! widget's save callback, the backend intake endpoint) runs its raw JSON
//! through [`parse_template`] or [`check_template`] before the value is
//! trusted anywhere else. Beyond this boundary a `Template` is assumed
//! well-formed.

use serde_json::Value;
use thiserror::Error;

use crate::model::template::Template;

/// Why a payload was rejected as a template. The `Display` text is what
/// the user sees when a file import fails, so each variant names the exact
/// offending location.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("template must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("template is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid template field `{field}`: {detail}")]
    InvalidField { field: String, detail: String },
}

/// Parses raw text and validates it as a [`Template`].
pub fn parse_template(raw: &str) -> Result<Template, TemplateError> {
    let value: Value = serde_json::from_str(raw)?;
    check_template(&value)
}

/// Validates an arbitrary JSON value against the template schema and
/// returns the typed model on success.
pub fn check_template(value: &Value) -> Result<Template, TemplateError> {
    let object = value
        .as_object()
        .ok_or_else(|| TemplateError::NotAnObject(json_type(value)))?;

    match object.get("basePdf") {
        None => return Err(TemplateError::MissingField("basePdf")),
        Some(Value::String(s)) if !s.is_empty() => {}
        Some(other) => {
            return Err(invalid("basePdf", format!("expected a non-empty string, got {}", json_type(other))));
        }
    }

    let pages = match object.get("schemas") {
        None => return Err(TemplateError::MissingField("schemas")),
        Some(Value::Array(pages)) => pages,
        Some(other) => {
            return Err(invalid("schemas", format!("expected an array, got {}", json_type(other))));
        }
    };
    for (page_idx, page) in pages.iter().enumerate() {
        let fields = page.as_object().ok_or_else(|| {
            invalid(
                format!("schemas[{page_idx}]"),
                format!("expected an object of field schemas, got {}", json_type(page)),
            )
        })?;
        for (name, field) in fields {
            check_field(page_idx, name, field)?;
        }
    }

    if let Some(sampledata) = object.get("sampledata") {
        let rows = sampledata.as_array().ok_or_else(|| {
            invalid("sampledata", format!("expected an array, got {}", json_type(sampledata)))
        })?;
        for (row_idx, row) in rows.iter().enumerate() {
            let entries = row.as_object().ok_or_else(|| {
                invalid(
                    format!("sampledata[{row_idx}]"),
                    format!("expected an object, got {}", json_type(row)),
                )
            })?;
            for (name, sample) in entries {
                if !sample.is_string() {
                    return Err(invalid(
                        format!("sampledata[{row_idx}].{name}"),
                        format!("expected a string value, got {}", json_type(sample)),
                    ));
                }
            }
        }
    }

    // Structure is sound; the typed decode only fails on payloads the
    // checks above already rejected.
    Ok(serde_json::from_value(value.clone())?)
}

fn check_field(page_idx: usize, name: &str, field: &Value) -> Result<(), TemplateError> {
    let path = |attr: &str| format!("schemas[{page_idx}].{name}.{attr}");

    let attrs = field.as_object().ok_or_else(|| {
        invalid(
            format!("schemas[{page_idx}].{name}"),
            format!("expected an object, got {}", json_type(field)),
        )
    })?;

    match attrs.get("type") {
        Some(Value::String(_)) => {}
        Some(other) => return Err(invalid(path("type"), format!("expected a string, got {}", json_type(other)))),
        None => return Err(invalid(path("type"), "missing".to_string())),
    }

    match attrs.get("position") {
        Some(Value::Object(position)) => {
            for axis in ["x", "y"] {
                match position.get(axis) {
                    Some(v) if v.is_number() => {}
                    Some(v) => {
                        return Err(invalid(path(&format!("position.{axis}")), format!("expected a number, got {}", json_type(v))));
                    }
                    None => return Err(invalid(path(&format!("position.{axis}")), "missing".to_string())),
                }
            }
        }
        Some(other) => return Err(invalid(path("position"), format!("expected an object, got {}", json_type(other)))),
        None => return Err(invalid(path("position"), "missing".to_string())),
    }

    for extent in ["width", "height"] {
        match attrs.get(extent) {
            Some(v) if v.is_number() => {}
            Some(v) => return Err(invalid(path(extent), format!("expected a number, got {}", json_type(v)))),
            None => return Err(invalid(path(extent), "missing".to_string())),
        }
    }

    Ok(())
}

fn invalid(field: impl Into<String>, detail: String) -> TemplateError {
    TemplateError::InvalidField { field: field.into(), detail }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
