//! Request body formatting

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Encoding of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// JSON text, sent with `Content-Type: application/json`
    Json,
    /// Multipart form
    Form,
}

/// Single part of a [`FormBody`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// File name reported to the server
        file_name: String,
        /// File content
        bytes: Vec<u8>,
    },
}

/// Multipart form payload
///
/// Parts keep the order they were appended in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    parts: Vec<FormPart>,
}

impl FormBody {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file field
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes: bytes.into(),
        });
        self
    }

    /// Parts in append order
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the form has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn into_multipart(self) -> reqwest::multipart::Form {
        self.parts
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, part| match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    bytes,
                } => form.part(
                    name,
                    reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                ),
            })
    }
}

/// Formatted request body, ready to be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// JSON text
    Json(String),
    /// Multipart form
    Form(FormBody),
}

impl Payload {
    /// Encoding of this payload
    pub fn encoding(&self) -> BodyEncoding {
        match self {
            Self::Json(_) => BodyEncoding::Json,
            Self::Form(_) => BodyEncoding::Form,
        }
    }
}

/// Format `body` with the given encoding
///
/// The body is rejected when it serializes to `null`, `false`, `0` or an
/// empty string. For [`BodyEncoding::Form`] it must be a key/value mapping;
/// every entry becomes a text part, in the insertion order of the mapping.
pub fn format_body<B>(body: &B, encoding: BodyEncoding) -> Result<Payload, Error>
where
    B: Serialize + ?Sized,
{
    let value = serde_json::to_value(body).map_err(|e| Error::InvalidBody(e.to_string()))?;

    if is_falsy(&value) {
        tracing::warn!("Rejecting empty request body");
        return Err(Error::InvalidBody("an object was expected".to_string()));
    }

    match encoding {
        BodyEncoding::Json => Ok(Payload::Json(value.to_string())),
        BodyEncoding::Form => {
            let Value::Object(map) = value else {
                tracing::warn!("Rejecting form body that is not a mapping");
                return Err(Error::InvalidBody(
                    "a key/value mapping was expected for a form body".to_string(),
                ));
            };

            let form = map
                .iter()
                .fold(FormBody::new(), |form, (key, value)| {
                    form.text(key.as_str(), value_to_text(value))
                });

            Ok(Payload::Form(form))
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a value as it appears in a URL segment or form field
///
/// Strings are verbatim and numbers print like [`ToString`] on the Rust
/// number, so `1.0` is `1`. Arrays join their items with `,`, with `null`
/// items left empty. Objects keep their JSON text.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[derive(Serialize)]
    struct Profile {
        name: String,
        age: u32,
        active: bool,
    }

    #[test]
    fn test_json_body() {
        let payload = format_body(&json!({"a": 1}), BodyEncoding::Json).expect("Valid body");
        assert_eq!(payload, Payload::Json(r#"{"a":1}"#.to_string()));
        assert_eq!(payload.encoding(), BodyEncoding::Json);
    }

    #[test]
    fn test_json_body_from_struct() {
        let profile = Profile {
            name: "ada".to_string(),
            age: 36,
            active: true,
        };
        let payload = format_body(&profile, BodyEncoding::Json).expect("Valid body");
        assert_eq!(
            payload,
            Payload::Json(r#"{"name":"ada","age":36,"active":true}"#.to_string())
        );
    }

    #[test]
    fn test_missing_body() {
        let body: Option<Value> = None;
        let err = format_body(&body, BodyEncoding::Json).expect_err("Missing body");
        assert_eq!(err.kind(), ErrorKind::InvalidBody);

        let err = format_body(&body, BodyEncoding::Form).expect_err("Missing body");
        assert_eq!(err.kind(), ErrorKind::InvalidBody);
    }

    #[test]
    fn test_falsy_bodies() {
        for body in [json!(null), json!(false), json!(0), json!("")] {
            let err = format_body(&body, BodyEncoding::Json).expect_err("Falsy body");
            assert_eq!(err.kind(), ErrorKind::InvalidBody, "body: {}", body);
        }
    }

    #[test]
    fn test_empty_object_is_accepted() {
        let payload = format_body(&json!({}), BodyEncoding::Json).expect("Empty object");
        assert_eq!(payload, Payload::Json("{}".to_string()));
    }

    #[test]
    fn test_form_body_keeps_insertion_order() {
        let profile = Profile {
            name: "ada".to_string(),
            age: 36,
            active: false,
        };
        let payload = format_body(&profile, BodyEncoding::Form).expect("Valid body");

        let expected = FormBody::new()
            .text("name", "ada")
            .text("age", "36")
            .text("active", "false");
        assert_eq!(payload, Payload::Form(expected));
        assert_eq!(payload.encoding(), BodyEncoding::Form);
    }

    #[test]
    fn test_form_body_from_unordered_keys() {
        let payload =
            format_body(&json!({"zeta": "z", "alpha": null}), BodyEncoding::Form)
                .expect("Valid body");

        let Payload::Form(form) = payload else {
            panic!("Expected form payload");
        };
        assert_eq!(
            form.parts(),
            &[
                FormPart::Text {
                    name: "zeta".to_string(),
                    value: "z".to_string(),
                },
                FormPart::Text {
                    name: "alpha".to_string(),
                    value: "null".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_form_values_for_floats_and_arrays() {
        let payload = format_body(
            &json!({"whole": 1.0, "half": 2.5, "ids": [1, 2], "mixed": ["a", null, 3.0]}),
            BodyEncoding::Form,
        )
        .expect("Valid body");

        let expected = FormBody::new()
            .text("whole", "1")
            .text("half", "2.5")
            .text("ids", "1,2")
            .text("mixed", "a,,3");
        assert_eq!(payload, Payload::Form(expected));
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("plain")), "plain");
        assert_eq!(value_to_text(&json!(7)), "7");
        assert_eq!(value_to_text(&json!(-3.0)), "-3");
        assert_eq!(value_to_text(&json!(0.25)), "0.25");
        assert_eq!(value_to_text(&json!(1.0)), 1.0_f64.to_string());
        assert_eq!(value_to_text(&json!([[1, 2], 3])), "1,2,3");
        assert_eq!(value_to_text(&json!([])), "");
        assert_eq!(value_to_text(&json!(null)), "null");
        assert_eq!(value_to_text(&json!(true)), "true");
        assert_eq!(value_to_text(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_form_body_requires_mapping() {
        let err = format_body(&json!([1, 2]), BodyEncoding::Form).expect_err("Array body");
        assert_eq!(err.kind(), ErrorKind::InvalidBody);

        // JSON encoding accepts any non-falsy value
        assert!(format_body(&json!([1, 2]), BodyEncoding::Json).is_ok());
    }

    #[test]
    fn test_form_builder() {
        let form = FormBody::new()
            .text("title", "report")
            .file("upload", "report.txt", b"hello".to_vec());

        assert_eq!(form.len(), 2);
        assert!(!form.is_empty());
        assert!(matches!(
            &form.parts()[1],
            FormPart::File { name, file_name, bytes }
                if name == "upload" && file_name == "report.txt" && bytes == b"hello"
        ));
        assert!(FormBody::new().is_empty());
    }
}
