//! MIME content type handling.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// MIME content type with parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "application", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "pdf", "mixed").
    pub sub_type: String,
    /// Parameters (e.g., boundary=xxx, name=invoice.pdf).
    pub parameters: HashMap<String, String>,
}

impl ContentType {
    /// Creates a new content type.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: HashMap::new(),
        }
    }

    /// Creates a text/plain content type, the RFC 2045 default for parts
    /// without a `Content-Type` header.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameters.get("boundary").map(String::as_str)
    }

    /// Returns the name parameter if present.
    ///
    /// Older mailers put the attachment filename here instead of in
    /// `Content-Disposition`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.parameters.get("name").map(String::as_str)
    }

    /// Checks if this is a multipart content type.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("multipart")
    }

    /// Parses a content type string.
    ///
    /// Format: `type/subtype; param1=value1; param2=value2`
    ///
    /// # Errors
    ///
    /// Returns an error if the type/subtype portion is missing or malformed.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split(';');

        let type_str = parts
            .next()
            .ok_or_else(|| Error::InvalidContentType("Empty content type".to_string()))?
            .trim();

        let (main_type, sub_type) = type_str
            .split_once('/')
            .ok_or_else(|| Error::InvalidContentType(format!("Missing subtype in '{type_str}'")))?;

        let main_type = main_type.trim().to_lowercase();
        let sub_type = sub_type.trim().to_lowercase();
        if main_type.is_empty() || sub_type.is_empty() {
            return Err(Error::InvalidContentType(format!(
                "Empty type or subtype in '{type_str}'"
            )));
        }

        let mut content_type = Self::new(main_type, sub_type);

        for param in parts {
            let param = param.trim();
            if let Some((key, value)) = param.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().trim_matches('"').to_string();
                content_type.parameters.insert(key, value);
            }
        }

        Ok(content_type)
    }
}

/// Formats as the bare media type `type/subtype`, parameters omitted.
impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_new() {
        let ct = ContentType::new("application", "pdf");
        assert_eq!(ct.main_type, "application");
        assert_eq!(ct.sub_type, "pdf");
        assert!(ct.parameters.is_empty());
    }

    #[test]
    fn test_content_type_parse() {
        let ct = ContentType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(ct.main_type, "text");
        assert_eq!(ct.sub_type, "plain");
        assert_eq!(ct.parameters.get("charset").map(String::as_str), Some("utf-8"));
    }

    #[test]
    fn test_content_type_parse_quoted_boundary() {
        let ct = ContentType::parse("multipart/mixed; boundary=\"----=_Part_123\"").unwrap();
        assert!(ct.is_multipart());
        assert_eq!(ct.boundary(), Some("----=_Part_123"));
    }

    #[test]
    fn test_content_type_parse_name_parameter() {
        let ct = ContentType::parse("application/pdf; name=\"invoice.pdf\"").unwrap();
        assert_eq!(ct.name(), Some("invoice.pdf"));
    }

    #[test]
    fn test_content_type_parse_normalizes_case() {
        let ct = ContentType::parse("Application/PDF; Name=a.pdf").unwrap();
        assert_eq!(ct.main_type, "application");
        assert_eq!(ct.sub_type, "pdf");
        assert_eq!(ct.name(), Some("a.pdf"));
    }

    #[test]
    fn test_content_type_parse_missing_subtype() {
        assert!(ContentType::parse("text").is_err());
        assert!(ContentType::parse("text/").is_err());
        assert!(ContentType::parse("/plain").is_err());
    }

    #[test]
    fn test_content_type_display_is_media_type_only() {
        let ct = ContentType::parse("application/pdf; name=invoice.pdf").unwrap();
        assert_eq!(ct.to_string(), "application/pdf");
    }

    #[test]
    fn test_text_plain_default() {
        let ct = ContentType::text_plain();
        assert_eq!(ct.to_string(), "text/plain");
        assert!(!ct.is_multipart());
    }
}
