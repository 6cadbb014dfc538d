//! Body and query serialization utilities.

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.as_str().to_string()
    }
}

/// Serialize a value to a JSON string.
///
/// # Example
///
/// ```
/// use chainfetch_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let json = to_json(&user).expect("serialize");
/// assert_eq!(json, r#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// This is the query serializer every query-producing middleware goes
/// through: a structured value becomes `key=value&key2=value2`. Uses
/// `serde_html_form`, which supports `Vec<T>` for repeated parameters
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// A string is taken as an already-encoded query and returned unchanged.
///
/// # Example
///
/// ```
/// use chainfetch_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search {
///     q: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     page: Option<u32>,
/// }
///
/// let search = Search { q: "rust".to_string(), page: Some(1) };
/// let query = to_query_string(&search).expect("serialize");
/// assert_eq!(query, "q=rust&page=1");
///
/// assert_eq!(to_query_string("page=2&sort=asc").expect("string"), "page=2&sort=asc");
/// ```
pub fn to_query_string<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).or_else(|err| {
        // Top-level strings are rejected by the form serializer
        match serde_json::to_value(value) {
            Ok(serde_json::Value::String(encoded)) => Ok(encoded),
            _ => Err(err.into()),
        }
    })
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the message names the field that failed
/// (e.g. `user.address.city`).
///
/// # Example
///
/// ```
/// use chainfetch_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(ContentType::PlainText.to_string(), "text/plain");
    }

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
            age: u32,
        }

        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };

        let json = to_json(&user).expect("serialize");
        assert_eq!(json, r#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn to_query_string_from_map() {
        let mut params = BTreeMap::new();
        params.insert("a", 1);
        params.insert("b", 2);

        let query = to_query_string(&params).expect("serialize");
        assert_eq!(query, "a=1&b=2");
    }

    #[test]
    fn to_query_string_encodes_values() {
        let query = to_query_string(&[("q", "a b&c")]).expect("serialize");
        assert_eq!(query, "q=a+b%26c");
    }

    #[test]
    fn to_query_string_with_vec() {
        #[derive(serde::Serialize)]
        struct Filter {
            tags: Vec<String>,
        }

        let filter = Filter {
            tags: vec!["a".to_string(), "b".to_string()],
        };

        let query = to_query_string(&filter).expect("serialize");
        assert_eq!(query, "tags=a&tags=b");
    }

    #[test]
    fn to_query_string_rejects_scalars() {
        let result = to_query_string(&42);
        assert!(matches!(result, Err(crate::Error::QuerySerialization(_))));
    }

    #[test]
    fn to_query_string_passes_strings_through() {
        assert_eq!(to_query_string("a=1&b=%20").expect("str"), "a=1&b=%20");
        assert_eq!(
            to_query_string(&"x=1".to_string()).expect("String"),
            "x=1"
        );
        assert_eq!(to_query_string("").expect("empty"), "");
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_json(br#"{"address":{}}"#);

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("address"), "Expected path in error: {msg}");
        assert!(msg.contains("city"), "Expected field in error: {msg}");
    }
}
