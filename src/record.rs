//! DNS records as the DNSimple API represents them.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{TtlParseError, utils::parse_int_literal};


/// A DNS record retrieved from the service.
///
/// Integer fields are kept as integers, use the `string_*` accessors when
/// text is needed, e.g. to build further requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Record {
    #[serde(default, deserialize_with = "deserialize_null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_to_default")]
    pub content: String,
    #[serde(deserialize_with = "deserialize_to_i64")]
    pub domain_id: i64,
    #[serde(deserialize_with = "deserialize_to_i64")]
    pub id: i64,
    /// Only meaningful for record types with a preference, such as MX.
    #[serde(rename = "prio", default, deserialize_with = "deserialize_null_to_zero")]
    pub priority: i64,
    #[serde(default, deserialize_with = "deserialize_null_to_default")]
    pub record_type: String,
    #[serde(default, deserialize_with = "deserialize_null_to_zero")]
    pub ttl: i64,
}

impl Record {
    pub fn string_id(&self) -> String {
        self.id.to_string()
    }

    pub fn string_domain_id(&self) -> String {
        self.domain_id.to_string()
    }

    pub fn string_prio(&self) -> String {
        self.priority.to_string()
    }

    pub fn string_ttl(&self) -> String {
        self.ttl.to_string()
    }
}

/// Parameters for creating a new record.
///
/// # Examples
///
/// ```
/// use dnsimple::record::CreateRecord;
///
/// let record = CreateRecord::new("www", "1.2.3.4", "A").ttl("3600");
///
/// assert_eq!(record.ttl.as_deref(), Some("3600"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRecord {
    /// Name of the record, relative to the domain. Empty for the apex.
    pub name: String,
    /// Where the record points.
    pub value: String,
    /// Type of the record, e.g. `A` or `MX`.
    pub record_type: String,
    /// TTL of the record as an integer literal. Empty or none means the service default.
    pub ttl: Option<String>,
}

impl CreateRecord {
    pub fn new(name: &str, value: &str, record_type: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            record_type: record_type.to_string(),
            ttl: None,
        }
    }

    /// Sets the TTL to the literal given.
    pub fn ttl(mut self, ttl: &str) -> Self {
        self.ttl = Some(ttl.to_string());
        self
    }

    /// Builds the request body for the create call.
    ///
    /// # Errors
    /// - `TtlParseError` if a non-empty ttl isn't an integer literal.
    pub(crate) fn params(&self) -> Result<JsonMap<String, JsonValue>, TtlParseError> {
        let mut params = JsonMap::new();
        params.insert("name".to_string(), self.name.as_str().into());
        params.insert("record_type".to_string(), self.record_type.as_str().into());
        params.insert("content".to_string(), self.value.as_str().into());

        match self.ttl.as_deref() {
            None | Some("") => {}
            Some(ttl) => {
                params.insert("ttl".to_string(), parse_int_literal(ttl)?.into());
            }
        }

        Ok(params)
    }
}

/// Helper type for deserializing a string or an i64 to an i64.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrI64 {
    I64(i64),
    String(String),
}

impl StringOrI64 {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            StringOrI64::I64(i) => Ok(i),
            StringOrI64::String(s) => s.parse().map_err(E::custom),
        }
    }
}

fn deserialize_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrI64::deserialize(deserializer)?.into_i64()
}

/// Like [deserialize_to_i64], but `null` becomes 0.
fn deserialize_null_to_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<StringOrI64>::deserialize(deserializer)?.map_or(Ok(0), StringOrI64::into_i64)
}

/// `null` becomes the type's default, as an absent field does.
fn deserialize_null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
