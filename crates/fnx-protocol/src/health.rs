use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Document returned by the backend health endpoint.
///
/// The display fields are optional. The document itself is kept exactly as
/// received, so the raw layout shows what the backend sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthResponse {
    pub status: Option<String>,
    pub engine: Option<String>,
    pub version: Option<String>,
    /// Reported by the orchestrator backend, absent on older deployments.
    pub orchestrator: Option<String>,
    document: Map<String, Value>,
}

/// Display fields extracted from the document.
#[derive(Deserialize)]
struct DisplayFields {
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    engine: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    version: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    orchestrator: Option<String>,
}

/// Accept any scalar for a display field. `null` counts as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl<'de> Deserialize<'de> for HealthResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only objects are health documents.
        let document = Map::<String, Value>::deserialize(deserializer)?;
        let fields = DisplayFields::deserialize(Value::Object(document.clone()))
            .map_err(serde::de::Error::custom)?;
        Ok(Self {
            status: fields.status,
            engine: fields.engine,
            version: fields.version,
            orchestrator: fields.orchestrator,
            document,
        })
    }
}

impl HealthResponse {
    /// Parse a response body. Anything other than a JSON object is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// The document as received, in the backend's key order.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn status(&self) -> FieldValue<'_> {
        FieldValue::from(self.status.as_deref())
    }

    pub fn engine(&self) -> FieldValue<'_> {
        FieldValue::from(self.engine.as_deref())
    }

    pub fn version(&self) -> FieldValue<'_> {
        FieldValue::from(self.version.as_deref())
    }

    pub fn orchestrator(&self) -> FieldValue<'_> {
        FieldValue::from(self.orchestrator.as_deref())
    }

    /// Two-space indented JSON of the received document.
    pub fn to_pretty_json(&self) -> String {
        // A map of JSON values always serializes.
        serde_json::to_string_pretty(&self.document).unwrap_or_default()
    }
}

/// A display field that is either reported by the backend or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Known(&'a str),
    Unknown,
}

impl<'a> FieldValue<'a> {
    pub fn is_known(&self) -> bool {
        matches!(self, FieldValue::Known(_))
    }

    /// The reported value, or `unknown` when the backend left it out.
    pub fn or_placeholder(self, unknown: &'a str) -> &'a str {
        match self {
            FieldValue::Known(value) => value,
            FieldValue::Unknown => unknown,
        }
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(v) => FieldValue::Known(v),
            None => FieldValue::Unknown,
        }
    }
}
