//! Response envelope
//!
//! Every backend endpoint wraps its payload in an envelope. Two wire shapes
//! exist; the client picks one [`EnvelopeKind`] at construction and decodes
//! every response body into the same [`Envelope`].
//!
//! | Kind | Wire shape |
//! |------|------------|
//! | [`EnvelopeKind::Standard`] | `{ "code": …, "message": …, "data": … }` |
//! | [`EnvelopeKind::Legacy`] | `{ "code": …, "msg": …, "result": … }` |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business status code carried inside the envelope.
///
/// Backends send it either as a JSON number or as a JSON string. Integral
/// floats (`200.0`) decode as [`Number`](Self::Number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "CodeWire")]
pub enum BusinessCode {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeWire {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<CodeWire> for BusinessCode {
    type Error = String;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn try_from(wire: CodeWire) -> Result<Self, Self::Error> {
        match wire {
            CodeWire::Integer(n) => Ok(Self::Number(n)),
            // 超出 i64 范围的值 as 转换会饱和，需排除
            CodeWire::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Ok(Self::Number(f as i64))
            }
            CodeWire::Float(f) => Err(format!("business code {f} is not an integer")),
            CodeWire::Text(s) => Ok(Self::Text(s)),
        }
    }
}

impl BusinessCode {
    /// Numeric value; text codes are parsed leniently (`"200"` → `200`).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Whether the code read as an HTTP status lies in `[200, 300)`.
    pub fn is_http_success(&self) -> bool {
        self.as_i64().is_some_and(|c| (200..300).contains(&c))
    }
}

impl std::fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BusinessCode {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for BusinessCode {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Decoded envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: BusinessCode,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Payload, dropping the envelope.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Envelope wire shape, chosen once per client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    /// `{ code, message, data }`
    #[default]
    Standard,
    /// `{ code, msg, result }`
    Legacy,
}

// Option 字段缺失时 serde 自动视为 None
#[derive(Deserialize)]
struct StandardWire<T> {
    code: BusinessCode,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct LegacyWire<T> {
    code: BusinessCode,
    msg: Option<String>,
    result: Option<T>,
}

impl EnvelopeKind {
    /// Name of the message field in this shape.
    pub fn message_field(self) -> &'static str {
        match self {
            Self::Standard => "message",
            Self::Legacy => "msg",
        }
    }

    /// Decode a response body.
    pub fn decode<T: DeserializeOwned>(self, body: &str) -> serde_json::Result<Envelope<T>> {
        match self {
            Self::Standard => {
                let wire: StandardWire<T> = serde_json::from_str(body)?;
                Ok(Envelope {
                    code: wire.code,
                    message: wire.message,
                    data: wire.data,
                })
            }
            Self::Legacy => {
                let wire: LegacyWire<T> = serde_json::from_str(body)?;
                Ok(Envelope {
                    code: wire.code,
                    message: wire.msg,
                    data: wire.result,
                })
            }
        }
    }

    /// Best-effort message of an arbitrary body (used for non-2xx responses).
    ///
    /// Returns `None` for bodies that are not JSON objects or whose message
    /// field is missing or empty.
    pub fn message_of(self, body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        value
            .get(self.message_field())
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}
