//! Token entities for the signed access token format.

use chrono::{DateTime, Utc};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};

/// Signing algorithm advertised in every access token header
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Token type advertised in every access token header
pub const TOKEN_TYPE: &str = "JWT";

/// JOSE header of an access token.
///
/// Its content is fixed; it is never decoded on verification because the
/// signature already covers its exact bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: &'static str,
    pub typ: &'static str,
}

impl TokenHeader {
    /// The only header this system emits
    pub const HS256: Self = Self {
        alg: TOKEN_ALGORITHM,
        typ: TOKEN_TYPE,
    };

    /// Serializes the header as compact JSON with keys in sorted order
    pub fn to_json(&self) -> String {
        format!(r#"{{"alg":"{}","typ":"{}"}}"#, self.alg, self.typ)
    }
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self::HS256
    }
}

/// Claims structure for the access token payload.
///
/// Every claim is carried as a JSON *string* holding a decimal integer,
/// e.g. `{"exp":"1700000000","role":"2","sub":"42"}`, never as a JSON number.
/// Tokens already in circulation use this encoding, so both emission and
/// verification keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Absolute expiry, Unix seconds
    #[serde(deserialize_with = "decimal_string")]
    pub exp: i64,

    /// Role / permission level
    #[serde(deserialize_with = "decimal_string")]
    pub role: i64,

    /// Subject (user ID)
    #[serde(deserialize_with = "decimal_string")]
    pub sub: i64,
}

impl Claims {
    /// Creates claims for the given subject, role and expiry
    pub fn new(subject_id: i64, role: i64, exp: i64) -> Self {
        Self {
            exp,
            role,
            sub: subject_id,
        }
    }

    /// Serializes the claims as compact JSON: keys `exp`, `role`, `sub` in that
    /// order, values as quoted decimal strings.
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"exp":"{}","role":"{}","sub":"{}"}}"#,
            self.exp, self.role, self.sub
        )
    }

    /// Parses claims from payload JSON.
    ///
    /// The payload must be a JSON object and all three keys must be present
    /// as strings of decimal digits; unknown keys are ignored.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(de::Error::custom("claims payload must be a JSON object"));
        }
        Self::deserialize(value)
    }

    /// The identity these claims carry
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.sub,
            role: self.role,
        }
    }

    /// Whether `now` lies strictly after the expiry second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        (now.timestamp(), now.timestamp_subsec_nanos()) > (self.exp, 0)
    }
}

/// Identity recovered from a correctly signed access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Subject (user ID)
    pub subject_id: i64,
    /// Role / permission level
    pub role: i64,
}

impl Identity {
    pub fn new(subject_id: i64, role: i64) -> Self {
        Self { subject_id, role }
    }
}

fn decimal_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&raw), &"a decimal integer string"))
}

/// Optional leading `-`, then ASCII digits only.
fn parse_decimal(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
