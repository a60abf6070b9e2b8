//! M-Pesa payment payloads.
//!
//! The STK push itself happens server-side; the client only validates the
//! phone number and posts the request.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};

static SAFARICOM_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^07\d{8}$").expect("phone pattern is valid"));

/// A Safaricom mobile number in local `07XXXXXXXX` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and wrap a phone number. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if SAFARICOM_NUMBER.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ModelError::InvalidPhone(trimmed.to_string()))
        }
    }

    /// The validated number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /payment/initiate/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    /// Resource being unlocked.
    pub resource_id: i64,
    /// Phone that receives the STK push.
    pub phone: PhoneNumber,
}

/// Response of `POST /payment/initiate/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentReceipt {
    /// Human-readable status, e.g. "STK Push initiated".
    #[serde(default)]
    pub message: Option<String>,
    /// Gateway response, passed through untouched.
    #[serde(default)]
    pub result: Option<Value>,
}

/// Response of `GET /resources/{id}/is-paid-for`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentStatus {
    /// Whether the signed-in user has unlocked the resource.
    #[serde(default)]
    pub is_paid: bool,
}
