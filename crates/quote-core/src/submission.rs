//! Quote Submission Form
//!
//! The wire-shaped submission payload and its validation into a
//! [`QuoteSubmission`] ready for checkout.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ValidationError;

/// Minimum chargeable amount in minor units (cents).
pub const MIN_AMOUNT_CENTS: i64 = 50;

/// Raw form body as posted from the quote page.
///
/// Every field is optional at the wire level so that validation can report
/// all missing fields in one pass instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub make_model: Option<String>,
    /// Model year; the form may post it as text or as a bare number.
    #[serde(default)]
    pub car_year: Option<Value>,
    #[serde(default)]
    pub vin_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Amount in minor units; accepted as a number or a numeric string.
    /// An explicit `null` coerces to zero, so it must stay distinguishable
    /// from an absent field.
    #[serde(default, deserialize_with = "present_value")]
    pub amount: Option<Value>,
}

/// Keeps JSON `null` as a present [`Value::Null`] instead of collapsing it
/// into the absent case.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SubmissionForm {
    /// Validates the form into a checkout-ready submission.
    ///
    /// The missing-field check runs first and short-circuits with every
    /// missing field name at once; the amount checks follow with their own
    /// distinct errors.
    pub fn validate(self) -> Result<QuoteSubmission, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let amount_cents = coerce_amount(self.amount.as_ref())?;

        Ok(QuoteSubmission {
            full_name: self.full_name.unwrap_or_default(),
            make_model: self.make_model.unwrap_or_default(),
            car_year: text_value(self.car_year.as_ref()).unwrap_or_default(),
            vin_number: self.vin_number.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            amount_cents,
        })
    }

    /// Field names reported as missing, in wire order.
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.full_name.as_deref()) {
            missing.push("fullName");
        }
        if is_blank(self.make_model.as_deref()) {
            missing.push("makeModel");
        }
        if text_value(self.car_year.as_ref()).is_none() {
            missing.push("carYear");
        }
        if is_blank(self.vin_number.as_deref()) {
            missing.push("vinNumber");
        }
        if is_blank(self.address.as_deref()) {
            missing.push("address");
        }
        if is_blank(self.email.as_deref()) {
            missing.push("email");
        }
        missing
    }
}

/// A validated quote submission, ready for the payment gateway.
#[derive(Debug, Clone)]
pub struct QuoteSubmission {
    pub full_name: String,
    pub make_model: String,
    pub car_year: String,
    pub vin_number: String,
    pub address: String,
    pub email: String,
    /// Amount in minor units (integer cents); the single source of truth
    /// for every derived money string.
    pub amount_cents: i64,
}

impl QuoteSubmission {
    /// The `$X.XX/mo` display string used on the side-record row.
    pub fn monthly_amount(&self) -> String {
        format_monthly_amount(self.amount_cents)
    }

    /// The eight side-record columns, in sheet order:
    /// name | email | address | year | make/model | VIN | amount | policy id.
    pub fn side_record_row(&self, policy_id: &str) -> [String; 8] {
        [
            self.full_name.clone(),
            self.email.clone(),
            self.address.clone(),
            self.car_year.clone(),
            self.make_model.clone(),
            self.vin_number.clone(),
            self.monthly_amount(),
            policy_id.to_string(),
        ]
    }
}

/// Formats integer cents as a `$X.XX/mo` display string.
///
/// Integer arithmetic only; the cents value never passes through floating
/// point.
pub fn format_monthly_amount(cents: i64) -> String {
    format!("${}.{:02}/mo", cents / 100, cents % 100)
}

fn is_blank(field: Option<&str>) -> bool {
    field.is_none_or(str::is_empty)
}

/// Normalizes a text-or-number JSON field to its text form.
///
/// Strings must be non-empty; numbers must be nonzero (the form treats a
/// zero year like a blank); anything else counts as missing.
fn text_value(field: Option<&Value>) -> Option<String> {
    match field {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|y| y != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces the raw amount into integer cents: finite number, rounded to
/// the nearest integer, at least [`MIN_AMOUNT_CENTS`].
///
/// Blank strings and `null` coerce to zero and booleans to zero/one, the
/// same way the quote form's numeric coercion always read them; all of
/// those then trip the minimum check. Absent values and non-numeric
/// strings are rejected as non-numeric.
fn coerce_amount(raw: Option<&Value>) -> Result<i64, ValidationError> {
    let numeric = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Null) => Some(0.0),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    let Some(amount) = numeric.filter(|a| a.is_finite()) else {
        return Err(ValidationError::AmountNotNumeric {
            got: raw.cloned().unwrap_or(Value::Null),
        });
    };

    let cents = amount.round() as i64;
    if cents < MIN_AMOUNT_CENTS {
        return Err(ValidationError::AmountBelowMinimum { got: cents });
    }
    Ok(cents)
}
