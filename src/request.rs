//! Parsing and validation of the calculator form payload.
//!
//! The form posts its figures either as JSON strings (straight from the text
//! inputs) or as JSON numbers, so every field is kept as a raw
//! [`serde_json::Value`] until validation decides what it holds.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::money::Money;
use crate::schedule::LoanTerms;

/// Longest term accepted by default: one hundred years.
pub const DEFAULT_MAX_TERM_MONTHS: u32 = 1200;

/// Reasons a payload is rejected before it reaches the engine.
///
/// Messages are shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No se recibieron datos. Por favor, recargue la página.")]
    EmptyPayload,

    #[error("El campo '{0}' es obligatorio.")]
    MissingField(&'static str),

    #[error("Por favor, ingrese valores numéricos válidos.")]
    NotNumeric,

    #[error("El valor de la venta debe ser mayor a $0.")]
    NonPositiveAmount,

    #[error("La cuota inicial no puede ser negativa.")]
    NegativeInitialPayment,

    #[error("La cuota inicial debe ser menor al valor de la venta.")]
    InitialPaymentTooLarge,

    #[error("El plazo debe ser al menos 1 mes.")]
    TermTooShort,

    #[error("El plazo no puede superar {max} meses.")]
    TermTooLong { max: u32 },

    #[error("La tasa de interés no puede ser negativa.")]
    NegativeRate,
}

/// Bounds that are deployment policy rather than arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_term_months: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_term_months: DEFAULT_MAX_TERM_MONTHS,
        }
    }
}

/// The raw calculator payload.
///
/// A required field sent as `null` is kept as `Some(Value::Null)`: it was
/// supplied, it just is not a number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Sale price of the item being financed.
    #[serde(default, deserialize_with = "present")]
    pub loan_amount: Option<Value>,
    /// Down payment, subtracted from the sale price.
    #[serde(default, deserialize_with = "present")]
    pub initial_payment: Option<Value>,
    /// Number of monthly installments.
    #[serde(default, deserialize_with = "present")]
    pub loan_term: Option<Value>,
    /// Annual interest rate in percent.
    #[serde(default, deserialize_with = "present")]
    pub interest_rate: Option<Value>,
    pub client: Option<Value>,
    pub invoice_number: Option<Value>,
    pub salesperson: Option<Value>,
}

/// A payload that passed validation, with the financed principal derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLoan {
    pub client: String,
    pub invoice: String,
    pub salesperson: String,
    pub loan_amount: Money,
    pub initial_payment: Money,
    /// `loan_amount - initial_payment`, always positive.
    pub principal: Money,
    pub term_months: u32,
    pub annual_rate_percent: Decimal,
}

impl ValidatedLoan {
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate_percent: self.annual_rate_percent,
            term_months: self.term_months,
        }
    }
}

impl LoanRequest {
    /// Reads a request body.
    ///
    /// A body that is empty, unparseable or falsy (`null`, `false`, `0`, `""`,
    /// `[]`, `{}`) carries no data. Any other non-object JSON reads as a
    /// payload with every field absent, so validation reports the first
    /// missing field.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| ValidationError::EmptyPayload)?;

        if is_falsy(&value) {
            return Err(ValidationError::EmptyPayload);
        }

        match value {
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|_| ValidationError::EmptyPayload)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Checks presence, then numeric parsing, then ranges, stopping at the
    /// first failure.
    pub fn validate(&self, limits: &ValidationLimits) -> Result<ValidatedLoan, ValidationError> {
        let loan_amount = required("loanAmount", &self.loan_amount)?;
        let initial_payment = required("initialPayment", &self.initial_payment)?;
        let loan_term = required("loanTerm", &self.loan_term)?;
        let interest_rate = required("interestRate", &self.interest_rate)?;

        let (Some(loan_amount), Some(initial_payment), Some(term), Some(annual_rate_percent)) = (
            parse_decimal(loan_amount),
            parse_decimal(initial_payment),
            parse_term(loan_term),
            parse_decimal(interest_rate),
        ) else {
            return Err(ValidationError::NotNumeric);
        };

        if loan_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if initial_payment < Decimal::ZERO {
            return Err(ValidationError::NegativeInitialPayment);
        }
        if initial_payment >= loan_amount {
            return Err(ValidationError::InitialPaymentTooLarge);
        }
        if term <= 0 {
            return Err(ValidationError::TermTooShort);
        }
        let term_months = u32::try_from(term)
            .ok()
            .filter(|months| *months <= limits.max_term_months)
            .ok_or(ValidationError::TermTooLong {
                max: limits.max_term_months,
            })?;
        if annual_rate_percent < Decimal::ZERO {
            return Err(ValidationError::NegativeRate);
        }

        Ok(ValidatedLoan {
            client: display_text(&self.client),
            invoice: display_text(&self.invoice_number),
            salesperson: display_text(&self.salesperson),
            loan_amount,
            initial_payment,
            principal: loan_amount - initial_payment,
            term_months,
            annual_rate_percent,
        })
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn required<'a>(name: &'static str, field: &'a Option<Value>) -> Result<&'a Value, ValidationError> {
    match field {
        Some(value) if !value_text(value).is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(name)),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

fn display_text(field: &Option<Value>) -> String {
    match field {
        None | Some(Value::Null) => String::new(),
        Some(value) => value_text(value),
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Whole months. A JSON number with a fraction is truncated; a string must
/// spell an integer.
fn parse_term(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|months| months.is_finite())
                .map(|months| months.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn request(value: Value) -> LoanRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_form() -> Value {
        json!({
            "loanAmount": "1500000",
            "initialPayment": "300000",
            "loanTerm": "12",
            "interestRate": "12",
            "client": "  Ana Torres ",
            "invoiceNumber": "F-0042",
            "salesperson": "Luis"
        })
    }

    #[test]
    fn test_valid_form_derives_principal() {
        let loan = request(valid_form())
            .validate(&ValidationLimits::default())
            .unwrap();

        assert_eq!(loan.loan_amount, dec!(1500000));
        assert_eq!(loan.initial_payment, dec!(300000));
        assert_eq!(loan.principal, dec!(1200000));
        assert_eq!(loan.term_months, 12);
        assert_eq!(loan.annual_rate_percent, dec!(12));
        assert_eq!(loan.client, "Ana Torres");
        assert_eq!(loan.invoice, "F-0042");
        assert_eq!(loan.salesperson, "Luis");
        assert_eq!(
            loan.terms(),
            LoanTerms {
                principal: dec!(1200000),
                annual_rate_percent: dec!(12),
                term_months: 12,
            }
        );
    }

    #[test]
    fn test_numbers_are_accepted_as_json_numbers() {
        let loan = request(json!({
            "loanAmount": 1000.5,
            "initialPayment": 0,
            "loanTerm": 6.9,
            "interestRate": 1e1
        }))
        .validate(&ValidationLimits::default())
        .unwrap();

        assert_eq!(loan.loan_amount, dec!(1000.5));
        assert_eq!(loan.principal, dec!(1000.5));
        assert_eq!(loan.term_months, 6);
        assert_eq!(loan.annual_rate_percent, dec!(10));
        assert_eq!(loan.client, "");
    }

    #[test]
    fn test_scientific_notation_in_strings() {
        let mut form = valid_form();
        form["loanAmount"] = json!("1.5e6");
        let loan = request(form).validate(&ValidationLimits::default()).unwrap();
        assert_eq!(loan.loan_amount, dec!(1500000));
    }

    #[rstest]
    #[case("loanAmount")]
    #[case("initialPayment")]
    #[case("loanTerm")]
    #[case("interestRate")]
    fn test_missing_or_blank_field(#[case] field: &'static str) {
        let mut absent = valid_form();
        absent.as_object_mut().unwrap().remove(field);
        assert_eq!(
            request(absent).validate(&ValidationLimits::default()),
            Err(ValidationError::MissingField(field))
        );

        let mut blank = valid_form();
        blank[field] = json!("   ");
        assert_eq!(
            request(blank).validate(&ValidationLimits::default()),
            Err(ValidationError::MissingField(field))
        );
    }

    #[rstest]
    #[case("loanAmount", json!("mil"))]
    #[case("initialPayment", json!("10%"))]
    #[case("loanTerm", json!("12.5"))]
    #[case("interestRate", json!(true))]
    fn test_not_numeric(#[case] field: &str, #[case] value: Value) {
        let mut form = valid_form();
        form[field] = value;
        assert_eq!(
            request(form).validate(&ValidationLimits::default()),
            Err(ValidationError::NotNumeric)
        );
    }

    #[rstest]
    #[case("loanAmount", json!("0"), ValidationError::NonPositiveAmount)]
    #[case("initialPayment", json!("-1"), ValidationError::NegativeInitialPayment)]
    #[case("initialPayment", json!("1500000"), ValidationError::InitialPaymentTooLarge)]
    #[case("loanTerm", json!("0"), ValidationError::TermTooShort)]
    #[case("loanTerm", json!("1201"), ValidationError::TermTooLong { max: 1200 })]
    #[case("interestRate", json!("-0.5"), ValidationError::NegativeRate)]
    fn test_out_of_range(
        #[case] field: &str,
        #[case] value: Value,
        #[case] expected: ValidationError,
    ) {
        let mut form = valid_form();
        form[field] = value;
        assert_eq!(
            request(form).validate(&ValidationLimits::default()),
            Err(expected)
        );
    }

    #[rstest]
    #[case("loanAmount")]
    #[case("initialPayment")]
    #[case("loanTerm")]
    #[case("interestRate")]
    fn test_null_field_is_not_numeric(#[case] field: &str) {
        let mut form = valid_form();
        form[field] = Value::Null;
        let request = LoanRequest::from_json(form.to_string().as_bytes()).unwrap();
        assert_eq!(
            request.validate(&ValidationLimits::default()),
            Err(ValidationError::NotNumeric)
        );
    }

    #[test]
    fn test_null_metadata_reads_as_blank() {
        let mut form = valid_form();
        form["client"] = Value::Null;
        let loan = request(form).validate(&ValidationLimits::default()).unwrap();
        assert_eq!(loan.client, "");
    }

    #[test]
    fn test_amount_checked_before_initial_payment() {
        let form = json!({
            "loanAmount": "-5",
            "initialPayment": "-10",
            "loanTerm": "0",
            "interestRate": "-1"
        });
        assert_eq!(
            request(form).validate(&ValidationLimits::default()),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_term_limit_is_configurable() {
        let limits = ValidationLimits { max_term_months: 6 };
        let loan = request(valid_form()).validate(&limits);
        assert_eq!(loan, Err(ValidationError::TermTooLong { max: 6 }));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(b"null".as_slice())]
    #[case(b"{}".as_slice())]
    #[case(b"[]".as_slice())]
    #[case(b"0".as_slice())]
    #[case(b"0.0".as_slice())]
    #[case(b"\"\"".as_slice())]
    #[case(b"false".as_slice())]
    fn test_empty_payload(#[case] body: &[u8]) {
        assert_eq!(
            LoanRequest::from_json(body).unwrap_err(),
            ValidationError::EmptyPayload
        );
    }

    #[test]
    fn test_non_object_payload_reports_first_missing_field() {
        let request = LoanRequest::from_json(b"[1, 2, 3]").unwrap();
        assert_eq!(
            request.validate(&ValidationLimits::default()),
            Err(ValidationError::MissingField("loanAmount"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingField("loanTerm").to_string(),
            "El campo 'loanTerm' es obligatorio."
        );
        assert_eq!(
            ValidationError::TermTooLong { max: 1200 }.to_string(),
            "El plazo no puede superar 1200 meses."
        );
    }
}
