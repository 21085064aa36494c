//! # RefundTransaction
//!
//! Issues a full or partial refund against a prior transaction.
//!
//! ## Field Rules
//!
//! | Key | Checks, in order |
//! |-----|------------------|
//! | `TRANSACTIONID` | required, at most 17 characters, alphanumeric |
//! | `AMT` | partial only: required, at most 10 characters, `digits.dd`, non-zero |
//! | `CURRENCYCODE` | partial only: required, three uppercase letters |
//! | `NOTE` | optional, at most 255 characters |
//!
//! `REFUNDTYPE` is chosen by the constructor, never by the caller, so a
//! full refund cannot carry an amount and a partial refund cannot omit one.

use std::fmt;

use nvp_core::{Check, FieldRule, Pattern, ValidationError};

use serde::{Deserialize, Serialize};

use crate::request::sealed::Sealed;
use crate::request::{restore, Exchange, ExchangeRecord, Request};
use crate::transaction_details::TRANSACTION_ID;

/// Method name of this request.
pub const METHOD_NAME: &str = "RefundTransaction";

const AMOUNT: FieldRule = FieldRule::new(
    "AMT",
    &[Check::Required, Check::MaxLength(10), Check::Matches(Pattern::Amount)],
);

const CURRENCY_CODE: FieldRule = FieldRule::new(
    "CURRENCYCODE",
    &[Check::Required, Check::Matches(Pattern::CurrencyCode)],
);

const NOTE: FieldRule = FieldRule::new("NOTE", &[Check::MaxLength(255)]);

/// Value sent under `REFUNDTYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefundType {
    /// Refund the whole transaction amount.
    Full,
    /// Refund the amount given in `AMT`.
    Partial,
}

impl RefundType {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Partial => "Partial",
        }
    }
}

impl fmt::Display for RefundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `RefundTransaction` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ExchangeRecord", try_from = "ExchangeRecord")]
pub struct RefundTransaction {
    refund_type: RefundType,
    exchange: Exchange,
}

impl RefundTransaction {
    /// Refund the full amount of `transaction_id`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checking `TRANSACTIONID` then `NOTE`.
    pub fn full(transaction_id: Option<&str>, note: Option<&str>) -> Result<Self, ValidationError> {
        let exchange = Exchange::builder(METHOD_NAME)
            .field(&TRANSACTION_ID, transaction_id)?
            .field(&NOTE, note)?
            .fixed("REFUNDTYPE", RefundType::Full.as_str())
            .finish();
        Ok(Self {
            refund_type: RefundType::Full,
            exchange,
        })
    }

    /// Refund `amount` in `currency_code` of `transaction_id`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checking `TRANSACTIONID`, `AMT`,
    /// `CURRENCYCODE`, then `NOTE`. A zero amount is a
    /// [`ValidationError::Conflict`].
    pub fn partial(
        transaction_id: Option<&str>,
        amount: Option<&str>,
        currency_code: Option<&str>,
        note: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let builder = Exchange::builder(METHOD_NAME)
            .field(&TRANSACTION_ID, transaction_id)?
            .field(&AMOUNT, amount)?;
        if amount.is_some_and(is_zero_amount) {
            return Err(ValidationError::Conflict {
                field: AMOUNT.key,
                reason: "partial refund amount must be greater than zero".to_string(),
            });
        }
        let exchange = builder
            .field(&CURRENCY_CODE, currency_code)?
            .field(&NOTE, note)?
            .fixed("REFUNDTYPE", RefundType::Partial.as_str())
            .finish();
        Ok(Self {
            refund_type: RefundType::Partial,
            exchange,
        })
    }

    /// Whether this is a full or partial refund.
    pub fn refund_type(&self) -> RefundType {
        self.refund_type
    }
}

// Only called on values that already matched `Pattern::Amount`.
fn is_zero_amount(amount: &str) -> bool {
    amount.chars().all(|c| c == '0' || c == '.')
}

impl Request for RefundTransaction {
    fn exchange(&self) -> &Exchange {
        &self.exchange
    }
}

impl Sealed for RefundTransaction {
    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }
}

impl From<RefundTransaction> for ExchangeRecord {
    fn from(request: RefundTransaction) -> Self {
        Self::from(&request.exchange)
    }
}

impl TryFrom<ExchangeRecord> for RefundTransaction {
    type Error = ValidationError;

    fn try_from(record: ExchangeRecord) -> Result<Self, Self::Error> {
        restore(METHOD_NAME, record, |fields| {
            let transaction_id = fields.get("TRANSACTIONID");
            let note = fields.get("NOTE");
            if fields.get("REFUNDTYPE") == Some(RefundType::Partial.as_str()) {
                let amount = fields.get("AMT");
                Self::partial(transaction_id, amount, fields.get("CURRENCYCODE"), note)
            } else {
                Self::full(transaction_id, note)
            }
        })
    }
}

impl fmt::Display for RefundTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exchange, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvp_core::NvpMap;

    const TXN: Option<&str> = Some("8AB12345CD678901E");

    #[test]
    fn full_refund_mapping() {
        let request = RefundTransaction::full(TXN, None).unwrap();
        assert_eq!(request.refund_type(), RefundType::Full);
        assert_eq!(
            request.nvp_request(),
            NvpMap::from([
                ("METHOD", "RefundTransaction"),
                ("TRANSACTIONID", "8AB12345CD678901E"),
                ("REFUNDTYPE", "Full"),
            ])
        );
    }

    #[test]
    fn partial_refund_mapping() {
        let request =
            RefundTransaction::partial(TXN, Some("12.50"), Some("EUR"), Some("damaged item"))
                .unwrap();
        assert_eq!(request.refund_type(), RefundType::Partial);
        let fields = request.nvp_request();
        assert_eq!(fields.get("REFUNDTYPE"), Some("Partial"));
        assert_eq!(fields.get("AMT"), Some("12.50"));
        assert_eq!(fields.get("CURRENCYCODE"), Some("EUR"));
        assert_eq!(fields.get("NOTE"), Some("damaged item"));
    }

    #[test]
    fn partial_refund_requires_amount() {
        let err = RefundTransaction::partial(TXN, None, Some("EUR"), None).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "AMT" });
    }

    #[test]
    fn partial_refund_rejects_malformed_amount() {
        let err = RefundTransaction::partial(TXN, Some("12.5"), Some("EUR"), None).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { field: "AMT", .. }));
    }

    #[test]
    fn partial_refund_rejects_long_amount() {
        let err =
            RefundTransaction::partial(TXN, Some("12345678.00"), Some("EUR"), None).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "AMT", max: 10, actual: 11 }));
    }

    #[test]
    fn partial_refund_rejects_zero_amount() {
        let err = RefundTransaction::partial(TXN, Some("000.00"), Some("EUR"), None).unwrap_err();
        assert!(matches!(err, ValidationError::Conflict { field: "AMT", .. }));
    }

    #[test]
    fn partial_refund_requires_uppercase_currency() {
        let err = RefundTransaction::partial(TXN, Some("1.00"), Some("eur"), None).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { field: "CURRENCYCODE", .. }));
    }

    #[test]
    fn transaction_id_checked_first() {
        let err = RefundTransaction::partial(None, None, None, None).unwrap_err();
        assert_eq!(err.field(), "TRANSACTIONID");
    }

    #[test]
    fn note_over_255_characters_is_rejected() {
        let note = "n".repeat(256);
        let err = RefundTransaction::full(TXN, Some(&note)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "NOTE", .. }));
    }

    #[test]
    fn refund_type_display() {
        assert_eq!(RefundType::Full.to_string(), "Full");
        assert_eq!(RefundType::Partial.to_string(), "Partial");
    }

    #[test]
    fn partial_refund_restores_refund_type() {
        let request = RefundTransaction::partial(TXN, Some("5.00"), Some("USD"), None).unwrap();
        let json = serde_json::to_string(&request).unwrap();
        let restored: RefundTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.refund_type(), RefundType::Partial);
        assert_eq!(restored, request);
    }

    #[test]
    fn full_refund_record_with_amount_is_rejected() {
        let json = serde_json::json!({
            "request": {
                "METHOD": "RefundTransaction",
                "TRANSACTIONID": "8AB12345CD678901E",
                "REFUNDTYPE": "Full",
                "AMT": "5.00"
            }
        });
        let err = serde_json::from_value::<RefundTransaction>(json).unwrap_err();
        assert!(err.to_string().contains("AMT"));
    }
}
