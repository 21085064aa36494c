//! `GetTransactionDetails`: fetches the record of a single transaction.

use std::fmt;

use nvp_core::{Check, FieldRule, Pattern, ValidationError};

use serde::{Deserialize, Serialize};

use crate::request::sealed::Sealed;
use crate::request::{restore, Exchange, ExchangeRecord, Request};

/// Method name of this request.
pub const METHOD_NAME: &str = "GetTransactionDetails";

pub(crate) const TRANSACTION_ID: FieldRule = FieldRule::new(
    "TRANSACTIONID",
    &[Check::Required, Check::MaxLength(17), Check::Matches(Pattern::TransactionId)],
);

/// A `GetTransactionDetails` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ExchangeRecord", try_from = "ExchangeRecord")]
pub struct GetTransactionDetails {
    exchange: Exchange,
}

impl GetTransactionDetails {
    /// Validate the transaction identifier and build the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the identifier is absent, longer
    /// than 17 characters, or not alphanumeric.
    pub fn new(transaction_id: Option<&str>) -> Result<Self, ValidationError> {
        let exchange = Exchange::builder(METHOD_NAME)
            .field(&TRANSACTION_ID, transaction_id)?
            .finish();
        Ok(Self { exchange })
    }
}

impl Request for GetTransactionDetails {
    fn exchange(&self) -> &Exchange {
        &self.exchange
    }
}

impl Sealed for GetTransactionDetails {
    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }
}

impl From<GetTransactionDetails> for ExchangeRecord {
    fn from(request: GetTransactionDetails) -> Self {
        Self::from(&request.exchange)
    }
}

impl TryFrom<ExchangeRecord> for GetTransactionDetails {
    type Error = ValidationError;

    fn try_from(record: ExchangeRecord) -> Result<Self, Self::Error> {
        restore(METHOD_NAME, record, |fields| Self::new(fields.get("TRANSACTIONID")))
    }
}

impl fmt::Display for GetTransactionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exchange, f)
    }
}
