//! # AddressVerify
//!
//! Confirms whether a postal address and postal code match those on file
//! for the PayPal account holder identified by an email address.
//!
//! ## Field Rules
//!
//! | Key | Checks, in order |
//! |-----|------------------|
//! | `EMAIL` | email syntax, at most 255 characters |
//! | `STREET` | required, at most 35 characters, `[0-9a-zA-Z\s\-,.'#\\]{1,35}` |
//! | `ZIP` | required, at most 16 characters |
//!
//! The remote API matches `STREET` on its first three characters and `ZIP`
//! on its first five, so `ZIP` carries no pattern beyond the length bound.

use std::fmt;

use nvp_core::{Check, FieldRule, Pattern, ValidationError};

use serde::{Deserialize, Serialize};

use crate::request::sealed::Sealed;
use crate::request::{restore, Exchange, ExchangeRecord, Request};

/// Method name of this request.
pub const METHOD_NAME: &str = "AddressVerify";

const EMAIL: FieldRule =
    FieldRule::new("EMAIL", &[Check::Matches(Pattern::Email), Check::MaxLength(255)]);

const STREET: FieldRule = FieldRule::new(
    "STREET",
    &[Check::Required, Check::MaxLength(35), Check::Matches(Pattern::Street)],
);

const ZIP: FieldRule = FieldRule::new("ZIP", &[Check::Required, Check::MaxLength(16)]);

/// An `AddressVerify` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ExchangeRecord", try_from = "ExchangeRecord")]
pub struct AddressVerify {
    exchange: Exchange,
}

impl AddressVerify {
    /// Validate the arguments and build the request.
    ///
    /// `None` stands for an argument that was not supplied.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checking `EMAIL`, then `STREET`,
    /// then `ZIP`.
    pub fn new(
        email: Option<&str>,
        street: Option<&str>,
        zip: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let exchange = Exchange::builder(METHOD_NAME)
            .field(&EMAIL, email)?
            .field(&STREET, street)?
            .field(&ZIP, zip)?
            .finish();
        Ok(Self { exchange })
    }
}

impl Request for AddressVerify {
    fn exchange(&self) -> &Exchange {
        &self.exchange
    }
}

impl Sealed for AddressVerify {
    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }
}

impl From<AddressVerify> for ExchangeRecord {
    fn from(request: AddressVerify) -> Self {
        Self::from(&request.exchange)
    }
}

impl TryFrom<ExchangeRecord> for AddressVerify {
    type Error = ValidationError;

    fn try_from(record: ExchangeRecord) -> Result<Self, Self::Error> {
        restore(METHOD_NAME, record, |fields| {
            Self::new(fields.get("EMAIL"), fields.get("STREET"), fields.get("ZIP"))
        })
    }
}

impl fmt::Display for AddressVerify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exchange, f)
    }
}
