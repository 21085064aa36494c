//! `GetBalance`: reads the available balance of the calling account.

use std::fmt;

use nvp_core::ValidationError;
use serde::{Deserialize, Serialize};

use crate::request::sealed::Sealed;
use crate::request::{restore, Exchange, ExchangeRecord, Request};

/// Method name of this request.
pub const METHOD_NAME: &str = "GetBalance";

/// A `GetBalance` request. Takes no validated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ExchangeRecord", try_from = "ExchangeRecord")]
pub struct GetBalance {
    exchange: Exchange,
}

impl GetBalance {
    /// Build the request. With `return_all_currencies` the response lists a
    /// balance per held currency instead of the primary currency only.
    pub fn new(return_all_currencies: bool) -> Self {
        let flag = if return_all_currencies { "1" } else { "0" };
        let exchange = Exchange::builder(METHOD_NAME)
            .fixed("RETURNALLCURRENCIES", flag)
            .finish();
        Self { exchange }
    }
}

impl Default for GetBalance {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Request for GetBalance {
    fn exchange(&self) -> &Exchange {
        &self.exchange
    }
}

impl Sealed for GetBalance {
    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }
}

impl From<GetBalance> for ExchangeRecord {
    fn from(request: GetBalance) -> Self {
        Self::from(&request.exchange)
    }
}

impl TryFrom<ExchangeRecord> for GetBalance {
    type Error = ValidationError;

    fn try_from(record: ExchangeRecord) -> Result<Self, Self::Error> {
        restore(METHOD_NAME, record, |fields| {
            Ok(Self::new(fields.get("RETURNALLCURRENCIES") == Some("1")))
        })
    }
}

impl fmt::Display for GetBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.exchange, f)
    }
}
