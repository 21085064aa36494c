//! # Request Exchange State
//!
//! Every request type owns an [`Exchange`]: the method name, the outbound
//! field mapping fixed at construction, and the inbound field mapping the
//! transport collaborator attaches once the call has completed.
//!
//! ## Lifecycle
//!
//! ```text
//! ExchangeBuilder ──field()/fixed()──▶ finish() ──▶ Exchange
//!                                                  │
//!                     transport: set_response() ◀──┘ (replaces, never merges)
//! ```
//!
//! Construction is atomic: the builder is consumed by each validated
//! `field()` call, so a failing rule drops it and no `Exchange` escapes.
//! The builder is private to this crate and `finish()` writes `METHOD`
//! last, so the method marker always agrees with [`Exchange::method`].
//! Outside this crate an `Exchange` is read-only; the only mutation a
//! [`Request`] offers is replacing the inbound mapping.
//!
//! ## Persistence
//!
//! Request types serialize as an [`ExchangeRecord`]. Deserializing re-runs
//! the request type's own constructor over the recorded fields, so a
//! record that would not pass validation never becomes a request.

use std::fmt;

use nvp_core::{FieldRule, NvpMap, ValidationError};
use serde::{Deserialize, Serialize};

/// NVP key carrying the method name.
pub const METHOD_KEY: &str = "METHOD";

/// Outbound and inbound field state of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    method: &'static str,
    request: NvpMap,
    response: NvpMap,
}

impl Exchange {
    /// Start building the outbound mapping for `method`.
    pub(crate) fn builder(method: &'static str) -> ExchangeBuilder {
        ExchangeBuilder {
            method,
            request: NvpMap::new(),
        }
    }

    /// The remote operation this exchange invokes.
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Borrow the outbound mapping.
    pub fn request(&self) -> &NvpMap {
        &self.request
    }

    /// Borrow the inbound mapping (empty until a response is attached).
    pub fn response(&self) -> &NvpMap {
        &self.response
    }

    /// Replace the inbound mapping wholesale.
    pub(crate) fn set_response(&mut self, response: NvpMap) {
        tracing::debug!(
            method = self.method,
            fields = response.len(),
            replaced = !self.response.is_empty(),
            "attached NVP response"
        );
        self.response = response;
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} request: nvp_request {}; nvp_response {}",
            self.method, self.request, self.response
        )
    }
}

/// Accumulates validated outbound fields for an [`Exchange`].
#[derive(Debug)]
#[must_use = "an ExchangeBuilder does nothing until finish() is called"]
pub(crate) struct ExchangeBuilder {
    method: &'static str,
    request: NvpMap,
}

impl ExchangeBuilder {
    /// Validate `value` against `rule` and record it under the rule's key.
    ///
    /// An absent optional value is omitted from the mapping. The builder is
    /// consumed either way.
    pub(crate) fn field(
        mut self,
        rule: &FieldRule,
        value: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if let Some(value) = rule.apply(value)? {
            self.request.insert(rule.key, value);
        }
        Ok(self)
    }

    /// Record a field whose value is chosen by the request type itself.
    pub(crate) fn fixed(mut self, key: &'static str, value: &str) -> Self {
        self.request.insert(key, value);
        self
    }

    /// Freeze the outbound mapping. `METHOD` is written last and always
    /// holds the builder's method name.
    pub(crate) fn finish(mut self) -> Exchange {
        self.request.insert(METHOD_KEY, self.method);
        tracing::debug!(
            method = self.method,
            fields = self.request.len(),
            "built NVP request"
        );
        Exchange {
            method: self.method,
            request: self.request,
            response: NvpMap::new(),
        }
    }
}

/// Serialized form of a request: its outbound and inbound mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Outbound fields, including `METHOD`.
    pub request: NvpMap,
    /// Inbound fields; empty if no response was attached.
    #[serde(default)]
    pub response: NvpMap,
}

impl From<&Exchange> for ExchangeRecord {
    fn from(exchange: &Exchange) -> Self {
        Self {
            request: exchange.request.clone(),
            response: exchange.response.clone(),
        }
    }
}

/// Rebuild a request from a record by running `rebuild` over the recorded
/// outbound fields, then attach the recorded response.
///
/// The record must name `method` and carry exactly the fields the rebuilt
/// request produces; anything else is a [`ValidationError::Conflict`].
pub(crate) fn restore<R, F>(
    method: &'static str,
    record: ExchangeRecord,
    rebuild: F,
) -> Result<R, ValidationError>
where
    R: Request,
    F: FnOnce(&NvpMap) -> Result<R, ValidationError>,
{
    let recorded = record.request.get(METHOD_KEY);
    if recorded != Some(method) {
        return Err(ValidationError::Conflict {
            field: METHOD_KEY,
            reason: format!("expected {method}, record holds {}", recorded.unwrap_or("nothing")),
        });
    }

    let mut request = rebuild(&record.request)?;
    let built = request.exchange().request();
    if let Some(key) = built
        .keys()
        .chain(record.request.keys())
        .find(|key| built.get(key) != record.request.get(key))
    {
        return Err(ValidationError::Conflict {
            field: METHOD_KEY,
            reason: format!("recorded field {key} does not match a valid {method} request"),
        });
    }

    sealed::Sealed::exchange_mut(&mut request).set_response(record.response);
    Ok(request)
}

pub(crate) mod sealed {
    use super::Exchange;

    /// Mutable access to a request's exchange, reachable only from this
    /// crate.
    pub trait Sealed {
        fn exchange_mut(&mut self) -> &mut Exchange;
    }
}

/// Uniform contract of every request type in the NVP family.
///
/// Reads return owned copies, so nothing a caller does with the returned
/// maps can reach the request's state. The trait is object-safe, so
/// heterogeneous requests can travel as `&mut dyn Request`. It is sealed:
/// the request family is closed, and the outbound mapping cannot be
/// reached mutably from outside this crate.
///
/// ```compile_fail
/// use nvp_request::{AddressVerify, Request};
///
/// let mut request =
///     AddressVerify::new(Some("user@example.com"), Some("123 Main St"), Some("90210")).unwrap();
/// let _ = request.exchange_mut();
/// ```
///
/// ```compile_fail
/// use nvp_request::Exchange;
///
/// let _ = Exchange::builder("AddressVerify");
/// ```
pub trait Request: sealed::Sealed + fmt::Display + Send + Sync {
    /// Shared, read-only exchange state.
    fn exchange(&self) -> &Exchange;

    /// The remote operation name sent under `METHOD`.
    fn method(&self) -> &'static str {
        self.exchange().method()
    }

    /// Copy of the outbound field mapping.
    fn nvp_request(&self) -> NvpMap {
        self.exchange().request().clone()
    }

    /// Copy of the inbound field mapping; empty until one is attached.
    fn nvp_response(&self) -> NvpMap {
        self.exchange().response().clone()
    }

    /// Replace the inbound field mapping. No validation is applied.
    fn set_nvp_response(&mut self, response: NvpMap) {
        sealed::Sealed::exchange_mut(self).set_response(response);
    }
}
