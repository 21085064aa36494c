#![deny(missing_docs)]

//! # nvp-request: Validated Requests for the NVP Payment API
//!
//! One value object per remote operation. Each validates its constructor
//! arguments against the field rules the remote API documents, then holds
//! an immutable outbound [`NvpMap`](nvp_core::NvpMap) and an inbound map
//! that a transport collaborator attaches after the call.
//!
//! ## Request Types
//!
//! - [`AddressVerify`]: match a street and postal code against an account.
//! - [`GetBalance`]: read the account balance.
//! - [`GetTransactionDetails`]: fetch a transaction record.
//! - [`RefundTransaction`]: full or partial refund.
//!
//! All of them implement [`Request`], so a transport can drive any of them
//! through [`execute`]. `Request` is sealed: the outbound mapping of a
//! constructed request cannot be replaced from outside this crate.
//!
//! Every request type serializes as an [`ExchangeRecord`] and is rebuilt
//! through its own constructor on deserialization.
//!
//! ## Out of Scope
//!
//! HTTP, TLS, credentials, the API version marker, and NVP wire encoding
//! belong to the [`Transport`] implementation, which lives outside this
//! crate.

pub mod address_verify;
pub mod get_balance;
pub mod refund_transaction;
pub mod request;
pub mod transaction_details;
pub mod transport;

pub use address_verify::AddressVerify;
pub use get_balance::GetBalance;
pub use refund_transaction::{RefundTransaction, RefundType};
pub use request::{Exchange, ExchangeRecord, Request, METHOD_KEY};
pub use transaction_details::GetTransactionDetails;
pub use transport::{execute, Transport, TransportError};
