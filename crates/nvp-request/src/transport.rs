//! # Transport Seam
//!
//! The network call itself is performed by an external collaborator that
//! owns HTTPS, credentials, the API version marker, and the wire NVP
//! encoding. This module defines the interface that collaborator
//! implements and [`execute`], which drives one request through it.
//!
//! ## Contract
//!
//! - The transport receives a copy of the outbound mapping and returns the
//!   decoded inbound mapping, or a [`TransportError`].
//! - On success the request's inbound mapping is replaced exactly once.
//! - On failure the inbound mapping is left as it was.
//!
//! A response whose `ACK` reports a business failure is still a successful
//! transport call; interpreting the inbound mapping is the caller's job.

use nvp_core::{NvpError, NvpMap};

use crate::request::Request;

/// Errors raised by a transport collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote endpoint could not be reached.
    #[error("endpoint unavailable: {reason}")]
    Unavailable {
        /// Description of the connection failure.
        reason: String,
    },

    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint rejected the call with HTTP status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded into NVP fields.
    #[error("malformed NVP response: {reason}")]
    Malformed {
        /// What was wrong with the body.
        reason: String,
    },
}

impl From<TransportError> for NvpError {
    fn from(err: TransportError) -> Self {
        NvpError::Transport(err.to_string())
    }
}

/// Executes an NVP call against the remote API.
///
/// Implementations must be `Send + Sync` so one transport can serve many
/// requests from different threads. Each request is still used for
/// exactly one in-flight call at a time.
pub trait Transport: Send + Sync {
    /// Send `fields` and return the decoded response fields.
    fn call(&self, fields: &NvpMap) -> Result<NvpMap, TransportError>;
}

/// Run `request` through `transport` and attach the response.
///
/// # Errors
///
/// Returns [`NvpError::Transport`] if the transport fails. The request's
/// inbound mapping is unchanged in that case.
pub fn execute<T>(transport: &T, request: &mut dyn Request) -> Result<(), NvpError>
where
    T: Transport + ?Sized,
{
    let method = request.method();
    let outbound = request.nvp_request();
    tracing::debug!(method, fields = outbound.len(), "executing NVP call");

    let response = transport.call(&outbound).map_err(|err| {
        tracing::warn!(method, error = %err, "NVP call failed");
        NvpError::from(err)
    })?;

    request.set_nvp_response(response);
    Ok(())
}
