//! ICS-20 denomination derivation.
//!
//! A token that crosses an IBC transfer channel is not carried under its
//! base denomination on the destination chain; it arrives as
//! `ibc/<SHA256 of the transfer path>`. This crate builds those paths and
//! hashes them, so a test can predict the wire denomination of a token
//! before it ever moves.

pub mod trace;

pub use trace::{derive_denom, derive_multihop_denom, DenomTrace, TracePrefix, TRANSFER_PORT};

#[derive(Debug, thiserror::Error)]
pub enum DenomError {
    #[error("base denomination is empty")]
    EmptyBaseDenom,

    #[error("denom trace has no hops")]
    EmptyTrace,

    #[error("trace hop {0} has an empty port or channel id")]
    EmptyHop(usize),
}
