//! Record types returned by IBC state queries.
//!
//! These mirror what a chain reports for its own light clients,
//! connections, and channels. They carry plain string identifiers; pairing
//! two chains' records back together is the resolver's job.

pub mod channel;
pub mod client;
pub mod connection;

pub use channel::*;
pub use client::*;
pub use connection::*;
