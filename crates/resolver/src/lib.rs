//! Resolution of relayer-created IBC topology.
//!
//! After a relayer wires two test chains together, each chain only knows
//! its own half of the story: its client list, its connection ends, its
//! channel ends. This crate recovers the cross-chain picture:
//!
//! - `diff_new_ids`: which entities a relayer operation just created,
//!   from before/after snapshots of a chain's full state
//! - `match_connection_pair`: the mutually-referencing connection pair
//!   between two chains
//! - `match_transfer_channels` / `match_ics_channels`: the bidirectional
//!   channel pairings for token transfer and cross-chain validation
//! - `TopologyStore`: the record of everything resolved so far
//! - `TopologyResolver`: the retrying, deadline-bounded loop that ties a
//!   `ChainQuerier` to the matchers and the store

pub mod backoff;
pub mod channels;
pub mod connections;
pub mod diff;
pub mod error;
pub mod query;
pub mod resolve;
pub mod store;

pub use backoff::ExponentialBackoff;
pub use channels::{match_ics_channels, match_transfer_channels};
pub use connections::match_connection_pair;
pub use diff::{diff_new_ids, Identified};
pub use error::{ChannelKind, EntityKind, TopologyError};
pub use query::{ChainQuerier, InMemoryChainQuerier};
pub use resolve::{ResolverConfig, TopologyResolver};
pub use store::TopologyStore;
