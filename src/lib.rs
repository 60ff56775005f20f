//! Facade over the topology workspace crates.
//!
//! Orchestration code usually wants all three layers at once: the record
//! types a chain query returns, the resolver that pairs them up across
//! chains, and the denom derivation that predicts what a token is called
//! after crossing the resolved channels.

pub use ibc_topology_denom as denom;
pub use ibc_topology_resolver as resolver;
pub use ibc_topology_types as types;

pub use ibc_topology_denom::{
    derive_denom, derive_multihop_denom, DenomError, DenomTrace, TracePrefix, TRANSFER_PORT,
};
pub use ibc_topology_resolver::{
    diff_new_ids, match_connection_pair, match_ics_channels, match_transfer_channels,
    ChainQuerier, ChannelKind, EntityKind, ExponentialBackoff, Identified, InMemoryChainQuerier,
    ResolverConfig, TopologyError, TopologyResolver, TopologyStore,
};
pub use ibc_topology_types::{
    Channel, ChannelCounterparty, ChannelOrdering, Client, Connection, ConnectionCounterparty,
};
