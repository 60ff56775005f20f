use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use thiserror::Error;

/// What a diff-based registration was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Connection,
    Channel,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Client => "client",
            EntityKind::Connection => "connection",
            EntityKind::Channel => "channel",
        };
        write!(f, "{name}")
    }
}

/// Which of the two channel maps a lookup or match refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelKind {
    Transfer,
    Ics,
}

impl Display for ChannelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelKind::Transfer => "transfer",
            ChannelKind::Ics => "ics",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum TopologyError {
    /// A chain query failed. Propagated as-is; never retried.
    #[error("query against chain `{chain_id}` failed: {reason}")]
    Query { chain_id: String, reason: String },

    /// No connection pairing satisfies the handshake invariant yet.
    #[error("no connection pairing between `{chain_a}` and `{chain_b}` satisfies the handshake invariant")]
    NoMatchFound { chain_a: String, chain_b: String },

    /// No channel pairing satisfies the handshake invariant yet.
    #[error("no {kind} channel pairing between `{chain_a}` and `{chain_b}` satisfies the handshake invariant")]
    ChannelNotMatched {
        chain_a: String,
        chain_b: String,
        kind: ChannelKind,
    },

    /// A relayer operation was expected to create exactly one entity and
    /// the before/after diff found none.
    #[error("no new {kind} appeared on `{chain_id}`")]
    NothingNew { chain_id: String, kind: EntityKind },

    /// More than one candidate satisfies an invariant that admits one.
    #[error("expected exactly one match, found {}: {candidates:?}", candidates.len())]
    AmbiguousMatch { candidates: Vec<String> },

    #[error("no client recorded on `{chain_id}` tracking `{counterparty_chain_id}`")]
    UnknownClient {
        chain_id: String,
        counterparty_chain_id: String,
    },

    #[error("no connection recorded from `{chain_id}` to `{counterparty_chain_id}`")]
    UnknownConnection {
        chain_id: String,
        counterparty_chain_id: String,
    },

    #[error("no {kind} channel recorded from `{chain_id}` to `{counterparty_chain_id}`")]
    UnknownChannel {
        chain_id: String,
        counterparty_chain_id: String,
        kind: ChannelKind,
    },

    /// The bounded retry loop ran out of time before a match settled.
    #[error("resolution did not settle within {timeout:?}: {last_error}")]
    DeadlineExpired {
        timeout: Duration,
        last_error: Box<TopologyError>,
    },
}

impl TopologyError {
    /// Whether waiting and re-querying can plausibly clear the error.
    /// Handshakes are eventually consistent from the relayer's
    /// perspective, so an unmatched pairing may simply not exist yet.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TopologyError::NoMatchFound { .. }
                | TopologyError::ChannelNotMatched { .. }
                | TopologyError::NothingNew { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        let no_match = TopologyError::NoMatchFound {
            chain_a: "neutron-1".into(),
            chain_b: "gaia-1".into(),
        };
        assert!(no_match.is_retryable());

        let ambiguous = TopologyError::AmbiguousMatch {
            candidates: vec!["connection-0<->connection-1".into()],
        };
        assert!(!ambiguous.is_retryable());

        let query = TopologyError::Query {
            chain_id: "neutron-1".into(),
            reason: "connection refused".into(),
        };
        assert!(!query.is_retryable());
    }
}
