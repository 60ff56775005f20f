use ibc_topology_types::Connection;
use tracing::trace;

use crate::error::TopologyError;

/// Recovers the two-sided connection pairing between two chains from their
/// independently-queried connection lists.
///
/// A pair matches when all four handshake equalities hold: each side's
/// client ID equals the other side's recorded counterparty client ID, and
/// each side's connection ID equals the other side's recorded counterparty
/// connection ID. Exactly one pair must satisfy them; zero is
/// `NoMatchFound` (the handshake may still be in flight), more than one is
/// `AmbiguousMatch`.
pub fn match_connection_pair<'a>(
    chain_a: &str,
    chain_b: &str,
    conns_a: &'a [Connection],
    conns_b: &'a [Connection],
) -> Result<(&'a Connection, &'a Connection), TopologyError> {
    let mut matched = Vec::new();
    for a in conns_a {
        for b in conns_b {
            if a.is_paired_with(b) {
                matched.push((a, b));
            }
        }
    }

    match matched.len() {
        0 => Err(TopologyError::NoMatchFound {
            chain_a: chain_a.to_string(),
            chain_b: chain_b.to_string(),
        }),
        1 => {
            let (a, b) = matched[0];
            trace!(
                %chain_a, %chain_b,
                connection_a = %a.connection_id, connection_b = %b.connection_id,
                "connection pairing matched"
            );
            Ok((a, b))
        }
        _ => Err(TopologyError::AmbiguousMatch {
            candidates: matched
                .iter()
                .map(|(a, b)| format!("{}<->{}", a.connection_id, b.connection_id))
                .collect(),
        }),
    }
}
