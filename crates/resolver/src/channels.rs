use ibc_topology_types::{Channel, ChannelOrdering};
use tracing::trace;

use crate::error::{ChannelKind, TopologyError};

const TRANSFER_PORT: &str = "transfer";
const PROVIDER_PORT: &str = "provider";
const CONSUMER_PORT: &str = "consumer";

/// Recovers the bidirectional token-transfer channel pairing between two
/// chains.
///
/// A pair matches when the channels mutually reference each other, both
/// ports are `transfer`, both orderings are `Unordered`, and each side's
/// first connection hop is the already-resolved connection toward the
/// other chain (`a_to_b` on chain A, `b_to_a` on chain B).
pub fn match_transfer_channels<'a>(
    chain_a: &str,
    chain_b: &str,
    chans_a: &'a [Channel],
    chans_b: &'a [Channel],
    a_to_b: &str,
    b_to_a: &str,
) -> Result<(&'a Channel, &'a Channel), TopologyError> {
    match_channel_pair(
        chain_a,
        chain_b,
        chans_a,
        chans_b,
        ChannelKind::Transfer,
        |a, b| {
            a.port_id == TRANSFER_PORT
                && b.port_id == TRANSFER_PORT
                && a.ordering == ChannelOrdering::Unordered
                && b.ordering == ChannelOrdering::Unordered
                && a.first_hop() == Some(a_to_b)
                && b.first_hop() == Some(b_to_a)
        },
    )
}

/// Recovers the cross-chain-validation channel pairing between a provider
/// chain and its consumer.
///
/// Same discipline as the transfer variant, but the ports are
/// chain-specific (`provider` on the provider, `consumer` on the
/// consumer) and the ordering must be `Ordered`, which CCV packet
/// delivery requires.
pub fn match_ics_channels<'a>(
    provider_chain: &str,
    consumer_chain: &str,
    chans_provider: &'a [Channel],
    chans_consumer: &'a [Channel],
    provider_to_consumer: &str,
    consumer_to_provider: &str,
) -> Result<(&'a Channel, &'a Channel), TopologyError> {
    match_channel_pair(
        provider_chain,
        consumer_chain,
        chans_provider,
        chans_consumer,
        ChannelKind::Ics,
        |p, c| {
            p.port_id == PROVIDER_PORT
                && c.port_id == CONSUMER_PORT
                && p.ordering == ChannelOrdering::Ordered
                && c.ordering == ChannelOrdering::Ordered
                && p.first_hop() == Some(provider_to_consumer)
                && c.first_hop() == Some(consumer_to_provider)
        },
    )
}

fn match_channel_pair<'a, F>(
    chain_a: &str,
    chain_b: &str,
    chans_a: &'a [Channel],
    chans_b: &'a [Channel],
    kind: ChannelKind,
    accepts: F,
) -> Result<(&'a Channel, &'a Channel), TopologyError>
where
    F: Fn(&Channel, &Channel) -> bool,
{
    let mut matched = Vec::new();
    for a in chans_a {
        for b in chans_b {
            if a.mutually_references(b) && accepts(a, b) {
                matched.push((a, b));
            }
        }
    }

    match matched.len() {
        0 => Err(TopologyError::ChannelNotMatched {
            chain_a: chain_a.to_string(),
            chain_b: chain_b.to_string(),
            kind,
        }),
        1 => {
            let (a, b) = matched[0];
            trace!(
                %chain_a, %chain_b, %kind,
                channel_a = %a.channel_id, channel_b = %b.channel_id,
                "channel pairing matched"
            );
            Ok((a, b))
        }
        _ => Err(TopologyError::AmbiguousMatch {
            candidates: matched
                .iter()
                .map(|(a, b)| format!("{}<->{}", a.channel_id, b.channel_id))
                .collect(),
        }),
    }
}
