use std::future::Future;
use std::time::Duration;

use ibc_topology_types::{Client, Connection};
use tokio::time;
use tracing::{debug, warn};

use crate::backoff::ExponentialBackoff;
use crate::channels::{match_ics_channels, match_transfer_channels};
use crate::connections::match_connection_pair;
use crate::diff::{diff_new_ids, Identified};
use crate::error::{ChannelKind, EntityKind, TopologyError};
use crate::query::ChainQuerier;
use crate::store::TopologyStore;

/// Tuning for the retry loop around each resolution step.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Delay before the first re-query after an unmatched attempt
    pub initial_backoff: Duration,

    /// Ceiling on the delay between re-queries
    pub max_backoff: Duration,

    /// Growth factor applied per attempt
    pub backoff_multiplier: f64,

    /// Overall bound on one resolution step; expiry surfaces as
    /// `DeadlineExpired` carrying the last match error
    pub deadline: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            deadline: Duration::from_secs(120),
        }
    }
}

/// Re-queries chain state after each relayer operation, matches the
/// pairing it implies, and records the result.
///
/// Handshakes are eventually consistent from the relayer's perspective, so
/// every step re-queries and retries with backoff until the pairing
/// settles or the configured deadline expires. The store is written only
/// after a step succeeds; owning it here keeps it the single piece of
/// mutable shared state in a test run.
pub struct TopologyResolver<Q> {
    querier: Q,
    store: TopologyStore,
    config: ResolverConfig,
}

impl<Q: ChainQuerier> TopologyResolver<Q> {
    pub fn new(querier: Q) -> Self {
        Self::with_config(querier, ResolverConfig::default())
    }

    pub fn with_config(querier: Q, config: ResolverConfig) -> Self {
        Self {
            querier,
            store: TopologyStore::new(),
            config,
        }
    }

    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TopologyStore {
        &mut self.store
    }

    pub fn into_store(self) -> TopologyStore {
        self.store
    }

    /// Identifies the client a relayer operation just created on
    /// `chain_id` by diffing against the `before` snapshot, and records it
    /// as the client tracking `counterparty_chain_id`.
    pub async fn register_created_client(
        &mut self,
        chain_id: &str,
        counterparty_chain_id: &str,
        before: &[Client],
    ) -> Result<String, TopologyError> {
        let querier = &self.querier;
        let client_id = retry_until_matched(
            &self.config,
            || async move {
                let after = querier.list_clients(chain_id).await?;
                single_new_id(chain_id, EntityKind::Client, before, &after)
            },
            || TopologyError::NothingNew {
                chain_id: chain_id.to_string(),
                kind: EntityKind::Client,
            },
        )
        .await?;

        self.store
            .record_client(chain_id, counterparty_chain_id, &client_id);
        debug!(%chain_id, %counterparty_chain_id, %client_id, "client recorded");
        Ok(client_id)
    }

    /// Diff-based twin of [`Self::register_created_client`] for
    /// connections created outside the pairwise flow.
    pub async fn register_created_connection(
        &mut self,
        chain_id: &str,
        counterparty_chain_id: &str,
        before: &[Connection],
    ) -> Result<String, TopologyError> {
        let querier = &self.querier;
        let connection_id = retry_until_matched(
            &self.config,
            || async move {
                let after = querier.list_connections(chain_id).await?;
                single_new_id(chain_id, EntityKind::Connection, before, &after)
            },
            || TopologyError::NothingNew {
                chain_id: chain_id.to_string(),
                kind: EntityKind::Connection,
            },
        )
        .await?;

        self.store
            .record_connection(chain_id, counterparty_chain_id, &connection_id);
        debug!(%chain_id, %counterparty_chain_id, %connection_id, "connection recorded");
        Ok(connection_id)
    }

    /// Queries both chains' connection lists and records the mutual
    /// pairing in both directions. Returns `(a_to_b, b_to_a)`.
    pub async fn resolve_connection_pair(
        &mut self,
        chain_a: &str,
        chain_b: &str,
    ) -> Result<(String, String), TopologyError> {
        let querier = &self.querier;
        let (a_to_b, b_to_a) = retry_until_matched(
            &self.config,
            || async move {
                let conns_a = querier.list_connections(chain_a).await?;
                let conns_b = querier.list_connections(chain_b).await?;
                let (a, b) = match_connection_pair(chain_a, chain_b, &conns_a, &conns_b)?;
                Ok((a.connection_id.clone(), b.connection_id.clone()))
            },
            || TopologyError::NoMatchFound {
                chain_a: chain_a.to_string(),
                chain_b: chain_b.to_string(),
            },
        )
        .await?;

        self.store
            .record_connection_pair(chain_a, chain_b, &a_to_b, &b_to_a);
        debug!(%chain_a, %chain_b, %a_to_b, %b_to_a, "connection pairing recorded");
        Ok((a_to_b, b_to_a))
    }

    /// Queries both chains' channel lists and records the mutual
    /// token-transfer pairing over the previously resolved connections.
    /// Returns `(channel on chain_a, channel on chain_b)`.
    pub async fn resolve_transfer_channel(
        &mut self,
        chain_a: &str,
        chain_b: &str,
    ) -> Result<(String, String), TopologyError> {
        let a_to_b = self.store.connection_id(chain_a, chain_b)?.to_owned();
        let b_to_a = self.store.connection_id(chain_b, chain_a)?.to_owned();

        let querier = &self.querier;
        let conn_a = a_to_b.as_str();
        let conn_b = b_to_a.as_str();
        let (channel_a, channel_b) = retry_until_matched(
            &self.config,
            || async move {
                let chans_a = querier.list_channels(chain_a).await?;
                let chans_b = querier.list_channels(chain_b).await?;
                let (a, b) =
                    match_transfer_channels(chain_a, chain_b, &chans_a, &chans_b, conn_a, conn_b)?;
                Ok((a.channel_id.clone(), b.channel_id.clone()))
            },
            || TopologyError::ChannelNotMatched {
                chain_a: chain_a.to_string(),
                chain_b: chain_b.to_string(),
                kind: ChannelKind::Transfer,
            },
        )
        .await?;

        self.store
            .record_transfer_channels(chain_a, chain_b, &channel_a, &channel_b);
        debug!(%chain_a, %chain_b, %channel_a, %channel_b, "transfer channel pairing recorded");
        Ok((channel_a, channel_b))
    }

    /// CCV twin of [`Self::resolve_transfer_channel`]: `provider`/
    /// `consumer` ports, `Ordered` discipline, recorded in the ICS map.
    /// Returns `(channel on provider, channel on consumer)`.
    pub async fn resolve_ics_channel(
        &mut self,
        provider_chain: &str,
        consumer_chain: &str,
    ) -> Result<(String, String), TopologyError> {
        let p_to_c = self
            .store
            .connection_id(provider_chain, consumer_chain)?
            .to_owned();
        let c_to_p = self
            .store
            .connection_id(consumer_chain, provider_chain)?
            .to_owned();

        let querier = &self.querier;
        let conn_p = p_to_c.as_str();
        let conn_c = c_to_p.as_str();
        let (provider_channel, consumer_channel) = retry_until_matched(
            &self.config,
            || async move {
                let chans_p = querier.list_channels(provider_chain).await?;
                let chans_c = querier.list_channels(consumer_chain).await?;
                let (p, c) = match_ics_channels(
                    provider_chain,
                    consumer_chain,
                    &chans_p,
                    &chans_c,
                    conn_p,
                    conn_c,
                )?;
                Ok((p.channel_id.clone(), c.channel_id.clone()))
            },
            || TopologyError::ChannelNotMatched {
                chain_a: provider_chain.to_string(),
                chain_b: consumer_chain.to_string(),
                kind: ChannelKind::Ics,
            },
        )
        .await?;

        self.store.record_ics_channels(
            provider_chain,
            consumer_chain,
            &provider_channel,
            &consumer_channel,
        );
        debug!(
            %provider_chain, %consumer_chain, %provider_channel, %consumer_channel,
            "ics channel pairing recorded"
        );
        Ok((provider_channel, consumer_channel))
    }
}

/// Exactly-one policy over a before/after diff: a single relayer
/// operation is expected to create a single entity, so zero is "not
/// visible yet" and more than one means the run raced something.
fn single_new_id<T: Identified>(
    chain_id: &str,
    kind: EntityKind,
    before: &[T],
    after: &[T],
) -> Result<String, TopologyError> {
    let mut fresh = diff_new_ids(before, after);
    match fresh.len() {
        0 => Err(TopologyError::NothingNew {
            chain_id: chain_id.to_string(),
            kind,
        }),
        1 => Ok(fresh.remove(0)),
        _ => Err(TopologyError::AmbiguousMatch { candidates: fresh }),
    }
}

/// Re-runs `attempt_fn` with exponential backoff while it returns a
/// retryable error, bounded by the configured deadline. Non-retryable
/// errors abort immediately. On expiry the last retryable error is
/// preserved inside `DeadlineExpired` (`on_deadline` supplies one if the
/// clock ran out before any attempt finished).
async fn retry_until_matched<T, F, Fut>(
    config: &ResolverConfig,
    mut attempt_fn: F,
    on_deadline: impl FnOnce() -> TopologyError,
) -> Result<T, TopologyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TopologyError>>,
{
    let mut backoff = ExponentialBackoff::new(config.initial_backoff, config.max_backoff)
        .with_multiplier(config.backoff_multiplier);
    let mut last_err: Option<TopologyError> = None;

    let outcome = time::timeout(config.deadline, async {
        loop {
            match attempt_fn().await {
                Ok(value) => break Ok(value),
                Err(err) if err.is_retryable() => {
                    warn!(attempt = backoff.attempt(), %err, "not settled yet; retrying");
                    let delay = backoff.next_delay();
                    last_err = Some(err);
                    time::sleep(delay).await;
                }
                Err(err) => break Err(err),
            }
        }
    })
    .await;

    match outcome {
        Ok(result) => result,
        Err(_elapsed) => Err(TopologyError::DeadlineExpired {
            timeout: config.deadline,
            last_error: Box::new(last_err.unwrap_or_else(on_deadline)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::InMemoryChainQuerier;
    use ibc_topology_types::{Channel, ChannelOrdering};

    fn quick_config() -> ResolverConfig {
        ResolverConfig {
            initial_backoff: Duration::from_millis(2),
            max_backoff: Duration::from_millis(10),
            backoff_multiplier: 2.0,
            deadline: Duration::from_millis(100),
        }
    }

    async fn wired_querier() -> InMemoryChainQuerier {
        let querier = InMemoryChainQuerier::new();
        querier
            .set_connections(
                "neutron-1",
                vec![Connection::new(
                    "connection-0",
                    "07-tendermint-0",
                    "07-tendermint-1",
                    "connection-1",
                )],
            )
            .await;
        querier
            .set_connections(
                "gaia-1",
                vec![Connection::new(
                    "connection-1",
                    "07-tendermint-1",
                    "07-tendermint-0",
                    "connection-0",
                )],
            )
            .await;
        querier
    }

    #[tokio::test]
    async fn resolves_and_records_a_connection_pair() {
        let mut resolver = TopologyResolver::with_config(wired_querier().await, quick_config());

        let (a_to_b, b_to_a) = resolver
            .resolve_connection_pair("neutron-1", "gaia-1")
            .await
            .unwrap();
        assert_eq!(a_to_b, "connection-0");
        assert_eq!(b_to_a, "connection-1");
        assert_eq!(
            resolver.store().connection_id("gaia-1", "neutron-1").unwrap(),
            "connection-1"
        );
    }

    #[tokio::test]
    async fn deadline_expiry_preserves_the_match_error() {
        let querier = InMemoryChainQuerier::new();
        let mut resolver = TopologyResolver::with_config(querier, quick_config());

        let err = resolver
            .resolve_connection_pair("neutron-1", "gaia-1")
            .await
            .unwrap_err();
        match err {
            TopologyError::DeadlineExpired { last_error, .. } => {
                assert!(matches!(*last_error, TopologyError::NoMatchFound { .. }));
            }
            other => panic!("expected DeadlineExpired, got {other}"),
        }
        assert!(resolver.store().is_empty());
    }

    #[tokio::test]
    async fn transfer_resolution_requires_recorded_connections() {
        let mut resolver = TopologyResolver::with_config(wired_querier().await, quick_config());

        let err = resolver
            .resolve_transfer_channel("neutron-1", "gaia-1")
            .await
            .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownConnection { .. }));
    }

    #[tokio::test]
    async fn failed_channel_resolution_writes_nothing() {
        let querier = wired_querier().await;
        // Channels exist but reference a connection the store never
        // resolved, so the hop check fails on every attempt.
        querier
            .set_channels(
                "neutron-1",
                vec![Channel::new(
                    "channel-0",
                    "transfer",
                    ChannelOrdering::Unordered,
                    vec!["connection-9".to_string()],
                    "channel-7",
                    "transfer",
                )],
            )
            .await;
        querier
            .set_channels(
                "gaia-1",
                vec![Channel::new(
                    "channel-7",
                    "transfer",
                    ChannelOrdering::Unordered,
                    vec!["connection-8".to_string()],
                    "channel-0",
                    "transfer",
                )],
            )
            .await;

        let mut resolver = TopologyResolver::with_config(querier, quick_config());
        resolver
            .resolve_connection_pair("neutron-1", "gaia-1")
            .await
            .unwrap();

        let err = resolver
            .resolve_transfer_channel("neutron-1", "gaia-1")
            .await
            .unwrap_err();
        assert!(matches!(err, TopologyError::DeadlineExpired { .. }));
        assert!(!resolver.store().has_transfer_channel("neutron-1", "gaia-1"));
    }

    #[tokio::test]
    async fn registers_a_created_client_by_diffing() {
        let querier = InMemoryChainQuerier::new();
        let before = vec![Client::new("07-tendermint-0", "osmosis-1")];
        querier
            .set_clients(
                "neutron-1",
                vec![
                    Client::new("07-tendermint-0", "osmosis-1"),
                    Client::new("07-tendermint-1", "gaia-1"),
                ],
            )
            .await;

        let mut resolver = TopologyResolver::with_config(querier, quick_config());
        let client_id = resolver
            .register_created_client("neutron-1", "gaia-1", &before)
            .await
            .unwrap();
        assert_eq!(client_id, "07-tendermint-1");
        assert_eq!(
            resolver.store().client_id("neutron-1", "gaia-1").unwrap(),
            "07-tendermint-1"
        );
    }

    #[tokio::test]
    async fn two_new_clients_abort_as_ambiguous() {
        let querier = InMemoryChainQuerier::new();
        querier
            .set_clients(
                "neutron-1",
                vec![
                    Client::new("07-tendermint-1", "gaia-1"),
                    Client::new("07-tendermint-2", "gaia-1"),
                ],
            )
            .await;

        let mut resolver = TopologyResolver::with_config(querier, quick_config());
        let err = resolver
            .register_created_client("neutron-1", "gaia-1", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, TopologyError::AmbiguousMatch { .. }));
        assert!(resolver.store().is_empty());
    }
}
