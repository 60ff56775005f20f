use std::collections::HashMap;

use crate::error::{ChannelKind, TopologyError};

/// Mutable record of the topology resolved so far, keyed by
/// `(chain, counterparty chain)`.
///
/// Created empty at the start of a run and populated one relayer path at a
/// time. Writes happen only after a match succeeds, so a failed resolution
/// never leaves a partial entry behind.
#[derive(Clone, Debug, Default)]
pub struct TopologyStore {
    clients: HashMap<(String, String), String>,
    connections: HashMap<(String, String), String>,
    transfer_channels: HashMap<(String, String), String>,
    ics_channels: HashMap<(String, String), String>,
}

impl TopologyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_client(
        &mut self,
        chain_id: impl Into<String>,
        counterparty_chain_id: impl Into<String>,
        client_id: impl Into<String>,
    ) {
        self.clients
            .insert((chain_id.into(), counterparty_chain_id.into()), client_id.into());
    }

    pub fn record_connection(
        &mut self,
        chain_id: impl Into<String>,
        counterparty_chain_id: impl Into<String>,
        connection_id: impl Into<String>,
    ) {
        self.connections.insert(
            (chain_id.into(), counterparty_chain_id.into()),
            connection_id.into(),
        );
    }

    /// Records both directions of a matched connection pair.
    pub fn record_connection_pair(
        &mut self,
        chain_a: &str,
        chain_b: &str,
        a_to_b: &str,
        b_to_a: &str,
    ) {
        self.record_connection(chain_a, chain_b, a_to_b);
        self.record_connection(chain_b, chain_a, b_to_a);
    }

    /// Records both directions of a matched transfer channel pair.
    pub fn record_transfer_channels(
        &mut self,
        chain_a: &str,
        chain_b: &str,
        channel_a: &str,
        channel_b: &str,
    ) {
        self.transfer_channels
            .insert((chain_a.to_string(), chain_b.to_string()), channel_a.to_string());
        self.transfer_channels
            .insert((chain_b.to_string(), chain_a.to_string()), channel_b.to_string());
    }

    /// Records both directions of a matched CCV channel pair.
    pub fn record_ics_channels(
        &mut self,
        provider_chain: &str,
        consumer_chain: &str,
        provider_channel: &str,
        consumer_channel: &str,
    ) {
        self.ics_channels.insert(
            (provider_chain.to_string(), consumer_chain.to_string()),
            provider_channel.to_string(),
        );
        self.ics_channels.insert(
            (consumer_chain.to_string(), provider_chain.to_string()),
            consumer_channel.to_string(),
        );
    }

    pub fn client_id(
        &self,
        chain_id: &str,
        counterparty_chain_id: &str,
    ) -> Result<&str, TopologyError> {
        self.lookup(&self.clients, chain_id, counterparty_chain_id)
            .ok_or_else(|| TopologyError::UnknownClient {
                chain_id: chain_id.to_string(),
                counterparty_chain_id: counterparty_chain_id.to_string(),
            })
    }

    pub fn connection_id(
        &self,
        chain_id: &str,
        counterparty_chain_id: &str,
    ) -> Result<&str, TopologyError> {
        self.lookup(&self.connections, chain_id, counterparty_chain_id)
            .ok_or_else(|| TopologyError::UnknownConnection {
                chain_id: chain_id.to_string(),
                counterparty_chain_id: counterparty_chain_id.to_string(),
            })
    }

    /// The ID of the token-transfer channel from `chain_id` toward
    /// `counterparty_chain_id`.
    pub fn transfer_channel_id(
        &self,
        chain_id: &str,
        counterparty_chain_id: &str,
    ) -> Result<&str, TopologyError> {
        self.lookup(&self.transfer_channels, chain_id, counterparty_chain_id)
            .ok_or_else(|| TopologyError::UnknownChannel {
                chain_id: chain_id.to_string(),
                counterparty_chain_id: counterparty_chain_id.to_string(),
                kind: ChannelKind::Transfer,
            })
    }

    /// The ID of the CCV channel from `chain_id` toward
    /// `counterparty_chain_id`.
    pub fn ics_channel_id(
        &self,
        chain_id: &str,
        counterparty_chain_id: &str,
    ) -> Result<&str, TopologyError> {
        self.lookup(&self.ics_channels, chain_id, counterparty_chain_id)
            .ok_or_else(|| TopologyError::UnknownChannel {
                chain_id: chain_id.to_string(),
                counterparty_chain_id: counterparty_chain_id.to_string(),
                kind: ChannelKind::Ics,
            })
    }

    pub fn has_transfer_channel(&self, chain_id: &str, counterparty_chain_id: &str) -> bool {
        self.lookup(&self.transfer_channels, chain_id, counterparty_chain_id)
            .is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.connections.is_empty()
            && self.transfer_channels.is_empty()
            && self.ics_channels.is_empty()
    }

    fn lookup<'a>(
        &self,
        map: &'a HashMap<(String, String), String>,
        chain_id: &str,
        counterparty_chain_id: &str,
    ) -> Option<&'a str> {
        map.get(&(chain_id.to_string(), counterparty_chain_id.to_string()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = TopologyStore::new();
        assert!(store.is_empty());
        assert!(store.transfer_channel_id("neutron-1", "gaia-1").is_err());
    }

    #[test]
    fn transfer_channels_are_recorded_both_ways() {
        let mut store = TopologyStore::new();
        store.record_transfer_channels("neutron-1", "gaia-1", "channel-0", "channel-7");

        assert_eq!(store.transfer_channel_id("neutron-1", "gaia-1").unwrap(), "channel-0");
        assert_eq!(store.transfer_channel_id("gaia-1", "neutron-1").unwrap(), "channel-7");
        assert!(store.has_transfer_channel("neutron-1", "gaia-1"));
        assert!(!store.has_transfer_channel("neutron-1", "osmosis-1"));
    }

    #[test]
    fn ics_and_transfer_maps_are_separate() {
        let mut store = TopologyStore::new();
        store.record_ics_channels("gaia-1", "neutron-1", "channel-1", "channel-2");

        assert_eq!(store.ics_channel_id("gaia-1", "neutron-1").unwrap(), "channel-1");
        assert_eq!(store.ics_channel_id("neutron-1", "gaia-1").unwrap(), "channel-2");
        assert!(store.transfer_channel_id("gaia-1", "neutron-1").is_err());
    }

    #[test]
    fn lookup_misses_name_both_chains() {
        let store = TopologyStore::new();
        match store.connection_id("neutron-1", "gaia-1") {
            Err(TopologyError::UnknownConnection {
                chain_id,
                counterparty_chain_id,
            }) => {
                assert_eq!(chain_id, "neutron-1");
                assert_eq!(counterparty_chain_id, "gaia-1");
            }
            other => panic!("expected UnknownConnection, got {other:?}"),
        }
    }

    #[test]
    fn clients_and_connections_round_trip() {
        let mut store = TopologyStore::new();
        store.record_client("neutron-1", "gaia-1", "07-tendermint-0");
        store.record_connection_pair("neutron-1", "gaia-1", "connection-0", "connection-1");

        assert_eq!(store.client_id("neutron-1", "gaia-1").unwrap(), "07-tendermint-0");
        assert_eq!(store.connection_id("neutron-1", "gaia-1").unwrap(), "connection-0");
        assert_eq!(store.connection_id("gaia-1", "neutron-1").unwrap(), "connection-1");
    }
}
