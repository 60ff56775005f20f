use std::collections::HashMap;

use async_trait::async_trait;
use ibc_topology_types::{Channel, Client, Connection};
use tokio::sync::RwLock;

use crate::error::TopologyError;

/// Read-only view of one chain's IBC state.
///
/// The library ships no RPC client; orchestration code implements this
/// against whatever query surface its chains expose. Each call returns
/// the full current list, which is why resolution works by snapshotting
/// and diffing rather than consuming deltas.
#[async_trait]
pub trait ChainQuerier: Send + Sync {
    async fn list_clients(&self, chain_id: &str) -> Result<Vec<Client>, TopologyError>;

    async fn list_connections(&self, chain_id: &str) -> Result<Vec<Connection>, TopologyError>;

    async fn list_channels(&self, chain_id: &str) -> Result<Vec<Channel>, TopologyError>;
}

/// In-memory querier for tests and local orchestration.
///
/// Chains with no recorded state report empty lists, the same as a fresh
/// chain that has seen no relayer traffic.
#[derive(Debug, Default)]
pub struct InMemoryChainQuerier {
    clients: RwLock<HashMap<String, Vec<Client>>>,
    connections: RwLock<HashMap<String, Vec<Connection>>>,
    channels: RwLock<HashMap<String, Vec<Channel>>>,
}

impl InMemoryChainQuerier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_clients(&self, chain_id: impl Into<String>, clients: Vec<Client>) {
        self.clients.write().await.insert(chain_id.into(), clients);
    }

    pub async fn set_connections(&self, chain_id: impl Into<String>, connections: Vec<Connection>) {
        self.connections
            .write()
            .await
            .insert(chain_id.into(), connections);
    }

    pub async fn set_channels(&self, chain_id: impl Into<String>, channels: Vec<Channel>) {
        self.channels.write().await.insert(chain_id.into(), channels);
    }
}

#[async_trait]
impl ChainQuerier for InMemoryChainQuerier {
    async fn list_clients(&self, chain_id: &str) -> Result<Vec<Client>, TopologyError> {
        Ok(self
            .clients
            .read()
            .await
            .get(chain_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_connections(&self, chain_id: &str) -> Result<Vec<Connection>, TopologyError> {
        Ok(self
            .connections
            .read()
            .await
            .get(chain_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_channels(&self, chain_id: &str) -> Result<Vec<Channel>, TopologyError> {
        Ok(self
            .channels
            .read()
            .await
            .get(chain_id)
            .cloned()
            .unwrap_or_default())
    }
}
