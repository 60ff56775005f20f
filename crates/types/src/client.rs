use serde::{Deserialize, Serialize};

/// A light client one chain holds of another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID on the host chain (e.g., "07-tendermint-0")
    pub client_id: String,

    /// Chain ID of the chain this client tracks
    pub counterparty_chain_id: String,
}

impl Client {
    pub fn new(client_id: impl Into<String>, counterparty_chain_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            counterparty_chain_id: counterparty_chain_id.into(),
        }
    }
}
