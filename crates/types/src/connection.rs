use serde::{Deserialize, Serialize};

/// A handshake-established pairing between two light clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection ID on the host chain (e.g., "connection-0")
    pub connection_id: String,

    /// Client ID this connection runs on
    pub client_id: String,

    /// What the host chain believes about the other end
    pub counterparty: ConnectionCounterparty,
}

/// The remote end of a connection, as recorded locally during the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCounterparty {
    pub client_id: String,
    pub connection_id: String,
}

impl Connection {
    pub fn new(
        connection_id: impl Into<String>,
        client_id: impl Into<String>,
        counterparty_client_id: impl Into<String>,
        counterparty_connection_id: impl Into<String>,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            client_id: client_id.into(),
            counterparty: ConnectionCounterparty {
                client_id: counterparty_client_id.into(),
                connection_id: counterparty_connection_id.into(),
            },
        }
    }

    /// True when `self` and `other` are the two ends of one handshake:
    /// each side's counterparty fields point back at the other.
    pub fn is_paired_with(&self, other: &Connection) -> bool {
        self.client_id == other.counterparty.client_id
            && other.client_id == self.counterparty.client_id
            && self.connection_id == other.counterparty.connection_id
            && other.connection_id == self.counterparty.connection_id
    }
}
