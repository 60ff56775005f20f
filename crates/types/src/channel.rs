use serde::{Deserialize, Serialize};

/// An application-level pairing built atop a connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID on the host chain (e.g., "channel-0")
    pub channel_id: String,

    /// Port ID (e.g., "transfer", "provider", "consumer")
    pub port_id: String,

    /// Packet delivery discipline
    pub ordering: ChannelOrdering,

    /// Connection IDs the channel runs over; the first hop is the
    /// connection on the host chain
    pub connection_hops: Vec<String>,

    /// What the host chain believes about the other end
    pub counterparty: ChannelCounterparty,
}

/// The remote end of a channel, as recorded locally during the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelCounterparty {
    pub channel_id: String,
    pub port_id: String,
}

/// Channel ordering type
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelOrdering {
    Ordered,
    Unordered,
}

impl Channel {
    pub fn new(
        channel_id: impl Into<String>,
        port_id: impl Into<String>,
        ordering: ChannelOrdering,
        connection_hops: Vec<String>,
        counterparty_channel_id: impl Into<String>,
        counterparty_port_id: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            port_id: port_id.into(),
            ordering,
            connection_hops,
            counterparty: ChannelCounterparty {
                channel_id: counterparty_channel_id.into(),
                port_id: counterparty_port_id.into(),
            },
        }
    }

    /// The connection this channel runs over on the host chain.
    pub fn first_hop(&self) -> Option<&str> {
        self.connection_hops.first().map(String::as_str)
    }

    /// True when each channel's recorded counterparty ID points at the other.
    pub fn mutually_references(&self, other: &Channel) -> bool {
        self.channel_id == other.counterparty.channel_id
            && other.channel_id == self.counterparty.channel_id
    }
}
