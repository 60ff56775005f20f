use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::DenomError;

/// Port used by ICS-20 fungible token transfer channels.
pub const TRANSFER_PORT: &str = "transfer";

/// One `port/channel` hop in a denom trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracePrefix {
    pub port_id: String,
    pub channel_id: String,
}

impl TracePrefix {
    pub fn new(port_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            channel_id: channel_id.into(),
        }
    }

    /// A hop over a token-transfer channel.
    pub fn transfer(channel_id: impl Into<String>) -> Self {
        Self::new(TRANSFER_PORT, channel_id)
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// The full transfer path of a token plus its base denomination.
///
/// Hops are ordered from the token's source chain to its destination, so
/// the first prefix is the channel the token entered first. The rendered
/// path for `[transfer/channel-7, transfer/channel-3]` with base `uatom`
/// is `transfer/channel-7/transfer/channel-3/uatom`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomTrace {
    path: Vec<TracePrefix>,
    base_denom: String,
}

impl DenomTrace {
    pub fn new(path: Vec<TracePrefix>, base_denom: impl Into<String>) -> Result<Self, DenomError> {
        let base_denom = base_denom.into();
        if base_denom.is_empty() {
            return Err(DenomError::EmptyBaseDenom);
        }
        if path.is_empty() {
            return Err(DenomError::EmptyTrace);
        }
        for (i, prefix) in path.iter().enumerate() {
            if prefix.port_id.is_empty() || prefix.channel_id.is_empty() {
                return Err(DenomError::EmptyHop(i));
            }
        }
        Ok(Self { path, base_denom })
    }

    pub fn path(&self) -> &[TracePrefix] {
        &self.path
    }

    pub fn base_denom(&self) -> &str {
        &self.base_denom
    }

    /// The hashed on-chain form: `ibc/` followed by the upper-hex SHA-256
    /// of the full path string. Not reversible without the path.
    pub fn ibc_denom(&self) -> String {
        let hash = Sha256::digest(self.to_string().as_bytes());
        format!("ibc/{}", hex::encode_upper(hash))
    }
}

impl Display for DenomTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for prefix in &self.path {
            write!(f, "{prefix}/")?;
        }
        write!(f, "{}", self.base_denom)
    }
}

/// Wire denomination of `base_denom` after a single hop over `channel_id`.
pub fn derive_denom(channel_id: &str, base_denom: &str) -> Result<String, DenomError> {
    derive_multihop_denom(&[channel_id], base_denom)
}

/// Wire denomination of `base_denom` after traversing `channel_trace`,
/// ordered from the token's source chain to its destination.
pub fn derive_multihop_denom<S: AsRef<str>>(
    channel_trace: &[S],
    base_denom: &str,
) -> Result<String, DenomError> {
    let path = channel_trace
        .iter()
        .map(|channel| TracePrefix::transfer(channel.as_ref()))
        .collect();
    Ok(DenomTrace::new(path, base_denom)?.ibc_denom())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_hop_matches_canonical_hash() {
        // uatom over channel-0 is the classic ATOM-on-Osmosis denom.
        let denom = derive_denom("channel-0", "uatom").unwrap();
        assert_eq!(
            denom,
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
        );
    }

    #[test]
    fn multihop_hashes_the_concatenated_path() {
        let denom = derive_multihop_denom(&["channel-7", "channel-3"], "uatom").unwrap();
        assert_eq!(
            denom,
            "ibc/610C394848300F313AA24541D62C39343D7AD3DEA515FFAAFB5EF18D6CEC44EA"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = derive_denom("channel-1", "untrn").unwrap();
        let second = derive_denom("channel-1", "untrn").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "ibc/0C698C8970DB4C539455E5225665A804F6338753211319E44BAD39758B238695"
        );
    }

    #[test]
    fn single_element_trace_equals_single_hop() {
        let multihop = derive_multihop_denom(&["channel-0"], "uatom").unwrap();
        let single = derive_denom("channel-0", "uatom").unwrap();
        assert_eq!(multihop, single);
    }

    #[test]
    fn distinct_paths_produce_distinct_denoms() {
        let one = derive_denom("channel-0", "uatom").unwrap();
        let other = derive_multihop_denom(&["channel-0", "channel-1"], "uatom").unwrap();
        assert_ne!(one, other);
    }

    #[test]
    fn trace_renders_hops_in_order() {
        let trace = DenomTrace::new(
            vec![
                TracePrefix::transfer("channel-7"),
                TracePrefix::transfer("channel-3"),
            ],
            "uatom",
        )
        .unwrap();
        assert_eq!(trace.to_string(), "transfer/channel-7/transfer/channel-3/uatom");
    }

    #[test]
    fn non_transfer_ports_are_expressible() {
        let trace = DenomTrace::new(
            vec![TracePrefix::new("custom-port", "channel-4")],
            "utoken",
        )
        .unwrap();
        assert_eq!(trace.to_string(), "custom-port/channel-4/utoken");
        assert!(trace.ibc_denom().starts_with("ibc/"));
    }

    #[test]
    fn empty_base_denom_is_rejected() {
        assert!(matches!(
            derive_denom("channel-0", ""),
            Err(DenomError::EmptyBaseDenom)
        ));
    }

    #[test]
    fn empty_trace_is_rejected() {
        let channels: [&str; 0] = [];
        assert!(matches!(
            derive_multihop_denom(&channels, "uatom"),
            Err(DenomError::EmptyTrace)
        ));
    }

    #[test]
    fn empty_channel_id_is_rejected() {
        assert!(matches!(
            derive_multihop_denom(&["channel-0", ""], "uatom"),
            Err(DenomError::EmptyHop(1))
        ));
    }
}
