use std::collections::HashSet;

use ibc_topology_types::{Channel, Client, Connection};

/// A record bearing a unique identifier within one chain's local state.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Client {
    fn id(&self) -> &str {
        &self.client_id
    }
}

impl Identified for Connection {
    fn id(&self) -> &str {
        &self.connection_id
    }
}

impl Identified for Channel {
    fn id(&self) -> &str {
        &self.channel_id
    }
}

/// IDs present in `after` but absent from `before`.
///
/// The relayer's query interface returns full current state, not deltas,
/// so callers snapshot before an operation and diff afterwards to find
/// what the operation created.
pub fn diff_new_ids<T: Identified>(before: &[T], after: &[T]) -> Vec<String> {
    let known: HashSet<&str> = before.iter().map(Identified::id).collect();
    after
        .iter()
        .map(Identified::id)
        .filter(|id| !known.contains(id))
        .map(str::to_owned)
        .collect()
}
