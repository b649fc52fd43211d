use rsinit_base::Result;

use crate::{ReplicaSetConfig, SetStatus};

/// The administrative surface of a single database node that bootstrapping
/// needs. Implementations must classify "no replica set configured yet" as a
/// value, never as an error, so that callers can branch on it.
pub trait ReplAdmin {
    /// `replSetGetStatus`.
    fn status(&self) -> Result<SetStatus>;

    /// `replSetGetConfig`; `None` when the node has not been initiated.
    fn config(&self) -> Result<Option<ReplicaSetConfig>>;

    /// `replSetInitiate`. Fails if the node is already part of a set.
    fn initiate(&self, config: &ReplicaSetConfig) -> Result<()>;
}
