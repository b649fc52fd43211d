use rsinit_base::Result;
use tracing::{debug, info, warn};

use crate::{ReplAdmin, ReplicaSetConfig, SetStatus, SetSummary};

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Outcome {
    /// A set was already configured; nothing was sent.
    AlreadyInitiated(SetSummary),
    /// This call sent the initiate command and the node accepted it.
    Initiated,
}

/// Makes sure the node behind `admin` belongs to a replica set, initiating
/// one with `config` if and only if the node reports it has none.
///
/// An invalid config, a status failure other than "not initiated", or a
/// failed initiate are all returned as errors; nothing is retried.
pub fn ensure_initiated<A: ReplAdmin>(admin: &A, config: &ReplicaSetConfig) -> Result<Outcome> {
    config.validate()?;

    match admin.status()? {
        SetStatus::Initiated(summary) => {
            if summary.set != config.id {
                warn!(
                    target: "rsinit",
                    running = %summary.set,
                    wanted = %config.id,
                    "node already belongs to a differently named set, leaving it alone"
                );
            }
            info!(
                target: "rsinit",
                set = %summary.set,
                members = summary.members.len(),
                "replica set already initiated"
            );
            Ok(Outcome::AlreadyInitiated(summary))
        }
        SetStatus::Uninitiated => {
            debug!(target: "rsinit", set = %config.id, "no replica set configured, initiating");
            admin.initiate(config)?;
            for m in config.members.iter() {
                info!(
                    target: "rsinit",
                    id = m.id.0,
                    host = %m.host,
                    priority = m.priority.0,
                    "member"
                );
            }
            info!(
                target: "rsinit",
                set = %config.id,
                members = config.members.len(),
                "replica set initiated"
            );
            Ok(Outcome::Initiated)
        }
    }
}
