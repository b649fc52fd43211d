use serde::{Deserialize, Serialize};

use crate::MemberId;

// One member row of a `replSetGetStatus` reply. The reply carries optimes,
// heartbeats, sync sources and so on; we keep only what we report.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MemberState {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub name: String,
    #[serde(rename = "stateStr")]
    pub state_str: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct SetSummary {
    pub set: String,
    #[serde(rename = "myState")]
    pub my_state: i32,
    pub members: Vec<MemberState>,
}

/// The classified answer to "is a replica set configured on this node?".
///
/// A node that was started with `--replSet` but never initiated answers the
/// status command with a `NotYetInitialized` error; that specific error is
/// turned into [`SetStatus::Uninitiated`] by the admin binding, and every
/// other failure stays an error.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SetStatus {
    Uninitiated,
    Initiated(SetSummary),
}

impl SetStatus {
    pub fn is_initiated(&self) -> bool {
        matches!(self, SetStatus::Initiated(_))
    }
}
