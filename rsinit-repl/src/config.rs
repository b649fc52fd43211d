use std::collections::BTreeSet;

use mongodb::bson::{self, Document};
use ordered_float::OrderedFloat;
use rsinit_base::{err, Result};
use serde::{Deserialize, Serialize};

// The server refuses priorities outside this range.
pub const MAX_PRIORITY: f64 = 1000.0;

// Each member of a set carries a small integer id, unique in the set and
// stable for the life of the set. Renumbering is a reconfig, not an initiate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MemberId(pub i32);

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MemberSpec {
    #[serde(rename = "_id")]
    pub id: MemberId,
    pub host: String,
    /// Election weight. Zero makes the member ineligible to become primary.
    pub priority: OrderedFloat<f64>,
}

impl MemberSpec {
    pub fn new(id: i32, host: impl Into<String>, priority: f64) -> Self {
        MemberSpec {
            id: MemberId(id),
            host: host.into(),
            priority: OrderedFloat(priority),
        }
    }

    pub fn electable(&self) -> bool {
        self.priority.0 > 0.0
    }
}

/// The document handed to `replSetInitiate`, and the shape returned by
/// `replSetGetConfig` (which carries many more fields; we ignore them).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ReplicaSetConfig {
    #[serde(rename = "_id")]
    pub id: String,
    pub members: Vec<MemberSpec>,
}

impl ReplicaSetConfig {
    pub fn new(id: impl Into<String>, members: Vec<MemberSpec>) -> Self {
        ReplicaSetConfig {
            id: id.into(),
            members,
        }
    }

    /// Builds a config from `(host, priority)` pairs, numbering members
    /// from zero in the order given.
    pub fn from_hosts<H: Into<String>>(
        id: impl Into<String>,
        hosts: impl IntoIterator<Item = (H, f64)>,
    ) -> Result<Self> {
        let members = hosts
            .into_iter()
            .enumerate()
            .map(|(i, (host, priority))| Ok(MemberSpec::new(member_id(i)?, host, priority)))
            .collect::<Result<Vec<_>>>()?;
        Ok(ReplicaSetConfig::new(id, members))
    }

    pub fn member(&self, id: MemberId) -> Option<&MemberSpec> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(err("replica set name is empty"));
        }
        if self.id.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(err(format!(
                "replica set name {:?} contains whitespace or '/'",
                self.id
            )));
        }
        if self.members.is_empty() {
            return Err(err("replica set has no members"));
        }
        let mut ids = BTreeSet::new();
        let mut hosts = BTreeSet::new();
        for m in self.members.iter() {
            if !ids.insert(m.id) {
                return Err(err(format!("duplicate member id {}", m.id.0)));
            }
            validate_host(&m.host)?;
            if !hosts.insert(m.host.as_str()) {
                return Err(err(format!("duplicate member host {}", m.host)));
            }
            let p = m.priority.0;
            if !p.is_finite() || p < 0.0 || p > MAX_PRIORITY {
                return Err(err(format!(
                    "member {} priority {} outside 0..={}",
                    m.host, p, MAX_PRIORITY
                )));
            }
        }
        if !self.members.iter().any(MemberSpec::electable) {
            return Err(err("no member has a priority above zero, nothing can become primary"));
        }
        Ok(())
    }

    pub fn to_document(&self) -> Result<Document> {
        Ok(bson::to_document(self)?)
    }
}

pub(crate) fn member_id(position: usize) -> Result<i32> {
    i32::try_from(position).map_err(|_| err(format!("member position {} overflows a member id", position)))
}

pub fn validate_host(host: &str) -> Result<()> {
    let Some((name, port)) = host.rsplit_once(':') else {
        return Err(err(format!("member host {:?} is not host:port", host)));
    };
    if name.is_empty() {
        return Err(err(format!("member host {:?} has an empty hostname", host)));
    }
    match port.parse::<u16>() {
        Ok(p) if p != 0 => Ok(()),
        _ => Err(err(format!("member host {:?} has an invalid port", host))),
    }
}
