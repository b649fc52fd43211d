use std::str::FromStr;

use clap::{Parser, Subcommand};
use rsinit_base::Result;
use tracing::debug;
use rsinit_repl::{validate_host, ReplicaSetConfig};

pub const DEFAULT_URI: &str = "mongodb://mongodb:27017";
pub const DEFAULT_SET: &str = "rs0";

pub fn default_members() -> Vec<MemberArg> {
    vec![
        MemberArg::new("mongodb:27017", 1.0),
        MemberArg::new("mongodb_secondary:27017", 0.5),
    ]
}

/// Ensure a MongoDB replica set is initiated.
#[derive(Clone, Debug, Parser)]
#[command(name = "rsinit", version, about)]
pub struct Settings {
    /// Connection string of the node to bootstrap through.
    #[arg(long, env = "RSINIT_URI", default_value = DEFAULT_URI)]
    pub uri: String,

    /// Replica set name, as given to mongod's --replSet.
    #[arg(long = "set", env = "RSINIT_SET", default_value = DEFAULT_SET)]
    pub set_name: String,

    /// A member as host:port or host:port=priority. Repeat for each member;
    /// ids are assigned from zero in the order given.
    #[arg(
        long = "member",
        env = "RSINIT_MEMBERS",
        value_delimiter = ',',
        default_values_t = default_members()
    )]
    pub members: Vec<MemberArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Initiate the set unless the node already belongs to one (default).
    #[default]
    Ensure,
    /// Print the node's replica-set status and configuration.
    Status,
    /// Print the initiate command `ensure` would send, without connecting.
    Plan,
}

impl Settings {
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    pub fn replica_set_config(&self) -> Result<ReplicaSetConfig> {
        let config = ReplicaSetConfig::from_hosts(
            self.set_name.clone(),
            self.members.iter().map(|m| (m.host.clone(), m.priority)),
        )?;
        debug!(
            target: "rsinit",
            set = %config.id,
            members = config.members.len(),
            "desired replica set config"
        );
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberArg {
    pub host: String,
    pub priority: f64,
}

impl MemberArg {
    pub fn new(host: impl Into<String>, priority: f64) -> Self {
        MemberArg {
            host: host.into(),
            priority,
        }
    }
}

// Errors here are plain strings: clap renders them next to the offending flag.
impl FromStr for MemberArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (host, priority) = match s.split_once('=') {
            None => (s, 1.0),
            Some((host, p)) => {
                let p = p
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("member {:?} has a non-numeric priority", s))?;
                (host.trim(), p)
            }
        };
        validate_host(host).map_err(|e| e.to_string())?;
        if !p_in_range(priority) {
            return Err(format!(
                "member {:?} priority must be between 0 and {}",
                s,
                rsinit_repl::MAX_PRIORITY
            ));
        }
        Ok(MemberArg::new(host, priority))
    }
}

fn p_in_range(p: f64) -> bool {
    p.is_finite() && (0.0..=rsinit_repl::MAX_PRIORITY).contains(&p)
}

impl std::fmt::Display for MemberArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.host, self.priority)
    }
}
