use mongodb::{
    bson::{self, doc, Document},
    error::{Error as DriverError, ErrorKind, Result as DriverResult},
    sync::{Client, Database},
};
use rsinit_base::{err, Result};
use serde::Deserialize;
use tracing::debug;

use crate::{ReplAdmin, ReplicaSetConfig, SetStatus, SetSummary};

// Server error codes we branch on.
pub const NOT_YET_INITIALIZED: i32 = 94;
pub const NO_REPLICATION_ENABLED: i32 = 76;

/// A [`ReplAdmin`] bound to one mongod through the blocking driver.
pub struct MongoAdmin {
    client: Client,
}

#[derive(Deserialize)]
struct ConfigReply {
    config: ReplicaSetConfig,
}

impl MongoAdmin {
    pub fn connect(uri: &str) -> Result<Self> {
        let uri = direct_uri(uri);
        debug!(target: "rsinit", %uri, "connecting");
        let client = Client::with_uri_str(&uri)?;
        Ok(MongoAdmin { client })
    }

    fn admin_db(&self) -> Database {
        self.client.database("admin")
    }

    fn run(&self, cmd: Document) -> DriverResult<Document> {
        self.admin_db().run_command(cmd).run()
    }
}

impl ReplAdmin for MongoAdmin {
    fn status(&self) -> Result<SetStatus> {
        classify_status(self.run(doc! { "replSetGetStatus": 1 }))
    }

    fn config(&self) -> Result<Option<ReplicaSetConfig>> {
        classify_config(self.run(doc! { "replSetGetConfig": 1 }))
    }

    fn initiate(&self, config: &ReplicaSetConfig) -> Result<()> {
        let body = config.to_document()?;
        self.run(doc! { "replSetInitiate": body })?;
        Ok(())
    }
}

// Only NotYetInitialized means "no set here yet". Everything else, including
// a node started without --replSet, is a failure the operator has to fix.
pub(crate) fn classify_status(reply: DriverResult<Document>) -> Result<SetStatus> {
    match reply {
        Ok(reply) => {
            let summary: SetSummary = bson::from_document(reply)?;
            Ok(SetStatus::Initiated(summary))
        }
        Err(e) if command_code(&e) == Some(NOT_YET_INITIALIZED) => Ok(SetStatus::Uninitiated),
        Err(e) if command_code(&e) == Some(NO_REPLICATION_ENABLED) => Err(err(format!(
            "node is not running with --replSet: {}",
            e
        ))),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn classify_config(reply: DriverResult<Document>) -> Result<Option<ReplicaSetConfig>> {
    match reply {
        Ok(reply) => {
            let reply: ConfigReply = bson::from_document(reply)?;
            Ok(Some(reply.config))
        }
        Err(e) if command_code(&e) == Some(NOT_YET_INITIALIZED) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn command_code(e: &DriverError) -> Option<i32> {
    match e.kind.as_ref() {
        ErrorKind::Command(ce) => Some(ce.code),
        _ => None,
    }
}

// An uninitiated member reports itself as a ghost and is never selectable
// through topology discovery, so talk to the seed directly unless the caller
// already said how to connect. A seed list is left to the driver: direct
// connections take exactly one host.
pub fn direct_uri(uri: &str) -> String {
    let lower = uri.to_ascii_lowercase();
    if lower.contains("directconnection=") || lower.starts_with("mongodb+srv://") {
        return uri.to_string();
    }
    let (base, query) = match uri.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (uri, None),
    };
    let rest = base.strip_prefix("mongodb://").unwrap_or(base);
    let (hosts, path) = match rest.split_once('/') {
        Some((hosts, path)) => (hosts, Some(path)),
        None => (rest, None),
    };
    if hosts.contains(',') {
        return uri.to_string();
    }
    // The driver wants a '/' between the host list and the options.
    let slash = if path.is_some() { "" } else { "/" };
    match query {
        Some(q) if !q.is_empty() => format!("{}{}?{}&directConnection=true", base, slash, q),
        _ => format!("{}{}?directConnection=true", base, slash),
    }
}
