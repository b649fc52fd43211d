use mongodb::{
    bson::{self, doc},
    error::{CommandError, Error as DriverError, ErrorKind},
};
use test_log::test;

use crate::{
    config::member_id,
    direct_uri,
    mongo::{classify_config, classify_status},
    MemberId, MemberSpec, ReplicaSetConfig, SetStatus, SetSummary, NOT_YET_INITIALIZED,
    NO_REPLICATION_ENABLED,
};


pub(crate) fn hosts_config(id: &str, hosts: &[(&str, f64)]) -> ReplicaSetConfig {
    match ReplicaSetConfig::from_hosts(id, hosts.iter().copied()) {
        Ok(cfg) => cfg,
        Err(e) => panic!("from_hosts failed: {}", e),
    }
}

pub(crate) fn default_config() -> ReplicaSetConfig {
    hosts_config("rs0", &[("mongodb:27017", 1.0), ("mongodb_secondary:27017", 0.5)])
}

#[test]
fn test_from_hosts_numbers_from_zero() {
    let cfg = default_config();
    assert_eq!(cfg.members[0], MemberSpec::new(0, "mongodb:27017", 1.0));
    assert_eq!(cfg.members[1], MemberSpec::new(1, "mongodb_secondary:27017", 0.5));
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_validate_rejects() {
    let cases: Vec<(ReplicaSetConfig, &str)> = vec![
        (hosts_config("", &[("a:1", 1.0)]), "empty"),
        (hosts_config("rs 0", &[("a:1", 1.0)]), "whitespace"),
        (ReplicaSetConfig::new("rs0", vec![]), "no members"),
        (hosts_config("rs0", &[("a:1", 1.0), ("a:1", 0.5)]), "duplicate member host"),
        (hosts_config("rs0", &[("a", 1.0)]), "not host:port"),
        (hosts_config("rs0", &[(":27017", 1.0)]), "empty hostname"),
        (hosts_config("rs0", &[("a:0", 1.0)]), "invalid port"),
        (hosts_config("rs0", &[("a:99999", 1.0)]), "invalid port"),
        (hosts_config("rs0", &[("a:1", -1.0)]), "outside"),
        (hosts_config("rs0", &[("a:1", 1001.0)]), "outside"),
        (hosts_config("rs0", &[("a:1", f64::NAN)]), "outside"),
        (hosts_config("rs0", &[("a:1", 0.0), ("b:1", 0.0)]), "nothing can become primary"),
    ];
    for (cfg, needle) in cases {
        match cfg.validate() {
            Err(e) => assert!(e.msg().contains(needle), "{:?}: {}", cfg, e),
            Ok(()) => panic!("accepted invalid config {:?}", cfg),
        }
    }
}

#[test]
fn test_validate_rejects_duplicate_ids() {
    let cfg = ReplicaSetConfig::new(
        "rs0",
        vec![MemberSpec::new(3, "a:1", 1.0), MemberSpec::new(3, "b:1", 1.0)],
    );
    assert!(cfg.validate().is_err());
}

#[test]
fn test_decode_get_config_reply() {
    // Trimmed from a real replSetGetConfig reply; the extra fields are ignored.
    let reply = doc! {
        "_id": "rs0",
        "version": 1,
        "term": 1,
        "protocolVersion": 1_i64,
        "members": [
            { "_id": 0, "host": "mongodb:27017", "arbiterOnly": false,
              "buildIndexes": true, "hidden": false, "priority": 1.0,
              "tags": {}, "secondaryDelaySecs": 0_i64, "votes": 1 },
            { "_id": 1, "host": "mongodb_secondary:27017", "arbiterOnly": false,
              "buildIndexes": true, "hidden": false, "priority": 0.5,
              "tags": {}, "secondaryDelaySecs": 0_i64, "votes": 1 },
        ],
        "settings": { "chainingAllowed": true },
    };
    let cfg: ReplicaSetConfig = match bson::from_document(reply) {
        Ok(cfg) => cfg,
        Err(e) => panic!("decode failed: {}", e),
    };
    assert_eq!(cfg, default_config());
}

#[test]
fn test_decode_get_status_reply() {
    let reply = doc! {
        "set": "rs0",
        "myState": 1,
        "term": 1_i64,
        "members": [
            { "_id": 0, "name": "mongodb:27017", "health": 1.0, "state": 1,
              "stateStr": "PRIMARY", "self": true },
            { "_id": 1, "name": "mongodb_secondary:27017", "health": 1.0, "state": 2,
              "stateStr": "SECONDARY" },
        ],
        "ok": 1.0,
    };
    let summary: SetSummary = match bson::from_document(reply) {
        Ok(s) => s,
        Err(e) => panic!("decode failed: {}", e),
    };
    assert_eq!(summary.set, "rs0");
    assert_eq!(summary.my_state, 1);
    assert_eq!(summary.members[1].id, MemberId(1));
    assert_eq!(summary.members[1].state_str, "SECONDARY");
}

#[test]
fn test_direct_uri() {
    assert_eq!(
        direct_uri("mongodb://mongodb"),
        "mongodb://mongodb/?directConnection=true"
    );
    assert_eq!(
        direct_uri("mongodb://mongodb:27017/"),
        "mongodb://mongodb:27017/?directConnection=true"
    );
    assert_eq!(
        direct_uri("mongodb://u:p@mongodb:27017/admin?authSource=admin"),
        "mongodb://u:p@mongodb:27017/admin?authSource=admin&directConnection=true"
    );
    assert_eq!(
        direct_uri("mongodb://mongodb/?directConnection=false"),
        "mongodb://mongodb/?directConnection=false"
    );
    assert_eq!(
        direct_uri("mongodb+srv://cluster.example.com"),
        "mongodb+srv://cluster.example.com"
    );
}

#[test]
fn test_direct_uri_option_name_is_case_insensitive() {
    assert_eq!(
        direct_uri("mongodb://mongodb/?directconnection=false"),
        "mongodb://mongodb/?directconnection=false"
    );
    assert_eq!(
        direct_uri("MONGODB+SRV://cluster.example.com"),
        "MONGODB+SRV://cluster.example.com"
    );
}

#[test]
fn test_direct_uri_leaves_seed_lists_alone() {
    assert_eq!(
        direct_uri("mongodb://a:27017,b:27017"),
        "mongodb://a:27017,b:27017"
    );
    assert_eq!(
        direct_uri("mongodb://a:27017,b:27017/admin?replicaSet=rs0"),
        "mongodb://a:27017,b:27017/admin?replicaSet=rs0"
    );
}

#[test]
fn test_member_id_overflow() {
    assert_eq!(member_id(0).ok(), Some(0));
    assert_eq!(member_id(i32::MAX as usize).ok(), Some(i32::MAX));
    assert!(member_id(i32::MAX as usize + 1).is_err());
}

fn command_failure(code: i32, code_name: &str) -> DriverError {
    let ce: CommandError = match bson::from_document(doc! {
        "code": code,
        "codeName": code_name,
        "errmsg": format!("{} from server", code_name),
    }) {
        Ok(ce) => ce,
        Err(e) => panic!("building command error failed: {}", e),
    };
    DriverError::from(ErrorKind::Command(ce))
}

fn network_failure() -> DriverError {
    DriverError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
}

#[test]
fn test_status_not_yet_initialized_is_uninitiated() {
    let r = classify_status(Err(command_failure(NOT_YET_INITIALIZED, "NotYetInitialized")));
    assert_eq!(r.ok(), Some(SetStatus::Uninitiated));
}

#[test]
fn test_status_without_repl_set_is_fatal() {
    match classify_status(Err(command_failure(NO_REPLICATION_ENABLED, "NoReplicationEnabled"))) {
        Err(e) => assert!(e.msg().contains("--replSet"), "{}", e),
        Ok(s) => panic!("no-replication node classified as {:?}", s),
    }
}

#[test]
fn test_status_other_failures_are_fatal() {
    assert!(classify_status(Err(command_failure(13, "Unauthorized"))).is_err());
    assert!(classify_status(Err(command_failure(11600, "InterruptedAtShutdown"))).is_err());
    assert!(classify_status(Err(network_failure())).is_err());
}

#[test]
fn test_status_reply_is_initiated() {
    let reply = doc! {
        "set": "rs0",
        "myState": 1,
        "members": [{ "_id": 0, "name": "mongodb:27017", "stateStr": "PRIMARY" }],
        "ok": 1.0,
    };
    match classify_status(Ok(reply)) {
        Ok(SetStatus::Initiated(summary)) => assert_eq!(summary.set, "rs0"),
        other => panic!("unexpected classification {:?}", other.ok()),
    }
}

#[test]
fn test_config_classification() {
    let r = classify_config(Err(command_failure(NOT_YET_INITIALIZED, "NotYetInitialized")));
    assert_eq!(r.ok(), Some(None));
    assert!(classify_config(Err(command_failure(13, "Unauthorized"))).is_err());
    assert!(classify_config(Err(command_failure(NO_REPLICATION_ENABLED, "NoReplicationEnabled"))).is_err());
    assert!(classify_config(Err(network_failure())).is_err());

    let reply = doc! {
        "config": {
            "_id": "rs0",
            "version": 1,
            "members": [
                { "_id": 0, "host": "mongodb:27017", "priority": 1.0 },
                { "_id": 1, "host": "mongodb_secondary:27017", "priority": 0.5 },
            ],
        },
        "ok": 1.0,
    };
    assert_eq!(classify_config(Ok(reply)).ok(), Some(Some(default_config())));
}
