// Replica-set bootstrapping.
//
// A mongod started with `--replSet` comes up as a member of nothing. Until
// somebody sends it `replSetInitiate` with a configuration naming the set and
// its members, it refuses reads and writes, and `replSetGetStatus` answers with
// a `NotYetInitialized` error. Initiation is a one-time, cluster-global event:
// once it succeeds the configuration lives in the cluster and changes to it
// go through `replSetReconfig`, never through a second initiate.
//
// The bootstrap sequence is:
//
//  1. Validate the desired configuration locally (names, unique ids and hosts,
//     priorities in range, at least one electable member). Nothing is sent to
//     the node if this fails.
//
//  2. Ask the node for its status and classify the answer: either a set is
//     running (we decode a short summary of it) or the node explicitly says
//     it has not been initiated. Any other failure (auth, no `--replSet`,
//     network) is fatal; treating it as "needs initiate" would send an
//     initiate to a node we don't understand.
//
//  3. If and only if the node is uninitiated, send the initiate. A failure here
//     is fatal and leaves the node as it was: initiate is a single atomic admin
//     command, so there is nothing to roll back.
//
// Running the sequence twice is harmless: the second run sees a running set at
// step 2 and stops. Two bootstrappers racing each other are serialized by the
// server, which rejects the second initiate.

#[cfg(test)]
mod test;

mod admin;
mod boot;
mod config;
mod mongo;
mod status;

pub use admin::ReplAdmin;
pub use boot::{ensure_initiated, Outcome};
pub use config::{validate_host, MemberId, MemberSpec, ReplicaSetConfig, MAX_PRIORITY};
pub use mongo::{direct_uri, MongoAdmin, NOT_YET_INITIALIZED, NO_REPLICATION_ENABLED};
pub use status::{MemberState, SetStatus, SetSummary};
