use rsinit_admin::{Command, Settings};
use rsinit_base::Result;
use rsinit_repl::{ensure_initiated, MongoAdmin, Outcome, ReplAdmin, ReplicaSetConfig, SetStatus};
use tracing::info;


pub fn run(settings: &Settings) -> Result<()> {
    let config = settings.replica_set_config()?;
    match settings.command() {
        Command::Plan => {
            config.validate()?;
            print!("{}", render_plan(&config)?);
        }
        Command::Ensure => {
            let admin = MongoAdmin::connect(&settings.uri)?;
            match ensure_initiated(&admin, &config)? {
                Outcome::Initiated => info!(target: "rsinit", "done, replica set initiated"),
                Outcome::AlreadyInitiated(_) => info!(target: "rsinit", "done, nothing to do"),
            }
        }
        Command::Status => {
            let admin = MongoAdmin::connect(&settings.uri)?;
            print!("{}", report_status(&admin)?);
        }
    }
    Ok(())
}

pub fn render_plan(config: &ReplicaSetConfig) -> Result<String> {
    let body = config.to_document()?;
    Ok(format!("replSetInitiate: {}\n", body))
}

pub fn report_status<A: ReplAdmin>(admin: &A) -> Result<String> {
    let status = admin.status()?;
    let config = if status.is_initiated() {
        admin.config()?
    } else {
        None
    };
    Ok(render_status(&status, config.as_ref()))
}

pub fn render_status(status: &SetStatus, config: Option<&ReplicaSetConfig>) -> String {
    match status {
        SetStatus::Uninitiated => "replica set: not initiated\n".to_string(),
        SetStatus::Initiated(summary) => {
            let mut out = format!("replica set: {}\n", summary.set);
            for m in summary.members.iter() {
                let priority = config
                    .and_then(|c| c.member(m.id))
                    .map(|spec| spec.priority.0.to_string())
                    .unwrap_or_else(|| "?".to_string());
                out.push_str(&format!(
                    "  {:>3}  {:<32} {:<10} priority {}\n",
                    m.id.0, m.name, m.state_str, priority
                ));
            }
            out
        }
    }
}
