use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gk_core::{GroupEngine, KeyError, SyncRequestInfo};
use gk_proto::address::validate_pubkey;

mod config;
mod paths;
mod snapshot;

use crate::config::load_config;
use crate::snapshot::load_snapshot;

#[derive(Parser, Debug)]
#[command(name = "gk")]
#[command(author, version, about = "Group membership and key resolution", long_about = None)]
struct Cli {
    /// State snapshot (JSON)
    #[arg(long)]
    state: PathBuf,

    /// Engine config (JSON); defaults to the platform config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local user's pubkey; overrides the one in the snapshot
    #[arg(long)]
    pubkey: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Access policy of a group
    Access { address: String },

    /// Current user's membership level in a group
    Membership { address: String },

    /// Whether a new message to the group goes out privately
    SendPrivately {
        address: String,
        /// Member's choice, used by hybrid groups
        #[arg(long)]
        prefer_private: bool,
    },

    /// Private key able to decrypt an envelope tagged with these recipients
    DecryptKey {
        #[arg(required = true)]
        recipients: Vec<String>,
    },

    /// Resync window, recipients and relays; all groups when no address
    PlanSync { address: Option<String> },

    /// Shareable reference for a group
    Naddr { address: String },

    /// Groups offered as posting targets
    Options { defaults: Vec<String> },
}

#[derive(Serialize)]
struct PlanOutput {
    #[serde(flatten)]
    plan: SyncRequestInfo,
    since_utc: Option<String>,
}

#[derive(Serialize)]
struct KeyOutput<'a> {
    privkey: &'a str,
}

/// `--pubkey` wins over the snapshot's. Either way it must be a well-formed
/// pubkey, since it lands in every sync plan's recipients.
fn local_pubkey(flag: Option<String>, from_snapshot: Option<String>) -> Result<String> {
    let pubkey = flag
        .or(from_snapshot)
        .ok_or_else(|| anyhow!("no pubkey: pass --pubkey or set it in the snapshot"))?;
    validate_pubkey(&pubkey).context("local pubkey")?;
    Ok(pubkey)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let (snapshot_pubkey, snapshot) = load_snapshot(&cli.state)?;
    let pubkey = local_pubkey(cli.pubkey, snapshot_pubkey)?;

    let engine = GroupEngine::from_snapshot(&pubkey, &snapshot).with_config(config);

    let output = match cli.command {
        Commands::Access { address } => serde_json::to_value(engine.resolve_access(&address))?,
        Commands::Membership { address } => {
            serde_json::to_value(engine.resolve_membership(&address))?
        }
        Commands::SendPrivately {
            address,
            prefer_private,
        } => serde_json::to_value(engine.should_send_privately(&address, prefer_private))?,
        Commands::DecryptKey { recipients } => {
            match engine.select_decryption_key(recipients.iter().map(String::as_str)) {
                Ok(key) => serde_json::to_value(KeyOutput {
                    privkey: key.expose_secret(),
                })?,
                Err(KeyError::NoUsableKey) => {
                    info!("no usable key held for these recipients yet");
                    serde_json::Value::Null
                }
            }
        }
        Commands::PlanSync { address } => {
            let plan = engine.plan_sync(address.as_deref());
            let since_utc = i64::try_from(plan.since)
                .ok()
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                .map(|dt| dt.to_rfc3339());
            serde_json::to_value(PlanOutput { plan, since_utc })?
        }
        Commands::Naddr { address } => {
            let group = snapshot.groups.get_or_stub(&address)?;
            serde_json::to_value(group.naddr()?)?
        }
        Commands::Options { defaults } => serde_json::to_value(engine.group_options(&defaults))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
