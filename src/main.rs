use std::path::PathBuf;

use clap::{Parser, Subcommand};

use warden::error::Result;
use warden::output::{self, Format};
use warden::store::coordinator::Coordinator;
use warden::store::status::{StatusBoard, context_fingerprint};
use warden::{agent, store};

#[derive(Parser)]
#[command(
    name = "warden",
    version,
    about = "Advisory file-lock coordinator for agents sharing a working tree"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Coordination root (default: nearest ancestor containing .warden/, else cwd)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lock files for an (agent, task) pair; fails whole request on any conflict
    Acquire {
        /// Agent id (default: $WARDEN_AGENT, else generated)
        #[arg(long)]
        agent: Option<String>,
        /// Task id the locks belong to
        #[arg(long)]
        task: String,
        /// Files to lock
        files: Vec<String>,
    },
    /// Release every lock held by an (agent, task) pair
    Release {
        #[arg(long)]
        agent: Option<String>,
        #[arg(long)]
        task: String,
    },
    /// List active locks
    Locks,
    /// Preview whether an acquisition would succeed, without acquiring
    Check {
        #[arg(long)]
        agent: Option<String>,
        #[arg(long)]
        task: String,
        files: Vec<String>,
    },
    /// Agent status board (informational, not enforced)
    Status {
        #[command(subcommand)]
        command: StatusCommands,
    },
}

#[derive(Subcommand)]
enum StatusCommands {
    /// Declare this agent's focus, replacing any prior declaration
    Set {
        #[arg(long)]
        agent: Option<String>,
        /// What the agent is currently working on
        #[arg(long)]
        focus: String,
        /// Explicit configuration fingerprint
        #[arg(long, conflicts_with = "fingerprint")]
        context_hash: Option<String>,
        /// Compute the fingerprint from these paths instead
        #[arg(long = "fingerprint", value_name = "PATH")]
        fingerprint: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List declared statuses, ordered by agent id
    List,
}

fn resolve_agent(explicit: Option<String>) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .or_else(agent::resolve_agent)
        .unwrap_or_else(agent::generated_fallback)
}

/// Returns `false` for blocked/conflicting outcomes, which map to exit
/// code 1 without being errors.
fn run(cli: Cli, format: Format) -> Result<bool> {
    let root = match cli.root {
        Some(root) => root,
        None => store::find_root()?,
    };

    match cli.command {
        Commands::Acquire { agent, task, files } => {
            let coord = Coordinator::open(&root);
            let outcome = coord.acquire(&resolve_agent(agent), &task, &files)?;
            output::print_acquire(&outcome, format)?;
            Ok(outcome.is_acquired())
        }
        Commands::Release { agent, task } => {
            let coord = Coordinator::open(&root);
            let released = coord.release(&resolve_agent(agent), &task)?;
            output::print_released(released, format)?;
            Ok(true)
        }
        Commands::Locks => {
            let coord = Coordinator::open(&root);
            output::print_locks(&coord.active_locks(), format)?;
            Ok(true)
        }
        Commands::Check { agent, task, files } => {
            let coord = Coordinator::open(&root);
            let conflicts = coord.detect_conflicts(&resolve_agent(agent), &task, &files)?;
            output::print_conflicts(&conflicts, format)?;
            Ok(conflicts.is_empty())
        }
        Commands::Status { command } => match command {
            StatusCommands::Set {
                agent,
                focus,
                context_hash,
                fingerprint,
                notes,
            } => {
                let hash = match context_hash {
                    Some(hash) => hash,
                    None => context_fingerprint(&fingerprint)?,
                };
                let board = StatusBoard::open(&root);
                let status =
                    board.update(&resolve_agent(agent), &focus, &hash, notes.as_deref())?;
                output::print_status(&status, format)?;
                Ok(true)
            }
            StatusCommands::List => {
                let board = StatusBoard::open(&root);
                output::print_statuses(&board.list(), format)?;
                Ok(true)
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    match run(cli, format) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            match format {
                Format::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "error": e.code(),
                            "message": e.to_string()
                        })
                    );
                }
                _ => eprintln!("error: {e}"),
            }
            std::process::exit(1);
        }
    }
}
