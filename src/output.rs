use clap::ValueEnum;
use colored::Colorize;

use crate::error::Result;
use crate::model::{AgentStatus, LockRecord};
use crate::store::coordinator::AcquireOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

pub fn print_acquire(outcome: &AcquireOutcome, format: Format) -> Result<()> {
    match outcome {
        AcquireOutcome::Acquired(granted) => match format {
            Format::Json => println!(
                "{}",
                serde_json::json!({"acquired": true, "granted": granted})
            ),
            Format::Pretty => {
                if granted.is_empty() {
                    println!("{}", "Already held; nothing to do.".dimmed());
                } else {
                    println!("Acquired {} lock(s):", granted.len().to_string().bold());
                    for rec in granted {
                        println!("  {} {}", rec.file.green(), format_owner(rec).dimmed());
                    }
                }
            }
            Format::Minimal => println!("ok"),
        },
        AcquireOutcome::Blocked(blockers) => match format {
            Format::Json => println!(
                "{}",
                serde_json::json!({"acquired": false, "conflicts": blockers})
            ),
            Format::Pretty => {
                println!("{}", "Blocked by existing locks:".red().bold());
                for rec in blockers {
                    println!("  {} {}", rec.file.red(), format_owner(rec).dimmed());
                }
            }
            Format::Minimal => {
                for rec in blockers {
                    println!("{}", rec.file);
                }
            }
        },
    }
    Ok(())
}

pub fn print_locks(locks: &[LockRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(locks)?),
        Format::Pretty => {
            if locks.is_empty() {
                println!("{}", "No active locks.".dimmed());
            } else {
                for rec in locks {
                    println!(
                        "{} {} {}",
                        rec.file.cyan(),
                        format_owner(rec),
                        format!("since {}", rec.locked_at.format("%Y-%m-%d %H:%M:%S UTC"))
                            .dimmed()
                    );
                }
            }
        }
        Format::Minimal => {
            for rec in locks {
                println!("{}\t{}\t{}", rec.file, rec.agent_id, rec.task_id);
            }
        }
    }
    Ok(())
}

pub fn print_conflicts(conflicts: &[LockRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(conflicts)?),
        Format::Pretty => {
            if conflicts.is_empty() {
                println!("{}", "No conflicts; acquisition would succeed.".green());
            } else {
                println!("{}", "Conflicts:".red().bold());
                for rec in conflicts {
                    println!("  {} {}", rec.file.red(), format_owner(rec).dimmed());
                }
            }
        }
        Format::Minimal => {
            for rec in conflicts {
                println!("{}", rec.file);
            }
        }
    }
    Ok(())
}

pub fn print_released(count: usize, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::json!({"released": count})),
        Format::Pretty => {
            if count == 0 {
                println!("{}", "Nothing was held.".dimmed());
            } else {
                println!("Released {} lock(s).", count.to_string().bold());
            }
        }
        Format::Minimal => println!("{count}"),
    }
    Ok(())
}

pub fn print_status(status: &AgentStatus, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(status)?),
        Format::Pretty => {
            println!("{} {}", format!("[{}]", status.agent).cyan().bold(), status.focus);
            println!("  {} {}", "context:".dimmed(), status.context_hash);
            if let Some(ref notes) = status.notes {
                println!("  {} {}", "notes:".dimmed(), notes);
            }
        }
        Format::Minimal => println!("{}", status.agent),
    }
    Ok(())
}

pub fn print_statuses(statuses: &[AgentStatus], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(statuses)?),
        Format::Pretty => {
            if statuses.is_empty() {
                println!("{}", "No agent statuses declared.".dimmed());
            } else {
                for status in statuses {
                    print_status(status, Format::Pretty)?;
                }
            }
        }
        Format::Minimal => {
            for status in statuses {
                println!("{}\t{}", status.agent, status.focus);
            }
        }
    }
    Ok(())
}

fn format_owner(rec: &LockRecord) -> String {
    format!("({}/{})", rec.agent_id, rec.task_id)
}
