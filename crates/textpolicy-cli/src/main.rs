//! `textpolicy`: check and normalize casbin policy text.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use textpolicy_cli::commands::{self, AccessRequest};
use textpolicy_cli::config::CliConfig;
use textpolicy_cli::observability;

// Exit code for a request the policy denies.
const DENIED_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "textpolicy")]
#[command(about = "Load casbin policy text through the text adapter")]
struct Args {
    /// Casbin model conf path (defaults to the embedded RBAC model)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Policy text path, `-` reads stdin
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enforce one request; exits 0 when allowed, 2 when denied
    Check {
        subject: String,
        object: String,
        action: String,
    },
    /// Print the policy text as the adapter saves it
    Normalize {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the casbin model conf in use
    Model,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = CliConfig::from_env_or_yaml()?.with_overrides(args.model, args.policy);
    observability::init_tracing(&config.log_level);

    match args.command {
        Command::Model => {
            print!("{}", commands::model_conf(config.model_path.as_deref()).await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check {
            subject,
            object,
            action,
        } => {
            let (model, text) = commands::load_inputs(&config).await?;
            let request = AccessRequest {
                subject,
                object,
                action,
            };
            let allowed = commands::check(model, text, &request).await?;
            if allowed {
                println!("allow");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("deny");
                Ok(ExitCode::from(DENIED_EXIT_CODE))
            }
        }
        Command::Normalize { output } => {
            let (mut model, text) = commands::load_inputs(&config).await?;
            let normalized = commands::normalize(&mut model, text)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{normalized}\n"))
                        .await
                        .with_context(|| format!("write normalized policy: {}", path.display()))?;
                    tracing::info!(path = %path.display(), "normalized policy written");
                }
                None => println!("{normalized}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
