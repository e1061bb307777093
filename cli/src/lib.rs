use std::path::PathBuf;

use acl::AclCapabilities;
use clap::{Parser, Subcommand};
use utils::app_config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "permscan")]
#[command(about = "NTFS folder permission scanner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set the logging level (debug, info)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan folder permissions
    Scan {
        /// Scan ID for tracking
        #[arg(short, long)]
        id: Option<String>,

        /// Directories to scan
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Scan every nested subdirectory, not just the roots
        #[arg(short, long)]
        recursive: bool,

        /// Keep only entries whose path, identity or permission
        /// contains this text (case-insensitive)
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,

        /// Keep only entries for Active Directory identities
        #[arg(long)]
        ad_only: bool,

        /// Write the results to a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Write the results to a JSON file
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Report which ACL backends are available on this host
    Probe,
}

pub async fn cli_match(capabilities: AclCapabilities) -> utils::error::Result<()> {
    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        AppConfig::set("log.level", level)?;
    }

    // Execute the subcommand
    match &cli.command {
        Commands::Scan {
            id,
            paths,
            recursive,
            filter,
            ad_only,
            csv,
            json,
        } => {
            commands::scan_cmd(
                id.clone(),
                paths.clone(),
                *recursive,
                filter.clone(),
                *ad_only,
                csv.clone(),
                json.clone(),
                capabilities,
            )
            .await?
        }
        Commands::Probe => commands::probe_cmd(capabilities).await?,
    }

    Ok(())
}
