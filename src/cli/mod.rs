pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{process_export_command, process_show_command, ExportCommand, ShowCommand};
use tracing::level_filters::LevelFilter;

use crate::utils::{
    dir::{create_application_default_path, create_dir},
    logging::{enable_logging, CLI_PREFIX},
};

#[derive(Parser, Debug)]
#[command(name = "Dayjournal", version, long_about = None)]
#[command(about = "Turns activity tracking records into a daily journal", long_about = None)]
pub(crate) struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Print logs to the console")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory used for logs. By default $XDG_STATE_HOME/dayjournal or $HOME/.local/state/dayjournal"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Write journal pages into a directory")]
    Export {
        #[command(flatten)]
        command: ExportCommand,
    },
    #[command(about = "Print journal pages")]
    Show {
        #[command(flatten)]
        command: ShowCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, create_dir)?;
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    match args.commands {
        Commands::Export { command } => process_export_command(command).await,
        Commands::Show { command } => process_show_command(command).await,
    }
}
