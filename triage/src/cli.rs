use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "triage", version, about = "Consultation desk for the multi-agent clinic")]
pub struct Cli {
    /// Configuration file layered over the global and local ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Raise log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hold a consultation in the terminal
    Chat(ChatArgs),
    /// Browse archived interaction logs
    Logs {
        #[command(subcommand)]
        command: LogsCommands,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct ChatArgs {
    /// Rewrite this HTML file with the chat page after every turn
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Print the interaction log after every reply
    #[arg(long)]
    pub show_log: bool,
}

#[derive(Subcommand)]
pub enum LogsCommands {
    /// List archived consultations, newest first
    List(LogsListArgs),
    /// Show the interaction log of one consultation
    Show(LogsShowArgs),
}

#[derive(Args)]
pub struct LogsListArgs {
    /// Also write the log browser page to this HTML file
    #[arg(long)]
    pub html: Option<PathBuf>,
}

#[derive(Args)]
pub struct LogsShowArgs {
    pub consultation_id: String,
    /// Also write the log browser page to this HTML file
    #[arg(long)]
    pub html: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration
    Show,
}
