use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Messenger webhook server
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Translate a message exactly as the bot would reply to it
    Translate {
        /// Message text
        text: String,

        /// Also print classification, target language and provider
        #[arg(long)]
        explain: bool,
    },

    /// Show script classification and target language without calling any provider
    Detect {
        /// Message text
        text: String,
    },

    /// Write the default configuration file
    InitConfig {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
