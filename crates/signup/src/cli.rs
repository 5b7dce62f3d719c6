// src/cli.rs
use clap::{Parser, Subcommand};
use registration::FieldId;

#[derive(Parser, Debug)]
#[command(name = "signup", version, about = "Registration form for the terminal")]
pub struct Cli {
    /// Without a subcommand the interactive form is started.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Run interactive TUI
    Run {
        /// Override the spreadsheet endpoint from the configuration
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
        /// Keep the draft in memory only
        #[arg(long)]
        no_cache: bool,
    },
    /// Validate a single value the way the form does; exits non-zero when invalid
    Validate {
        /// fullName, mobileNumber, emailId, tradingviewId or terms
        field: FieldId,
        value: String,
    },
    /// Inspect or discard the cached draft
    Draft {
        #[command(subcommand)]
        action: DraftCmd,
    },
    /// Print the spreadsheet endpoint setup instructions
    Setup,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftCmd {
    Show,
    Clear,
}

impl Cli {
    /// The command to execute; a bare `signup` behaves like `signup run`.
    pub fn command(&self) -> Cmd {
        self.cmd.clone().unwrap_or(Cmd::Run {
            endpoint: None,
            no_cache: false,
        })
    }
}
