use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "learnhub")]
#[command(version)]
#[command(about = "Create a LearnHub account or sign in from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, short, global = true, env = "LEARNHUB_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the sign-up wizard (default)
    Signup,

    /// Sign in with an existing account
    Login {
        #[arg(long, short)]
        email: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show the signed-in user
    Whoami,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Signup)
    }
}
