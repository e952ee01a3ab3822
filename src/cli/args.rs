//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report bare strings in template documents
//! - `fix`: Replace bare strings with translation helper calls
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Fix(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the lint commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Locale of the translation catalog (overrides config file)
    #[arg(long)]
    pub locale: Option<String>,

    /// Project root directory (defaults to the config file's directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Template documents (*.ast.json) or directories to check
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    /// Template documents (*.ast.json) or directories to fix
    pub paths: Vec<PathBuf>,

    /// Actually rewrite documents and update the catalog (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report untranslated text in template documents
    Check(CheckCommand),
    /// Replace untranslated text with translation helper calls
    Fix(FixCommand),
    /// Initialize a new .barestringsrc.json configuration file
    Init,
}
