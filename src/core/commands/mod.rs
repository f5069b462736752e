//! Command parsing and execution.
//!
//! This module provides:
//! - [`CommandKind`], the closed set of command names, resolved through a
//!   lookup table
//! - [`Command`], a parsed command with its operands
//! - [`CommandResult`] and [`Action`] for what execution produces
//! - [`execute_command`] to run a command against the session's state
//!
//! # Architecture
//!
//! Input is tokenized by the parser, the first word is looked up in
//! [`COMMAND_TABLE`], and the rest is parsed into [`Command`]. `git`
//! subcommands get their own [`GitCommand`] parser.

mod execute;
mod git;
mod result;

pub use execute::{ExecContext, execute_command};
pub use git::{ConfigArgs, GitCommand};
pub use result::{Action, CommandResult};

use crate::config::DEFAULT_IVERILOG_OUTPUT;

// =============================================================================
// Command Kind
// =============================================================================

/// Every command the interpreter knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Ls,
    Pwd,
    Clear,
    Cat,
    Vim,
    Nano,
    Whoami,
    Date,
    Echo,
    Iverilog,
    Vvp,
    Gtkwave,
    Github,
    Git,
}

/// Token to kind. Matching is exact and case-sensitive.
pub const COMMAND_TABLE: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("ls", CommandKind::Ls),
    ("pwd", CommandKind::Pwd),
    ("clear", CommandKind::Clear),
    ("cat", CommandKind::Cat),
    ("vim", CommandKind::Vim),
    ("vi", CommandKind::Vim),
    ("nano", CommandKind::Nano),
    ("whoami", CommandKind::Whoami),
    ("date", CommandKind::Date),
    ("echo", CommandKind::Echo),
    ("iverilog", CommandKind::Iverilog),
    ("vvp", CommandKind::Vvp),
    ("gtkwave", CommandKind::Gtkwave),
    ("github", CommandKind::Github),
    ("git", CommandKind::Git),
];

impl CommandKind {
    pub fn lookup(name: &str) -> Option<Self> {
        COMMAND_TABLE
            .iter()
            .find(|(token, _)| *token == name)
            .map(|&(_, kind)| kind)
    }
}

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed terminal command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Ls,
    Pwd,
    Clear,
    Cat(Option<String>),
    Vim(Option<String>),
    Nano(Option<String>),
    Whoami,
    Date,
    Echo(String),
    Iverilog {
        input: Option<String>,
        output: String,
    },
    Vvp(Option<String>),
    Gtkwave(Option<String>),
    Github,
    Git(GitCommand),
    Unknown(String),
}

impl Command {
    /// Parse command from name and arguments.
    pub fn parse(name: &str, args: &[String]) -> Self {
        let Some(kind) = CommandKind::lookup(name) else {
            return Self::Unknown(name.to_string());
        };
        let first = || args.first().cloned();

        match kind {
            CommandKind::Help => Self::Help,
            CommandKind::Ls => Self::Ls,
            CommandKind::Pwd => Self::Pwd,
            CommandKind::Clear => Self::Clear,
            CommandKind::Cat => Self::Cat(first()),
            CommandKind::Vim => Self::Vim(first()),
            CommandKind::Nano => Self::Nano(first()),
            CommandKind::Whoami => Self::Whoami,
            CommandKind::Date => Self::Date,
            CommandKind::Echo => Self::Echo(args.join(" ")),
            CommandKind::Iverilog => parse_iverilog(args),
            CommandKind::Vvp => Self::Vvp(first()),
            CommandKind::Gtkwave => Self::Gtkwave(first()),
            CommandKind::Github => Self::Github,
            CommandKind::Git => Self::Git(GitCommand::parse(args)),
        }
    }
}

/// `iverilog <file> [-o <out>]`, flag and operand in either order.
fn parse_iverilog(args: &[String]) -> Command {
    let mut input = None;
    let mut output = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-o" {
            output = iter.next().cloned();
        } else if input.is_none() {
            input = Some(arg.clone());
        }
    }
    Command::Iverilog {
        input,
        output: output.unwrap_or_else(|| DEFAULT_IVERILOG_OUTPUT.to_string()),
    }
}

// =============================================================================
// Tests
// =============================================================================
