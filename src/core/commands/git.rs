//! `git` subcommands: argument parsing and terminal output.
//!
//! The repository model decides what happens; this module only turns
//! arguments into calls and results into lines.

use crate::core::error::GitError;
use crate::core::git::{AddTarget, PushPlan, StatusReport};
use crate::models::OutputLine;

use super::{Action, CommandResult, ExecContext};

const CONFIG_USAGE: &str = "usage: git config [--list] <name> [<value>]";
const GIT_USAGE: &str = "usage: git <command> [<args>]";

/// Operands of `git config`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigArgs {
    List,
    Get(String),
    Set(String, String),
    Missing,
}

/// Parsed `git` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GitCommand {
    Init,
    Config(ConfigArgs),
    /// `None` when no pathspec was given.
    Add(Option<AddTarget>),
    Status,
    /// `None` without `-m`; `Some("")` for `-m` with nothing after it.
    Commit {
        message: Option<String>,
    },
    Log,
    Push,
    /// Bare `git`.
    Usage,
    Unknown(String),
}

impl GitCommand {
    pub fn parse(args: &[String]) -> Self {
        let Some((sub, rest)) = args.split_first() else {
            return Self::Usage;
        };
        match sub.as_str() {
            "init" => Self::Init,
            "config" => Self::Config(parse_config(rest)),
            "add" => Self::Add(parse_add(rest)),
            "status" => Self::Status,
            "commit" => Self::Commit {
                message: parse_commit_message(rest),
            },
            "log" => Self::Log,
            "push" => Self::Push,
            other => Self::Unknown(other.to_string()),
        }
    }
}

fn parse_config(args: &[String]) -> ConfigArgs {
    match args {
        [] => ConfigArgs::Missing,
        [flag, ..] if flag == "--list" || flag == "-l" => ConfigArgs::List,
        [key] => ConfigArgs::Get(key.clone()),
        [key, value @ ..] => ConfigArgs::Set(key.clone(), value.join(" ")),
    }
}

fn parse_add(args: &[String]) -> Option<AddTarget> {
    if args.is_empty() {
        None
    } else if args.iter().any(|a| a == ".") {
        Some(AddTarget::All)
    } else {
        Some(AddTarget::Paths(args.to_vec()))
    }
}

/// Everything after `-m`, joined by spaces.
fn parse_commit_message(args: &[String]) -> Option<String> {
    let index = args.iter().position(|a| a == "-m" || a == "--message")?;
    Some(args[index + 1..].join(" "))
}

// =============================================================================
// Execution
// =============================================================================

pub(super) fn execute_git(cmd: GitCommand, ctx: &mut ExecContext<'_>) -> CommandResult {
    tracing::debug!(?cmd, "git");
    let result = match cmd {
        GitCommand::Init => {
            ctx.repo.init();
            Ok(CommandResult::output(vec![OutputLine::text(format!(
                "Initialized empty Git repository in {}/.git/",
                ctx.config.directory
            ))]))
        }
        GitCommand::Config(args) => config(args, ctx),
        GitCommand::Add(target) => add(target, ctx),
        GitCommand::Status => ctx
            .repo
            .status(ctx.fs)
            .map(|report| CommandResult::output(status_lines(&report))),
        GitCommand::Commit { message } => commit(message, ctx),
        GitCommand::Log => log(ctx),
        GitCommand::Push => push(ctx),
        GitCommand::Usage => Ok(CommandResult::output(vec![OutputLine::text(GIT_USAGE)])),
        GitCommand::Unknown(sub) => Err(GitError::UnknownSubcommand(sub)),
    };
    result.unwrap_or_else(CommandResult::from)
}

fn config(args: ConfigArgs, ctx: &mut ExecContext<'_>) -> Result<CommandResult, GitError> {
    match args {
        ConfigArgs::Missing => Ok(CommandResult::output(vec![OutputLine::text(CONFIG_USAGE)])),
        ConfigArgs::List => Ok(CommandResult::output(
            ctx.repo
                .config_list()
                .into_iter()
                .map(|(k, v)| OutputLine::text(format!("{}={}", k, v)))
                .collect(),
        )),
        ConfigArgs::Get(key) => {
            let value = ctx.repo.config_get(&key)?;
            Ok(CommandResult::output(vec![OutputLine::text(value)]))
        }
        ConfigArgs::Set(key, value) => {
            ctx.repo.config_set(&key, &value)?;
            Ok(CommandResult::empty())
        }
    }
}

fn add(target: Option<AddTarget>, ctx: &mut ExecContext<'_>) -> Result<CommandResult, GitError> {
    let Some(target) = target else {
        // Precondition still comes first
        if !ctx.repo.is_initialized() {
            return Err(GitError::NotARepository);
        }
        return Ok(CommandResult::output(vec![
            OutputLine::text("Nothing specified, nothing added."),
            OutputLine::text("hint: Maybe you wanted to say 'git add .'?"),
        ]));
    };
    ctx.repo.add(ctx.fs, &target)?;
    Ok(CommandResult::empty())
}

fn status_lines(report: &StatusReport) -> Vec<OutputLine> {
    let mut lines = vec![
        OutputLine::text(format!("On branch {}", report.branch)),
        OutputLine::empty(),
    ];
    if !report.staged.is_empty() {
        lines.push(OutputLine::text("Changes to be committed:"));
        lines.push(OutputLine::text(
            "  (use \"git restore --staged <file>...\" to unstage)",
        ));
        lines.extend(
            report
                .staged
                .iter()
                .map(|p| OutputLine::success(format!("\tnew file:   {}", p))),
        );
        lines.push(OutputLine::empty());
    }
    if !report.untracked.is_empty() {
        lines.push(OutputLine::text("Untracked files:"));
        lines.push(OutputLine::text(
            "  (use \"git add <file>...\" to include in what will be committed)",
        ));
        lines.extend(
            report
                .untracked
                .iter()
                .map(|p| OutputLine::error(format!("\t{}", p))),
        );
        lines.push(OutputLine::empty());
    }
    lines
}

fn commit(message: Option<String>, ctx: &mut ExecContext<'_>) -> Result<CommandResult, GitError> {
    let summary = ctx.repo.commit(message.as_deref(), ctx.now)?;
    Ok(CommandResult::output(vec![
        OutputLine::text(format!(
            "[{} {}] {}",
            summary.branch, summary.hash, summary.message
        )),
        OutputLine::text(format!(" {} file(s) changed", summary.files_changed)),
    ]))
}

fn log(ctx: &mut ExecContext<'_>) -> Result<CommandResult, GitError> {
    let mut lines = Vec::new();
    for (i, commit) in ctx.repo.log()?.into_iter().enumerate() {
        if i > 0 {
            lines.push(OutputLine::empty());
        }
        lines.push(OutputLine::info(format!("commit {}", commit.hash)));
        lines.push(OutputLine::text(format!("Author: {}", commit.author)));
        lines.push(OutputLine::text(format!("Date:   {}", commit.date_line())));
        lines.push(OutputLine::empty());
        lines.push(OutputLine::text(format!("    {}", commit.message)));
    }
    Ok(CommandResult::output(lines))
}

fn push(ctx: &mut ExecContext<'_>) -> Result<CommandResult, GitError> {
    if ctx.repo.is_initialized() && ctx.push_in_flight {
        return Err(GitError::PushInProgress);
    }
    match ctx.repo.prepare_push(ctx.fs)? {
        PushPlan::NeedsRemote => Ok(CommandResult::output(vec![
            OutputLine::text("Setting up GitHub remote..."),
            OutputLine::text("Opening GitHub authentication..."),
        ])
        .with_action(Action::BeginLink)),
        PushPlan::Ready(task) => {
            let url = task.link.repository_url().to_string();
            Ok(CommandResult::output(vec![
                OutputLine::text("Enumerating objects..."),
                OutputLine::text("Counting objects: 100% done."),
                OutputLine::text("Compressing objects: 100% done."),
                OutputLine::text("Writing objects: 100% done."),
                OutputLine::info(format!("Pushing to {}...", url)),
            ])
            .with_action(Action::StartPush(task)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_git() {
        assert_eq!(GitCommand::parse(&[]), GitCommand::Usage);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert_eq!(
            GitCommand::parse(&args(&["rebase"])),
            GitCommand::Unknown("rebase".into())
        );
    }

    #[test]
    fn test_parse_config() {
        assert_eq!(
            GitCommand::parse(&args(&["config", "user.name", "Ada", "Lovelace"])),
            GitCommand::Config(ConfigArgs::Set("user.name".into(), "Ada Lovelace".into()))
        );
        assert_eq!(
            GitCommand::parse(&args(&["config", "user.email"])),
            GitCommand::Config(ConfigArgs::Get("user.email".into()))
        );
        assert_eq!(
            GitCommand::parse(&args(&["config", "--list"])),
            GitCommand::Config(ConfigArgs::List)
        );
        assert_eq!(
            GitCommand::parse(&args(&["config"])),
            GitCommand::Config(ConfigArgs::Missing)
        );
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(GitCommand::parse(&args(&["add"])), GitCommand::Add(None));
        assert_eq!(
            GitCommand::parse(&args(&["add", "."])),
            GitCommand::Add(Some(AddTarget::All))
        );
        assert_eq!(
            GitCommand::parse(&args(&["add", "a.v", "b.v"])),
            GitCommand::Add(Some(AddTarget::Paths(args(&["a.v", "b.v"]))))
        );
    }

    #[test]
    fn test_parse_commit_message() {
        assert_eq!(
            GitCommand::parse(&args(&["commit", "-m", "first", "commit"])),
            GitCommand::Commit {
                message: Some("first commit".into())
            }
        );
        assert_eq!(
            GitCommand::parse(&args(&["commit", "-m"])),
            GitCommand::Commit {
                message: Some(String::new())
            }
        );
        assert_eq!(
            GitCommand::parse(&args(&["commit"])),
            GitCommand::Commit { message: None }
        );
    }

    #[test]
    fn test_status_lines_sections() {
        let report = StatusReport {
            branch: "main".into(),
            staged: vec!["a.v".into()],
            untracked: vec![],
        };
        let lines = status_lines(&report);
        let content: Vec<_> = lines.iter().map(|l| l.content()).collect();
        assert_eq!(
            content,
            vec![
                "On branch main",
                "",
                "Changes to be committed:",
                "  (use \"git restore --staged <file>...\" to unstage)",
                "\tnew file:   a.v",
                "",
            ]
        );
    }

    #[test]
    fn test_status_untracked_are_error_lines() {
        let report = StatusReport {
            branch: "main".into(),
            staged: vec![],
            untracked: vec!["b.v".into()],
        };
        let lines = status_lines(&report);
        assert!(lines[4].is_error());
        assert_eq!(lines[4].content(), "\tb.v");
    }
}
