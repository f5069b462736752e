//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the session's filesystem and repository.

use chrono::{DateTime, Local, Utc};

use crate::config::{HELP_TEXT, VVP_TRACE};
use crate::core::VirtualFs;
use crate::core::git::Repository;
use crate::core::session::SessionConfig;
use crate::models::OutputLine;

use super::git::execute_git;
use super::{Action, Command, CommandResult};

/// Everything a command may read or change.
pub struct ExecContext<'a> {
    pub config: &'a SessionConfig,
    pub fs: &'a VirtualFs,
    pub repo: &'a mut Repository,
    /// A push has been handed to the host and has not resolved yet.
    pub push_in_flight: bool,
    pub now: DateTime<Utc>,
}

/// Execute a parsed command.
///
/// Output ends with one blank line unless the command's action says
/// otherwise (see [`Action::suppresses_spacer`]).
pub fn execute_command(cmd: Command, ctx: &mut ExecContext<'_>) -> CommandResult {
    let mut result = match cmd {
        Command::Help => CommandResult::output(HELP_TEXT.lines().map(OutputLine::text).collect()),
        Command::Ls => CommandResult::output(vec![OutputLine::text(ctx.fs.list().join("  "))]),
        Command::Pwd => CommandResult::output(vec![OutputLine::text(&ctx.config.home)]),
        Command::Clear => CommandResult::action(Action::ClearScreen),
        Command::Cat(path) => execute_cat(path, ctx.fs),
        Command::Vim(path) => execute_vim(path),
        Command::Nano(path) => CommandResult::output(vec![OutputLine::text(format!(
            "Use 'vim {}' for the integrated editor",
            path.as_deref().unwrap_or("filename")
        ))]),
        Command::Whoami => CommandResult::output(vec![OutputLine::text(&ctx.config.user)]),
        Command::Date => CommandResult::output(vec![OutputLine::text(
            ctx.now
                .with_timezone(&Local)
                .format("%a %b %d %Y %H:%M:%S GMT%z")
                .to_string(),
        )]),
        Command::Echo(text) => CommandResult::output(vec![OutputLine::text(text)]),
        Command::Iverilog { input, output } => execute_iverilog(input, &output),
        Command::Vvp(input) => match input {
            Some(_) => CommandResult::output(VVP_TRACE.lines().map(OutputLine::text).collect()),
            None => CommandResult::error("Error: No input file specified"),
        },
        Command::Gtkwave(file) => match file {
            Some(file) => CommandResult::output(vec![
                OutputLine::text(format!("Loading {}...", file)),
                OutputLine::text("GTKWave window opened (see Waveform tab)"),
            ]),
            None => CommandResult::error("Error: No VCD file specified"),
        },
        Command::Github => execute_github(ctx.repo),
        Command::Git(git) => execute_git(git, ctx),
        Command::Unknown(name) => CommandResult::error_with_hints(
            format!("Command not found: {}", name),
            ["Type \"help\" for available commands"],
        ),
    };

    let spacer = result
        .action
        .as_ref()
        .is_none_or(|action| !action.suppresses_spacer());
    if spacer {
        result.output.push(OutputLine::empty());
    }
    result
}

fn execute_cat(path: Option<String>, fs: &VirtualFs) -> CommandResult {
    let Some(path) = path else {
        return CommandResult::error("Error: No file specified");
    };
    match fs.read(&path) {
        Some(content) => CommandResult::output(content.split('\n').map(OutputLine::text).collect()),
        None => CommandResult::error(format!("cat: {}: No such file or directory", path)),
    }
}

fn execute_vim(path: Option<String>) -> CommandResult {
    match path {
        Some(path) => CommandResult::action(Action::OpenEditor(path)),
        None => CommandResult::error_with_hints("Error: No file specified", ["Usage: vim <filename>"]),
    }
}

fn execute_iverilog(input: Option<String>, output: &str) -> CommandResult {
    let Some(input) = input else {
        return CommandResult::error_with_hints(
            "Error: No input file specified",
            ["Usage: iverilog <file.v> -o <output>"],
        );
    };
    CommandResult::output(vec![
        OutputLine::text(format!("Compiling {}...", input)),
        OutputLine::text("Synthesis successful!"),
        OutputLine::text(format!("Output written to {}", output)),
    ])
}

fn execute_github(repo: &Repository) -> CommandResult {
    match repo.remote() {
        Some(link) => CommandResult::output(vec![
            OutputLine::success("✓ GitHub Connected"),
            OutputLine::text(format!("Repository: {}", link.repository_url())),
            OutputLine::text(format!("Username: {}", link.owner())),
        ]),
        None => CommandResult::output(vec![OutputLine::text(
            "GitHub not connected. Use \"git push\" to connect.",
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::remote::{Credential, RemoteLink};
    use crate::models::OutputLineData;

    struct Fixture {
        config: SessionConfig,
        fs: VirtualFs,
        repo: Repository,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SessionConfig::default();
            let fs = config.seed_fs();
            Self {
                config,
                fs,
                repo: Repository::default(),
            }
        }

        fn run(&mut self, name: &str, args: &[&str]) -> CommandResult {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            let mut ctx = ExecContext {
                config: &self.config,
                fs: &self.fs,
                repo: &mut self.repo,
                push_in_flight: false,
                now: Utc::now(),
            };
            execute_command(Command::parse(name, &args), &mut ctx)
        }
    }

    fn contents(result: &CommandResult) -> Vec<String> {
        result.output.iter().map(|l| l.content()).collect()
    }

    #[test]
    fn test_ls_joins_with_two_spaces() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("ls", &[])),
            vec!["counter.v  counter_tb.v  README.md  GIT_GUIDE.md", ""]
        );
    }

    #[test]
    fn test_pwd_and_whoami() {
        let mut f = Fixture::new();
        assert_eq!(contents(&f.run("pwd", &[]))[0], "/home/user/hdl-workspace");
        assert_eq!(contents(&f.run("whoami", &[]))[0], "user");
    }

    #[test]
    fn test_clear_has_no_output() {
        let mut f = Fixture::new();
        let result = f.run("clear", &[]);
        assert!(result.output.is_empty());
        assert_eq!(result.action, Some(Action::ClearScreen));
    }

    #[test]
    fn test_cat() {
        let mut f = Fixture::new();
        let result = f.run("cat", &["missingfile.v"]);
        assert!(result.output[0].is_error());
        assert_eq!(
            result.output[0].content(),
            "cat: missingfile.v: No such file or directory"
        );

        let result = f.run("cat", &["README.md"]);
        assert_eq!(result.output[0].content(), "# HDL Workspace");
        assert_eq!(result.output.last().map(|l| l.content()), Some(String::new()));

        assert_eq!(contents(&f.run("cat", &[]))[0], "Error: No file specified");
    }

    #[test]
    fn test_vim() {
        let mut f = Fixture::new();
        let result = f.run("vim", &["counter.v"]);
        assert!(result.output.is_empty());
        assert_eq!(result.action, Some(Action::OpenEditor("counter.v".into())));

        assert_eq!(
            contents(&f.run("vi", &[])),
            vec!["Error: No file specified", "Usage: vim <filename>", ""]
        );
    }

    #[test]
    fn test_nano_points_to_vim() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("nano", &["x.v"]))[0],
            "Use 'vim x.v' for the integrated editor"
        );
        assert_eq!(
            contents(&f.run("nano", &[]))[0],
            "Use 'vim filename' for the integrated editor"
        );
    }

    #[test]
    fn test_echo() {
        let mut f = Fixture::new();
        assert_eq!(contents(&f.run("echo", &["a", "b"])), vec!["a b", ""]);
    }

    #[test]
    fn test_unknown_command() {
        let mut f = Fixture::new();
        let result = f.run("make", &[]);
        assert_eq!(
            contents(&result),
            vec![
                "Command not found: make",
                "Type \"help\" for available commands",
                ""
            ]
        );
        assert!(result.output[0].is_error());
    }

    #[test]
    fn test_hdl_stubs() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("iverilog", &["counter.v", "-o", "counter.vvp"])),
            vec![
                "Compiling counter.v...",
                "Synthesis successful!",
                "Output written to counter.vvp",
                ""
            ]
        );
        assert_eq!(
            contents(&f.run("iverilog", &[]))[0],
            "Error: No input file specified"
        );

        let trace = contents(&f.run("vvp", &["counter.vvp"]));
        assert_eq!(trace[trace.len() - 2], "Simulation completed successfully");
        assert_eq!(contents(&f.run("vvp", &[]))[0], "Error: No input file specified");

        assert_eq!(
            contents(&f.run("gtkwave", &["counter.vcd"])),
            vec![
                "Loading counter.vcd...",
                "GTKWave window opened (see Waveform tab)",
                ""
            ]
        );
        assert_eq!(contents(&f.run("gtkwave", &[]))[0], "Error: No VCD file specified");
    }

    #[test]
    fn test_help_text() {
        let mut f = Fixture::new();
        let lines = contents(&f.run("help", &[]));
        assert_eq!(lines[0], "Available commands:");
        assert!(lines.iter().any(|l| l.contains("git push")));
    }

    #[test]
    fn test_github_status() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("github", &[]))[0],
            "GitHub not connected. Use \"git push\" to connect."
        );

        f.repo.set_remote(RemoteLink::new(
            Credential::new("tok", "ada", "hdl-workspace"),
            "https://github.com/ada/hdl-workspace",
        ));
        let result = f.run("github", &[]);
        assert!(matches!(result.output[0].data, OutputLineData::Success(_)));
        assert_eq!(
            contents(&result)[1..3],
            [
                "Repository: https://github.com/ada/hdl-workspace".to_string(),
                "Username: ada".to_string()
            ]
        );
    }

    #[test]
    fn test_git_flow_output() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("git", &["add", "."]))[0],
            "fatal: not a git repository (or any of the parent directories): .git"
        );
        assert_eq!(
            contents(&f.run("git", &["init"])),
            vec!["Initialized empty Git repository in ~/hdl-workspace/.git/", ""]
        );
        assert_eq!(contents(&f.run("git", &["add", "."])), vec![""]);

        let commit = contents(&f.run("git", &["commit", "-m", "first"]));
        assert!(commit[0].starts_with("[main "));
        assert!(commit[0].ends_with("] first"));
        assert_eq!(commit[1], " 4 file(s) changed");

        let status = contents(&f.run("git", &["status"]));
        assert_eq!(status[0], "On branch main");
        assert_eq!(status[2], "Untracked files:");
    }

    #[test]
    fn test_git_commit_usage() {
        let mut f = Fixture::new();
        f.run("git", &["init"]);
        f.run("git", &["add", "counter.v"]);
        assert_eq!(
            contents(&f.run("git", &["commit"])),
            vec![
                "error: no commit message given",
                "Usage: git commit -m \"commit message\"",
                ""
            ]
        );
    }

    #[test]
    fn test_git_add_without_pathspec() {
        let mut f = Fixture::new();
        f.run("git", &["init"]);
        assert_eq!(
            contents(&f.run("git", &["add"]))[0],
            "Nothing specified, nothing added."
        );
    }

    #[test]
    fn test_git_config_round_trip() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("git", &["config", "user.name", "Ada", "Lovelace"])),
            vec![""]
        );
        assert_eq!(
            contents(&f.run("git", &["config", "user.name"])),
            vec!["Ada Lovelace", ""]
        );
        assert_eq!(
            contents(&f.run("git", &["config", "--list"])),
            vec!["user.name=Ada Lovelace", "user.email=", ""]
        );
        assert_eq!(
            contents(&f.run("git", &["config", "name", "x"]))[0],
            "error: key does not contain a section: name"
        );
    }

    #[test]
    fn test_git_log() {
        let mut f = Fixture::new();
        f.run("git", &["init"]);
        assert_eq!(
            contents(&f.run("git", &["log"]))[0],
            "fatal: your current branch 'main' does not have any commits yet"
        );
        f.run("git", &["add", "."]);
        f.run("git", &["commit", "-m", "first"]);
        let log = contents(&f.run("git", &["log"]));
        assert!(log[0].starts_with("commit "));
        assert!(log[1].starts_with("Author: "));
        assert!(log[2].starts_with("Date:   "));
        assert_eq!(log[4], "    first");
    }

    #[test]
    fn test_git_push_without_remote_begins_link() {
        let mut f = Fixture::new();
        f.run("git", &["init"]);
        let result = f.run("git", &["push"]);
        assert_eq!(
            contents(&result),
            vec!["Setting up GitHub remote...", "Opening GitHub authentication...", ""]
        );
        assert_eq!(result.action, Some(Action::BeginLink));
    }

    #[test]
    fn test_git_push_rejected_without_commits() {
        let mut f = Fixture::new();
        f.run("git", &["init"]);
        f.repo.set_remote(RemoteLink::new(
            Credential::new("tok", "ada", "repo"),
            "https://github.com/ada/repo",
        ));
        let lines = contents(&f.run("git", &["push"]));
        assert_eq!(lines[0], "error: failed to push some refs");
        assert!(lines[1].starts_with("hint: "));
        assert!(lines[2].starts_with("hint: "));
    }

    #[test]
    fn test_git_unknown_and_bare() {
        let mut f = Fixture::new();
        assert_eq!(
            contents(&f.run("git", &["pull"]))[0],
            "git: 'pull' is not a git command. See 'git --help'."
        );
        assert_eq!(contents(&f.run("git", &[]))[0], "usage: git <command> [<args>]");
    }
}
