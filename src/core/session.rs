//! The session: one terminal, its workspace and its repository.
//!
//! [`Session`] owns every piece of state and routes each keystroke to
//! whichever component has focus. It never blocks: work that has to wait
//! on the network comes back to the host as an [`Effect`], and the host
//! reports the outcome through [`Session::complete_push`] or
//! [`Session::complete_link`].

use chrono::Utc;

use crate::config::{
    APP_NAME, BANNER, DEFAULT_BRANCH, MAX_COMMAND_HISTORY, MAX_TERMINAL_HISTORY, QUICK_START,
    SEED_FILES, USER_NAME, WORKSPACE_ABS_DIR, WORKSPACE_DIR,
};
use crate::core::VirtualFs;
use crate::core::commands::{Action, Command, ExecContext, execute_command};
use crate::core::editor::{EditorOutcome, EditorSession, Key};
use crate::core::error::{GitError, RemoteError};
use crate::core::git::Repository;
use crate::core::parser::parse_input;
use crate::core::remote::{PushTask, RemoteLink};
use crate::core::shell::Shell;
use crate::models::{Focus, OutputLine};

// =============================================================================
// Configuration
// =============================================================================

/// Per-session settings. Defaults come from [`crate::config`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub user: String,
    pub host: String,
    /// Working directory as shown in the prompt.
    pub directory: String,
    /// Absolute working directory, printed by `pwd`.
    pub home: String,
    pub branch: String,
    pub seed: Vec<(String, String)>,
    pub scrollback_limit: usize,
    pub history_limit: usize,
    /// Print the banner and quick-start when the session opens.
    pub banner: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: USER_NAME.to_string(),
            host: APP_NAME.to_string(),
            directory: WORKSPACE_DIR.to_string(),
            home: WORKSPACE_ABS_DIR.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            seed: SEED_FILES
                .iter()
                .map(|&(p, c)| (p.to_string(), c.to_string()))
                .collect(),
            scrollback_limit: MAX_TERMINAL_HISTORY,
            history_limit: MAX_COMMAND_HISTORY,
            banner: true,
        }
    }
}

impl SessionConfig {
    /// `user@host:directory`
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.directory)
    }

    pub fn seed_fs(&self) -> VirtualFs {
        VirtualFs::from_seed(self.seed.iter().map(|(p, c)| (p.as_str(), c.as_str())))
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Work the host has to carry out asynchronously.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run the push, then call [`Session::complete_push`].
    Push(PushTask),
    /// Show the credential dialog, then call [`Session::complete_link`]
    /// or [`Session::cancel_link`].
    OpenLinkDialog,
}

/// What one submitted line produced.
#[derive(Clone, Debug, Default)]
pub struct SubmitOutcome {
    /// Lines appended to the scrollback, echo included.
    pub lines: Vec<OutputLine>,
    pub effect: Option<Effect>,
}

/// The push currently in the host's hands.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingPush {
    url: String,
    hash: String,
    branch: String,
}

// =============================================================================
// Session
// =============================================================================

#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    shell: Shell,
    fs: VirtualFs,
    repo: Repository,
    editor: Option<EditorSession>,
    linking: bool,
    in_flight: Option<PendingPush>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut shell = Shell::new(config.scrollback_limit, config.history_limit);
        if config.banner {
            shell.push_lines(welcome_lines());
        }
        Self {
            fs: config.seed_fs(),
            repo: Repository::new(config.branch.clone()),
            shell,
            config,
            editor: None,
            linking: false,
            in_flight: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn prompt(&self) -> String {
        self.config.prompt()
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn push_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Component that receives keystrokes.
    pub fn focus(&self) -> Focus {
        if self.editor.is_some() {
            Focus::Editor
        } else if self.linking {
            Focus::LinkDialog
        } else {
            Focus::Shell
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route one keystroke to the focused component.
    pub fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match self.focus() {
            Focus::Editor => {
                self.handle_editor_key(key);
                None
            }
            Focus::Shell => self.handle_shell_key(key),
            // The dialog owns its own text fields
            Focus::LinkDialog => None,
        }
    }

    fn handle_shell_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char(c) => self.shell.insert_char(c),
            Key::Backspace => self.shell.backspace(),
            Key::Up => self.shell.history_prev(),
            Key::Down => self.shell.history_next(),
            Key::Enter => {
                let line = self.shell.take_input();
                return self.submit(&line).effect;
            }
            Key::Ctrl('c') => {
                let abandoned = self.shell.cancel_input();
                let prompt = self.prompt();
                self.shell
                    .push_line(OutputLine::command(prompt, format!("{}^C", abandoned)));
            }
            Key::Ctrl('l') => self.shell.clear_screen(),
            _ => {}
        }
        None
    }

    fn handle_editor_key(&mut self, key: Key) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let EditorOutcome::Close { saved, content } = editor.handle_key(key) else {
            return;
        };
        let path = editor.path().to_string();
        self.editor = None;
        tracing::info!(%path, saved, "editor closed");

        if saved {
            self.fs.write(path.clone(), content);
            self.shell.push_lines([
                OutputLine::text(format!("\"{}\" written", path)),
                OutputLine::empty(),
            ]);
        }
    }

    /// Run one line as if typed at the prompt.
    ///
    /// Blank lines are ignored: no echo, no history entry.
    pub fn submit(&mut self, line: &str) -> SubmitOutcome {
        let line = line.trim();
        let Some(parsed) = parse_input(line) else {
            return SubmitOutcome::default();
        };
        tracing::debug!(command = %parsed.name, args = parsed.args.len(), "dispatch");

        self.shell.record(line);
        let mut lines = vec![OutputLine::command(self.prompt(), line)];

        let cmd = Command::parse(&parsed.name, &parsed.args);
        let mut ctx = ExecContext {
            config: &self.config,
            fs: &self.fs,
            repo: &mut self.repo,
            push_in_flight: self.in_flight.is_some(),
            now: Utc::now(),
        };
        let result = execute_command(cmd, &mut ctx);
        lines.extend(result.output);
        self.shell.push_lines(lines.iter().cloned());

        let effect = result.action.and_then(|action| self.apply(action));
        SubmitOutcome { lines, effect }
    }

    fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::ClearScreen => {
                self.shell.clear_screen();
                None
            }
            Action::OpenEditor(path) => {
                let content = self.fs.read(&path).unwrap_or_default().to_string();
                tracing::info!(%path, "editor opened");
                self.editor = Some(EditorSession::open(path, content));
                None
            }
            Action::BeginLink => {
                self.linking = true;
                Some(Effect::OpenLinkDialog)
            }
            Action::StartPush(task) => {
                self.in_flight = Some(PendingPush {
                    url: task.link.repository_url().to_string(),
                    hash: task.hash.clone(),
                    branch: task.branch.clone(),
                });
                Some(Effect::Push(task))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Completions
    // -------------------------------------------------------------------------

    /// Report the outcome of an [`Effect::Push`].
    pub fn complete_push(&mut self, result: Result<(), RemoteError>) {
        let Some(pending) = self.in_flight.take() else {
            tracing::warn!("push completion without a push in flight");
            return;
        };
        match result {
            Ok(()) => {
                tracing::info!(url = %pending.url, "push succeeded");
                self.shell.push_lines([
                    OutputLine::success(format!("✓ Successfully pushed to {}", pending.url)),
                    OutputLine::text(format!("To {}.git", pending.url)),
                    OutputLine::text(format!(
                        "   {hash}..{hash}  {branch} -> {branch}",
                        hash = pending.hash,
                        branch = pending.branch
                    )),
                    OutputLine::empty(),
                ]);
            }
            Err(err) => {
                tracing::warn!(error = %err, "push failed");
                self.shell.push_lines([
                    OutputLine::error(GitError::Network(err.to_string()).to_string()),
                    OutputLine::empty(),
                ]);
            }
        }
    }

    /// Report the outcome of the link dialog.
    ///
    /// On failure the dialog stays open and the error is handed back for it
    /// to display. A result arriving after the dialog was cancelled is
    /// dropped.
    pub fn complete_link(&mut self, result: Result<RemoteLink, RemoteError>) -> Result<(), RemoteError> {
        if !self.linking {
            tracing::warn!("link completion without a link in progress");
            return Ok(());
        }
        let link = result.inspect_err(|err| tracing::warn!(error = %err, "link failed"))?;
        self.linking = false;
        self.shell.push_lines([
            OutputLine::success(format!("✓ Connected to GitHub as {}", link.owner())),
            OutputLine::text(format!("Repository: {}", link.repository_url())),
            OutputLine::empty(),
        ]);
        self.repo.set_remote(link);
        Ok(())
    }

    /// Close the link dialog without linking.
    pub fn cancel_link(&mut self) {
        if !self.linking {
            return;
        }
        self.linking = false;
        self.shell.push_lines([
            OutputLine::text("GitHub authentication cancelled"),
            OutputLine::empty(),
        ]);
    }
}

fn welcome_lines() -> Vec<OutputLine> {
    let mut lines: Vec<_> = BANNER.lines().map(OutputLine::text).collect();
    lines.push(OutputLine::empty());
    let mut quick = QUICK_START.lines();
    if let Some(title) = quick.next() {
        lines.push(OutputLine::success(title));
    }
    lines.extend(quick.map(|l| {
        if l.is_empty() {
            OutputLine::empty()
        } else {
            OutputLine::text(l)
        }
    }));
    lines.push(OutputLine::empty());
    lines
}
