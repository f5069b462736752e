//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Text assets and the seed workspace are loaded at compile time using
//! `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Banner printed at the top of every new session.
pub const BANNER: &str = include_str!("../assets/text/banner.txt");

/// Git quick-start printed below the banner.
pub const QUICK_START: &str = include_str!("../assets/text/quickstart.txt");

/// Help text for `help` command.
pub const HELP_TEXT: &str = include_str!("../assets/text/help.txt");

/// Canned `vvp` simulation trace.
pub const VVP_TRACE: &str = include_str!("../assets/text/vvp_trace.txt");

// =============================================================================
// Session Identity
// =============================================================================

/// Host name shown in the prompt.
pub const APP_NAME: &str = "hdl-studio";

/// User name shown in the prompt and by `whoami`.
pub const USER_NAME: &str = "user";

/// Working directory as displayed in the prompt.
pub const WORKSPACE_DIR: &str = "~/hdl-workspace";

/// Absolute working directory printed by `pwd`.
pub const WORKSPACE_ABS_DIR: &str = "/home/user/hdl-workspace";

// =============================================================================
// Seed Workspace
// =============================================================================

/// Files every session starts with, in listing order.
pub const SEED_FILES: &[(&str, &str)] = &[
    ("counter.v", include_str!("../assets/workspace/counter.v")),
    ("counter_tb.v", include_str!("../assets/workspace/counter_tb.v")),
    ("README.md", include_str!("../assets/workspace/README.md")),
    ("GIT_GUIDE.md", include_str!("../assets/workspace/GIT_GUIDE.md")),
];

// =============================================================================
// Version Control
// =============================================================================

/// Branch every repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// Number of hex characters shown for a commit hash.
pub const COMMIT_HASH_LEN: usize = 7;

/// Default `iverilog` output when `-o` is not given.
pub const DEFAULT_IVERILOG_OUTPUT: &str = "a.out";

// =============================================================================
// Remote Configuration
// =============================================================================

/// GitHub REST API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub web root used to build repository URLs.
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Repository name suggested by the linking dialog.
pub const DEFAULT_REPO_NAME: &str = "hdl-workspace";

/// Description used when push has to create the repository.
pub const NEW_REPO_DESCRIPTION: &str = "HDL Workspace - Verilog projects";

/// Delay after creating a repository before writing to it (milliseconds).
pub const REPO_CREATE_DELAY_MS: u32 = 2000;

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Maximum number of terminal output lines to keep in history.
pub const MAX_TERMINAL_HISTORY: usize = 1000;

/// Maximum number of command history entries to keep.
pub const MAX_COMMAND_HISTORY: usize = 100;
