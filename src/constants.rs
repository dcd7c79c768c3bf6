//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and the fixed pipeline budgets so a rename or retune only requires
//! changing this file. The budget values are part of the observable
//! dispatch contract and are deliberately not configurable.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "kibitz";

/// Local config filename (e.g. `.kibitz.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".kibitz.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "kibitz";

/// Path appended to the proxy base URL for chat dispatch.
pub const PROXY_CHAT_PATH: &str = "/api/chat";


// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "KIBITZ_PROVIDER";
pub const ENV_MODEL: &str = "KIBITZ_MODEL";
pub const ENV_API_KEY: &str = "KIBITZ_API_KEY";
pub const ENV_BASE_URL: &str = "KIBITZ_BASE_URL";
pub const ENV_PROXY_URL: &str = "KIBITZ_PROXY_URL";
pub const ENV_LANGUAGE: &str = "KIBITZ_LANGUAGE";


// ── Context budgets (characters unless noted) ───────────────────────

/// Budget for the primary selected-code context.
pub const PRIMARY_CONTEXT_BUDGET: usize = 15_000;

/// Budget for each auxiliary open-file context.
pub const FILE_CONTEXT_BUDGET: usize = 5_000;

/// Maximum number of auxiliary open files included per request.
pub const MAX_OPEN_FILES: usize = 5;

/// Maximum number of history messages retained per request.
pub const MAX_HISTORY_MESSAGES: usize = 10;

/// Line count past which the system prompt warns the model to
/// prioritise its response.
pub const LARGE_FILE_LINE_THRESHOLD: usize = 100;

/// Marker appended to any text the truncator had to cut.
pub const TRUNCATION_MARKER: &str = "\n\n... [truncated - code too long]";


// ── Direct provider call ────────────────────────────────────────────

/// Prefix every accepted provider credential must carry.
pub const API_KEY_PREFIX: &str = "sk-";

/// Sampling temperature for review completions.
pub const COMPLETION_TEMPERATURE: f64 = 0.3;

/// Output token bound for review completions.
pub const MAX_COMPLETION_TOKENS: u64 = 4096;
