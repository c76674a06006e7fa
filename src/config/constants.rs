pub const DEFAULT_SERVER_PORT_RANGE_START: u16 = 8080;
pub const DEFAULT_SERVER_PORT_RANGE_END: u16 = 8200;
pub const SERVER_SHUTDOWN_GRACE_PERIOD_MS: u64 = 100;

pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const USER_AGENT: &str = concat!("relnotes/", env!("CARGO_PKG_VERSION"));

// Warn when this few GitHub API calls remain in the current window.
pub const LOW_RATE_LIMIT_THRESHOLD: u32 = 5;

/// ASCII record separator written between consecutive batches in the
/// outbound stream. Each side of the boundary is an independent JSON
/// array; the reconciler splits on it and merges the parsed arrays.
pub const BATCH_BOUNDARY: char = '\u{1E}';

pub const DEVELOPER_NOTE_MARKER: &str = "\"developerNote\"";
pub const MARKETING_NOTE_MARKER: &str = "\"marketingNote\"";
