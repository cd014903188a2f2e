//! Global configuration constants for AiNura.
//!
//! Scoring weights, ranking thresholds, input validation limits, and server
//! defaults are defined here. These are compile-time constants; runtime
//! configuration is handled via CLI arguments and environment variables in
//! the server's `main.rs`.

/// Points added per (enhanced keyword, candidate token) match.
pub const KEYWORD_MATCH_WEIGHT: f64 = 15.0;

/// Multiplier applied to the stem-set overlap ratio.
pub const SET_OVERLAP_WEIGHT: f64 = 25.0;

/// Multiplier applied to each reference term's frequency in the candidate.
pub const TERM_FREQUENCY_WEIGHT: f64 = 20.0;

/// Flat bonus when candidate and reference share an author.
pub const SHARED_AUTHOR_BONUS: f64 = 8.0;

/// Popularity closeness tiers, checked in order: `(exclusive lower bound, bonus)`.
pub const POPULARITY_TIERS: [(f64, f64); 3] = [(0.8, 5.0), (0.6, 3.0), (0.4, 1.0)];

/// Base points for each shared theme, multiplied by the theme's weight.
pub const THEME_BONUS: f64 = 20.0;

/// Description length tiers, checked in order: `(exclusive upper bound on char difference, bonus)`.
pub const LENGTH_TIERS: [(usize, f64); 2] = [(20, 2.0), (50, 1.0)];

/// Candidates must score strictly above this to be returned as similar.
pub const MIN_SIMILARITY_SCORE: f64 = 5.0;

/// Maximum number of similar items returned per reference.
pub const MAX_SIMILAR_RESULTS: usize = 60;

/// Tokens must be longer than this many characters to count as terms.
pub const MIN_TERM_CHARS: usize = 2;

/// Prompt search: points for a query term equal to a whole prompt word.
pub const SEARCH_EXACT_WORD_SCORE: u32 = 5;

/// Prompt search: points for a query term found only as a substring.
pub const SEARCH_PARTIAL_SCORE: u32 = 1;

/// Prompt search: per-term bonus when more than one query term matches.
pub const SEARCH_MULTI_TERM_BONUS: u32 = 2;

/// Maximum prompt length in characters accepted on upload.
pub const MAX_PROMPT_LEN: usize = 2_000;

/// Maximum author length in characters accepted on upload.
pub const MAX_AUTHOR_LEN: usize = 128;

/// Maximum query length in bytes for prompt search.
pub const MAX_QUERY_LEN: usize = 512;

/// Default page size for listings, similar items, and search results.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Maximum page size per request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum pagination offset.
pub const MAX_OFFSET: usize = 100_000;

/// Listing file name for the image partition.
pub const IMAGES_FILE: &str = "images.json";

/// Listing file name for the video partition.
pub const VIDEOS_FILE: &str = "videos.json";

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 3030;

/// Default directory for listing files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default interval (in seconds) between automatic snapshots. 0 = disabled.
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 300;

/// Default interval (in seconds) between upstream listing refreshes. 0 = startup only.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;

/// Timeout for a single upstream listing fetch.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Global rate limit in requests per second.
pub const RATE_LIMIT_RPS: u64 = 100;

/// Maximum HTTP request body size in bytes (1 MB).
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 512;
