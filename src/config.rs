//! Runtime Configuration
//!
//! Every option can be given as a command-line flag or through the matching
//! environment variable. Flags win.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-catalog", version, about = "Course catalog search API")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "COURSE_SEARCH_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the Elasticsearch cluster.
    #[arg(long, env = "ELASTICSEARCH_URL", default_value = "http://localhost:9200")]
    pub elasticsearch_url: String,

    /// Index holding the course documents.
    #[arg(long, env = "COURSE_SEARCH_INDEX", default_value = "courses")]
    pub index: String,

    /// JSON array of courses loaded into an empty catalog at startup.
    #[arg(
        long,
        env = "COURSE_SEARCH_SEED_FILE",
        default_value = "resources/sample-courses.json"
    )]
    pub seed_file: PathBuf,

    /// Per-request timeout for calls to the search engine, in milliseconds.
    #[arg(long, env = "COURSE_SEARCH_ENGINE_TIMEOUT_MS", default_value_t = 5000)]
    pub engine_timeout_ms: u64,

    /// Maximum number of courses the exact filter path reads per request.
    #[arg(long, env = "COURSE_SEARCH_FETCH_LIMIT", default_value_t = 10_000)]
    pub fetch_limit: usize,

    /// Log filter used when RUST_LOG is not set (e.g. "info", "course_catalog=debug").
    #[arg(long, env = "COURSE_SEARCH_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn engine_timeout(&self) -> Duration {
        Duration::from_millis(self.engine_timeout_ms)
    }
}
