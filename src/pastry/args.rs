use clap::Parser;
use pastry::config::PastryConfig;
use std::net::IpAddr;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "pastry", version = get_version())]
#[command(about = "LAN pastebin: send text to one port, read it back from another", long_about = None)]
pub struct Cli {
    /// Keep config.json and the snippet cache in this directory
    #[arg(long, env = "PASTRY_HOME")]
    pub home: Option<PathBuf>,

    /// Address to bind all listeners to
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Port that stores whatever is sent to it
    #[arg(long)]
    pub write_port: Option<u16>,

    /// Port that answers get/list/grep/drop
    #[arg(long)]
    pub read_port: Option<u16>,

    /// Port of the web page
    #[arg(long)]
    pub http_port: Option<u16>,

    /// Snippet cache file
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// How long the read port waits for a command, in milliseconds
    #[arg(long)]
    pub read_timeout_ms: Option<u64>,

    /// Largest payload accepted from one connection, in bytes
    #[arg(long)]
    pub max_payload_bytes: Option<usize>,

    /// Write the effective configuration to config.json and exit
    #[arg(long)]
    pub save_config: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layers the command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut PastryConfig) {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.write_port {
            config.write_port = port;
        }
        if let Some(port) = self.read_port {
            config.read_port = port;
        }
        if let Some(port) = self.http_port {
            config.http_port = port;
        }
        if let Some(path) = &self.cache_file {
            config.cache_file = Some(path.clone());
        }
        if let Some(ms) = self.read_timeout_ms {
            config.read_timeout_ms = ms;
        }
        if let Some(bytes) = self.max_payload_bytes {
            config.max_payload_bytes = bytes;
        }
    }
}
