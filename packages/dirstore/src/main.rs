use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use dirstore::http::{DEFAULT_BIND, DEFAULT_PORT, DEFAULT_ROOT};
use dirstore::{ServerConfig, StatusPolicy};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// dirstore - serve a single directory of text files over HTTP
#[derive(Parser, Debug)]
#[command(name = "dirstore")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value_t = DEFAULT_BIND)]
    bind: IpAddr,

    /// Store directory, created if missing
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Report failures with 400/404/500 instead of always 200
    #[arg(long)]
    semantic_status: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            port: self.port,
            root: self.root,
            status_policy: if self.semantic_status {
                StatusPolicy::Semantic
            } else {
                StatusPolicy::AlwaysOk
            },
        }
    }
}

fn init_tracing() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = dirstore::serve(args.into_config()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
