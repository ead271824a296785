//! CLI flags and on-disk configuration for the `hashsrv` binary. Flags take
//! precedence over a config file, which takes precedence over built-in
//! defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(author, version, about = "Network-accessible hashing, encryption, encoding, and compression pipeline engine", long_about = None)]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log every request's trace, regardless of the debug query parameter
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

fn default_listen() -> SocketAddr {
    "127.0.0.1:8080".parse().unwrap()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: default_listen(),
        }
    }
}

impl ServerConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merges CLI flags over the file-sourced config; flags win.
    pub fn merge_args(mut self, args: &Args) -> Self {
        if let Some(listen) = args.listen {
            self.listen = listen;
        }
        self
    }

    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let base = match &args.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        Ok(base.merge_args(args))
    }
}
