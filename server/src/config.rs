use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(version, about = "HTTP API for single-player mine-clearing games", long_about = None)]
pub struct Config {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Address to listen on
    #[arg(long, env = "SWEEPER_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Keep games as JSON files under this directory instead of in memory
    #[arg(long, env = "SWEEPER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long, env = "SWEEPER_SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
