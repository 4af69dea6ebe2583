use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,
    /// Overrides `socket_address` of the configuration file.
    #[clap(long, env = "SOCKET_ADDRESS")]
    pub socket_address: Option<SocketAddr>,
    /// Overrides `database.url` of the configuration file.
    #[clap(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}
