// src/cli/args.rs
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

use crate::config::{AppConfig, Environment};
use crate::constants::DEFAULT_PORT;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite connection string for normal operation
    #[arg(long, value_name = "URL", env = "DATABASE_URL", default_value = "noteful.db")]
    pub database_url: String,

    /// SQLite connection string used when running in the test environment
    #[arg(long, value_name = "URL", env = "TEST_DATABASE_URL", default_value = "noteful-test.db")]
    pub test_database_url: String,

    /// Deployment mode; production hides error details
    #[arg(short, long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(self.environment)
    }

    /// The store to open for the selected environment
    pub fn database_url(&self) -> &str {
        match self.environment {
            Environment::Test => &self.test_database_url,
            Environment::Development | Environment::Production => &self.database_url,
        }
    }
}
