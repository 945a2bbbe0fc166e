// src/config.rs
use clap::ValueEnum;

/// Deployment mode. Only request logging and error verbosity depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// How much of an unexpected failure the catch-all responder reveals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVerbosity {
    /// Message and debug details of the failure
    Detailed,
    /// Fixed envelope, nothing from the failure itself
    Generic,
}

impl Environment {
    pub fn error_verbosity(self) -> ErrorVerbosity {
        match self {
            Environment::Production => ErrorVerbosity::Generic,
            Environment::Development | Environment::Test => ErrorVerbosity::Detailed,
        }
    }

    /// Request logs are silenced under test
    pub fn logs_requests(self) -> bool {
        self != Environment::Test
    }
}

/// Settings handed to the composition root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
}

impl AppConfig {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}
