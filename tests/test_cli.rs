use clap::Parser;
use noteful::cli::args::Args;
use noteful::config::{Environment, ErrorVerbosity};

#[test]
fn given_explicit_flags_when_parsing_then_uses_them() {
    // Arrange
    let args = vec![
        "noteful",
        "--host",
        "0.0.0.0",
        "--port",
        "8000",
        "--database-url",
        "main.db",
        "--test-database-url",
        "test.db",
        "--environment",
        "production",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.host.to_string(), "0.0.0.0");
    assert_eq!(parsed.port, 8000);
    assert_eq!(parsed.environment, Environment::Production);
    assert_eq!(parsed.database_url(), "main.db");
    assert_eq!(parsed.verbose, 0);
}

#[test]
fn given_test_environment_when_selecting_database_then_uses_test_url() {
    let args = vec![
        "noteful",
        "--database-url",
        "main.db",
        "--test-database-url",
        "test.db",
        "-e",
        "test",
    ];

    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.database_url(), "test.db");
}

#[test]
fn given_repeated_verbose_flag_when_parsing_then_counts_occurrences() {
    let parsed = Args::try_parse_from(["noteful", "-vv", "-e", "development"]).unwrap();

    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_unknown_environment_when_parsing_then_fails() {
    let result = Args::try_parse_from(["noteful", "--environment", "staging"]);

    assert!(result.is_err(), "Should reject unknown environment");
}

#[test]
fn given_invalid_port_when_parsing_then_fails() {
    let result = Args::try_parse_from(["noteful", "--port", "not-a-port"]);

    assert!(result.is_err());
}

#[test]
fn given_environment_when_deriving_config_then_only_production_hides_errors() {
    let verbosity = |env: &str| {
        Args::try_parse_from(["noteful", "-e", env])
            .unwrap()
            .app_config()
            .environment
            .error_verbosity()
    };

    assert_eq!(verbosity("production"), ErrorVerbosity::Generic);
    assert_eq!(verbosity("development"), ErrorVerbosity::Detailed);
    assert_eq!(verbosity("test"), ErrorVerbosity::Detailed);
}
