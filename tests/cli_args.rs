//! Integration tests for CLI argument handling
//!
//! Runs the binary for commands that never touch the network.

use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_feedcache"))
        .args(args)
        .output()
        .expect("Failed to execute feedcache")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedcache"), "Help should mention feedcache");
    assert!(stdout.contains("refresh"), "Help should list the refresh command");
    assert!(stdout.contains("validate"), "Help should list the validate command");
}

#[test]
fn test_invalid_url_prints_error_and_exits() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = temp_dir.path().join("feed.json");
    let output = run_cli(&["--url", "not a url", "--store", store.to_str().unwrap()]);

    assert!(!output.status.success(), "Expected invalid URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not a url"),
        "Should print error message about the URL: {}",
        stderr
    );
}

#[test]
fn test_validate_on_empty_store_succeeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = temp_dir.path().join("feed.json");
    let output = run_cli(&["validate", "--store", store.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(!store.exists(), "Validate should not create a store file");
}

#[test]
fn test_clear_removes_existing_store_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = temp_dir.path().join("feed.json");
    std::fs::write(&store, "{}").unwrap();

    let output = run_cli(&["clear", "--store", store.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(!store.exists(), "Clear should delete the store file");
}

#[test]
fn test_validate_deletes_corrupted_store_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = temp_dir.path().join("feed.json");
    std::fs::write(&store, "corrupted").unwrap();

    let output = run_cli(&["validate", "--store", store.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(!store.exists(), "Unreadable cache should be evicted");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use feedcache::cli::{AppConfig, Cli, CliError, Command, DEFAULT_FEED_URL};

    #[test]
    fn test_cli_no_subcommand_means_load() {
        let cli = Cli::parse_from(["feedcache", "--store", "feed.json"]);
        assert!(cli.command.is_none());

        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.command, Command::Load);
    }

    #[test]
    fn test_cli_custom_url_is_parsed() {
        let cli = Cli::parse_from(["feedcache", "--url", "https://example.com/feed", "--store", "f"]);
        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.feed_url.as_str(), "https://example.com/feed");
        assert_ne!(config.feed_url.as_str(), DEFAULT_FEED_URL);
    }

    #[test]
    fn test_cli_invalid_url_returns_error() {
        let cli = Cli::parse_from(["feedcache", "--url", "::", "--store", "f"]);
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(CliError::InvalidUrl { .. })
        ));
    }
}
