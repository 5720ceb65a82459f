//! CLI tests

use crate::{Cli, Commands, ConfigAction, OutputFormat};
use clap::{CommandFactory, Parser};

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_add() {
    let cli = Cli::parse_from([
        "projtrack",
        "add",
        "--title",
        "Build API",
        "--description",
        "Public REST surface",
        "--people",
        "3",
    ]);
    match cli.command {
        Commands::Add {
            title,
            description,
            people,
        } => {
            assert_eq!(title, "Build API");
            assert_eq!(description, "Public REST surface");
            assert_eq!(people, "3");
        }
        _ => panic!("expected add command"),
    }
    assert_eq!(cli.format, OutputFormat::Text);
}

#[test]
fn test_parse_validate_with_negative_bound() {
    let cli = Cli::parse_from([
        "projtrack", "validate", "--number", "-2", "--min", "-5", "--max", "0",
    ]);
    match cli.command {
        Commands::Validate {
            value,
            number,
            min,
            max,
            ..
        } => {
            assert_eq!(value, "-2");
            assert!(number);
            assert_eq!(min, Some(-5.0));
            assert_eq!(max, Some(0.0));
        }
        _ => panic!("expected validate command"),
    }
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::parse_from(["projtrack", "batch", "--format", "json", "-q"]);
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.quiet);
    assert!(matches!(cli.command, Commands::Batch { file: None }));
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::parse_from(["projtrack", "config", "set", "form.people_max", "8"]);
    match cli.command {
        Commands::Config {
            action: ConfigAction::Set { key, value },
        } => {
            assert_eq!(key, "form.people_max");
            assert_eq!(value, "8");
        }
        _ => panic!("expected config set"),
    }
}
