use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use clap::{Arg, ArgMatches, Command};

use crate::internal::depot::LoggerDepot;
use crate::internal::log::{Context, Level, Logger};

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Keys,
    Resolve {
        key: String,
    },
    Log {
        key: String,
        level: Level,
        message: String,
        context: Context,
    },
}

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str =
        Box::leak(crate::internal::config::get_version_info().into_boxed_str());

    Command::new("logger-depot")
        .version(version)
        .about("Inspect and exercise a configured logger depot")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to config file (default: ./logger-depot.yaml, /etc/logger-depot/config.yaml)"),
        )
        .subcommand(Command::new("keys").about("List registered keys, marking the fallback"))
        .subcommand(
            Command::new("resolve")
                .about("Show which registered key answers a lookup")
                .arg(Arg::new("key").required(true).help("Key to look up, e.g. App\\Db")),
        )
        .subcommand(
            Command::new("log")
                .about("Emit one record through the logger resolved for a key")
                .arg(Arg::new("key").required(true).help("Key to look up"))
                .arg(Arg::new("message").required(true).help("Message, may contain {placeholders}"))
                .arg(
                    Arg::new("level")
                        .long("level")
                        .short('l')
                        .default_value("info")
                        .value_parser(parse_level)
                        .help("emergency|alert|critical|error|warning|notice|info|debug"),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .help("JSON object used for placeholder values"),
                ),
        )
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse::<Level>().map_err(|e| e.to_string())
}

pub fn config_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("config").cloned()
}

pub fn parse_command(matches: &ArgMatches) -> anyhow::Result<CliCommand> {
    match matches.subcommand() {
        Some(("keys", _)) => Ok(CliCommand::Keys),
        Some(("resolve", sub)) => Ok(CliCommand::Resolve {
            key: required(sub, "key")?,
        }),
        Some(("log", sub)) => {
            let context = match sub.get_one::<String>("context") {
                Some(raw) => serde_json::from_str::<Context>(raw)
                    .with_context(|| format!("--context must be a JSON object, got {}", raw))?,
                None => Context::new(),
            };
            Ok(CliCommand::Log {
                key: required(sub, "key")?,
                level: sub.get_one::<Level>("level").copied().unwrap_or(Level::Info),
                message: required(sub, "message")?,
                context,
            })
        }
        Some((other, _)) => Err(anyhow!("unknown command: {}", other)),
        None => Err(anyhow!("no command given")),
    }
}

fn required(matches: &ArgMatches, name: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing argument: {}", name))
}

/// Run `command` against `depot`, returning the lines to print
pub fn execute(depot: &LoggerDepot, command: &CliCommand) -> anyhow::Result<Vec<String>> {
    match command {
        CliCommand::Keys => {
            let fallback = depot.fallback_key().ok();
            Ok(depot
                .keys()
                .into_iter()
                .map(|key| {
                    if fallback.as_deref() == Some(key.as_str()) {
                        format!("{} (fallback)", key)
                    } else {
                        key
                    }
                })
                .collect())
        }
        CliCommand::Resolve { key } => Ok(vec![depot
            .resolve_key(key)
            .unwrap_or_else(|| "<null>".to_string())]),
        CliCommand::Log {
            key,
            level,
            message,
            context,
        } => {
            depot
                .get_logger(key)
                .log(*level, message, context)
                .with_context(|| format!("logging through '{}' failed", key))?;
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::sinks::MemoryLogger;
    use std::sync::Arc;

    fn matches(args: &[&str]) -> ArgMatches {
        build_cli().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_parse_log_command() {
        let m = matches(&[
            "logger-depot",
            "log",
            "App\\Db",
            "hello {who}",
            "--level",
            "ERROR",
            "--context",
            r#"{"who":"world"}"#,
            "--config",
            "depot.yaml",
        ]);

        assert_eq!(config_path(&m), Some(PathBuf::from("depot.yaml")));
        match parse_command(&m).unwrap() {
            CliCommand::Log {
                key,
                level,
                message,
                context,
            } => {
                assert_eq!(key, "App\\Db");
                assert_eq!(level, Level::Error);
                assert_eq!(message, "hello {who}");
                assert_eq!(context["who"], "world");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = build_cli().try_get_matches_from(["logger-depot", "log", "k", "m", "--level", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_context_must_be_object() {
        let m = matches(&["logger-depot", "log", "k", "m", "--context", "[1,2]"]);
        assert!(parse_command(&m).is_err());
    }

    #[test]
    fn test_execute_keys_and_resolve() {
        let depot = LoggerDepot::new();
        depot.register("App", Arc::new(MemoryLogger::new("app")));
        depot.register("App\\Db", Arc::new(MemoryLogger::new("db")));

        let keys = execute(&depot, &CliCommand::Keys).unwrap();
        assert_eq!(keys, vec!["App (fallback)", "App\\Db"]);

        let resolved = execute(
            &depot,
            &CliCommand::Resolve {
                key: "App\\Db\\Pool".to_string(),
            },
        )
        .unwrap();
        assert_eq!(resolved, vec!["App\\Db"]);
    }

    #[test]
    fn test_execute_log_uses_resolved_logger() {
        let depot = LoggerDepot::new();
        let db = Arc::new(MemoryLogger::new("db"));
        depot.register("App", Arc::new(MemoryLogger::new("app")));
        depot.register("App\\Db", db.clone());

        execute(
            &depot,
            &CliCommand::Log {
                key: "App\\Db\\Pool".to_string(),
                level: Level::Debug,
                message: "checkout".to_string(),
                context: Context::new(),
            },
        )
        .unwrap();

        assert_eq!(db.records().len(), 1);
        assert_eq!(db.records()[0].level, Level::Debug);
    }

    #[test]
    fn test_execute_resolve_on_empty_depot() {
        let depot = LoggerDepot::new();
        let out = execute(&depot, &CliCommand::Resolve { key: "x".to_string() }).unwrap();
        assert_eq!(out, vec!["<null>"]);
    }
}
