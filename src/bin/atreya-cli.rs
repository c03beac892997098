//! Atreya CLI: drive the recommendation engine from a terminal.
//!
//! Runs against the built-in sample graph by default, or a JSON seed file
//! via `--seed`. Set `ATREYA_OLLAMA_URL` to route narratives through a
//! local Ollama instance; otherwise the deterministic fallback is used.
//!
//! Usage:
//!   atreya-cli chat <message> [--seed <path>]
//!   atreya-cli recommend --symptoms <a,b,c> [--age N] [--gender g] [--lifestyle <a,b>] [--seed <path>]
//!   atreya-cli diagnose --symptoms <a,b,c> [--seed <path>]
//!   atreya-cli herbs [query] [--seed <path>]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use atreya::config::{self, Settings};
use atreya::engine::RecommendationEngine;
use atreya::models::{DiagnosisRequest, RecommendRequest};
use atreya::narrative::Synthesizer;
use atreya::store::{KnowledgeStore, MemoryStore};

#[derive(Debug)]
enum Command {
    Chat { message: String, seed: Option<PathBuf> },
    Recommend {
        symptoms: Vec<String>,
        age: u32,
        gender: String,
        lifestyle: Vec<String>,
        seed: Option<PathBuf>,
    },
    Diagnose { symptoms: Vec<String>, seed: Option<PathBuf> },
    Herbs { query: String, seed: Option<PathBuf> },
    Help,
    Version,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    match parse_args(&args) {
        Ok(cmd) => match run_command(cmd) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            print_help();
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Ok(Command::Help);
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" | "-V" => Ok(Command::Version),

        "chat" => {
            let rest = &args[2..];
            let message = positional(rest)
                .ok_or_else(|| "chat requires a message".to_string())?;
            Ok(Command::Chat {
                message,
                seed: flag_value(rest, "--seed").map(PathBuf::from),
            })
        }

        "recommend" => {
            let rest = &args[2..];
            Ok(Command::Recommend {
                symptoms: list_flag(rest, "--symptoms"),
                age: flag_value(rest, "--age")
                    .map(|v| v.parse::<u32>().map_err(|_| format!("invalid age: {v}")))
                    .transpose()?
                    .unwrap_or(atreya::chat::DEFAULT_CHAT_AGE),
                gender: flag_value(rest, "--gender")
                    .unwrap_or_else(|| atreya::chat::DEFAULT_CHAT_GENDER.to_string()),
                lifestyle: list_flag(rest, "--lifestyle"),
                seed: flag_value(rest, "--seed").map(PathBuf::from),
            })
        }

        "diagnose" => {
            let rest = &args[2..];
            Ok(Command::Diagnose {
                symptoms: list_flag(rest, "--symptoms"),
                seed: flag_value(rest, "--seed").map(PathBuf::from),
            })
        }

        "herbs" => {
            let rest = &args[2..];
            Ok(Command::Herbs {
                query: positional(rest).unwrap_or_default(),
                seed: flag_value(rest, "--seed").map(PathBuf::from),
            })
        }

        other => Err(format!("unknown command: {other}")),
    }
}

fn run_command(cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("{} {}", config::APP_NAME, config::APP_VERSION);
            Ok(())
        }
        Command::Chat { message, seed } => {
            let engine = build_engine(seed)?;
            let reply = engine.reply(&message)?;
            println!("{}", reply.reply);
            Ok(())
        }
        Command::Recommend {
            symptoms,
            age,
            gender,
            lifestyle,
            seed,
        } => {
            let engine = build_engine(seed)?;
            let response = engine.recommend(&RecommendRequest {
                age,
                gender,
                symptoms,
                lifestyle,
                conditions_history: vec![],
            })?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Diagnose { symptoms, seed } => {
            let engine = build_engine(seed)?;
            let response = engine.diagnose(&DiagnosisRequest {
                symptoms,
                lifestyle: vec![],
            })?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Herbs { query, seed } => {
            let engine = build_engine(seed)?;
            let herbs = engine.search_herbs(&query)?;
            println!("{}", serde_json::to_string_pretty(&herbs)?);
            Ok(())
        }
    }
}

fn build_engine(seed: Option<PathBuf>) -> Result<RecommendationEngine, Box<dyn std::error::Error>> {
    let store: Arc<dyn KnowledgeStore> = match seed {
        Some(path) => Arc::new(MemoryStore::load(&path)?),
        None => Arc::new(MemoryStore::sample()),
    };
    let settings = Settings::from_env();
    Ok(RecommendationEngine::new(
        store,
        Synthesizer::from_settings(&settings),
    ))
}

/// First argument that is not a flag or a flag's value.
fn positional(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = true;
            continue;
        }
        return Some(arg.clone());
    }
    None
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn list_flag(args: &[String], flag: &str) -> Vec<String> {
    flag_value(args, flag)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn print_help() {
    println!(
        "{} {} — herbal wellness recommendation engine

USAGE:
    atreya-cli chat <message> [--seed <path>]
    atreya-cli recommend --symptoms <a,b,c> [--age N] [--gender g] [--lifestyle <a,b>] [--seed <path>]
    atreya-cli diagnose --symptoms <a,b,c> [--seed <path>]
    atreya-cli herbs [query] [--seed <path>]
    atreya-cli help | version

Without --seed, a built-in sample graph is used. Set ATREYA_OLLAMA_URL to
route narratives through a local Ollama instance.",
        config::APP_NAME,
        config::APP_VERSION
    );
}
