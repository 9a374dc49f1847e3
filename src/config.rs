//! Env-driven configuration for the CLI and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binary. Defaults are provided for convenience during development.
//! The API URL is optional here: when unset, the persisted `url` option
//! (see [`crate::settings::Options`]) decides.
use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const DEFAULT_SETTINGS_PATH: &str = "./arcane_illusion.json";
const DEFAULT_OUTPUT_DIR: &str = "./layers";
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    pub settings_path: PathBuf,
    pub worker_threads: usize,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        let worker_threads = match env::var("ARCANE_WORKER_THREADS") {
            Ok(raw) => parse_worker_threads(&raw)?,
            Err(_) => DEFAULT_WORKER_THREADS,
        };
        Ok(Config {
            api_url: env::var("ARCANE_API_URL").ok().filter(|s| !s.trim().is_empty()),
            settings_path: env::var("ARCANE_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH)),
            worker_threads,
            output_dir: env::var("ARCANE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }

    pub fn print_env_vars() {
        for key in [
            "ARCANE_API_URL",
            "ARCANE_SETTINGS_PATH",
            "ARCANE_WORKER_THREADS",
            "ARCANE_OUTPUT_DIR",
        ] {
            println!("{}: {}", key, env::var(key).unwrap_or_else(|_| "<unset>".to_string()));
        }
    }
}

fn parse_worker_threads(raw: &str) -> AppResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::Config(format!(
            "ARCANE_WORKER_THREADS must be a positive integer, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_threads_must_be_positive() {
        assert_eq!(parse_worker_threads("2").unwrap(), 2);
        assert_eq!(parse_worker_threads(" 8 ").unwrap(), 8);
        assert!(parse_worker_threads("0").is_err());
        assert!(parse_worker_threads("many").is_err());
    }
}
