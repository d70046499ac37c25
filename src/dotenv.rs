use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::PathBuf};

use crate::{config::EnvMap, logger::Logger};

pub const DEFAULT_ENCODING: &str = "utf-8";

static ENV_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)\s*=\s*(.*)$").expect("valid regex"));

/// Reads `KEY=VALUE` files relative to a base directory.
#[derive(Debug, Clone)]
pub struct EnvFileReader {
    base_dir: PathBuf,
}

impl EnvFileReader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolves relative to the process working directory.
    pub fn from_cwd() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }

    pub fn resolve_path(&self, file_path: &str) -> PathBuf {
        self.base_dir.join(file_path)
    }

    /// Layers the file's variables over `seed`.
    ///
    /// A missing or unreadable file contributes nothing and only warns.
    pub fn read(
        &self,
        file_path: &str,
        seed: EnvMap,
        context: &str,
        logger: &impl Logger,
    ) -> EnvMap {
        logger.info(&format!(
            "Env: {context}: reading env variables from {file_path} ({DEFAULT_ENCODING})"
        ));

        let path = self.resolve_path(file_path);
        if !path.exists() {
            logger.warn(&format!(
                "Env: {context}: env file was not found at {}",
                path.display()
            ));
            return seed;
        }

        logger.info(&format!(
            "Env: {context}: reading env variables from {} ({DEFAULT_ENCODING})",
            path.display()
        ));

        match fs::read_to_string(&path) {
            Ok(text) => parse_env_text(&text, seed),
            Err(err) => {
                logger.warn(&format!(
                    "Env: {context}: env file could not be read at {}: {err}",
                    path.display()
                ));
                seed
            }
        }
    }
}

/// Folds the lines of an env file into `seed`, last write wins.
///
/// Lines that are not `KEY=VALUE` are skipped, as are keys starting with `#`.
pub fn parse_env_text(text: &str, seed: EnvMap) -> EnvMap {
    text.split('\n').fold(seed, |mut acc, line| {
        let Some(caps) = ENV_LINE.captures(line.trim()) else {
            return acc;
        };

        let key = &caps[1];
        if key.starts_with('#') {
            return acc;
        }

        acc.insert(key.to_string(), strip_quotes(&caps[2]));
        acc
    })
}

/// Drops one leading and one trailing quote (either kind, not necessarily a pair).
fn strip_quotes(raw: &str) -> String {
    let s = raw.strip_prefix(['"', '\'']).unwrap_or(raw);
    let s = s.strip_suffix(['"', '\'']).unwrap_or(s);
    s.trim().to_string()
}
