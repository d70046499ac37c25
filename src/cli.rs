use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;

use offline_env::report::ReportMode;

/// Injects env files and declared variables into a serverless service, then
/// prints the resulting service.
#[derive(Parser, Debug)]
#[command(name = "offline-env", version, about)]
pub struct Args {
    /// Service file (defaults to serverless.yml/.yaml/.json in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Env file applied to the provider (same as `--option env-path=<PATH>`)
    #[arg(long)]
    pub env_path: Option<String>,

    /// Raw host option, KEY=VALUE. Only `env-` prefixed keys are used.
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub options: Vec<(String, String)>,

    /// Output format of the resulting service
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Print the normalized rules to stderr before applying them
    #[arg(long, value_enum, default_value_t = ReportMode::Off)]
    pub report: ReportMode,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Host options as the plugin sees them; `--env-path` wins over `-o env-path=...`.
    pub fn host_options(&self) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> = self.options.iter().cloned().collect();
        if let Some(p) = &self.env_path {
            out.insert("env-path".to_string(), p.clone());
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((k.to_string(), v.to_string()))
}
