use anyhow::Result;
use clap::ValueEnum;

use crate::config::{NormalizedConfig, RuleSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Off,
    Summary,
    Full,
}

pub fn build_report(cfg: &NormalizedConfig, mode: ReportMode) -> Result<String> {
    Ok(match mode {
        ReportMode::Off => String::new(),
        ReportMode::Summary => summary(cfg),
        ReportMode::Full => serde_yaml::to_string(cfg)?,
    })
}

fn summary(cfg: &NormalizedConfig) -> String {
    let mut out = String::new();

    out.push_str("offline-env report (summary)\n");
    out.push_str("============================\n");
    push_scope(&mut out, "global", &cfg.global);

    out.push_str(&format!("\nfunctions: {}\n", cfg.global.functions.len()));
    for (name, rules) in &cfg.global.functions {
        push_scope(&mut out, &format!("function {name}"), rules);
    }

    out
}

fn push_scope(out: &mut String, label: &str, rules: &RuleSet) {
    out.push_str(&format!("{label}\n"));
    out.push_str(&format!(
        "  path: {}\n",
        rules.path.as_deref().unwrap_or("<unset>")
    ));
    out.push_str(&format!(
        "  include={} exclude={} environment={} replace={}\n",
        rules.include.len(),
        rules.exclude.len(),
        rules.environment.len(),
        rules.replace.len()
    ));
}
