// src/config/mod.rs

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub mod env;
pub mod rules;

pub use env::{EnvMap, InlineEnv};
pub use rules::RuleSet;

/// Key of the declarative block inside the service's `custom` settings.
pub const CONFIG_KEY: &str = "serverless-offline-env";

/// Prefix marking host options that belong to this plugin.
pub const OPTION_PREFIX: &str = "env-";

/// Env file read when only filters are configured.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Rule tree built once from host options and the declarative block.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct NormalizedConfig {
	pub global: RuleSet,
}

impl NormalizedConfig {
	/// Merges `env-*` options with the declarative block.
	///
	/// Declarative keys overwrite option keys wholesale (no deep merge), so a
	/// declared `environment` replaces one coming from options entirely.
	pub fn build(options: &BTreeMap<String, String>, declarative: Option<&Value>) -> Self {
		let mut raw = Map::new();

		for (key, value) in options {
			let Some(stripped) = key.strip_prefix(OPTION_PREFIX) else {
				continue;
			};
			raw.insert(stripped.to_string(), Value::String(value.clone()));
		}

		if let Some(Value::Object(block)) = declarative {
			for (key, value) in block {
				raw.insert(key.clone(), value.clone());
			}
		}

		Self {
			global: RuleSet::from_map(&infer_defaults(raw)),
		}
	}

	/// Builds from a whole service document, reading `custom.serverless-offline-env`.
	pub fn from_service(service: &Value, options: &BTreeMap<String, String>) -> Self {
		let block = service.get("custom").and_then(|c| c.get(CONFIG_KEY));
		Self::build(options, block)
	}

	pub fn function(&self, name: &str) -> Option<&RuleSet> {
		self.global.functions.get(name)
	}
}

/// A bare include/exclude rule implies reading the default env file.
///
/// Runs on the merged raw block: any declared `path` (even one that is not a
/// string) and any non-empty `environment` suppress the default.
pub fn infer_defaults(mut raw: Map<String, Value>) -> Map<String, Value> {
	if raw.contains_key("path") || is_non_empty(raw.get("environment")) {
		return raw;
	}

	if is_non_empty_list(raw.get("include")) || is_non_empty_list(raw.get("exclude")) {
		raw.insert("path".to_string(), Value::String(DEFAULT_ENV_FILE.to_string()));
	}
	raw
}

fn is_non_empty(value: Option<&Value>) -> bool {
	match value {
		Some(Value::Object(m)) => !m.is_empty(),
		Some(Value::Array(a)) => !a.is_empty(),
		_ => false,
	}
}

fn is_non_empty_list(value: Option<&Value>) -> bool {
	matches!(value, Some(Value::Array(a)) if !a.is_empty())
}
