// src/config/rules.rs
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::env::{env_map_from_value, inline_env_from_value, string_list_from_value, EnvMap, InlineEnv};

/// Declarative instructions for one scope (global provider or a single function).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct RuleSet {
	/// Env file to read, relative to the working directory.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub include: Vec<String>,

	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub exclude: Vec<String>,

	/// Inline variables; applied after filtering and never filtered.
	#[serde(skip_serializing_if = "InlineEnv::is_empty")]
	pub environment: InlineEnv,

	/// Resolved key → key actually written to the scope.
	#[serde(skip_serializing_if = "EnvMap::is_empty")]
	pub replace: EnvMap,

	/// Per-function rules. Only populated on the global rule set.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub functions: BTreeMap<String, RuleSet>,
}

impl RuleSet {
	/// Reads the global rule set, including `functions`.
	pub fn from_map(map: &Map<String, Value>) -> Self {
		let mut rules = Self::scope_from_map(map);

		if let Some(Value::Object(fns)) = map.get("functions") {
			for (name, raw) in fns {
				let scoped = match raw {
					Value::Object(m) => Self::scope_from_map(m),
					_ => Self::default(),
				};
				rules.functions.insert(name.clone(), scoped);
			}
		}

		rules
	}

	/// Reads a single scope; `functions` is ignored at this level.
	fn scope_from_map(map: &Map<String, Value>) -> Self {
		Self {
			path: match map.get("path") {
				Some(Value::String(s)) => Some(s.clone()),
				_ => None,
			},
			include: string_list_from_value(map.get("include")),
			exclude: string_list_from_value(map.get("exclude")),
			environment: inline_env_from_value(map.get("environment")),
			replace: env_map_from_value(map.get("replace")),
			functions: BTreeMap::new(),
		}
	}

	/// True when applying these rules cannot write anything.
	pub fn is_noop(&self) -> bool {
		self.path.as_deref().map_or(true, str::is_empty) && self.environment.is_empty()
	}
}
