// src/config/env.rs
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Variables in the order they were read or declared.
pub type EnvMap = IndexMap<String, String>;

/// Inline variables exactly as declared; intrinsics such as `{Ref: ...}` pass through.
pub type InlineEnv = Map<String, Value>;

/// Renders a scalar config value as the string written into an environment.
/// Nulls, sequences and mappings have no textual form here.
pub fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

/// Text form of any value: strings as-is, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Reads a mapping of scalars; anything that is not a mapping reads as empty.
pub fn env_map_from_value(value: Option<&Value>) -> EnvMap {
	let Some(Value::Object(map)) = value else {
		return EnvMap::new();
	};

	map.iter()
		.filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
		.collect()
}

/// Reads a mapping verbatim; anything that is not a mapping reads as empty.
pub fn inline_env_from_value(value: Option<&Value>) -> InlineEnv {
	match value {
		Some(Value::Object(map)) => map.clone(),
		_ => InlineEnv::new(),
	}
}

/// Reads a sequence of scalars; anything that is not a sequence reads as empty.
pub fn string_list_from_value(value: Option<&Value>) -> Vec<String> {
	let Some(Value::Array(items)) = value else {
		return Vec::new();
	};

	items.iter().filter_map(scalar_to_string).collect()
}
