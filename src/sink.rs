use serde_json::{Map, Value};
use std::fmt;

use crate::config::{env::display_value, EnvMap};

/// Where a rule set is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `service.provider`
    Provider,
    /// `service.functions.<name>`
    Function(String),
}

impl Scope {
    /// Label used as the context of log lines.
    pub fn context(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Provider => f.write_str("Global"),
            Scope::Function(name) => write!(f, "Function {name}"),
        }
    }
}

/// A mutable environment mapping owned by the host.
pub trait EnvironmentTarget {
    fn set_var(&mut self, key: String, value: Value);
}

/// Flat string environments keep the text form of non-string values.
impl EnvironmentTarget for EnvMap {
    fn set_var(&mut self, key: String, value: Value) {
        self.insert(key, display_value(&value));
    }
}

impl EnvironmentTarget for Map<String, Value> {
    fn set_var(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }
}

/// The host's configuration tree, as seen by the plugin.
pub trait ConfigurationSink {
    type Target: EnvironmentTarget;

    /// Function names in the host's declaration order.
    fn function_names(&self) -> Vec<String>;

    /// Returns the scope's environment, creating whatever is missing on the way.
    fn ensure_scope(&mut self, scope: &Scope) -> &mut Self::Target;
}
