//! In-memory service document (`serverless.yml` and friends).

use anyhow::{bail, Context as _, Result};
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::sink::{ConfigurationSink, Scope};

const SERVICE_FILES: [&str; 3] = ["serverless.yml", "serverless.yaml", "serverless.json"];

/// The host's service tree. The plugin only ever writes environments into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceTree {
    root: Value,
}

impl ServiceTree {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read service file at {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let root: Value = match ext.as_str() {
            "yml" | "yaml" => serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML service file: {}", path.display()))?,
            "json" => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON service file: {}", path.display()))?,
            other => bail!(
                "unsupported service file extension '.{other}' for {}",
                path.display()
            ),
        };

        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_root(self) -> Value {
        self.root
    }

    pub fn provider_environment(&self) -> Option<&Map<String, Value>> {
        self.root
            .get("provider")?
            .get("environment")?
            .as_object()
    }

    pub fn function_environment(&self, name: &str) -> Option<&Map<String, Value>> {
        self.root
            .get("functions")?
            .get(name)?
            .get("environment")?
            .as_object()
    }
}

impl ConfigurationSink for ServiceTree {
    type Target = Map<String, Value>;

    fn function_names(&self) -> Vec<String> {
        match self.root.get("functions") {
            Some(Value::Object(fns)) => fns.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn ensure_scope(&mut self, scope: &Scope) -> &mut Self::Target {
        let root = object_mut(&mut self.root);
        let owner = match scope {
            Scope::Provider => object_mut(child(root, "provider")),
            Scope::Function(name) => {
                let fns = object_mut(child(root, "functions"));
                object_mut(child(fns, name))
            }
        };
        object_mut(child(owner, "environment"))
    }
}

/// First service file present in `dir`.
pub fn discover_service_file(dir: &Path) -> Option<PathBuf> {
    SERVICE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

fn child<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Value {
    map.entry(key.to_string()).or_insert(Value::Null)
}

/// Replaces anything that is not an object with an empty one.
fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just made an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::EnvironmentTarget;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn provider_scope_is_created_from_nothing() {
        let mut tree = ServiceTree::new(Value::Null);
        tree.ensure_scope(&Scope::Provider).set_var("A".into(), "1".into());

        assert_eq!(tree.root(), &json!({"provider": {"environment": {"A": "1"}}}));
    }

    #[test]
    fn existing_values_are_preserved() {
        let mut tree = ServiceTree::new(json!({
            "provider": {"name": "aws", "environment": {"ENV": "local"}},
            "functions": {"myFunc": {"handler": "h.main"}},
        }));

        tree.ensure_scope(&Scope::Function("myFunc".into()))
            .set_var("FOO".into(), "bar".into());

        assert_eq!(tree.root()["provider"]["name"], "aws");
        assert_eq!(tree.provider_environment().map(|e| e.len()), Some(1));
        assert_eq!(tree.root()["functions"]["myFunc"]["handler"], "h.main");
        assert_eq!(tree.function_environment("myFunc").map(|e| e["FOO"].clone()), Some(json!("bar")));
    }

    #[test]
    fn null_function_body_becomes_object() {
        let mut tree = ServiceTree::new(json!({"functions": {"bare": null}}));
        tree.ensure_scope(&Scope::Function("bare".into()));

        assert_eq!(tree.root()["functions"]["bare"], json!({"environment": {}}));
    }

    #[test]
    fn function_names_follow_functions_mapping() {
        let tree = ServiceTree::new(json!({"functions": {"zeta": {}, "alpha": {}}}));
        assert_eq!(tree.function_names(), vec!["zeta", "alpha"]);

        let tree = ServiceTree::new(json!({"functions": ["a"]}));
        assert!(tree.function_names().is_empty());
    }

    #[test]
    fn loads_yaml_and_json() {
        let tmp = TempDir::new().expect("tmp");
        let yml = tmp.path().join("serverless.yml");
        fs::write(&yml, "service: demo\nprovider:\n  environment:\n    PORT: 3000\n").expect("write");
        let json_path = tmp.path().join("serverless.json");
        fs::write(&json_path, r#"{"service": "demo"}"#).expect("write");

        let tree = ServiceTree::load(&yml).expect("yaml");
        assert_eq!(tree.root()["service"], "demo");
        assert_eq!(tree.root()["provider"]["environment"]["PORT"], 3000);

        let tree = ServiceTree::load(&json_path).expect("json");
        assert_eq!(tree.root()["service"], "demo");
    }

    #[test]
    fn yaml_keeps_declaration_order() {
        let tmp = TempDir::new().expect("tmp");
        let yml = tmp.path().join("serverless.yml");
        fs::write(
            &yml,
            "service: demo\nprovider:\n  environment:\n    ZED: z\n    ALPHA: a\nfunctions:\n  zeta:\n    handler: z.main\n  alpha:\n    handler: a.main\n",
        )
        .expect("write");

        let mut tree = ServiceTree::load(&yml).expect("yaml");
        assert_eq!(tree.function_names(), vec!["zeta", "alpha"]);

        tree.ensure_scope(&Scope::Provider).set_var("MID".into(), "m".into());
        let keys: Vec<_> = tree
            .provider_environment()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["ZED", "ALPHA", "MID"]);

        let yaml = serde_yaml::to_string(&tree.into_root()).expect("serialize");
        assert!(yaml.find("zeta:") < yaml.find("alpha:"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("serverless.ts");
        fs::write(&path, "export default {}").expect("write");

        assert!(ServiceTree::load(&path).is_err());
    }

    #[test]
    fn discovers_yml_before_json() {
        let tmp = TempDir::new().expect("tmp");
        assert!(discover_service_file(tmp.path()).is_none());

        fs::write(tmp.path().join("serverless.json"), "{}").expect("write");
        fs::write(tmp.path().join("serverless.yml"), "{}").expect("write");

        assert_eq!(
            discover_service_file(tmp.path()),
            Some(tmp.path().join("serverless.yml"))
        );
    }
}
