use serde_json::Value;

use crate::{
    config::{env::display_value, EnvMap, InlineEnv, RuleSet},
    dotenv::EnvFileReader,
    filter::filter_env,
    logger::Logger,
    sink::EnvironmentTarget,
};

/// One variable about to be written into a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Key as resolved from the file or inline declarations.
    pub source_key: String,
    /// Key written to the scope, after `replace`.
    pub key: String,
    pub value: Value,
}

impl Assignment {
    pub fn is_renamed(&self) -> bool {
        self.source_key != self.key
    }

    /// `Env:[ <context>:][ using <from> as <to>,] setting "<key>":"<value>"`
    pub fn log_line(&self, context: &str) -> String {
        let scope = if context.is_empty() {
            String::new()
        } else {
            format!(" {context}:")
        };
        let rename = if self.is_renamed() {
            format!(" using {} as {},", self.source_key, self.key)
        } else {
            String::new()
        };
        format!(
            "Env:{scope}{rename} setting \"{}\":\"{}\"",
            self.key,
            display_value(&self.value)
        )
    }
}

/// Turns a scope's rule set into concrete assignments.
pub struct Resolver<'a, L: Logger> {
    pub reader: &'a EnvFileReader,
    pub logger: &'a L,
}

impl<'a, L: Logger> Resolver<'a, L> {
    pub fn new(reader: &'a EnvFileReader, logger: &'a L) -> Self {
        Self { reader, logger }
    }

    /// File (if any) → include/exclude → inline overlay → `replace`.
    ///
    /// Inline variables are layered after filtering, so they are never
    /// filtered and always win over file values with the same key. Order is
    /// file line order, then newly declared inline keys; when a rename lands
    /// on a key that is also present, the later entry wins.
    pub fn resolve(&self, rules: &RuleSet, context: &str) -> Vec<Assignment> {
        if rules.is_noop() {
            return Vec::new();
        }

        let mut env = EnvMap::new();

        if let Some(path) = rules.path.as_deref().filter(|p| !p.is_empty()) {
            env = self.reader.read(path, env, context, self.logger);
        }

        filter_env(&mut env, &rules.include, &rules.exclude);

        let mut merged: InlineEnv = env.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        for (k, v) in &rules.environment {
            merged.insert(k.clone(), v.clone());
        }

        merged
            .into_iter()
            .map(|(source_key, value)| {
                let key = rules
                    .replace
                    .get(&source_key)
                    .cloned()
                    .unwrap_or_else(|| source_key.clone());
                Assignment {
                    source_key,
                    key,
                    value,
                }
            })
            .collect()
    }

    /// Resolves and writes into `target`, logging one line per variable.
    pub fn apply<T: EnvironmentTarget + ?Sized>(&self, rules: &RuleSet, target: &mut T, context: &str) {
        for a in self.resolve(rules, context) {
            self.logger.info(&a.log_line(context));
            target.set_var(a.key, a.value);
        }
    }
}
