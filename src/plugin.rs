//! Entry point the host calls once, before the offline emulator starts.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    config::NormalizedConfig,
    dotenv::EnvFileReader,
    logger::Logger,
    resolve::Resolver,
    sink::{ConfigurationSink, Scope},
};

/// Host lifecycle event the plugin runs on.
pub const LIFECYCLE_HOOK: &str = "before:offline:start:init";

pub struct OfflineEnv<L: Logger> {
    config: NormalizedConfig,
    reader: EnvFileReader,
    logger: L,
}

impl<L: Logger> OfflineEnv<L> {
    /// Env files resolve against the current working directory.
    pub fn new(config: NormalizedConfig, logger: L) -> Self {
        Self::with_reader(config, EnvFileReader::from_cwd(), logger)
    }

    pub fn with_reader(config: NormalizedConfig, reader: EnvFileReader, logger: L) -> Self {
        Self {
            config,
            reader,
            logger,
        }
    }

    /// Builds the rule tree from a service document and the host's options.
    pub fn from_service(service: &Value, options: &BTreeMap<String, String>, logger: L) -> Self {
        Self::new(NormalizedConfig::from_service(service, options), logger)
    }

    pub fn config(&self) -> &NormalizedConfig {
        &self.config
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Applies the global rules to the provider, then each configured function.
    ///
    /// Functions without rules are left exactly as the host declared them.
    pub fn run<S: ConfigurationSink>(&self, sink: &mut S) {
        let resolver = Resolver::new(&self.reader, &self.logger);

        let provider = Scope::Provider;
        resolver.apply(&self.config.global, sink.ensure_scope(&provider), &provider.context());

        for name in sink.function_names() {
            let Some(rules) = self.config.function(&name) else {
                continue;
            };
            let scope = Scope::Function(name);
            resolver.apply(rules, sink.ensure_scope(&scope), &scope.context());
        }
    }
}
