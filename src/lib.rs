pub mod config;
pub mod dotenv;
pub mod filter;
pub mod logger;
pub mod plugin;
pub mod report;
pub mod resolve;
pub mod service;
pub mod sink;

pub use config::{infer_defaults, EnvMap, NormalizedConfig, RuleSet};
pub use dotenv::{parse_env_text, EnvFileReader};
pub use filter::filter_env;
pub use logger::{Logger, RecordingLogger, TracingLogger};
pub use plugin::{OfflineEnv, LIFECYCLE_HOOK};
pub use resolve::{Assignment, Resolver};
pub use service::{discover_service_file, ServiceTree};
pub use sink::{ConfigurationSink, EnvironmentTarget, Scope};
