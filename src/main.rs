use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use offline_env::{
    discover_service_file, report::build_report, OfflineEnv, ServiceTree, TracingLogger,
    LIFECYCLE_HOOK,
};

mod cli;

use cli::{Args, OutputFormat};

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG always wins; plugin lines are INFO so they show by default.
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init();

    let path = match &args.config {
        Some(p) => p.clone(),
        None => {
            let cwd = std::env::current_dir().context("could not determine working directory")?;
            discover_service_file(&cwd).with_context(|| {
                format!(
                    "no serverless.yml, serverless.yaml or serverless.json in {}",
                    cwd.display()
                )
            })?
        }
    };

    let mut tree = ServiceTree::load(&path)?;
    let plugin = OfflineEnv::from_service(tree.root(), &args.host_options(), TracingLogger);

    let report = build_report(plugin.config(), args.report)?;
    if !report.is_empty() {
        eprint!("{report}");
    }

    tracing::debug!(hook = LIFECYCLE_HOOK, service = %path.display(), "applying environment");
    plugin.run(&mut tree);

    let service = tree.into_root();
    let out = match args.format {
        OutputFormat::Yaml => serde_yaml::to_string(&service)?,
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(&service)?;
            s.push('\n');
            s
        }
    };
    print!("{out}");
    Ok(())
}
