mod cli;
mod heartbeat;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use gantry_bootstrap::AgentBootstrap;
use gantry_config::ProfilerConfig;
use gantry_contract::{Instrumentation, ModuleLocation, ServiceType, ServiceTypeRegistry};
use gantry_loader::{HostBoundary, ModuleCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = gantry_config::load(cli.config.as_deref())?;

    if let Some(Commands::ShowConfig) = &cli.command {
        println!("{}", toml::to_string_pretty(&config).unwrap_or_default());
        return Ok(());
    }

    if !config.agent.enabled {
        info!("agent disabled by configuration; host runs bare");
        tokio::signal::ctrl_c().await?;
        return Ok(());
    }

    run_host(cli, Arc::new(config)).await
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Boot the configured agent and run it until Ctrl-C.
///
/// Any [`gantry_bootstrap::BootstrapError`] is fatal: there is no degraded
/// or partial-agent mode.
async fn run_host(cli: Cli, config: Arc<ProfilerConfig>) -> anyhow::Result<()> {
    let catalog = ModuleCatalog::new();
    catalog.register(heartbeat::LOCATION.into(), heartbeat::manifest());

    let locations = agent_locations(&cli, &config);
    let entry_point = cli
        .entry_point
        .clone()
        .or_else(|| config.agent.entry_point.clone())
        .context("no agent entry point configured (set [agent].entry_point or --entry-point)")?;
    let agent_args = cli
        .agent_args
        .clone()
        .unwrap_or_else(|| config.agent.args.clone());

    let mut bootstrap =
        AgentBootstrap::new(locations, HostBoundary::with_defaults(), &catalog)?;
    bootstrap.set_entry_point(&entry_point);

    let plugin_locations = enumerate_plugins(&config);
    let service_types = Arc::new(host_service_types()?);

    info!(entry_point = %entry_point, "booting agent");
    let mut agent = bootstrap.boot(
        &agent_args,
        Arc::new(HostInstrumentation),
        config,
        plugin_locations,
        service_types,
    )?;

    agent.start().context("agent start failed")?;
    info!("agent running; Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("stopping agent");
    agent.stop();
    Ok(())
}

/// Module locations for the agent namespace: CLI wins over config; absent
/// everywhere stays `None` so the bootstrap rejects it eagerly.
fn agent_locations(cli: &Cli, config: &ProfilerConfig) -> Option<Vec<ModuleLocation>> {
    let raw = if cli.modules.is_empty() {
        config.agent.modules.clone()?
    } else {
        cli.modules.clone()
    };
    Some(raw.into_iter().map(ModuleLocation::new).collect())
}

/// Enumerate plugin archives from the configured plugin directory.
/// Packaging/validation of the archives is the plugins' own concern; this
/// host only lists them.
fn enumerate_plugins(config: &ProfilerConfig) -> Vec<ModuleLocation> {
    let Some(dir) = &config.plugins.dir else {
        return Vec::new();
    };
    let mut locations = Vec::new();
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if excluded(&path, &config.plugins.exclude) {
                    continue;
                }
                locations.push(ModuleLocation::new(path.display().to_string()));
            }
            locations.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "plugin directory not readable");
        }
    }
    locations
}

fn excluded(path: &Path, exclude: &[String]) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    exclude.iter().any(|suffix| name.ends_with(suffix.as_str()))
}

/// Service types this host registers before boot.  Plugins would add their
/// own here; the built-in set only covers the host itself.
fn host_service_types() -> anyhow::Result<ServiceTypeRegistry> {
    let mut registry = ServiceTypeRegistry::new();
    registry.register(ServiceType::new(1, "UNKNOWN"))?;
    registry.register(ServiceType::new(1000, "STAND_ALONE"))?;
    registry.register(ServiceType::new(1005, "TEST_STAND_ALONE"))?;
    Ok(registry)
}

/// Instrumentation capability of this host: none.  Requests are accepted
/// and logged so an agent built for a richer runtime still boots.
struct HostInstrumentation;

impl Instrumentation for HostInstrumentation {
    fn request_retransform(&self, target: &str) -> anyhow::Result<()> {
        tracing::debug!(class = target, "retransform requested; host has no rewriting engine");
        Ok(())
    }
}
