use std::sync::Arc;

use zone_preference_lb::config::LbConfig;
use zone_preference_lb::logger::init_logger;
use zone_preference_lb::{PassThroughFilter, ServerListFilter, ZonePreferenceFilter};

fn main() -> anyhow::Result<()> {
    let config_path = {
        let args: Vec<String> = std::env::args().collect();
        args.iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1).cloned())
            .or_else(|| args.get(1).filter(|a| !a.starts_with('-')).cloned())
            .or_else(|| std::env::var("LOADBALANCER_CONFIG").ok())
            .unwrap_or_else(|| "loadbalancer.toml".to_string())
    };

    let config = LbConfig::load(&config_path)?;
    init_logger(&config.logging);

    let servers = config.server_list()?;

    // Zone affinity is owned by the registry client; with none wired in, keep every server.
    let filter = ZonePreferenceFilter::new(Arc::new(PassThroughFilter::new()));
    filter.init_from_context(&config.deployment);

    tracing::info!(
        config_path = %config_path,
        servers = servers.len(),
        filter = %filter,
        "Filtering server list"
    );

    let filtered = filter.filtered_servers(&servers);
    for server in &filtered {
        tracing::info!(server = %server, "available");
    }
    if filtered.is_empty() {
        tracing::warn!("no servers configured");
    }

    Ok(())
}
