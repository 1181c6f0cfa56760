use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::deployment_context::DeploymentContext;
use crate::server::Server;

use super::filter::ServerListFilter;
use super::pass_through::PassThroughFilter;

/// Narrows `pre_filtered` to the servers in `zone`.
///
/// Narrowing only happens when the upstream pass kept every server
/// (`pre_filtered.len() == all_servers.len()`) and at least one server
/// matches; otherwise `pre_filtered` comes back unchanged. An empty zone
/// counts as no preference.
pub fn prefer_zone(zone: Option<&str>, all_servers: &[Server], pre_filtered: &[Server]) -> Vec<Server> {
    let zone = match zone {
        Some(zone) if !zone.is_empty() => zone,
        _ => return pre_filtered.to_vec(),
    };

    if pre_filtered.len() != all_servers.len() {
        trace!(
            zone,
            all = all_servers.len(),
            kept = pre_filtered.len(),
            "upstream filter already narrowed the list"
        );
        return pre_filtered.to_vec();
    }

    let local: Vec<Server> = pre_filtered
        .iter()
        .filter(|server| server.is_in_zone(zone))
        .cloned()
        .collect();

    if local.is_empty() {
        debug!(zone, candidates = pre_filtered.len(), "no server in preferred zone");
        return pre_filtered.to_vec();
    }

    debug!(zone, candidates = pre_filtered.len(), local = local.len(), "narrowed to preferred zone");
    local
}

/// Server list filter that actively prefers the local zone.
///
/// The upstream zone-affinity filter runs first; its output is then
/// narrowed with [`prefer_zone`]. The zone is held as an `Arc<str>` so a
/// concurrent [`set_zone`](Self::set_zone) publishes atomically and each
/// filtering pass works from one snapshot.
pub struct ZonePreferenceFilter {
    upstream: Arc<dyn ServerListFilter>,
    zone: RwLock<Option<Arc<str>>>,
}

impl ZonePreferenceFilter {
    pub fn new(upstream: Arc<dyn ServerListFilter>) -> Self {
        Self {
            upstream,
            zone: RwLock::new(None),
        }
    }

    pub fn with_zone(self, zone: impl Into<String>) -> Self {
        self.set_zone(Some(zone.into()));
        self
    }

    /// Sets the preferred zone from a deployment-context lookup. `None` clears it.
    pub fn initialize(&self, deployment_context_zone: Option<&str>) {
        self.set_zone(deployment_context_zone.map(str::to_string));
    }

    pub fn init_from_context(&self, context: &dyn DeploymentContext) {
        self.set_zone(context.zone());
    }

    pub fn zone(&self) -> Option<String> {
        self.snapshot().map(|zone| zone.to_string())
    }

    pub fn set_zone(&self, zone: Option<String>) {
        debug!(zone = zone.as_deref().unwrap_or("<none>"), "preferred zone set");
        *self.zone.write() = zone.map(Arc::from);
    }

    /// Applies the zone preference to an already zone-affinity-filtered list.
    pub fn filter(&self, all_servers: &[Server], pre_filtered: &[Server]) -> Vec<Server> {
        let zone = self.snapshot();
        prefer_zone(zone.as_deref(), all_servers, pre_filtered)
    }

    fn snapshot(&self) -> Option<Arc<str>> {
        self.zone.read().clone()
    }
}

impl Default for ZonePreferenceFilter {
    fn default() -> Self {
        Self::new(Arc::new(PassThroughFilter::new()))
    }
}

impl ServerListFilter for ZonePreferenceFilter {
    fn filtered_servers(&self, servers: &[Server]) -> Vec<Server> {
        let output = self.upstream.filtered_servers(servers);
        self.filter(servers, &output)
    }
}

impl PartialEq for ZonePreferenceFilter {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl Eq for ZonePreferenceFilter {}

impl Hash for ZonePreferenceFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.snapshot().hash(state);
    }
}

impl fmt::Debug for ZonePreferenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonePreferenceFilter")
            .field("zone", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ZonePreferenceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.snapshot() {
            Some(zone) => write!(f, "ZonePreferenceFilter{{zone='{}'}}", zone),
            None => write!(f, "ZonePreferenceFilter{{zone='null'}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servers() -> Vec<Server> {
        vec![
            Server::new("a", 80).with_zone("east"),
            Server::new("b", 80).with_zone("west"),
            Server::new("c", 80).with_zone("east"),
        ]
    }

    #[test]
    fn narrows_to_preferred_zone() {
        let all = servers();
        let filter = ZonePreferenceFilter::default().with_zone("east");

        let result = filter.filter(&all, &all);

        assert_eq!(result, vec![all[0].clone(), all[2].clone()]);
    }

    #[test]
    fn falls_back_when_nothing_matches() {
        let all = servers();
        let filter = ZonePreferenceFilter::default().with_zone("north");

        assert_eq!(filter.filter(&all, &all), all);
    }

    #[test]
    fn skips_when_upstream_already_narrowed() {
        let all = servers();
        let pre = vec![all[0].clone(), all[2].clone()];
        let filter = ZonePreferenceFilter::default().with_zone("west");

        assert_eq!(filter.filter(&all, &pre), pre);
    }

    #[test]
    fn unset_or_empty_zone_is_identity() {
        let all = servers();
        let filter = ZonePreferenceFilter::default();
        assert_eq!(filter.filter(&all, &all), all);

        filter.initialize(Some(""));
        assert_eq!(filter.filter(&all, &all), all);
    }

    #[test]
    fn initialize_overwrites_previous_zone() {
        let filter = ZonePreferenceFilter::default().with_zone("east");
        filter.initialize(Some("west"));
        assert_eq!(filter.zone().as_deref(), Some("west"));

        filter.initialize(None);
        assert_eq!(filter.zone(), None);
    }

    #[test]
    fn servers_without_zone_never_match() {
        let all = vec![Server::new("a", 80), Server::new("b", 80).with_zone("EAST")];
        let filter = ZonePreferenceFilter::default().with_zone("east");

        assert_eq!(filter.filter(&all, &all), vec![all[1].clone()]);
    }

    #[test]
    fn display_matches_config_form() {
        let filter = ZonePreferenceFilter::default();
        assert_eq!(filter.to_string(), "ZonePreferenceFilter{zone='null'}");

        filter.set_zone(Some("us-east-1".to_string()));
        assert_eq!(filter.to_string(), "ZonePreferenceFilter{zone='us-east-1'}");
    }
}
