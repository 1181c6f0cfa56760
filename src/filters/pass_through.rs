use crate::server::Server;

use super::filter::ServerListFilter;

/// Upstream stand-in that keeps every server.
#[derive(Debug, Clone, Copy)]
pub struct PassThroughFilter;

impl PassThroughFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassThroughFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerListFilter for PassThroughFilter {
    fn filtered_servers(&self, servers: &[Server]) -> Vec<Server> {
        servers.to_vec()
    }
}
