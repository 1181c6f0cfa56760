use crate::server::Server;

/// Trait for abstracting server list filters
pub trait ServerListFilter: Send + Sync {
    fn filtered_servers(&self, servers: &[Server]) -> Vec<Server>;
}

impl<F> ServerListFilter for F
where
    F: Fn(&[Server]) -> Vec<Server> + Send + Sync,
{
    fn filtered_servers(&self, servers: &[Server]) -> Vec<Server> {
        self(servers)
    }
}
