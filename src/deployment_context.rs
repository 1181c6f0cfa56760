/// Source of the caller's own runtime zone, read once when a filter is initialized.
pub trait DeploymentContext: Send + Sync {
    fn zone(&self) -> Option<String>;
}

/// A context with a fixed zone, for callers that already know where they run.
#[derive(Debug, Clone, Default)]
pub struct StaticDeploymentContext {
    zone: Option<String>,
}

impl StaticDeploymentContext {
    pub fn new(zone: Option<String>) -> Self {
        Self { zone }
    }
}

impl DeploymentContext for StaticDeploymentContext {
    fn zone(&self) -> Option<String> {
        self.zone.clone()
    }
}
