pub mod config;
pub mod deployment_context;
pub mod error;
pub mod filters;
pub mod logger;
pub mod server;

pub use deployment_context::{DeploymentContext, StaticDeploymentContext};
pub use error::{LbError, Result};
pub use filters::filter::ServerListFilter;
pub use filters::pass_through::PassThroughFilter;
pub use filters::zone_preference::{prefer_zone, ZonePreferenceFilter};
pub use server::Server;
