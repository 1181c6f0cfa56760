use thiserror::Error;

#[derive(Error, Debug)]
pub enum LbError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid server entry '{entry}': {reason}")]
    InvalidServer { entry: String, reason: String },
}

pub type Result<T> = std::result::Result<T, LbError>;
