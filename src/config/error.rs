use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid observer coordinates '{0}', expected \"lat,lon\" in degrees")]
    InvalidCoordinates(String),
    #[error("Invalid duration for {field}: {message}")]
    InvalidDuration { field: &'static str, message: String },
}
