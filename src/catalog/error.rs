use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed element set for {name}: {reason}")]
    MalformedElementSet { name: String, reason: String },
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("no trackable objects")]
    EmptyCatalog,
}
