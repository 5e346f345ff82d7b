use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("module locations were not supplied")]
    MissingLocations,

    #[error("class not found: {0}")]
    ClassNotFound(String),
}
