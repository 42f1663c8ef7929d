pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load tree data: {message}")]
    Load { message: String },

    #[error("tree data JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid explorer config: {message}")]
    Config { message: String },
}
