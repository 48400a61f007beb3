/// Failure reading the climate store
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Climate store error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
