#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate entry id: {0}")]
    DuplicateId(String),
    #[error("entry '{0}' has an empty answer")]
    EmptyAnswer(String),
    #[error("entry '{0}' has an empty embedding")]
    EmptyEmbedding(String),
    #[error("entry '{id}': embedding dimension mismatch: expected {expected}, got {actual}")]
    EmbeddingDimMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embedding error: {0}")]
    Embedding(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
