use thiserror::Error;

/// Errors surfaced by catalog lookups, record checks and the renderers.
///
/// All of these are local, synchronous failures. Nothing is retried and the
/// caller decides whether to abort or report.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog lookup with a module ID the rubric does not define.
    #[error("unknown module '{0}'")]
    UnknownModule(String),

    /// Catalog lookup with a criterion ID the module does not define.
    #[error("unknown criterion '{criterion}' in module '{module}'")]
    UnknownCriterion { module: String, criterion: String },

    /// Rating outside the 0-4 scale.
    #[error("rating {0} is outside the 0-4 scale")]
    RatingOutOfRange(u8),

    /// The record references a module the catalog does not define.
    #[error("record references module '{0}' which is not in the catalog")]
    InvalidRecord(String),

    #[error("failed to assemble DOCX: {0}")]
    Docx(String),

    #[error("failed to assemble PDF: {0}")]
    Pdf(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
