use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParserError>;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("failed to parse lifecycle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("instance \"{instance}\" references unknown base function: {base}")]
    UnknownBase { instance: String, base: String },

    #[error("graph error: {0}")]
    Graph(#[from] lifecycle_graph::GraphError),
}
