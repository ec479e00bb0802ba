use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("predecessor node \"{0}\" not found in graph")]
    MissingPredecessor(String),

    #[error("successor node \"{0}\" not found in graph")]
    MissingSuccessor(String),

    #[error("graph contains a cycle - cannot perform topological sort")]
    CycleDetected,
}
