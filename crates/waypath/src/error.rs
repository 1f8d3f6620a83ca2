#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    #[error("self-loop on node {id} is not allowed")]
    SelfLoop { id: String },

    #[error("invalid edge weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },
}

impl Error {
    pub(crate) fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
