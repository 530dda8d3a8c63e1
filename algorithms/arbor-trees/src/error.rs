use thiserror::Error;

/// Simplified `Result` using [`TreeError`](crate::TreeError) as error type
pub type Result<T> = std::result::Result<T, TreeError>;

/// Error variants from hyperparameter checking, tree fitting and prediction
#[derive(Error, Debug, Clone)]
pub enum TreeError {
    /// The split criterion is unknown or not implemented
    #[error("unsupported split criterion `{0}`")]
    UnsupportedMethod(String),
    /// No candidate attribute left to split on
    #[error("no candidate attributes left to split on")]
    NoCandidates,
    /// The sample carries an attribute value the tree has no branch for
    #[error("no branch for value {value} of attribute `{attribute}`")]
    UnmodeledValue { attribute: String, value: String },
    /// The sample does not carry an attribute the tree needs
    #[error("sample has no value for attribute `{0}`")]
    MissingAttribute(String),
    /// Prediction on a tree which was never fitted or has been cleared
    #[error("the decision tree is empty")]
    NotFitted,
    #[error(transparent)]
    BaseCrate(#[from] arbor::Error),
}
