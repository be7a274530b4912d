//! Terminal errors of the routing orchestrator.

use crate::classifier::ClassifierError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    /// `forceModel` named a model the active provider does not have.
    #[error("unknown model '{model}' for the active provider")]
    UnknownModel { model: String },

    /// Filtering and breaker admission excluded every model.
    #[error("no models available after filtering and breaker admission")]
    NoModelsAvailable,

    /// Every candidate in the fallback chain failed.
    #[error("all {attempted} candidate models failed")]
    AllModelsFailed { attempted: usize },

    /// The classifier's cache or store was unavailable.
    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),
}

impl RouterError {
    /// Stable machine-readable code for the HTTP error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            RouterError::UnknownModel { .. } => "unknown_model",
            RouterError::NoModelsAvailable => "no_models_available",
            RouterError::AllModelsFailed { .. } => "all_models_failed",
            RouterError::Classifier(_) => "classifier_error",
        }
    }
}
