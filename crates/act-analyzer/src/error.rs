use std::fmt;

use llm_client::LlmError;
use thiserror::Error;

/// The three model-backed analysis tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTask {
    Summary,
    Sections,
    RuleValidation,
}

impl fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisTask::Summary => "summary",
            AnalysisTask::Sections => "section extraction",
            AnalysisTask::RuleValidation => "rule validation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Network, auth or HTTP failure talking to the model
    #[error("{task} request failed: {source}")]
    Api {
        task: AnalysisTask,
        #[source]
        source: LlmError,
    },

    /// Model answered but the response does not have the expected shape
    #[error("{task} response did not match schema: {message}")]
    Schema { task: AnalysisTask, message: String },
}

impl AnalyzerError {
    pub fn schema(task: AnalysisTask, message: impl Into<String>) -> Self {
        AnalyzerError::Schema {
            task,
            message: message.into(),
        }
    }

    pub fn task(&self) -> AnalysisTask {
        match self {
            AnalyzerError::Api { task, .. } | AnalyzerError::Schema { task, .. } => *task,
        }
    }
}
