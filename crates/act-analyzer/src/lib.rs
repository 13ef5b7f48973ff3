//! Model-backed analysis of legislative text
//!
//! [`Analyzer`] issues three structured-output requests against a
//! [`ChatModel`]: a five-point summary, the seven legislative section
//! categories, and the compliance rule checks in [`rules::RULES`]. Each request
//! sees only the first [`EXTRACTION_WINDOW`] characters of the document.

pub mod error;
pub mod prompts;
pub mod responses;
pub mod rules;
pub mod window;

use std::sync::atomic::{AtomicU32, Ordering};

use llm_client::{strip_code_fences, ChatModel, CompletionRequest, ResponseSchema};
use shared_types::{AnalysisResult, RuleValidation, SectionExtraction, Summary};
use tracing::info;

pub use error::{AnalysisTask, AnalyzerError};
pub use rules::{Rule, RULES};
pub use window::{truncate_to_window, EXTRACTION_WINDOW};

use responses::{RuleChecksResponse, SectionsResponse, SummaryResponse};

/// Analyzer entry point
pub struct Analyzer<M> {
    model: M,
    document_name: String,
    window: usize,
    api_calls: AtomicU32,
}

impl<M: ChatModel> Analyzer<M> {
    pub fn new(model: M, document_name: impl Into<String>) -> Self {
        Self {
            model,
            document_name: document_name.into(),
            window: EXTRACTION_WINDOW,
            api_calls: AtomicU32::new(0),
        }
    }

    /// Override the extraction window (characters)
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Number of model requests issued so far
    pub fn api_calls(&self) -> u32 {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Run all three tasks in order: summary, sections, rule checks.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        let summary = self.summarize(text).await?;
        let sections = self.extract_sections(text).await?;
        let rule_validation = self.validate_rules(text).await?;

        Ok(AnalysisResult {
            summary,
            sections,
            rule_validation,
        })
    }

    pub async fn summarize(&self, text: &str) -> Result<Summary, AnalyzerError> {
        let task = AnalysisTask::Summary;
        let prompt = prompts::summary_prompt(&self.document_name, self.window(text));

        let summary = self
            .request::<SummaryResponse>(task, prompt)
            .await?
            .into_summary()
            .map_err(|e| AnalyzerError::schema(task, e))?;

        info!(points = summary.len(), "Generated summary");
        Ok(summary)
    }

    pub async fn extract_sections(&self, text: &str) -> Result<SectionExtraction, AnalyzerError> {
        let prompt = prompts::sections_prompt(&self.document_name, self.window(text));

        let sections = self
            .request::<SectionsResponse>(AnalysisTask::Sections, prompt)
            .await?
            .into_extraction();

        let spans: usize = sections.sections.values().map(Vec::len).sum();
        info!(categories = sections.len(), spans, "Extracted legislative sections");
        Ok(sections)
    }

    pub async fn validate_rules(&self, text: &str) -> Result<RuleValidation, AnalyzerError> {
        let task = AnalysisTask::RuleValidation;
        let prompt = prompts::rules_prompt(&self.document_name, RULES, self.window(text));

        let validation = self
            .request::<RuleChecksResponse>(task, prompt)
            .await?
            .into_validation(RULES)
            .map_err(|e| AnalyzerError::schema(task, e))?;

        info!(
            total = validation.checks.len(),
            passed = validation.passed(),
            "Completed rule checks"
        );
        Ok(validation)
    }

    fn window<'a>(&self, text: &'a str) -> &'a str {
        truncate_to_window(text, self.window)
    }

    async fn request<T: ResponseSchema>(
        &self,
        task: AnalysisTask,
        user_prompt: String,
    ) -> Result<T, AnalyzerError> {
        let request = CompletionRequest::structured::<T>(prompts::SYSTEM_PROMPT, user_prompt);

        self.api_calls.fetch_add(1, Ordering::Relaxed);
        let raw = self
            .model
            .complete(request)
            .await
            .map_err(|source| AnalyzerError::Api { task, source })?;

        serde_json::from_str(strip_code_fences(&raw))
            .map_err(|e| AnalyzerError::schema(task, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_client::LlmError;
    use pretty_assertions::assert_eq;
    use shared_types::SectionCategory;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SUMMARY_JSON: &str = r#"{"purpose":"Uprates the standard allowance","key_definitions":"Section 7: relevant year","eligibility":"Universal credit claimants","obligations":"Secretary of State must uprate","enforcement":"Regulations under section 4"}"#;

    const SECTIONS_JSON: &str = r#"```json
{"definitions":["relevant year (s.7)"],"obligations":["uprate amounts (s.1)"],"responsibilities":["Secretary of State"],"eligibility":["claimants"],"payments":["standard allowance"],"penalties":[],"record_keeping":["annual report (s.5)"]}
```"#;

    fn rules_json() -> String {
        let checks: Vec<serde_json::Value> = RULES
            .iter()
            .enumerate()
            .map(|(i, r)| {
                serde_json::json!({
                    "rule_id": r.id,
                    "status": if i % 2 == 0 { "pass" } else { "fail" },
                    "evidence": format!("Section {}", i + 1),
                    "confidence": 80,
                })
            })
            .collect();
        serde_json::json!({ "checks": checks }).to_string()
    }

    /// Answers by response schema name and records every request
    struct StubModel {
        responses: HashMap<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubModel {
        fn new() -> Self {
            let responses = HashMap::from([
                ("SummaryResponse".to_string(), SUMMARY_JSON.to_string()),
                ("SectionsResponse".to_string(), SECTIONS_JSON.to_string()),
                ("RuleChecksResponse".to_string(), rules_json()),
            ]);
            Self {
                responses,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_response(mut self, schema: &str, body: &str) -> Self {
            self.responses.insert(schema.to_string(), body.to_string());
            self
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        fn model(&self) -> &str {
            "stub-model"
        }

        async fn complete(&self, request: CompletionRequest) -> llm_client::Result<String> {
            let response = self.responses.get(&request.schema_name).cloned();
            self.requests.lock().unwrap().push(request);
            response.ok_or_else(|| LlmError::from_status(500, "no canned response"))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        fn model(&self) -> &str {
            "failing-model"
        }

        async fn complete(&self, _request: CompletionRequest) -> llm_client::Result<String> {
            Err(LlmError::from_status(401, "API key not valid"))
        }
    }

    #[tokio::test]
    async fn test_analyze_produces_all_records() {
        let analyzer = Analyzer::new(StubModel::new(), "Universal Credit Act 2025");
        let result = analyzer.analyze("1 Standard allowance").await.unwrap();

        assert_eq!(result.summary.len(), 5);
        assert_eq!(result.summary.points[0], "Purpose: Uprates the standard allowance");
        assert_eq!(result.rule_validation.checks.len(), RULES.len());
        assert_eq!(result.rule_validation.passed(), 3);
        assert_eq!(analyzer.api_calls(), 3);
    }

    #[tokio::test]
    async fn test_sections_have_exactly_seven_categories() {
        let analyzer = Analyzer::new(StubModel::new(), "Act");
        let sections = analyzer.extract_sections("text").await.unwrap();

        assert_eq!(sections.len(), 7);
        let categories: Vec<_> = sections.categories().collect();
        assert_eq!(categories, SectionCategory::ALL.to_vec());
        assert_eq!(
            sections.get(SectionCategory::RecordKeeping),
            &["annual report (s.5)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_requests_carry_windowed_text_only() {
        let model = StubModel::new();
        let analyzer = Analyzer::new(model, "Act").with_window(10);
        let text = "0123456789TRUNCATED";
        analyzer.summarize(text).await.unwrap();

        let requests = analyzer.model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].user.contains("0123456789"));
        assert!(!requests[0].user.contains("TRUNCATED"));
        assert_eq!(requests[0].system, prompts::SYSTEM_PROMPT);
        assert_eq!(requests[0].schema_name, "SummaryResponse");
    }

    #[tokio::test]
    async fn test_malformed_response_is_schema_error() {
        let model = StubModel::new().with_response("SummaryResponse", "The Act is about credit.");
        let analyzer = Analyzer::new(model, "Act");

        let err = analyzer.summarize("text").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Schema { task: AnalysisTask::Summary, .. }));
    }

    #[tokio::test]
    async fn test_missing_category_is_schema_error() {
        let model = StubModel::new().with_response("SectionsResponse", r#"{"definitions":[]}"#);
        let analyzer = Analyzer::new(model, "Act");

        let err = analyzer.extract_sections("text").await.unwrap_err();
        assert_eq!(err.task(), AnalysisTask::Sections);
        assert!(matches!(err, AnalyzerError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_incomplete_rule_checks_are_schema_error() {
        let model = StubModel::new().with_response(
            "RuleChecksResponse",
            r#"{"checks":[{"rule_id":"R1","status":"pass","evidence":"s.7","confidence":90}]}"#,
        );
        let analyzer = Analyzer::new(model, "Act");

        let err = analyzer.validate_rules("text").await.unwrap_err();
        assert!(err.to_string().contains("missing result for rule R2"), "{}", err);
    }

    #[tokio::test]
    async fn test_api_failure_aborts_analysis() {
        let analyzer = Analyzer::new(FailingModel, "Act");

        let err = analyzer.analyze("text").await.unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Api {
                task: AnalysisTask::Summary,
                source: LlmError::Auth { .. }
            }
        ));
        // No further requests after the first failure
        assert_eq!(analyzer.api_calls(), 1);
    }
}
