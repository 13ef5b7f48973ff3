//! Model response shapes and their conversion into analysis records

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use shared_types::{RuleCheck, RuleValidation, SectionCategory, SectionExtraction, Summary};
use tracing::warn;

use crate::rules::{find_rule, Rule};

/// Five-topic summary the model fills in
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummaryResponse {
    /// Purpose of the Act
    pub purpose: String,
    /// Key definitions in the Act
    pub key_definitions: String,
    /// Eligibility criteria
    pub eligibility: String,
    /// Key obligations
    pub obligations: String,
    /// Enforcement elements
    pub enforcement: String,
}

impl SummaryResponse {
    pub fn into_summary(self) -> Result<Summary, String> {
        let topics = [
            ("Purpose", self.purpose),
            ("Key Definitions", self.key_definitions),
            ("Eligibility", self.eligibility),
            ("Obligations", self.obligations),
            ("Enforcement", self.enforcement),
        ];

        let points = topics
            .into_iter()
            .map(|(label, text)| {
                let text = text.trim();
                if text.is_empty() {
                    Err(format!("empty summary topic '{}'", label))
                } else {
                    Ok(format!("{}: {}", label, text))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Summary { points })
    }
}

/// Extracted passages per legislative category
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SectionsResponse {
    pub definitions: Vec<String>,
    pub obligations: Vec<String>,
    pub responsibilities: Vec<String>,
    pub eligibility: Vec<String>,
    pub payments: Vec<String>,
    pub penalties: Vec<String>,
    pub record_keeping: Vec<String>,
}

impl SectionsResponse {
    pub fn into_extraction(self) -> SectionExtraction {
        let tidy = |spans: Vec<String>| -> Vec<String> {
            spans
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let sections = BTreeMap::from([
            (SectionCategory::Definitions, tidy(self.definitions)),
            (SectionCategory::Obligations, tidy(self.obligations)),
            (SectionCategory::Responsibilities, tidy(self.responsibilities)),
            (SectionCategory::Eligibility, tidy(self.eligibility)),
            (SectionCategory::Payments, tidy(self.payments)),
            (SectionCategory::Penalties, tidy(self.penalties)),
            (SectionCategory::RecordKeeping, tidy(self.record_keeping)),
        ]);

        SectionExtraction { sections }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    #[serde(alias = "Pass", alias = "PASS")]
    Pass,
    #[serde(alias = "Fail", alias = "FAIL")]
    Fail,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RuleCheckResponse {
    pub rule_id: String,
    pub status: CheckStatus,
    pub evidence: String,
    /// Confidence score from 0 to 100
    pub confidence: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RuleChecksResponse {
    pub checks: Vec<RuleCheckResponse>,
}

impl RuleChecksResponse {
    /// Match model answers to `rules`, returning checks in rule order.
    ///
    /// Every rule must be answered exactly once; answers for unknown rule ids
    /// are dropped.
    pub fn into_validation(self, rules: &[Rule]) -> Result<RuleValidation, String> {
        let mut answers: BTreeMap<&'static str, RuleCheckResponse> = BTreeMap::new();

        for answer in self.checks {
            let Some(rule) = find_rule(&answer.rule_id).filter(|r| rules.contains(*r)) else {
                warn!(rule_id = %answer.rule_id, "Ignoring check for unknown rule");
                continue;
            };
            if answers.contains_key(rule.id) {
                return Err(format!("duplicate result for rule {}", rule.id));
            }
            answers.insert(rule.id, answer);
        }

        let checks = rules
            .iter()
            .map(|rule| {
                let answer = answers
                    .remove(rule.id)
                    .ok_or_else(|| format!("missing result for rule {}", rule.id))?;

                if !answer.confidence.is_finite() || !(0.0..=100.0).contains(&answer.confidence) {
                    return Err(format!(
                        "confidence {} for rule {} outside 0-100",
                        answer.confidence, rule.id
                    ));
                }

                Ok(RuleCheck {
                    rule_id: rule.id.to_string(),
                    rule: rule.description.to_string(),
                    passed: answer.status == CheckStatus::Pass,
                    evidence: answer.evidence.trim().to_string(),
                    confidence: answer.confidence.round() as u8,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(RuleValidation { checks })
    }
}
