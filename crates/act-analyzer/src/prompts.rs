//! Prompt templates for the three analysis requests

use shared_types::SectionCategory;

use crate::rules::Rule;

pub const SYSTEM_PROMPT: &str = "You are a legislative analyst. Answer only from the supplied \
text of the Act, cite section numbers where possible, and respond with JSON matching the \
requested schema.";

pub fn summary_prompt(document_name: &str, text: &str) -> String {
    format!(
        r#"Analyze the following {document_name} and summarize it in exactly 5 points covering:

1. purpose - What is the main purpose of this Act?
2. key_definitions - What are the most important terms defined?
3. eligibility - Who is eligible under this Act?
4. obligations - What are the key obligations?
5. enforcement - What enforcement mechanisms exist?

Be concise and specific. Include section references where possible.

TEXT:
{text}
"#
    )
}

pub fn sections_prompt(document_name: &str, text: &str) -> String {
    let categories: String = SectionCategory::ALL
        .iter()
        .map(|c| format!("- \"{}\": {}\n", c.as_str(), c.description()))
        .collect();

    format!(
        r#"Extract the following sections from the {document_name}. Be specific and include section numbers.

Return a JSON object with these exact keys, each holding a list of short extracted passages
(an empty list when the Act has nothing for that category):
{categories}
TEXT:
{text}
"#
    )
}

pub fn rules_prompt(document_name: &str, rules: &[Rule], text: &str) -> String {
    let rule_list: String = rules
        .iter()
        .map(|r| format!("- {}: \"{}\"\n", r.id, r.description))
        .collect();

    format!(
        r#"Check whether the {document_name} meets each of these requirements:
{rule_list}
For every requirement return one entry in "checks" with:
- rule_id: the requirement id exactly as given
- status: "pass" or "fail"
- evidence: specific section reference or quotation supporting the status
- confidence: score from 0 to 100 for this assessment

TEXT:
{text}
"#
    )
}
