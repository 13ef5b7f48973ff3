//! Compliance rules every act is checked against

/// A single compliance assertion the model evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub description: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        id: "R1",
        description: "Act must define key terms",
    },
    Rule {
        id: "R2",
        description: "Act must specify eligibility criteria",
    },
    Rule {
        id: "R3",
        description: "Act must specify responsibilities of the administering authority",
    },
    Rule {
        id: "R4",
        description: "Act must include enforcement or penalties",
    },
    Rule {
        id: "R5",
        description: "Act must include payment calculation or entitlement structure",
    },
    Rule {
        id: "R6",
        description: "Act must include record-keeping or reporting requirements",
    },
];

pub fn find_rule(id: &str) -> Option<&'static Rule> {
    let id = id.trim();
    RULES.iter().find(|r| r.id.eq_ignore_ascii_case(id))
}
