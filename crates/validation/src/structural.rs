//! StructuralCheck - Required sections of an assignment
//!
//! A section counts as present when its label appears, case-insensitively,
//! anywhere in the text of a markdown heading line (`## 3. Context`, and also
//! `## Contextual notes`) or as a bold inline label (`**Context**`). Order
//! does not matter.

use crate::check::{is_declined, Check, CheckResult, ValidationContext};
use regex::Regex;
use shared::ContentKind;
use std::sync::OnceLock;

/// Sections every assignment must carry
pub const REQUIRED_SECTIONS: [&str; 6] = [
    "Context",
    "Challenge",
    "Requirements",
    "Invariants",
    "Verification",
    "Reflection",
];

fn section_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        REQUIRED_SECTIONS
            .iter()
            .map(|section| {
                let pattern = format!(r"(?im)(^#+[ \t]+.*{0})|(\*\*{0}\*\*)", section);
                (*section, Regex::new(&pattern).expect("section pattern is valid"))
            })
            .collect()
    })
}

/// Sections not identifiable in the content, in canonical order
pub fn missing_sections(content: &str) -> Vec<&'static str> {
    section_patterns()
        .iter()
        .filter(|(_, re)| !re.is_match(content))
        .map(|(section, _)| *section)
        .collect()
}

/// Assignment section check
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralCheck;

impl StructuralCheck {
    pub const NAME: &'static str = "structural_consistency";
}

impl Check for StructuralCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, kind: ContentKind, content: &str, _context: &ValidationContext) -> CheckResult {
        if kind != ContentKind::Assignment || is_declined(content) {
            return CheckResult::pass(Self::NAME);
        }

        let reasons = missing_sections(content)
            .into_iter()
            .map(|section| format!("Missing section: {}", section))
            .collect();

        CheckResult::from_reasons(Self::NAME, reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
# Mission: Parse a CSV

## Context
You maintain a small report script.

## The Challenge
Read the file.

**Requirements**
- Use the csv module

### Invariants
Row count never changes.

## Verification
Run `python verification.py`.

## Reflection
What broke first?
";

    fn validate(content: &str) -> CheckResult {
        StructuralCheck.validate(
            ContentKind::Assignment,
            content,
            &ValidationContext::new("computing.python.csv"),
        )
    }

    #[test]
    fn test_all_sections_pass() {
        let result = validate(FULL);
        assert!(result.passed, "{:?}", result.reasons);
        assert!(result.reasons.is_empty());
        assert_eq!(result.name, "structural_consistency");
    }

    #[test]
    fn test_order_and_case_do_not_matter() {
        let content = "**reflection**\n## VERIFICATION\n# invariants\n**Requirements**\n## challenge\n## context\n";
        assert!(validate(content).passed);
    }

    #[test]
    fn test_removing_one_section_reports_exactly_it() {
        for section in REQUIRED_SECTIONS {
            let content: String = REQUIRED_SECTIONS
                .iter()
                .filter(|s| **s != section)
                .map(|s| format!("## {}\nbody\n", s))
                .collect();

            let result = validate(&content);
            assert!(!result.passed);
            assert_eq!(result.reasons, vec![format!("Missing section: {}", section)]);
        }
    }

    #[test]
    fn test_label_in_prose_does_not_count() {
        let content = FULL.replace("## Reflection", "Some reflection on the work");
        assert_eq!(missing_sections(&content), vec!["Reflection"]);
    }

    #[test]
    fn test_heading_needs_space_after_hashes() {
        let content = FULL.replace("## Context", "##Context");
        assert_eq!(missing_sections(&content), vec!["Context"]);
    }

    #[test]
    fn test_declined_content_passes() {
        assert!(validate("SKIP: learner already verified this competency").passed);
        assert!(validate("REFUSE: target is not teachable as an assignment").passed);
    }

    #[test]
    fn test_other_kinds_pass() {
        let result = StructuralCheck.validate(ContentKind::Module, "", &ValidationContext::default());
        assert!(result.passed);
    }

    #[test]
    fn test_empty_assignment_misses_everything() {
        assert_eq!(validate("").reasons.len(), REQUIRED_SECTIONS.len());
    }
}
