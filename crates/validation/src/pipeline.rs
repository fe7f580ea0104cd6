//! ValidationPipeline - Run every check over one artifact

use crate::check::{Check, CheckResult, ValidationContext};
use crate::structural::StructuralCheck;
use crate::verification::VerificationCheck;
use serde::Serialize;
use shared::ContentKind;
use tracing::debug;

/// Combined outcome of all checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// True only if every check passed
    pub passed: bool,
    /// One result per check, in pipeline order
    pub results: Vec<CheckResult>,
}

impl PipelineReport {
    /// All failure reasons, in check order
    pub fn reasons(&self) -> Vec<&str> {
        self.results
            .iter()
            .flat_map(|r| r.reasons.iter().map(String::as_str))
            .collect()
    }

    /// Names of the checks that failed
    pub fn failed_checks(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Ordered set of checks
pub struct ValidationPipeline {
    checks: Vec<Box<dyn Check>>,
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("checks", &self.check_names())
            .finish()
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValidationPipeline {
    /// Pipeline with no checks
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Structural and verification checks
    pub fn standard() -> Self {
        Self::empty().with_check(StructuralCheck).with_check(VerificationCheck)
    }

    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check; a failing check never stops later ones
    pub fn run(&self, kind: ContentKind, content: &str, context: &ValidationContext) -> PipelineReport {
        let results: Vec<CheckResult> = self
            .checks
            .iter()
            .map(|check| {
                let result = check.validate(kind, content, context);
                debug!(
                    check = check.name(),
                    passed = result.passed,
                    target = %context.target_id,
                    "validation check finished"
                );
                result
            })
            .collect();

        PipelineReport {
            passed: results.iter().all(|r| r.passed),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::REQUIRED_SECTIONS;
    use crate::verification::MISSING_EXECUTABLE_REASON;

    struct AlwaysFails;

    impl Check for AlwaysFails {
        fn name(&self) -> &'static str {
            "always_fails"
        }

        fn validate(&self, _kind: ContentKind, _content: &str, _context: &ValidationContext) -> CheckResult {
            CheckResult::from_reasons(self.name(), vec!["first check failed".to_string()])
        }
    }

    fn complete_assignment() -> String {
        let mut content: String = REQUIRED_SECTIONS.iter().map(|s| format!("## {}\nbody\n", s)).collect();
        content.push_str("```python\nassert solve() == 42\n```\n");
        content
    }

    #[test]
    fn test_standard_pipeline_order() {
        assert_eq!(
            ValidationPipeline::standard().check_names(),
            vec!["structural_consistency", "verification_presence"]
        );
    }

    #[test]
    fn test_complete_assignment_passes() {
        let report = ValidationPipeline::standard().run(
            ContentKind::Assignment,
            &complete_assignment(),
            &ValidationContext::new("computing.python.basics"),
        );
        assert!(report.passed);
        assert!(report.reasons().is_empty());
        assert_eq!(report.results.len(), 2);
    }

    #[test]
    fn test_every_check_runs_after_a_failure() {
        let pipeline = ValidationPipeline::empty()
            .with_check(AlwaysFails)
            .with_check(StructuralCheck)
            .with_check(VerificationCheck);

        let report = pipeline.run(
            ContentKind::Assignment,
            "## Context\nNo code here.\n",
            &ValidationContext::new("computing.python.basics"),
        );

        assert!(!report.passed);
        assert_eq!(report.results.len(), 3);
        assert_eq!(
            report.failed_checks(),
            vec!["always_fails", "structural_consistency", "verification_presence"]
        );

        let reasons = report.reasons();
        assert_eq!(reasons[0], "first check failed");
        assert!(reasons.contains(&"Missing section: Reflection"));
        assert_eq!(*reasons.last().unwrap(), MISSING_EXECUTABLE_REASON);
    }

    #[test]
    fn test_reasons_are_union_of_checks() {
        let content = complete_assignment().replace("## Invariants", "Invariants");
        let report = ValidationPipeline::standard().run(
            ContentKind::Assignment,
            &content.replace("```python", "```"),
            &ValidationContext::new("computing.python.basics"),
        );

        assert_eq!(
            report.reasons(),
            vec!["Missing section: Invariants", MISSING_EXECUTABLE_REASON]
        );
    }

    #[test]
    fn test_empty_pipeline_passes() {
        let report = ValidationPipeline::empty().run(ContentKind::Assignment, "", &ValidationContext::default());
        assert!(report.passed);
    }
}
