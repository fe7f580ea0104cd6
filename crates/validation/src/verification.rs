//! VerificationCheck - A learner must be able to check their own work
//!
//! Every assignment needs a Verification heading. Assignments targeting the
//! `computing` domain additionally need something runnable: a fenced code
//! block tagged with a scripting language, or a reference to a
//! `verification.py` script.

use crate::check::{is_declined, Check, CheckResult, ValidationContext};
use regex::Regex;
use shared::ContentKind;
use std::sync::OnceLock;

/// Domain segment whose assignments must ship an executable check
pub const EXECUTABLE_DOMAIN: &str = "computing";

/// Script file name accepted in place of an inline code block
pub const VERIFICATION_SCRIPT: &str = "verification.py";

pub const MISSING_HEADER_REASON: &str = "Missing 'Verification' section header.";
pub const MISSING_EXECUTABLE_REASON: &str = "Computing assignment missing executable verification artifacts.";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^#+[ \t]+.*Verification").expect("heading pattern is valid"))
}

fn script_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*```[ \t]*(python3?|py|bash|sh)\b").expect("fence pattern is valid")
    })
}

/// Whether the content carries something a learner can run
pub fn has_executable_artifact(content: &str) -> bool {
    script_fence_regex().is_match(content) || content.to_lowercase().contains(VERIFICATION_SCRIPT)
}

/// Verification artifact check
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationCheck;

impl VerificationCheck {
    pub const NAME: &'static str = "verification_presence";
}

impl Check for VerificationCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, kind: ContentKind, content: &str, context: &ValidationContext) -> CheckResult {
        if kind != ContentKind::Assignment || is_declined(content) {
            return CheckResult::pass(Self::NAME);
        }

        let mut reasons = Vec::new();

        if !heading_regex().is_match(content) {
            reasons.push(MISSING_HEADER_REASON.to_string());
        }

        if context.targets_domain(EXECUTABLE_DOMAIN) && !has_executable_artifact(content) {
            reasons.push(MISSING_EXECUTABLE_REASON.to_string());
        }

        CheckResult::from_reasons(Self::NAME, reasons)
    }
}
