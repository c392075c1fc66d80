use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::rules::{SafetyLimits, SafetyRule, Violation};
use crate::coding::CodingReport;

/// How one safety rule fared on a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// Every step is within the limit
    Passed,
    /// Zero-based rows that exceed the limit, in step order
    Violated(Vec<(usize, Violation)>),
    /// A column the rule needs is absent, so it was not evaluated
    NotApplicable,
}

/// Result of one safety rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCheck {
    /// Rule that was evaluated
    pub rule: SafetyRule,
    /// Rule with its active threshold, e.g. `Speed_RPM <= 32000`
    pub limit: String,
    /// Outcome
    pub outcome: RuleOutcome,
}

impl RuleCheck {
    pub(crate) fn new(rule: SafetyRule, limits: &SafetyLimits, outcome: RuleOutcome) -> Self {
        Self {
            rule,
            limit: rule.describe(limits),
            outcome,
        }
    }

    /// One-based step numbers that violate the rule.
    pub fn steps(&self) -> Vec<usize> {
        match &self.outcome {
            RuleOutcome::Violated(rows) => rows.iter().map(|(row, _)| row + 1).collect(),
            _ => Vec::new(),
        }
    }

    /// True when at least one step violates the rule.
    pub fn is_violated(&self) -> bool {
        matches!(self.outcome, RuleOutcome::Violated(_))
    }
}

/// Safety report for one sequence table.
///
/// Violations make the report fail. Coded values that fell back to their
/// default while loading are listed as warnings: they never fail the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Name of the sequence that was checked (usually its file path)
    pub source: String,
    /// Number of steps checked
    pub steps: usize,
    /// One entry per safety rule, in evaluation order
    pub rules: Vec<RuleCheck>,
    /// Coded values replaced by defaults while loading
    pub coding: CodingReport,
}

impl ValidationReport {
    pub(crate) fn new(source: impl Into<String>, steps: usize, rules: Vec<RuleCheck>) -> Self {
        Self {
            source: source.into(),
            steps,
            rules,
            coding: CodingReport::default(),
        }
    }

    /// Attach the coding fallbacks recorded while the table was loaded.
    pub fn with_coding(mut self, coding: CodingReport) -> Self {
        self.coding = coding;
        self
    }

    /// True when any step exceeds a limit.
    pub fn has_failures(&self) -> bool {
        self.rules.iter().any(RuleCheck::is_violated)
    }

    /// True when coded values were replaced by defaults.
    pub fn has_warnings(&self) -> bool {
        !self.coding.is_clean()
    }

    /// Rules with at least one violation.
    pub fn violated_rules(&self) -> impl Iterator<Item = &RuleCheck> {
        self.rules.iter().filter(|check| check.is_violated())
    }

    /// Total number of flagged cells across all rules.
    pub fn violation_count(&self) -> usize {
        self.rules
            .iter()
            .map(|check| match &check.outcome {
                RuleOutcome::Violated(rows) => rows.len(),
                _ => 0,
            })
            .sum()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(|tone, text| match tone {
                Tone::Title => style(text).bold().cyan().to_string(),
                Tone::Pass => style(text).green().to_string(),
                Tone::Fail => style(text).red().bold().to_string(),
                Tone::Warn => style(text).yellow().to_string(),
                Tone::Muted => style(text).dim().to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }

    fn render(&self, paint: impl Fn(Tone, &str) -> String) -> String {
        let mut out = String::new();
        let mut line = |text: String| {
            out.push_str(&text);
            out.push('\n');
        };

        line(paint(Tone::Title, "Sequence Safety Report"));
        line(format!("Sequence: {}", self.source));
        line(format!("Steps checked: {}", self.steps));
        line(String::new());

        for check in &self.rules {
            let heading = format!("{} ({})", check.rule, check.limit);
            match &check.outcome {
                RuleOutcome::Passed => line(format!("{} {}", paint(Tone::Pass, "[PASS]"), heading)),
                RuleOutcome::NotApplicable => line(paint(
                    Tone::Muted,
                    &format!("[N/A ] {}: column not present", heading),
                )),
                RuleOutcome::Violated(rows) => {
                    line(format!("{} {}", paint(Tone::Fail, "[FAIL]"), heading));
                    for (row, violation) in rows {
                        line(format!("       step {}: {}", row + 1, violation.message));
                    }
                }
            }
        }

        if self.has_warnings() {
            line(format!(
                "{} {} coded value(s) replaced by defaults",
                paint(Tone::Warn, "[WARN]"),
                self.coding.fallbacks().len()
            ));
            for fallback in self.coding.fallbacks() {
                line(format!(
                    "       step {}, {}: {:?} -> {}",
                    fallback.row + 1,
                    fallback.column,
                    fallback.original,
                    fallback.substituted
                ));
            }
        }

        line(String::new());
        let verdict = if self.has_failures() {
            paint(
                Tone::Fail,
                &format!(
                    "Safety limits EXCEEDED: {} cell(s) in {} rule(s)",
                    self.violation_count(),
                    self.violated_rules().count()
                ),
            )
        } else if self.has_warnings() {
            paint(Tone::Warn, "Within limits, with coding warnings")
        } else {
            paint(Tone::Pass, "Within limits")
        };
        line(verdict);

        out
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Title,
    Pass,
    Fail,
    Warn,
    Muted,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, text| text.to_string()))
    }
}
