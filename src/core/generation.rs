//! Metadata generation rules
//!
//! A rule expression is a `+`-separated list of parts. A part is either a
//! single-quoted literal (`'lux_'`) or a variable (`{process.id}`):
//!
//! ```text
//! 'lux_'+{process.id}+'_'+{pages}
//! ```

use crate::config::MetadataRuleConfig;
use crate::core::export::summary::{ExportError, ExportErrorType};
use crate::core::variables::{ProcessInfo, VariableReplacer};
use crate::domain::metadata::is_numeric;
use crate::domain::{Document, Owner};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RulePart {
    Literal(String),
    Variable(String),
}

/// A parsed generation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRule {
    parts: Vec<RulePart>,
    number_format: Option<String>,
}

impl GenerationRule {
    /// Parses an expression; text outside quotes and braces is taken literally
    pub fn parse(expression: &str, number_format: Option<&str>) -> Self {
        let parts = split_parts(expression)
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(|part| {
                if let Some(literal) = part.strip_prefix('\'').and_then(|p| p.strip_suffix('\'')) {
                    RulePart::Literal(literal.to_string())
                } else if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    RulePart::Variable(name.trim().to_string())
                } else {
                    RulePart::Literal(part)
                }
            })
            .collect();

        Self {
            parts,
            number_format: number_format
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        }
    }

    /// Evaluates the rule; unknown variables contribute nothing
    pub fn generate(&self, replacer: &VariableReplacer<'_>) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                RulePart::Literal(text) => text.clone(),
                RulePart::Variable(name) => {
                    let value = replacer.value(name).unwrap_or_default();
                    self.format_number(value)
                }
            })
            .collect()
    }

    fn format_number(&self, value: String) -> String {
        match &self.number_format {
            Some(format) if is_numeric(&value) => {
                let width = format.chars().filter(|c| *c == '0').count();
                format!("{value:0>width$}")
            }
            _ => value,
        }
    }
}

/// Splits on `+` outside single quotes, trimming each part
fn split_parts(expression: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in expression.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            '+' if !quoted => parts.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Outcome of [`apply_generation_rules`]
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Metadata attached to the logical root
    pub generated: usize,
    /// Rules whose type the ruleset does not know
    pub unknown_types: usize,
    pub problems: Vec<ExportError>,
}

/// Applies generation rules to the logical root
///
/// A rule runs when its type is known and either `force` is set or the root
/// has no metadata of that type. Rules are evaluated in order, so later rules
/// see the values generated by earlier ones. Blank results are not attached.
pub fn apply_generation_rules(
    doc: &mut Document,
    rules: &[MetadataRuleConfig],
    process: &ProcessInfo,
) -> GenerationReport {
    let mut report = GenerationReport::default();
    let Some(root) = doc.logical_root() else {
        return report;
    };
    let root = Owner::Node(root);

    for rule in rules {
        if !doc.ruleset().has_metadata_type(&rule.metadata_type) {
            tracing::debug!(metadata_type = %rule.metadata_type, "Generation rule for unknown type");
            report.unknown_types += 1;
            continue;
        }
        if !rule.force && !doc.metadata_by_type(root, &rule.metadata_type).is_empty() {
            continue;
        }

        let value = GenerationRule::parse(&rule.rule, rule.number_format.as_deref())
            .generate(&VariableReplacer::new(doc, process));
        if value.trim().is_empty() {
            continue;
        }

        match doc.add_metadata(root, &rule.metadata_type, Some(value)) {
            Ok(_) => report.generated += 1,
            Err(e) => {
                tracing::error!(metadata_type = %rule.metadata_type, error = %e, "Generation failed");
                report.problems.push(
                    ExportError::new(
                        ExportErrorType::Generation,
                        format!("Error adding metadata of type {}", rule.metadata_type),
                    )
                    .with_context(e.to_string()),
                );
            }
        }
    }
    report
}
