//! Prompt rendering.
//!
//! Templates use `{{name}}` placeholders named after [`JobData`] fields.
//! List fields render as one line per item; unknown placeholders are left
//! untouched so a typo shows up in the output instead of vanishing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::InputResult;
use crate::job::JobData;

/// The built-in template (embedded at compile time)
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/prompt_template.txt");

/// A prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template file, e.g. a customer-specific `prompt_template.txt`.
    pub fn from_file(path: &Path) -> InputResult<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Substitute every known placeholder with the job data.
    pub fn render(&self, data: &JobData) -> String {
        let values = placeholders(data);
        let mut out = String::with_capacity(self.source.len() * 2);
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match values.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Render the built-in template.
pub fn render_prompt(data: &JobData) -> String {
    PromptTemplate::default().render(data)
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn placeholders(data: &JobData) -> HashMap<&'static str, String> {
    let none = || "(none)".to_string();
    let list_or_none = |rendered: String| if rendered.is_empty() { none() } else { rendered };

    HashMap::from([
        ("company", data.company.clone()),
        ("terminal_address", data.terminal_address.clone()),
        ("contract_type", data.contract_type.clone()),
        ("time_zone", data.time_zone.clone()),
        ("job_ids", data.job_ids.join(", ")),
        ("job_titles", data.job_titles.clone()),
        ("fleet", data.fleet.clone()),
        ("route_info", data.route_info.clone()),
        ("required_experience", data.required_experience.clone()),
        ("schedule", data.schedule.clone()),
        ("start_time", data.start_time.clone()),
        ("hours_per_day", data.hours_per_day.clone()),
        ("miles_per_day", data.miles_per_day.clone()),
        ("stops_per_day", data.stops_per_day.clone()),
        ("navigation", data.navigation.clone()),
        ("weight_limit", data.weight_limit.clone()),
        ("pay", data.pay.clone()),
        ("pay_frequency", data.pay_frequency.clone()),
        ("training", data.training.clone()),
        ("overtime", data.overtime.clone()),
        ("benefits", list_or_none(bullets(&data.benefits))),
        ("screening_questions", list_or_none(numbered(&data.screening_questions))),
        ("flow_steps", list_or_none(numbered(&data.flow_steps))),
        ("script", if data.script.is_empty() { none() } else { data.script.clone() }),
    ])
}
