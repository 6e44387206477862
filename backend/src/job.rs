//! Job information extracted from the job description and job details files.
//!
//! The job description is the export of the carrier onboarding form. Its
//! keys are the form's question labels, so several of them contain spaces,
//! parentheses and trailing question marks.

use serde::Serialize;
use serde_json::Value;

use crate::error::{InputError, InputResult};
use crate::inputs::{JOB_DESC_FIELD, JOB_DETAIL_FIELD};

/// Stop allowance quoted to every candidate.
pub const STOPS_PER_DAY: &str = "150/day (extra $1 for additional stops)";
/// Navigation policy.
pub const NAVIGATION: &str = "Allowed";
/// Package weight limit.
pub const WEIGHT_LIMIT: &str = "Up to 150 lbs (dolly provided)";
/// Overtime policy.
pub const OVERTIME: &str = "After 40 hrs/week";
/// Benefit listed before the form's own benefits.
pub const SICK_LEAVE: &str = "Sick Leave: 3 days after 60 days";
/// Benefit listed after the form's own benefits.
pub const DIRECT_DEPOSIT: &str = "Direct deposit: Yes";

/// Section of the job description holding the onboarding form answers.
const INFO: &str = "additionalInformation";

/// Everything the prompt template needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobData {
    pub company: String,
    pub terminal_address: String,
    pub contract_type: String,
    pub time_zone: String,
    pub job_ids: Vec<String>,
    pub job_titles: String,
    pub fleet: String,
    pub route_info: String,
    pub required_experience: String,
    pub schedule: String,
    pub start_time: String,
    pub hours_per_day: String,
    pub miles_per_day: String,
    pub stops_per_day: String,
    pub navigation: String,
    pub weight_limit: String,
    pub pay: String,
    pub pay_frequency: String,
    pub training: String,
    pub overtime: String,
    pub benefits: Vec<String>,
    pub screening_questions: Vec<String>,
    pub flow_steps: Vec<String>,
    pub script: String,
}

impl JobData {
    /// Build the job data from the two JSON documents and the parsed flow/script.
    pub fn extract(
        job_desc: &Value,
        job_details: &Value,
        flow_steps: Vec<String>,
        script: String,
    ) -> InputResult<Self> {
        let desc = Lookup::new(job_desc, JOB_DESC_FIELD);

        let job_types = desc.array(&["recruitingContact", "jobType"])?;
        let job_ids = job_types
            .iter()
            .enumerate()
            .map(|(i, job)| {
                Lookup::new(job, JOB_DESC_FIELD)
                    .text(&["jobId"])
                    .map_err(|_| desc.missing(&format!("recruitingContact.jobType[{}].jobId", i)))
            })
            .collect::<InputResult<Vec<_>>>()?;
        let job_titles = job_types
            .iter()
            .enumerate()
            .map(|(i, job)| {
                Lookup::new(job, JOB_DESC_FIELD)
                    .text(&["jobName"])
                    .map_err(|_| desc.missing(&format!("recruitingContact.jobType[{}].jobName", i)))
            })
            .collect::<InputResult<Vec<_>>>()?
            .join(", ");

        let driver = |key: &'static str| desc.text(&[INFO, "Driver Information", key]);
        let schedule = |key: &'static str| desc.text(&[INFO, "Driver Schedule", key]);
        let benefits = |key: &'static str| desc.text(&[INFO, "Benefits", key]);

        // An unanswered benefits question adds no bullet
        let other_benefits = benefits("Other Benefits")?;
        let benefit_list = [SICK_LEAVE.to_string(), other_benefits, DIRECT_DEPOSIT.to_string()]
            .into_iter()
            .filter(|benefit| !benefit.is_empty())
            .collect();

        Ok(Self {
            company: desc.text(&["recruitingContact", "company"])?,
            terminal_address: desc.text(&["recruitingContact", "terminalAddress"])?,
            contract_type: desc.text(&["recruitingContact", "jobCategory"])?,
            time_zone: desc.text(&["recruitingContact", "timeZone"])?,
            job_ids,
            job_titles,
            fleet: desc.text(&[
                INFO,
                "Miscellaneous",
                "Trucks(Can you describe your fleet in brief )",
            ])?,
            route_info: driver("Types of Routes")?,
            required_experience: driver("Minimum Required Experience for Drivers")?,
            schedule: schedule("Work Schedules")?,
            start_time: schedule("Start time for Driver")?,
            hours_per_day: schedule("Typical hours run each day")?,
            miles_per_day: schedule("Typical Miles Driven each day")?,
            stops_per_day: STOPS_PER_DAY.to_string(),
            navigation: NAVIGATION.to_string(),
            weight_limit: WEIGHT_LIMIT.to_string(),
            pay: benefits("How much do you Pay your drivers ?")?,
            pay_frequency: benefits("Payday")?,
            training: benefits("Training")?,
            overtime: OVERTIME.to_string(),
            benefits: benefit_list,
            screening_questions: screening_questions(job_details)?,
            flow_steps,
            script,
        })
    }
}

/// `questionData[].question`; a document without `questionData` has none.
fn screening_questions(job_details: &Value) -> InputResult<Vec<String>> {
    let Some(questions) = job_details.get("questionData") else {
        return Ok(Vec::new());
    };
    let questions = questions.as_array().ok_or_else(|| InputError::InvalidValue {
        field: JOB_DETAIL_FIELD.to_string(),
        path: "questionData".to_string(),
    })?;

    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            Lookup::new(q, JOB_DETAIL_FIELD)
                .text(&["question"])
                .map_err(|_| InputError::MissingKey {
                    field: JOB_DETAIL_FIELD.to_string(),
                    path: format!("questionData[{}].question", i),
                })
        })
        .collect()
}

/// Parse an uploaded JSON file.
pub fn parse_json(field: &str, bytes: &[u8]) -> InputResult<Value> {
    let text = crate::parser::decode_text(bytes);
    serde_json::from_str(&text).map_err(|e| InputError::InvalidJson {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Path lookups into a JSON document, reporting the dotted path on failure.
struct Lookup<'a> {
    root: &'a Value,
    field: &'static str,
}

impl<'a> Lookup<'a> {
    fn new(root: &'a Value, field: &'static str) -> Self {
        Self { root, field }
    }

    fn missing(&self, path: &str) -> InputError {
        InputError::MissingKey {
            field: self.field.to_string(),
            path: path.to_string(),
        }
    }

    fn invalid(&self, path: &[&str]) -> InputError {
        InputError::InvalidValue {
            field: self.field.to_string(),
            path: path.join("."),
        }
    }

    /// Value at `path`; only an absent key is missing, `null` is a value.
    fn get(&self, path: &[&str]) -> InputResult<&'a Value> {
        path.iter()
            .try_fold(self.root, |value, key| value.get(key))
            .ok_or_else(|| self.missing(&path.join(".")))
    }

    /// Answer text at `path`, see [`answer_text`].
    fn text(&self, path: &[&str]) -> InputResult<String> {
        Ok(answer_text(self.get(path)?))
    }

    fn array(&self, path: &[&str]) -> InputResult<&'a Vec<Value>> {
        self.get(path)?
            .as_array()
            .ok_or_else(|| self.invalid(path))
    }
}

/// Render a form answer as prompt text.
///
/// Strings as is, numbers and booleans as JSON text, `null` as empty,
/// multi-select arrays joined with `", "`, objects as compact JSON.
fn answer_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) | Value::Object(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(answer_text)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
