use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::InsurerId;
use super::scoring::ScoreResult;

/// Applicant and property details printed on the report but never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportMetadata {
    pub applicant: Option<String>,
    pub property: Option<String>,
}

/// Document model behind the underwriting report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer_id: Option<InsurerId>,
    #[serde(flatten)]
    pub metadata: ReportMetadata,
    pub generated_at: DateTime<Utc>,
    pub result: ScoreResult,
}

impl UnderwritingReport {
    pub fn new(
        insurer_id: Option<InsurerId>,
        metadata: ReportMetadata,
        result: ScoreResult,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            insurer_id,
            metadata,
            generated_at,
            result,
        }
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec!["Tenant Risk Assessment".to_string()];

        lines.push(format!(
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(insurer) = &self.insurer_id {
            lines.push(format!("Insurer: {}", insurer.as_str()));
        }
        if let Some(applicant) = &self.metadata.applicant {
            lines.push(format!("Applicant: {applicant}"));
        }
        if let Some(property) = &self.metadata.property {
            lines.push(format!("Property: {property}"));
        }

        lines.push(String::new());
        lines.push(format!("Safety score: {:.2} / 100", self.result.safety_score));
        lines.push(format!(
            "12-month default probability: {:.2}%",
            self.result.pd_12m * 100.0
        ));
        lines.push(format!("Decision: {}", self.result.decision.label()));

        lines.push(String::new());
        lines.push("Components:".to_string());
        for (name, points) in self.result.components.entries() {
            lines.push(format!("  {name:<12}{points:>8.2}"));
        }

        lines.push(String::new());
        lines.push("Notes:".to_string());
        for explanation in &self.result.explanations {
            lines.push(format!("  - {explanation}"));
        }

        lines
    }
}
