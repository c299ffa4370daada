//! Report structures assembled from engine results

use crate::processing::analyzer::{EngineOutput, SkillInsights};
use crate::processing::ats_matcher::{AtsScore, KEYWORD_CAP, SKILL_CAP, STRUCTURE_CAP};
use crate::processing::linkedin::LinkedInSuggestions;
use crate::processing::recommendations::Recommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one CLI invocation produced.
///
/// Sections the command did not compute stay `None` and are skipped by
/// every formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<AtsScore>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScoreSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<LinkedInSuggestions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<SkillInsights>,

    pub metadata: ReportMetadata,
}

/// Verdict and per-component reading of a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub verdict: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    pub advisor_version: String,

    pub resume_file: String,

    pub job_file: String,

    pub processing_time_ms: u64,

    /// Number of skill phrases the vocabulary matched against
    pub vocabulary_size: usize,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, job_file: impl Into<String>, vocabulary_size: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            advisor_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_file: job_file.into(),
            processing_time_ms: 0,
            vocabulary_size,
        }
    }
}

impl AnalysisReport {
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            score: None,
            summary: None,
            recommendations: None,
            linkedin: None,
            insights: None,
            metadata,
        }
    }

    /// Full report for the `analyze` command
    pub fn from_engine_output(output: EngineOutput, metadata: ReportMetadata) -> Self {
        Self::new(metadata)
            .with_score(output.score)
            .with_recommendations(output.recommendations)
            .with_linkedin(output.linkedin)
            .with_insights(output.insights)
    }

    pub fn with_score(mut self, score: AtsScore) -> Self {
        self.summary = Some(ScoreSummary::from_score(&score));
        self.score = Some(score);
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = Some(recommendations);
        self
    }

    pub fn with_linkedin(mut self, linkedin: LinkedInSuggestions) -> Self {
        self.linkedin = Some(linkedin);
        self
    }

    pub fn with_insights(mut self, insights: SkillInsights) -> Self {
        self.insights = Some(insights);
        self
    }
}

impl ScoreSummary {
    pub fn from_score(score: &AtsScore) -> Self {
        let components = [
            (
                score.breakdown.keyword as f64 / KEYWORD_CAP,
                "Strong keyword overlap with the job description",
                "Mirror more of the job description's wording",
            ),
            (
                score.breakdown.skill as f64 / SKILL_CAP,
                "Most of the requested skills are present",
                "Cover more of the skills the job asks for",
            ),
            (
                score.breakdown.structure as f64 / STRUCTURE_CAP,
                "Well-structured resume for ATS parsing",
                "Improve sections, length and contact details",
            ),
        ];

        let mut strengths = Vec::new();
        let mut improvement_areas = Vec::new();
        for (ratio, strength, improvement) in components {
            if ratio >= 0.7 {
                strengths.push(strength.to_string());
            } else if ratio < 0.5 {
                improvement_areas.push(improvement.to_string());
            }
        }

        Self {
            verdict: verdict(score.total).to_string(),
            strengths,
            improvement_areas,
        }
    }
}

pub fn verdict(total: u32) -> &'static str {
    match total {
        90..=u32::MAX => "Excellent match - strong candidate for this role",
        80..=89 => "Very good match - minor improvements could help",
        70..=79 => "Good match - some targeted improvements recommended",
        60..=69 => "Fair match - several improvements needed",
        50..=59 => "Below average match - significant improvements required",
        _ => "Poor match - major revisions needed",
    }
}
