//! Analysis engine tying the vocabulary, scorer and generators together

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::processing::ats_matcher::{AtsScore, AtsScorer};
use crate::processing::critical::{CriticalScan, CriticalSkillDetector};
use crate::processing::linkedin::{ExperienceYears, LinkedInSuggestions, ProfileCopyGenerator};
use crate::processing::recommendations::{Recommendation, RecommendationGenerator};
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::{SkillSet, Vocabulary};
use log::debug;
use serde::{Deserialize, Serialize};

/// Entry point for scoring a resume against a job description.
///
/// The engine holds only immutable tables and compiled patterns, so one
/// instance can be shared across threads; every call recomputes its result
/// from the two input strings.
pub struct AnalysisEngine {
    vocabulary: Vocabulary,
    processor: TextProcessor,
    context_window: usize,
    critical_scan: CriticalScan,
}

/// Everything the engine knows how to produce for one resume/job pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub score: AtsScore,
    pub recommendations: Vec<Recommendation>,
    pub linkedin: LinkedInSuggestions,
    pub insights: SkillInsights,
}

/// Extracted skill features, reported alongside the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInsights {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub critical_skills: Vec<String>,
    pub experience: ExperienceYears,
}

impl AnalysisEngine {
    /// Engine over the default vocabulary
    pub fn new() -> Result<Self> {
        Ok(Self::with_vocabulary(Vocabulary::new()?, &ScoringConfig::default()))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = Vocabulary::with_extra_skills(&config.vocabulary.extra_skills)?;
        Ok(Self::with_vocabulary(vocabulary, &config.scoring))
    }

    pub fn with_vocabulary(vocabulary: Vocabulary, scoring: &ScoringConfig) -> Self {
        Self {
            vocabulary,
            processor: TextProcessor::new(),
            context_window: scoring.context_window,
            critical_scan: scoring.critical_scan,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// ATS compatibility score with its breakdown
    pub fn score(&self, resume_text: &str, job_description: &str) -> AtsScore {
        AtsScorer::new(&self.vocabulary, &self.processor, self.detector())
            .calculate_ats_score(resume_text, job_description)
    }

    /// Recommendations in analyzer order
    pub fn recommend(&self, resume_text: &str, job_description: &str) -> Vec<Recommendation> {
        RecommendationGenerator::new(&self.vocabulary, &self.processor, self.detector())
            .generate_recommendations(resume_text, job_description)
    }

    pub fn linkedin(&self, resume_text: &str, job_description: &str) -> LinkedInSuggestions {
        ProfileCopyGenerator::new(&self.vocabulary, &self.processor)
            .generate_linkedin_suggestions(resume_text, job_description)
    }

    pub fn critical_skills(&self, job_description: &str) -> SkillSet {
        self.detector().identify_critical_skills(job_description)
    }

    pub fn insights(&self, resume_text: &str, job_description: &str) -> SkillInsights {
        let resume_skills = self.vocabulary.extract_skills(resume_text);
        let job_skills = self.vocabulary.extract_skills(job_description);

        SkillInsights {
            matched_skills: resume_skills.intersection(&job_skills).cloned().collect(),
            missing_skills: job_skills.difference(&resume_skills).cloned().collect(),
            critical_skills: self.critical_skills(job_description).into_iter().collect(),
            experience: ProfileCopyGenerator::new(&self.vocabulary, &self.processor)
                .estimate_experience_years(resume_text),
        }
    }

    /// Score, recommendations, LinkedIn suggestions and skill insights at once
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> EngineOutput {
        let output = EngineOutput {
            score: self.score(resume_text, job_description),
            recommendations: self.recommend(resume_text, job_description),
            linkedin: self.linkedin(resume_text, job_description),
            insights: self.insights(resume_text, job_description),
        };

        debug!(
            "Analysis complete: score {}, {} recommendations, {} headlines",
            output.score.total,
            output.recommendations.len(),
            output.linkedin.headline.len()
        );
        output
    }

    fn detector(&self) -> CriticalSkillDetector<'_> {
        CriticalSkillDetector::new(&self.vocabulary, &self.processor)
            .with_window(self.context_window)
            .with_scan(self.critical_scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::recommendations::RecommendationType;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const RESUME: &str = "Experienced Python developer. Skills: Python, SQL, AWS. \
        Education: BS Computer Science 2015-2019. Experience: increased sales by 20%. \
        Contact: a@b.com, 555-123-4567.";
    const JOB: &str = "Required: Python, SQL, Docker certification. Must have AWS experience.";

    #[test]
    fn test_analyze_reference_scenario() {
        let engine = AnalysisEngine::new().unwrap();
        let output = engine.analyze(RESUME, JOB);

        assert_eq!(output.score.total, 66);
        assert_eq!(output.recommendations.len(), 4);
        assert_eq!(output.insights.matched_skills, vec!["aws", "python", "sql"]);
        assert_eq!(output.insights.missing_skills, vec!["docker"]);
        assert_eq!(output.insights.critical_skills, vec!["aws", "docker", "python", "sql"]);
        assert_eq!(output.insights.experience, ExperienceYears::Years(4));
    }

    #[test]
    fn test_operations_are_independent() {
        let engine = AnalysisEngine::new().unwrap();
        let output = engine.analyze(RESUME, JOB);

        assert_eq!(output.score, engine.score(RESUME, JOB));
        assert_eq!(output.recommendations, engine.recommend(RESUME, JOB));
        assert_eq!(output.linkedin, engine.linkedin(RESUME, JOB));
    }

    #[test]
    fn test_degenerate_inputs() {
        let engine = AnalysisEngine::new().unwrap();
        let output = engine.analyze("", "");

        assert_eq!(output.score, AtsScore::default());
        assert_eq!(output.linkedin.about.len(), 3);
        assert!(output
            .recommendations
            .iter()
            .any(|r| r.kind == RecommendationType::Sections));
    }

    #[test]
    fn test_config_extra_skills_reach_the_scorer() {
        let mut config = Config::default();
        let mut extra = BTreeMap::new();
        extra.insert("cloud".to_string(), vec!["pulumi".to_string()]);
        config.vocabulary.extra_skills = extra;

        let engine = AnalysisEngine::from_config(&config).unwrap();
        let recs = engine.recommend("Terraform", "Pulumi is mandatory");

        assert_eq!(recs[0].kind, RecommendationType::Skills);
        assert!(recs[0].description.contains("pulumi"));
    }

    #[test]
    fn test_narrow_window_changes_critical_set() {
        let mut config = Config::default();
        config.scoring.context_window = 5;
        let engine = AnalysisEngine::from_config(&config).unwrap();

        let critical = engine.critical_skills("Required skills include a deep knowledge of Docker");
        assert!(critical.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let engine = Arc::new(AnalysisEngine::new().unwrap());
        let expected = engine.score(RESUME, JOB);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.score(RESUME, JOB))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
