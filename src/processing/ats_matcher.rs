//! ATS (Applicant Tracking System) compatibility scoring

use crate::processing::critical::CriticalSkillDetector;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::Vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};

pub const KEYWORD_CAP: f64 = 60.0;
pub const SKILL_CAP: f64 = 25.0;
pub const STRUCTURE_CAP: f64 = 15.0;

pub const ESSENTIAL_SECTIONS: &[&str] = &["experience", "education", "skills"];
pub const OPTIONAL_SECTIONS: &[&str] = &["projects", "certifications", "achievements", "summary"];

/// Rounded score components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword: u32,
    pub skill: u32,
    pub structure: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtsScore {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
}

/// Composes keyword, skill and structure signals into a 0-100 score
pub struct AtsScorer<'a> {
    vocabulary: &'a Vocabulary,
    processor: &'a TextProcessor,
    detector: CriticalSkillDetector<'a>,
}

impl<'a> AtsScorer<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        processor: &'a TextProcessor,
        detector: CriticalSkillDetector<'a>,
    ) -> Self {
        Self {
            vocabulary,
            processor,
            detector,
        }
    }

    /// Calculate the compatibility score of `resume_text` against `job_description`
    pub fn calculate_ats_score(&self, resume_text: &str, job_description: &str) -> AtsScore {
        let job_tokens = self.processor.tokenize(job_description);
        if job_tokens.is_empty() {
            return AtsScore::default();
        }

        let resume_tokens = self.processor.tokenize(resume_text);
        let matched = resume_tokens.intersection(&job_tokens).count();
        let keyword_score = (matched as f64 / job_tokens.len() as f64 * KEYWORD_CAP).min(KEYWORD_CAP);

        let skill_score = self.skill_score(resume_text, job_description);
        let structure_score = self.structure_score(resume_text);

        debug!(
            "ATS components: keyword {:.2} ({} of {} tokens), skill {:.2}, structure {:.2}",
            keyword_score,
            matched,
            job_tokens.len(),
            skill_score,
            structure_score
        );

        let total = (keyword_score + skill_score + structure_score).min(100.0);

        AtsScore {
            total: total.round() as u32,
            breakdown: ScoreBreakdown {
                keyword: keyword_score.round() as u32,
                skill: skill_score.round() as u32,
                structure: structure_score.round() as u32,
            },
        }
    }

    /// Skill overlap plus a bonus for skills the job marks as critical
    pub fn skill_score(&self, resume_text: &str, job_description: &str) -> f64 {
        let job_skills = self.vocabulary.extract_skills(job_description);
        if job_skills.is_empty() {
            return SKILL_CAP;
        }

        let resume_skills = self.vocabulary.extract_skills(resume_text);
        let matched = resume_skills.intersection(&job_skills).count();
        let base = matched as f64 / job_skills.len() as f64 * SKILL_CAP;

        let critical = self.detector.identify_critical_skills(job_description);
        let critical_matched = resume_skills.intersection(&critical).count();
        let critical_bonus = ((critical_matched * 2) as f64).min(10.0);

        (base + critical_bonus).min(SKILL_CAP)
    }

    /// Structural quality of the resume.
    ///
    /// The sub-scores add up to well over the cap; only the clamped sum counts.
    pub fn structure_score(&self, resume_text: &str) -> f64 {
        let lower = resume_text.to_lowercase();
        let mut score = 0.0;

        let essential_found = ESSENTIAL_SECTIONS.iter().filter(|s| lower.contains(*s)).count();
        let optional_found = OPTIONAL_SECTIONS.iter().filter(|s| lower.contains(*s)).count();
        score += essential_found as f64 / ESSENTIAL_SECTIONS.len() as f64 * 20.0;
        score += ((optional_found * 2) as f64).min(10.0);

        score += length_band_score(self.processor.word_count(resume_text));

        score += (self.processor.contact_signal_count(resume_text) as f64 * 2.5).min(10.0);

        if self.processor.has_quantifiable_metrics(resume_text) {
            score += 10.0;
        }

        score.min(STRUCTURE_CAP)
    }
}

/// 400-800 words is the sweet spot
fn length_band_score(word_count: usize) -> f64 {
    match word_count {
        400..=800 => 15.0,
        300..=399 | 801..=1000 => 10.0,
        _ => 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experienced Python developer. Skills: Python, SQL, AWS. \
        Education: BS Computer Science 2015-2019. Experience: increased sales by 20%. \
        Contact: a@b.com, 555-123-4567.";
    const JOB: &str = "Required: Python, SQL, Docker certification. Must have AWS experience.";

    fn score(resume: &str, job: &str) -> AtsScore {
        let vocab = Vocabulary::new().unwrap();
        let processor = TextProcessor::new();
        let detector = CriticalSkillDetector::new(&vocab, &processor);
        AtsScorer::new(&vocab, &processor, detector).calculate_ats_score(resume, job)
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        assert_eq!(score("", ""), AtsScore::default());
        assert_eq!(score(RESUME, ""), AtsScore::default());
        assert_eq!(score(RESUME, " ,.;! "), AtsScore::default());
    }

    #[test]
    fn test_reference_scenario() {
        let result = score(RESUME, JOB);

        // 4 of 9 job tokens, 3 of 4 skills plus 3 critical, structure saturated
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                keyword: 27,
                skill: 25,
                structure: 15,
            }
        );
        assert_eq!(result.total, 66);
    }

    #[test]
    fn test_skill_component_when_job_has_no_skills() {
        let vocab = Vocabulary::new().unwrap();
        let processor = TextProcessor::new();
        let scorer = AtsScorer::new(&vocab, &processor, CriticalSkillDetector::new(&vocab, &processor));

        assert_eq!(scorer.skill_score("nothing relevant", "Friendly office, great coffee"), SKILL_CAP);
    }

    #[test]
    fn test_skill_component_full_match_without_critical_skills() {
        let vocab = Vocabulary::new().unwrap();
        let processor = TextProcessor::new();
        let scorer = AtsScorer::new(&vocab, &processor, CriticalSkillDetector::new(&vocab, &processor));

        let skill = scorer.skill_score("I write Rust and Go", "We use Rust and Go");
        assert_eq!(skill, SKILL_CAP);

        let half = scorer.skill_score("I write Rust", "We use Rust and Go");
        assert_eq!(half, 12.5);
    }

    #[test]
    fn test_structure_score_is_clamped() {
        let vocab = Vocabulary::new().unwrap();
        let processor = TextProcessor::new();
        let scorer = AtsScorer::new(&vocab, &processor, CriticalSkillDetector::new(&vocab, &processor));

        // 5 for length alone
        assert_eq!(scorer.structure_score("hello"), 5.0);
        // 20 sections + 5 length + 2.5 contact = 27.5, clamped
        assert_eq!(scorer.structure_score("experience education skills me@x.io"), STRUCTURE_CAP);
    }

    #[test]
    fn test_length_bands() {
        assert_eq!(length_band_score(0), 5.0);
        assert_eq!(length_band_score(300), 10.0);
        assert_eq!(length_band_score(400), 15.0);
        assert_eq!(length_band_score(800), 15.0);
        assert_eq!(length_band_score(801), 10.0);
        assert_eq!(length_band_score(1000), 10.0);
        assert_eq!(length_band_score(1001), 5.0);
    }

    #[test]
    fn test_score_bounds() {
        let long_resume = format!("{} {}", RESUME, "python sql aws docker required must have ".repeat(100));
        let cases = [
            (RESUME, JOB),
            (long_resume.as_str(), JOB),
            ("", JOB),
            (JOB, JOB),
        ];

        for (resume, job) in cases {
            let result = score(resume, job);
            assert!(result.total <= 100);
            assert!(result.breakdown.keyword <= 60);
            assert!(result.breakdown.skill <= 25);
            assert!(result.breakdown.structure <= 15);
        }
    }
}
