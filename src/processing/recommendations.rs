//! Prioritized improvement recommendations
//!
//! Seven independent analyzers run in a fixed order over the same pair of
//! texts. Each contributes at most one [`Recommendation`]; the combined list
//! keeps analyzer order and is not ranked by priority.

use crate::processing::ats_matcher::ESSENTIAL_SECTIONS;
use crate::processing::critical::CriticalSkillDetector;
use crate::processing::text_processor::{ContactKind, TextProcessor};
use crate::processing::vocabulary::Vocabulary;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const CERTIFICATION_KEYWORDS: &[&str] = &["certification", "certified", "certificate", "license", "credential"];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Skills,
    Certifications,
    Content,
    Achievements,
    Keywords,
    Contact,
    Sections,
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationType::Skills => "skills",
            RecommendationType::Certifications => "certifications",
            RecommendationType::Content => "content",
            RecommendationType::Achievements => "achievements",
            RecommendationType::Keywords => "keywords",
            RecommendationType::Contact => "contact",
            RecommendationType::Sections => "sections",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Recommendation {
    fn new(kind: RecommendationType, title: &str, description: String, priority: Priority) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description,
            priority,
        }
    }
}

/// Stable sort putting high-priority recommendations first
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| r.priority);
}

pub struct RecommendationGenerator<'a> {
    vocabulary: &'a Vocabulary,
    processor: &'a TextProcessor,
    detector: CriticalSkillDetector<'a>,
}

impl<'a> RecommendationGenerator<'a> {
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

    /// Run every analyzer and collect the ones that fired
    pub fn generate_recommendations(&self, resume_text: &str, job_description: &str) -> Vec<Recommendation> {
        let recommendations: Vec<Recommendation> = [
            self.analyze_missing_skills(resume_text, job_description),
            self.analyze_certifications(resume_text, job_description),
            self.analyze_content_length(resume_text),
            self.analyze_achievements(resume_text),
            self.analyze_keywords(resume_text, job_description),
            self.analyze_contact_info(resume_text),
            self.analyze_sections(resume_text),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!("{} of 7 analyzers produced a recommendation", recommendations.len());
        recommendations
    }

    pub fn analyze_missing_skills(&self, resume_text: &str, job_description: &str) -> Option<Recommendation> {
        let resume_skills = self.vocabulary.extract_skills(resume_text);
        let job_skills = self.vocabulary.extract_skills(job_description);
        let missing: BTreeSet<&String> = job_skills.difference(&resume_skills).collect();

        if missing.is_empty() {
            return None;
        }

        let critical = self.detector.identify_critical_skills(job_description);
        let high_priority: Vec<&str> = missing
            .iter()
            .filter(|s| critical.contains(s.as_str()))
            .map(|s| s.as_str())
            .collect();

        if !high_priority.is_empty() {
            return Some(Recommendation::new(
                RecommendationType::Skills,
                "Add Critical Missing Skills",
                format!(
                    "These skills are explicitly required in the job description: {}. \
                     Consider gaining experience or certifications in these areas.",
                    high_priority.iter().take(5).copied().collect::<Vec<_>>().join(", ")
                ),
                Priority::High,
            ));
        }

        Some(Recommendation::new(
            RecommendationType::Skills,
            "Add Recommended Skills",
            format!(
                "These skills are mentioned in the job description: {}. \
                 Adding these will improve your match score.",
                missing.iter().take(5).map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
            ),
            Priority::Medium,
        ))
    }

    pub fn analyze_certifications(&self, resume_text: &str, job_description: &str) -> Option<Recommendation> {
        let resume_lower = resume_text.to_lowercase();
        let job_lower = job_description.to_lowercase();

        let mentioned: Vec<&str> = CERTIFICATION_KEYWORDS
            .iter()
            .copied()
            .filter(|k| job_lower.contains(k))
            .collect();
        let resume_has_any = CERTIFICATION_KEYWORDS.iter().any(|k| resume_lower.contains(k));

        if mentioned.is_empty() || resume_has_any {
            return None;
        }

        let mut contexts: BTreeSet<String> = BTreeSet::new();
        for keyword in mentioned {
            let escaped = regex::escape(keyword);
            let pattern = format!(r"\b\w+\s+\w+\s+{kw}|\b{kw}\s+\w+\s+\w+", kw = escaped);
            // The keyword is escaped, so the pattern always compiles
            if let Ok(re) = Regex::new(&pattern) {
                contexts.extend(re.find_iter(&job_lower).map(|m| m.as_str().to_string()));
            }
        }

        // Only the first three characters of the joined snippets are kept
        let examples = if contexts.is_empty() {
            "industry-relevant".to_string()
        } else {
            let joined = contexts.into_iter().collect::<Vec<_>>().join(", ");
            joined.chars().take(3).collect()
        };

        Some(Recommendation::new(
            RecommendationType::Certifications,
            "Add Relevant Certifications",
            format!(
                "The job description mentions certifications. Consider adding {} \
                 certifications to improve your credibility.",
                examples
            ),
            Priority::Medium,
        ))
    }

    pub fn analyze_content_length(&self, resume_text: &str) -> Option<Recommendation> {
        let word_count = self.processor.word_count(resume_text);

        if word_count < 300 {
            Some(Recommendation::new(
                RecommendationType::Content,
                "Expand Resume Content",
                format!(
                    "Your resume is quite short ({} words). Optimal resumes are 400-800 words. \
                     Add more details about your experiences, projects, and achievements.",
                    word_count
                ),
                Priority::High,
            ))
        } else if word_count > 1000 {
            Some(Recommendation::new(
                RecommendationType::Content,
                "Condense Resume Content",
                format!(
                    "Your resume is lengthy ({} words). Consider making it more concise \
                     (optimal: 400-800 words) by removing less relevant information.",
                    word_count
                ),
                Priority::Medium,
            ))
        } else {
            None
        }
    }

    pub fn analyze_achievements(&self, resume_text: &str) -> Option<Recommendation> {
        if self.processor.has_quantifiable_achievements(resume_text) {
            return None;
        }

        Some(Recommendation::new(
            RecommendationType::Achievements,
            "Add Quantifiable Achievements",
            "Include numbers and metrics to showcase your impact. Examples: \"Increased sales by 20%\", \
             \"Reduced costs by $50K\", \"Managed a team of 10 people\"."
                .to_string(),
            Priority::High,
        ))
    }

    pub fn analyze_keywords(&self, resume_text: &str, job_description: &str) -> Option<Recommendation> {
        let resume_tokens = self.processor.tokenize(resume_text);
        let job_tokens = self.processor.tokenize(job_description);

        let important_missing: Vec<&str> = job_tokens
            .difference(&resume_tokens)
            .map(|t| t.as_str())
            .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
            .collect();

        if important_missing.len() <= 5 {
            return None;
        }

        Some(Recommendation::new(
            RecommendationType::Keywords,
            "Optimize Keywords",
            format!(
                "Include these important keywords from the job description: {}. \
                 This will significantly improve your ATS score.",
                important_missing.iter().take(8).copied().collect::<Vec<_>>().join(", ")
            ),
            Priority::High,
        ))
    }

    pub fn analyze_contact_info(&self, resume_text: &str) -> Option<Recommendation> {
        let missing: Vec<&str> = [
            ContactKind::Email,
            ContactKind::Phone,
            ContactKind::LinkedIn,
            ContactKind::Portfolio,
        ]
        .iter()
        .filter(|kind| !self.processor.has_contact(resume_text, **kind))
        .map(|kind| kind.label())
        .collect();

        if missing.is_empty() {
            return None;
        }

        Some(Recommendation::new(
            RecommendationType::Contact,
            "Add Missing Contact Information",
            format!(
                "Consider adding your {} to make it easier for recruiters to contact you.",
                missing.join(", ")
            ),
            Priority::Low,
        ))
    }

    pub fn analyze_sections(&self, resume_text: &str) -> Option<Recommendation> {
        let lower = resume_text.to_lowercase();
        let missing: Vec<&str> = ESSENTIAL_SECTIONS
            .iter()
            .copied()
            .filter(|s| !lower.contains(s))
            .collect();

        if missing.is_empty() {
            return None;
        }

        Some(Recommendation::new(
            RecommendationType::Sections,
            "Add Essential Sections",
            format!(
                "Your resume is missing these important sections: {}. \
                 Add these to improve readability and ATS parsing.",
                missing.join(", ")
            ),
            Priority::High,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Experienced Python developer. Skills: Python, SQL, AWS. \
        Education: BS Computer Science 2015-2019. Experience: increased sales by 20%. \
        Contact: a@b.com, 555-123-4567.";
    const JOB: &str = "Required: Python, SQL, Docker certification. Must have AWS experience.";

    struct Fixture {
        vocab: Vocabulary,
        processor: TextProcessor,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                vocab: Vocabulary::new().unwrap(),
                processor: TextProcessor::new(),
            }
        }

        fn generator(&self) -> RecommendationGenerator<'_> {
            let detector = CriticalSkillDetector::new(&self.vocab, &self.processor);
            RecommendationGenerator::new(&self.vocab, &self.processor, detector)
        }
    }

    #[test]
    fn test_reference_scenario() {
        let fixture = Fixture::new();
        let recs = fixture.generator().generate_recommendations(RESUME, JOB);

        let kinds: Vec<(RecommendationType, Priority)> = recs.iter().map(|r| (r.kind, r.priority)).collect();
        assert_eq!(
            kinds,
            vec![
                (RecommendationType::Skills, Priority::High),
                (RecommendationType::Certifications, Priority::Medium),
                (RecommendationType::Content, Priority::High),
                (RecommendationType::Contact, Priority::Low),
            ]
        );
        assert!(recs[0].description.contains("docker"));
        assert!(recs[1].description.contains("industry-relevant"));
        assert!(recs[3].description.contains("linkedin, portfolio"));
    }

    #[test]
    fn test_missing_skills_none_when_covered() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        assert!(generator.analyze_missing_skills("Rust, Go, Docker", "Docker and Rust required").is_none());
        assert!(generator.analyze_missing_skills("anything", "no skills here at all").is_none());
    }

    #[test]
    fn test_missing_skills_medium_when_not_critical() {
        let fixture = Fixture::new();
        let rec = fixture
            .generator()
            .analyze_missing_skills("Rust", "Nice to have: Rust, Kafka-free Redis, Terraform")
            .unwrap();

        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.title, "Add Recommended Skills");
        assert!(rec.description.contains("redis, terraform"));
    }

    #[test]
    fn test_missing_skills_lists_at_most_five_sorted() {
        let fixture = Fixture::new();
        let rec = fixture
            .generator()
            .analyze_missing_skills("", "Mandatory: vue, sql, aws, java, ruby, php, swift")
            .unwrap();

        assert_eq!(rec.priority, Priority::High);
        assert!(rec.description.contains("aws, java, php, ruby, sql."));
    }

    #[test]
    fn test_certifications_with_context() {
        let fixture = Fixture::new();
        let rec = fixture
            .generator()
            .analyze_certifications("No creds", "Candidates should hold an AWS Solutions certification")
            .unwrap();

        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(
            rec.description,
            "The job description mentions certifications. Consider adding aws \
             certifications to improve your credibility."
        );

        let rec = fixture
            .generator()
            .analyze_certifications("No creds", "Hold an über große certificate")
            .unwrap();
        assert!(rec.description.contains("Consider adding übe certifications"));
    }

    #[test]
    fn test_certifications_skipped_when_resume_has_one() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        assert!(generator.analyze_certifications("PMP certified", "Certification preferred").is_none());
        assert!(generator.analyze_certifications("anything", "No paperwork needed").is_none());
    }

    #[test]
    fn test_content_length() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        let short = generator.analyze_content_length("too short").unwrap();
        assert_eq!(short.priority, Priority::High);
        assert!(short.description.contains("(2 words)"));

        assert!(generator.analyze_content_length(&"word ".repeat(500)).is_none());

        let long = generator.analyze_content_length(&"word ".repeat(1001)).unwrap();
        assert_eq!(long.priority, Priority::Medium);
        assert_eq!(long.title, "Condense Resume Content");
    }

    #[test]
    fn test_achievements() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        assert!(generator.analyze_achievements("Cut costs 15%").is_none());
        assert!(generator.analyze_achievements("Achieved 3 certifications").is_none());

        let rec = generator.analyze_achievements("Did many things").unwrap();
        assert_eq!(rec.kind, RecommendationType::Achievements);
        assert_eq!(rec.priority, Priority::High);
    }

    #[test]
    fn test_keyword_gap_threshold() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        // Exactly five qualifying tokens stay quiet
        assert!(generator
            .analyze_keywords("", "alpha bravo charlie delta echo the of an")
            .is_none());

        let rec = generator
            .analyze_keywords("alpha", "alpha bravo charlie delta echo foxtrot golf hotel india juliet")
            .unwrap();
        assert_eq!(rec.priority, Priority::High);
        assert!(rec
            .description
            .contains("bravo, charlie, delta, echo, foxtrot, golf, hotel, india."));
    }

    #[test]
    fn test_contact_info() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        let complete = "a@b.com 555-123-4567 linkedin.com/in/ab https://ab.dev";
        assert!(generator.analyze_contact_info(complete).is_none());

        let rec = generator.analyze_contact_info("nothing").unwrap();
        assert_eq!(rec.priority, Priority::Low);
        assert!(rec.description.contains("email, phone, linkedin, portfolio"));
    }

    #[test]
    fn test_sections() {
        let fixture = Fixture::new();
        let generator = fixture.generator();

        assert!(generator.analyze_sections("EXPERIENCE / Education / Skills").is_none());

        let rec = generator.analyze_sections("Experience only").unwrap();
        assert!(rec.description.contains("education, skills"));
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let fixture = Fixture::new();
        let mut recs = fixture.generator().generate_recommendations(RESUME, JOB);
        sort_by_priority(&mut recs);

        let kinds: Vec<RecommendationType> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationType::Skills,
                RecommendationType::Content,
                RecommendationType::Certifications,
                RecommendationType::Contact,
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let rec = Recommendation::new(RecommendationType::Keywords, "T", "D".to_string(), Priority::High);
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["type"], "keywords");
        assert_eq!(json["priority"], "high");
    }
}
