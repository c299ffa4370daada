//! Detection of skills a job description marks as required

use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::{SkillSet, Vocabulary};
use serde::{Deserialize, Serialize};

/// Phrases that mark nearby skills as critical
pub const CRITICAL_INDICATORS: &[&str] = &["required", "must have", "essential", "mandatory", "necessary"];

/// Characters inspected on each side of a skill mention
pub const DEFAULT_CONTEXT_WINDOW: usize = 100;

/// Which mentions of a skill are inspected for indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CriticalScan {
    /// Only the window around the first mention counts
    #[default]
    FirstOccurrence,
    /// Any mention whose window holds an indicator makes the skill critical
    AllOccurrences,
}

pub struct CriticalSkillDetector<'a> {
    vocabulary: &'a Vocabulary,
    processor: &'a TextProcessor,
    window: usize,
    scan: CriticalScan,
}

impl<'a> CriticalSkillDetector<'a> {
    pub fn new(vocabulary: &'a Vocabulary, processor: &'a TextProcessor) -> Self {
        Self {
            vocabulary,
            processor,
            window: DEFAULT_CONTEXT_WINDOW,
            scan: CriticalScan::FirstOccurrence,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_scan(mut self, scan: CriticalScan) -> Self {
        self.scan = scan;
        self
    }

    /// Skills found in `job_description` that sit near a necessity marker
    pub fn identify_critical_skills(&self, job_description: &str) -> SkillSet {
        let lower = job_description.to_lowercase();
        let mut critical = SkillSet::new();

        for skill in self.vocabulary.extract_skills(&lower) {
            let positions = self.vocabulary.occurrences(&lower, &skill);
            let inspected = match self.scan {
                CriticalScan::FirstOccurrence => &positions[..positions.len().min(1)],
                CriticalScan::AllOccurrences => &positions[..],
            };

            if inspected
                .iter()
                .any(|&pos| self.window_has_indicator(context_window(&lower, pos, self.window)))
            {
                critical.insert(skill);
            }
        }

        critical
    }

    fn window_has_indicator(&self, window: &str) -> bool {
        let tokens = self.processor.tokenize(window);
        CRITICAL_INDICATORS.iter().any(|indicator| {
            indicator
                .split_whitespace()
                .all(|word| tokens.contains(word))
        })
    }
}

/// Slice of `text` spanning `radius` characters before and after byte offset `pos`
pub fn context_window(text: &str, pos: usize, radius: usize) -> &str {
    let start = if radius == 0 {
        pos
    } else {
        text[..pos]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map_or(0, |(i, _)| i)
    };
    let end = text[pos..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| pos + i);

    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(job: &str, scan: CriticalScan) -> SkillSet {
        let vocab = Vocabulary::new().unwrap();
        let processor = TextProcessor::new();
        CriticalSkillDetector::new(&vocab, &processor)
            .with_scan(scan)
            .identify_critical_skills(job)
    }

    #[test]
    fn test_context_window() {
        let text = "0123456789abcdefghij";
        assert_eq!(context_window(text, 10, 3), "789abc");
        assert_eq!(context_window(text, 1, 5), "012345");
        assert_eq!(context_window(text, 18, 5), "defghij");
        assert_eq!(context_window(text, 4, 0), "");
    }

    #[test]
    fn test_context_window_multibyte() {
        let text = "é€python";
        let pos = text.find("python").unwrap();
        assert_eq!(context_window(text, pos, 1), "€p");
    }

    #[test]
    fn test_required_marks_skill_critical() {
        let critical = detect("Python experience is required.", CriticalScan::FirstOccurrence);
        assert!(critical.contains("python"));
    }

    #[test]
    fn test_every_indicator_marks_skill_critical() {
        for indicator in CRITICAL_INDICATORS {
            let job = format!("Terraform is {} for this role", indicator);
            let critical = detect(&job, CriticalScan::FirstOccurrence);
            assert!(critical.contains("terraform"), "indicator {:?} was not detected", indicator);
        }

        let critical = detect("Terraform is essential, SQL is necessary", CriticalScan::FirstOccurrence);
        assert!(critical.contains("terraform"));
        assert!(critical.contains("sql"));

        assert!(detect("Terraform is preferred for this role", CriticalScan::FirstOccurrence).is_empty());
    }

    #[test]
    fn test_multi_word_indicator() {
        let critical = detect("You must have Kubernetes exposure", CriticalScan::FirstOccurrence);
        assert!(critical.contains("kubernetes"));

        let not_critical = detect("You must know Kubernetes", CriticalScan::FirstOccurrence);
        assert!(not_critical.is_empty());
    }

    #[test]
    fn test_skill_far_from_indicator_is_not_critical() {
        let padding = "lorem ipsum ".repeat(20);
        let job = format!("Docker is required. {} Nice to know: Terraform.", padding);
        let critical = detect(&job, CriticalScan::FirstOccurrence);

        assert!(critical.contains("docker"));
        assert!(!critical.contains("terraform"));
    }

    #[test]
    fn test_first_occurrence_only() {
        let padding = "lorem ipsum ".repeat(20);
        let job = format!("We like Rust. {} Rust is mandatory.", padding);

        assert!(detect(&job, CriticalScan::FirstOccurrence).is_empty());
        assert!(detect(&job, CriticalScan::AllOccurrences).contains("rust"));
    }

    #[test]
    fn test_empty_job_description() {
        assert!(detect("", CriticalScan::FirstOccurrence).is_empty());
    }
}
