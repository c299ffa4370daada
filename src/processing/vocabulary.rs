//! Fixed skill, job-title and industry catalogs with whole-phrase matching

use crate::error::{AdvisorError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeMap, BTreeSet};

/// Set of vocabulary phrases found in a text
pub type SkillSet = BTreeSet<String>;

/// A named group of skill phrases
#[derive(Debug, Clone)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Immutable vocabulary shared by every component of the engine.
///
/// All skill phrases are lowercase. Matching goes through a single
/// Aho-Corasick automaton built over the deduplicated phrase list, so a scan
/// costs one pass over the text regardless of vocabulary size.
pub struct Vocabulary {
    categories: Vec<SkillCategory>,
    phrases: Vec<String>,
    matcher: AhoCorasick,
    job_titles: Vec<String>,
    industries: Vec<String>,
}

impl Vocabulary {
    /// Create the default vocabulary
    pub fn new() -> Result<Self> {
        Self::with_extra_skills(&BTreeMap::new())
    }

    /// Create the default vocabulary merged with additional categories.
    ///
    /// Phrases for an existing category are appended to it; unknown category
    /// names become new categories.
    pub fn with_extra_skills(extra: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut categories = Self::default_categories();

        for (name, skills) in extra {
            let skills: Vec<String> = skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();

            match categories.iter_mut().find(|c| &c.name == name) {
                Some(category) => {
                    for skill in skills {
                        if !category.skills.contains(&skill) {
                            category.skills.push(skill);
                        }
                    }
                }
                None => categories.push(SkillCategory {
                    name: name.clone(),
                    skills,
                }),
            }
        }

        let mut phrases: Vec<String> = Vec::new();
        for skill in categories.iter().flat_map(|c| c.skills.iter()) {
            if !phrases.contains(skill) {
                phrases.push(skill.clone());
            }
        }

        // Standard semantics are required for overlapping search
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| AdvisorError::Vocabulary(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            categories,
            phrases,
            matcher,
            job_titles: Self::default_job_titles(),
            industries: Self::default_industries(),
        })
    }

    /// Find every vocabulary skill occurring as a whole phrase in `text`
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let lower = text.to_lowercase();
        self.whole_phrase_matches(&lower)
            .map(|(pattern, _)| self.phrases[pattern].clone())
            .collect()
    }

    /// Byte offsets (into `lower`) of every whole-phrase occurrence of `skill`.
    ///
    /// `lower` must already be lowercased.
    pub fn occurrences(&self, lower: &str, skill: &str) -> Vec<usize> {
        self.whole_phrase_matches(lower)
            .filter(|(pattern, _)| self.phrases[*pattern] == skill)
            .map(|(_, start)| start)
            .collect()
    }

    /// Whole-phrase occurrences of all skills in `lower`, as (pattern, start)
    /// pairs in order of their end position
    pub(crate) fn whole_phrase_matches<'a>(
        &'a self,
        lower: &'a str,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.matcher
            .find_overlapping_iter(lower)
            .filter(move |m| is_phrase_boundary(lower, m.start(), m.end()))
            .map(|m| (m.pattern().as_usize(), m.start()))
    }

    /// Job titles mentioned in `text`, in catalog order
    pub fn titles_in(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.job_titles
            .iter()
            .filter(|t| lower.contains(t.as_str()))
            .map(|t| t.as_str())
            .collect()
    }

    /// Industries mentioned in `text`, in catalog order
    pub fn industries_in(&self, text: &str) -> Vec<&str> {
        let lower = text.to_lowercase();
        self.industries
            .iter()
            .filter(|i| lower.contains(i.as_str()))
            .map(|i| i.as_str())
            .collect()
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.phrases.iter().any(|p| p == skill)
    }

    /// Number of distinct skill phrases
    pub fn skill_count(&self) -> usize {
        self.phrases.len()
    }

    fn default_categories() -> Vec<SkillCategory> {
        let table: [(&str, &[&str]); 8] = [
            ("programming", &[
                "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift",
                "kotlin", "go", "rust", "typescript",
            ]),
            ("web", &[
                "html", "css", "react", "angular", "vue", "django", "flask", "node.js",
                "express", "spring", "next.js", "nuxt.js",
            ]),
            ("database", &[
                "sql", "mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite",
                "dynamodb", "cassandra",
            ]),
            ("cloud", &[
                "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ci/cd",
                "jenkins", "gitlab", "ansible",
            ]),
            ("data_science", &[
                "machine learning", "deep learning", "tensorflow", "pytorch", "pandas",
                "numpy", "r", "scikit-learn", "keras",
            ]),
            ("mobile", &[
                "android", "ios", "react native", "flutter", "xamarin", "swiftui",
            ]),
            ("tools", &[
                "git", "jira", "confluence", "slack", "figma", "photoshop", "illustrator",
                "vs code", "intellij",
            ]),
            ("soft_skills", &[
                "leadership", "communication", "teamwork", "problem solving",
                "critical thinking", "agile", "scrum",
            ]),
        ];

        table
            .iter()
            .map(|(name, skills)| SkillCategory {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }

    fn default_job_titles() -> Vec<String> {
        vec![
            "software engineer", "web developer", "frontend developer", "backend developer",
            "full stack developer", "data scientist", "machine learning engineer",
            "devops engineer", "cloud engineer", "mobile developer", "product manager",
            "project manager", "ui ux designer", "data analyst", "business analyst",
            "system administrator", "network engineer", "security engineer", "qa engineer",
            "test engineer",
        ].iter().map(|s| s.to_string()).collect()
    }

    fn default_industries() -> Vec<String> {
        vec![
            "technology", "finance", "healthcare", "e-commerce", "education", "manufacturing",
            "consulting", "telecommunications", "media", "entertainment", "retail", "automotive",
        ].iter().map(|s| s.to_string()).collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when the occurrence at `start..end` is not glued to a larger token
fn is_phrase_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}
