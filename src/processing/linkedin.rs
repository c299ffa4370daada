//! LinkedIn profile copy: headlines, about sections, skills panel and advice

use crate::processing::recommendations::Priority;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::{SkillSet, Vocabulary};
use serde::{Deserialize, Serialize};
use std::fmt;

const FALLBACK_HEADLINE: &str =
    "Experienced Professional | Skilled in Multiple Technologies | Open to New Opportunities";

/// Estimated professional experience.
///
/// Dated resumes yield a number of years; undated ones fall back to a band
/// guessed from resume length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceYears {
    Years(u32),
    Band(String),
}

impl ExperienceYears {
    /// "4 years", "1 year", "3-5 years"
    pub fn phrase(&self) -> String {
        match self {
            ExperienceYears::Years(1) => "1 year".to_string(),
            ExperienceYears::Band(band) if band == "1" => "1 year".to_string(),
            other => format!("{} years", other),
        }
    }
}

impl fmt::Display for ExperienceYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceYears::Years(years) => write!(f, "{}", years),
            ExperienceYears::Band(band) => write!(f, "{}", band),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsSuggestions {
    pub featured_skills: Vec<String>,
    pub skills_to_add: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInSuggestions {
    pub headline: Vec<String>,
    pub about: Vec<String>,
    pub skills: SkillsSuggestions,
    pub recommendations: Vec<ProfileRecommendation>,
}

pub struct ProfileCopyGenerator<'a> {
    vocabulary: &'a Vocabulary,
    processor: &'a TextProcessor,
}

impl<'a> ProfileCopyGenerator<'a> {
    pub fn new(vocabulary: &'a Vocabulary, processor: &'a TextProcessor) -> Self {
        Self { vocabulary, processor }
    }

    pub fn generate_linkedin_suggestions(&self, resume_text: &str, job_description: &str) -> LinkedInSuggestions {
        let skills = self.vocabulary.extract_skills(resume_text);
        let job_skills = self.vocabulary.extract_skills(job_description);

        LinkedInSuggestions {
            headline: self.generate_headline_suggestions(resume_text, job_description, &skills, &job_skills),
            about: self.generate_about_suggestions(resume_text, job_description, &skills),
            skills: generate_skills_suggestions(&skills, &job_skills),
            recommendations: self.generate_profile_recommendations(resume_text, &skills),
        }
    }

    pub fn generate_headline_suggestions(
        &self,
        resume_text: &str,
        job_description: &str,
        skills: &SkillSet,
        job_skills: &SkillSet,
    ) -> Vec<String> {
        let resume_titles = self.vocabulary.titles_in(resume_text);
        let job_titles = self.vocabulary.titles_in(job_description);
        let industries = self.vocabulary.industries_in(job_description);

        let overlap: Vec<&str> = skills.intersection(job_skills).map(|s| s.as_str()).collect();
        let top_skills: Vec<&str> = if overlap.is_empty() {
            skills.iter().map(|s| s.as_str()).take(3).collect()
        } else {
            overlap.into_iter().take(3).collect()
        };

        let mut headlines = Vec::new();

        if let Some(title) = resume_titles.first() {
            if top_skills.is_empty() {
                headlines.push(format!("{} | Seeking New Challenges | Open to Opportunities", title_case(title)));
            } else {
                headlines.push(format!(
                    "{} | {} | Open to New Opportunities",
                    title_case(title),
                    display_list(&top_skills)
                ));
            }
        }

        if let Some(target) = job_titles.first() {
            let segments: Vec<String> = [
                title_case(target),
                display_list(&top_skills[..top_skills.len().min(2)]),
                "Passionate About Innovation".to_string(),
            ]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
            headlines.push(segments.join(" | "));
        }

        let achievements = self.processor.achievement_phrases(resume_text);
        if let (Some(title), false) = (resume_titles.first(), achievements.is_empty()) {
            let achievement_text = achievements.iter().take(2).cloned().collect::<Vec<_>>().join(" | ");
            headlines.push(format!(
                "{} | {} | Results-Driven Professional",
                title_case(title),
                achievement_text
            ));
        }

        if let (Some(industry), false) = (industries.first(), top_skills.is_empty()) {
            headlines.push(format!(
                "{} Professional | {} | Strategic Thinker",
                title_case(industry),
                display_list(&top_skills)
            ));
        }

        if headlines.is_empty() {
            headlines.push(FALLBACK_HEADLINE.to_string());
        }

        headlines.truncate(4);
        headlines
    }

    pub fn generate_about_suggestions(&self, resume_text: &str, job_description: &str, skills: &SkillSet) -> Vec<String> {
        let experience = self.estimate_experience_years(resume_text).phrase();
        let top_skills: Vec<&str> = skills.iter().map(|s| s.as_str()).take(8).collect();
        let industry = self.vocabulary.industries_in(job_description).first().copied();

        let skill_list = |n: usize| -> String {
            let listed = display_list(&top_skills[..top_skills.len().min(n)]);
            if listed.is_empty() {
                "a broad range of technologies".to_string()
            } else {
                listed
            }
        };

        let mut summary = format!("Experienced professional with {} of experience in ", experience);
        match industry {
            Some(industry) => summary.push_str(&format!("the {} industry. ", industry)),
            None => summary.push_str("technology and innovation. "),
        }
        summary.push_str(&format!("Skilled in {}. ", skill_list(4)));
        summary.push_str("Passionate about delivering high-quality solutions and driving business growth through technology.");

        let mut achievement = format!("Results-driven professional with {} of experience", experience);
        if top_skills.is_empty() {
            achievement.push_str(". ");
        } else {
            achievement.push_str(&format!(" specializing in {}. ", skill_list(3)));
        }
        achievement.push_str("Proven track record of delivering innovative solutions and exceeding expectations. ");
        achievement.push_str("Currently seeking new challenges where I can leverage my expertise to drive success.");

        let mut future = format!("Forward-thinking professional with {} of experience", experience);
        match industry {
            Some(industry) => future.push_str(&format!(" in {}. ", industry)),
            None => future.push_str(". "),
        }
        future.push_str(&format!("Expertise in {}. ", skill_list(5)));
        future.push_str("Committed to continuous learning and staying at the forefront of industry trends. ");
        future.push_str("Open to connecting and exploring new opportunities.");

        vec![summary, achievement, future]
    }

    /// Span between the earliest and latest year mentioned, or a length-based band
    pub fn estimate_experience_years(&self, resume_text: &str) -> ExperienceYears {
        let years = self.processor.years(resume_text);

        if years.len() >= 2 {
            if let (Some(min), Some(max)) = (years.iter().min(), years.iter().max()) {
                return ExperienceYears::Years((max - min).min(30));
            }
        }

        let band = match self.processor.word_count(resume_text) {
            n if n > 800 => "5+",
            n if n > 500 => "3-5",
            n if n > 300 => "1-3",
            _ => "1",
        };
        ExperienceYears::Band(band.to_string())
    }

    pub fn generate_profile_recommendations(&self, resume_text: &str, skills: &SkillSet) -> Vec<ProfileRecommendation> {
        let lower = resume_text.to_lowercase();

        let mut recommendations = vec![
            profile_rec(
                "Add a Professional Profile Photo",
                "A professional headshot can increase profile views by 14x. Use a clear, recent photo with good lighting.",
                Priority::High,
            ),
            profile_rec(
                "Customize Your LinkedIn URL",
                "Create a custom LinkedIn URL (e.g., linkedin.com/in/yourname) for better professional branding.",
                Priority::Medium,
            ),
            profile_rec(
                "Add a Background Photo",
                "Use a relevant background image that reflects your industry or professional interests.",
                Priority::Low,
            ),
        ];

        if !lower.contains("education") {
            recommendations.push(profile_rec(
                "Complete Education Section",
                "Add your educational background to build credibility and help recruiters understand your qualifications.",
                Priority::High,
            ));
        }

        if !lower.contains("experience") {
            recommendations.push(profile_rec(
                "Detail Your Experience",
                "Add comprehensive experience details with achievements and responsibilities for each role.",
                Priority::High,
            ));
        }

        if skills.is_empty() {
            recommendations.push(profile_rec(
                "Add Relevant Skills",
                "Include at least 10-15 relevant skills and get endorsements from colleagues.",
                Priority::High,
            ));
        }

        recommendations.push(profile_rec(
            "Engage with Industry Content",
            "Regularly share and engage with relevant industry content to increase your visibility.",
            Priority::Medium,
        ));

        recommendations
    }
}

/// Skills shared with the job first, then the rest, capped at ten
pub fn generate_skills_suggestions(skills: &SkillSet, job_skills: &SkillSet) -> SkillsSuggestions {
    let common: Vec<&String> = skills.intersection(job_skills).collect();

    let mut featured: Vec<&String> = common.iter().take(5).copied().collect();

    let pool: SkillSet = skills
        .iter()
        .take(10)
        .chain(job_skills.iter().take(10))
        .cloned()
        .collect();
    for skill in pool.iter().filter(|s| !common.contains(s)) {
        if featured.len() >= 10 {
            break;
        }
        featured.push(skill);
    }

    SkillsSuggestions {
        featured_skills: featured.into_iter().map(|s| title_case(s)).collect(),
        skills_to_add: job_skills.difference(skills).take(5).map(|s| title_case(s)).collect(),
    }
}

fn profile_rec(title: &str, description: &str, priority: Priority) -> ProfileRecommendation {
    ProfileRecommendation {
        title: title.to_string(),
        description: description.to_string(),
        priority,
    }
}

fn display_list(skills: &[&str]) -> String {
    skills.iter().map(|s| title_case(s)).collect::<Vec<_>>().join(", ")
}

/// Capitalize every letter that follows a non-letter ("node.js" -> "Node.Js")
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}
