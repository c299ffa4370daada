//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::output::report::AnalysisReport;
use crate::processing::ats_matcher::{AtsScore, KEYWORD_CAP, SKILL_CAP, STRUCTURE_CAP};
use crate::processing::linkedin::LinkedInSuggestions;
use crate::processing::recommendations::{sort_by_priority, Priority, Recommendation};
use crate::error::Result;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal report with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn sorted(recommendations: &[Recommendation]) -> Vec<Recommendation> {
    let mut recs = recommendations.to_vec();
    sort_by_priority(&mut recs);
    recs
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u32) -> String {
        let (badge, color) = match score {
            90..=u32::MAX => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_priority_icon(&self, priority: Priority) -> &'static str {
        match (self.use_colors, priority) {
            (true, Priority::High) => "⚠️ ",
            (true, Priority::Medium) => "📋 ",
            (true, Priority::Low) => "💡 ",
            (false, Priority::High) => "[*] ",
            (false, Priority::Medium) => "[-] ",
            (false, Priority::Low) => "[+] ",
        }
    }

    fn priority_color(priority: Priority) -> Color {
        match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        }
    }

    fn format_score(&self, output: &mut String, score: &AtsScore, report: &AnalysisReport) {
        output.push_str(&self.format_header("ATS Compatibility", 2));
        output.push_str(&format!(
            "Overall Score: {}/100 {}\n",
            score.total,
            self.format_score_badge(score.total)
        ));
        if let Some(summary) = &report.summary {
            output.push_str(&format!("Verdict: {}\n", self.colorize(&summary.verdict, Color::Cyan)));
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("🔍 Keyword match:  {:>2}/{}\n", score.breakdown.keyword, KEYWORD_CAP));
        output.push_str(&format!("🎯 Skill match:    {:>2}/{}\n", score.breakdown.skill, SKILL_CAP));
        output.push_str(&format!("📄 Structure:      {:>2}/{}\n", score.breakdown.structure, STRUCTURE_CAP));

        if let Some(summary) = &report.summary {
            if !summary.strengths.is_empty() {
                output.push_str(&self.format_header("✅ Key Strengths", 3));
                for strength in &summary.strengths {
                    output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
                }
            }
            if !summary.improvement_areas.is_empty() {
                output.push_str(&self.format_header("🎯 Improvement Areas", 3));
                for area in &summary.improvement_areas {
                    output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
                }
            }
        }
    }

    fn format_recommendations(&self, output: &mut String, recommendations: &[Recommendation]) {
        output.push_str(&self.format_header("📋 Recommendations", 2));
        if recommendations.is_empty() {
            output.push_str(&self.colorize("No recommendations: the resume already covers the basics.\n", Color::Green));
            return;
        }

        for (i, rec) in sorted(recommendations).iter().enumerate() {
            output.push_str(&format!(
                "{}. {}{} {}\n",
                i + 1,
                self.format_priority_icon(rec.priority),
                self.colorize(&rec.title, Self::priority_color(rec.priority)),
                self.colorize(&format!("({}, {})", rec.kind, rec.priority), Color::BrightBlack)
            ));
            output.push_str(&format!("   {}\n\n", rec.description));
        }
    }

    fn format_linkedin(&self, output: &mut String, linkedin: &LinkedInSuggestions) {
        output.push_str(&self.format_header("💼 LinkedIn Profile", 2));

        output.push_str(&self.format_header("Headlines", 3));
        for (i, headline) in linkedin.headline.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, headline));
        }

        output.push_str(&self.format_header("About", 3));
        let shown = if self.detailed { linkedin.about.len() } else { 1 };
        for about in linkedin.about.iter().take(shown) {
            output.push_str(&format!("  {}\n\n", about));
        }

        output.push_str(&self.format_header("Skills", 3));
        if !linkedin.skills.featured_skills.is_empty() {
            output.push_str(&format!(
                "Featured: {}\n",
                self.colorize(&linkedin.skills.featured_skills.join(", "), Color::Green)
            ));
        }
        if !linkedin.skills.skills_to_add.is_empty() {
            output.push_str(&format!(
                "To add:   {}\n",
                self.colorize(&linkedin.skills.skills_to_add.join(", "), Color::Yellow)
            ));
        }

        if !linkedin.recommendations.is_empty() {
            output.push_str(&self.format_header("Profile Checklist", 3));
            for rec in &linkedin.recommendations {
                output.push_str(&format!(
                    "{}{}\n   {}\n",
                    self.format_priority_icon(rec.priority),
                    rec.title,
                    rec.description
                ));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ATS RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            file_name(&report.metadata.resume_file),
            file_name(&report.metadata.job_file)
        ));

        if let Some(score) = &report.score {
            self.format_score(&mut output, score, report);
        }

        if let Some(recommendations) = &report.recommendations {
            self.format_recommendations(&mut output, recommendations);
        }

        if let Some(linkedin) = &report.linkedin {
            self.format_linkedin(&mut output, linkedin);
        }

        if self.detailed {
            if let Some(insights) = &report.insights {
                output.push_str(&self.format_header("📊 Detailed Analysis", 2));
                output.push_str(&format!("Matched skills:  {}\n", insights.matched_skills.join(", ")));
                output.push_str(&format!(
                    "Missing skills:  {}\n",
                    self.colorize(&insights.missing_skills.join(", "), Color::Red)
                ));
                output.push_str(&format!("Critical skills: {}\n", insights.critical_skills.join(", ")));
                output.push_str(&format!("Experience:      {}\n", insights.experience.phrase()));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by ATS Advisor v{} | {} | {}ms | {} skills in vocabulary\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.advisor_version,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.vocabulary_size
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u32) -> &'static str {
        match score {
            90..=u32::MAX => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::from("# 📊 ATS Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            ));
        }

        if let Some(score) = &report.score {
            output.push_str("## ATS Compatibility\n\n");
            output.push_str(&format!(
                "**Overall Score:** {}/100 {}\n\n",
                score.total,
                Self::markdown_score_badge(score.total)
            ));
            if let Some(summary) = &report.summary {
                output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));
            }

            output.push_str("| Component | Score | Max |\n");
            output.push_str("|-----------|-------|-----|\n");
            output.push_str(&format!("| 🔍 Keyword Match | {} | {} |\n", score.breakdown.keyword, KEYWORD_CAP));
            output.push_str(&format!("| 🎯 Skill Match | {} | {} |\n", score.breakdown.skill, SKILL_CAP));
            output.push_str(&format!("| 📄 Structure | {} | {} |\n\n", score.breakdown.structure, STRUCTURE_CAP));
        }

        if let Some(recommendations) = &report.recommendations {
            output.push_str("## 📋 Recommendations\n\n");
            if recommendations.is_empty() {
                output.push_str("_No recommendations._\n\n");
            }

            let groups = [
                (Priority::High, "### ⚠️ High Priority\n\n"),
                (Priority::Medium, "### 📋 Medium Priority\n\n"),
                (Priority::Low, "### 💡 Low Priority\n\n"),
            ];
            for (priority, heading) in groups {
                let group: Vec<_> = recommendations.iter().filter(|r| r.priority == priority).collect();
                if group.is_empty() {
                    continue;
                }
                output.push_str(heading);
                for (i, rec) in group.iter().enumerate() {
                    output.push_str(&format!("{}. **{}** (`{}`)\n   {}\n\n", i + 1, rec.title, rec.kind, rec.description));
                }
            }
        }

        if let Some(linkedin) = &report.linkedin {
            output.push_str("## 💼 LinkedIn Profile\n\n### Headlines\n\n");
            for headline in &linkedin.headline {
                output.push_str(&format!("- {}\n", headline));
            }

            output.push_str("\n### About\n\n");
            for about in &linkedin.about {
                output.push_str(&format!("> {}\n\n", about));
            }

            output.push_str("### Skills\n\n");
            output.push_str(&format!("**Featured:** {}\n\n", linkedin.skills.featured_skills.join(", ")));
            if !linkedin.skills.skills_to_add.is_empty() {
                output.push_str(&format!("**To add:** {}\n\n", linkedin.skills.skills_to_add.join(", ")));
            }

            if !linkedin.recommendations.is_empty() {
                output.push_str("### Profile Checklist\n\n");
                for rec in &linkedin.recommendations {
                    output.push_str(&format!("- [ ] **{}** ({}): {}\n", rec.title, rec.priority, rec.description));
                }
                output.push('\n');
            }
        }

        if let Some(insights) = &report.insights {
            output.push_str("## 📊 Skill Insights\n\n");
            output.push_str(&format!("- **Matched:** {}\n", insights.matched_skills.join(", ")));
            output.push_str(&format!("- **Missing:** {}\n", insights.missing_skills.join(", ")));
            output.push_str(&format!("- **Critical:** {}\n", insights.critical_skills.join(", ")));
            output.push_str(&format!("- **Experience:** {}\n\n", insights.experience.phrase()));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by ATS Advisor v{} against {} vocabulary skills*\n",
                report.metadata.advisor_version, report.metadata.vocabulary_size
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), *format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}
