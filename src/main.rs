//! ATS advisor: lexical resume and job description compatibility tool

use anyhow::{anyhow, Context};
use ats_advisor::cli::{self, AnalysisArgs, Cli, Commands, ConfigAction};
use ats_advisor::config::{Config, OutputFormat};
use ats_advisor::error::AdvisorError;
use ats_advisor::input::{self, InputManager};
use ats_advisor::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator, ReportMetadata};
use ats_advisor::AnalysisEngine;
use clap::Parser;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Score,
    Recommend,
    LinkedIn,
    Analyze,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    debug!("Loaded configuration from {}", config_path.display());

    let use_colors = !cli.no_color && config.output.color_output;
    if !use_colors {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Score(args) => run_analysis(Task::Score, args, &config, use_colors).await,
        Commands::Recommend(args) => run_analysis(Task::Recommend, args, &config, use_colors).await,
        Commands::Linkedin(args) => run_analysis(Task::LinkedIn, args, &config, use_colors).await,
        Commands::Analyze(args) => run_analysis(Task::Analyze, args, &config, use_colors).await,
        Commands::Vocab { category } => show_vocabulary(&config, category.as_deref()),
        Commands::Config { action } => manage_config(action.unwrap_or(ConfigAction::Show), &config, &config_path),
    }
}

async fn run_analysis(task: Task, args: AnalysisArgs, config: &Config, use_colors: bool) -> anyhow::Result<()> {
    info!("Starting {:?} for {}", task, args.resume.display());

    for (label, path) in [("Resume", &args.resume), ("Job description", &args.job)] {
        cli::validate_file_extension(path, cli::SUPPORTED_EXTENSIONS)
            .map_err(|e| AdvisorError::InvalidInput(format!("{} file: {}", label, e)))?;
    }

    let format = match &args.output {
        Some(name) => cli::parse_output_format(name).map_err(AdvisorError::InvalidInput)?,
        None => config.output.format,
    };
    let detailed = args.detailed || config.output.detailed;

    let mut input_manager = InputManager::new();
    let resume_text = input_manager
        .extract_text(&args.resume)
        .await
        .with_context(|| format!("Failed to read resume {}", args.resume.display()))?;
    let job_text = input_manager
        .extract_text(&args.job)
        .await
        .with_context(|| format!("Failed to read job description {}", args.job.display()))?;

    input::require_text("Resume", &resume_text)?;
    input::require_text("Job description", &job_text)?;
    debug!(
        "Extracted {} resume characters and {} job description characters",
        resume_text.chars().count(),
        job_text.chars().count()
    );

    let engine = AnalysisEngine::from_config(config).context("Failed to build skill vocabulary")?;

    let started = Instant::now();
    let metadata = ReportMetadata::new(
        args.resume.display().to_string(),
        args.job.display().to_string(),
        engine.vocabulary().skill_count(),
    );
    let mut report = match task {
        Task::Score => AnalysisReport::new(metadata).with_score(engine.score(&resume_text, &job_text)),
        Task::Recommend => {
            AnalysisReport::new(metadata).with_recommendations(engine.recommend(&resume_text, &job_text))
        }
        Task::LinkedIn => AnalysisReport::new(metadata).with_linkedin(engine.linkedin(&resume_text, &job_text)),
        Task::Analyze => AnalysisReport::from_engine_output(engine.analyze(&resume_text, &job_text), metadata),
    };
    report.metadata.processing_time_ms = started.elapsed().as_millis() as u64;

    if let Some(score) = &report.score {
        info!("ATS score: {}/100", score.total);
    }

    // Saved console reports never carry ANSI escapes
    let colors_in_output = use_colors && args.save.is_none();
    let generator = ReportGenerator::with_options(colors_in_output, detailed, true, true);
    let rendered = generator.generate_report(&report, &format)?;

    match args.save {
        Some(target) => {
            let path = save_target(target, &format, &args.resume);
            save_report_to_file(&rendered, &path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Directories get a generated file name
fn save_target(target: PathBuf, format: &OutputFormat, resume: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, &resume.to_string_lossy(), true))
    } else {
        target
    }
}

fn show_vocabulary(config: &Config, category: Option<&str>) -> anyhow::Result<()> {
    let engine = AnalysisEngine::from_config(config)?;
    let vocabulary = engine.vocabulary();

    let categories: Vec<_> = match category {
        Some(name) => {
            let found = vocabulary.category(&name.to_lowercase()).ok_or_else(|| {
                let known: Vec<&str> = vocabulary.categories().iter().map(|c| c.name.as_str()).collect();
                anyhow!("Unknown skill category '{}'. Available: {}", name, known.join(", "))
            })?;
            vec![found]
        }
        None => vocabulary.categories().iter().collect(),
    };

    for category in categories {
        println!("{} ({})", category.name, category.skills.len());
        println!("  {}", category.skills.join(", "));
    }
    if category.is_none() {
        println!("\n{} distinct skills", vocabulary.skill_count());
    }

    Ok(())
}

fn manage_config(action: ConfigAction, config: &Config, config_path: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("⚙️  Configuration ({})\n", config_path.display());
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| AdvisorError::Configuration(format!("Failed to serialize config: {}", e)))?;
            println!("{}", rendered);
        }
        ConfigAction::Reset => {
            Config::default().save_to(config_path)?;
            println!("✅ Configuration reset: {}", config_path.display());
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }

    Ok(())
}
