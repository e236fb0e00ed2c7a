//! CLI entry point for the grade calculator.
//!
//! Provides subcommands for listing the course catalog, evaluating a
//! worksheet of entered scores, projecting a final grade, and looking up a
//! letter grade.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gradecalc::{
    catalog::Catalog,
    config::Settings,
    engine::GradeEngine,
    output::{ReportRecord, append_record, print_json, print_pretty, render_report},
    parser::{parse_assignment, parse_percentage},
    worksheet::Worksheet,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradecalc")]
#[command(about = "Work out your current grade and what you need on the rest", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List courses and their professors
    Courses,
    /// Evaluate current grade, required grade and study plan
    Calculate {
        /// Course id (e.g. "cs101")
        #[arg(short, long)]
        course: String,

        /// Professor id; optional when the course has a single professor
        #[arg(short, long)]
        professor: Option<String>,

        /// Overall target grade in percent (defaults to GRADECALC_TARGET or 85)
        #[arg(short, long)]
        target: Option<f64>,

        /// Achieved score, as NAME=VALUE (repeatable)
        #[arg(short, long = "score", value_name = "NAME=VALUE")]
        scores: Vec<String>,

        /// Per-component target, as NAME=VALUE (repeatable)
        #[arg(short, long = "goal", value_name = "NAME=VALUE")]
        goals: Vec<String>,

        /// Print the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional: CSV file to append a summary row to
        #[arg(long)]
        csv: Option<String>,
    },
    /// Project the final grade, counting missing scores as 0
    Final {
        /// Course id (e.g. "cs101")
        #[arg(short, long)]
        course: String,

        /// Professor id; optional when the course has a single professor
        #[arg(short, long)]
        professor: Option<String>,

        /// Achieved score, as NAME=VALUE (repeatable)
        #[arg(short, long = "score", value_name = "NAME=VALUE")]
        scores: Vec<String>,
    },
    /// Look up the letter grade and GPA points for a percentage
    Letter {
        #[arg(value_name = "PERCENTAGE")]
        percentage: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradecalc.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Courses => {
            let catalog = settings.catalog()?;
            list_courses(&catalog);
        }
        Commands::Calculate {
            course,
            professor,
            target,
            scores,
            goals,
            json,
            csv,
        } => {
            let catalog = settings.catalog()?;
            let engine = settings.engine()?;
            let mut worksheet = Worksheet::open(&catalog, &course, professor.as_deref())?;
            worksheet.set_target_grade(target.unwrap_or(settings.default_target))?;
            fill_worksheet(&mut worksheet, &scores, &goals)?;
            calculate(&worksheet, &engine, json, csv.as_deref())?;
        }
        Commands::Final {
            course,
            professor,
            scores,
        } => {
            let catalog = settings.catalog()?;
            let engine = settings.engine()?;
            let mut worksheet = Worksheet::open(&catalog, &course, professor.as_deref())?;
            fill_worksheet(&mut worksheet, &scores, &[])?;
            final_grade(&worksheet, &engine);
        }
        Commands::Letter { percentage } => {
            let engine = settings.engine()?;
            let Some(value) = parse_percentage(&percentage) else {
                anyhow::bail!("'{percentage}' is not a number");
            };
            let scale = engine.scale();
            println!("{}% = {} ({:.1} points)", value, scale.letter_for(value), scale.points_for(value));
        }
    }

    Ok(())
}

fn list_courses(catalog: &Catalog) {
    info!(courses = catalog.len(), "Listing catalog");
    for (course_id, course) in catalog.iter() {
        println!("{course_id}: {}", course.name);
        for professor in &course.professors {
            println!(
                "  {}: {} ({} components)",
                professor.id,
                professor.name,
                professor.grade_components.len()
            );
        }
    }
}

/// Applies `NAME=VALUE` scores and per-component targets to the worksheet.
fn fill_worksheet(worksheet: &mut Worksheet, scores: &[String], goals: &[String]) -> Result<()> {
    for raw in scores {
        let (name, value) = parse_assignment(raw)?;
        let stored = worksheet.set_score_by_name(&name, &value)?;
        debug!(component = %name, ?stored, "Score set");
    }
    for raw in goals {
        let (name, value) = parse_assignment(raw)?;
        let stored = worksheet.set_target_by_name(&name, &value)?;
        debug!(component = %name, ?stored, "Target set");
    }
    Ok(())
}

/// Evaluates the worksheet and prints the report, optionally logging a CSV row.
#[tracing::instrument(skip(worksheet, engine), fields(course = %worksheet.course(), target = worksheet.target_grade()))]
fn calculate(worksheet: &Worksheet, engine: &GradeEngine, json: bool, csv: Option<&str>) -> Result<()> {
    let report = worksheet.evaluate(engine);
    print_pretty(&report);

    if json {
        print_json(&report)?;
    } else {
        print!("{}", render_report(&report));
    }

    if let Some(path) = csv {
        append_record(path, &ReportRecord::from(&report))?;
        info!(path, "Report appended");
    }

    Ok(())
}

#[tracing::instrument(skip(worksheet, engine), fields(course = %worksheet.course()))]
fn final_grade(worksheet: &Worksheet, engine: &GradeEngine) {
    let grade = engine.final_grade(worksheet.components());
    if grade.is_available() {
        println!(
            "Final grade if nothing else changes: {}% ({}, {:.1} points)",
            grade.percentage,
            grade.letter,
            engine.scale().points_for(grade.percentage)
        );
    } else {
        println!("Final grade: {}", grade.letter);
    }
}
