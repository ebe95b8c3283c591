//! CLI entry point for the student performance engine.
//!
//! Provides subcommands for generating a fixture table, listing the selectable
//! entities of a table, and rendering the comparison views as JSON.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use student_perf::config::EngineConfig;
use student_perf::datagen::{GenerateOptions, generate};
use student_perf::engine::{
    Dashboard, DashboardViews, Selection, Series, SubjectProfile, subject_profile, subject_trends,
};
use student_perf::loader::load_dataset;
use student_perf::output::{print_json, print_pretty, write_records};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_perf")]
#[command(about = "Aggregate student assessment records into comparison views", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a reproducible synthetic assessment table
    Generate {
        /// CSV file to write
        #[arg(short, long, default_value = "student_data.csv")]
        output: String,

        /// Number of students
        #[arg(long, default_value_t = 30)]
        students: u32,

        /// Number of grades per student
        #[arg(long, default_value_t = 5)]
        grades: u32,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the students, grades and subjects present in a table
    List {
        /// CSV table to read
        #[arg(short, long, default_value = "student_data.csv")]
        input: String,
    },
    /// Render all five comparison views for one selection
    Views {
        /// CSV table to read
        #[arg(short, long, default_value = "student_data.csv")]
        input: String,

        #[arg(long)]
        student: Option<u32>,

        #[arg(long)]
        grade: Option<u32>,

        #[arg(long)]
        subject: Option<String>,
    },
    /// Render a student's per-subject profile and subject history
    Profile {
        /// CSV table to read
        #[arg(short, long, default_value = "student_data.csv")]
        input: String,

        #[arg(long)]
        student: u32,
    },
}

#[derive(Serialize)]
struct ViewsReport {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    views: DashboardViews,
}

#[derive(Serialize)]
struct ProfileReport {
    generated_at: DateTime<Utc>,
    student_id: u32,
    profile: SubjectProfile,
    subject_trends: Vec<Series<u32>>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/student_perf.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_perf.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

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
    let config = EngineConfig::from_env()?;

    match cli.command {
        Commands::Generate {
            output,
            students,
            grades,
            seed,
        } => {
            let opts = GenerateOptions {
                students,
                grades,
                seed,
            };
            let records = generate(&opts, &config);
            write_records(&output, &records)?;
            info!(path = %output, rows = records.len(), "Data generated");
        }
        Commands::List { input } => {
            let dataset = load_dataset(&input, &config)?;
            info!(
                students = ?dataset.students(),
                grades = ?dataset.grades(),
                subjects = ?dataset.subjects(),
                duplicate_keys = dataset.duplicate_keys(),
                "Selectable entities"
            );
        }
        Commands::Views {
            input,
            student,
            grade,
            subject,
        } => {
            let dataset = load_dataset(&input, &config)?;
            let selection = Selection {
                student_id: student.or_else(|| dataset.students().first().copied()),
                grade: grade.or_else(|| dataset.grades().first().copied()),
                subject: subject.or_else(|| dataset.subjects().first().cloned()),
            };

            let views = render_views(&Dashboard::new(&dataset), &selection);
            print_pretty(&views.views.selection);
            print_json(&views)?;
        }
        Commands::Profile { input, student } => {
            let dataset = load_dataset(&input, &config)?;
            let report = ProfileReport {
                generated_at: Utc::now(),
                student_id: student,
                profile: subject_profile(&dataset, student)?,
                subject_trends: subject_trends(&dataset, student)?,
            };
            print_json(&report)?;
        }
    }

    Ok(())
}

/// Renders the dashboard for one selection inside a tracing span.
#[tracing::instrument(skip(dashboard), fields(student = ?selection.student_id, grade = ?selection.grade))]
fn render_views(dashboard: &Dashboard<'_>, selection: &Selection) -> ViewsReport {
    ViewsReport {
        generated_at: Utc::now(),
        views: dashboard.render(selection),
    }
}
