use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod dataset;
mod display;
mod error;
mod filter;
mod models;
mod pagination;
mod report;
mod session;
#[cfg(test)]
mod test_support;

use filter::{BoundKind, DateRange};
use models::{AssessmentData, AssessmentStatus, AssessmentTypeCode};
use session::DashboardSession;

#[derive(Parser)]
#[command(name = "assessflow")]
#[command(about = "List, filter and inspect psychological assessment records", long_about = None)]
struct Cli {
    /// Dataset JSON file. The bundled sample is used when omitted.
    #[arg(long, global = true, env = "ASSESSFLOW_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive match on patient name, patient ID or assessment ID
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_enum)]
    status: Option<AssessmentStatus>,
    #[arg(long = "type", value_enum)]
    type_code: Option<AssessmentTypeCode>,
    /// Earliest assessment date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    from: Option<String>,
    /// Latest assessment date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    fn is_unset(&self) -> bool {
        self.search.is_none()
            && self.status.is_none()
            && self.type_code.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }
}

#[derive(Args)]
struct PageArgs {
    /// One-based page to show. Omit for the first page.
    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,
    #[arg(long, default_value_t = pagination::DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of assessments
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show the full detail of one assessment
    Show { id: String },
    /// Generate a markdown report of the current view
    Report {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Convert a CSV export into a JSON dataset
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "assessments.json")]
        out: PathBuf,
    },
}

fn open_session(
    data: &AssessmentData,
    filters: &FilterArgs,
    page: &PageArgs,
) -> anyhow::Result<DashboardSession> {
    let mut session = DashboardSession::new(data.assessments.clone(), page.page_size)?;

    if filters.is_unset() {
        session.clear_filters();
    } else {
        apply_filter_args(&mut session, filters)?;
    }

    if let Some(requested) = rejected_page(&mut session, page.page) {
        warn!(
            requested,
            total_pages = session.total_pages(),
            "page out of range, staying on page {}",
            session.pagination().current_page
        );
    }

    Ok(session)
}

fn apply_filter_args(session: &mut DashboardSession, filters: &FilterArgs) -> anyhow::Result<()> {
    if let Some(search) = &filters.search {
        session.set_search(search.as_str());
    }
    session.set_status(filters.status);
    session.set_type(filters.type_code);

    let start = filters
        .from
        .as_deref()
        .map(|raw| filter::parse_bound(raw, BoundKind::Start))
        .transpose()
        .context("invalid --from")?;
    let end = filters
        .to
        .as_deref()
        .map(|raw| filter::parse_bound(raw, BoundKind::End))
        .transpose()
        .context("invalid --to")?;
    if start.is_some() || end.is_some() {
        session.set_date_range(Some(DateRange { start, end }));
    }

    Ok(())
}

/// Apply an explicit `--page` request. Returns the page when the session
/// refused it; no request means the session stays where it is.
fn rejected_page(session: &mut DashboardSession, requested: Option<i64>) -> Option<i64> {
    let requested = requested?;
    (!session.set_page(requested)).then_some(requested)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { filters, page } => {
            let data = dataset::load(cli.data.as_deref()).context("failed to load dataset")?;
            let session = open_session(&data, &filters, &page)?;
            let rows = session.page();
            let state = session.pagination();

            if rows.is_empty() {
                println!("No assessments match the current filters.");
                return Ok(());
            }

            for assessment in rows.iter() {
                println!(
                    "- {} [{}] {} ({}) · {} · {} · score {} · {}",
                    assessment.id,
                    assessment.patient.initials,
                    assessment.patient.name,
                    assessment.patient.id,
                    assessment.type_name,
                    display::status_label(assessment.status),
                    display::format_score(assessment.score),
                    display::format_date_time(assessment.date)
                );
                if !assessment.notes.is_empty() {
                    println!("    {}", display::truncate(&assessment.notes, 60));
                }
            }
            println!(
                "Page {} of {} ({} results)",
                state.current_page,
                state.total_pages(),
                state.total_items
            );
            println!(
                "{}",
                pagination::render_controls(&session.page_numbers(), state.current_page)
            );
        }
        Commands::Show { id } => {
            let data = dataset::load(cli.data.as_deref()).context("failed to load dataset")?;
            let mut session =
                DashboardSession::new(data.assessments, pagination::DEFAULT_PAGE_SIZE)?;
            session.select(Some(id.as_str()))?;
            if let Some(assessment) = session.selected() {
                print!("{}", report::build_detail(assessment));
            }
        }
        Commands::Report { filters, page, out } => {
            let data = dataset::load(cli.data.as_deref()).context("failed to load dataset")?;
            let session = open_session(&data, &filters, &page)?;
            let report = report::build_report(&data, &session, chrono::Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Import { csv, out } => {
            let assessments = dataset::import_csv(&csv)?;
            let imported = assessments.len();
            let data = AssessmentData {
                stats: dataset::summarize_stats(&assessments),
                assessments,
                status_options: dataset::status_options(),
                ..AssessmentData::default()
            };
            dataset::write_json(&out, &data)?;
            println!(
                "Imported {imported} assessments from {} into {}.",
                csv.display(),
                out.display()
            );
        }
    }

    Ok(())
}
