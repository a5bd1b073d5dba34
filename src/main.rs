use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use eligibility_api::admissions::{
    admissions_router, CourseCatalog, EligibilityReport, EligibilityRequest, EligibilityService,
    InMemoryRepository, ServiceError,
};
use eligibility_api::config::AppConfig;
use eligibility_api::error::AppError;
use eligibility_api::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Course Eligibility Service",
    about = "Evaluate student eligibility for courses of study and serve the admissions API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single submission from a JSON file, offline
    Check(CheckArgs),
    /// Inspect the built-in course catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to a JSON eligibility request
    #[arg(long)]
    file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// List every course grouped by family with its requirements
    List,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Check(args) => run_check(args),
        Command::Catalog {
            command: CatalogCommand::List,
        } => {
            render_catalog();
            Ok(())
        }
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(CourseCatalog::standard());
    let repository = Arc::new(InMemoryRepository::new());
    let service = Arc::new(EligibilityService::new(catalog, repository));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(admissions_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "course eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let request: EligibilityRequest = serde_json::from_str(&raw)?;

    let catalog = Arc::new(CourseCatalog::standard());
    let repository = Arc::new(InMemoryRepository::new());
    let service = EligibilityService::new(catalog, repository);

    match service.check(request) {
        Ok(report) => render_report(&report),
        Err(ServiceError::Validation(report)) => {
            println!("Submission rejected by validation:");
            for error in &report.errors {
                println!("- {error}");
            }
        }
        Err(other) => {
            eprintln!("evaluation failed: {other}");
        }
    }

    Ok(())
}

fn render_report(report: &EligibilityReport) {
    println!("Student {}", report.student_id.0);
    println!("Desired course: {}", report.desired_course);

    if report.eligible {
        println!("Eligible: yes");
        return;
    }

    println!("Eligible: no");
    println!("\nReasons");
    for reason in &report.reasons {
        println!("- {reason}");
    }

    if report.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &report.recommendations {
            println!("- {recommendation}");
        }
    }
}

fn render_catalog() {
    let catalog = CourseCatalog::standard();
    println!("Course catalog ({} courses)", catalog.len());

    for (family, courses) in catalog.grouped_by_family() {
        println!("\n{}", family.label());
        for course in courses {
            let cutoff = match course.cutoff {
                Some(value) => format!("cutoff {value}%"),
                None => "no cutoff".to_string(),
            };
            let exam = match &course.qualifying_exam {
                Some(code) => format!("exam {code}"),
                None => "no exam".to_string(),
            };
            println!(
                "- {} | {} | {} | {}",
                course.name,
                course.required_subjects.join(", "),
                cutoff,
                exam
            );
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
