//! Hoodmap CLI - check manifests, list detail routes, preview locally.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::needless_raw_string_hashes,
    unreachable_pub
)]

mod report;

use clap::{Parser, Subcommand};
use hoodmap_core::parse_feature_collection;
use hoodmap_yaml::MapManifest;
use report::CorrelationReport;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tiny_http::{Header, Response, Server};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hoodmap")]
#[command(about = "Neighbourhood map manifest tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest and report how geometry lines up with the directory
    Check {
        /// Path to manifest file
        #[arg(short, long, default_value = "map.yaml")]
        manifest: PathBuf,

        /// Boundary FeatureCollection to correlate
        #[arg(short, long)]
        geometry: Option<PathBuf>,
    },

    /// Print the detail route of every neighbourhood
    Routes {
        /// Path to manifest file
        #[arg(short, long, default_value = "map.yaml")]
        manifest: PathBuf,
    },

    /// Serve a directory for local previews
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "www")]
        dir: PathBuf,
    },
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest, geometry } => {
            check(&manifest, geometry.as_deref());
        }
        Commands::Routes { manifest } => {
            routes(&manifest);
        }
        Commands::Serve { port, dir } => {
            serve(port, dir);
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn load_manifest(path: &Path) -> MapManifest {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => fail(format!("Failed to read manifest: {}", e)),
    };
    match MapManifest::load(&content) {
        Ok(m) => m,
        Err(e) => fail(format!("Manifest invalid: {}", e)),
    }
}

fn check(path: &Path, geometry: Option<&Path>) {
    println!("Checking manifest: {}", path.display());
    let manifest = load_manifest(path);
    let directory = manifest.directory().unwrap_or_else(|e| fail(e));
    let index = manifest
        .name_index(&directory)
        .unwrap_or_else(|e| fail(e));

    println!("Manifest valid!");
    if !manifest.title.is_empty() {
        println!("  Title: {}", manifest.title);
    }
    println!("  Neighbourhoods: {}", directory.len());
    println!("  Route prefix: {}", manifest.routes().prefix());
    match (&manifest.boundaries, manifest.mode()) {
        (Some(config), Ok(Some(mode))) => {
            println!("  Boundaries: {}", config.source);
            println!("  Mode: {:?}", mode);
        }
        _ => println!("  Boundaries: none (markers only)"),
    }

    let Some(geometry) = geometry else {
        return;
    };
    let text = match fs::read_to_string(geometry) {
        Ok(t) => t,
        Err(e) => fail(format!("Failed to read geometry: {}", e)),
    };
    let features = match parse_feature_collection(&text) {
        Ok(f) => f,
        Err(e) => fail(format!("Geometry invalid: {}", e)),
    };
    debug!(features = features.len(), "geometry parsed");

    let report = CorrelationReport::build(
        &features,
        &directory,
        &index,
        &manifest.focus_set(&directory),
    );
    println!();
    println!("Correlation with {}:", geometry.display());
    print!("{}", report);
    if !report.is_complete() {
        warn!(
            missing = report.without_geometry.len(),
            "some neighbourhoods have no boundary polygon"
        );
    }
}

fn routes(path: &Path) {
    let manifest = load_manifest(path);
    let directory = manifest.directory().unwrap_or_else(|e| fail(e));
    let routes = manifest.routes();
    for record in directory.all() {
        println!("{}\t{}", record.name, routes.path_for(&record.slug));
    }
}

/// File under `dir` for a request URL, refusing anything that escapes it.
fn resolve_path(dir: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    let file = dir.join(relative);
    if file.is_dir() {
        Some(file.join("index.html"))
    } else {
        Some(file)
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("geojson") => "application/geo+json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("yaml" | "yml") => "text/yaml",
        _ => "application/octet-stream",
    }
}

fn serve(port: u16, dir: PathBuf) {
    println!("Serving {} at http://localhost:{}", dir.display(), port);
    println!("Press Ctrl+C to stop");

    let addr = format!("0.0.0.0:{}", port);
    let server = match Server::http(&addr) {
        Ok(s) => s,
        Err(e) => fail(format!("Failed to start server: {}", e)),
    };

    for request in server.incoming_requests() {
        let file = resolve_path(&dir, request.url());
        let body = file.as_ref().and_then(|f| fs::read(f).ok());
        let response = match (file, body) {
            (Some(file), Some(body)) => {
                let response = Response::from_data(body);
                match Header::from_bytes(&b"Content-Type"[..], content_type(&file).as_bytes()) {
                    Ok(header) => response.with_header(header),
                    Err(()) => response,
                }
            }
            _ => {
                debug!(url = request.url(), "not found");
                Response::from_data(b"404 Not Found".to_vec()).with_status_code(404)
            }
        };
        if let Err(e) = request.respond(response) {
            warn!(error = %e, "failed to send response");
        }
    }
}
