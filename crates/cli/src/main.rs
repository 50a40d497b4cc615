// ABOUTME: CLI for extracting food menus from iCanteen login pages.
// ABOUTME: Fetches one or more URLs (or reads a saved HTML page) and prints the menu as text or JSON.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use icanteen_extractor::{ExtractError, Extractor, Menu, VERSION};
use serde_json::json;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Extract the published food menu from iCanteen login pages.
#[derive(Parser, Debug)]
#[command(name = "icanteen", version)]
#[command(about = "Print the food menu published on iCanteen login pages", long_about = None)]
struct Args {
    /// Login page URL(s), e.g. https://strav.nasejidelna.cz/0051/login
    urls: Vec<String>,

    /// Parse a saved HTML page instead of fetching URLs
    #[arg(long = "html", conflicts_with = "urls")]
    html: Option<PathBuf>,

    /// User-Agent header sent to the canteen server
    #[arg(long, env = "ICANTEEN_USER_AGENT")]
    user_agent: Option<String>,

    /// Connect and read timeout in milliseconds; 0 or less keeps the transport default
    #[arg(long, env = "ICANTEEN_TIMEOUT_MS", default_value_t = 2000, allow_negative_numbers = true)]
    timeout_ms: i64,

    /// Output JSON instead of text
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Treat a page without a published menu as success
    #[arg(long)]
    allow_empty: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome for one target.
struct Extracted {
    target: String,
    result: Result<Menu, ExtractError>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

/// Returns whether every target succeeded.
fn run(args: &Args) -> Result<bool> {
    if args.html.is_none() && args.urls.is_empty() {
        bail!("at least one URL is required, or use --html");
    }

    let extractor = Extractor::builder()
        .user_agent(
            args.user_agent
                .clone()
                .unwrap_or_else(|| format!("icanteen-menu/{}", VERSION)),
        )
        .timeout_ms(args.timeout_ms)
        .build();
    debug!(options = ?extractor.options(), "configured extractor");

    let results: Vec<Extracted> = match &args.html {
        Some(path) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            vec![Extracted {
                target: path.display().to_string(),
                result: extractor.parse_html(&html),
            }]
        }
        None => args
            .urls
            .iter()
            .map(|url| Extracted {
                target: url.clone(),
                result: extractor.extract(url),
            })
            .collect(),
    };

    let mut all_ok = true;
    for extracted in &results {
        if let Err(err) = &extracted.result {
            if err.is_no_menu() && args.allow_empty {
                warn!(page = %extracted.target, "no food menu published");
                continue;
            }
            eprintln!("error extracting {}: {}", extracted.target, err);
            all_ok = false;
        }
    }

    let output = if args.json_output {
        format_json(&results, args.allow_empty)?
    } else {
        format_text(&results)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{}", output),
    }

    Ok(all_ok)
}

/// Plain-text rendering: a date line per day followed by "- name (place): description" lines.
fn format_text(results: &[Extracted]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let many = results.len() > 1;

    for extracted in results {
        let Ok(menu) = &extracted.result else {
            continue;
        };
        if many {
            writeln!(out, "URL: {}", extracted.target)?;
        }
        for day in menu {
            writeln!(out, "{}", day.date().format("%Y-%m-%d"))?;
            for dish in day.dishes() {
                writeln!(
                    out,
                    "- {} ({}): {}",
                    dish.name(),
                    dish.place(),
                    dish.description()
                )?;
            }
            out.push('\n');
        }
    }
    Ok(out)
}

/// JSON rendering. A single successful target emits the menu object; otherwise an
/// envelope with one entry per target and counts.
fn format_json(results: &[Extracted], allow_empty: bool) -> Result<String> {
    let empty = Menu::new();
    let entries: Vec<_> = results
        .iter()
        .map(|extracted| match &extracted.result {
            Ok(menu) => json!({ "url": extracted.target, "ok": true, "menu": menu, "error": null }),
            Err(err) if err.is_no_menu() && allow_empty => {
                json!({ "url": extracted.target, "ok": true, "menu": &empty, "error": null })
            }
            Err(err) => json!({
                "url": extracted.target,
                "ok": false,
                "menu": null,
                "error": err.to_string()
            }),
        })
        .collect();

    let parsed = entries
        .iter()
        .filter(|e| e.get("ok").and_then(|v| v.as_bool()) == Some(true))
        .count();

    let value = if entries.len() == 1 && parsed == 1 {
        entries[0].get("menu").cloned().unwrap_or_else(|| json!({}))
    } else {
        json!({
            "menus": entries,
            "total": entries.len(),
            "parsed": parsed,
            "failed": entries.len() - parsed
        })
    };

    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}
