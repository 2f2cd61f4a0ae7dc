//! Generate a course package from a course title and print it.
//!
//! The API key comes from `--api-key` (which also caches it), the
//! `OPENAI_API_KEY` environment variable, or the credential cache, in that
//! order.
//!
//! # Examples
//!
//! ```sh
//! # First run: pass the key once, it is cached for later runs
//! edulearn --title "Introduction to Rust" --api-key sk-...
//!
//! # Only the learning outcomes, copied to the clipboard
//! edulearn --title "Organic Chemistry" --section outcomes --copy
//!
//! # HTML fragments for embedding, or JSON for scripts
//! edulearn --title "Statistics 101" --format html
//! edulearn --title "Statistics 101" --format json
//!
//! # Against a local OpenAI-compatible server
//! edulearn --title "Poetry" --api-base-url http://localhost:8080/v1/chat/completions
//!
//! # Remove the cached key
//! edulearn --forget-key
//! ```

use std::io;
use std::process;

use clap::{Parser, ValueEnum};
use edulearn::clipboard::{CommandClipboard, CopyOutcome, copy_with_fallback};
use edulearn::config::{
    API_KEY_ENV, DEFAULT_MODEL, DISCLAIMER, LOADING_MESSAGE, OPENAI_CHAT_URL,
};
use edulearn::prelude::*;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Generate a course objective, syllabus, learning outcomes, assessments and
/// readings for a course title.
#[derive(Parser)]
#[command(name = "edulearn", version)]
struct Cli {
    // ── Input ──────────────────────────────────────────────────
    /// Course title (at least 3 characters)
    #[arg(long, short)]
    title: Option<String>,

    /// API key; stored in the local credential cache for later runs
    #[arg(long)]
    api_key: Option<String>,

    /// Remove the cached API key
    #[arg(long)]
    forget_key: bool,

    // ── Request ────────────────────────────────────────────────
    /// Model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens in the reply
    #[arg(long, default_value_t = 3000)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Chat-completion endpoint URL
    #[arg(long, default_value = OPENAI_CHAT_URL)]
    api_base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    // ── Output ─────────────────────────────────────────────────
    /// Which part of the package to output
    #[arg(long, value_enum, default_value_t = SectionArg::All)]
    section: SectionArg,

    /// Output format (json always contains the whole package)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the model's reply without segmenting it
    #[arg(long)]
    raw: bool,

    /// Copy the output to the clipboard instead of printing it
    #[arg(long)]
    copy: bool,

    /// Log request details to stderr
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SectionArg {
    All,
    Objective,
    Syllabus,
    Outcomes,
    Assessments,
    Readings,
}

impl SectionArg {
    fn section(self) -> Option<Section> {
        match self {
            SectionArg::All => None,
            SectionArg::Objective => Some(Section::Objective),
            SectionArg::Syllabus => Some(Section::Syllabus),
            SectionArg::Outcomes => Some(Section::Outcomes),
            SectionArg::Assessments => Some(Section::Assessments),
            SectionArg::Readings => Some(Section::Readings),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn open_store() -> Box<dyn CredentialStore> {
    match FileCredentialStore::default_location() {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("{e}; the API key will not be cached");
            Box::new(MemoryCredentialStore::default())
        }
    }
}

fn build_config(cli: &Cli) -> CourseConfig {
    CourseConfig::default()
        .with_model(&cli.model)
        .with_max_tokens(cli.max_tokens)
        .with_temperature(cli.temperature)
        .with_api_base_url(&cli.api_base_url)
        .with_timeout_secs(cli.timeout)
}

fn render_html(content: &CourseContent, section: Option<Section>) -> String {
    let html = content.formatted();
    let fields: Vec<(&str, &str)> = match section {
        None => vec![
            ("objective", html.objective.as_str()),
            ("syllabus", html.syllabus.as_str()),
            ("knowledge", html.knowledge.as_str()),
            ("comprehension", html.comprehension.as_str()),
            ("application", html.application.as_str()),
            ("assessments", html.assessments.as_str()),
            ("readings", html.readings.as_str()),
        ],
        Some(Section::Objective) => vec![("objective", html.objective.as_str())],
        Some(Section::Syllabus) => vec![("syllabus", html.syllabus.as_str())],
        Some(Section::Outcomes) => vec![
            ("knowledge", html.knowledge.as_str()),
            ("comprehension", html.comprehension.as_str()),
            ("application", html.application.as_str()),
        ],
        Some(Section::Assessments) => vec![("assessments", html.assessments.as_str())],
        Some(Section::Readings) => vec![("readings", html.readings.as_str())],
    };
    fields
        .into_iter()
        .map(|(id, body)| format!("<section id=\"{id}\">{body}</section>"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(cli: &Cli, content: &CourseContent) -> Result<String, String> {
    let section = cli.section.section();
    match cli.format {
        OutputFormat::Text => Ok(match section {
            Some(s) => section_text(s, content),
            None => all_content_text(content),
        }),
        OutputFormat::Html => Ok(render_html(content, section)),
        OutputFormat::Json => serde_json::to_string_pretty(content)
            .map_err(|e| format!("failed to serialize output: {e}")),
    }
}

// ── Main flow ──────────────────────────────────────────────────────

async fn run(cli: &Cli) -> Result<String, String> {
    let mut session = Session::open(build_config(cli), open_store());

    if cli.forget_key {
        session.forget_api_key();
        if cli.title.is_none() {
            return Ok("Cached API key removed.\n".to_string());
        }
    }

    let env_key = std::env::var(API_KEY_ENV).ok();
    let source = session.resolve_api_key(cli.api_key.as_deref(), env_key.as_deref());
    debug!("API key source: {source:?}");

    let title = cli.title.as_deref().unwrap_or_default();
    // Fail fast on input problems before building the HTTP client.
    session.validate(title).map_err(|e| e.to_string())?;

    let client = OpenAiClient::new(session.config()).map_err(|e| e.to_string())?;
    eprintln!("{LOADING_MESSAGE}");

    let output = if cli.raw {
        let (_, reply) = session
            .generate_raw(&client, title)
            .await
            .map_err(|e| e.to_string())?;
        reply
    } else {
        let content = session
            .generate(&client, title)
            .await
            .map_err(|e| e.to_string())?;
        render(cli, &content)?
    };

    if cli.copy {
        let mut stdout = io::stdout();
        let outcome = copy_with_fallback(&CommandClipboard::default(), &output, &mut stdout)
            .map_err(|e| format!("failed to write output: {e}"))?;
        if outcome == CopyOutcome::Clipboard {
            eprintln!("Copied to clipboard.");
        }
        return Ok(String::new());
    }

    if cli.format == OutputFormat::Text && !cli.raw {
        eprintln!("\n{DISCLAIMER}");
    }
    Ok(format!("{output}\n"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
