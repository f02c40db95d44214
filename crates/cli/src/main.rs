use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;
use w3scrape_core::{
    Direction, FetchConfig, HttpFetcher, JsonConfig, MarkdownConfig, PageTopics, ScrapeConfig, ScrapeError, Session,
    TextConfig, Tutorial, WkhtmlRenderer, convert_to_json, convert_to_markdown, convert_to_text, fetch_file,
    fetch_stdin,
};

mod echo;

use echo::{format_size, print_banner, print_info, print_page_summary, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Markdown,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, markdown, text", s)),
        }
    }
}

/// Extract tutorial topics from W3Schools pages
#[derive(Parser, Debug)]
#[command(name = "w3scrape")]
#[command(version)]
#[command(about = "Extract tutorial topics from W3Schools pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present_any = ["tutorial", "completions"])]
    input: Option<String>,

    /// Start at the root of a tutorial (html, css, python, ...)
    #[arg(short, long, value_name = "NAME", conflicts_with = "input")]
    tutorial: Option<Tutorial>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, markdown, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Number of pages to walk, stopping early at the last one
    #[arg(long, default_value = "1", value_name = "N")]
    pages: usize,

    /// Walk towards previous pages instead of next ones
    #[arg(long)]
    previous: bool,

    /// Base URL that image sources and pagination links are appended to
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "3", value_name = "SECS")]
    timeout: u64,

    /// Attempts per page before giving up on it
    #[arg(long, default_value = "5", value_name = "N")]
    retries: u32,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Read the User-Agent from a file
    #[arg(long, value_name = "FILE", conflicts_with = "user_agent")]
    user_agent_file: Option<PathBuf>,

    /// Capture embedded divs as PNG images with wkhtmltoimage
    #[arg(long)]
    render_images: bool,

    /// Directory rendered images are written to
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Stylesheet applied when rendering images
    #[arg(long, value_name = "FILE")]
    stylesheet: Option<PathBuf>,

    /// Save the first page's content container as HTML
    #[arg(long, value_name = "FILE")]
    save_html: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Where the first page comes from
enum Source {
    Remote { url: String },
    Local { label: String, html: String },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<ScrapeConfig> {
    let mut builder = ScrapeConfig::builder()
        .timeout(args.timeout)
        .max_attempts(args.retries)
        .render_images(args.render_images);

    if let Some(tutorial) = args.tutorial {
        builder = builder.tutorial(tutorial);
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    if let Some(path) = &args.user_agent_file {
        let user_agent = FetchConfig::user_agent_from_file(path)
            .with_context(|| format!("Failed to read User-Agent from {}", path.display()))?;
        builder = builder.user_agent(user_agent);
    }
    if let Some(dir) = &args.image_dir {
        builder = builder.image_dir(dir.clone());
    }
    if let Some(stylesheet) = &args.stylesheet {
        builder = builder.stylesheet(stylesheet.clone());
    }

    Ok(builder.build())
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Directory part of a page URL, e.g. `https://www.w3schools.com/html/`.
fn directory_of(url: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
    Ok(parsed.join("./").context("URL cannot be a base")?.to_string())
}

fn resolve_source(args: &Args, config: &ScrapeConfig) -> anyhow::Result<(String, Source)> {
    if let Some(start) = config.start_url() {
        let base = args.base_url.clone().unwrap_or_else(|| start.to_string());
        return Ok((base, Source::Remote { url: start.to_string() }));
    }

    let input = args.input.as_deref().context("No input given")?;

    if is_url(input) {
        let base = match &args.base_url {
            Some(base) => base.clone(),
            None => Tutorial::from_url(input)
                .map(|t| Ok(t.base_url().to_string()))
                .unwrap_or_else(|| directory_of(input))?,
        };
        return Ok((base, Source::Remote { url: input.to_string() }));
    }

    let base = args.base_url.clone().unwrap_or_else(|| Tutorial::Html.base_url().to_string());

    if input == "-" {
        let html = fetch_stdin().context("Failed to read from stdin")?;
        return Ok((base.clone(), Source::Local { label: base, html }));
    }

    let html = fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?;
    Ok((base, Source::Local { label: input.to_string(), html }))
}

fn render_output(pages: &[PageTopics], format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let config = JsonConfig { pretty: true, include_excluded: true };
            convert_to_json(pages, &config).context("Failed to convert to JSON")?
        }
        OutputFormat::Markdown => {
            convert_to_markdown(pages, &MarkdownConfig::default()).context("Failed to convert to Markdown")?
        }
        OutputFormat::Text => convert_to_text(pages, &TextConfig::default()).context("Failed to convert to text")?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "w3scrape", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = build_config(&args)?;
    let (base_url, source) = resolve_source(&args, &config)?;

    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;
    let renderer = WkhtmlRenderer::new(config.render.clone());

    let mut session = match source {
        Source::Remote { url } => {
            if args.verbose {
                print_step(1, 3, &format!("Fetching {}", url.bright_white().underline()));
            }
            Session::open_at(&base_url, &url, &config, fetcher, renderer)
                .await
                .with_context(|| format!("Failed to open {}", url))?
        }
        Source::Local { label, html } => {
            if args.verbose {
                print_step(1, 3, &format!("Reading {}", label.bright_white()));
                eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
            }
            Session::from_html(&base_url, &label, &html, &config, fetcher, renderer)
                .with_context(|| format!("Failed to load {}", label))?
        }
    };

    if !session.page().is_available() {
        print_warning(&format!("No content received from {}", session.url()));
    } else if args.verbose {
        if let Some(title) = session.page().document().title() {
            eprintln!("  {} {}", "Title:".dimmed(), title.trim().bright_white());
        }
    }

    if let Some(path) = &args.save_html {
        session
            .write_html(path, false)
            .with_context(|| format!("Failed to write HTML to {}", path.display()))?;
        if args.verbose {
            print_info(&format!("Saved page HTML to {}", path.display()));
        }
    }

    if args.verbose {
        eprintln!();
        print_step(2, 3, "Extracting topics");
    }

    let direction = if args.previous { Direction::Previous } else { Direction::Next };
    let mut pages = vec![session.page_topics()];
    if args.verbose {
        print_page_summary(&pages[0]);
    }

    while pages.len() < args.pages {
        match session.paginate(direction).await.map(|_| ()) {
            Ok(()) => {}
            Err(ScrapeError::NoPage { .. }) => {
                if args.verbose {
                    print_info(&format!("No {} page after {}", direction, session.url()));
                }
                break;
            }
            Err(err) => {
                print_warning(&format!("Stopping at {}: {}", session.url(), err));
                break;
            }
        }

        let page = session.page_topics();
        if args.verbose {
            print_page_summary(&page);
        }
        pages.push(page);
    }

    let output = render_output(&pages, args.format)?;

    if args.verbose {
        eprintln!();
        print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        eprintln!("  {} {}", "Pages:".dimmed(), pages.len().to_string().bright_white());
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
