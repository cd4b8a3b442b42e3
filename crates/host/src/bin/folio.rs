// ABOUTME: CLI binary for the Folio citation translators.
// ABOUTME: Translates URLs or saved HTML files and writes the records as a JSON array.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use folio_host::{Client, Item, PageKind, PromptSelect, SelectAll, SelectItems};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Save citation records from National Archives of Australia and TEI Guidelines pages")]
struct Args {
    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// HTML file to translate (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL the HTML file was saved from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Take every record on listing pages instead of prompting
    #[arg(long = "all")]
    all: bool,

    /// Only print what kind of page each URL is
    #[arg(long = "detect")]
    detect: bool,

    /// Write JSON on a single line
    #[arg(long = "compact")]
    compact: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// HTTP timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// URLs to translate (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,folio_host=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn kind_label(kind: Option<PageKind>) -> String {
    match kind {
        Some(PageKind::Multiple) => "multiple".to_string(),
        Some(PageKind::Single(item_type)) => item_type.to_string(),
        None => "none".to_string(),
    }
}

fn format_items(items: &[Item], compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(items)
    } else {
        serde_json::to_string_pretty(items)
    }
}

fn emit(output: &Option<PathBuf>, text: &str) -> Result<(), io::Error> {
    match output {
        Some(path) => fs::write(path, text),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let client = match Client::builder()
        .allow_private_networks(args.allow_private_networks)
        .timeout(Duration::from_secs(args.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let selector: &dyn SelectItems = if args.all { &SelectAll } else { &PromptSelect };

    let start = Instant::now();
    let mut had_error = false;
    let mut items: Vec<Item> = Vec::new();
    let mut kinds: Vec<String> = Vec::new();

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        match fs::read_to_string(html_path) {
            Ok(html) if args.detect => match client.detect_html(&html, url) {
                Ok(kind) => kinds.push(format!("{}\t{}", url, kind_label(kind))),
                Err(e) => {
                    eprintln!("error detecting {}: {}", url, e);
                    had_error = true;
                }
            },
            Ok(html) => match client.translate_html(&html, url, selector).await {
                Ok(found) => items.extend(found),
                Err(e) => {
                    eprintln!("error translating HTML: {}", e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                had_error = true;
            }
        }
    } else {
        for url in &args.urls {
            if args.detect {
                match client.detect(url).await {
                    Ok(kind) => kinds.push(format!("{}\t{}", url, kind_label(kind))),
                    Err(e) => {
                        eprintln!("error detecting {}: {}", url, e);
                        had_error = true;
                    }
                }
                continue;
            }
            match client.translate(url, selector).await {
                Ok(found) => items.extend(found),
                Err(e) => {
                    eprintln!("error translating {}: {}", url, e);
                    had_error = true;
                }
            }
        }
    }

    let elapsed = start.elapsed();
    tracing::info!(records = items.len(), elapsed_ms = elapsed.as_millis() as u64, "done");

    let rendered = if args.detect {
        Ok(kinds.join("\n"))
    } else {
        format_items(&items, args.compact)
    };
    match rendered {
        Ok(text) if !text.is_empty() => {
            if let Err(e) = emit(&args.output, &text) {
                eprintln!("error writing output: {}", e);
                had_error = true;
            }
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("error encoding records: {}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
