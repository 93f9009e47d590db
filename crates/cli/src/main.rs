// ABOUTME: CLI binary for the pagelens HTML normalization engine.
// ABOUTME: Fetches URLs or reads local HTML and prints the extracted collections as JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use pagelens_core::{Client, NormalizedPage, PassthroughProbe};

#[derive(Parser, Debug)]
#[command(name = "pagelens")]
#[command(about = "Normalize a web page's references and extract links, images, and article fragments")]
struct Args {
    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output compact JSON instead of pretty
    #[arg(long = "compact")]
    compact: bool,

    /// HTML file to normalize (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Base URL for HTML file normalization (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Skip reachability probing of iframe/img targets
    #[arg(long = "skip-probe")]
    skip_probe: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// URLs to normalize (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

/// Serialize results: a single page prints bare, multiple print as an array.
fn format_output(results: &[NormalizedPage], compact: bool) -> String {
    if results.len() == 1 {
        if compact {
            serde_json::to_string(&results[0]).unwrap()
        } else {
            serde_json::to_string_pretty(&results[0]).unwrap()
        }
    } else if compact {
        serde_json::to_string(results).unwrap()
    } else {
        serde_json::to_string_pretty(results).unwrap()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Validate args
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

    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if args.skip_probe {
        builder = builder.probe(Box::new(PassthroughProbe));
    }
    let client = builder.build();

    let start = Instant::now();
    let mut results: Vec<NormalizedPage> = Vec::new();
    let mut had_error = false;

    if let Some(html_path) = &args.html {
        // HTML file mode
        let url = args.url.as_ref().unwrap();
        match fs::read_to_string(html_path) {
            Ok(html_content) => match client.normalize_html(&html_content, url) {
                Ok(page) => {
                    results.push(page);
                }
                Err(e) => {
                    eprintln!("error normalizing HTML: {}", e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error reading file {:?}: {}", html_path, e);
                had_error = true;
            }
        }
    } else {
        // URL fetch mode
        for url in &args.urls {
            match client.normalize(url) {
                Ok(page) => {
                    results.push(page);
                }
                Err(e) => {
                    eprintln!("error normalizing {}: {}", url, e);
                    had_error = true;
                }
            }
        }
    }

    let elapsed = start.elapsed();

    // Output results
    if !results.is_empty() {
        let output_str = format_output(&results, args.compact);

        if let Some(output_path) = &args.output {
            if let Err(e) = fs::write(output_path, &output_str) {
                eprintln!("error writing to {:?}: {}", output_path, e);
                had_error = true;
            }
        } else {
            println!("{}", output_str);
        }
    }

    // Print timing if requested
    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
