use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::VisitLimit;
use sitemapper_core::crawl::{CrawlOptions, execute_crawl};
use sitemapper_core::report::{ReportData, ReportFormat, gather_report_data, render_report, save_report};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub fn print_banner() {
    println!(
        "{}",
        r#"
     _ _
 ___(_) |_ ___ _ __ ___   __ _ _ __  _ __   ___ _ __
/ __| | __/ _ \ '_ ` _ \ / _` | '_ \| '_ \ / _ \ '__|
\__ \ | ||  __/ | | | | | (_| | |_) | |_) |  __/ |
|___/_|\__\___|_| |_| |_|\__,_| .__/| .__/ \___|_|
                              |_|   |_|"#
            .cyan()
    );
    println!(
        "  {} {}\n",
        "single-domain sitemap crawler".dimmed(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}

/// Map the number of `-v` flags to a tracing filter directive.
pub fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Parse the `--limit` value. Zero or a negative number allows no fetch at
/// all; anything that is not an integer falls back to an unbounded crawl.
pub fn parse_limit(raw: Option<&str>) -> VisitLimit {
    let Some(raw) = raw else {
        return VisitLimit::Unbounded;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n <= 0 => VisitLimit::Pages(0),
        Ok(n) => VisitLimit::Pages(usize::try_from(n).unwrap_or(usize::MAX)),
        Err(_) => {
            warn!("Limit {:?} is not a number, crawling whole site", raw);
            VisitLimit::Unbounded
        }
    }
}

/// Ask for the url to crawl on `output` and read one line from `input`.
pub fn prompt_for_target<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "Enter a url to crawl: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no url given on standard input",
        ));
    }
    Ok(line.trim().to_string())
}

/// Use the target given on the command line, or prompt for one. The prompt
/// goes to `stderr` when `stdout` carries the report.
pub fn target_or_prompt<R: BufRead, O: Write, E: Write>(
    given: Option<&str>,
    report_on_stdout: bool,
    input: &mut R,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<String> {
    match given {
        Some(target) => Ok(target.to_string()),
        None if report_on_stdout => prompt_for_target(input, stderr),
        None => prompt_for_target(input, stdout),
    }
}

/// Where the report goes. `None` means stdout.
pub fn resolve_output_path(output: Option<&str>, format: ReportFormat) -> Option<PathBuf> {
    match output {
        Some("-") => None,
        Some(path) => Some(PathBuf::from(shellexpand::tilde(path).as_ref())),
        None => Some(PathBuf::from(format!("sitemap.{}", format.extension()))),
    }
}

/// Write the rendered report to `path`, or to stdout when there is none.
pub fn emit_report(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => save_report(content, path)
            .with_context(|| format!("Failed to write sitemap to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn print_summary(data: &ReportData, elapsed: Duration) {
    let summary = &data.summary;
    println!(
        "{} Crawling done in {:.3} seconds",
        "✓".green().bold(),
        elapsed.as_secs_f64()
    );
    println!("  {} {}", "Domain:".bold(), data.domain);
    println!(
        "  {} {} attempted, {} fetched, {} failed",
        "Pages:".bold(),
        summary.fetch_attempts,
        summary.pages_fetched.to_string().green(),
        summary.failed_fetches.to_string().red()
    );
    println!("  {} {}", "Assets probed:".bold(), summary.probes);
    println!(
        "  {} {} nodes, {} edges",
        "Sitemap:".bold(),
        summary.nodes.to_string().cyan(),
        summary.edges.to_string().cyan()
    );
    println!("  {} {}", "Blacklisted:".bold(), summary.blacklisted);
    if summary.limit_reached {
        println!(
            "  {} visit limit reached with {} urls still queued",
            "!".yellow().bold(),
            summary.frontier_remaining
        );
    }
}

pub async fn handle_crawl(args: &ArgMatches) -> anyhow::Result<()> {
    let quiet = args.get_flag("quiet");

    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Dot);
    let output = resolve_output_path(args.get_one::<String>("output").map(String::as_str), format);
    // Chatter would corrupt a report written to stdout
    let chatty = !quiet && output.is_some();

    let target = target_or_prompt(
        args.get_one::<String>("TARGET").map(String::as_str),
        output.is_none(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .context("Failed to read the url to crawl")?;
    if target.trim().is_empty() {
        bail!("No url given to crawl");
    }

    let mut options = CrawlOptions::new(target);
    options.limit = parse_limit(args.get_one::<String>("limit").map(String::as_str));
    if let Some(&ms) = args.get_one::<u64>("delay") {
        options.delay = Duration::from_millis(ms);
    }
    if let Some(&secs) = args.get_one::<u64>("timeout") {
        options.timeout_secs = secs;
    }
    options.show_progress_bars = chatty;

    info!("Crawl options: limit {:?}, delay {:?}", options.limit, options.delay);

    let outcome = execute_crawl(options).await?;
    let data = gather_report_data(&outcome);
    let content = render_report(&data, format)?;

    if chatty {
        print_summary(&data, outcome.elapsed);
    } else if !quiet {
        eprintln!("Crawling done in {:.3} seconds", outcome.elapsed.as_secs_f64());
    }

    emit_report(&content, output.as_deref())?;

    if let Some(path) = output.filter(|_| chatty) {
        println!(
            "{} Sitemap written to {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        );
    }

    Ok(())
}
