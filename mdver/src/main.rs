//! mdver - browse versions of a markdown document, diff and search them

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdver_core::diff::DiffStats;
use mdver_core::search;
use mdver_core::{render, toc, Config, DiffKind, Session, VersionList};
use std::path::PathBuf;

/// Versioned markdown viewer
#[derive(Parser, Debug)]
#[command(name = "mdver")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Version files plus the one to look at
#[derive(clap::Args, Debug)]
struct Target {
    /// Markdown files, oldest version first
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Version to select (1-based, defaults to the newest)
    #[arg(short = 'r', long = "rev")]
    rev: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List versions
    List {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the table of contents of a version
    Outline {
        #[command(flatten)]
        target: Target,
    },
    /// Print the line diff against the previous version
    Diff {
        #[command(flatten)]
        target: Target,
    },
    /// Print a version as plain text, optionally highlighting a query
    Show {
        #[command(flatten)]
        target: Target,
        /// Show the diff against the previous version instead
        #[arg(long)]
        diff: bool,
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Count matches of a query and print the selected one
    Search {
        #[command(flatten)]
        target: Target,
        /// Search the diff against the previous version instead
        #[arg(long)]
        diff: bool,
        #[arg(short, long)]
        query: String,
        /// Match to jump to (1-based, wraps around)
        #[arg(long, default_value_t = 1)]
        nth: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match args.command {
        Command::List { files } => list(&files),
        Command::Outline { target } => outline(&config, &open(&target)?),
        Command::Diff { target } => {
            let mut session = open(&target)?;
            enter_diff_mode(&mut session)?;
            print_diff(&config, &session);
            Ok(())
        }
        Command::Show {
            target,
            diff,
            query,
        } => {
            let mut session = open(&target)?;
            if diff {
                enter_diff_mode(&mut session)?;
            }
            show(&config, &session, query.as_deref());
            Ok(())
        }
        Command::Search {
            target,
            diff,
            query,
            nth,
        } => {
            let mut session = open(&target)?;
            if diff {
                enter_diff_mode(&mut session)?;
            }
            search_cmd(&config, &mut session, &query, nth);
            Ok(())
        }
    }
}

/// Load the versions and select the requested one
fn open(target: &Target) -> Result<Session> {
    let versions = VersionList::load(&target.files).context("Failed to load versions")?;
    let index = match target.rev {
        Some(rev) => rev.checked_sub(1).context("Versions are numbered from 1")?,
        None => versions.len() - 1,
    };

    let mut session = Session::new(versions);
    session.select(index)?;
    Ok(session)
}

fn enter_diff_mode(session: &mut Session) -> Result<()> {
    if !session.can_diff() {
        anyhow::bail!("The first version has no previous version to compare with");
    }
    session.toggle_diff_mode();
    Ok(())
}

fn header(session: &Session) {
    println!("{} - {}", session.current_document().name, session.version_label());
    if let Some(label) = session.comparison_label() {
        println!("{}", label);
    }
    println!();
}

fn list(files: &[PathBuf]) -> Result<()> {
    let versions = VersionList::load(files).context("Failed to load versions")?;
    for (idx, doc) in versions.iter().enumerate() {
        println!("{:>3}  {}  ({} lines)", idx + 1, doc.name, doc.line_count());
    }
    Ok(())
}

fn outline(config: &Config, session: &Session) -> Result<()> {
    if !config.toc.enabled {
        log::info!("Outline disabled in config");
        return Ok(());
    }

    header(session);
    for heading in toc::filter_max_level(session.headings(), config.toc.max_level) {
        let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
        println!("{}{}  #{}", indent, heading.text, heading.id);
    }
    Ok(())
}

fn print_diff(config: &Config, session: &Session) {
    header(session);
    let lines = session.diff_lines().unwrap_or_default();
    for line in lines {
        let marker = match line.kind {
            DiffKind::Added => "+",
            DiffKind::Removed => "-",
            DiffKind::Unchanged if config.diff.show_unchanged => " ",
            DiffKind::Unchanged => continue,
        };
        println!("{} {}", marker, line.content);
    }

    let stats = DiffStats::from_lines(lines);
    println!();
    println!(
        "{} added, {} removed, {} unchanged",
        stats.added, stats.removed, stats.unchanged
    );
}

fn show(config: &Config, session: &Session, query: Option<&str>) {
    header(session);
    let query = query.unwrap_or("");

    let lines: Vec<String> = if session.diff_mode_on() {
        session
            .diff_lines()
            .unwrap_or_default()
            .iter()
            .map(|l| l.content.clone())
            .collect()
    } else {
        render::render(&session.current_document().content)
            .lines
            .into_iter()
            .map(|l| l.text)
            .collect()
    };

    let mut total = 0;
    for line in &lines {
        let spans = search::highlight(line, query);
        total += spans.iter().filter(|s| s.is_match).count();
        println!(
            "{}",
            search::render_spans(&spans, &config.search.match_start, &config.search.match_end)
        );
    }

    if !query.trim().is_empty() {
        println!();
        println!("{} matches for {:?}", total, query);
    }
}

fn search_cmd(config: &Config, session: &mut Session, query: &str, nth: usize) {
    header(session);
    if session.set_query(query).total == 0 {
        println!("No matches for {:?}", query);
        return;
    }

    let status = session.jump_to(nth);
    println!("Match {} of {}", status.current, status.total);

    let content = session.active_content();
    if let Some(range) = session.search().current_range() {
        let line_start = content[..range.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = content[range.end..]
            .find('\n')
            .map_or(content.len(), |i| range.end + i);
        let line_no = content[..range.start].matches('\n').count() + 1;

        println!(
            "{:>5}: {}{}{}{}{}",
            line_no,
            &content[line_start..range.start],
            config.search.match_start,
            &content[range.clone()],
            config.search.match_end,
            &content[range.end..line_end],
        );
    }
}
