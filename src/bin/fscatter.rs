use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fertility_scatter::{DataSource, Loader, Page, PlotConfig, Session, UiEvent};
use fertility_scatter::{export, page};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fscatter",
    version,
    about = "Render an interactive fertility vs. life expectancy scatter plot"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a standalone HTML page with the plot, year controls and tooltips.
    Page(PageArgs),
    /// Draw the points of one year to an .svg or .png file.
    Snapshot(SnapshotArgs),
    /// List the years in the dataset with their row counts.
    Years(YearsArgs),
    /// Step through years and hover points from stdin commands.
    Explore(ExploreArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// CSV path or http(s) URL.
    #[arg(short, long, default_value = "data/dataEveryYear.csv")]
    data: String,
    /// JSON file overriding plot settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Year shown first (defaults to the config's initial year).
    #[arg(short, long)]
    year: Option<String>,
}

#[derive(Args, Debug)]
struct YearsArgs {
    /// CSV path or http(s) URL.
    #[arg(short, long, default_value = "data/dataEveryYear.csv")]
    data: String,
}

#[derive(Args, Debug)]
struct PageArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Output HTML file.
    #[arg(short, long, default_value = "scatter.html")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Output file (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// TTF used for text in PNG output.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExploreArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Rewrite this snapshot (.svg or .png) after every command.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Page(args) => cmd_page(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Years(args) => cmd_years(args),
        Command::Explore(args) => cmd_explore(args),
    }
}

fn load_config(args: &DataArgs) -> Result<PlotConfig> {
    let mut cfg = match &args.config {
        Some(p) => PlotConfig::from_json_file(p)?,
        None => PlotConfig::default(),
    };
    if let Some(y) = &args.year {
        cfg.initial_year = y.clone();
    }
    Ok(cfg)
}

fn load_session(args: &DataArgs) -> Result<Session> {
    let cfg = load_config(args)?;
    let source = DataSource::parse(&args.data);
    let data = Loader::new()?
        .load(&source)
        .with_context(|| format!("load {}", source))?;
    Ok(Session::new(data, cfg)?)
}

fn cmd_page(args: PageArgs) -> Result<()> {
    let cfg = load_config(&args.data)?;
    let title = cfg.title.clone();
    let page = Page::load(&DataSource::parse(&args.data.data), cfg);
    page::save_html(&page, &title, &args.out)?;
    eprintln!("Wrote page to {}", args.out.display());
    // the error page is still written so the failure is visible where the plot would be
    if let Some(msg) = page.error() {
        anyhow::bail!("{}", msg);
    }
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> Result<()> {
    if let Some(font) = &args.font {
        export::register_font_file(font)?;
    }
    let session = load_session(&args.data)?;
    export::save_snapshot(session.surface(), &args.out)?;
    eprintln!(
        "Wrote {} points for {} to {}",
        session.surface().visible_markers().count(),
        session.selected_year(),
        args.out.display()
    );
    Ok(())
}

fn cmd_years(args: YearsArgs) -> Result<()> {
    let source = DataSource::parse(&args.data);
    let data = Loader::new()?
        .load(&source)
        .with_context(|| format!("load {}", source))?;
    for year in data.years().iter() {
        let n = data.rows().iter().filter(|r| r.time == year).count();
        println!("{year}\t{n}");
    }
    if !data.rejected().is_empty() {
        eprintln!("{} rows skipped", data.rejected().len());
    }
    Ok(())
}

/// One line of `explore` input.
fn parse_command(line: &str) -> Option<Result<UiEvent, String>> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let ev = match cmd {
        "prev" | "p" => Ok(UiEvent::Prev),
        "next" | "n" => Ok(UiEvent::Next),
        "year" | "y" => match parts.next() {
            Some(y) => Ok(UiEvent::SelectYear(y.to_string())),
            None => Err("usage: year <YEAR>".to_string()),
        },
        "hover" | "h" => {
            let nums: Vec<&str> = parts.collect();
            match nums.as_slice() {
                [row] => row
                    .parse()
                    .map(|row| UiEvent::PointerEnter {
                        row,
                        x: 0.0,
                        y: 0.0,
                    })
                    .map_err(|_| "usage: hover <ROW> [X Y]".to_string()),
                [row, x, y] => match (row.parse(), x.parse(), y.parse()) {
                    (Ok(row), Ok(x), Ok(y)) => Ok(UiEvent::PointerEnter { row, x, y }),
                    _ => Err("usage: hover <ROW> [X Y]".to_string()),
                },
                _ => Err("usage: hover <ROW> [X Y]".to_string()),
            }
        }
        other => Err(format!("unknown command: {other}")),
    };
    Some(ev)
}

fn cmd_explore(args: ExploreArgs) -> Result<()> {
    let mut session = load_session(&args.data)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print_state(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "q" | "exit") {
            break;
        }
        if trimmed == "leave" || trimmed == "l" {
            if let Some(row) = session.tooltip().hovered() {
                session.handle(UiEvent::PointerLeave { row });
            }
            writeln!(stdout, "tooltip hidden")?;
            continue;
        }
        let event = match parse_command(trimmed) {
            None => continue,
            Some(Ok(ev)) => ev,
            Some(Err(msg)) => {
                writeln!(stdout, "{msg}")?;
                continue;
            }
        };
        let resp = session.handle(event);
        if let Some(tip) = &resp.tooltip
            && let Some(lines) = &tip.lines
        {
            for l in lines {
                writeln!(stdout, "  {l}")?;
            }
            continue;
        }
        if resp.is_noop() {
            writeln!(stdout, "no change")?;
            continue;
        }
        print_state(&mut stdout, &session)?;
        if let Some(out) = &args.out {
            export::save_snapshot(session.surface(), out)?;
        }
    }
    Ok(())
}

fn print_state<W: Write>(w: &mut W, session: &Session) -> Result<()> {
    let selector = session.selector();
    writeln!(
        w,
        "year {} ({}/{}), {} points visible",
        session.selected_year(),
        selector.selected_index() + 1,
        selector.years().len(),
        session.surface().visible_markers().count()
    )?;
    Ok(())
}
