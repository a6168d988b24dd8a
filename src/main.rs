use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::info;

use pl_standings::config::Config;
use pl_standings::export::export_table_xlsx;
use pl_standings::fetch::SportsDbSource;
use pl_standings::http_client::http_client;
use pl_standings::model::form_to_string;
use pl_standings::plot::{
    BadgeOverlay, BarLayout, Placement, PlotFrame, PlotMetric, ScatterLayout, bar_layout,
    project_plot, scatter_layout,
};
use pl_standings::seasons::Season;
use pl_standings::store::SeasonStore;
use pl_standings::styling::{Highlight, StylingRule, cell_highlight, style_rules};
use pl_standings::table_view::{GLOSSARY, HIGHLIGHT_LEGEND, TableColumn, TableView, project_table};

#[derive(Debug, Default)]
struct Args {
    data: Option<PathBuf>,
    refresh: bool,
    season: Option<Season>,
    json: bool,
    xlsx: Option<PathBuf>,
    bar: Option<PlotMetric>,
    scatter: Option<(PlotMetric, PlotMetric)>,
}

#[derive(Serialize)]
struct Bundle<'a> {
    season: &'a Season,
    seasons: Vec<&'a Season>,
    table: &'a TableView,
    rules: &'a [StylingRule],
    plot: &'a PlotFrame,
    bar: Option<BarLayout>,
    scatter: Option<ScatterLayout>,
    glossary: &'static [(&'static str, &'static str)],
    legend: &'static str,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pl_standings=info")),
        )
        .init();

    let args = parse_args()?;
    let mut config = Config::from_env();
    if let Some(data) = args.data.clone() {
        config.data_path = data;
    }

    let source = SportsDbSource::new(http_client()?, config.api_base.clone());
    let store = SeasonStore::load_or_fetch(&config, &source, args.refresh);
    if !store.fetch_errors().is_empty() {
        eprintln!("Fetch errors ({}):", store.fetch_errors().len());
        for err in store.fetch_errors() {
            eprintln!("  {err}");
        }
    }
    if store.is_empty() {
        return Err(anyhow!("no season standings available"));
    }

    let (season, table) = match args.season.as_ref() {
        Some(season) => (
            season,
            store
                .get(season)
                .with_context(|| format!("season {season} not available"))?,
        ),
        None => store.latest().context("no season standings available")?,
    };
    info!(%season, clubs = table.len(), "projecting season");

    let view = project_table(table);
    let rules = style_rules(&view);
    let frame = project_plot(table);

    if let Some(path) = args.xlsx.as_deref() {
        export_table_xlsx(path, season, &view, &rules)?;
        info!(path = %path.display(), "table exported");
    }

    if args.json {
        let (x, y) = args.scatter.unwrap_or(PlotMetric::DEFAULT_SCATTER);
        let bundle = Bundle {
            season,
            seasons: store.seasons(),
            table: &view,
            rules: &rules,
            plot: &frame,
            bar: bar_layout(&frame, args.bar.unwrap_or(PlotMetric::DEFAULT_BAR)),
            scatter: scatter_layout(&frame, x, y),
            glossary: &GLOSSARY,
            legend: HIGHLIGHT_LEGEND,
        };
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    print_table(season, &view, &rules);
    if let Some(metric) = args.bar
        && let Some(layout) = bar_layout(&frame, metric)
    {
        println!();
        println!("Bar: {} (axis 0..{:.1})", metric, layout.y_range.max);
        for badge in &layout.badges {
            println!(
                "  {:<28} badge at y={:.2} size={:.2}",
                badge.club,
                placement_y(badge),
                badge.size_y
            );
        }
    }
    if let Some((x, y)) = args.scatter
        && let Some(layout) = scatter_layout(&frame, x, y)
    {
        println!();
        println!(
            "Scatter: {} [{}..{}] vs {} [{}..{}]",
            x, layout.x_range.min, layout.x_range.max, y, layout.y_range.min, layout.y_range.max
        );
        for badge in &layout.badges {
            if let Placement::Paper { x, y } = badge.placement {
                println!("  {:<28} paper ({x:.3}, {y:.3})", badge.club);
            }
        }
    }
    Ok(())
}

fn placement_y(badge: &BadgeOverlay) -> f64 {
    match badge.placement {
        Placement::Paper { y, .. } => y,
        Placement::Data { y, .. } => y,
    }
}

fn print_table(season: &Season, view: &TableView, rules: &[StylingRule]) {
    println!("Season {season}");
    let header = view
        .columns
        .iter()
        .map(|meta| match meta.column {
            TableColumn::Club => format!("{:<28}", meta.header),
            TableColumn::Form => meta.header.to_string(),
            _ => format!("{:>9}", meta.header),
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("{header}");

    for row in &view.rows {
        let line = view
            .columns
            .iter()
            .map(|meta| match meta.column {
                TableColumn::Club => format!("{:<28}", row.club.name),
                TableColumn::Form => form_to_string(&row.form),
                column => {
                    let value = row.value(column).unwrap_or_default();
                    let mark = cell_highlight(rules, column, value).map(marker).unwrap_or(' ');
                    format!("{value:>8}{mark}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }

    println!();
    let glossary = GLOSSARY
        .iter()
        .map(|(long, short)| format!("{short}: {long}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("Glossary: {glossary}");
    println!("Marks: * best, ~ worst, + positive, - negative, ! relegation");
}

fn marker(hl: Highlight) -> char {
    match hl {
        Highlight::Best => '*',
        Highlight::Worst => '~',
        Highlight::Positive => '+',
        Highlight::Negative => '-',
        Highlight::Relegation => '!',
    }
}

fn parse_args() -> Result<Args> {
    let raw = std::env::args().skip(1).collect::<Vec<_>>();
    let mut args = Args::default();
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (arg.as_str(), None),
        };
        let mut value = |name: &str| -> Result<String> {
            inline
                .clone()
                .or_else(|| iter.next().cloned())
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{name} expects a value"))
        };
        match flag {
            "--refresh" => args.refresh = true,
            "--json" => args.json = true,
            "--data" => args.data = Some(PathBuf::from(value("--data")?)),
            "--xlsx" => args.xlsx = Some(PathBuf::from(value("--xlsx")?)),
            "--season" => args.season = Some(value("--season")?.parse()?),
            "--bar" => {
                let metric = value("--bar")?.parse::<PlotMetric>().map_err(|e| anyhow!(e))?;
                args.bar = Some(metric);
            }
            "--scatter" => {
                let raw = value("--scatter")?;
                let (x, y) = raw
                    .split_once(',')
                    .context("--scatter expects <x>,<y>")?;
                let x = x.parse::<PlotMetric>().map_err(|e| anyhow!(e))?;
                let y = y.parse::<PlotMetric>().map_err(|e| anyhow!(e))?;
                args.scatter = Some((x, y));
            }
            other => return Err(anyhow!("unknown argument {other}")),
        }
    }
    Ok(args)
}
