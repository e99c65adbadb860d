//! tinta studio: runs the coloring pipeline without a display.

mod cli;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use tinta_engine::logging::{LoggingConfig, init_logging};
use tinta_engine::prepare::processed_file_name;
use tinta_engine::{FillParams, Palette, PrepareOptions, PrepareReport, Region, prepare};
use tinta_surface::prelude::*;

use crate::cli::{Cli, Command, FillArgs, PaintArgs, PrepareArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    match cli.command {
        Command::Prepare(args) => run_prepare(args, cli.json),
        Command::Fill(args) => run_fill(args, cli.json),
        Command::Paint(args) => run_paint(args, cli.json),
    }
}

// ── prepare ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PrepareSummary<'a> {
    output: &'a Path,
    report: PrepareReport,
    palette: &'a Palette,
    regions: &'a [Region],
}

fn run_prepare(args: PrepareArgs, json: bool) -> Result<()> {
    let markup = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut options = PrepareOptions::default();
    if args.all_shapes {
        options = options.all_shapes();
    }
    if let Some(palette) = palette_arg(args.palette) {
        options = options.with_palette(palette);
    }

    let prepared = prepare(&markup, &options)
        .with_context(|| format!("preparing {}", args.input.display()))?;

    let output = args.output.unwrap_or_else(|| {
        let name = args.input.file_name().and_then(|n| n.to_str());
        args.input.with_file_name(processed_file_name(name))
    });
    std::fs::write(&output, &prepared.markup)
        .with_context(|| format!("writing {}", output.display()))?;

    let report = prepared.report();
    if json {
        print_json(&PrepareSummary {
            output: &output,
            report,
            palette: &prepared.palette,
            regions: &prepared.regions,
        })
    } else {
        println!(
            "{}: {} shapes, {} colors, {} unresolved",
            output.display(),
            report.shapes,
            report.colors,
            report.unresolved
        );
        Ok(())
    }
}

// ── fill ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct FillSummary<'a> {
    output: &'a Path,
    filled: Vec<usize>,
    colorable: usize,
    progress: f32,
}

fn run_fill(args: FillArgs, json: bool) -> Result<()> {
    let fill = FillParams::default()
        .with_darkness_threshold(args.threshold)
        .with_fill_alpha(args.alpha);
    let mut config = SurfaceConfig::default().with_fill(fill);
    if let Some(title) = args.title {
        config = config.with_title(title);
    }

    let mut surface = RasterSurface::new(config, palette_arg(args.palette));
    let source = ImageSource::RasterUrl(args.input.to_string_lossy().into_owned());
    surface
        .load(&source, &FileFetcher::new())
        .with_context(|| format!("loading {}", args.input.display()))?;
    select(&mut surface, args.color)?;

    let now = Instant::now();
    let filled: Vec<usize> = args
        .seeds
        .iter()
        .map(|&seed| {
            let n = surface.fill_at(seed, now);
            log::info!("seed ({}, {}): {n} pixels", seed.x, seed.y);
            n
        })
        .collect();

    let image = surface.export().context("no seed hit a fillable area")?;
    let output = args.output.unwrap_or_else(|| PathBuf::from(surface.export_file_name()));
    std::fs::write(&output, &image.png).with_context(|| format!("writing {}", output.display()))?;

    if json {
        print_json(&FillSummary {
            output: &output,
            filled,
            colorable: surface.colorable_pixels(),
            progress: surface.progress(),
        })
    } else {
        println!("{}: {:.0}% colored", output.display(), surface.progress() * 100.0);
        Ok(())
    }
}

// ── paint ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PaintOutcome {
    region: String,
    painted: bool,
}

#[derive(Serialize)]
struct PaintSummary<'a> {
    output: &'a Path,
    regions: Vec<PaintOutcome>,
    progress: f32,
}

fn run_paint(args: PaintArgs, json: bool) -> Result<()> {
    let mut config = SurfaceConfig::default();
    if let Some(title) = args.title {
        config = config.with_title(title);
    }

    let mut surface = VectorSurface::new(config, palette_arg(args.palette));
    let source = ImageSource::VectorUrl(args.input.to_string_lossy().into_owned());
    surface
        .load(&source, &FileFetcher::new())
        .with_context(|| format!("loading {}", args.input.display()))?;
    select(&mut surface, args.color)?;

    let targets = if args.regions.is_empty() {
        surface.highlights().into_iter().map(|h| h.region_id).collect()
    } else {
        args.regions
    };

    let now = Instant::now();
    let outcomes: Vec<PaintOutcome> = targets
        .into_iter()
        .map(|region| {
            let painted = surface.click_region(&region, now);
            if !painted {
                log::warn!("region {region} was not painted");
            }
            PaintOutcome { region, painted }
        })
        .collect();

    let output = args.output.unwrap_or_else(|| PathBuf::from(surface.export_file_name()));
    let is_png = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    let written = if is_png {
        let image = surface.export().context("no region was painted")?;
        std::fs::write(&output, &image.png)
    } else {
        let markup = surface.render_markup().context("no image loaded")?;
        std::fs::write(&output, markup)
    };
    written.with_context(|| format!("writing {}", output.display()))?;

    if json {
        print_json(&PaintSummary { output: &output, regions: outcomes, progress: surface.progress() })
    } else {
        let painted = outcomes.iter().filter(|o| o.painted).count();
        println!(
            "{}: {painted}/{} regions painted, {:.0}% complete",
            output.display(),
            outcomes.len(),
            surface.progress() * 100.0
        );
        Ok(())
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

fn palette_arg(colors: Vec<String>) -> Option<Palette> {
    (!colors.is_empty()).then(|| colors.into_iter().map(|c| c.trim().to_string()).collect())
}

/// Select the 1-based palette number `color`.
fn select(surface: &mut impl ColoringSurface, color: usize) -> Result<()> {
    let len = surface.palette().palette().len();
    if color == 0 || !surface.select_color(color - 1) {
        bail!("color {color} is not in the palette (1..={len})");
    }
    log::debug!("{}", surface.status_text());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
