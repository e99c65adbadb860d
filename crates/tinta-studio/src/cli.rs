//! Command-line arguments.
//!
//! ```text
//! tinta-studio prepare bird.svg -o bird-processed.svg --json
//! tinta-studio fill lineart.png --color 3 --seed 120,80 --seed 40,40 -o out.png
//! tinta-studio paint bird-processed.svg --color 1 -o painted.png
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tinta_engine::coords::PixelPos;

#[derive(Parser, Debug)]
#[command(name = "tinta-studio", about = "Headless color-by-number pipeline", version)]
pub struct Cli {
    /// Log filter in env_logger syntax (e.g. "debug", "tinta_surface=trace").
    /// Falls back to RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Print a JSON report on stdout instead of a summary line.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn an SVG into an outline-only coloring template.
    Prepare(PrepareArgs),
    /// Flood-fill raster line art at one or more seed points.
    Fill(FillArgs),
    /// Paint regions of a vector image with one palette color.
    Paint(PaintArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    pub input: PathBuf,

    /// Output path. Defaults to `<stem>-processed.<ext>` next to the input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Comma-separated palette replacing the discovered colors.
    #[arg(long, value_delimiter = ',', value_name = "COLORS")]
    pub palette: Vec<String>,

    /// Treat rect, circle, ellipse, polygon and polyline as regions too.
    #[arg(long)]
    pub all_shapes: bool,
}

#[derive(Args, Debug)]
pub struct FillArgs {
    pub input: PathBuf,

    /// 1-based palette number.
    #[arg(short, long, value_name = "N")]
    pub color: usize,

    /// Buffer position to fill from, as `x,y`. Repeatable.
    #[arg(short, long = "seed", value_name = "X,Y", value_parser = parse_seed, required = true)]
    pub seeds: Vec<PixelPos>,

    /// Comma-separated palette. Defaults to the built-in one.
    #[arg(long, value_delimiter = ',', value_name = "COLORS")]
    pub palette: Vec<String>,

    /// Channels strictly below this value count as fillable.
    #[arg(long, default_value_t = 50)]
    pub threshold: u8,

    /// Alpha written to filled pixels.
    #[arg(long, default_value_t = 200)]
    pub alpha: u8,

    /// Output PNG. Defaults to `<title>-boyama.png` in the working directory.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug)]
pub struct PaintArgs {
    pub input: PathBuf,

    /// 1-based palette number.
    #[arg(short, long, value_name = "N")]
    pub color: usize,

    /// Region ids to paint. When omitted, every region of the selected
    /// color is painted.
    #[arg(short, long = "region", value_name = "ID")]
    pub regions: Vec<String>,

    /// Comma-separated palette replacing the discovered colors.
    #[arg(long, value_delimiter = ',', value_name = "COLORS")]
    pub palette: Vec<String>,

    /// Output file. `.png` renders the picture, anything else writes markup.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,
}

fn parse_seed(s: &str) -> Result<PixelPos, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(PixelPos::new(x, y))
}
