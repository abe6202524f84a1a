use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use blf_packer_core::{
    InputImage, PackerConfig, Thickness, pack_images, pack_layout, to_json_manifest,
};
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use image::ImageReader;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "blf-packer",
    about = "Pack images into a texture atlas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show a progress bar while loading images (disable with --quiet)
    #[arg(long, default_value_t = true, action = ArgAction::Set, global = true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into an atlas PNG plus a JSON manifest
    Pack(PackArgs),
    /// Layout-only: compute placements and write the JSON manifest (no PNG)
    Layout(PackArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input image file, directory, or glob pattern (may be repeated)
    #[arg(short, long, required = true, help_heading = "Input/Output")]
    input: Vec<String>,
    /// Output image file path (the manifest lands beside it as .json)
    #[arg(short, long, default_value = "atlas.png", help_heading = "Input/Output")]
    output: PathBuf,
    /// YAML config file path (overrides packing options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Layout
    /// Container width
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..), help_heading = "Layout")]
    width: u32,
    /// Margin around each input image
    #[arg(
        short,
        long,
        num_args = 4,
        value_names = ["TOP", "RIGHT", "BOTTOM", "LEFT"],
        default_values_t = [0u32, 0, 0, 0],
        help_heading = "Layout"
    )]
    margin: Vec<u32>,
    /// Collapse margins between adjacent images into each other
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    collapse_margin: bool,
    /// Disable automatic adjustment of the container size
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    disable_auto_size: bool,
    /// Force the power-of-two rule on the final dimensions
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    force_pow2: bool,

    // Compositing
    /// Disable the vertical flip of the output page
    #[arg(long, default_value_t = false, help_heading = "Compositing")]
    disable_vertical_flip: bool,
    /// Background color as RGB or RGBA, each channel in 0..=1
    #[arg(long, num_args = 3..=4, help_heading = "Compositing")]
    bg_color: Option<Vec<f32>>,

    // Solver
    /// Evaluate piece orderings in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Solver")]
    parallel: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Solver")]
    print_config: bool,
}

/// Packing options loadable from a YAML file; unset fields keep the CLI value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct YamlConfig {
    margin: Option<[u32; 4]>,
    collapse_margin: Option<bool>,
    enable_auto_size: Option<bool>,
    force_pow2: Option<bool>,
    flip_vertical: Option<bool>,
    background: Option<[u8; 4]>,
    parallel: Option<bool>,
}

impl YamlConfig {
    fn apply(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some([top, right, bottom, left]) = self.margin {
            cfg.margin = Thickness::new(top, right, bottom, left);
        }
        if let Some(v) = self.collapse_margin {
            cfg.collapse_margin = v;
        }
        if let Some(v) = self.enable_auto_size {
            cfg.enable_auto_size = v;
        }
        if let Some(v) = self.force_pow2 {
            cfg.force_pow2 = v;
        }
        if let Some(v) = self.flip_vertical {
            cfg.flip_vertical = v;
        }
        if let Some(v) = self.background {
            cfg.background = v;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
        cfg
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => run_layout(args),
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match std::env::var("RUST_LOG") {
            Ok(spec) => EnvFilter::new(spec),
            Err(_) => match verbose {
                0 => EnvFilter::new("info"),
                1 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            },
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    anyhow::ensure!(!paths.is_empty(), "no input images matched");
    let inputs = load_images_with_progress(&paths, show_progress)?;
    info!(count = inputs.len(), "loaded input images");

    let out = pack_images(inputs, cli.width, &cfg)?;

    out.rgba
        .save(&cli.output)
        .with_context(|| format!("write {}", cli.output.display()))?;

    let manifest_path = cli.output.with_extension("json");
    let manifest = to_json_manifest(&out.layout, cli.output.to_str(), cfg.flip_vertical);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("write {}", manifest_path.display()))?;

    info!(
        width = out.layout.width,
        height = out.layout.height,
        regions = out.layout.regions.len(),
        occupancy = format!("{:.2}%", out.occupancy() * 100.0),
        "atlas written"
    );
    Ok(())
}

fn run_layout(cli: &PackArgs) -> anyhow::Result<()> {
    let cfg = build_config(cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let paths = gather_paths(&cli.input, &cli.include, &cli.exclude)?;
    anyhow::ensure!(!paths.is_empty(), "no input images matched");

    // only the headers are read; no pixel data is decoded
    let mut sizes = Vec::with_capacity(paths.len());
    for path in &paths {
        let (w, h) = image::image_dimensions(path)
            .with_context(|| format!("measure {}", path.display()))?;
        sizes.push((path.display().to_string(), w, h));
    }

    let layout = pack_layout(sizes, cli.width, &oriented(&cfg))?;

    let manifest_path = cli.output.with_extension("json");
    let manifest = to_json_manifest(&layout, None, cfg.flip_vertical);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("write {}", manifest_path.display()))?;

    info!(
        ?manifest_path,
        width = layout.width,
        height = layout.height,
        regions = layout.regions.len(),
        "manifest written (layout-only)"
    );
    Ok(())
}

fn build_config(cli: &PackArgs) -> anyhow::Result<PackerConfig> {
    let background = match cli.bg_color.as_deref() {
        Some(channels) => parse_bg_color(channels)?,
        None => [0, 0, 0, 255],
    };
    let mut cfg = PackerConfig {
        margin: Thickness::new(cli.margin[0], cli.margin[1], cli.margin[2], cli.margin[3]),
        collapse_margin: cli.collapse_margin,
        enable_auto_size: !cli.disable_auto_size,
        force_pow2: cli.force_pow2,
        flip_vertical: !cli.disable_vertical_flip,
        background,
        parallel: cli.parallel,
    };
    if let Some(path) = &cli.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let yaml: YamlConfig = serde_yaml::from_str(&file)?;
        cfg = yaml.apply(cfg);
    }
    Ok(cfg)
}

fn parse_bg_color(channels: &[f32]) -> anyhow::Result<[u8; 4]> {
    anyhow::ensure!(
        channels.iter().all(|c| (0.0..=1.0).contains(c)),
        "--bg-color channels must be in 0..=1"
    );
    let mut color = [0u8, 0, 0, 255];
    for (slot, channel) in color.iter_mut().zip(channels) {
        *slot = (channel * 255.0) as u8;
    }
    Ok(color)
}

/// Margin as seen by the layout-only solver: under a vertical flip the user's
/// top margin faces the container floor (`pack_images` does this internally).
fn oriented(cfg: &PackerConfig) -> PackerConfig {
    let mut cfg = cfg.clone();
    if cfg.flip_vertical {
        cfg.margin = Thickness::new(
            cfg.margin.bottom,
            cfg.margin.right,
            cfg.margin.top,
            cfg.margin.left,
        );
    }
    cfg
}

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

fn allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("bad glob {pattern}"))?);
    }
    Ok(Some(builder.build()?))
}

fn gather_paths(
    inputs: &[String],
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc = build_globset(include)?;
    let exc = build_globset(exclude)?;
    let mut out: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if input.contains('*') {
            let glob = Glob::new(input)
                .with_context(|| format!("bad input pattern {input}"))?
                .compile_matcher();
            for entry in WalkDir::new(pattern_root(input))
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && glob.is_match(entry.path()) {
                    consider(entry.path(), &inc, &exc, &mut out);
                }
            }
            continue;
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            for entry in WalkDir::new(&path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() {
                    consider(entry.path(), &inc, &exc, &mut out);
                }
            }
        } else {
            consider(&path, &inc, &exc, &mut out);
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}

/// Directory to walk for a glob pattern: the literal components before the
/// first wildcard.
fn pattern_root(pattern: &str) -> PathBuf {
    let literal = &pattern[..pattern.find('*').unwrap_or(pattern.len())];
    match literal.rfind('/') {
        Some(idx) => PathBuf::from(&literal[..idx]),
        None => PathBuf::from("."),
    }
}

fn consider(path: &Path, inc: &Option<GlobSet>, exc: &Option<GlobSet>, out: &mut Vec<PathBuf>) {
    if !allowed_extension(path) {
        warn!(path = %path.display(), "file ignored: unsupported extension");
        return;
    }
    if let Some(inc) = inc {
        if !inc.is_match(path) {
            return;
        }
    }
    if let Some(exc) = exc {
        if exc.is_match(path) {
            return;
        }
    }
    out.push(path.to_path_buf());
}

fn load_images_with_progress(
    paths: &[PathBuf],
    show_progress: bool,
) -> anyhow::Result<Vec<InputImage>> {
    let pb = if show_progress {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(pb) = &pb {
            pb.set_message(path.display().to_string());
        }
        let image = ImageReader::open(path)
            .with_context(|| format!("open {}", path.display()))?
            .decode()
            .with_context(|| format!("decode {}", path.display()))?;
        inputs.push(InputImage {
            key: path.display().to_string(),
            image,
        });
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    Ok(inputs)
}
