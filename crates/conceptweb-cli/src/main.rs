use clap::{Args, Parser, Subcommand, ValueEnum};
use conceptweb::render::raster::{self, RasterError, RasterOptions};
use conceptweb::render::{DiagramConfig, LayoutOptions, svg_options_for};
use conceptweb::{NetworkVariant, build_network, load_cross_references, main_chapters};
use conceptweb_render::svg::{render_network_svg, render_timeline_svg};
use conceptweb_render::{layout_network, layout_timeline};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Data(conceptweb::Error),
    Render(conceptweb_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<conceptweb::Error> for CliError {
    fn from(value: conceptweb::Error) -> Self {
        Self::Data(value)
    }
}

impl From<conceptweb_render::Error> for CliError {
    fn from(value: conceptweb_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Parser)]
#[command(
    name = "conceptweb",
    version,
    about = "Render the concept network and cross-reference timeline diagrams"
)]
struct Cli {
    /// Layout config (YAML for .yaml/.yml, JSON otherwise); omitted keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw the ring-layout concept network
    Network {
        /// Which built-in dataset to draw
        #[arg(long, default_value = "final")]
        variant: NetworkVariant,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Draw cross-references as arcs over the page axis
    Timeline {
        /// CSV with "From Page", "To Page", "From Section" and "To Section" columns
        #[arg(long)]
        xref: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the computed layout as JSON
    Layout {
        diagram: Diagram,

        #[arg(long, default_value = "final")]
        variant: NetworkVariant,

        #[arg(long, required_if_eq("diagram", "timeline"))]
        xref: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Diagram {
    Network,
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Pdf,
    Svg,
    #[value(alias = "jpeg")]
    Jpg,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Pdf => "pdf",
            Format::Svg => "svg",
            Format::Jpg => "jpg",
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Directory the files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name without extension
    #[arg(long)]
    stem: Option<String>,

    /// Output format; repeat for several (default: png and pdf)
    #[arg(long = "format", value_enum)]
    formats: Vec<Format>,

    /// Raster resolution
    #[arg(long)]
    dpi: Option<f64>,

    /// Canvas fill as hex or a CSS color name, or `none` for transparent PNG/SVG
    #[arg(long)]
    background: Option<String>,
}

impl OutputArgs {
    fn formats(&self) -> Vec<Format> {
        if self.formats.is_empty() {
            return vec![Format::Png, Format::Pdf];
        }
        let mut out = Vec::with_capacity(self.formats.len());
        for f in &self.formats {
            if !out.contains(f) {
                out.push(*f);
            }
        }
        out
    }

    fn apply(&self, config: &mut DiagramConfig) -> Result<(), CliError> {
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(bg) = &self.background {
            config.background = bg.trim().to_string();
        }
        config.validate()?;
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<DiagramConfig, CliError> {
    match path {
        Some(path) => Ok(DiagramConfig::from_path(path)?),
        None => Ok(DiagramConfig::default()),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `svg` in every requested format and returns the paths in the order written.
fn write_outputs(
    svg: &str,
    output: &OutputArgs,
    default_stem: &str,
    config: &DiagramConfig,
) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(&output.out_dir).map_err(|source| CliError::Io {
        path: output.out_dir.clone(),
        source,
    })?;
    let stem = output.stem.as_deref().unwrap_or(default_stem);
    let raster_options = RasterOptions::for_config(config);

    let mut saved = Vec::new();
    for format in output.formats() {
        let path = output
            .out_dir
            .join(format!("{stem}.{}", format.extension()));
        let bytes = match format {
            Format::Svg => svg.as_bytes().to_vec(),
            Format::Png => raster::svg_to_png(svg, &raster_options)?,
            Format::Jpg => raster::svg_to_jpeg(svg, &raster_options)?,
            Format::Pdf => raster::svg_to_pdf(svg)?,
        };
        write_file(&path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
        saved.push(path);
    }
    Ok(saved)
}

fn print_saved(saved: &[PathBuf]) {
    for path in saved {
        println!("Saved {}", path.display());
    }
}

fn run_network(
    variant: NetworkVariant,
    output: &OutputArgs,
    mut config: DiagramConfig,
) -> Result<(), CliError> {
    output.apply(&mut config)?;
    let graph = build_network(variant);
    match variant {
        NetworkVariant::Final => println!(
            "Concepts: {}, Connections: {}",
            graph.len(),
            graph.link_count()
        ),
        NetworkVariant::Enhanced => println!("Enhanced concepts: {}", graph.len()),
    }

    let options = LayoutOptions::with_config(config);
    let layout = layout_network(&graph, &options)?;
    let svg = render_network_svg(
        &layout,
        &options.config.network,
        &svg_options_for(&options.config),
    );
    let saved = write_outputs(&svg, output, variant.output_stem(), &options.config)?;
    print_saved(&saved);
    if variant == NetworkVariant::Enhanced {
        println!("Total enhanced concepts: {}", graph.len());
        println!("Total connections: {}", graph.link_count());
    }
    Ok(())
}

fn run_timeline(
    xref: &Path,
    output: &OutputArgs,
    mut config: DiagramConfig,
) -> Result<(), CliError> {
    output.apply(&mut config)?;
    let references = load_cross_references(xref)?;
    let chapters = main_chapters();
    println!(
        "References: {}, Chapters: {}",
        references.len(),
        chapters.len()
    );

    let options = LayoutOptions::with_config(config);
    let layout = layout_timeline(&references, &chapters, &options)?;
    let svg = render_timeline_svg(
        &layout,
        &options.config.timeline,
        &svg_options_for(&options.config),
    );
    let saved = write_outputs(
        &svg,
        output,
        "final_cross_reference_timeline",
        &options.config,
    )?;
    print_saved(&saved);
    println!(
        "Forward references: {}, Backward references: {}",
        layout.forward_count, layout.backward_count
    );
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Network { variant, output } => run_network(variant, &output, config),
        Command::Timeline { xref, output } => run_timeline(&xref, &output, config),
        Command::Layout {
            diagram,
            variant,
            xref,
            pretty,
        } => {
            let options = LayoutOptions::with_config(config);
            match (diagram, xref) {
                (Diagram::Network, _) => {
                    let layout = layout_network(&build_network(variant), &options)?;
                    write_json(&layout, pretty)
                }
                (Diagram::Timeline, Some(xref)) => {
                    let references = load_cross_references(&xref)?;
                    let layout = layout_timeline(&references, &main_chapters(), &options)?;
                    write_json(&layout, pretty)
                }
                (Diagram::Timeline, None) => {
                    Err(CliError::Usage("layout timeline requires --xref <csv>"))
                }
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,conceptweb=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    // Parse errors exit with 2 before any logging is set up.
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
