use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use kmlview::app::{Command, Notice, Viewer};
use kmlview::config::ViewerConfig;
use kmlview::error::{Error, Result};
use kmlview::report::JsonReport;
use kmlview::{read_kml, report, svg};

#[derive(Parser)]
#[command(about = "Summarize a KML file and export it as GeoJSON")]
struct Cli {
    path: PathBuf,
    /// Feature count per geometry type
    #[arg(long)]
    summary: bool,
    /// Line length in km per geometry type
    #[arg(long)]
    detail: bool,
    /// Print bounds, camera and tables as one JSON document
    #[arg(long)]
    json: bool,
    #[arg(long, value_name = "OUT")]
    geojson: Option<PathBuf>,
    /// SVG preview of the loaded features
    #[arg(long, value_name = "OUT")]
    svg: Option<PathBuf>,
    #[arg(long, default_value_t = ViewerConfig::default().padding_px)]
    padding: u32,
    #[arg(long, default_value_t = ViewerConfig::default().width_px)]
    width: u32,
    #[arg(long, default_value_t = ViewerConfig::default().height_px)]
    height: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = ViewerConfig {
        padding_px: args.padding,
        width_px: args.width,
        height_px: args.height,
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config);

    let ticket = viewer.begin_load();
    let contents = read_kml::read_file(&args.path)?;
    viewer.dispatch(Command::LoadFile { ticket, contents });
    if let Some(Notice::MalformedDocument(reason)) = &viewer.state().notice {
        return Err(Error::malformed(reason.clone()));
    }

    let state = viewer.state();
    let config = viewer.config();
    let Some(collection) = state.collection.as_ref() else {
        return Ok(());
    };
    let camera = viewer.camera();
    let bounds = state.viewport.bounds().copied();

    if let Some(out) = &args.geojson {
        write(out, &collection.to_geojson().to_string())?;
    }
    if let Some(out) = &args.svg {
        match svg::render_preview(collection, state.viewport.bounds(), config)? {
            Some(doc) => write(out, &doc)?,
            None => log::warn!("nothing to draw, {} not written", out.display()),
        }
    }

    if args.summary {
        viewer.dispatch(Command::ComputeSummary);
    }
    if args.detail {
        viewer.dispatch(Command::ComputeDetail);
    }
    let state = viewer.state();
    if args.json {
        let json = JsonReport {
            bounds: bounds.as_ref(),
            camera,
            summary: state.summary.as_ref(),
            detail: state.detail.as_ref(),
        };
        println!("{}", json.render()?);
        return Ok(());
    }
    if let Some(summary) = &state.summary {
        print!("{}", report::summary_table(summary));
    }
    if let Some(detail) = &state.detail {
        print!("{}", report::detail_table(detail));
    }
    Ok(())
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}
