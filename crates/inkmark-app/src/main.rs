use anyhow::Context;
use clap::{Parser, ValueEnum};
use inkmark_app::Session;
use inkmark_core::{CanvasModel, CreateMode, EditorConfig, FileStorage, PointerEvent, Storage, StorageError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Arrow,
    Rect,
    Pen,
}

impl From<Mode> for CreateMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Arrow => CreateMode::Arrow,
            Mode::Rect => CreateMode::Rect,
            Mode::Pen => CreateMode::Pen,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "inkmark")]
#[command(version, about = "Edit arrow, rectangle and pen annotations from recorded gestures")]
struct Cli {
    /// Document JSON to open (starts empty when omitted)
    document: Option<PathBuf>,

    /// Editor config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON array of pointer events to replay
    #[arg(long, short = 's', value_name = "PATH")]
    script: Option<PathBuf>,

    /// Shape created by drags on empty canvas
    #[arg(long, short = 'm', value_enum, default_value = "arrow")]
    mode: Mode,

    /// Write the rendered canvas as SVG
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Write the resulting document JSON (stdout when no other output is requested)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Open and save the document in the local document store under this id
    #[arg(long, value_name = "ID", conflicts_with = "document")]
    store: Option<String>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let config = match path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::load_or_default()?,
    };
    Ok(config)
}

fn load_document(cli: &Cli) -> anyhow::Result<CanvasModel> {
    if let Some(path) = &cli.document {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let model = CanvasModel::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Opened {} ({} shapes)", path.display(), model.len());
        return Ok(model);
    }
    if let Some(id) = &cli.store {
        let storage = FileStorage::default_location()?;
        return match pollster::block_on(storage.load(id)) {
            Ok(model) => Ok(model),
            Err(StorageError::NotFound(_)) => {
                log::info!("No stored document {}, starting empty", id);
                Ok(CanvasModel::new())
            }
            Err(err) => Err(err.into()),
        };
    }
    Ok(CanvasModel::new())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let model = load_document(&cli)?;
    let mut session = Session::new(config, model, cli.mode.into());

    if let Some(script) = &cli.script {
        let json = std::fs::read_to_string(script).with_context(|| format!("reading {}", script.display()))?;
        let events = PointerEvent::parse_script(&json).with_context(|| format!("parsing {}", script.display()))?;
        let updates = session.replay(&events);
        log::info!("Replayed {} events, {} document updates", events.len(), updates);
    }

    if let Some(path) = &cli.svg {
        session.write_svg(path)?;
    }

    if let Some(id) = &cli.store {
        let storage = FileStorage::default_location()?;
        pollster::block_on(storage.save(id, session.model()))?;
    }

    let json = session.model().to_json()?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote document to {}", path.display());
        }
        None if cli.svg.is_none() && cli.store.is_none() => println!("{}", json),
        None => {}
    }

    Ok(())
}
