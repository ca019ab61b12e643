mod config;
mod logging;
mod session;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use config::AppConfig;
use swatchbook_adapters::{
    present_chips, present_entry_row, present_extracted_color, present_index_report,
    ArboardClipboard, BackgroundExtractionPipeline, ImageCrateExtractor, InMemoryPreviewStore,
    JsonCatalogFile, WalkdirFileScanner,
};
use swatchbook_application::{
    ApplicationService, CopyOutcome, IndexFolderCommand, LoadCatalogCommand,
    PaletteExtractionFlow, SubmitOutcome, SwatchInteraction, UploadEvent,
};
use swatchbook_domain::{CatalogFilter, ColorHex, UploadFile, UploadPhase};

#[derive(Debug, Parser)]
#[command(
    name = "swatchbook",
    about = "Browse a color-tagged image gallery and extract palettes from images"
)]
struct Cli {
    /// Gallery data file.
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// How long the "Copied" confirmation stays up, in milliseconds.
    #[arg(long, global = true)]
    copy_feedback_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List gallery images, optionally only those with a given primary color.
    List {
        #[arg(long)]
        color: Option<String>,
    },
    /// Show the color chips of the gallery.
    Chips,
    /// Copy a hex code to the clipboard.
    Copy { color: String },
    /// Extract the palette of an image. With several files, each one
    /// supersedes the previous and only the last palette is printed.
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Build a gallery data file from a folder of images.
    Index {
        folder: String,
        #[arg(long)]
        output: Option<String>,
    },
    /// Interactive shell over stdin.
    Session,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();
    let config = apply_overrides(AppConfig::default(), &cli);

    match run_command(cli.command.unwrap_or(Command::Session), &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = catalog.clone();
    }
    if let Some(feedback) = cli.copy_feedback_ms {
        config.copy_feedback_ms = feedback;
    }
    config
}

fn build_application_service(config: &AppConfig, output: Option<&str>) -> ApplicationService {
    let source = JsonCatalogFile::new(&config.catalog_path);
    let sink = JsonCatalogFile::new(output.unwrap_or(config.catalog_path.as_str()));
    ApplicationService::new(
        Box::new(source),
        Box::new(sink),
        Box::new(WalkdirFileScanner),
        Box::new(ImageCrateExtractor::new(config.extraction)),
    )
}

fn build_extraction_flow(config: &AppConfig) -> PaletteExtractionFlow {
    let extractor = Arc::new(ImageCrateExtractor::new(config.extraction));
    PaletteExtractionFlow::new(
        Box::new(InMemoryPreviewStore::new()),
        Box::new(BackgroundExtractionPipeline::new(extractor)),
    )
}

/// The process exits right after a `copy`, so the write must be handed off.
fn copy_clipboard() -> ArboardClipboard {
    ArboardClipboard::one_shot()
}

fn parse_color(value: &str) -> Result<ColorHex, CommandError> {
    ColorHex::parse(value).map_err(|error| CommandError::Usage(error.to_string()))
}

fn load_filter(config: &AppConfig) -> Result<CatalogFilter, CommandError> {
    let catalog = build_application_service(config, None)
        .load_catalog(LoadCatalogCommand)
        .map_err(|error| CommandError::Runtime(format!("load catalog failed: {error}")))?;
    Ok(CatalogFilter::new(catalog))
}

fn run_command(command: Command, config: &AppConfig) -> Result<(), CommandError> {
    match command {
        Command::List { color } => {
            let mut filter = load_filter(config)?;
            if let Some(color) = color {
                filter.select(parse_color(&color)?);
            }
            let visible = filter.visible();
            if visible.is_empty() {
                println!("no images match");
                return Ok(());
            }
            for (index, entry) in visible.iter().enumerate() {
                println!("{}", present_entry_row(index, entry));
            }
            Ok(())
        }
        Command::Chips => {
            let filter = load_filter(config)?;
            println!("{}", present_chips(&filter.chips(), None));
            Ok(())
        }
        Command::Copy { color } => {
            let color = parse_color(&color)?;
            let mut swatches =
                SwatchInteraction::new(Box::new(copy_clipboard()), config.copy_feedback_ms);
            match swatches.on_copy_requested(&color, 0) {
                CopyOutcome::Confirmed(_) | CopyOutcome::Written => {
                    println!("copied {color}");
                    Ok(())
                }
                CopyOutcome::Failed => Err(CommandError::Runtime(format!(
                    "unable to copy {color} to clipboard"
                ))),
            }
        }
        Command::Extract { files, json } => {
            let mut flow = build_extraction_flow(config);
            for path in files {
                let bytes = fs::read(&path).map_err(|error| {
                    CommandError::Runtime(format!("cannot read {}: {error}", path.display()))
                })?;
                let name = path.display().to_string();
                let file = UploadFile { name, bytes };
                let outcome = flow.submit(UploadEvent::FilePicked(Some(file)));
                if outcome == SubmitOutcome::Failed {
                    return Err(CommandError::Runtime(format!(
                        "could not start extraction for {}",
                        path.display()
                    )));
                }
            }

            wait_until_settled(&mut flow, config)?;
            match flow.phase() {
                UploadPhase::Ready if json => {
                    let rendered = serde_json::to_string_pretty(flow.colors())
                        .map_err(|error| CommandError::Runtime(error.to_string()))?;
                    println!("{rendered}");
                    Ok(())
                }
                UploadPhase::Ready => {
                    for color in flow.colors() {
                        println!("{}", present_extracted_color(color));
                    }
                    Ok(())
                }
                UploadPhase::Failed => Err(CommandError::Runtime(
                    "no palette: extraction failed".to_string(),
                )),
                UploadPhase::Idle | UploadPhase::Processing => Err(CommandError::Runtime(
                    "no palette: extraction timed out".to_string(),
                )),
            }
        }
        Command::Index { folder, output } => {
            let service = build_application_service(config, output.as_deref());
            let report = service
                .index_folder(IndexFolderCommand { folder })
                .map_err(|error| CommandError::Runtime(format!("index failed: {error}")))?;
            println!("{}", present_index_report(&report));
            Ok(())
        }
        Command::Session => {
            let filter = load_filter(config)?;
            let swatches =
                SwatchInteraction::new(Box::new(ArboardClipboard::new()), config.copy_feedback_ms);
            let session = session::Session::new(filter, swatches, build_extraction_flow(config));
            let stdin = io::stdin();
            session::run(session, stdin.lock(), io::stdout())
                .map_err(|error| CommandError::Runtime(format!("session failed: {error}")))
        }
    }
}

fn wait_until_settled(
    flow: &mut PaletteExtractionFlow,
    config: &AppConfig,
) -> Result<(), CommandError> {
    let deadline = Instant::now() + Duration::from_millis(config.settle_timeout_ms);
    while flow.phase() == UploadPhase::Processing && Instant::now() < deadline {
        flow.poll()
            .map_err(|error| CommandError::Runtime(format!("extraction failed: {error}")))?;
        if flow.phase() == UploadPhase::Processing {
            thread::sleep(Duration::from_millis(config.poll_interval_ms));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use swatchbook_adapters::ClipboardHandoff;

    use super::*;

    #[test]
    fn parse_list_with_color() {
        let cli = Cli::try_parse_from(["swatchbook", "list", "--color", "#ff0000"])
            .expect("list should parse");
        assert!(matches!(
            cli.command,
            Some(Command::List { color: Some(ref color) }) if color == "#ff0000"
        ));
    }

    #[test]
    fn no_subcommand_means_session() {
        let cli = Cli::try_parse_from(["swatchbook"]).expect("bare invocation should parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn extract_requires_a_file() {
        assert!(Cli::try_parse_from(["swatchbook", "extract"]).is_err());
    }

    #[test]
    fn global_flags_override_config() {
        let cli = Cli::try_parse_from([
            "swatchbook",
            "chips",
            "--catalog",
            "other.json",
            "--copy-feedback-ms",
            "500",
        ])
        .expect("chips should parse");
        let config = apply_overrides(AppConfig::default(), &cli);
        assert_eq!(config.catalog_path, "other.json");
        assert_eq!(config.copy_feedback_ms, 500);
    }

    #[test]
    fn copy_command_hands_clipboard_off_before_exit() {
        assert_eq!(copy_clipboard().handoff(), ClipboardHandoff::WaitForOwner);
    }

    #[test]
    fn invalid_color_is_a_usage_error() {
        assert!(matches!(
            parse_color("red"),
            Err(CommandError::Usage(_))
        ));
    }
}
