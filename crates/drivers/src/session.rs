use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use swatchbook_adapters::{
    present_chips, present_entry_row, present_extracted_color, present_swatch_state,
    present_upload_phase,
};
use swatchbook_application::{
    CopyOutcome, PaletteExtractionFlow, SubmitOutcome, SwatchInteraction, UploadEvent,
};
use swatchbook_domain::{CatalogFilter, ColorHex, UploadFile};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    List,
    Chips,
    Select(ColorHex),
    ShowAll,
    Hover { card: usize, swatch: usize },
    Leave,
    Click,
    Upload(PathBuf),
    Drop(Vec<PathBuf>),
    Poll,
    Reset,
    Status,
    Help,
    Quit,
}

pub fn parse_event(line: &str) -> Result<SessionEvent, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    match (command, rest.as_slice()) {
        ("list", []) => Ok(SessionEvent::List),
        ("chips", []) => Ok(SessionEvent::Chips),
        ("all", []) => Ok(SessionEvent::ShowAll),
        ("select", [color]) => ColorHex::parse(color)
            .map(SessionEvent::Select)
            .map_err(|error| error.to_string()),
        ("hover", [card]) => Ok(SessionEvent::Hover {
            card: parse_index(card)?,
            swatch: 0,
        }),
        ("hover", [card, swatch]) => Ok(SessionEvent::Hover {
            card: parse_index(card)?,
            swatch: parse_index(swatch)?,
        }),
        ("leave", []) => Ok(SessionEvent::Leave),
        ("click", []) => Ok(SessionEvent::Click),
        ("upload", [path]) => Ok(SessionEvent::Upload(PathBuf::from(path))),
        ("drop", paths) => Ok(SessionEvent::Drop(paths.iter().map(PathBuf::from).collect())),
        ("poll", []) => Ok(SessionEvent::Poll),
        ("reset", []) => Ok(SessionEvent::Reset),
        ("status", []) => Ok(SessionEvent::Status),
        ("help", []) => Ok(SessionEvent::Help),
        ("quit" | "exit", []) => Ok(SessionEvent::Quit),
        (other, _) => Err(format!("unknown or malformed command: {other}")),
    }
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("invalid index: {value}"))
}

/// Both pages of the gallery driven by text commands.
pub struct Session {
    filter: CatalogFilter,
    swatches: SwatchInteraction,
    upload: PaletteExtractionFlow,
    started: Instant,
}

impl Session {
    pub fn new(
        filter: CatalogFilter,
        swatches: SwatchInteraction,
        upload: PaletteExtractionFlow,
    ) -> Self {
        Self {
            filter,
            swatches,
            upload,
            started: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Applies one event and returns the lines to show. Pending copy timers and
    /// finished extractions are settled first.
    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<String> {
        let now_ms = self.now_ms();
        self.swatches.tick(now_ms);
        if let Err(error) = self.upload.poll() {
            warn!(%error, "failed to poll extraction results");
        }

        match event {
            SessionEvent::List => {
                let visible = self.filter.visible();
                if visible.is_empty() {
                    return vec!["no images match".to_string()];
                }
                visible
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| present_entry_row(index, entry))
                    .collect()
            }
            SessionEvent::Chips => {
                vec![present_chips(&self.filter.chips(), self.filter.selected())]
            }
            SessionEvent::Select(color) => {
                self.swatches.on_hover_leave();
                self.filter.select(color);
                vec![format!("{} images", self.filter.visible().len())]
            }
            SessionEvent::ShowAll => {
                self.swatches.on_hover_leave();
                self.filter.show_all();
                vec![format!("{} images", self.filter.visible().len())]
            }
            SessionEvent::Hover { card, swatch } => {
                let color = {
                    let visible = self.filter.visible();
                    let Some(entry) = visible.get(card) else {
                        return vec![format!("no card {card}")];
                    };
                    let Some(colors) = &entry.colors else {
                        return vec![format!("card {card} has no swatches")];
                    };
                    match colors.swatch(swatch) {
                        Ok(color) => color.clone(),
                        Err(error) => return vec![error.to_string()],
                    }
                };
                self.swatches.on_hover_enter(card, color);
                vec![present_swatch_state(self.swatches.state())]
            }
            SessionEvent::Leave => {
                self.swatches.on_hover_leave();
                vec![present_swatch_state(self.swatches.state())]
            }
            SessionEvent::Click => {
                let Some(color) = self.swatches.hovered_color().cloned() else {
                    return vec!["nothing hovered".to_string()];
                };
                match self.swatches.on_copy_requested(&color, now_ms) {
                    CopyOutcome::Confirmed(_) | CopyOutcome::Written => {
                        vec![present_swatch_state(self.swatches.state())]
                    }
                    CopyOutcome::Failed => vec!["copy failed".to_string()],
                }
            }
            SessionEvent::Upload(path) => {
                let event = UploadEvent::FilePicked(read_upload(&path));
                self.submit(event)
            }
            SessionEvent::Drop(paths) => {
                let files = paths.iter().filter_map(|path| read_upload(path)).collect();
                self.submit(UploadEvent::Dropped(files))
            }
            SessionEvent::Poll | SessionEvent::Status => self.upload_status(),
            SessionEvent::Reset => {
                self.upload.reset();
                self.upload_status()
            }
            SessionEvent::Help => help_lines(),
            SessionEvent::Quit => Vec::new(),
        }
    }

    fn submit(&mut self, event: UploadEvent) -> Vec<String> {
        match self.upload.submit(event) {
            SubmitOutcome::Started { sequence } => vec![format!("extracting (#{sequence})")],
            SubmitOutcome::Ignored => vec!["no file".to_string()],
            SubmitOutcome::Failed => self.upload_status(),
        }
    }

    fn upload_status(&self) -> Vec<String> {
        let mut lines = vec![present_upload_phase(self.upload.phase(), self.upload.colors())];
        if let Some(preview) = self.upload.preview() {
            lines.push(format!("preview: {}", preview.file_name));
        }
        lines.extend(self.upload.colors().iter().map(present_extracted_color));
        lines
    }
}

fn read_upload(path: &Path) -> Option<UploadFile> {
    match fs::read(path) {
        Ok(bytes) => Some(UploadFile {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            bytes,
        }),
        Err(error) => {
            warn!(path = %path.display(), %error, "cannot read upload");
            None
        }
    }
}

fn help_lines() -> Vec<String> {
    [
        "list                    show visible images",
        "chips                   show color chips",
        "select <#rrggbb> | all  filter by primary color",
        "hover <card> [swatch]   hover a swatch (0 primary, 1 secondary, 2 tertiary)",
        "leave | click           leave the card or copy the hovered color",
        "upload <file>           pick a file to extract its palette",
        "drop <file>...          drop files (the first one is used)",
        "poll | status | reset   upload page state, reset starts over",
        "quit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

pub fn run(mut session: Session, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match parse_event(&line) {
            Ok(event) => event,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        if event == SessionEvent::Quit {
            break;
        }
        for shown in session.dispatch(event) {
            writeln!(output, "{shown}")?;
        }
        output.flush()?;
    }
    Ok(())
}
