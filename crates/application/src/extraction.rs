use swatchbook_domain::{
    CompletionOutcome, ExtractedColor, PreviewRef, UploadFile, UploadPhase, UploadState,
};
use tracing::{debug, error, info};

use crate::{ApplicationError, ExtractionJob, ExtractionPipeline, PreviewStore};

/// The two ways a file reaches the upload page.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    FilePicked(Option<UploadFile>),
    Dropped(Vec<UploadFile>),
}

impl UploadEvent {
    fn into_file(self) -> Option<UploadFile> {
        match self {
            Self::FilePicked(file) => file,
            Self::Dropped(files) => files.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started { sequence: u64 },
    /// The event carried no file; nothing changed.
    Ignored,
    /// The preview could not be created or the job could not be queued.
    Failed,
}

/// Upload page: preview lifecycle plus the extraction round trip.
pub struct PaletteExtractionFlow {
    state: UploadState,
    previews: Box<dyn PreviewStore>,
    pipeline: Box<dyn ExtractionPipeline>,
}

impl PaletteExtractionFlow {
    pub fn new(previews: Box<dyn PreviewStore>, pipeline: Box<dyn ExtractionPipeline>) -> Self {
        Self {
            state: UploadState::default(),
            previews,
            pipeline,
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.state.phase()
    }

    pub fn colors(&self) -> &[ExtractedColor] {
        self.state.colors()
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.state.preview()
    }

    pub fn live_previews(&self) -> usize {
        self.previews.live_previews()
    }

    pub fn submit(&mut self, event: UploadEvent) -> SubmitOutcome {
        let Some(file) = event.into_file() else {
            debug!("upload event without a file ignored");
            return SubmitOutcome::Ignored;
        };

        if let Some(previous) = self.state.take_preview() {
            self.previews.revoke(&previous);
        }

        let file_name = file.name.clone();
        let preview = match self.previews.create(file) {
            Ok(preview) => preview,
            Err(error) => {
                error!(%file_name, %error, "failed to create preview");
                self.state.fail();
                return SubmitOutcome::Failed;
            }
        };

        let bytes = self.previews.bytes(&preview);
        let sequence = self.state.begin(preview.clone());
        let queued = bytes.and_then(|bytes| {
            self.pipeline.submit(ExtractionJob {
                sequence,
                preview,
                bytes,
            })
        });
        if let Err(error) = queued {
            error!(%file_name, %error, "failed to start palette extraction");
            self.state.fail();
            return SubmitOutcome::Failed;
        }

        info!(%file_name, sequence, "palette extraction started");
        SubmitOutcome::Started { sequence }
    }

    /// Applies every finished extraction. Returns how many outcomes changed
    /// the page; stale ones are dropped. If the pipeline itself is gone, the
    /// active submission is failed before the error is returned.
    pub fn poll(&mut self) -> Result<usize, ApplicationError> {
        let mut applied = 0;
        loop {
            let outcome = match self.pipeline.try_receive() {
                Ok(Some(outcome)) => outcome,
                Ok(None) => break,
                Err(error) => {
                    if let Some(sequence) = self.state.active_sequence() {
                        error!(sequence, %error, "extraction pipeline lost; submission failed");
                        self.state.fail();
                    }
                    return Err(error);
                }
            };
            if let Err(error) = &outcome.result {
                if self.state.active_sequence() == Some(outcome.sequence) {
                    error!(sequence = outcome.sequence, %error, "palette extraction failed");
                }
            }
            match self.state.complete(outcome.sequence, outcome.result) {
                CompletionOutcome::Applied(phase) => {
                    debug!(sequence = outcome.sequence, ?phase, "extraction result applied");
                    applied += 1;
                }
                CompletionOutcome::Stale => {
                    debug!(sequence = outcome.sequence, "stale extraction result discarded");
                }
            }
        }
        Ok(applied)
    }

    /// "Start over": drops the preview and palette from any phase.
    pub fn reset(&mut self) {
        if let Some(preview) = self.state.reset() {
            self.previews.revoke(&preview);
        }
    }
}

impl Drop for PaletteExtractionFlow {
    fn drop(&mut self) {
        self.reset();
    }
}
