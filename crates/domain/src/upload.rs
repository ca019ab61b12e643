use crate::ExtractedColor;

/// A file handed over by the picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Handle to an uploaded file's bytes, held by a preview store until revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewRef {
    pub id: u64,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Processing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied(UploadPhase),
    Stale,
}

/// Upload page state. Each submission gets a sequence number; an extraction
/// result is only accepted for the sequence that is still active.
#[derive(Debug, Clone)]
pub struct UploadState {
    preview: Option<PreviewRef>,
    colors: Vec<ExtractedColor>,
    phase: UploadPhase,
    last_sequence: u64,
    active_sequence: Option<u64>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            preview: None,
            colors: Vec::new(),
            phase: UploadPhase::Idle,
            last_sequence: 0,
            active_sequence: None,
        }
    }
}

impl UploadState {
    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.preview.as_ref()
    }

    pub fn colors(&self) -> &[ExtractedColor] {
        &self.colors
    }

    pub fn active_sequence(&self) -> Option<u64> {
        self.active_sequence
    }

    /// Detaches the current preview so the caller can revoke it before a new
    /// one is created.
    pub fn take_preview(&mut self) -> Option<PreviewRef> {
        self.preview.take()
    }

    /// Starts a submission for `preview`. Colors of any previous image are
    /// dropped right away.
    pub fn begin(&mut self, preview: PreviewRef) -> u64 {
        self.last_sequence += 1;
        self.active_sequence = Some(self.last_sequence);
        self.preview = Some(preview);
        self.colors.clear();
        self.phase = UploadPhase::Processing;
        self.last_sequence
    }

    /// Marks the active submission as failed before any extraction result
    /// exists, e.g. when the preview could not be created.
    pub fn fail(&mut self) {
        self.active_sequence = None;
        self.colors.clear();
        self.phase = UploadPhase::Failed;
    }

    pub fn complete<E>(
        &mut self,
        sequence: u64,
        result: Result<Vec<ExtractedColor>, E>,
    ) -> CompletionOutcome {
        if self.active_sequence != Some(sequence) {
            return CompletionOutcome::Stale;
        }
        self.active_sequence = None;
        match result {
            Ok(colors) => {
                self.colors = colors;
                self.phase = UploadPhase::Ready;
            }
            Err(_) => {
                self.colors.clear();
                self.phase = UploadPhase::Failed;
            }
        }
        CompletionOutcome::Applied(self.phase)
    }

    /// Back to `Idle`. Returns the preview that must be revoked.
    pub fn reset(&mut self) -> Option<PreviewRef> {
        self.active_sequence = None;
        self.colors.clear();
        self.phase = UploadPhase::Idle;
        self.preview.take()
    }
}
