use std::sync::Mutex;

use swatchbook_application::{ApplicationError, Clipboard};

/// How long the copied text has to outlive the process that wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardHandoff {
    /// The handle is kept open and serves the selection while the process
    /// runs. Fits the interactive session.
    Retain,
    /// On Linux, each write blocks until a clipboard manager or another
    /// client has taken the selection, so the text survives process exit.
    /// Fits one-shot commands.
    WaitForOwner,
}

/// System clipboard. The handle is opened on first use and kept alive.
pub struct ArboardClipboard {
    handoff: ClipboardHandoff,
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::with_handoff(ClipboardHandoff::Retain)
    }

    pub fn one_shot() -> Self {
        Self::with_handoff(ClipboardHandoff::WaitForOwner)
    }

    pub fn with_handoff(handoff: ClipboardHandoff) -> Self {
        Self {
            handoff,
            handle: Mutex::new(None),
        }
    }

    pub fn handoff(&self) -> ClipboardHandoff {
        self.handoff
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ApplicationError> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|_| ApplicationError::Clipboard("clipboard lock poisoned".to_string()))?;

        if handle.is_none() {
            let opened = arboard::Clipboard::new()
                .map_err(|error| ApplicationError::Clipboard(error.to_string()))?;
            *handle = Some(opened);
        }

        match handle.as_mut() {
            Some(clipboard) => set_text(clipboard, text, self.handoff)
                .map_err(|error| ApplicationError::Clipboard(error.to_string())),
            None => Err(ApplicationError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

#[cfg(target_os = "linux")]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    handoff: ClipboardHandoff,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match handoff {
        ClipboardHandoff::Retain => clipboard.set_text(text),
        ClipboardHandoff::WaitForOwner => clipboard.set().wait().text(text),
    }
}

// Elsewhere the OS keeps the clipboard contents after the writer exits.
#[cfg(not(target_os = "linux"))]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    _handoff: ClipboardHandoff,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_and_one_shot_pick_different_handoffs() {
        assert_eq!(ArboardClipboard::new().handoff(), ClipboardHandoff::Retain);
        assert_eq!(ArboardClipboard::default().handoff(), ClipboardHandoff::Retain);
        assert_eq!(ArboardClipboard::one_shot().handoff(), ClipboardHandoff::WaitForOwner);
    }
}
