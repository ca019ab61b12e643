use swatchbook_domain::{ColorHex, CopyTimer, HoverState, SwatchState};
use tracing::{info, warn};

use crate::Clipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Written and confirmed on the hovered card until the timer fires.
    Confirmed(CopyTimer),
    /// Written, but no card is hovered to show the confirmation on.
    Written,
    /// The clipboard rejected the write; state is unchanged.
    Failed,
}

/// Hover overlay and copy-to-clipboard behavior of the catalog page.
pub struct SwatchInteraction {
    hover: HoverState,
    clipboard: Box<dyn Clipboard>,
}

impl SwatchInteraction {
    pub fn new(clipboard: Box<dyn Clipboard>, feedback_ms: u64) -> Self {
        Self {
            hover: HoverState::new(feedback_ms),
            clipboard,
        }
    }

    pub fn state(&self) -> &SwatchState {
        self.hover.state()
    }

    pub fn label(&self) -> Option<String> {
        self.hover.label()
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hover.hovered_index()
    }

    pub fn hovered_color(&self) -> Option<&ColorHex> {
        self.hover.hovered_color()
    }

    pub fn on_hover_enter(&mut self, index: usize, color: ColorHex) {
        self.hover.enter(index, color);
    }

    pub fn on_hover_leave(&mut self) {
        self.hover.leave();
    }

    pub fn on_copy_requested(&mut self, color: &ColorHex, now_ms: u64) -> CopyOutcome {
        if let Err(error) = self.clipboard.write_text(color.as_str()) {
            warn!(%color, %error, "unable to copy to clipboard");
            return CopyOutcome::Failed;
        }

        info!(%color, "color copied to clipboard");
        match self.hover.confirm_copy(color.clone(), now_ms) {
            Some(timer) => CopyOutcome::Confirmed(timer),
            None => CopyOutcome::Written,
        }
    }

    pub fn on_timer_elapsed(&mut self, timer: CopyTimer) -> bool {
        self.hover.timer_elapsed(timer)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.hover.tick(now_ms)
    }
}
