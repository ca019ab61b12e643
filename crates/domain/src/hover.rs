use crate::ColorHex;

/// What the card overlay shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwatchState {
    Idle,
    Hovered {
        index: usize,
        color: ColorHex,
    },
    Copied {
        index: usize,
        color: ColorHex,
        token: u64,
        clears_at_ms: u64,
    },
}

/// One-shot timer handed out after a successful copy. Only the timer carrying
/// the latest token may clear the confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyTimer {
    pub token: u64,
    pub due_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct HoverState {
    state: SwatchState,
    next_token: u64,
    feedback_ms: u64,
}

impl HoverState {
    pub fn new(feedback_ms: u64) -> Self {
        Self {
            state: SwatchState::Idle,
            next_token: 0,
            feedback_ms,
        }
    }

    pub fn state(&self) -> &SwatchState {
        &self.state
    }

    pub fn hovered_index(&self) -> Option<usize> {
        match &self.state {
            SwatchState::Idle => None,
            SwatchState::Hovered { index, .. } | SwatchState::Copied { index, .. } => Some(*index),
        }
    }

    pub fn hovered_color(&self) -> Option<&ColorHex> {
        match &self.state {
            SwatchState::Idle => None,
            SwatchState::Hovered { color, .. } | SwatchState::Copied { color, .. } => Some(color),
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self.state, SwatchState::Copied { .. })
    }

    /// Overlay text: the hovered hex, `Copied`, or nothing.
    pub fn label(&self) -> Option<String> {
        match &self.state {
            SwatchState::Idle => None,
            SwatchState::Hovered { color, .. } => Some(color.to_string()),
            SwatchState::Copied { .. } => Some("Copied".to_string()),
        }
    }

    pub fn enter(&mut self, index: usize, color: ColorHex) {
        self.state = SwatchState::Hovered { index, color };
    }

    pub fn leave(&mut self) {
        self.state = SwatchState::Idle;
    }

    /// Records a successful clipboard write. Returns `None` when nothing is
    /// hovered, since there is no card to show the confirmation on.
    pub fn confirm_copy(&mut self, color: ColorHex, now_ms: u64) -> Option<CopyTimer> {
        let index = self.hovered_index()?;
        self.next_token += 1;
        let timer = CopyTimer {
            token: self.next_token,
            due_at_ms: now_ms.saturating_add(self.feedback_ms),
        };
        self.state = SwatchState::Copied {
            index,
            color,
            token: timer.token,
            clears_at_ms: timer.due_at_ms,
        };
        Some(timer)
    }

    /// Clears the confirmation if `timer` is the one that set it. The hover
    /// itself survives.
    pub fn timer_elapsed(&mut self, timer: CopyTimer) -> bool {
        match &self.state {
            SwatchState::Copied {
                index,
                color,
                token,
                ..
            } if *token == timer.token => {
                self.state = SwatchState::Hovered {
                    index: *index,
                    color: color.clone(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        match &self.state {
            SwatchState::Copied {
                token,
                clears_at_ms,
                ..
            } if now_ms >= *clears_at_ms => {
                let timer = CopyTimer {
                    token: *token,
                    due_at_ms: *clears_at_ms,
                };
                self.timer_elapsed(timer)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> ColorHex {
        ColorHex::new("#ff0000")
    }

    fn green() -> ColorHex {
        ColorHex::new("#00ff00")
    }

    #[test]
    fn hover_enter_and_leave() {
        let mut hover = HoverState::new(1200);
        assert_eq!(hover.label(), None);

        hover.enter(2, red());
        assert_eq!(hover.hovered_index(), Some(2));
        assert_eq!(hover.label().as_deref(), Some("#ff0000"));

        hover.leave();
        assert_eq!(hover.state(), &SwatchState::Idle);
    }

    #[test]
    fn copy_confirmation_clears_after_its_timer() {
        let mut hover = HoverState::new(1200);
        hover.enter(0, red());
        let timer = hover.confirm_copy(red(), 100).expect("hovered");
        assert_eq!(timer.due_at_ms, 1300);
        assert_eq!(hover.label().as_deref(), Some("Copied"));

        assert!(!hover.tick(1299));
        assert!(hover.is_copied());
        assert!(hover.tick(1300));
        assert_eq!(
            hover.state(),
            &SwatchState::Hovered {
                index: 0,
                color: red()
            }
        );
    }

    #[test]
    fn stale_timer_does_not_clear_newer_copy() {
        let mut hover = HoverState::new(1200);
        hover.enter(0, red());
        let first = hover.confirm_copy(red(), 0).expect("hovered");
        hover.enter(0, green());
        let second = hover.confirm_copy(green(), 500).expect("hovered");

        assert!(!hover.timer_elapsed(first));
        assert!(!hover.tick(1200));
        assert_eq!(hover.hovered_color(), Some(&green()));
        assert!(hover.is_copied());

        assert!(hover.timer_elapsed(second));
        assert!(!hover.is_copied());
    }

    #[test]
    fn hover_enter_clears_copied_immediately() {
        let mut hover = HoverState::new(1200);
        hover.enter(1, red());
        let timer = hover.confirm_copy(red(), 0).expect("hovered");
        hover.enter(3, green());
        assert!(!hover.is_copied());
        assert!(!hover.timer_elapsed(timer));
        assert_eq!(hover.hovered_index(), Some(3));
    }

    #[test]
    fn copy_without_hover_shows_nothing() {
        let mut hover = HoverState::new(1200);
        assert_eq!(hover.confirm_copy(red(), 0), None);
        assert_eq!(hover.state(), &SwatchState::Idle);
    }

    #[test]
    fn leave_drops_pending_confirmation() {
        let mut hover = HoverState::new(1200);
        hover.enter(0, red());
        let timer = hover.confirm_copy(red(), 0).expect("hovered");
        hover.leave();
        assert!(!hover.timer_elapsed(timer));
        assert_eq!(hover.state(), &SwatchState::Idle);
    }
}
