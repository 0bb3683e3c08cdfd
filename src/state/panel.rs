//! Logical panel selection inside the overlay surface.
//!
//! Instead of stacking native dialog surfaces, the modals tab mounts one
//! physical sheet and projects exactly one body into it, keyed by
//! `PanelState`. The renderer matches exhaustively on the enum, so more than
//! one body can never be mounted at once.

/// Specifying which logical panel body the overlay surface projects.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PanelState {
    /// Root body: the demo item list.
    None,
    /// First secondary panel: details for the selected item.
    ItemDetail,
    /// Second secondary panel: the confirmation step.
    Confirm,
}

/// Tracks the active panel and mediates forward/back/cancel navigation.
///
/// Pure transition logic over a closed enum; transitions invalid from the
/// current state are silent no-ops.
#[derive(Debug, Default)]
pub struct PanelStack {
    active: PanelState,
}

impl Default for PanelState {
    fn default() -> Self {
        PanelState::None
    }
}

impl PanelStack {
    pub fn active(&self) -> PanelState {
        self.active
    }

    pub fn is_resting(&self) -> bool {
        self.active == PanelState::None
    }

    /// Root body selection: project the item detail panel.
    ///
    pub fn select_item(&mut self) {
        if self.active == PanelState::None {
            self.active = PanelState::ItemDetail;
        }
    }

    /// Advance from the item detail panel to the confirmation panel.
    ///
    pub fn open_next(&mut self) {
        if self.active == PanelState::ItemDetail {
            self.active = PanelState::Confirm;
        }
    }

    /// Step back from the confirmation panel without touching the overlay.
    ///
    pub fn go_back(&mut self) {
        if self.active == PanelState::Confirm {
            self.active = PanelState::ItemDetail;
        }
    }

    /// Pop one level toward the root body. Returns true if a panel was
    /// popped, false when already resting (the caller then falls through to
    /// the overlay's close).
    ///
    pub fn pop(&mut self) -> bool {
        match self.active {
            PanelState::None => false,
            PanelState::ItemDetail => {
                self.active = PanelState::None;
                true
            }
            PanelState::Confirm => {
                self.active = PanelState::ItemDetail;
                true
            }
        }
    }

    /// Jump straight back to the root body, skipping intermediate panels.
    /// Used by confirm-and-close-all and by the overlay close reset.
    ///
    pub fn clear(&mut self) {
        self.active = PanelState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_navigation() {
        let mut panels = PanelStack::default();
        assert_eq!(panels.active(), PanelState::None);

        panels.select_item();
        assert_eq!(panels.active(), PanelState::ItemDetail);

        panels.open_next();
        assert_eq!(panels.active(), PanelState::Confirm);
    }

    #[test]
    fn test_go_back_returns_to_detail() {
        let mut panels = PanelStack::default();
        panels.select_item();
        panels.open_next();

        panels.go_back();
        assert_eq!(panels.active(), PanelState::ItemDetail);

        // Not valid from the detail panel.
        panels.go_back();
        assert_eq!(panels.active(), PanelState::ItemDetail);
    }

    #[test]
    fn test_pop_steps_one_level() {
        let mut panels = PanelStack::default();
        panels.select_item();
        panels.open_next();

        assert!(panels.pop());
        assert_eq!(panels.active(), PanelState::ItemDetail);
        assert!(panels.pop());
        assert_eq!(panels.active(), PanelState::None);
        assert!(!panels.pop());
        assert_eq!(panels.active(), PanelState::None);
    }

    #[test]
    fn test_clear_skips_intermediate_panels() {
        let mut panels = PanelStack::default();
        panels.select_item();
        panels.open_next();

        panels.clear();
        assert_eq!(panels.active(), PanelState::None);
        assert!(panels.is_resting());
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut panels = PanelStack::default();
        panels.open_next();
        assert_eq!(panels.active(), PanelState::None);

        panels.select_item();
        panels.select_item();
        assert_eq!(panels.active(), PanelState::ItemDetail);

        panels.open_next();
        panels.open_next();
        assert_eq!(panels.active(), PanelState::Confirm);
    }
}
