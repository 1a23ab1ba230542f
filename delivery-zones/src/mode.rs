//! Editing mode state machine
//!
//! Creation and editing are mutually exclusive across the whole store: at
//! most one zone is ever active. The controller enforces the exclusion
//! purely; validation gating happens in the orchestrator before a finish
//! transition is applied.

use crate::store::ZoneId;

/// Which zone, if any, is currently being created or edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// A draft zone is being drawn; by construction it is the single
    /// uncompleted zone at the tail of the store
    Creating,
    /// An existing zone is being reshaped, matched by id
    Editing(ZoneId),
}

impl EditorMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, Self::Creating)
    }

    pub fn editing_id(&self) -> Option<ZoneId> {
        match self {
            Self::Editing(id) => Some(*id),
            _ => None,
        }
    }
}

/// Session-scoped mode controller; starts idle, never terminates
#[derive(Debug, Default)]
pub struct ModeController {
    mode: EditorMode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_creating(&self) -> bool {
        self.mode.is_creating()
    }

    pub fn editing_id(&self) -> Option<ZoneId> {
        self.mode.editing_id()
    }

    /// Enter creation mode; rejected while any zone is being edited or a
    /// creation is already running.
    pub fn begin_creating(&mut self) -> bool {
        if !self.mode.is_idle() {
            tracing::debug!(mode = ?self.mode, "creation request ignored, another zone is active");
            return false;
        }
        self.mode = EditorMode::Creating;
        true
    }

    /// Leave creation mode; the caller has already validated the draft
    pub fn finish_creating(&mut self) {
        if self.mode.is_creating() {
            self.mode = EditorMode::Idle;
        }
    }

    /// Enter edit mode for a zone; rejected while creating or while any
    /// other zone is being edited.
    pub fn begin_editing(&mut self, id: ZoneId) -> bool {
        if !self.mode.is_idle() {
            tracing::debug!(mode = ?self.mode, "edit request ignored, another zone is active");
            return false;
        }
        self.mode = EditorMode::Editing(id);
        true
    }

    /// Leave edit mode; the caller has already validated the zone
    pub fn finish_editing(&mut self) {
        if self.mode.editing_id().is_some() {
            self.mode = EditorMode::Idle;
        }
    }

    /// React to a zone disappearing from the store (explicit delete or the
    /// point-count rule). Returns true when this cleared a stale edit.
    pub fn zone_removed(&mut self, id: ZoneId) -> bool {
        if self.mode.editing_id() == Some(id) {
            self.mode = EditorMode::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_id() -> ZoneId {
        ZoneId::allocate()
    }

    #[test]
    fn test_creating_excludes_further_activation() {
        let mut controller = ModeController::new();
        assert!(controller.begin_creating());
        assert!(!controller.begin_creating());
        assert!(!controller.begin_editing(zone_id()));
        assert!(controller.is_creating());

        controller.finish_creating();
        assert!(controller.mode().is_idle());
    }

    #[test]
    fn test_editing_excludes_creating_and_other_edits() {
        let mut controller = ModeController::new();
        let id = zone_id();
        assert!(controller.begin_editing(id));
        assert!(!controller.begin_creating());
        assert!(!controller.begin_editing(zone_id()));
        assert_eq!(controller.editing_id(), Some(id));

        controller.finish_editing();
        assert!(controller.mode().is_idle());
    }

    #[test]
    fn test_zone_removed_clears_matching_edit_only() {
        let mut controller = ModeController::new();
        let id = zone_id();
        controller.begin_editing(id);

        assert!(!controller.zone_removed(zone_id()));
        assert_eq!(controller.editing_id(), Some(id));

        assert!(controller.zone_removed(id));
        assert!(controller.mode().is_idle());
    }
}
