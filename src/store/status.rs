//! Per-operation lifecycle tracking.

use std::fmt;

/// Lifecycle tag of one async operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl OperationStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one operation plus the generation of its latest dispatch.
///
/// Every dispatch carries a fresh generation. A settle is applied only if it
/// belongs to the latest dispatch and that dispatch is still pending, so an
/// older request that resolves late never overwrites a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationSlot {
    status: OperationStatus,
    generation: u64,
    error: Option<String>,
}

impl OperationSlot {
    pub fn status(&self) -> OperationStatus {
        self.status
    }

    /// Generation of the most recent dispatch (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Message of the last failure, cleared on the next dispatch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a settle for `generation` would be applied.
    pub fn accepts(&self, generation: u64) -> bool {
        self.status.is_pending() && self.generation == generation
    }

    pub(crate) fn start(&mut self, generation: u64) {
        self.status = OperationStatus::Pending;
        self.generation = generation;
        self.error = None;
    }

    /// Mark succeeded. Returns false (and changes nothing) for stale settles.
    pub(crate) fn succeed(&mut self, generation: u64) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.status = OperationStatus::Succeeded;
        true
    }

    /// Mark failed. Returns false (and changes nothing) for stale settles.
    pub(crate) fn fail(&mut self, generation: u64, message: String) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.status = OperationStatus::Failed;
        self.error = Some(message);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let slot = OperationSlot::default();
        assert_eq!(slot.status(), OperationStatus::Idle);
        assert_eq!(slot.generation(), 0);
        assert!(!slot.accepts(0));
    }

    #[test]
    fn start_overwrites_terminal_state() {
        let mut slot = OperationSlot::default();
        slot.start(1);
        assert!(slot.fail(1, "boom".to_string()));
        assert_eq!(slot.error(), Some("boom"));

        slot.start(2);
        assert_eq!(slot.status(), OperationStatus::Pending);
        assert_eq!(slot.error(), None);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut slot = OperationSlot::default();
        slot.start(1);
        slot.start(2);

        assert!(!slot.succeed(1));
        assert_eq!(slot.status(), OperationStatus::Pending);

        assert!(slot.succeed(2));
        assert_eq!(slot.status(), OperationStatus::Succeeded);
    }

    #[test]
    fn settles_once() {
        let mut slot = OperationSlot::default();
        slot.start(3);
        assert!(slot.succeed(3));
        assert!(!slot.fail(3, "late".to_string()));
        assert_eq!(slot.status(), OperationStatus::Succeeded);
    }

    #[test]
    fn display_names() {
        assert_eq!(OperationStatus::Idle.to_string(), "idle");
        assert!(OperationStatus::Failed.is_settled());
        assert!(!OperationStatus::Pending.is_settled());
    }
}
