//! Initialization guard.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Idle,
    /// Waiting for the document to finish parsing.
    AwaitingDom,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    /// Wire every effect now.
    Wire,
    /// Wire once the document is ready.
    Defer,
    /// Already started or starting.
    Skip,
}

impl Lifecycle {
    pub fn request_start(self, dom_ready: bool) -> (Self, StartAction) {
        match self {
            Lifecycle::Idle if dom_ready => (Lifecycle::Active, StartAction::Wire),
            Lifecycle::Idle => (Lifecycle::AwaitingDom, StartAction::Defer),
            other => (other, StartAction::Skip),
        }
    }

    /// The deferred ready signal. Only wires if nothing tore us down meanwhile.
    pub fn dom_ready(self) -> (Self, StartAction) {
        match self {
            Lifecycle::AwaitingDom => (Lifecycle::Active, StartAction::Wire),
            other => (other, StartAction::Skip),
        }
    }

    pub fn is_started(self) -> bool {
        self != Lifecycle::Idle
    }
}
