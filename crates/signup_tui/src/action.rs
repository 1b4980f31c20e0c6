use strum::Display;

/// Outcome of a background submission, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted { status: u16 },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupResult {
    RegionChosen(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    /// Something changed and the screen should be redrawn.
    Update,
    Submit,
    SubmissionFinished(SubmissionOutcome),
    ClearForm,
    OpenRegionPicker { selected: Option<usize> },
    ClosePopup,
    PopupResult(PopupResult),
    Notify(String),
}
