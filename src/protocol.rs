// Channel message types shared between the TUI, the app orchestrator, and
// spawned lookup tasks.
//
// Three channels connect the tasks:
// - UserCommand: TUI -> app (key presses translated into intents)
// - FetchEvent:  lookup tasks -> app (one completion report per lookup)
// - UiUpdate:    app -> TUI (state changes to mirror into the ViewState)

use crate::models::AnalysisResult;

// ---------------------------------------------------------------------------
// Lookup task identity
// ---------------------------------------------------------------------------

/// Which lookup flow a fetch belongs to.
///
/// The primary search and the competitor add are independent flows that
/// happen to share one backend operation; the kind routes a completion
/// report to the right flow's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// The main search that replaces the whole analysis result.
    Primary,
    /// A secondary lookup whose result is reduced to one competitor row.
    Competitor,
}

/// Lifecycle of one asynchronous lookup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

// ---------------------------------------------------------------------------
// FetchEvent
// ---------------------------------------------------------------------------

/// Completion report from a spawned lookup task.
///
/// Every event carries the generation number assigned when the task was
/// spawned. The app compares it against the latest issued generation for
/// the flow and discards events from superseded requests, so only the most
/// recently started lookup ever mutates state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Completed {
        kind: FetchKind,
        generation: u64,
        result: Box<AnalysisResult>,
    },
    Failed {
        kind: FetchKind,
        generation: u64,
        /// The backend's `detail` message when the error response carried
        /// one. `None` for transport errors and detail-less error bodies;
        /// the app substitutes the flow's fixed fallback string.
        detail: Option<String>,
    },
}

impl FetchEvent {
    /// The flow this event belongs to.
    pub fn kind(&self) -> FetchKind {
        match self {
            FetchEvent::Completed { kind, .. } => *kind,
            FetchEvent::Failed { kind, .. } => *kind,
        }
    }

    /// The generation the originating task was spawned with.
    pub fn generation(&self) -> u64 {
        match self {
            FetchEvent::Completed { generation, .. } => *generation,
            FetchEvent::Failed { generation, .. } => *generation,
        }
    }
}

// ---------------------------------------------------------------------------
// UserCommand
// ---------------------------------------------------------------------------

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Run the primary search for the given identifier (URL, name, or
    /// platform ID). Empty identifiers are a silent no-op.
    Analyze(String),
    /// Open the competitor draft form (clears the previous draft error).
    OpenCompetitorForm,
    /// Close the competitor draft form without submitting.
    CloseCompetitorForm,
    /// Submit a competitor identifier for lookup.
    AddCompetitor(String),
    Quit,
}

// ---------------------------------------------------------------------------
// UiUpdate
// ---------------------------------------------------------------------------

/// State changes pushed from the app orchestrator to the TUI render loop.
///
/// Large payloads are boxed to keep the enum small on the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A primary search was accepted: the previous result and error are
    /// cleared and a lookup is in flight.
    SearchStarted,
    /// The primary search completed; this is the new analysis result.
    SearchSucceeded(Box<AnalysisResult>),
    /// The primary search failed with a user-visible message.
    SearchFailed(String),
    /// The competitor draft form opened (draft and prior error cleared).
    CompetitorFormOpened,
    /// The competitor draft form closed without submitting.
    CompetitorFormClosed,
    /// A competitor lookup was accepted and is in flight.
    CompetitorSubmitted,
    /// The competitor lookup succeeded. Carries the updated analysis result
    /// with the new row prepended, or `None` when no primary result was
    /// loaded and the merge was skipped.
    CompetitorAccepted(Option<Box<AnalysisResult>>),
    /// The competitor lookup failed; the form stays open with the draft
    /// preserved so the user can retry.
    CompetitorRejected(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
