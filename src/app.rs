// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// completion reports from spawned lookup tasks. Owns the complete analysis
// state and pushes UI updates to the TUI render loop.
//
// The two lookup flows (primary search, competitor add) are tracked
// independently, each with its own TaskStatus and error slot. They share
// one gate: while either flow has a lookup in flight, neither accepts a new
// submission, so at most one request is ever on the wire.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::AnalyzeClient;
use crate::config::Config;
use crate::models::{AnalysisResult, Competitor};
use crate::protocol::{FetchEvent, FetchKind, TaskStatus, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shown when a primary search fails without a backend `detail` message.
pub const PRIMARY_FALLBACK: &str = "Analysis failed";

/// Shown when a competitor lookup fails without a backend `detail` message.
pub const COMPETITOR_FALLBACK: &str = "Failed to add competitor";

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Shared with spawned lookup tasks.
    pub client: Arc<AnalyzeClient>,
    /// The last successful primary analysis, if any. Cleared at the start
    /// of every primary search so the view never shows stale data while a
    /// lookup is in flight.
    pub result: Option<AnalysisResult>,
    pub primary_status: TaskStatus,
    pub primary_error: Option<String>,
    pub competitor_status: TaskStatus,
    pub competitor_error: Option<String>,
    /// Whether the competitor draft form is open (the Drafting state).
    pub competitor_form_open: bool,
    /// The identifier submitted with the in-flight competitor lookup; used
    /// for the link heuristic when the result arrives.
    pending_competitor: Option<String>,
    /// Monotonically increasing counter tagging every spawned lookup.
    /// Events whose generation does not match the latest issued generation
    /// for their flow are discarded, so a slow superseded response can
    /// never overwrite the outcome of a later request.
    fetch_generation: u64,
    /// Latest generation issued to the primary flow.
    primary_generation: u64,
    /// Latest generation issued to the competitor flow.
    competitor_generation: u64,
    /// Sender handed to spawned lookup tasks.
    pub fetch_tx: mpsc::Sender<FetchEvent>,
}

impl AppState {
    pub fn new(
        config: Config,
        client: Arc<AnalyzeClient>,
        fetch_tx: mpsc::Sender<FetchEvent>,
    ) -> Self {
        AppState {
            config,
            client,
            result: None,
            primary_status: TaskStatus::Idle,
            primary_error: None,
            competitor_status: TaskStatus::Idle,
            competitor_error: None,
            competitor_form_open: false,
            pending_competitor: None,
            fetch_generation: 0,
            primary_generation: 0,
            competitor_generation: 0,
            fetch_tx,
        }
    }

    /// Whether either flow currently has a lookup on the wire.
    ///
    /// This is the single derived disable-condition the UI needs; the two
    /// flows' data effects stay separate.
    pub fn lookup_in_flight(&self) -> bool {
        self.primary_status == TaskStatus::InFlight
            || self.competitor_status == TaskStatus::InFlight
    }

    /// Start a primary search for `identifier`.
    ///
    /// Empty identifiers and submissions while a lookup is in flight are
    /// rejected without side effects. On acceptance the previous result and
    /// error are cleared and one lookup task is spawned. Returns whether a
    /// lookup was started.
    pub fn begin_primary_search(&mut self, identifier: &str) -> bool {
        if identifier.is_empty() {
            debug!("ignoring empty primary search");
            return false;
        }
        if self.lookup_in_flight() {
            debug!("ignoring primary search while a lookup is in flight");
            return false;
        }

        self.result = None;
        self.primary_error = None;
        self.primary_status = TaskStatus::InFlight;

        self.fetch_generation += 1;
        self.primary_generation = self.fetch_generation;

        self.spawn_lookup(FetchKind::Primary, identifier, self.fetch_generation);
        info!(identifier, generation = self.fetch_generation, "primary search started");
        true
    }

    /// Open the competitor draft form (Idle -> Drafting).
    ///
    /// Clears any prior competitor error; the primary result is untouched.
    /// The draft text itself lives in the TUI, which clears it on open.
    pub fn open_competitor_form(&mut self) {
        self.competitor_form_open = true;
        self.competitor_error = None;
    }

    /// Close the competitor draft form without submitting.
    pub fn close_competitor_form(&mut self) {
        self.competitor_form_open = false;
    }

    /// Start a competitor lookup for `identifier` (Drafting -> Submitting).
    ///
    /// Same guards as the primary search: empty drafts and submissions
    /// while a lookup is in flight are rejected. Returns whether a lookup
    /// was started.
    pub fn begin_competitor_add(&mut self, identifier: &str) -> bool {
        if identifier.is_empty() {
            debug!("ignoring empty competitor draft");
            return false;
        }
        if self.lookup_in_flight() {
            debug!("ignoring competitor add while a lookup is in flight");
            return false;
        }

        self.competitor_error = None;
        self.competitor_status = TaskStatus::InFlight;
        self.pending_competitor = Some(identifier.to_string());

        self.fetch_generation += 1;
        self.competitor_generation = self.fetch_generation;

        self.spawn_lookup(FetchKind::Competitor, identifier, self.fetch_generation);
        info!(identifier, generation = self.fetch_generation, "competitor lookup started");
        true
    }

    fn spawn_lookup(&self, kind: FetchKind, identifier: &str, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.fetch_tx.clone();
        let identifier = identifier.to_string();
        tokio::spawn(async move {
            client.lookup(kind, identifier, tx, generation).await;
        });
    }

    /// The latest generation issued to the given flow.
    fn latest_generation(&self, kind: FetchKind) -> u64 {
        match kind {
            FetchKind::Primary => self.primary_generation,
            FetchKind::Competitor => self.competitor_generation,
        }
    }

    fn status_of(&self, kind: FetchKind) -> TaskStatus {
        match kind {
            FetchKind::Primary => self.primary_status,
            FetchKind::Competitor => self.competitor_status,
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Completion reports from spawned lookup tasks
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!(
        backend = %state.config.backend.url,
        "application event loop started"
    );

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }

            event = fetch_rx.recv() => {
                match event {
                    Some(event) => {
                        handle_fetch_event(&mut state, event, &ui_tx).await;
                    }
                    None => {
                        // Unreachable while `state` holds a sender clone,
                        // but a closed channel still means shutdown.
                        info!("fetch channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::Analyze(identifier) => {
            if state.begin_primary_search(&identifier) {
                let _ = ui_tx.send(UiUpdate::SearchStarted).await;
            }
        }
        UserCommand::OpenCompetitorForm => {
            state.open_competitor_form();
            let _ = ui_tx.send(UiUpdate::CompetitorFormOpened).await;
        }
        UserCommand::CloseCompetitorForm => {
            state.close_competitor_form();
            let _ = ui_tx.send(UiUpdate::CompetitorFormClosed).await;
        }
        UserCommand::AddCompetitor(identifier) => {
            if state.begin_competitor_add(&identifier) {
                let _ = ui_tx.send(UiUpdate::CompetitorSubmitted).await;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop.
        }
    }
}

/// Handle a completion report from a lookup task.
///
/// **Generation check**: every event carries the generation its task was
/// spawned with. An event whose generation does not match the latest issued
/// generation for its flow comes from a superseded request and is silently
/// discarded, so only the most recently started lookup is ever applied.
/// Events for a flow that is not `InFlight` (e.g. a duplicate completion)
/// are likewise discarded.
async fn handle_fetch_event(
    state: &mut AppState,
    event: FetchEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let kind = event.kind();
    let generation = event.generation();

    if generation != state.latest_generation(kind) {
        debug!(
            ?kind,
            generation,
            latest = state.latest_generation(kind),
            "discarding stale fetch event"
        );
        return;
    }
    if state.status_of(kind) != TaskStatus::InFlight {
        debug!(?kind, generation, "discarding fetch event for settled flow");
        return;
    }

    match (kind, event) {
        (FetchKind::Primary, FetchEvent::Completed { result, .. }) => {
            info!(
                uploader = %result.target_uploader.info.name,
                platform = %result.platform,
                "primary search succeeded"
            );
            state.result = Some(*result.clone());
            state.primary_status = TaskStatus::Succeeded;
            let _ = ui_tx.send(UiUpdate::SearchSucceeded(result)).await;
        }
        (FetchKind::Primary, FetchEvent::Failed { detail, .. }) => {
            let message = detail.unwrap_or_else(|| PRIMARY_FALLBACK.to_string());
            warn!(%message, "primary search failed");
            state.primary_error = Some(message.clone());
            state.primary_status = TaskStatus::Failed;
            let _ = ui_tx.send(UiUpdate::SearchFailed(message)).await;
        }
        (FetchKind::Competitor, FetchEvent::Completed { result, .. }) => {
            let identifier = state.pending_competitor.take().unwrap_or_default();
            let row = Competitor::from_result(&identifier, &result);
            info!(name = %row.name, "competitor lookup succeeded");

            state.competitor_status = TaskStatus::Succeeded;
            state.competitor_form_open = false;

            let update = match &mut state.result {
                Some(current) => {
                    // Prepend: most recently added first, ahead of whatever
                    // the backend originally returned.
                    current.competitors.insert(0, row);
                    UiUpdate::CompetitorAccepted(Some(Box::new(current.clone())))
                }
                None => {
                    // No primary result to merge into; the lookup outcome
                    // is dropped without surfacing an error.
                    info!("no primary result loaded, skipping competitor merge");
                    UiUpdate::CompetitorAccepted(None)
                }
            };
            let _ = ui_tx.send(update).await;
        }
        (FetchKind::Competitor, FetchEvent::Failed { detail, .. }) => {
            state.pending_competitor = None;
            let message = detail.unwrap_or_else(|| COMPETITOR_FALLBACK.to_string());
            warn!(%message, "competitor lookup failed");
            // Stay in Drafting: the form remains open and the TUI keeps the
            // draft text so the user can retry.
            state.competitor_error = Some(message.clone());
            state.competitor_status = TaskStatus::Failed;
            let _ = ui_tx.send(UiUpdate::CompetitorRejected(message)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
