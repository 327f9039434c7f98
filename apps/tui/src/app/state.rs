use blackspot_tui::api::{AccidentRecord, AccidentSource, FetchError};
use blackspot_tui::view::{Dashboard, FetchTicket, LoadStatus, Selection};
use blackspot_tui::{District, Year};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;

const SPINNER_STEP: Duration = Duration::from_millis(120);

/// A finished fetch on its way back to the event loop
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<AccidentRecord>, FetchError>,
}

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub dashboard: Dashboard,
    pub last_updated: Option<DateTime<Local>>,
    pub throbber_state: ThrobberState,
    last_spin: Instant,
    source: Arc<dyn AccidentSource>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(source: Arc<dyn AccidentSource>, selection: Selection) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            show_help: false,
            dashboard: Dashboard::new(selection),
            last_updated: None,
            throbber_state: ThrobberState::default(),
            last_spin: Instant::now(),
            source,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn update(&mut self) {
        if self.last_spin.elapsed() >= SPINNER_STEP {
            self.throbber_state.calc_next();
            self.last_spin = Instant::now();
        }
    }

    pub fn select_year(&mut self, year: Year) {
        let ticket = self.dashboard.select_year(year);
        self.dispatch(ticket);
    }

    pub fn select_district(&mut self, district: District) {
        let ticket = self.dashboard.select_district(district);
        self.dispatch(ticket);
    }

    pub fn refresh(&mut self) {
        let ticket = self.dashboard.refresh();
        self.dispatch(ticket);
    }

    // Must be called from within the tokio runtime.
    fn dispatch(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(ticket.district, ticket.year).await;
            // The receiver lives as long as the app; a closed channel means we are shutting down.
            let _ = tx.send(FetchOutcome { ticket, result });
        });
    }

    /// Applies every outcome that has arrived. Returns true if the visible
    /// state changed.
    pub fn drain_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Fetches the current selection without going through a background
    /// task, for one-shot use.
    pub async fn refresh_now(&mut self) -> LoadStatus {
        let source = Arc::clone(&self.source);
        let status = self.dashboard.run(source.as_ref()).await;
        self.last_updated = Some(Local::now());
        status
    }

    /// Waits for the next outcome and applies it.
    #[cfg(test)]
    pub async fn wait_for_outcome(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let applied = self.dashboard.resolve(outcome.ticket.seq, outcome.result);
        if applied {
            self.last_updated = Some(Local::now());
        }
        applied
    }
}
