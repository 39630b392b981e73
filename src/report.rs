//! The report view: owns the table state and runs the debounced-read and
//! status-toggle protocols against the Leads API.
//!
//! The view is a single event-loop task. All state mutation happens on that
//! task; network requests run as spawned tasks that report back over an
//! internal channel, so an in-flight read never blocks a toggle and toggles
//! on different records never block each other.

use crate::client::LeadsApiClient;
use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, ReportStatus, StatusFilter};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// Commands accepted by the view, one per user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCommand {
    /// Replace the search term; schedules a debounced read if it changed.
    SetSearchTerm(String),
    /// Replace the status filter; schedules a debounced read if it changed.
    SetStatusFilter(StatusFilter),
    /// Flip the status of one record.
    ToggleStatus(String),
    /// Issue a read immediately, bypassing the quiet period.
    Refresh,
}

/// Completions reported back by spawned request tasks.
#[derive(Debug)]
enum ReportEvent {
    ReadSettled {
        seq: u64,
        outcome: Result<Vec<Lead>, AppError>,
    },
    ToggleSettled {
        id: String,
        new_status: ReportStatus,
        outcome: Result<(), AppError>,
    },
}

/// Immutable view of the report state, published after every observable
/// change.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    /// Current record set, in server order.
    pub records: Vec<Lead>,
    /// True from the moment a read is issued until the newest read settles.
    pub is_loading: bool,
    /// Ids with a status update still in flight; those rows' controls are
    /// disabled while every other row stays interactive.
    pub active_toggles: HashSet<String>,
    /// Name substring the record set was (or is being) filtered by.
    pub search_term: String,
    /// Status the record set was (or is being) filtered by.
    pub status_filter: StatusFilter,
}

impl Default for ReportSnapshot {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            // The first read is already scheduled when the view starts, so
            // the view comes up in the loading state.
            is_loading: true,
            active_toggles: HashSet::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
        }
    }
}

/// The report view state machine.
pub struct ReportView {
    client: LeadsApiClient,
    debounce: Duration,
    state: ReportSnapshot,
    /// Stamp of the newest issued read; a completion carrying an older stamp
    /// is stale and must not replace fresher data.
    read_seq: u64,
    /// Deadline of the pending debounced read, re-armed on every filter
    /// change so only the latest filter state is ever sent.
    read_deadline: Option<Instant>,
    events_tx: mpsc::Sender<ReportEvent>,
    events_rx: mpsc::Receiver<ReportEvent>,
    snapshot_tx: watch::Sender<ReportSnapshot>,
}

impl ReportView {
    /// Creates the view plus the receiver a renderer watches for snapshots.
    pub fn new(
        client: LeadsApiClient,
        debounce: Duration,
    ) -> (Self, watch::Receiver<ReportSnapshot>) {
        let (events_tx, events_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(ReportSnapshot::default());
        let view = Self {
            client,
            debounce,
            state: ReportSnapshot::default(),
            read_seq: 0,
            read_deadline: None,
            events_tx,
            events_rx,
            snapshot_tx,
        };
        (view, snapshot_rx)
    }

    /// Runs the view until the command channel closes.
    ///
    /// The initial data load goes through the same quiet period as any
    /// filter change.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ReportCommand>) {
        self.read_deadline = Some(Instant::now() + self.debounce);

        loop {
            let deadline = self.read_deadline;
            let changed = tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                    if deadline.is_some() =>
                {
                    self.read_deadline = None;
                    self.begin_read();
                    true
                }
            };

            if changed {
                self.snapshot_tx.send_replace(self.state.clone());
            }
        }

        tracing::debug!("Report view shutting down");
    }

    fn handle_command(&mut self, cmd: ReportCommand) -> bool {
        match cmd {
            ReportCommand::SetSearchTerm(term) => {
                if term == self.state.search_term {
                    return false;
                }
                self.state.search_term = term;
                self.schedule_read();
                true
            }
            ReportCommand::SetStatusFilter(filter) => {
                if filter == self.state.status_filter {
                    return false;
                }
                self.state.status_filter = filter;
                self.schedule_read();
                true
            }
            ReportCommand::ToggleStatus(id) => self.begin_toggle(id),
            ReportCommand::Refresh => {
                self.read_deadline = None;
                self.begin_read();
                true
            }
        }
    }

    /// Re-arms the quiet-period deadline. A read scheduled earlier in the
    /// same quiet period is cancelled by the re-arm and never issued.
    fn schedule_read(&mut self) {
        self.read_deadline = Some(Instant::now() + self.debounce);
    }

    /// Issues a read with the current filters, stamped so a stale completion
    /// can be recognized.
    fn begin_read(&mut self) {
        self.read_seq += 1;
        let seq = self.read_seq;
        self.state.is_loading = true;

        let client = self.client.clone();
        let filter = self.state.status_filter;
        let term = self.state.search_term.clone();
        let events = self.events_tx.clone();
        tracing::debug!("Issuing read #{} (status {}, name '{}')", seq, filter, term);

        tokio::spawn(async move {
            let outcome = client
                .fetch_leads(filter, &term)
                .await
                .context("fetching leads");
            let _ = events.send(ReportEvent::ReadSettled { seq, outcome }).await;
        });
    }

    fn begin_toggle(&mut self, id: String) -> bool {
        if self.state.active_toggles.contains(&id) {
            tracing::debug!("Toggle for {} already in flight; ignoring", id);
            return false;
        }
        let new_status = match self.state.records.iter().find(|r| r.id == id) {
            Some(record) => record.report_status.toggled(),
            None => {
                tracing::warn!("Toggle requested for unknown record {}", id);
                return false;
            }
        };

        self.state.active_toggles.insert(id.clone());
        let client = self.client.clone();
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = client
                .update_status(&id, new_status)
                .await
                .with_context(|| format!("updating status of lead {}", id));
            let _ = events
                .send(ReportEvent::ToggleSettled {
                    id,
                    new_status,
                    outcome,
                })
                .await;
        });
        true
    }

    fn handle_event(&mut self, event: ReportEvent) -> bool {
        match event {
            ReportEvent::ReadSettled { seq, outcome } => {
                if seq != self.read_seq {
                    // A newer read was issued while this one was in flight;
                    // its result must not clobber the fresher data, and the
                    // newer read still owns the loading flag.
                    tracing::debug!("Discarding stale read #{} (newest is #{})", seq, self.read_seq);
                    return false;
                }
                self.state.is_loading = false;
                match outcome {
                    Ok(records) => {
                        tracing::debug!("Read #{} settled with {} records", seq, records.len());
                        self.state.records = records;
                    }
                    Err(e) => {
                        // Last-known-good data is retained; the user recovers
                        // by re-triggering an action.
                        tracing::error!("Failed to fetch leads: {}", e);
                    }
                }
                true
            }
            ReportEvent::ToggleSettled {
                id,
                new_status,
                outcome,
            } => {
                // The control must never stay stuck disabled.
                self.state.active_toggles.remove(&id);
                match outcome {
                    Ok(()) => match self.state.records.iter_mut().find(|r| r.id == id) {
                        Some(record) => record.report_status = new_status,
                        // An interleaved read may have replaced the set.
                        None => tracing::debug!("Updated record {} no longer in view", id),
                    },
                    Err(e) => tracing::error!("Failed to update status of {}: {}", id, e),
                }
                true
            }
        }
    }
}
