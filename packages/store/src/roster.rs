//! # List screen state
//!
//! [`Roster`] is the one piece of mutable state behind the list screen: the users on
//! display and where the screen is in its load cycle. It changes only by applying
//! [`RosterEvent`]s, and those are delivered on the UI-owning context by
//! [`crate::UiDispatcher`].
//!
//! ## Phases
//!
//! ```text
//! Empty ──FetchStarted──▶ Loading ──Fetched(Ok)──▶ Populated
//!                            ▲                        │
//!                            └──────FetchStarted──────┘
//! ```
//!
//! A failed fetch leaves the users untouched and returns to `Empty` or `Populated`,
//! whichever the screen was in before. There is no error phase.
//!
//! ## Stale results
//!
//! Every fetch carries a [`FetchTicket`]. A result is applied only if its ticket is
//! newer than the last result applied, so a slow early fetch can never overwrite a
//! later one. `Loading` lasts while any fetch is still in flight.

use crate::error::StoreError;
use crate::models::User;

/// Orders fetches by the time they were started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Empty,
    Loading,
    Populated,
}

/// Outcome of a backend call, to be applied on the UI-owning context.
#[derive(Debug)]
pub enum RosterEvent {
    FetchStarted(FetchTicket),
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<User>, StoreError>,
    },
    Removed {
        id: String,
        result: Result<(), StoreError>,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    users: Vec<User>,
    phase: Phase,
    loaded: bool,
    in_flight: usize,
    applied: Option<FetchTicket>,
}

impl Roster {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn apply(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::FetchStarted(ticket) => {
                tracing::debug!(ticket = ticket.0, "fetch started");
                self.in_flight += 1;
                self.phase = Phase::Loading;
            }
            RosterEvent::Fetched { ticket, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(_) if self.applied.is_some_and(|applied| ticket <= applied) => {
                        tracing::debug!(ticket = ticket.0, "dropping stale fetch result");
                    }
                    Ok(users) => {
                        self.users = users;
                        self.loaded = true;
                        self.applied = Some(ticket);
                    }
                    Err(e) => {
                        tracing::warn!(ticket = ticket.0, "Error fetching users: {e}");
                    }
                }
                self.settle();
            }
            RosterEvent::Removed { id, result } => match result {
                Ok(()) => tracing::info!(%id, "user removed"),
                Err(e) => tracing::warn!(%id, "Error removing user: {e}"),
            },
        }
    }

    fn settle(&mut self) {
        if self.in_flight > 0 {
            return;
        }
        self.phase = if self.loaded {
            Phase::Populated
        } else {
            Phase::Empty
        };
    }
}
