//! # Driving the list screen
//!
//! Backend calls complete wherever the executor runs them. The list state may only be
//! touched by the context that renders it, so completed calls are never applied
//! directly: each one is turned into a [`RosterEvent`] and handed to a
//! [`UiDispatcher`]. The receiving end belongs to the UI (a Dioxus coroutine in the
//! `ui` crate) and is the only place [`crate::Roster::apply`] is called.
//!
//! [`ListSync`] issues the calls:
//!
//! - [`refresh`](ListSync::refresh): `FetchStarted`, fetch, `Fetched`.
//! - [`remove`](ListSync::remove): delete, `Removed`, then a full `refresh` if the
//!   delete succeeded. Nothing is removed from the list optimistically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};

use crate::repo::{DocumentStore, UserDirectory};
use crate::roster::{FetchTicket, RosterEvent};

/// Sends [`RosterEvent`]s to the context that owns the list state.
#[derive(Clone, Debug)]
pub struct UiDispatcher {
    tx: UnboundedSender<RosterEvent>,
}

impl UiDispatcher {
    pub fn new(tx: UnboundedSender<RosterEvent>) -> Self {
        Self { tx }
    }

    /// A dispatcher and the receiver the UI context drains.
    pub fn channel() -> (Self, UnboundedReceiver<RosterEvent>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }

    /// Hand `event` over to the UI context.
    pub fn dispatch(&self, event: RosterEvent) {
        // The receiver only goes away with the screen; late results have nowhere to land.
        if let Err(e) = self.tx.unbounded_send(event) {
            tracing::debug!("list screen gone, dropping {:?}", e.into_inner());
        }
    }
}

/// Issues list-screen backend calls and reports their outcome through a [`UiDispatcher`].
#[derive(Clone, Debug)]
pub struct ListSync<S: DocumentStore> {
    directory: UserDirectory<S>,
    ui: UiDispatcher,
    tickets: Arc<AtomicU64>,
}

impl<S: DocumentStore> ListSync<S> {
    pub fn new(directory: UserDirectory<S>, ui: UiDispatcher) -> Self {
        Self {
            directory,
            ui,
            tickets: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn directory(&self) -> &UserDirectory<S> {
        &self.directory
    }

    fn next_ticket(&self) -> FetchTicket {
        FetchTicket(self.tickets.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Re-read the whole list collection.
    pub async fn refresh(&self) {
        let ticket = self.next_ticket();
        self.ui.dispatch(RosterEvent::FetchStarted(ticket));
        let result = self.directory.fetch_users().await;
        self.ui.dispatch(RosterEvent::Fetched { ticket, result });
    }

    /// Delete a user, then re-read the list if the delete went through.
    pub async fn remove(&self, id: String) {
        let result = self.directory.remove_user(&id).await;
        let deleted = result.is_ok();
        self.ui.dispatch(RosterEvent::Removed { id, result });
        if deleted {
            self.refresh().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Collections;
    use crate::document::{Document, FieldValue, Fields};
    use crate::memory::{MemoryStore, Operation};
    use crate::models::{AGE, EMAIL, USERNAME};
    use crate::roster::{Phase, Roster};

    fn user_doc(id: &str, name: &str, age: i64) -> Document {
        Document::new(
            id,
            Fields::from([
                (USERNAME.to_string(), FieldValue::from(name)),
                (EMAIL.to_string(), FieldValue::from(format!("{name}@x.com"))),
                (AGE.to_string(), FieldValue::Integer(age)),
            ]),
        )
    }

    fn setup() -> (MemoryStore, ListSync<MemoryStore>, UnboundedReceiver<RosterEvent>) {
        let store = MemoryStore::new();
        store.insert("users", user_doc("a-key", "a", 17));
        store.insert("users", user_doc("b-key", "b", 25));
        let (ui, rx) = UiDispatcher::channel();
        let sync = ListSync::new(UserDirectory::new(store.clone(), Collections::default()), ui);
        (store, sync, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<RosterEvent>) -> Vec<RosterEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = rx.try_next() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_refresh_populates_roster() {
        let (_store, sync, mut rx) = setup();
        let mut roster = Roster::default();

        sync.refresh().await;
        for event in drain(&mut rx) {
            roster.apply(event);
        }

        assert_eq!(roster.phase(), Phase::Populated);
        let names: Vec<_> = roster.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        let adults: Vec<_> = roster.users().iter().map(|u| u.is_adult).collect();
        assert_eq!(adults, vec![false, true]);
    }

    #[tokio::test]
    async fn test_remove_deletes_then_refetches() {
        let (store, sync, mut rx) = setup();

        sync.remove("a-key".to_string()).await;

        assert_eq!(
            store.journal(),
            vec![
                Operation::Delete {
                    collection: "users".into(),
                    id: "a-key".into()
                },
                Operation::List {
                    collection: "users".into()
                },
            ]
        );

        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], RosterEvent::Removed { id, result: Ok(()) } if id == "a-key"));
        assert!(matches!(events[1], RosterEvent::FetchStarted(_)));
        match &events[2] {
            RosterEvent::Fetched { result: Ok(users), .. } => {
                assert_eq!(users.len(), 1);
                assert_eq!(users[0].id, "b-key");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_missing_id_still_refetches() {
        let (store, sync, mut rx) = setup();

        sync.remove("ghost".to_string()).await;

        assert_eq!(store.journal().len(), 2);
        assert!(matches!(store.journal()[1], Operation::List { .. }));
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[tokio::test]
    async fn test_failed_remove_does_not_refetch() {
        let (store, sync, mut rx) = setup();
        let mut roster = Roster::default();
        sync.refresh().await;
        for event in drain(&mut rx) {
            roster.apply(event);
        }

        store.set_offline(true);
        sync.remove("a-key".to_string()).await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        for event in events {
            roster.apply(event);
        }
        assert_eq!(roster.users().len(), 2);
        // The initial list and the failed delete, no refetch after it.
        assert_eq!(store.journal().len(), 2);
        assert!(matches!(store.journal()[1], Operation::Delete { .. }));
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_list() {
        let (store, sync, mut rx) = setup();
        let mut roster = Roster::default();
        sync.refresh().await;
        store.set_offline(true);
        sync.refresh().await;

        for event in drain(&mut rx) {
            roster.apply(event);
        }
        assert_eq!(roster.phase(), Phase::Populated);
        assert_eq!(roster.users().len(), 2);
    }

    #[tokio::test]
    async fn test_tickets_increase() {
        let (_store, sync, mut rx) = setup();
        sync.refresh().await;
        sync.refresh().await;

        let started: Vec<FetchTicket> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                RosterEvent::FetchStarted(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec![FetchTicket(1), FetchTicket(2)]);
    }

    #[test]
    fn test_dispatch_after_receiver_dropped() {
        let (ui, rx) = UiDispatcher::channel();
        drop(rx);
        ui.dispatch(RosterEvent::FetchStarted(FetchTicket(1)));
    }
}
