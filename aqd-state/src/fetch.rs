//! Fetch lifecycle of a single remote resource.
//!
//! `Idle -> Fetching -> {Success, Failed} -> Fetching -> ...`
//!
//! Transitions go through the pure [`reduce`] function. A
//! [`FetchCoordinator`] owns the current state, hands out a [`FetchTicket`]
//! per load, and applies an outcome only when its ticket is the most
//! recently issued one.

use aqd_openaq::{FetchError, ResourceSource, Results};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Snapshot of a resource load.
///
/// While `fetching` is set, `data` and `error` still describe the previous
/// completed load.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub fetched: bool,
    pub fetching: bool,
    pub error: Option<FetchError>,
    pub data: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState {
            fetched: false,
            fetching: false,
            error: None,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Success,
    Failed,
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> Phase {
        if self.fetching {
            Phase::Fetching
        } else if !self.fetched {
            Phase::Idle
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Success
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent<T> {
    Requested,
    Resolved(Result<T, FetchError>),
    Reset,
}

/// Pure transition function of the fetch lifecycle.
pub fn reduce<T>(state: FetchState<T>, event: FetchEvent<T>) -> FetchState<T> {
    match event {
        FetchEvent::Requested => FetchState {
            fetching: true,
            ..state
        },
        FetchEvent::Resolved(Ok(data)) => FetchState {
            fetched: true,
            fetching: false,
            error: None,
            data: Some(data),
        },
        FetchEvent::Resolved(Err(error)) => FetchState {
            fetched: true,
            fetching: false,
            error: Some(error),
            data: None,
        },
        FetchEvent::Reset => FetchState::default(),
    }
}

/// Handle for one issued load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    id: String,
}

impl FetchTicket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

type Listener<T> = Box<dyn FnMut(&FetchState<T>)>;

/// A coordinator shared between the view and its in-flight loads.
pub type SharedCoordinator<T> = Rc<RefCell<FetchCoordinator<T>>>;

/// Drives one resource through the fetch lifecycle, last request wins.
pub struct FetchCoordinator<T> {
    state: FetchState<T>,
    issued: u64,
    id: Option<String>,
    listeners: Vec<Listener<T>>,
}

impl<T> Default for FetchCoordinator<T> {
    fn default() -> Self {
        FetchCoordinator {
            state: FetchState::default(),
            issued: 0,
            id: None,
            listeners: Vec::new(),
        }
    }
}

impl<T> FetchCoordinator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCoordinator<T> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Identifier of the most recent request, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Call `listener` after every applied transition.
    ///
    /// Listeners run while the coordinator is borrowed and must not reach
    /// back into it.
    pub fn subscribe(&mut self, listener: impl FnMut(&FetchState<T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Issue the first load once an identifier is known.
    ///
    /// Returns `None` when an identifier was already set; later loads go
    /// through [`refetch`](Self::refetch) or [`request`](Self::request).
    pub fn identify(&mut self, id: &str) -> Option<FetchTicket> {
        if self.id.is_some() {
            return None;
        }
        Some(self.request(id))
    }

    /// Reload the current identifier, superseding any load in flight.
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let id = self.id.clone()?;
        Some(self.request(&id))
    }

    /// Issue a load for `id` and make it the current identifier.
    pub fn request(&mut self, id: &str) -> FetchTicket {
        self.issued += 1;
        self.id = Some(id.to_string());
        debug!("Issuing load #{} for {}", self.issued, id);
        self.dispatch(FetchEvent::Requested);
        FetchTicket {
            seq: self.issued,
            id: id.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Apply the outcome of `ticket`'s load.
    ///
    /// The first result entry is the payload; an empty result list is an
    /// [`FetchError::EmptyResult`]. Returns `false`, leaving the state
    /// untouched, when a newer load was issued or the coordinator was reset
    /// since `ticket` was handed out.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Results<T>, FetchError>,
    ) -> bool {
        self.resolve_payload(ticket, outcome.and_then(Results::into_first))
    }

    /// Apply an already extracted payload for `ticket`, last request wins.
    pub fn resolve_payload(&mut self, ticket: &FetchTicket, outcome: Result<T, FetchError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale load #{} for {} (latest is #{})",
                ticket.seq, ticket.id, self.issued
            );
            return false;
        }
        if let Err(e) = &outcome {
            warn!("Load of {} failed [{}]: {}", ticket.id, e.kind(), e);
        }
        self.dispatch(FetchEvent::Resolved(outcome));
        true
    }

    /// Return to `Idle` and orphan every outstanding ticket.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.id = None;
        self.dispatch(FetchEvent::Reset);
    }

    fn dispatch(&mut self, event: FetchEvent<T>) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

/// Run `ticket`'s load against `source` and hand the outcome to the
/// coordinator.
///
/// Only a weak handle is held across the await: if the coordinator was
/// dropped in the meantime the outcome is discarded.
pub async fn load<S>(
    coordinator: Weak<RefCell<FetchCoordinator<S::Item>>>,
    ticket: FetchTicket,
    source: &S,
) -> bool
where
    S: ResourceSource,
{
    let outcome = source.fetch_results(ticket.id()).await;
    match coordinator.upgrade() {
        Some(coordinator) => coordinator.borrow_mut().resolve(&ticket, outcome),
        None => {
            debug!("Coordinator gone before load #{} for {} arrived", ticket.seq, ticket.id);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    fn ok(items: &[&str]) -> Result<Results<String>, FetchError> {
        Ok(Results {
            results: items.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_idle_state() {
        let coordinator: FetchCoordinator<String> = FetchCoordinator::new();
        let state = coordinator.state();
        assert!(!state.fetched && !state.fetching);
        assert!(state.error.is_none() && state.data.is_none());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_success_takes_first_result() {
        let mut coordinator = FetchCoordinator::new();
        let ticket = coordinator.identify("22").unwrap();
        assert_eq!(coordinator.state().phase(), Phase::Fetching);

        assert!(coordinator.resolve(&ticket, ok(&["first", "second"])));
        let state = coordinator.state();
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.data.as_deref(), Some("first"));
        assert!(state.fetched && !state.fetching);
    }

    #[test]
    fn test_empty_results_is_an_error() {
        let mut coordinator = FetchCoordinator::<String>::new();
        let ticket = coordinator.identify("22").unwrap();
        coordinator.resolve(&ticket, ok(&[]));
        let state = coordinator.state();
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.error, Some(FetchError::EmptyResult));
        assert!(state.data.is_none());
    }

    #[test]
    fn test_transport_error() {
        let mut coordinator = FetchCoordinator::<String>::new();
        let ticket = coordinator.identify("22").unwrap();
        coordinator.resolve(&ticket, Err(FetchError::Status(500)));
        assert_eq!(coordinator.state().error, Some(FetchError::Status(500)));
        assert!(coordinator.state().fetched);
    }

    #[test]
    fn test_identify_only_once() {
        let mut coordinator = FetchCoordinator::<String>::new();
        assert!(coordinator.identify("22").is_some());
        assert!(coordinator.identify("22").is_none());
        assert!(coordinator.identify("23").is_none());
        assert_eq!(coordinator.id(), Some("22"));
    }

    #[test]
    fn test_refetch_keeps_stale_data_until_resolved() {
        let mut coordinator = FetchCoordinator::new();
        let first = coordinator.identify("22").unwrap();
        coordinator.resolve(&first, ok(&["v1"]));

        let second = coordinator.refetch().unwrap();
        assert_eq!(second.id(), "22");
        let state = coordinator.state();
        assert_eq!(state.phase(), Phase::Fetching);
        assert!(state.fetched);
        assert_eq!(state.data.as_deref(), Some("v1"));

        coordinator.resolve(&second, ok(&["v2"]));
        assert_eq!(coordinator.state().data.as_deref(), Some("v2"));
    }

    #[test]
    fn test_refetch_keeps_stale_error_until_resolved() {
        let mut coordinator = FetchCoordinator::<String>::new();
        let first = coordinator.identify("22").unwrap();
        coordinator.resolve(&first, Err(FetchError::Transport("offline".into())));

        coordinator.refetch().unwrap();
        assert!(coordinator.state().fetching);
        assert!(coordinator.state().error.is_some());
    }

    #[test]
    fn test_settled_state_never_holds_data_and_error() {
        let mut coordinator = FetchCoordinator::new();
        let first = coordinator.identify("22").unwrap();
        coordinator.resolve(&first, ok(&["v1"]));

        let second = coordinator.refetch().unwrap();
        coordinator.resolve(&second, Err(FetchError::Status(503)));
        assert!(coordinator.state().data.is_none());
        assert!(coordinator.state().error.is_some());

        let third = coordinator.refetch().unwrap();
        coordinator.resolve(&third, ok(&["v3"]));
        assert_eq!(coordinator.state().data.as_deref(), Some("v3"));
        assert!(coordinator.state().error.is_none());
    }

    #[test]
    fn test_refetch_without_identifier() {
        let mut coordinator = FetchCoordinator::<String>::new();
        assert!(coordinator.refetch().is_none());
        assert_eq!(coordinator.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_last_request_wins() {
        let mut coordinator = FetchCoordinator::new();
        let a = coordinator.request("a");
        let b = coordinator.request("b");

        assert!(!coordinator.resolve(&a, ok(&["A"])));
        assert_eq!(coordinator.state().phase(), Phase::Fetching);
        assert!(coordinator.state().data.is_none());

        assert!(coordinator.resolve(&b, ok(&["B"])));
        assert_eq!(coordinator.state().data.as_deref(), Some("B"));

        // A late error from the superseded load changes nothing either.
        assert!(!coordinator.resolve(&a, Err(FetchError::Status(502))));
        assert_eq!(coordinator.state().phase(), Phase::Success);
    }

    #[test]
    fn test_resolve_payload_keeps_empty_lists() {
        let mut coordinator = FetchCoordinator::<Vec<u32>>::new();
        let stale = coordinator.request("pm25");
        let ticket = coordinator.request("pm25");
        assert!(!coordinator.resolve_payload(&stale, Ok(vec![1, 2])));
        assert!(coordinator.resolve_payload(&ticket, Ok(Vec::new())));
        assert_eq!(coordinator.state().phase(), Phase::Success);
        assert_eq!(coordinator.state().data, Some(Vec::new()));
    }

    #[test]
    fn test_reset_orphans_outstanding_tickets() {
        let mut coordinator = FetchCoordinator::new();
        let ticket = coordinator.identify("22").unwrap();
        coordinator.reset();
        assert!(!coordinator.resolve(&ticket, ok(&["late"])));
        assert_eq!(coordinator.state(), &FetchState::default());
        assert!(coordinator.identify("22").is_some());
    }

    #[test]
    fn test_subscribers_see_every_transition() {
        let phases = Rc::new(RefCell::new(Vec::new()));
        let mut coordinator = FetchCoordinator::new();
        let seen = Rc::clone(&phases);
        coordinator.subscribe(move |state: &FetchState<String>| seen.borrow_mut().push(state.phase()));

        let stale = coordinator.request("a");
        let ticket = coordinator.request("b");
        coordinator.resolve(&stale, ok(&["A"]));
        coordinator.resolve(&ticket, ok(&["B"]));

        assert_eq!(
            *phases.borrow(),
            vec![Phase::Fetching, Phase::Fetching, Phase::Success]
        );
    }

    #[test]
    fn test_reduce_is_pure() {
        let idle: FetchState<u8> = FetchState::default();
        let fetching = reduce(idle.clone(), FetchEvent::Requested);
        assert_eq!(idle.phase(), Phase::Idle);
        assert_eq!(fetching.phase(), Phase::Fetching);
        let done = reduce(fetching, FetchEvent::Resolved(Ok(1)));
        assert_eq!(done.data, Some(1));
        assert_eq!(reduce(done, FetchEvent::Reset), idle);
    }

    type Pending = oneshot::Receiver<Result<Results<String>, FetchError>>;

    /// Source whose responses are released by the test, in any order.
    struct ChannelSource {
        pending: RefCell<HashMap<String, Pending>>,
    }

    impl ChannelSource {
        fn new() -> Self {
            ChannelSource {
                pending: RefCell::new(HashMap::new()),
            }
        }

        fn expect(&self, id: &str) -> oneshot::Sender<Result<Results<String>, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().insert(id.to_string(), rx);
            tx
        }
    }

    impl ResourceSource for ChannelSource {
        type Item = String;

        async fn fetch_results(&self, id: &str) -> Result<Results<String>, FetchError> {
            let rx = self
                .pending
                .borrow_mut()
                .remove(id)
                .ok_or_else(|| FetchError::Transport(format!("unexpected load of {id}")))?;
            rx.await
                .map_err(|_| FetchError::Transport("sender dropped".into()))?
        }
    }

    #[tokio::test]
    async fn test_load_discards_superseded_response() {
        let coordinator = FetchCoordinator::shared();
        let source = ChannelSource::new();
        let tx_a = source.expect("a");
        let tx_b = source.expect("b");

        let a = coordinator.borrow_mut().request("a");
        let b = coordinator.borrow_mut().request("b");

        let (applied_a, applied_b, ()) = tokio::join!(
            load(Rc::downgrade(&coordinator), a, &source),
            load(Rc::downgrade(&coordinator), b, &source),
            async {
                tokio::task::yield_now().await;
                tx_b.send(ok(&["B"])).unwrap();
                tokio::task::yield_now().await;
                tx_a.send(ok(&["A"])).unwrap();
            }
        );

        assert!(!applied_a);
        assert!(applied_b);
        assert_eq!(coordinator.borrow().state().data.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_load_after_teardown_is_a_no_op() {
        let coordinator = FetchCoordinator::shared();
        let source = ChannelSource::new();
        let tx = source.expect("22");
        let ticket = coordinator.borrow_mut().identify("22").unwrap();
        let weak = Rc::downgrade(&coordinator);

        tx.send(ok(&["late"])).unwrap();
        drop(coordinator);
        assert!(!load(weak, ticket, &source).await);
    }

    #[tokio::test]
    async fn test_load_applies_current_response() {
        let coordinator = FetchCoordinator::shared();
        let source = ChannelSource::new();
        source.expect("22").send(ok(&[])).unwrap();
        let ticket = coordinator.borrow_mut().identify("22").unwrap();

        assert!(load(Rc::downgrade(&coordinator), ticket, &source).await);
        assert_eq!(
            coordinator.borrow().state().error,
            Some(FetchError::EmptyResult)
        );
    }
}
