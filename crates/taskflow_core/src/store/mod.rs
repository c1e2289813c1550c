//! Unidirectional state container.
//!
//! # Responsibility
//! - Hold the application state behind a single writer lock.
//! - Apply pure reducers to dispatched actions.
//! - Notify subscribers after each committed transition.
//!
//! # Invariants
//! - Reducers never mutate their input state.
//! - Subscribers run after the state lock is released, once per dispatch,
//!   and observe the state committed by that dispatch.

pub mod auth_state;
pub mod effects;
pub mod project_state;
pub mod selectors;
pub mod task_state;

use self::auth_state::{reduce_auth, AuthAction, AuthState};
use self::project_state::{reduce_projects, ProjectAction, ProjectState};
use self::task_state::{reduce_tasks, TaskAction, TaskState};
use log::debug;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pure state transition function.
pub type Reducer<S, A> = fn(&S, &A) -> S;

type Subscriber<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Actions that can name themselves in logs.
pub trait ActionName {
    fn name(&self) -> &'static str;
}

/// Generic store over state `S` and action `A`.
pub struct Store<S, A> {
    state: Mutex<S>,
    reducer: Reducer<S, A>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber<S>)>>,
    next_subscription: AtomicU64,
}

impl<S: Clone, A: ActionName> Store<S, A> {
    pub fn new(initial: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state: Mutex::new(initial),
            reducer,
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> S {
        self.state.lock().clone()
    }

    /// Reads the current state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.state.lock())
    }

    /// Applies `action` and notifies subscribers with the committed state.
    pub fn dispatch(&self, action: A) {
        let committed = {
            let mut state = self.state.lock();
            let next = (self.reducer)(&state, &action);
            *state = next.clone();
            next
        };
        debug!("event=dispatch module=store status=ok action={}", action.name());

        let subscribers: Vec<Subscriber<S>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&committed);
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(&S) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(subscriber)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// Combined application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub tasks: TaskState,
    pub projects: ProjectState,
    pub auth: AuthState,
}

/// Any action the application store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Task(TaskAction),
    Project(ProjectAction),
    Auth(AuthAction),
}

impl ActionName for AppAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Task(action) => action.name(),
            Self::Project(action) => action.name(),
            Self::Auth(action) => action.name(),
        }
    }
}

impl From<TaskAction> for AppAction {
    fn from(action: TaskAction) -> Self {
        Self::Task(action)
    }
}

impl From<ProjectAction> for AppAction {
    fn from(action: ProjectAction) -> Self {
        Self::Project(action)
    }
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

/// Routes each action to the slice reducer that owns it.
pub fn reduce_app(state: &AppState, action: &AppAction) -> AppState {
    match action {
        AppAction::Task(action) => AppState {
            tasks: reduce_tasks(&state.tasks, action),
            ..state.clone()
        },
        AppAction::Project(action) => AppState {
            projects: reduce_projects(&state.projects, action),
            ..state.clone()
        },
        AppAction::Auth(action) => AppState {
            auth: reduce_auth(&state.auth, action),
            ..state.clone()
        },
    }
}

pub type AppStore = Store<AppState, AppAction>;

impl AppStore {
    /// Empty application store.
    pub fn app() -> Self {
        Store::new(AppState::default(), reduce_app)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionName, Store};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
    }

    impl ActionName for CounterAction {
        fn name(&self) -> &'static str {
            "counter/add"
        }
    }

    fn reduce(state: &i64, action: &CounterAction) -> i64 {
        match action {
            CounterAction::Add(n) => state + n,
        }
    }

    #[test]
    fn subscribers_see_each_committed_state_once() {
        let store = Store::new(0_i64, reduce);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |state| sink.lock().push(*state));

        store.dispatch(CounterAction::Add(2));
        store.dispatch(CounterAction::Add(3));

        assert_eq!(*seen.lock(), vec![2, 5]);
        assert_eq!(store.snapshot(), 5);
    }

    #[test]
    fn subscriber_may_read_the_store_during_notification() {
        let store = Arc::new(Store::new(0_i64, reduce));
        let observed = Arc::new(AtomicUsize::new(0));
        let reader = Arc::clone(&store);
        let counter = Arc::clone(&observed);
        store.subscribe(move |state| {
            assert_eq!(reader.snapshot(), *state);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        store.dispatch(CounterAction::Add(1));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = Store::new(0_i64, reduce);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        store.dispatch(CounterAction::Add(1));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(CounterAction::Add(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }
}
