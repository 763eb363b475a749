//! Session mirror and theme synchronizer.
//!
//! ARCHITECTURE
//! ============
//! One [`SyncEngine`] future owns all session and theme state. Auth-provider
//! notifications ([`AuthFeed`]) and user theme picks ([`ThemeHandle`]) arrive
//! on a single unbounded FIFO channel, so inputs are never dropped or
//! reordered. Backend calls run concurrently inside the same future and report
//! back as completions; only the engine loop mutates state.
//!
//! THEME STATES
//! ============
//! - Idle: no session. Cell holds the cached or default theme; edits touch the
//!   surface and local cache only.
//! - Loading: session just started; the user document is being fetched. A
//!   remote theme is adopted unless the user edited meanwhile, in which case
//!   the edit wins and is written back.
//! - Synced: each change (by value) is applied, merged into the user document,
//!   then cached locally. Remote writes are serialised and coalesced.
//! - Reset: on sign-out the cell and cache return to the default; the remote
//!   document is left alone.
//!
//! CANCELLATION
//! ============
//! Every backend call is abortable and tied to the session generation. A
//! session change aborts the previous generation's calls, and completions from
//! a stale generation are dropped. Abort handles are keyed by task id and
//! released as soon as their operation completes.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::rc::Rc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tracing::{debug, info, warn};

use crate::cell::StateCell;
use crate::config::DEFAULT_THEME_STORAGE_KEY;
use crate::document::{DocPath, DocumentStore, FieldValue, Fields, THEME_FIELD, WriteMode};
use crate::error::{StoreError, SyncError};
use crate::platform::{Clock, LocalStore, ThemeSurface};
use crate::profile::{ProvisionOutcome, ensure_profile};
use crate::session::{AuthFeed, Session, SyncEvent};
use crate::theme::ThemePreference;

/// Theme defaults and the local-cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub default_theme: ThemePreference,
    pub theme_storage_key: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self { default_theme: ThemePreference::default(), theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_owned() }
    }
}

/// Backends and platform services the engine talks to.
#[derive(Clone)]
pub struct SyncDeps {
    pub documents: Rc<dyn DocumentStore>,
    pub local: Rc<dyn LocalStore>,
    pub surface: Rc<dyn ThemeSurface>,
    pub clock: Rc<dyn Clock>,
}

/// Cells the engine publishes into; the UI reads them.
#[derive(Clone)]
pub struct SyncCells {
    pub session: Rc<dyn StateCell<Option<Session>>>,
    pub theme: Rc<dyn StateCell<ThemePreference>>,
}

/// Entry point for user theme edits.
#[derive(Clone, Debug)]
pub struct ThemeHandle {
    tx: UnboundedSender<SyncEvent>,
}

impl ThemeHandle {
    /// Request a theme change. Applied in order with auth events.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineStopped`] once the engine has shut down.
    pub fn select(&self, preference: ThemePreference) -> Result<(), SyncError> {
        self.tx
            .unbounded_send(SyncEvent::ThemeSelected(preference))
            .map_err(|_| SyncError::EngineStopped)
    }
}

/// Background operation kinds, for failure reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ProvisionProfile,
    LoadTheme,
    SaveTheme,
    CacheTheme,
}

/// A background failure surfaced to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncFailure {
    pub operation: Operation,
    pub uid: Option<String>,
    pub error: SyncError,
}

enum Phase {
    Idle,
    Loading { session: Session, edited: bool },
    Synced { session: Session },
}

enum Completion {
    Provisioned { generation: u64, uid: String, result: Result<ProvisionOutcome, StoreError> },
    ThemeLoaded { generation: u64, uid: String, result: Result<Option<String>, StoreError> },
    ThemeSaved { generation: u64, uid: String, theme: ThemePreference, result: Result<(), StoreError> },
    Cancelled { operation: Operation, uid: String },
}

/// Engine-assigned id of one background operation.
type TaskId = u64;

enum Step {
    Completed((TaskId, Completion)),
    Event(Option<SyncEvent>),
}

type Pending = FuturesUnordered<LocalBoxFuture<'static, (TaskId, Completion)>>;

/// Reconciles auth sessions, profile provisioning and theme persistence.
pub struct SyncEngine {
    events: UnboundedReceiver<SyncEvent>,
    state: EngineState,
}

struct EngineState {
    deps: SyncDeps,
    cells: SyncCells,
    settings: SyncSettings,
    phase: Phase,
    generation: u64,
    session_tasks: HashMap<TaskId, AbortHandle>,
    next_task: TaskId,
    /// Uids whose profile was provisioned or is being provisioned.
    provisioned: HashSet<String>,
    /// Uid of the in-flight provisioning for the current session.
    provisioning: Option<String>,
    save_in_flight: bool,
    queued_save: Option<ThemePreference>,
    failures: Option<UnboundedSender<SyncFailure>>,
}

impl SyncEngine {
    /// Build an engine plus its two input handles.
    #[must_use]
    pub fn new(deps: SyncDeps, cells: SyncCells, settings: SyncSettings) -> (Self, AuthFeed, ThemeHandle) {
        let (tx, events) = mpsc::unbounded();
        let state = EngineState {
            deps,
            cells,
            settings,
            phase: Phase::Idle,
            generation: 0,
            session_tasks: HashMap::new(),
            next_task: 0,
            provisioned: HashSet::new(),
            provisioning: None,
            save_in_flight: false,
            queued_save: None,
            failures: None,
        };
        let feed = AuthFeed::new(tx.clone());
        (Self { events, state }, feed, ThemeHandle { tx })
    }

    /// Subscribe to background failures. Replaces any earlier subscriber.
    pub fn failures(&mut self) -> UnboundedReceiver<SyncFailure> {
        let (tx, rx) = mpsc::unbounded();
        self.state.failures = Some(tx);
        rx
    }

    /// Paint the cached theme, then process inputs until the feed is closed and
    /// in-flight work has settled.
    pub async fn run(self) {
        let Self { mut events, mut state } = self;
        let mut pending: Pending = FuturesUnordered::new();

        state.bootstrap();

        loop {
            let step = futures::select_biased! {
                done = pending.select_next_some() => Step::Completed(done),
                event = events.next() => Step::Event(event),
            };
            match step {
                Step::Completed((task, done)) => state.on_finished(task, done, &mut pending),
                Step::Event(Some(event)) => state.on_event(event, &mut pending),
                Step::Event(None) => break,
            }
        }

        while let Some((task, done)) = pending.next().await {
            state.on_finished(task, done, &mut pending);
        }
        info!("sync engine stopped");
    }
}

impl EngineState {
    fn bootstrap(&mut self) {
        let preference = self.cached_theme().unwrap_or(self.settings.default_theme);
        self.cells.theme.set(preference);
        self.apply(preference);
    }

    fn cached_theme(&self) -> Option<ThemePreference> {
        let raw = self.deps.local.get(&self.settings.theme_storage_key)?;
        match raw.parse::<ThemePreference>() {
            Ok(preference) => Some(preference),
            Err(e) => {
                warn!(error = %e, "ignoring cached theme");
                None
            }
        }
    }

    fn apply(&self, preference: ThemePreference) {
        let resolved = preference.resolve(self.deps.surface.prefers_dark());
        self.deps.surface.apply(resolved);
        debug!(preference = %preference, resolved = %resolved, "theme applied");
    }

    fn cache(&self, preference: ThemePreference, uid: Option<&str>) {
        if let Err(e) = self.deps.local.set(&self.settings.theme_storage_key, preference.as_str()) {
            self.report(Operation::CacheTheme, uid, e);
        }
    }

    fn report(&self, operation: Operation, uid: Option<&str>, error: SyncError) {
        warn!(?operation, uid = uid.unwrap_or("-"), error = %error, "sync operation failed");
        if let Some(tx) = &self.failures {
            let failure = SyncFailure { operation, uid: uid.map(str::to_owned), error };
            if tx.unbounded_send(failure).is_err() {
                debug!("failure subscriber gone");
            }
        }
    }

    fn active_uid(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { session, .. } | Phase::Synced { session } => Some(&session.uid),
        }
    }

    // -------------------------------------------------------------------------
    // events
    // -------------------------------------------------------------------------

    fn on_event(&mut self, event: SyncEvent, pending: &mut Pending) {
        match event {
            SyncEvent::Auth(Some(session)) => self.on_sign_in(session, pending),
            SyncEvent::Auth(None) => self.on_sign_out(),
            SyncEvent::ThemeSelected(preference) => self.on_theme_selected(preference, pending),
        }
    }

    fn on_sign_in(&mut self, session: Session, pending: &mut Pending) {
        if self.active_uid() == Some(session.uid.as_str()) {
            debug!(uid = %session.uid, "session refreshed");
            if let Phase::Loading { session: current, .. } | Phase::Synced { session: current } = &mut self.phase {
                *current = session.clone();
            }
            self.cells.session.set(Some(session));
            return;
        }

        self.end_session();
        info!(uid = %session.uid, generation = self.generation, "session started");
        self.cells.session.set(Some(session.clone()));

        if self.provisioned.insert(session.uid.clone()) {
            self.provisioning = Some(session.uid.clone());
            let store = Rc::clone(&self.deps.documents);
            let created_at = self.deps.clock.now();
            let generation = self.generation;
            let owner = session.clone();
            self.spawn(pending, Operation::ProvisionProfile, &session.uid, async move {
                let result = ensure_profile(store.as_ref(), &owner, created_at).await;
                Completion::Provisioned { generation, uid: owner.uid, result }
            });
        }

        let store = Rc::clone(&self.deps.documents);
        let generation = self.generation;
        let uid = session.uid.clone();
        self.spawn(pending, Operation::LoadTheme, &session.uid, async move {
            let result = store
                .get(&DocPath::user(&uid))
                .await
                .map(|doc| doc.and_then(|d| d.get_str(THEME_FIELD).map(str::to_owned)));
            Completion::ThemeLoaded { generation, uid, result }
        });

        self.phase = Phase::Loading { session, edited: false };
    }

    fn on_sign_out(&mut self) {
        let was_active = !matches!(self.phase, Phase::Idle);
        self.end_session();
        self.cells.session.set(None);

        if was_active {
            info!(generation = self.generation, "session ended");
            let default = self.settings.default_theme;
            self.cells.theme.set(default);
            self.cache(default, None);
            self.apply(default);
        } else {
            debug!("no session");
        }
    }

    fn on_theme_selected(&mut self, preference: ThemePreference, pending: &mut Pending) {
        if self.cells.theme.get() == preference {
            debug!(preference = %preference, "theme unchanged");
            return;
        }
        self.cells.theme.set(preference);
        self.apply(preference);

        let synced_uid = match &mut self.phase {
            Phase::Idle => None,
            Phase::Loading { session, edited } => {
                *edited = true;
                let uid = session.uid.clone();
                self.cache(preference, Some(&uid));
                return;
            }
            Phase::Synced { session } => Some(session.uid.clone()),
        };
        match synced_uid {
            Some(uid) => self.request_save(preference, uid, pending),
            None => self.cache(preference, None),
        }
    }

    /// Abort the current session's work and start a new generation.
    fn end_session(&mut self) {
        for (_, handle) in self.session_tasks.drain() {
            handle.abort();
        }
        if let Some(uid) = self.provisioning.take() {
            self.provisioned.remove(&uid);
        }
        self.save_in_flight = false;
        self.queued_save = None;
        self.phase = Phase::Idle;
        self.generation += 1;
    }

    // -------------------------------------------------------------------------
    // background work
    // -------------------------------------------------------------------------

    fn spawn<F>(&mut self, pending: &mut Pending, operation: Operation, uid: &str, work: F)
    where
        F: Future<Output = Completion> + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let task = self.next_task;
        self.next_task += 1;
        self.session_tasks.insert(task, handle);
        let uid = uid.to_owned();
        pending.push(
            Abortable::new(work, registration)
                .map(move |outcome| (task, outcome.unwrap_or_else(|_| Completion::Cancelled { operation, uid })))
                .boxed_local(),
        );
    }

    fn request_save(&mut self, preference: ThemePreference, uid: String, pending: &mut Pending) {
        if self.save_in_flight || self.provisioning.is_some() {
            debug!(preference = %preference, "theme save queued");
            self.queued_save = Some(preference);
            return;
        }
        self.save_in_flight = true;

        let store = Rc::clone(&self.deps.documents);
        let generation = self.generation;
        let mut fields = Fields::new();
        fields.insert(THEME_FIELD.to_owned(), FieldValue::from(preference.as_str()));
        let owner = uid.clone();
        self.spawn(pending, Operation::SaveTheme, &uid, async move {
            let result = store.set(&DocPath::user(&owner), fields, WriteMode::Merge).await;
            Completion::ThemeSaved { generation, uid: owner, theme: preference, result }
        });
    }

    fn flush_queued_save(&mut self, pending: &mut Pending) {
        let Phase::Synced { session } = &self.phase else {
            return;
        };
        let uid = session.uid.clone();
        if let Some(preference) = self.queued_save.take() {
            self.request_save(preference, uid, pending);
        }
    }

    // -------------------------------------------------------------------------
    // completions
    // -------------------------------------------------------------------------

    fn on_finished(&mut self, task: TaskId, done: Completion, pending: &mut Pending) {
        self.session_tasks.remove(&task);
        self.on_completion(done, pending);
    }

    fn on_completion(&mut self, done: Completion, pending: &mut Pending) {
        match done {
            Completion::Cancelled { operation, uid } => {
                debug!(?operation, %uid, "operation cancelled");
            }
            Completion::Provisioned { generation, uid, result } => {
                if generation != self.generation {
                    return;
                }
                self.provisioning = None;
                match result {
                    Ok(outcome) => debug!(%uid, ?outcome, "profile provisioning finished"),
                    Err(e) => {
                        self.provisioned.remove(&uid);
                        self.report(Operation::ProvisionProfile, Some(&uid), e.into());
                    }
                }
                self.flush_queued_save(pending);
            }
            Completion::ThemeLoaded { generation, uid, result } => {
                if generation != self.generation {
                    return;
                }
                self.on_theme_loaded(uid, result, pending);
            }
            Completion::ThemeSaved { generation, uid, theme, result } => {
                if generation != self.generation {
                    return;
                }
                self.save_in_flight = false;
                match result {
                    Ok(()) => debug!(%uid, theme = %theme, "theme saved"),
                    Err(e) => self.report(Operation::SaveTheme, Some(&uid), e.into()),
                }
                self.cache(theme, Some(&uid));
                self.flush_queued_save(pending);
            }
        }
    }

    fn on_theme_loaded(&mut self, uid: String, result: Result<Option<String>, StoreError>, pending: &mut Pending) {
        let edited = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Loading { session, edited } => {
                self.phase = Phase::Synced { session };
                edited
            }
            other => {
                self.phase = other;
                return;
            }
        };

        let current = self.cells.theme.get();
        if edited {
            debug!(%uid, preference = %current, "theme edited while loading; keeping local choice");
            self.request_save(current, uid, pending);
            return;
        }

        match result {
            Ok(Some(raw)) => match raw.parse::<ThemePreference>() {
                Ok(remote) => {
                    debug!(%uid, preference = %remote, "adopting remote theme");
                    self.cells.theme.set(remote);
                    self.cache(remote, Some(&uid));
                    self.apply(remote);
                }
                Err(e) => {
                    warn!(%uid, error = %e, "ignoring remote theme");
                    self.apply(current);
                }
            },
            Ok(None) => self.apply(current),
            Err(e) => {
                self.report(Operation::LoadTheme, Some(&uid), e.into());
                self.apply(current);
            }
        }
    }
}
