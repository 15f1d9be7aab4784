//! Tokio driver for [`RollAnimation`].
//!
//! [`RollSequencer::start_roll`] returns immediately; the roll runs on a
//! spawned task that ticks the animation and sleeps between cosmetic draws.
//! Every mutation is published twice: to each registered [`RollObserver`],
//! then as the latest value of a [`watch`] channel for polling presenters.
//! A mutation and its delivery happen under the same lock, so deliveries
//! never interleave across rolls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::{
    DiceSource, MessageSet, RngDice, RollAnimation, RollState, Tick, ANIMATION_ITERATIONS,
};

/// Receives every published [`RollState`].
///
/// Called on whichever thread performed the write: the caller of
/// [`RollSequencer::start_roll`] for the first update, the animation task for
/// the rest. Calls are serialized with the sequencer's own state; an
/// implementation must not block and must not call back into the sequencer.
pub trait RollObserver: Send + Sync {
    fn on_update(&self, state: &RollState);
}

impl<F> RollObserver for F
where
    F: Fn(&RollState) + Send + Sync,
{
    fn on_update(&self, state: &RollState) {
        self(state)
    }
}

struct Engine {
    animation: RollAnimation,
    source: Box<dyn DiceSource>,
}

struct Shared {
    engine: Mutex<Engine>,
    published: watch::Sender<RollState>,
    observers: Mutex<Vec<Arc<dyn RollObserver>>>,
    /// Set under the engine lock when the sequencer is dropped
    torn_down: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    /// Deliver `snapshot`. Callers hold the engine lock.
    fn publish(&self, snapshot: &RollState) {
        let observers = lock(&self.observers).clone();
        for observer in &observers {
            observer.on_update(snapshot);
        }
        // Last, so `wait_idle` wakes only once every observer has the state.
        self.published.send_replace(snapshot.clone());
    }

    async fn run(self: Arc<Self>) {
        let mut guard = ResetOnExit {
            shared: &*self,
            finished: false,
        };

        loop {
            let tick = {
                let mut engine = lock(&self.engine);
                if self.torn_down.load(Ordering::SeqCst) {
                    guard.finished = true;
                    return;
                }
                let Engine { animation, source } = &mut *engine;
                let tick = animation.tick(source.as_mut());
                match tick {
                    Tick::Frame(face) => {
                        let iteration = ANIMATION_ITERATIONS - animation.remaining_frames();
                        debug!(iteration, total = ANIMATION_ITERATIONS, value = face.get(), "animation frame");
                        self.publish(animation.state());
                    }
                    Tick::Finished(outcome) => {
                        let state = animation.state();
                        info!(value = outcome.face().get(), result = state.result_message(), "roll completed");
                        self.publish(state);
                    }
                    Tick::Idle => {}
                }
                tick
            };

            match tick {
                Tick::Frame(_) => {
                    let interval = lock(&self.engine).animation.interval();
                    tokio::time::sleep(interval).await;
                }
                Tick::Finished(_) | Tick::Idle => break,
            }
        }
        guard.finished = true;
    }
}

/// Puts the engine back to idle if the animation task unwinds mid-roll.
struct ResetOnExit<'a> {
    shared: &'a Shared,
    finished: bool,
}

impl Drop for ResetOnExit<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut engine = lock(&self.shared.engine);
        if self.shared.torn_down.load(Ordering::SeqCst) {
            return;
        }
        if engine.animation.abandon() {
            warn!("animation task stopped mid-roll, resetting to idle");
            self.shared.published.send_replace(engine.animation.state().clone());
        }
    }
}

/// Runs at most one d20 roll at a time.
///
/// Dropping the sequencer abandons any roll in progress: the animation task
/// is aborted and nothing further is published.
///
/// ## Example
///
/// ```rust
/// use d20_core_view::{RollSequencer, ScriptedDice};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let dice = ScriptedDice::ending_with(3, 15, 20);
/// let sequencer = RollSequencer::with_source(dice);
///
/// assert!(sequencer.start_roll());
/// assert!(!sequencer.start_roll()); // ignored, already rolling
///
/// sequencer.wait_idle().await;
/// let state = sequencer.state();
/// assert_eq!(state.current_value().get(), 20);
/// assert_eq!(state.result_message(), "CRITICAL HIT! ⚔️");
/// # }
/// ```
pub struct RollSequencer {
    shared: Arc<Shared>,
    active: Mutex<Option<AbortHandle>>,
}

impl RollSequencer {
    /// Sequencer drawing from OS-seeded randomness with default messages.
    pub fn new() -> Self {
        Self::with_parts(RngDice::from_os_rng(), MessageSet::default())
    }

    /// Sequencer drawing from `source` with default messages.
    pub fn with_source(source: impl DiceSource + 'static) -> Self {
        Self::with_parts(source, MessageSet::default())
    }

    /// Sequencer drawing from `source` and writing `messages`.
    pub fn with_parts(source: impl DiceSource + 'static, messages: MessageSet) -> Self {
        let animation = RollAnimation::new(messages);
        let (published, _) = watch::channel(animation.state().clone());
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(Engine {
                    animation,
                    source: Box::new(source),
                }),
                published,
                observers: Mutex::new(Vec::new()),
                torn_down: AtomicBool::new(false),
            }),
            active: Mutex::new(None),
        }
    }

    /// Start a roll.
    ///
    /// Ignored while a roll is in progress, and outside a Tokio runtime; the
    /// return value tells the trigger whether this call started one.
    pub fn start_roll(&self) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no Tokio runtime, ignoring trigger");
            return false;
        };

        {
            let mut engine = lock(&self.shared.engine);
            if !engine.animation.start() {
                debug!("roll already in progress, ignoring trigger");
                return false;
            }
            debug!("roll started");
            self.shared.publish(engine.animation.state());
        }

        let handle = runtime.spawn(Arc::clone(&self.shared).run());
        *lock(&self.active) = Some(handle.abort_handle());
        true
    }

    /// Register an observer for every subsequent update.
    pub fn add_observer(&self, observer: impl RollObserver + 'static) {
        lock(&self.shared.observers).push(Arc::new(observer));
    }

    /// Receiver holding the latest published state.
    pub fn subscribe(&self) -> watch::Receiver<RollState> {
        self.shared.published.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RollState {
        self.shared.published.borrow().clone()
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.shared.published.borrow().is_rolling()
    }

    /// Resolve once no roll is in progress and every observer has seen the
    /// final state.
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `shared`, which outlives this borrow of `self`.
        let _ = rx.wait_for(|state| !state.is_rolling()).await;
    }
}

impl Default for RollSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RollSequencer {
    fn drop(&mut self) {
        {
            let _engine = lock(&self.shared.engine);
            self.shared.torn_down.store(true, Ordering::SeqCst);
        }
        if let Some(handle) = lock(&self.active).take() {
            if !handle.is_finished() {
                debug!("sequencer torn down mid-roll, abandoning animation");
            }
            handle.abort();
        }
    }
}
