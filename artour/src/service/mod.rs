//! Tour engine - the owning coordinator
//!
//! [`TourEngine`] owns all slot and scene state and runs the pipeline:
//! sensor events arrive on a channel, the position tracker decides when
//! to reload, the directory client fetches, the store merges, the
//! slotter recomputes sector assignments and the scene binding
//! reconciles them against the rendered entities.
//!
//! # Threading
//!
//! All mutation of the POI store, slot assignments and entity bindings
//! happens inside the single event-processing task started by
//! [`TourEngine::start`] - a single-writer discipline, so no mutation
//! ever races. Sensor callbacks only enqueue events and return
//! immediately. The directory fetch is the only await point and is
//! awaited inline in the loop, which gives the ordering guarantee:
//! events are handled strictly in arrival order, and the re-slot pass
//! for reload N always observes the store state including fetch N. A
//! second reload cannot start while a prior pass is still in flight.
//!
//! Other threads read state snapshots through the engine's query
//! methods, and can subscribe to a broadcast of reconcile summaries.

mod error;

pub use error::EngineError;

use std::sync::{Arc, RwLock};

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::directory::DirectoryClient;
use crate::geo::Coordinate;
use crate::poi::{Poi, PoiStore};
use crate::scene::{EntityId, ReconcileSummary, SceneBinding, SceneRenderer};
use crate::slotter::SectorSlotter;
use crate::tracker::{PositionTracker, ReloadDecision, SensorEvent, UserState};

/// Configuration for the tour engine.
#[derive(Debug, Clone)]
pub struct TourEngineConfig {
    /// Minimum movement in meters before POIs are refetched.
    pub reload_distance_m: f64,

    /// Maximum distance in meters for a POI to be displayed.
    pub max_poi_distance_m: f64,

    /// Channel capacity for reconcile summary broadcasts.
    pub summary_channel_capacity: usize,
}

impl Default for TourEngineConfig {
    fn default() -> Self {
        Self {
            reload_distance_m: crate::tracker::DEFAULT_RELOAD_DISTANCE_M,
            max_poi_distance_m: crate::slotter::DEFAULT_MAX_POI_DISTANCE_M,
            summary_channel_capacity: 16,
        }
    }
}

/// Snapshot of the engine's observable state.
#[derive(Debug, Clone, Default)]
pub struct TourStatus {
    /// The user's tracked position/heading state.
    pub user: UserState,

    /// Number of distinct POIs loaded this session.
    pub loaded_pois: usize,

    /// Number of marker entities currently in the scene.
    pub displayed_pois: usize,

    /// The POI selected via the last resolved tap, if any.
    pub selected: Option<Poi>,

    /// The most recent absorbed failure, if the last cycle had one.
    pub last_error: Option<EngineError>,
}

/// Mutable engine state, confined to the event-processing task for
/// writes.
struct EngineState {
    tracker: PositionTracker,
    store: PoiStore,
    binding: SceneBinding,
    selected: Option<Poi>,
    last_error: Option<EngineError>,
}

/// The owning coordinator for the AR tour core.
pub struct TourEngine<C: DirectoryClient> {
    /// Thread-safe state. Written only by the event loop (and the
    /// selection resolver); read by query methods from any thread.
    state: Arc<RwLock<EngineState>>,

    /// Directory fetch collaborator.
    directory: C,

    /// The placement algorithm.
    slotter: SectorSlotter,

    /// Broadcast channel for reconcile summaries.
    summary_tx: broadcast::Sender<ReconcileSummary>,

    /// Cancellation for the event loop.
    cancel: CancellationToken,
}

impl<C: DirectoryClient> TourEngine<C> {
    /// Create an engine over a directory client and a scene renderer.
    pub fn new(
        directory: C,
        renderer: Arc<dyn SceneRenderer>,
        config: TourEngineConfig,
    ) -> Self {
        let (summary_tx, _) = broadcast::channel(config.summary_channel_capacity);

        Self {
            state: Arc::new(RwLock::new(EngineState {
                tracker: PositionTracker::new(config.reload_distance_m),
                store: PoiStore::new(),
                binding: SceneBinding::new(renderer),
                selected: None,
                last_error: None,
            })),
            directory,
            slotter: SectorSlotter::new(config.max_poi_distance_m),
            summary_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Start the engine's event-processing loop.
    ///
    /// Spawns the single task that owns all state mutation. The task
    /// runs until the sender side of `rx` is dropped or the engine is
    /// shut down.
    pub fn start(
        self: Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<SensorEvent>,
    ) -> tokio::task::JoinHandle<()>
    where
        C: 'static,
    {
        tokio::spawn(async move {
            info!(client = self.directory.name(), "Tour engine started");

            loop {
                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        debug!("Tour engine cancelled");
                        break;
                    }
                    event = rx.recv() => {
                        match event {
                            Some(event) => self.process_event(event).await,
                            None => {
                                debug!("Sensor channel closed, stopping engine");
                                break;
                            }
                        }
                    }
                }
            }
        })
    }

    /// Request the event loop to stop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Process a single sensor event.
    async fn process_event(&self, event: SensorEvent) {
        match event {
            SensorEvent::LocationChanged(location) => {
                let decision = match self.state.write() {
                    Ok(mut state) => state.tracker.on_location_changed(location),
                    Err(_) => return,
                };
                if decision == ReloadDecision::Reload {
                    self.reload(location).await;
                }
            }
            SensorEvent::HeadingChanged(heading) => {
                if let Ok(mut state) = self.state.write() {
                    state.tracker.on_heading_changed(heading);
                }
            }
            SensorEvent::SensorFailed(message) => {
                warn!(%message, "Sensor service reported a failure");
                if let Ok(mut state) = self.state.write() {
                    state.last_error = Some(EngineError::Sensor(message));
                }
            }
        }
    }

    /// Run one reload cycle: fetch, merge, re-slot, reconcile.
    ///
    /// The fetch is awaited without holding the state lock; the
    /// merge/slot/reconcile section then runs synchronously under one
    /// write lock.
    async fn reload(&self, location: Coordinate) {
        let fetched = self.directory.fetch_nearby(location).await;

        let batch = match fetched {
            Ok(batch) => batch,
            Err(error) => {
                warn!(%location, %error, "Reload cycle skipped");
                if let Ok(mut state) = self.state.write() {
                    state.last_error = Some(EngineError::Fetch {
                        message: error.to_string(),
                        retryable: error.is_retryable(),
                    });
                }
                return;
            }
        };

        let summary = match self.state.write() {
            Ok(mut state) => {
                let added = state.store.merge(batch);
                let assignments = self.slotter.assign(&location, state.store.all_loaded());
                let summary = state.binding.reconcile(&assignments);
                state.last_error = None;

                info!(
                    %location,
                    new_pois = added,
                    loaded = state.store.len(),
                    displayed = state.binding.bound_len(),
                    added = summary.added,
                    removed = summary.removed,
                    "Reload cycle completed"
                );
                summary
            }
            Err(_) => return,
        };

        // Ignore errors - no subscribers is OK
        let _ = self.summary_tx.send(summary);
    }

    /// Resolve a tapped entity to its POI and record it as selected.
    ///
    /// Called from the rendering collaborator's tap callback. Returns
    /// `None` (and clears the selection) for entities no longer bound.
    pub fn resolve_selection(&self, entity: EntityId) -> Option<Poi> {
        let mut state = self.state.write().ok()?;
        let poi = state.binding.resolve_selection(entity);
        state.selected = poi.clone();
        poi
    }

    /// The POI selected via the last resolved tap.
    pub fn selected_poi(&self) -> Option<Poi> {
        self.state.read().ok().and_then(|s| s.selected.clone())
    }

    /// The most recent absorbed failure, if the last cycle had one.
    pub fn last_error(&self) -> Option<EngineError> {
        self.state.read().ok().and_then(|s| s.last_error.clone())
    }

    /// The user's most recent heading, if known.
    pub fn heading(&self) -> Option<f32> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.tracker.current_heading())
    }

    /// The POI currently displayed in a sector, if any.
    pub fn poi_in_slot(&self, slot: usize) -> Option<Poi> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.binding.poi_in_slot(slot).cloned())
    }

    /// Snapshot of the engine's observable state.
    pub fn status(&self) -> TourStatus {
        self.state
            .read()
            .map(|s| TourStatus {
                user: s.tracker.user_state(),
                loaded_pois: s.store.len(),
                displayed_pois: s.binding.bound_len(),
                selected: s.selected.clone(),
                last_error: s.last_error.clone(),
            })
            .unwrap_or_default()
    }

    /// Subscribe to reconcile summaries published after each pass.
    pub fn subscribe(&self) -> broadcast::Receiver<ReconcileSummary> {
        self.summary_tx.subscribe()
    }
}
