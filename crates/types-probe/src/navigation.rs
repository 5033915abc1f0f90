//! In-page navigation handling.
//!
//! The watcher receives navigation events over a channel and starts one
//! resolution per event. Resolutions may overlap; each event bumps a
//! generation counter and a resolution only renders if no newer navigation
//! happened while it was waiting on the registry. Older results are dropped.

use crate::error::PresentationError;
use crate::outcome::ResolutionOutcome;
use crate::presentation::{Annotation, HostPage, Presenter};
use crate::resolver::TypeSupportResolver;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use types_probe_npm::PackumentSource;

/// A change of the page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Initial page load.
    Load(String),
    /// Programmatic history change (`pushState`/`replaceState`).
    PushState(String),
    /// Back/forward navigation.
    PopState(String),
}

impl NavigationEvent {
    pub fn pathname(&self) -> &str {
        match self {
            Self::Load(path) | Self::PushState(path) | Self::PopState(path) => path,
        }
    }
}

/// Extracts the path from a full URL; anything that is not an absolute URL
/// is taken to be a path already.
///
/// # Examples
///
/// ```
/// use types_probe::navigation::location_pathname;
///
/// assert_eq!(location_pathname("https://www.npmjs.com/package/foo?tab=readme"), "/package/foo");
/// assert_eq!(location_pathname("/package/@scope/foo"), "/package/@scope/foo");
/// ```
pub fn location_pathname(location: &str) -> String {
    match reqwest::Url::parse(location) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => location.to_string(),
    }
}

/// What happened to the resolution started for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderReport {
    Rendered {
        generation: u64,
        pathname: String,
        annotation: Annotation,
    },
    /// A newer navigation superseded this one before it finished.
    Discarded { generation: u64, pathname: String },
    Failed {
        generation: u64,
        pathname: String,
        error: PresentationError,
    },
}

impl RenderReport {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Rendered { generation, .. }
            | Self::Discarded { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Shared state every resolution task needs.
struct RenderContext<S, P> {
    resolver: Arc<TypeSupportResolver<S>>,
    presenter: Arc<Presenter>,
    page: Arc<Mutex<P>>,
    generation: Arc<AtomicU64>,
}

impl<S, P> Clone for RenderContext<S, P> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            presenter: Arc::clone(&self.presenter),
            page: Arc::clone(&self.page),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<S, P> RenderContext<S, P>
where
    S: PackumentSource + 'static,
    P: HostPage + 'static,
{
    async fn resolve_and_render(
        self,
        generation: u64,
        event: NavigationEvent,
        reports: mpsc::UnboundedSender<RenderReport>,
    ) {
        let pathname = event.pathname().to_string();
        let outcome: ResolutionOutcome = self.resolver.resolve(&pathname).await;

        let mut page = self.page.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding stale resolution #{} for {}", generation, pathname);
            let _ = reports.send(RenderReport::Discarded {
                generation,
                pathname,
            });
            return;
        }

        let report = match self.presenter.render(&mut *page, &outcome) {
            Ok(annotation) => RenderReport::Rendered {
                generation,
                pathname,
                annotation,
            },
            Err(error) => RenderReport::Failed {
                generation,
                pathname,
                error,
            },
        };
        let _ = reports.send(report);
    }
}

/// Re-runs resolution on every navigation and renders into the page.
pub struct NavigationWatcher<S, P> {
    context: RenderContext<S, P>,
}

impl<S, P> NavigationWatcher<S, P>
where
    S: PackumentSource + 'static,
    P: HostPage + 'static,
{
    pub fn new(
        resolver: Arc<TypeSupportResolver<S>>,
        presenter: Presenter,
        page: Arc<Mutex<P>>,
    ) -> Self {
        Self {
            context: RenderContext {
                resolver,
                presenter: Arc::new(presenter),
                page,
                generation: Arc::new(AtomicU64::new(0)),
            },
        }
    }

    /// Starts listening for navigation events.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> NavigationHandle {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(event_rx, report_tx));

        NavigationHandle {
            events: Some(event_tx),
            reports: report_rx,
            task: Some(task),
        }
    }

    async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<NavigationEvent>,
        reports: mpsc::UnboundedSender<RenderReport>,
    ) {
        let mut inflight = JoinSet::new();

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let generation = self.context.generation.fetch_add(1, Ordering::SeqCst) + 1;
                    tracing::info!("navigation #{} to {}", generation, event.pathname());
                    inflight.spawn(
                        self.context
                            .clone()
                            .resolve_and_render(generation, event, reports.clone()),
                    );
                }
                Some(_) = inflight.join_next(), if !inflight.is_empty() => {}
            }
        }

        tracing::debug!("navigation watcher stopped, {} resolutions pending", inflight.len());
        inflight.shutdown().await;
    }
}

/// Handle to a running [`NavigationWatcher`].
pub struct NavigationHandle {
    events: Option<mpsc::UnboundedSender<NavigationEvent>>,
    reports: mpsc::UnboundedReceiver<RenderReport>,
    task: Option<JoinHandle<()>>,
}

impl NavigationHandle {
    /// Delivers a navigation event. Returns `false` once the watcher is stopped.
    pub fn navigate(&self, event: NavigationEvent) -> bool {
        self.events
            .as_ref()
            .is_some_and(|events| events.send(event).is_ok())
    }

    /// Waits for the next report; `None` once the watcher has stopped and
    /// every report has been drained.
    pub async fn next_report(&mut self) -> Option<RenderReport> {
        self.reports.recv().await
    }

    /// Stops listening and cancels resolutions still in flight.
    ///
    /// Reports produced before stopping can still be drained afterwards.
    pub async fn stop(&mut self) {
        self.events.take();
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(e) = task.await {
            tracing::warn!("navigation watcher task ended abnormally: {}", e);
        }
    }
}
