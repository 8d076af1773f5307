//! Observable fetch state and the fetcher that drives it.
//!
//! A [`Fetcher`] owns exactly one [`FetchState`]. Requests run on spawned
//! tasks, but their results travel back over a channel and are applied only
//! by the owner, through [`Fetcher::settle`] or [`Fetcher::apply_pending`].
//! Every applied state is re-broadcast on a `watch` channel for subscribers.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/16/2026 - Sequence-guarded fetcher with watch-channel publishing

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::api::{CommitFiles, CommitList, CommitsClient, Endpoint};
use crate::error::FetchError;
use crate::models::RepositoryCoordinates;

/// Where a fetcher is in its request cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// What a presentation layer renders.
///
/// `error_occurred` is true iff `error` or `status_code` is set. `data`
/// survives a failed attempt so the last good result stays visible next to
/// the error.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub phase: Phase,
    pub data: Option<T>,
    pub error_occurred: bool,
    pub error: Option<FetchError>,
    pub status_code: Option<u16>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error_occurred: false,
            error: None,
            status_code: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Fetching
    }

    /// The user-facing failure message, if the last attempt failed.
    pub fn error_message(&self, prefix: &str) -> Option<String> {
        self.error_occurred
            .then(|| error_message(prefix, self.error.as_ref(), self.status_code))
    }

    fn begin(&mut self) {
        self.phase = Phase::Fetching;
        self.error_occurred = false;
        self.error = None;
        self.status_code = None;
    }

    fn succeed(&mut self, data: T) {
        self.phase = Phase::Succeeded;
        self.data = Some(data);
        self.error_occurred = false;
        self.error = None;
        self.status_code = None;
    }

    fn fail(&mut self, error: FetchError) {
        self.phase = Phase::Failed;
        self.error_occurred = true;
        // A bad status is reported by its code alone.
        match error.status_code() {
            Some(code) => self.status_code = Some(code),
            None => self.error = Some(error),
        }
    }
}

/// `prefix`, then ` Error: {error}` and ` Status code: {code}` when present.
pub fn error_message(prefix: &str, error: Option<&FetchError>, status_code: Option<u16>) -> String {
    let mut message = prefix.to_string();

    if let Some(error) = error {
        message.push_str(&format!(" Error: {}", error));
    }

    if let Some(code) = status_code {
        message.push_str(&format!(" Status code: {}", code));
    }

    message
}

struct Completion<T> {
    seq: u64,
    result: Result<T, FetchError>,
}

/// Fetches one [`Endpoint`] for one set of coordinates and publishes the
/// outcome.
pub struct Fetcher<E: Endpoint> {
    client: Arc<CommitsClient>,
    target: Option<(RepositoryCoordinates, E)>,
    state: FetchState<E::Output>,
    /// Sequence number of the most recently issued request.
    latest: u64,
    in_flight: Option<JoinHandle<()>>,
    completion_tx: mpsc::UnboundedSender<Completion<E::Output>>,
    completion_rx: mpsc::UnboundedReceiver<Completion<E::Output>>,
    published: watch::Sender<FetchState<E::Output>>,
}

pub type CommitListFetcher = Fetcher<CommitList>;
pub type CommitDetailFetcher = Fetcher<CommitFiles>;

impl<E: Endpoint> Fetcher<E> {
    pub fn new(client: Arc<CommitsClient>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (published, _) = watch::channel(FetchState::default());

        Self {
            client,
            target: None,
            state: FetchState::default(),
            latest: 0,
            in_flight: None,
            completion_tx,
            completion_rx,
            published,
        }
    }

    pub fn state(&self) -> &FetchState<E::Output> {
        &self.state
    }

    /// Receiver for every state this fetcher publishes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<E::Output>> {
        self.published.subscribe()
    }

    pub fn coordinates(&self) -> Option<&RepositoryCoordinates> {
        self.target.as_ref().map(|(coordinates, _)| coordinates)
    }

    /// Point the fetcher at a new target and fetch it.
    ///
    /// Data fetched for a different target is dropped; re-configuring the
    /// same target behaves like [`refresh`](Self::refresh).
    pub fn configure_endpoint(&mut self, coordinates: RepositoryCoordinates, endpoint: E) {
        let same_target = self
            .target
            .as_ref()
            .is_some_and(|(c, e)| *c == coordinates && *e == endpoint);
        if !same_target {
            self.state.data = None;
        }

        self.target = Some((coordinates, endpoint));
        self.start();
    }

    /// Fetch the stored target again. Does nothing before the first configure.
    pub fn refresh(&mut self) {
        if self.target.is_some() {
            self.start();
        }
    }

    /// Wait for the outstanding request, if any, and apply its result.
    pub async fn settle(&mut self) -> &FetchState<E::Output> {
        while self.state.phase == Phase::Fetching {
            match self.completion_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
        &self.state
    }

    /// Apply results that have already arrived, without waiting.
    /// Returns whether the state changed.
    pub fn apply_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn start(&mut self) {
        let Some((coordinates, endpoint)) = self.target.clone() else {
            return;
        };

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.latest += 1;
        let seq = self.latest;
        self.state.begin();

        let url = match self.client.request_url(&endpoint, &coordinates) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(%coordinates, error = %err, "not fetching");
                self.state.fail(err);
                self.publish();
                return;
            }
        };
        self.publish();

        let client = Arc::clone(&self.client);
        let tx = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.execute(&endpoint, &url).await;
            // The receiver lives exactly as long as the fetcher.
            let _ = tx.send(Completion { seq, result });
        }));
    }

    fn apply(&mut self, completion: Completion<E::Output>) -> bool {
        if completion.seq != self.latest {
            tracing::debug!(
                seq = completion.seq,
                latest = self.latest,
                "discarding stale result"
            );
            return false;
        }

        self.in_flight = None;
        match completion.result {
            Ok(data) => self.state.succeed(data),
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                self.state.fail(err);
            }
        }
        self.publish();
        true
    }

    fn publish(&self) {
        self.published.send_replace(self.state.clone());
    }
}

impl<E: Endpoint> Drop for Fetcher<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Fetcher<CommitList> {
    pub fn configure(&mut self, coordinates: RepositoryCoordinates) {
        self.configure_endpoint(coordinates, CommitList);
    }

    /// Wait for the next settings edit and re-fetch for it.
    /// Returns `false` once the settings have been dropped.
    pub async fn follow(&mut self, settings: &mut watch::Receiver<RepositoryCoordinates>) -> bool {
        if settings.changed().await.is_err() {
            return false;
        }
        let coordinates = settings.borrow_and_update().clone();
        self.configure(coordinates);
        true
    }
}

impl Fetcher<CommitFiles> {
    pub fn configure(&mut self, coordinates: RepositoryCoordinates, sha: impl Into<String>) {
        self.configure_endpoint(coordinates, CommitFiles::new(sha));
    }
}
