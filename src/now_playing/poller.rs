//! The polling loop: fetch, compare with the previous payload, merge, notify, wait.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::now_playing::payload::Payload;
use crate::now_playing::{Cadence, NowPlayingSource};
use crate::playback::PlaybackInfo;

pub struct Poller<S, F>
where
    S: NowPlayingSource,
    F: FnMut(&PlaybackInfo),
{
    source: S,
    cadence: Cadence,
    on_update: F,
    info: PlaybackInfo,
    last_seen: Option<Payload>,
    updates: u64,
}

impl<S, F> Poller<S, F>
where
    S: NowPlayingSource,
    F: FnMut(&PlaybackInfo),
{
    pub fn new(source: S, cadence: Cadence, on_update: F) -> Self {
        Self {
            source,
            cadence,
            on_update,
            info: PlaybackInfo::default(),
            last_seen: None,
            updates: 0,
        }
    }

    #[allow(dead_code)]
    pub fn info(&self) -> &PlaybackInfo {
        &self.info
    }

    /// Number of payloads merged into the view so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    #[allow(dead_code)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one fetch cycle and returns how long to wait before the next one.
    pub async fn poll_once(&mut self) -> Duration {
        match self.source.fetch().await {
            Ok(payload) => {
                self.apply(payload);
                self.cadence.after_success(self.info.is_playing)
            }
            Err(err) => {
                let delay = self.cadence.after_failure();
                warn!(error = %err, retry_in_ms = delay.as_millis() as u64, "now-playing poll failed");
                delay
            }
        }
    }

    fn apply(&mut self, payload: Payload) -> bool {
        if self.cadence.suppresses_unchanged() && self.last_seen.as_ref() == Some(&payload) {
            trace!("payload unchanged");
            return false;
        }
        self.info.merge(&payload);
        self.last_seen = Some(payload);
        self.updates += 1;
        debug!(
            title = ?self.info.title,
            playing = self.info.is_playing,
            pct = self.info.pct,
            "now-playing updated"
        );
        (self.on_update)(&self.info);
        true
    }

    /// Polls until `shutdown` becomes `true`.
    ///
    /// A stop request abandons an in-flight request as well as the wait.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }
            let delay = tokio::select! {
                biased;
                _ = stop_requested(&mut shutdown) => break,
                delay = self.poll_once() => delay,
            };
            tokio::select! {
                biased;
                _ = stop_requested(&mut shutdown) => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
        debug!(updates = self.updates, "poller stopped");
    }
}

async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        // Sender dropped, nobody can stop us any more.
        std::future::pending::<()>().await;
    }
}
