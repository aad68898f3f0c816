//! Deferred image loading for the fallback strategy
//!
//! A [`DeferredImage`] starts `Pending` and shows a loading indicator. Once the
//! element has been continuously visible for the debounce window it moves to
//! `VisibleLoading` and hands out a [`LoadTicket`], which is the host's cue to
//! fetch the image. Completing that ticket moves it to `Loaded`, which is
//! terminal: scrolling away afterwards does not unload the image.
//!
//! The host drives time by passing monotonic [`Instant`]s. After
//! [`DeferredImage::dispose`] every signal is ignored, including a load that
//! finishes late.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::render::{DeferredImageParams, LoaderHint};

/// Time an element must stay visible before its image is fetched
pub const DEBOUNCE_MS: u64 = 1000;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a deferred image. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Not yet visible long enough, nothing fetched
    Pending,
    /// Fetch issued, placeholder still shown
    VisibleLoading,
    /// Image shown
    Loaded,
}

/// Handle for one issued fetch; only valid for the instance that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    instance: u64,
}

/// What the presentation layer should draw right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation<'a> {
    Placeholder { loader: LoaderHint, alt: &'a str },
    Actual { src: &'a str, alt: &'a str },
}

/// Lazily loaded image bound to one mounted element.
#[derive(Debug)]
pub struct DeferredImage {
    params: DeferredImageParams,
    instance: u64,
    state: LoadState,
    debounce: Duration,
    visible_since: Option<Instant>,
    disposed: bool,
}

impl DeferredImage {
    pub fn new(params: DeferredImageParams) -> Self {
        let debounce = Duration::from_millis(params.debounce_ms);
        Self {
            params,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            state: LoadState::Pending,
            debounce,
            visible_since: None,
            disposed: false,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn params(&self) -> &DeferredImageParams {
        &self.params
    }

    /// Record a visibility change reported by the host.
    ///
    /// Leaving the viewport while pending restarts the debounce window.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if self.disposed || self.state != LoadState::Pending {
            return;
        }
        match (visible, self.visible_since) {
            (true, None) => {
                debug!(src = %self.params.src, "deferred image became visible");
                self.visible_since = Some(now);
            }
            (false, Some(_)) => {
                debug!(src = %self.params.src, "deferred image left viewport before debounce");
                self.visible_since = None;
            }
            _ => {}
        }
    }

    /// Advance the debounce timer.
    ///
    /// Returns a ticket exactly once, when the element has been visible for
    /// the whole window. The host should start fetching `src` at that point.
    pub fn poll(&mut self, now: Instant) -> Option<LoadTicket> {
        if self.disposed || self.state != LoadState::Pending {
            return None;
        }
        let since = self.visible_since?;
        if now.saturating_duration_since(since) < self.debounce {
            return None;
        }

        self.state = LoadState::VisibleLoading;
        debug!(src = %self.params.src, "deferred image fetch issued");
        Some(LoadTicket { instance: self.instance })
    }

    /// Commit a finished fetch. Returns whether the image is now shown.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if self.disposed {
            warn!(src = %self.params.src, "dropping image load for disposed element");
            return false;
        }
        if ticket.instance != self.instance || self.state != LoadState::VisibleLoading {
            return false;
        }
        self.state = LoadState::Loaded;
        debug!(src = %self.params.src, "deferred image loaded");
        true
    }

    /// Unmount the element. Later signals and results are discarded.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.visible_since = None;
    }

    pub fn presentation(&self) -> Presentation<'_> {
        match self.state {
            LoadState::Loaded => Presentation::Actual { src: &self.params.src, alt: &self.params.alt },
            LoadState::Pending | LoadState::VisibleLoading => {
                Presentation::Placeholder { loader: self.params.loader, alt: &self.params.alt }
            }
        }
    }
}
