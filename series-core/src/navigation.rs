//! Keeps the adult content nav link's visibility in step with the
//! preference for as long as the page is alive.

use futures::StreamExt;
use series_contracts::{NavLink, PreferenceSignal, PreferenceStore};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Element id of the nav link the controller toggles.
pub const ADULT_CONTENT_LINK_ID: &str = "adult-content-nav-link";

/// Reactive toggler for the adult content nav link.
///
/// Holds nothing but the preference handle and the cached link. The link is
/// looked up once at activation; when the page has no such link every render
/// is a no-op.
#[derive(Debug)]
pub struct NavPresenceController<P, L> {
    preferences: P,
    link: Option<L>,
    state: watch::Sender<Option<bool>>,
}

impl<P, L> NavPresenceController<P, L>
where
    P: PreferenceStore + 'static,
    L: NavLink,
{
    pub fn new(preferences: P, link: Option<L>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            preferences,
            link,
            state,
        }
    }

    /// Hidden flag of the link after each render; `None` until the first
    /// render or when there is no link.
    pub fn watch(&self) -> watch::Receiver<Option<bool>> {
        self.state.subscribe()
    }

    /// Apply the current preference to the link.
    pub fn render(&self) -> Option<bool> {
        let Some(link) = &self.link else {
            debug!("adult content nav link not present; nothing to toggle");
            return None;
        };

        let hidden = !self.preferences.get_preference();
        link.set_hidden(hidden);
        self.state.send_replace(Some(hidden));
        debug!(hidden, "adult content nav link updated");
        Some(hidden)
    }

    /// Re-render if `signal` concerns this preference. Returns whether it did.
    pub fn handle(&self, signal: &PreferenceSignal) -> bool {
        let relevant = match signal {
            PreferenceSignal::Local => true,
            PreferenceSignal::Storage { key } => {
                key.as_deref() == Some(self.preferences.key())
            }
        };
        if relevant {
            self.render();
        }
        relevant
    }

    /// Subscribe, render once, then keep reacting on a background task.
    ///
    /// Subscribing happens before the eager render so a change that lands in
    /// between is not lost.
    pub fn spawn(self) -> JoinHandle<()> {
        let mut signals = self.preferences.subscribe();
        self.render();

        tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if !self.handle(&signal) {
                    debug!(?signal, "ignoring unrelated storage change");
                }
            }
            debug!("preference signals closed; nav presence controller stopping");
        })
    }
}
