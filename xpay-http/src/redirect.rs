//! Contract between the checkout flow and the UI that shows the gateway's
//! authorization page.
//!
//! A [`RedirectHandler`] presents a URL and hands back a [`RedirectSession`].
//! The UI side keeps the matching [`RedirectNotifier`] and reports what the
//! page does; the flow only waits for the terminal dismissal.
//!
//! ```text
//! Checkout ──present(url)──▶ RedirectHandler ──▶ UI surface
//!    ▲                                              │
//!    └──── RedirectSession ◀── RedirectNotifier ◀───┘
//! ```
//!
//! Dismissal is final and unconditional: whether the payer completed the
//! payment, cancelled, or the page failed to load, the flow only learns that
//! the surface is gone. Dropping the notifier counts as dismissal.

use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

/// Lifecycle events reported by a redirect surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectEvent {
    /// The page started loading.
    LoadStarted(Url),
    /// The page finished loading.
    LoadFinished(Url),
    /// The page failed to load.
    LoadFailed {
        /// Page that failed.
        url: Url,
        /// Platform-provided description of the failure.
        reason: String,
    },
    /// The page navigated somewhere; the surface allowed it.
    NavigationIntercepted(Url),
    /// The payer closed the surface. Always the last event.
    Dismissed,
}

impl RedirectEvent {
    /// Returns `true` for [`RedirectEvent::Dismissed`].
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Dismissed)
    }
}

/// UI-side end of a redirect session.
///
/// Every method is fire-and-forget: if the flow has stopped listening the
/// events are discarded.
#[derive(Debug)]
pub struct RedirectNotifier {
    tx: mpsc::UnboundedSender<RedirectEvent>,
}

impl RedirectNotifier {
    /// Reports that the page started loading.
    pub fn load_started(&self, url: Url) {
        self.emit(RedirectEvent::LoadStarted(url));
    }

    /// Reports that the page finished loading.
    pub fn load_finished(&self, url: Url) {
        self.emit(RedirectEvent::LoadFinished(url));
    }

    /// Reports that the page failed to load.
    pub fn load_failed(&self, url: Url, reason: impl Into<String>) {
        self.emit(RedirectEvent::LoadFailed {
            url,
            reason: reason.into(),
        });
    }

    /// Reports a navigation inside the page.
    pub fn navigation_intercepted(&self, url: Url) {
        self.emit(RedirectEvent::NavigationIntercepted(url));
    }

    /// Reports that the payer closed the surface and ends the session.
    pub fn dismiss(self) {
        self.emit(RedirectEvent::Dismissed);
    }

    /// Returns `true` if the flow is no longer waiting on this session.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn emit(&self, event: RedirectEvent) {
        // Receiver gone: the flow was dropped or timed out.
        let _ = self.tx.send(event);
    }
}

/// Flow-side end of a redirect session.
#[derive(Debug)]
pub struct RedirectSession {
    rx: mpsc::UnboundedReceiver<RedirectEvent>,
    dismissed: bool,
}

impl RedirectSession {
    /// Creates a connected notifier/session pair.
    #[must_use]
    pub fn channel() -> (RedirectNotifier, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            RedirectNotifier { tx },
            Self {
                rx,
                dismissed: false,
            },
        )
    }

    /// Creates a session that is already dismissed.
    ///
    /// Useful for surfaces that block until the payer is done, such as a
    /// handler that opens an external browser and waits for confirmation.
    #[must_use]
    pub fn dismissed() -> Self {
        let (notifier, session) = Self::channel();
        notifier.dismiss();
        session
    }

    /// Waits for the next event.
    ///
    /// Returns [`RedirectEvent::Dismissed`] once the notifier is dropped
    /// without dismissing, and `None` after the terminal event was returned.
    pub async fn next_event(&mut self) -> Option<RedirectEvent> {
        if self.dismissed {
            return None;
        }
        let event = self.rx.recv().await.unwrap_or(RedirectEvent::Dismissed);
        if event.is_terminal() {
            self.dismissed = true;
            self.rx.close();
        }
        Some(event)
    }

    /// Waits until the surface is dismissed, discarding other events.
    pub async fn wait_dismissed(mut self) {
        while let Some(event) = self.next_event().await {
            #[cfg(feature = "telemetry")]
            tracing::debug!(?event, "Redirect lifecycle event");
            if event.is_terminal() {
                break;
            }
        }
    }
}

/// A UI surface able to show the gateway's authorization page.
///
/// Implementations must eventually end the returned session, either through
/// [`RedirectNotifier::dismiss`] or by dropping the notifier. A session that
/// never ends keeps the checkout pending unless a redirect timeout is set.
pub trait RedirectHandler: Send + Sync {
    /// Shows `url` to the payer.
    fn present(&self, url: &Url) -> RedirectSession;
}

impl<H: RedirectHandler + ?Sized> RedirectHandler for Arc<H> {
    fn present(&self, url: &Url) -> RedirectSession {
        (**self).present(url)
    }
}

impl<H: RedirectHandler + ?Sized> RedirectHandler for &H {
    fn present(&self, url: &Url) -> RedirectSession {
        (**self).present(url)
    }
}

impl<H: RedirectHandler + ?Sized> RedirectHandler for Box<H> {
    fn present(&self, url: &Url) -> RedirectSession {
        (**self).present(url)
    }
}

/// [`RedirectHandler`] backed by a closure.
pub struct FnRedirectHandler<F> {
    present: F,
}

impl<F> std::fmt::Debug for FnRedirectHandler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRedirectHandler").finish_non_exhaustive()
    }
}

impl<F> FnRedirectHandler<F>
where
    F: Fn(&Url) -> RedirectSession + Send + Sync,
{
    /// Creates a handler from a closure.
    pub const fn new(present: F) -> Self {
        Self { present }
    }
}

impl<F> RedirectHandler for FnRedirectHandler<F>
where
    F: Fn(&Url) -> RedirectSession + Send + Sync,
{
    fn present(&self, url: &Url) -> RedirectSession {
        (self.present)(url)
    }
}
