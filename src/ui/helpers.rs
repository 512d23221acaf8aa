//! Helper functions for UI operations.
//!
//! Background task spawning and panic containment shared by the input and
//! event handlers.

use crate::app::{App, AppEvent};
use crate::feed::FeedState;
use crate::nav::ViewSelection;
use crate::util::validate_url_for_open;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of a spawned task silently disappearing, the panic message comes
/// back as `Err(String)`.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(crate) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn a load for the current selection.
///
/// Earlier loads keep running; whichever resolves last is what the
/// dashboard shows (unless the stale guard is enabled). A panicking load
/// still delivers the empty feed so the spinner never sticks.
pub fn spawn_feed_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let (selection, generation) = app.begin_load();
    let loader = Arc::clone(&app.loader);
    let tx = event_tx.clone();

    tracing::debug!(
        category = %selection.category,
        language = %selection.language,
        generation,
        "Spawning feed load"
    );

    let handle = tokio::spawn(async move {
        let state = match catch_task_panic(loader.load(&selection.category, &selection.language))
            .await
        {
            Ok(state) => state,
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Feed load panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "feed_load",
                        error: panic_msg,
                    })
                    .await;
                FeedState::empty()
            }
        };

        let event = AppEvent::FeedLoaded {
            selection,
            generation,
            state,
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send feed result (receiver dropped)");
        }
    });

    app.track_load(handle);
}

/// React to a published selection change by dispatching a load for it.
///
/// Call after `selection_rx.changed()` resolves. Marks the value as seen so
/// the next change is reported again.
pub fn handle_selection_change(
    app: &mut App,
    selection_rx: &mut watch::Receiver<ViewSelection>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let selection = selection_rx.borrow_and_update().clone();
    tracing::info!(
        category = %selection.category,
        language = %selection.language,
        query = %app.navigator.query(),
        "Selection changed"
    );
    spawn_feed_load(app, event_tx);
}

/// Open the focused card's link in the system browser.
///
/// Touches neither the expansion state nor the feed.
pub(super) fn open_selected_link(app: &mut App) {
    let Some(link) = app.selected_article().map(|a| a.link.clone()) else {
        return;
    };

    match validate_url_for_open(&link) {
        Ok(url) => match open::that(url.as_str()) {
            Ok(()) => app.set_status("Opened original in browser"),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Could not open browser: {}", e));
            }
        },
        Err(e) => {
            tracing::warn!(link = %link, error = %e, "Refusing to open article link");
            app.set_status(format!("Cannot open link: {}", e));
        }
    }
}
