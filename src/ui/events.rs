//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply one event from a background task to the application state.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedLoaded {
            selection,
            generation,
            state,
        } => {
            app.apply_feed_loaded(&selection, generation, state);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{Article, FeedLoader, FeedState};
    use crate::nav::{QueryString, ViewSelection};
    use std::time::Duration;
    use url::Url;

    fn test_app() -> App {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let loader = FeedLoader::new(base, Duration::from_secs(1)).unwrap();
        App::new(&Config::default(), loader, QueryString::default())
    }

    #[tokio::test]
    async fn test_feed_loaded_applies_state() {
        let mut app = test_app();
        let (selection, generation) = app.begin_load();
        let state = FeedState::from_articles(vec![Article {
            title: "Only".to_string(),
            ..Article::default()
        }]);

        handle_app_event(
            &mut app,
            AppEvent::FeedLoaded {
                selection,
                generation,
                state,
            },
        );

        assert!(!app.feed.is_loading);
        assert_eq!(app.feed.featured.as_ref().map(|a| a.title.as_str()), Some("Only"));
        assert!(app.feed.items.is_empty());
    }

    #[tokio::test]
    async fn test_task_panic_sets_status() {
        let mut app = test_app();
        handle_app_event(
            &mut app,
            AppEvent::TaskPanicked {
                task: "feed_load",
                error: "boom".to_string(),
            },
        );
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("feed_load"));
        assert_eq!(app.selection(), ViewSelection::default());
    }
}
