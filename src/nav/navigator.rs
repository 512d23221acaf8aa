use super::query::QueryString;
use super::selection::{Category, ViewSelection, CATEGORY_PARAM, LANGUAGE_PARAM};
use tokio::sync::watch;

/// Owner of the navigable query string.
///
/// The query string is the single source of truth for what the dashboard
/// shows. Every navigation recomputes the [`ViewSelection`] and publishes it
/// on a watch channel when it differs from the previous one; the event loop
/// subscribes and dispatches a feed load for each change.
pub struct Navigator {
    query: QueryString,
    selection_tx: watch::Sender<ViewSelection>,
}

impl Navigator {
    pub fn new(query: QueryString) -> Self {
        let selection = ViewSelection::from_query(&query);
        let (selection_tx, _) = watch::channel(selection);
        Self {
            query,
            selection_tx,
        }
    }

    pub fn query(&self) -> &QueryString {
        &self.query
    }

    /// Selection resolved from the current query string.
    pub fn selection(&self) -> ViewSelection {
        self.selection_tx.borrow().clone()
    }

    /// Subscribe to selection changes.
    ///
    /// The receiver starts with the current selection marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<ViewSelection> {
        self.selection_tx.subscribe()
    }

    /// Navigate to `target`.
    ///
    /// Returns `true` when the resolved selection changed, which is also the
    /// only case in which subscribers are notified.
    pub fn follow(&mut self, target: QueryString) -> bool {
        let next = ViewSelection::from_query(&target);
        tracing::debug!(query = %target, "Navigating");
        self.query = target;
        self.selection_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Rewrite the `language` key of the current query and navigate to it.
    pub fn set_language(&mut self, language: &str) -> bool {
        let target = self.query.with(LANGUAGE_PARAM, language);
        self.follow(target)
    }

    /// Target of a sidebar category link: the current query with `category`
    /// overwritten.
    pub fn category_link(&self, category: Category) -> QueryString {
        self.query.with(CATEGORY_PARAM, category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_selection_from_query() {
        let nav = Navigator::new(QueryString::parse("category=tech"));
        assert_eq!(nav.selection(), ViewSelection::new("tech", "english"));
    }

    #[test]
    fn test_set_language_preserves_category_and_other_keys() {
        let mut nav = Navigator::new(QueryString::parse("category=finance&ref=mail&language=english"));
        assert!(nav.set_language("german"));
        assert_eq!(
            nav.query().encode(),
            "category=finance&ref=mail&language=german"
        );
        assert_eq!(nav.selection(), ViewSelection::new("finance", "german"));
    }

    #[test]
    fn test_set_language_inserts_missing_key() {
        let mut nav = Navigator::new(QueryString::parse("category=weather"));
        assert!(nav.set_language("russian"));
        assert_eq!(nav.query().encode(), "category=weather&language=russian");
    }

    #[test]
    fn test_set_same_language_reports_no_change() {
        let mut nav = Navigator::new(QueryString::parse("language=english"));
        assert!(!nav.set_language("english"));
    }

    #[test]
    fn test_default_language_written_explicitly_is_not_a_change() {
        // Absent key already resolves to english
        let mut nav = Navigator::new(QueryString::default());
        assert!(!nav.set_language("english"));
        assert_eq!(nav.query().encode(), "language=english");
    }

    #[test]
    fn test_category_link_preserves_language() {
        let nav = Navigator::new(QueryString::parse("language=japanese&category=world"));
        let link = nav.category_link(Category::Sports);
        assert_eq!(link.encode(), "language=japanese&category=sports");
        // Building a link does not navigate
        assert_eq!(nav.selection(), ViewSelection::new("world", "japanese"));
    }

    #[tokio::test]
    async fn test_subscribers_notified_only_on_change() {
        let mut nav = Navigator::new(QueryString::default());
        let mut rx = nav.subscribe();
        assert!(!rx.has_changed().unwrap());

        let link = nav.category_link(Category::World);
        assert!(!nav.follow(link));
        assert!(!rx.has_changed().unwrap());

        let link = nav.category_link(Category::Tech);
        assert!(nav.follow(link));
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ViewSelection::new("tech", "english"));
    }
}
