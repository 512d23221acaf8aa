use serde::{Deserialize, Serialize};

/// A single article as returned by the news API.
///
/// Field names follow the wire format (`article_title`, `article_text`,
/// `article_link`). Missing fields decode as empty strings and render as
/// empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "article_title", default)]
    pub title: String,
    /// May contain embedded line breaks separating paragraphs.
    #[serde(rename = "article_text", default)]
    pub body: String,
    #[serde(rename = "article_link", default)]
    pub link: String,
}

/// Articles for one `(category, language)` fetch cycle.
///
/// Invariant: `featured` is the first element of a non-empty response and is
/// never repeated in `items`. Every failure resolves to the empty state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub featured: Option<Article>,
    pub items: Vec<Article>,
    pub is_loading: bool,
}

impl FeedState {
    /// Placeholder shown while the first fetch is outstanding.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Resolved state with no articles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split a response into featured + remaining items, preserving order.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let mut iter = articles.into_iter();
        let featured = iter.next();
        Self {
            featured,
            items: iter.collect(),
            is_loading: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.items.is_empty()
    }

    /// Total number of articles including the featured one.
    pub fn len(&self) -> usize {
        self.items.len() + usize::from(self.featured.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            body: format!("{} body", title),
            link: format!("https://example.com/{}", title),
        }
    }

    #[test]
    fn test_split_first_is_featured() {
        let state = FeedState::from_articles(vec![article("a"), article("b"), article("c")]);
        assert_eq!(state.featured, Some(article("a")));
        assert_eq!(state.items, vec![article("b"), article("c")]);
        assert!(!state.is_loading);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_split_single_article() {
        let state = FeedState::from_articles(vec![article("only")]);
        assert_eq!(state.featured, Some(article("only")));
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_split_empty_equals_empty_state() {
        assert_eq!(FeedState::from_articles(Vec::new()), FeedState::empty());
        assert!(FeedState::empty().is_empty());
    }

    #[test]
    fn test_decode_wire_format() {
        let json = r#"[{"article_title":"A","article_text":"p1\np2","article_link":"http://x"}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].body, "p1\np2");
        assert_eq!(articles[0].link, "http://x");
    }

    #[test]
    fn test_decode_missing_fields_as_empty() {
        let json = r#"[{"article_title":"Only title"}, {}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].body, "");
        assert_eq!(articles[1], Article::default());
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let json = r#"[{"article_title":"T","article_text":"b","article_link":"l","source":"wire"}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].title, "T");
    }
}
