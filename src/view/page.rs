use super::expansion::{CardKey, ExpansionState};
use crate::feed::{Article, FeedState};
use crate::util::strip_control_chars;

/// Number of decorative accents grid cards cycle through.
pub const ACCENT_COUNT: usize = 5;

/// Decorative treatment of a card. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Featured,
    /// Index into the five-entry accent palette.
    Cycle(usize),
}

/// Accent for the grid card at `index`.
pub fn accent_for(index: usize) -> Accent {
    Accent::Cycle(index % ACCENT_COUNT)
}

/// Split an article body into trimmed paragraphs, one per line break.
///
/// Control characters are stripped first so remote text cannot drive the
/// terminal.
pub fn split_paragraphs(body: &str) -> Vec<String> {
    strip_control_chars(body)
        .split('\n')
        .map(|p| p.trim().to_string())
        .collect()
}

/// Display model for one article card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: CardKey,
    pub title: String,
    pub paragraphs: Vec<String>,
    pub link: String,
    pub expanded: bool,
    pub accent: Accent,
}

impl CardView {
    fn new(key: CardKey, article: &Article, expanded: bool, accent: Accent) -> Self {
        Self {
            key,
            title: strip_control_chars(&article.title).into_owned(),
            paragraphs: split_paragraphs(&article.body),
            link: article.link.clone(),
            expanded,
            accent,
        }
    }

    pub fn is_featured(&self) -> bool {
        self.key == CardKey::Featured
    }

    /// Label of the expand/collapse action.
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Show Less"
        } else {
            "Read More"
        }
    }
}

/// What the main area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// A fetch is outstanding; only the spinner is drawn.
    Loading,
    Ready {
        featured: Option<CardView>,
        cards: Vec<CardView>,
    },
}

impl PageView {
    /// Build the page from the feed and the expansion flags.
    ///
    /// Pure: no I/O, no state changes.
    pub fn build(feed: &FeedState, expansion: &ExpansionState) -> Self {
        if feed.is_loading {
            return Self::Loading;
        }

        let featured = feed.featured.as_ref().map(|article| {
            CardView::new(
                CardKey::Featured,
                article,
                expansion.is_expanded(CardKey::Featured),
                Accent::Featured,
            )
        });

        let cards = feed
            .items
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let key = CardKey::Item(i);
                CardView::new(key, article, expansion.is_expanded(key), accent_for(i))
            })
            .collect();

        Self::Ready { featured, cards }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Loading => false,
            Self::Ready { featured, cards } => featured.is_none() && cards.is_empty(),
        }
    }
}

/// Page heading for a category: `world` becomes "World News".
pub fn heading(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{} News", first.to_uppercase(), chars.as_str()),
        None => "News".to_string(),
    }
}
