use super::query::QueryString;

/// Query key holding the news category.
pub const CATEGORY_PARAM: &str = "category";
/// Query key holding the article language.
pub const LANGUAGE_PARAM: &str = "language";

/// News categories offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Finance,
    World,
    Entertainment,
    Sports,
    Weather,
}

impl Category {
    /// Sidebar order.
    pub const ALL: [Category; 6] = [
        Category::Tech,
        Category::Finance,
        Category::World,
        Category::Entertainment,
        Category::Sports,
        Category::Weather,
    ];

    pub const DEFAULT: Category = Category::World;

    /// Value used in the query string and for endpoint resolution.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Finance => "finance",
            Self::World => "world",
            Self::Entertainment => "entertainment",
            Self::Sports => "sports",
            Self::Weather => "weather",
        }
    }

    /// Sidebar link label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tech => "Technology",
            Self::Finance => "Finance",
            Self::World => "World News",
            Self::Entertainment => "Entertainment",
            Self::Sports => "Sports",
            Self::Weather => "Weather",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Languages offered by the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Spanish,
    Chinese,
    Japanese,
    German,
    Russian,
    Korean,
}

impl Language {
    /// Selector order.
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Spanish,
        Language::Chinese,
        Language::Japanese,
        Language::German,
        Language::Russian,
        Language::Korean,
    ];

    pub const DEFAULT: Language = Language::English;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
            Self::German => "german",
            Self::Russian => "russian",
            Self::Korean => "korean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::German => "German",
            Self::Russian => "Russian",
            Self::Korean => "Korean",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// The `(category, language)` pair the dashboard is currently showing.
///
/// Values are kept as raw strings: anything typed into the query string is
/// handed to the feed loader untouched, including values outside the
/// enumerated domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewSelection {
    pub category: String,
    pub language: String,
}

impl ViewSelection {
    pub fn new(category: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            language: language.into(),
        }
    }

    /// Derive the selection from a query string.
    ///
    /// Absent or empty keys fall back to `world` / `english`.
    pub fn from_query(query: &QueryString) -> Self {
        let category = query
            .get(CATEGORY_PARAM)
            .filter(|v| !v.is_empty())
            .unwrap_or(Category::DEFAULT.as_str());
        let language = query
            .get(LANGUAGE_PARAM)
            .filter(|v| !v.is_empty())
            .unwrap_or(Language::DEFAULT.as_str());
        Self::new(category, language)
    }

    pub fn category_kind(&self) -> Option<Category> {
        Category::from_str_name(&self.category)
    }

    pub fn language_kind(&self) -> Option<Language> {
        Language::from_str_name(&self.language)
    }
}

impl Default for ViewSelection {
    fn default() -> Self {
        Self::new(Category::DEFAULT.as_str(), Language::DEFAULT.as_str())
    }
}
