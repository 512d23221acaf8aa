use url::Url;

/// The API exposes no generic sports endpoint; sports recaps live here.
pub const SPORTS_ENDPOINT: &str = "yahoo-sports-recap";

/// Map a category to the API endpoint name.
///
/// `sports` maps to [`SPORTS_ENDPOINT`]; every other value, known or not,
/// maps to `<category>-news`.
pub fn resolve_endpoint(category: &str) -> String {
    if category == "sports" {
        SPORTS_ENDPOINT.to_string()
    } else {
        format!("{}-news", category)
    }
}

/// Build `{base}/{endpoint}?language={language}`.
///
/// Returns `None` when `base` cannot carry a path (e.g. `mailto:` URLs).
pub fn endpoint_url(base: &Url, category: &str, language: &str) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push(&resolve_endpoint(category));
    }
    url.set_query(None);
    url.query_pairs_mut().append_pair("language", language);
    Some(url)
}
