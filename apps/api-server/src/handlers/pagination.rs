//! Page-number links for paginated listings.

use actix_web::HttpRequest;
use url::Url;

use scribe_core::pagination::Page;
use scribe_shared::Paginated;

use crate::middleware::error::AppError;

pub const INVALID_PAGE: &str = "Invalid page.";

pub fn invalid_page() -> AppError {
    AppError::NotFound(INVALID_PAGE.to_string())
}

/// Wrap `results` (one page) with its total and neighbour links.
pub fn paginated<T, R>(req: &HttpRequest, page: &Page<T>, results: Vec<R>) -> Paginated<R> {
    let current = req.full_url();

    Paginated {
        count: page.total,
        next: page
            .has_next()
            .then(|| page_url(&current, page.page + 1)),
        previous: page
            .has_previous()
            .then(|| page_url(&current, page.page - 1)),
        results,
    }
}

/// `current` pointing at `page`, other query parameters kept.
/// The first page is addressed without a `page` parameter.
fn page_url(current: &Url, page: u64) -> String {
    let kept: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = current.clone();
    url.set_query(None);

    if !kept.is_empty() || page > 1 {
        let mut query = url.query_pairs_mut();
        for (key, value) in &kept {
            query.append_pair(key, value);
        }
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    url.into()
}
