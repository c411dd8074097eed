//! Page-Number Pagination
//!
//! List endpoints wrap results in `{count, next, previous, results}`
//! with ten items per page. Links reuse the request's own query string,
//! swapping only the page parameter; the first page carries none.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ApiError, ApiResult};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Read the page query parameter; absent means page one, junk is a 404
pub fn page_param(query: &HashMap<String, String>) -> ApiResult<usize> {
    match query.get("page") {
        None => Ok(1),
        Some(raw) => raw.parse().map_err(|_| ApiError::InvalidPage),
    }
}

/// Slice a fully filtered result set down to one page
pub fn paginate<T: Serialize>(items: Vec<T>, page: usize, path_and_query: &str) -> ApiResult<Page<T>> {
    let count = items.len();
    let total_pages = count.div_ceil(PAGE_SIZE).max(1);
    if page == 0 || page > total_pages {
        return Err(ApiError::InvalidPage);
    }

    let results: Vec<T> = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    let next = (page < total_pages).then(|| with_page(path_and_query, Some(page + 1)));
    let previous = (page > 1).then(|| {
        let target = page - 1;
        with_page(path_and_query, (target > 1).then_some(target))
    });

    Ok(Page { count, next, previous, results })
}

/// Rebuild the request target with the page parameter replaced (or
/// removed for page one)
fn with_page(path_and_query: &str, page: Option<usize>) -> String {
    let (path, query) = match path_and_query.split_once('?') {
        Some((p, q)) => (p, q),
        None => (path_and_query, ""),
    };

    let mut params: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .collect();

    let page_pair;
    if let Some(n) = page {
        page_pair = format!("page={n}");
        params.push(&page_pair);
    }

    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_is_one_valid_page() {
        let page = paginate(Vec::<u32>::new(), 1, "/api/notes/").expect("page");
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_links_walk_both_directions() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(items, 2, "/api/notes/?subject=3&page=2").expect("page");
        assert_eq!(page.count, 25);
        assert_eq!(page.results, (10..20).collect::<Vec<u32>>());
        assert_eq!(page.next.as_deref(), Some("/api/notes/?subject=3&page=3"));
        // Page one drops the parameter entirely
        assert_eq!(page.previous.as_deref(), Some("/api/notes/?subject=3"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(items, 3, "/api/notes/?page=3").expect("page");
        assert_eq!(page.results.len(), 5);
        assert!(page.next.is_none());
        assert_eq!(page.previous.as_deref(), Some("/api/notes/?page=2"));
    }

    #[test]
    fn test_out_of_range_page_is_invalid() {
        let items: Vec<u32> = (0..5).collect();
        assert!(matches!(paginate(items, 2, "/api/notes/"), Err(ApiError::InvalidPage)));
        let items: Vec<u32> = (0..5).collect();
        assert!(matches!(paginate(items, 0, "/api/notes/"), Err(ApiError::InvalidPage)));
    }

    #[test]
    fn test_page_param_parsing() {
        let mut query = HashMap::new();
        assert_eq!(page_param(&query).expect("default"), 1);
        query.insert("page".to_string(), "4".to_string());
        assert_eq!(page_param(&query).expect("explicit"), 4);
        query.insert("page".to_string(), "abc".to_string());
        assert!(matches!(page_param(&query), Err(ApiError::InvalidPage)));
    }
}
