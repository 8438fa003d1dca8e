use crate::shared::response::JsonApiLinks;
use axum::http::Uri;

/// Builds JSON:API `first/last/prev/next` links for a paged listing.
pub struct PaginationLinkBuilder {
    base_url: String,
    filter_query: Option<String>,
    page_number: u64,
    page_size: u64,
    total_pages: u64,
}

impl PaginationLinkBuilder {
    /// Takes the path from `uri` and keeps every non-`page` query parameter,
    /// so links stay inside the caller's filtered listing.
    pub fn from_uri(uri: &Uri, page_number: u64, page_size: u64, total: u64) -> Self {
        let filter_query = uri.query().and_then(|query| {
            let kept: Vec<&str> = query
                .split('&')
                .filter(|pair| !pair.is_empty() && !pair.starts_with("page"))
                .collect();
            (!kept.is_empty()).then(|| kept.join("&"))
        });

        Self {
            filter_query,
            ..Self::new(uri.path(), page_number, page_size, total)
        }
    }

    pub fn new(base_url: impl Into<String>, page_number: u64, page_size: u64, total: u64) -> Self {
        Self {
            base_url: base_url.into(),
            filter_query: None,
            page_number,
            page_size,
            total_pages: total.div_ceil(page_size.max(1)),
        }
    }

    pub fn build(self) -> JsonApiLinks {
        let mut links = JsonApiLinks::new()
            .with_self(self.page_link(self.page_number))
            .with_first(self.page_link(1));

        if self.total_pages > 0 {
            links = links.with_last(self.page_link(self.total_pages));
        }

        if self.page_number > 1 {
            links = links.with_prev(self.page_link(self.page_number - 1));
        }

        if self.page_number < self.total_pages {
            links = links.with_next(self.page_link(self.page_number + 1));
        }

        links
    }

    fn page_link(&self, page: u64) -> String {
        match &self.filter_query {
            Some(filter) => format!(
                "{}?{}&page[number]={}&page[size]={}",
                self.base_url, filter, page, self.page_size
            ),
            None => format!(
                "{}?page[number]={}&page[size]={}",
                self.base_url, page, self.page_size
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_links_first_page() {
        let links = PaginationLinkBuilder::new("/api/v1/administrators", 1, 10, 25).build();

        assert_eq!(
            links.self_link,
            Some("/api/v1/administrators?page[number]=1&page[size]=10".to_string())
        );
        assert_eq!(
            links.last,
            Some("/api/v1/administrators?page[number]=3&page[size]=10".to_string())
        );
        assert_eq!(links.prev, None);
        assert_eq!(
            links.next,
            Some("/api/v1/administrators?page[number]=2&page[size]=10".to_string())
        );
    }

    #[test]
    fn test_pagination_links_last_page() {
        let links = PaginationLinkBuilder::new("/api/v1/administrators", 3, 10, 25).build();

        assert_eq!(
            links.prev,
            Some("/api/v1/administrators?page[number]=2&page[size]=10".to_string())
        );
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_pagination_links_empty_results() {
        let links = PaginationLinkBuilder::new("/api/v1/administrators", 1, 10, 0).build();

        assert_eq!(links.last, None);
        assert_eq!(links.prev, None);
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_from_uri_keeps_filters() {
        let uri: Uri = "/api/v1/administrators?filter[gender]=Female&page[number]=2&page[size]=10"
            .parse()
            .unwrap();
        let links = PaginationLinkBuilder::from_uri(&uri, 2, 10, 50).build();

        assert_eq!(
            links.self_link,
            Some(
                "/api/v1/administrators?filter[gender]=Female&page[number]=2&page[size]=10"
                    .to_string()
            )
        );
    }
}
