use serde::Serialize;

/// 1-based page window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Zero values are bumped to 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Normalize raw query-string values. Unparseable or non-positive values
    /// fall back to defaults and `per_page` is capped at `max_per_page`.
    pub fn from_query(
        page: Option<&str>,
        per_page: Option<&str>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);

        let per_page = per_page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(max_per_page as i64) as u32)
            .unwrap_or(default_per_page);

        Self::new(page, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

/// One window of items plus the size of the full result set
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_items: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        let per_page = i64::from(self.request.per_page());
        (self.total_items + per_page - 1) / per_page
    }

    pub fn paging(&self) -> Paging {
        Paging {
            page: self.request.page(),
            per_page: self.request.per_page(),
            total_pages: self.total_pages(),
            total_items: self.total_items,
        }
    }
}

/// The `paging` block of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: i64,
    pub total_items: i64,
}
