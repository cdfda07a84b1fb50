//! Server-side pagination metadata for listings.

/// One page of a server-paginated listing.
///
/// `page_number` is zero-based and echoes what the server actually served,
/// which may differ from what the caller asked for on an out-of-range request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page_number: u32,
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(page_number: u32, total_pages: u32, items: Vec<T>) -> Self {
        Self {
            page_number,
            total_pages,
            items,
        }
    }

    /// Whether another page should be requested after this one.
    pub fn has_more(&self) -> bool {
        self.page_number + 1 < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
