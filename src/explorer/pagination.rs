//! Offset/limit pagination over the API list endpoint
//!
//! A short page is the authoritative end-of-data signal. The server-reported
//! total is only a fast path for exactly-full last pages, and a page cap
//! stops a server that keeps returning full pages forever.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::ExportResult;

/// One page of results plus the server-reported total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStop {
    /// The page held fewer records than requested
    ShortPage,
    /// The running offset reached the reported total
    ReachedTotal,
    /// The page cap was hit
    PageLimit,
}

/// Tracks the offset across pages and decides when to stop
#[derive(Debug, Clone)]
pub struct PageCursor {
    page_size: usize,
    max_pages: usize,
    offset: usize,
    pages: usize,
}

impl PageCursor {
    pub fn new(page_size: usize, max_pages: usize) -> Self {
        Self {
            page_size,
            max_pages,
            offset: 0,
            pages: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Record a received page; returns the stop reason once done
    pub fn advance(&mut self, received: usize, total: usize) -> Option<PageStop> {
        self.offset += received;
        self.pages += 1;

        if received < self.page_size {
            Some(PageStop::ShortPage)
        } else if self.offset == total {
            Some(PageStop::ReachedTotal)
        } else if self.pages >= self.max_pages {
            Some(PageStop::PageLimit)
        } else {
            None
        }
    }
}

/// Fetch pages until the cursor says stop, accumulating every record
///
/// `fetch` receives `(offset, limit)` for each page. The first error aborts
/// the whole listing.
pub async fn collect_pages<T, F, Fut>(
    page_size: usize,
    max_pages: usize,
    mut fetch: F,
) -> ExportResult<Vec<T>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = ExportResult<Page<T>>>,
{
    let mut cursor = PageCursor::new(page_size, max_pages.max(1));
    let mut items = Vec::new();

    loop {
        let page = fetch(cursor.offset(), cursor.limit()).await?;
        let received = page.items.len();
        items.extend(page.items);

        if let Some(stop) = cursor.advance(received, page.total) {
            if stop == PageStop::PageLimit {
                warn!(
                    pages = cursor.pages(),
                    offset = cursor.offset(),
                    total = page.total,
                    "Page limit reached, returning partial list"
                );
            } else {
                debug!(pages = cursor.pages(), records = items.len(), reason = ?stop, "Pagination finished");
            }
            return Ok(items);
        }
    }
}
