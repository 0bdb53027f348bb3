//! Lazy, cursor-driven transaction stream
//!
//! The `raw_tx_history` endpoint is reverse-chronological and cursor
//! paginated: each page arrives newest-first together with a `prev` flag
//! meaning "an older page is still queryable". [`TransactionStream`] turns
//! that into a uniform forward sequence: every fetched page is reversed to
//! oldest-first before buffering, and the continuation cursor for the next
//! fetch is taken from the last buffered record.
//!
//! Iteration is pull-based: a single fetch happens lazily on first access
//! or when the position leaves the buffered page. There is no prefetching,
//! no internal retry, and no concurrent fetching; a failed fetch surfaces
//! immediately from the call that triggered it.

use cex_types::{CexError, CexResult, Transaction, TransactionFilters};
use chrono::DateTime;
use tracing::{debug, instrument, warn};

use crate::hooks::PageHooks;
use crate::source::TransactionSource;

/// Default page size, also sent as the remote `limit` parameter
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Sentinel cursor id used to request the most recent data from scratch
const START_CURSOR_TXID: &str = "1";

/// Lazy, restartable forward sequence of transaction records
///
/// # Example
///
/// ```no_run
/// use cex_sdk::prelude::*;
///
/// # async fn example(client: CexClient) -> CexResult<()> {
/// let filters = TransactionFilters::new().with_type(TransactionTypeFilter::Trade);
/// let mut stream = client.transactions(filters);
///
/// while let Some(tx) = stream.next_record().await? {
///     println!("{} {} {}", tx.id, tx.tx_type, tx.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TransactionStream<S> {
    source: S,
    filters: TransactionFilters,
    limit: u32,
    position: usize,
    /// Buffered page, oldest-first; `None` until the first load
    page: Option<Vec<Transaction>>,
    /// True when the remote reported more (older) data after the last fetch
    has_more: bool,
    hooks: PageHooks,
}

impl<S> TransactionStream<S> {
    /// Create a stream over `source` with the given filters
    ///
    /// Nothing is fetched until the first access.
    pub fn new(source: S, filters: TransactionFilters) -> Self {
        Self {
            source,
            filters,
            limit: DEFAULT_PAGE_LIMIT,
            position: 0,
            page: None,
            has_more: false,
            hooks: PageHooks::new(),
        }
    }

    /// Set the per-page limit, consuming the stream
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the per-page limit
    ///
    /// Takes effect on the next fetch; the buffered page is untouched.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    /// Current per-page limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Current filter set
    pub fn filters(&self) -> &TransactionFilters {
        &self.filters
    }

    /// Attached page transforms
    pub fn hooks(&self) -> &PageHooks {
        &self.hooks
    }

    /// Attached page transforms, mutable (attach/detach)
    pub fn hooks_mut(&mut self) -> &mut PageHooks {
        &mut self.hooks
    }

    /// Record at the current position, if the stream is positioned on one
    pub fn current(&self) -> Option<&Transaction> {
        if !self.in_window(self.position) {
            return None;
        }
        self.page.as_ref()?.get(self.position)
    }

    /// True when the stream is positioned on a record
    pub fn valid(&self) -> bool {
        self.current().is_some()
    }

    /// Id of the record at the current position
    pub fn key(&self) -> Option<&str> {
        self.current().map(|tx| tx.id.as_str())
    }

    fn in_window(&self, position: usize) -> bool {
        let len = self.page.as_ref().map(Vec::len).unwrap_or(0);
        position < self.limit as usize && position < len
    }
}

impl<S: TransactionSource> TransactionStream<S> {
    /// Restart the stream: discard the buffer and cursor state and fetch a
    /// fresh first page
    #[instrument(skip(self))]
    pub async fn rewind(&mut self) -> CexResult<()> {
        self.position = 0;
        self.page = None;
        self.has_more = false;
        self.load().await
    }

    /// Replace the filter set and restart the stream
    pub async fn set_filters(&mut self, filters: TransactionFilters) -> CexResult<()> {
        self.filters = filters;
        self.rewind().await
    }

    /// Advance the position by one record
    ///
    /// When the position leaves the buffered page (bounded by the page
    /// limit), the next page is fetched and the position resets to 0.
    /// Rewinds implicitly on first use.
    pub async fn advance(&mut self) -> CexResult<()> {
        self.ensure_loaded().await?;

        self.position += 1;
        if !self.in_window(self.position) {
            self.load().await?;
            self.position = 0;
        }
        Ok(())
    }

    /// Pull the next record, fetching pages as needed
    ///
    /// Returns `Ok(None)` once the remote has no more data. A fetch failure
    /// surfaces before any record of the failed page is yielded.
    pub async fn next_record(&mut self) -> CexResult<Option<Transaction>> {
        self.ensure_loaded().await?;

        loop {
            if let Some(tx) = self.current() {
                let tx = tx.clone();
                self.position += 1;
                return Ok(Some(tx));
            }
            if !self.has_more {
                return Ok(None);
            }
            self.load().await?;
            self.position = 0;
        }
    }

    /// Drain the rest of the stream into a vector
    pub async fn collect_remaining(&mut self) -> CexResult<Vec<Transaction>> {
        let mut records = Vec::new();
        while let Some(tx) = self.next_record().await? {
            records.push(tx);
        }
        Ok(records)
    }

    async fn ensure_loaded(&mut self) -> CexResult<()> {
        if self.page.is_none() {
            self.load().await?;
        }
        Ok(())
    }

    /// Load the next page into the buffer
    ///
    /// The first load ever uses the start-of-time sentinel cursor; later
    /// loads continue from the last buffered record, and only while the
    /// remote keeps signalling more data.
    async fn load(&mut self) -> CexResult<()> {
        let query = match &self.page {
            None => Some(self.filters.to_query(self.limit).with_cursor(
                START_CURSOR_TXID,
                Transaction::format_time(&DateTime::UNIX_EPOCH),
            )),
            Some(previous) if self.has_more => previous.last().map(|last| {
                self.filters
                    .to_query(self.limit)
                    .with_cursor(last.id.clone(), last.cursor_time())
            }),
            Some(_) => None,
        };

        let Some(query) = query else {
            if self.has_more {
                // The remote claimed an older page after handing us an empty
                // one (or a hook emptied it). There is no cursor to continue
                // from; refetching would loop forever.
                warn!("more data signalled after an empty page, treating stream as exhausted");
                self.has_more = false;
            }
            self.page = Some(Vec::new());
            return Ok(());
        };

        let response = self.source.fetch_transactions(&query).await?;

        if let Some(message) = response.error.filter(|e| !e.is_empty()) {
            return Err(CexError::RemoteFetch { message });
        }

        let (mut records, has_more) = match response.data {
            Some(page) => (page.vtx, page.prev.unwrap_or(false)),
            None => (Vec::new(), false),
        };

        // newest-first on the wire, oldest-first in the buffer
        records.reverse();
        debug!(count = records.len(), has_more, "loaded transaction page");

        self.has_more = has_more;
        self.page = Some(self.hooks.dispatch(records));
        Ok(())
    }
}

impl<S> std::fmt::Debug for TransactionStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStream")
            .field("filters", &self.filters)
            .field("limit", &self.limit)
            .field("position", &self.position)
            .field("buffered", &self.page.as_ref().map(Vec::len))
            .field("has_more", &self.has_more)
            .field("hooks", &self.hooks)
            .finish()
    }
}
