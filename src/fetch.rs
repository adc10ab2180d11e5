//! Latest-requested-wins guard for page fetches
//!
//! Every fetch gets a monotonically increasing sequence number. A completion
//! is published only if its sequence is still the latest issued, so a slow
//! response for an earlier page can never overwrite a later one. Superseded
//! tasks are additionally cancelled so they stop occupying the connection.

use crate::api::ApiError;
use crate::types::ArtworkPage;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub type FetchResult = Result<ArtworkPage, ApiError>;

/// Shared between the UI thread and background fetch tasks
#[derive(Default)]
pub struct FetchSlot {
    latest_seq: u64,
    outcome: Option<(u64, FetchResult)>,
}

/// UI-side handle issuing sequence numbers and draining completions
pub struct PageFetcher {
    slot: Arc<Mutex<FetchSlot>>,
    next_seq: u64,
    cancel: Option<CancellationToken>,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(FetchSlot::default())),
            next_seq: 0,
            cancel: None,
        }
    }

    /// Start a new request generation: cancels any in-flight task and marks
    /// the returned sequence as the only one allowed to publish.
    pub fn begin(&mut self) -> (u64, Arc<Mutex<FetchSlot>>, CancellationToken) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.next_seq += 1;
        let seq = self.next_seq;

        let mut slot = self.slot.lock().unwrap();
        slot.latest_seq = seq;
        slot.outcome = None;
        drop(slot);

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        (seq, Arc::clone(&self.slot), token)
    }

    /// Publish a completion from a background task. Stale sequences are
    /// dropped on the floor.
    pub fn complete(slot: &Mutex<FetchSlot>, seq: u64, result: FetchResult) {
        let mut slot = slot.lock().unwrap();
        if seq == slot.latest_seq {
            slot.outcome = Some((seq, result));
        } else {
            debug!(seq, latest = slot.latest_seq, "discarding stale page response");
        }
    }

    /// Drain the pending completion, if any. Called once per UI frame.
    pub fn poll(&mut self) -> Option<FetchResult> {
        let mut slot = self.slot.lock().unwrap();
        let (seq, result) = slot.outcome.take()?;
        debug_assert_eq!(seq, slot.latest_seq);
        drop(slot);
        self.cancel = None;
        Some(result)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> ArtworkPage {
        ArtworkPage {
            page: n,
            limit: 12,
            total: 24,
            records: Vec::new(),
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut fetcher = PageFetcher::new();
        let (seq1, slot1, _t1) = fetcher.begin();
        let (seq2, slot2, _t2) = fetcher.begin();

        // Page 2's response arrives first and is applied
        PageFetcher::complete(&slot2, seq2, Ok(page(2)));
        let applied = fetcher.poll().unwrap().unwrap();
        assert_eq!(applied.page, 2);

        // Page 1's slower response arrives afterwards and must be dropped
        PageFetcher::complete(&slot1, seq1, Ok(page(1)));
        assert!(fetcher.poll().is_none());
    }

    #[test]
    fn newer_request_supersedes_unpolled_outcome() {
        let mut fetcher = PageFetcher::new();
        let (seq1, slot, _t1) = fetcher.begin();
        PageFetcher::complete(&slot, seq1, Ok(page(1)));

        // User pages again before the UI drained page 1's result
        let (_seq2, _slot, _t2) = fetcher.begin();
        assert!(fetcher.poll().is_none());
    }

    #[test]
    fn superseded_token_is_cancelled() {
        let mut fetcher = PageFetcher::new();
        let (_seq1, _slot, token1) = fetcher.begin();
        assert!(!token1.is_cancelled());
        let (_seq2, _slot, token2) = fetcher.begin();
        assert!(token1.is_cancelled());
        assert!(!token2.is_cancelled());
    }

    #[test]
    fn failures_propagate_like_pages() {
        let mut fetcher = PageFetcher::new();
        let (seq, slot, _t) = fetcher.begin();
        PageFetcher::complete(&slot, seq, Err(ApiError::Http(500)));
        assert!(fetcher.poll().unwrap().is_err());
    }

    #[test]
    fn poll_is_empty_until_completion() {
        let mut fetcher = PageFetcher::new();
        let _ = fetcher.begin();
        assert!(fetcher.poll().is_none());
    }
}
