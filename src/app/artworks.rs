//! Artworks view: server-paginated fetch wiring and state transitions

use super::App;
use crate::fetch::PageFetcher;
use crate::types::{ArtworkPage, LoadPhase};
use eframe::egui;
use tracing::{info, warn};

impl App {
    /// Transition: user asked for a page (or changed the page size).
    /// Issues exactly one new fetch generation; any in-flight request for an
    /// earlier page is superseded.
    pub(crate) fn page_requested(&mut self, ctx: &egui::Context, page: u32) {
        let page = page.max(1);
        self.artwork_requested_page = page;
        self.artwork_phase = LoadPhase::Loading;

        let limit = self.artwork_pages.limit;
        let (seq, slot, token) = self.fetcher.begin();
        info!(page, limit, seq, "Requesting artwork page");

        let client = self.client.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => return,
                result = client.fetch_artworks(page, limit) => result,
            };
            PageFetcher::complete(&slot, seq, result);
            ctx.request_repaint();
        });
    }

    /// Drain the fetch slot once per frame and apply the outcome
    pub(crate) fn poll_artwork_fetch(&mut self) {
        if let Some(result) = self.fetcher.poll() {
            match result {
                Ok(page) => self.page_loaded(page),
                Err(e) => self.fetch_failed(e.to_string()),
            }
        }
    }

    /// Transition: a fetch for the latest requested page completed.
    /// The record list is replaced wholesale; the selection set is untouched.
    fn page_loaded(&mut self, page: ArtworkPage) {
        info!(
            page = page.page,
            records = page.records.len(),
            total = page.total,
            "Artwork page loaded"
        );
        self.artwork_pages.limit = page.limit.max(1);
        self.artwork_pages.set_total(page.total);
        self.artwork_pages.page = self.artwork_pages.clamped(page.page);
        self.artworks = page.records;
        self.artwork_phase = LoadPhase::Ready;
    }

    /// Transition: the latest fetch failed. Previous rows are dropped rather
    /// than shown as a stale page under an error banner.
    fn fetch_failed(&mut self, message: String) {
        warn!(page = self.artwork_requested_page, error = %message, "Artwork fetch failed");
        self.artworks.clear();
        self.artwork_phase = LoadPhase::Failed(message);
    }

    /// Retry affordance on the error banner re-requests the same page
    pub(crate) fn retry_artwork_fetch(&mut self, ctx: &egui::Context) {
        let page = self.artwork_requested_page;
        self.page_requested(ctx, page);
    }
}
