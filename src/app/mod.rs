//! App module - contains the main application state and logic

mod artworks;
mod customers;

use crate::api::CatalogClient;
use crate::fetch::PageFetcher;
use crate::pager::PageState;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::collections::HashSet;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) client: CatalogClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) fetcher: PageFetcher,

    pub(crate) active_view: ActiveView,
    pub(crate) selection_mode: SelectionMode,

    // Artworks view (server-paginated)
    pub(crate) artworks: Vec<Artwork>,
    pub(crate) artwork_pages: PageState,
    pub(crate) artwork_phase: LoadPhase,
    pub(crate) artwork_requested_page: u32,
    pub(crate) selected_artworks: HashSet<u64>,

    // Customers view (client-paginated)
    pub(crate) customers: Vec<Customer>,
    pub(crate) customers_loaded: bool,
    pub(crate) customer_filter: String,
    pub(crate) filtered_customers: Vec<usize>,
    pub(crate) customer_pages: PageState,
    pub(crate) selected_customers: HashSet<u64>,
    pub(crate) customer_sort: Option<CustomerSortColumn>,
    pub(crate) customer_sort_dir: SortDirection,

    // Window tracking for settings persistence
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) initial_fetch_done: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let rows = if crate::constants::PAGE_SIZE_OPTIONS.contains(&settings.rows_per_page) {
            settings.rows_per_page
        } else {
            crate::constants::DEFAULT_PAGE_SIZE
        };

        let active_view = if settings.last_view == "customers" {
            ActiveView::Customers
        } else {
            ActiveView::Artworks
        };
        let selection_mode = if settings.multi_select {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        };

        Self {
            client: CatalogClient::new(),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            fetcher: PageFetcher::new(),
            active_view,
            selection_mode,
            artworks: Vec::new(),
            artwork_pages: PageState::new(rows),
            artwork_phase: LoadPhase::Idle,
            artwork_requested_page: 1,
            selected_artworks: HashSet::new(),
            customers: Vec::new(),
            customers_loaded: false,
            customer_filter: String::new(),
            filtered_customers: Vec::new(),
            customer_pages: PageState::new(rows),
            selected_customers: HashSet::new(),
            customer_sort: None,
            customer_sort_dir: SortDirection::Ascending,
            window_pos: None,
            window_size: None,
            needs_center: false,
            initial_fetch_done: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            rows_per_page: match self.active_view {
                ActiveView::Artworks => self.artwork_pages.limit,
                ActiveView::Customers => self.customer_pages.limit,
            },
            multi_select: self.selection_mode == SelectionMode::Multiple,
            last_view: match self.active_view {
                ActiveView::Artworks => "artworks".to_string(),
                ActiveView::Customers => "customers".to_string(),
            },
        };
        settings.save(&self.data_dir);
    }

    // ------------------------------------------------------------------
    // Selection - keyed by record id, shared by both views
    // ------------------------------------------------------------------

    fn selection_for(&mut self, view: ActiveView) -> &mut HashSet<u64> {
        match view {
            ActiveView::Artworks => &mut self.selected_artworks,
            ActiveView::Customers => &mut self.selected_customers,
        }
    }

    /// Row clicked: single mode replaces the selection, multiple toggles
    pub(crate) fn selection_changed(&mut self, view: ActiveView, id: u64) {
        let mode = self.selection_mode;
        apply_selection(self.selection_for(view), mode, id);
    }

    /// Select every row on the currently displayed page
    pub(crate) fn select_page(&mut self, view: ActiveView) {
        match view {
            ActiveView::Artworks => {
                let ids: Vec<u64> = self.artworks.iter().map(|a| a.id).collect();
                self.selected_artworks.extend(ids);
            }
            ActiveView::Customers => {
                let ids: Vec<u64> = self
                    .visible_customer_rows()
                    .iter()
                    .map(|&i| self.customers[i].id)
                    .collect();
                self.selected_customers.extend(ids);
            }
        }
    }

    pub(crate) fn clear_selection(&mut self, view: ActiveView) {
        self.selection_for(view).clear();
    }

    pub(crate) fn selected_count(&self, view: ActiveView) -> usize {
        match view {
            ActiveView::Artworks => self.selected_artworks.len(),
            ActiveView::Customers => self.selected_customers.len(),
        }
    }
}

/// Apply one row click to a selection set. Keys are record ids, so the set is
/// unaffected by which page the rows came from.
fn apply_selection(selected: &mut HashSet<u64>, mode: SelectionMode, id: u64) {
    match mode {
        SelectionMode::Single => {
            let was_only = selected.len() == 1 && selected.contains(&id);
            selected.clear();
            if !was_only {
                selected.insert(id);
            }
        }
        SelectionMode::Multiple => {
            if !selected.insert(id) {
                selected.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode_replaces_the_selection() {
        let mut selected = HashSet::new();
        apply_selection(&mut selected, SelectionMode::Single, 10);
        apply_selection(&mut selected, SelectionMode::Single, 20);
        assert_eq!(selected, HashSet::from([20]));
    }

    #[test]
    fn single_mode_click_on_sole_selection_deselects() {
        let mut selected = HashSet::from([10]);
        apply_selection(&mut selected, SelectionMode::Single, 10);
        assert!(selected.is_empty());
    }

    #[test]
    fn multiple_mode_toggles_membership() {
        let mut selected = HashSet::new();
        apply_selection(&mut selected, SelectionMode::Multiple, 10);
        apply_selection(&mut selected, SelectionMode::Multiple, 20);
        assert_eq!(selected, HashSet::from([10, 20]));
        apply_selection(&mut selected, SelectionMode::Multiple, 10);
        assert_eq!(selected, HashSet::from([20]));
    }

    #[test]
    fn selections_from_different_pages_accumulate_by_id() {
        // Ids picked on page 1 stay intact while rows from page 2 are added
        let mut selected = HashSet::new();
        for id in [1, 2, 3] {
            apply_selection(&mut selected, SelectionMode::Multiple, id);
        }
        for id in [101, 102] {
            apply_selection(&mut selected, SelectionMode::Multiple, id);
        }
        assert_eq!(selected, HashSet::from([1, 2, 3, 101, 102]));
    }
}
