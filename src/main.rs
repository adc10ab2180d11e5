#![windows_subsystem = "windows"]
//! Artic Browser - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod customers;
mod fetch;
mod pager;
mod settings;
mod theme;
mod types;
mod ui;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use types::*;
use ui::components::{
    activity_bar, format_artist_display, format_currency_usd, format_date_us, format_inscriptions,
    format_year, paginator, styled_checkbox, PaginatorEvent,
};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "artic-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artic_browser=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Artic Browser");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Artic Browser starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 800.0)))
        .with_min_inner_size([980.0, 620.0])
        .with_title("Artic Browser");

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Artic Browser",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Kick off page 1 on the first frame
        if !self.initial_fetch_done {
            self.initial_fetch_done = true;
            self.page_requested(ctx, 1);
            if self.active_view == ActiveView::Customers {
                self.ensure_customers_loaded();
            }
        }

        // Apply any completed fetch (stale responses were already discarded)
        self.poll_artwork_fetch();

        self.render_toolbar(ctx);
        self.render_paginator_bar(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| match self.active_view {
                ActiveView::Artworks => self.render_artworks_view(ui),
                ActiveView::Customers => self.render_customers_view(ui),
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
        info!("Artic Browser exiting");
    }
}

impl App {
    // ------------------------------------------------------------------
    // Top toolbar: title, view tabs, selection controls
    // ------------------------------------------------------------------

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar")
            .exact_height(theme::TOOLBAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("ARTIC BROWSER")
                                .size(13.0)
                                .strong()
                                .color(theme::ACCENT),
                        )
                        .selectable(false),
                    );
                    ui.add_space(theme::SPACING_LG);

                    let mut switch_to = None;
                    if view_tab(ui, "Artworks", self.active_view == ActiveView::Artworks) {
                        switch_to = Some(ActiveView::Artworks);
                    }
                    if view_tab(ui, "Customers", self.active_view == ActiveView::Customers) {
                        switch_to = Some(ActiveView::Customers);
                    }
                    if let Some(view) = switch_to {
                        if view != self.active_view {
                            self.active_view = view;
                            if view == ActiveView::Customers {
                                self.ensure_customers_loaded();
                            }
                            self.save_settings();
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Selection mode: affects the click affordance only;
                        // the selection set itself is untouched on switch
                        let mut single_active = self.selection_mode == SelectionMode::Single;
                        if theme::segmented_toggle(ui, "Single", "Multiple", &mut single_active) {
                            self.selection_mode = if single_active {
                                SelectionMode::Single
                            } else {
                                SelectionMode::Multiple
                            };
                            self.save_settings();
                        }

                        ui.add_space(theme::SPACING_MD);

                        let view = self.active_view;
                        let selected = self.selected_count(view);
                        if ui
                            .add_enabled(selected > 0, theme::button("Clear"))
                            .clicked()
                        {
                            self.clear_selection(view);
                        }
                        if self.selection_mode == SelectionMode::Multiple
                            && ui.add(theme::button("Select page")).clicked()
                        {
                            self.select_page(view);
                        }
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("{} selected", selected))
                                    .size(12.0)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );

                        // Filter box, customers view only
                        if view == ActiveView::Customers {
                            ui.add_space(theme::SPACING_MD);
                            let response = egui::Frame::new()
                                .fill(theme::BG_INPUT)
                                .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
                                .corner_radius(theme::RADIUS_DEFAULT)
                                .inner_margin(egui::Margin::symmetric(8, 6))
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.spacing_mut().item_spacing.x = 4.0;
                                        ui.add(
                                            egui::Label::new(
                                                egui::RichText::new(
                                                    egui_phosphor::regular::MAGNIFYING_GLASS,
                                                )
                                                .size(13.0)
                                                .color(theme::TEXT_DIM),
                                            )
                                            .selectable(false),
                                        );
                                        ui.add(
                                            egui::TextEdit::singleline(&mut self.customer_filter)
                                                .hint_text("Filter name / country...")
                                                .frame(false)
                                                .desired_width(180.0),
                                        )
                                    })
                                    .inner
                                })
                                .inner;
                            if response.changed() {
                                // Filter change restarts paging from the top
                                self.customer_pages.page = 1;
                                self.apply_customer_filter();
                            }
                        }
                    });
                });
            });
    }

    // ------------------------------------------------------------------
    // Bottom paginator bar for the active view
    // ------------------------------------------------------------------

    fn render_paginator_bar(&mut self, ctx: &egui::Context) {
        let view = self.active_view;
        egui::TopBottomPanel::bottom("paginator")
            .exact_height(theme::PAGINATOR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                let event = match view {
                    ActiveView::Artworks => {
                        // Stays interactive while a fetch is in flight;
                        // superseded responses are discarded, not applied
                        let enabled = self.artwork_pages.total > 0;
                        paginator(ui, "artworks", &self.artwork_pages, enabled)
                    }
                    ActiveView::Customers => {
                        let enabled = self.customer_pages.total > 0;
                        paginator(ui, "customers", &self.customer_pages, enabled)
                    }
                };

                match (view, event) {
                    (ActiveView::Artworks, Some(PaginatorEvent::Page(page))) => {
                        let page = self.artwork_pages.clamped(page);
                        self.page_requested(ui.ctx(), page);
                    }
                    (ActiveView::Artworks, Some(PaginatorEvent::Limit(limit))) => {
                        self.artwork_pages.set_limit(limit);
                        self.page_requested(ui.ctx(), 1);
                        self.save_settings();
                    }
                    (ActiveView::Customers, Some(PaginatorEvent::Page(page))) => {
                        self.customer_pages.page = self.customer_pages.clamped(page);
                    }
                    (ActiveView::Customers, Some(PaginatorEvent::Limit(limit))) => {
                        self.customer_pages.set_limit(limit);
                        self.customer_pages.page = 1;
                        self.save_settings();
                    }
                    (_, None) => {}
                }
            });
    }

    // ------------------------------------------------------------------
    // Artworks table (server-paginated)
    // ------------------------------------------------------------------

    fn render_artworks_view(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        if let LoadPhase::Failed(message) = self.artwork_phase.clone() {
            self.render_fetch_error(ui, &message);
            return;
        }

        if self.artwork_phase == LoadPhase::Loading {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Loading artworks...")
                            .size(12.0)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_SM);
        }

        if self.artworks.is_empty() {
            if self.artwork_phase == LoadPhase::Ready {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("No artworks found.")
                                .size(14.0)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            }
            return;
        }

        let available_width = ui.available_width() - 40.0; // minus checkbox column
        let part = available_width / 9.0;
        let ctx = ui.ctx().clone();

        let mut clicked_id: Option<u64> = None;

        let table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0)
            .column(Column::exact(40.0))
            .column(Column::exact(part * 2.5).clip(true)) // Title
            .column(Column::exact(part * 1.3).clip(true)) // Origin
            .column(Column::exact(part * 2.7).clip(true)) // Artist
            .column(Column::exact(part * 1.7).clip(true)) // Inscriptions
            .column(Column::exact(part * 0.75)) // Start
            .column(Column::exact(part * 0.75)); // End

        table
            .header(theme::HEADER_HEIGHT, |mut header| {
                header.col(|_ui| {});
                for title in ["TITLE", "ORIGIN", "ARTIST", "INSCRIPTIONS", "START", "END"] {
                    header.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(title)
                                    .size(12.0)
                                    .strong()
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                }
            })
            .body(|mut body| {
                body.ui_mut().visuals_mut().selection.bg_fill = theme::TABLE_ROW_SELECTED;

                let dim = self.artwork_phase == LoadPhase::Loading;
                body.rows(theme::ROW_HEIGHT, self.artworks.len(), |mut row| {
                    let artwork = &self.artworks[row.index()];
                    let id = artwork.id;
                    let is_selected = self.selected_artworks.contains(&id);
                    row.set_selected(is_selected);

                    let text_color = if dim {
                        theme::TEXT_DIM
                    } else {
                        theme::TEXT_SECONDARY
                    };

                    row.col(|ui| {
                        ui.centered_and_justified(|ui| {
                            if styled_checkbox(ui, is_selected, 16.0).clicked() {
                                clicked_id = Some(id);
                            }
                        });
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(artwork.title.as_deref().unwrap_or(""))
                                    .size(13.0)
                                    .color(text_color),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(
                                    artwork.place_of_origin.as_deref().unwrap_or(""),
                                )
                                .size(13.0)
                                .color(text_color),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        let artist = format_artist_display(artwork.artist_display.as_deref())
                            .replace('\n', " ");
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(artist).size(13.0).color(text_color),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        let inscriptions =
                            format_inscriptions(artwork.inscriptions.as_deref()).replace('\n', " ");
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(inscriptions)
                                    .size(13.0)
                                    .color(text_color),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_year(artwork.date_start))
                                    .size(13.0)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_year(artwork.date_end))
                                    .size(13.0)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });

                    let response = row.response();
                    if response.hovered() {
                        ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked() {
                        clicked_id = Some(id);
                    }
                });
            });

        if let Some(id) = clicked_id {
            self.selection_changed(ActiveView::Artworks, id);
        }
    }

    fn render_fetch_error(&mut self, ui: &mut egui::Ui, message: &str) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            theme::section_frame()
                .fill(theme::STATUS_ERROR_BG)
                .show(ui, |ui| {
                    ui.set_max_width(420.0);
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                                    .size(28.0)
                                    .color(theme::STATUS_ERROR),
                            )
                            .selectable(false),
                        );
                        ui.add_space(theme::SPACING_SM);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new("Could not load artworks")
                                    .size(15.0)
                                    .strong(),
                            )
                            .selectable(false),
                        );
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(message)
                                    .size(12.0)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                        ui.add_space(theme::SPACING_MD);
                        let retry = format!("{}  Retry", egui_phosphor::regular::ARROW_CLOCKWISE);
                        if ui.add(theme::button_accent(retry)).clicked() {
                            self.retry_artwork_fetch(ui.ctx());
                        }
                    });
                });
        });
    }

    // ------------------------------------------------------------------
    // Customers table (client-paginated)
    // ------------------------------------------------------------------

    fn render_customers_view(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let visible: Vec<usize> = self.visible_customer_rows().to_vec();

        if visible.is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("No customers found.")
                            .size(14.0)
                            .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });
            return;
        }

        let available_width = ui.available_width() - 40.0 - 44.0; // checkbox + action columns
        let part = available_width / 7.5;
        let ctx = ui.ctx().clone();

        let mut clicked_id: Option<u64> = None;
        let mut sort_clicked: Option<CustomerSortColumn> = None;
        let mut copy_name: Option<String> = None;

        const SORTABLE: [(&str, CustomerSortColumn); 4] = [
            ("NAME", CustomerSortColumn::Name),
            ("COUNTRY", CustomerSortColumn::Country),
            ("DATE", CustomerSortColumn::Date),
            ("BALANCE", CustomerSortColumn::Balance),
        ];

        let table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0)
            .column(Column::exact(40.0))
            .column(Column::exact(part * 2.0).clip(true)) // Name
            .column(Column::exact(part * 1.6).clip(true)) // Country
            .column(Column::exact(part * 1.2)) // Date
            .column(Column::exact(part * 1.2)) // Balance
            .column(Column::exact(part * 1.5)) // Activity
            .column(Column::exact(44.0)); // Action

        table
            .header(theme::HEADER_HEIGHT, |mut header| {
                header.col(|_ui| {});
                for (title, column) in SORTABLE {
                    header.col(|ui| {
                        let is_sorted = self.customer_sort == Some(column);
                        let icon = if is_sorted {
                            match self.customer_sort_dir {
                                SortDirection::Ascending => egui_phosphor::regular::CARET_UP,
                                SortDirection::Descending => egui_phosphor::regular::CARET_DOWN,
                            }
                        } else {
                            egui_phosphor::regular::CARET_UP_DOWN
                        };
                        let color = if is_sorted {
                            theme::TEXT_PRIMARY
                        } else {
                            theme::TEXT_MUTED
                        };
                        let text = format!("{} {}", title, icon);
                        let resp = ui.add(
                            egui::Label::new(
                                egui::RichText::new(text).size(12.0).strong().color(color),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click()),
                        );
                        if resp.clicked() {
                            sort_clicked = Some(column);
                        }
                    });
                }
                header.col(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("ACTIVITY")
                                .size(12.0)
                                .strong()
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                });
                header.col(|_ui| {});
            })
            .body(|mut body| {
                body.ui_mut().visuals_mut().selection.bg_fill = theme::TABLE_ROW_SELECTED;

                body.rows(theme::ROW_HEIGHT, visible.len(), |mut row| {
                    let customer = &self.customers[visible[row.index()]];
                    let id = customer.id;
                    let is_selected = self.selected_customers.contains(&id);
                    row.set_selected(is_selected);

                    row.col(|ui| {
                        ui.centered_and_justified(|ui| {
                            if styled_checkbox(ui, is_selected, 16.0).clicked() {
                                clicked_id = Some(id);
                            }
                        });
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&customer.name)
                                    .size(13.0)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&customer.country.name)
                                    .size(13.0)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_date_us(customer.date))
                                    .size(13.0)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_currency_usd(customer.balance))
                                    .size(13.0)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .selectable(false),
                        );
                    });
                    row.col(|ui| {
                        activity_bar(ui, customer.activity);
                    });
                    row.col(|ui| {
                        let resp = ui.add(
                            egui::Label::new(
                                egui::RichText::new(egui_phosphor::regular::COPY)
                                    .size(14.0)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click()),
                        );
                        if resp.clicked() {
                            copy_name = Some(customer.name.clone());
                        }
                        resp.on_hover_text("Copy name");
                    });

                    let response = row.response();
                    if response.hovered() {
                        ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked() {
                        clicked_id = Some(id);
                    }
                    response.on_hover_text(format!(
                        "{}\nRep: {}\nStatus: {}{}",
                        customer.company,
                        customer.representative.name,
                        customer.status,
                        if customer.verified { " (verified)" } else { "" },
                    ));
                });
            });

        if let Some(column) = sort_clicked {
            self.toggle_customer_sort(column);
        }
        if let Some(id) = clicked_id {
            self.selection_changed(ActiveView::Customers, id);
        }
        if let Some(name) = copy_name {
            ui.ctx().copy_text(name);
        }
    }
}

/// Toolbar tab with an accent underline when active. Returns true on click.
fn view_tab(ui: &mut egui::Ui, label: &str, active: bool) -> bool {
    let color = if active {
        theme::TEXT_PRIMARY
    } else {
        theme::TEXT_MUTED
    };
    let resp = ui.add(
        egui::Label::new(egui::RichText::new(label).size(14.0).color(color))
            .selectable(false)
            .sense(egui::Sense::click()),
    );
    if active {
        let rect = resp.rect;
        ui.painter().line_segment(
            [
                egui::pos2(rect.left(), rect.bottom() + 4.0),
                egui::pos2(rect.right(), rect.bottom() + 4.0),
            ],
            egui::Stroke::new(2.0, theme::ACCENT),
        );
    }
    if resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    resp.clicked()
}
