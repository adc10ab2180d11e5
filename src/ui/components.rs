//! Reusable UI components and cell formatters
//!
//! The formatters are pure string functions so the display contract can be
//! tested without a running UI.

use crate::constants::{ARTIST_DISPLAY_MAX, PAGE_SIZE_OPTIONS};
use crate::pager::PageState;
use crate::theme;
use chrono::{Datelike, NaiveDate};
use eframe::egui;

// ============================================================================
// CELL FORMATTERS
// ============================================================================

/// Truncate an artist display string to 40 characters with an ellipsis
pub fn format_artist_display(artist: Option<&str>) -> String {
    let text = artist.unwrap_or("");
    if text.chars().count() <= ARTIST_DISPLAY_MAX {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(ARTIST_DISPLAY_MAX).collect();
        out.push_str("...");
        out
    }
}

/// Empty or absent inscriptions display as the literal "N/A"
pub fn format_inscriptions(inscriptions: Option<&str>) -> &str {
    match inscriptions {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

/// en-US USD: `1234.5` renders as `$1,234.50`
pub fn format_currency_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}.{:02}", grouped, rem)
    } else {
        format!("${}.{:02}", grouped, rem)
    }
}

/// en-US short date: `9/13/2015`
pub fn format_date_us(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Numeric year fields render empty when the catalog has no value
pub fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

// ============================================================================
// WIDGETS
// ============================================================================

/// Custom checkbox widget with consistent styling
pub fn styled_checkbox(ui: &mut egui::Ui, selected: bool, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        if selected {
            painter.rect_filled(rect, rounding, theme::ACCENT);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CHECK,
                egui::FontId::proportional(size * 0.7),
                egui::Color32::BLACK,
            );
        } else {
            painter.rect_stroke(
                rect,
                rounding,
                egui::Stroke::new(1.5, theme::BORDER_DEFAULT),
                egui::StrokeKind::Inside,
            );
        }
    }

    response
}

/// Slim progress bar for the activity column (value 0..=100, no label)
pub fn activity_bar(ui: &mut egui::Ui, activity: u8) {
    let width = ui.available_width().max(40.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 6.0), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, theme::ACTIVITY_TRACK);
        let frac = (activity.min(100) as f32) / 100.0;
        if frac > 0.0 {
            let fill = egui::Rect::from_min_size(
                rect.min,
                egui::vec2((rect.width() * frac).max(6.0), rect.height()),
            );
            painter.rect_filled(fill, 3.0, theme::ACTIVITY_FILL);
        }
    }
}

/// Result of interacting with the paginator this frame
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PaginatorEvent {
    Page(u32),
    Limit(u32),
}

fn paginator_button(
    ui: &mut egui::Ui,
    label: &str,
    enabled: bool,
    active: bool,
) -> bool {
    let size = egui::vec2(30.0, 28.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return false;
    }

    let base = if active {
        theme::BTN_ACCENT
    } else if enabled {
        theme::TOGGLE_UNSELECTED
    } else {
        theme::BTN_DISABLED
    };
    let (fill, draw_rect) = if enabled && !active {
        theme::button_visual(&response, base, rect)
    } else {
        (base, rect)
    };
    ui.painter()
        .rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);

    let text_color = if active {
        egui::Color32::BLACK
    } else if enabled {
        theme::TEXT_SECONDARY
    } else {
        theme::TEXT_DIM
    };
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(12.0),
        text_color,
    );

    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    enabled && !active && response.clicked()
}

/// First / Prev / page links / Next / Last, the current-page report, and the
/// rows-per-page dropdown. Returns the interaction, if any.
pub fn paginator(
    ui: &mut egui::Ui,
    id: &str,
    state: &PageState,
    enabled: bool,
) -> Option<PaginatorEvent> {
    let mut event = None;
    let page_count = state.page_count();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = theme::SPACING_SM;

        let can_prev = enabled && state.can_prev();
        let can_next = enabled && state.can_next();

        if paginator_button(ui, egui_phosphor::regular::CARET_DOUBLE_LEFT, can_prev, false) {
            event = Some(PaginatorEvent::Page(1));
        }
        if paginator_button(ui, egui_phosphor::regular::CARET_LEFT, can_prev, false) {
            event = Some(PaginatorEvent::Page(state.page - 1));
        }

        for link in state.page_links() {
            match link {
                Some(n) => {
                    let active = n == state.page;
                    if paginator_button(ui, &n.to_string(), enabled, active) {
                        event = Some(PaginatorEvent::Page(n));
                    }
                }
                None => {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("…").color(theme::TEXT_DIM).size(12.0),
                        )
                        .selectable(false),
                    );
                }
            }
        }

        if paginator_button(ui, egui_phosphor::regular::CARET_RIGHT, can_next, false) {
            event = Some(PaginatorEvent::Page(state.page + 1));
        }
        if paginator_button(
            ui,
            egui_phosphor::regular::CARET_DOUBLE_RIGHT,
            can_next,
            false,
        ) {
            event = Some(PaginatorEvent::Page(page_count));
        }

        ui.add_space(theme::SPACING_LG);

        let report = format!(
            "Showing {} to {} of {} entries",
            state.first_row(),
            state.last_row(),
            state.total
        );
        ui.add(
            egui::Label::new(
                egui::RichText::new(report)
                    .size(12.0)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut limit = state.limit;
            egui::ComboBox::from_id_salt((id, "rows_per_page"))
                .width(64.0)
                .selected_text(limit.to_string())
                .show_ui(ui, |ui| {
                    for option in PAGE_SIZE_OPTIONS {
                        ui.selectable_value(&mut limit, option, option.to_string());
                    }
                });
            if limit != state.limit {
                event = Some(PaginatorEvent::Limit(limit));
            }
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Rows per page")
                        .size(12.0)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
    });

    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_at_limit_is_untouched() {
        let s = "a".repeat(40);
        assert_eq!(format_artist_display(Some(&s)), s);
    }

    #[test]
    fn artist_over_limit_truncates_with_ellipsis() {
        let s = "a".repeat(41);
        let displayed = format_artist_display(Some(&s));
        assert_eq!(displayed, format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn artist_truncation_counts_characters_not_bytes() {
        let s = "é".repeat(41);
        let displayed = format_artist_display(Some(&s));
        assert_eq!(displayed.chars().count(), 43);
        assert!(displayed.starts_with(&"é".repeat(40)));
        assert!(displayed.ends_with("..."));
    }

    #[test]
    fn artist_absent_displays_empty() {
        assert_eq!(format_artist_display(None), "");
    }

    #[test]
    fn inscriptions_substitution() {
        assert_eq!(format_inscriptions(None), "N/A");
        assert_eq!(format_inscriptions(Some("")), "N/A");
        assert_eq!(
            format_inscriptions(Some("inscribed: lower right")),
            "inscribed: lower right"
        );
    }

    #[test]
    fn currency_formats_like_en_us() {
        assert_eq!(format_currency_usd(1234.5), "$1,234.50");
        assert_eq!(format_currency_usd(0.0), "$0.00");
        assert_eq!(format_currency_usd(7.0), "$7.00");
        assert_eq!(format_currency_usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency_usd(-1234.5), "-$1,234.50");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency_usd(99.999), "$100.00");
        assert_eq!(format_currency_usd(0.005), "$0.01");
    }

    #[test]
    fn date_formats_without_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2015, 9, 13).unwrap();
        assert_eq!(format_date_us(date), "9/13/2015");
        let date = NaiveDate::from_ymd_opt(2020, 12, 1).unwrap();
        assert_eq!(format_date_us(date), "12/1/2020");
    }

    #[test]
    fn year_renders_empty_when_absent() {
        assert_eq!(format_year(Some(1873)), "1873");
        assert_eq!(format_year(None), "");
    }
}
