use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color;
use crate::i18n::{percent, Language};
use crate::share::{share_links, SOURCE_URL};
use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Left side panel – year query, legend, sharing
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let tr = state.translations();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            query_panel(ui, state);
            ui.separator();

            // ---- Legend ----
            for (label, fill, stroke) in color::legend_entries(tr) {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, fill);
                    ui.painter().rect_stroke(
                        rect,
                        2.0,
                        egui::Stroke::new(1.0, stroke),
                        egui::StrokeKind::Inside,
                    );
                    ui.label(label);
                });
            }
            if state.load_status == LoadStatus::Ready {
                let avg = state.series.full_average();
                ui.label(RichText::new(tr.average_line(avg)).color(color::average_line()));
            }
            ui.separator();

            ui.label(tr.description);
            ui.add_space(4.0);
            ui.label(RichText::new(tr.chart_alt).italics().weak());
            ui.separator();

            // ---- Share links ----
            ui.strong(tr.share_text);
            for link in share_links(tr) {
                ui.hyperlink_to(link.label, link.url);
            }
        });
}

/// Year text box + submit button + result line.
///
/// Enter in the text box and the button dispatch to the same handler.
pub fn query_panel(ui: &mut Ui, state: &mut AppState) {
    let tr = state.translations();
    let range = state.config.query.range;

    ui.label((tr.year_label)(range.first, range.last));
    let submitted = ui
        .horizontal(|ui: &mut Ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.year_input)
                    .desired_width(80.0)
                    .hint_text(format!("{}", range.last)),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.button(tr.year_button).clicked();
            enter || clicked
        })
        .inner;

    if submitted {
        state.submit_year();
    }

    if let Some(text) = state.result_text() {
        let failed = state.outcome.as_ref().is_some_and(|o| o.error().is_some());
        let text = if failed {
            RichText::new(text).color(Color32::RED)
        } else {
            RichText::new(text).strong()
        };
        ui.label(text);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and language toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let tr = state.translations();
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(tr.main_title);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            // right_to_left: iterate in reverse so FR stays left of EN.
            for lang in Language::ALL.iter().rev() {
                if ui
                    .selectable_label(state.language == *lang, lang.code())
                    .clicked()
                {
                    state.set_language(*lang);
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Title(
                        lang.translations().page_title.to_string(),
                    ));
                }
            }
        });
    });

    if let LoadStatus::Failed(msg) = &state.load_status {
        ui.label(RichText::new(format!("{}: {msg}", tr.load_failed)).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Last-updated note, data source link and record count.
pub fn footer(ui: &mut Ui, state: &AppState) {
    let tr = state.translations();
    ui.horizontal(|ui: &mut Ui| {
        ui.label(tr.footer_text);
        ui.separator();
        ui.hyperlink_to(tr.source_text, SOURCE_URL);
        if let (Some(first), Some(last)) = (state.series.start(), state.series.end()) {
            ui.separator();
            ui.label(format!(
                "{} × {first}-{last}, {}: {}%",
                state.series.len(),
                tr.average_label,
                percent(state.series.full_average())
            ));
        }
    });
}
