use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, HLine, Legend, Plot};

use crate::color;
use crate::engine::highlight::Highlight;
use crate::engine::query::full_average;
use crate::i18n::percent;
use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Success-rate bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the bar chart in the central panel.
pub fn success_rate_chart(ui: &mut Ui, state: &AppState) {
    let tr = state.translations();

    match &state.load_status {
        LoadStatus::Loading => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(tr.loading);
            });
            return;
        }
        LoadStatus::Failed(msg) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!("{}: {msg}", tr.load_failed));
            });
            return;
        }
        LoadStatus::Ready => {}
    }

    let bars: Vec<Bar> = state
        .series
        .points()
        .iter()
        .map(|p| {
            let h = state
                .highlight
                .get(&p.year)
                .copied()
                .unwrap_or(Highlight::Default);
            Bar::new(p.year as f64, p.value)
                .width(0.8)
                .fill(color::fill(h))
                .stroke(Stroke::new(1.0, color::stroke(h)))
        })
        .collect();

    let tooltip = tr.chart_tooltip;
    let chart = BarChart::new(bars)
        .name(tr.chart_label)
        .color(color::stroke(Highlight::Default))
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            tooltip(bar.argument.round() as i32, &percent(bar.value))
        }));

    let average = full_average(&state.series);
    let average_line = HLine::new(average)
        .name(tr.average_line(average))
        .color(color::average_line())
        .width(2.0);

    Plot::new("success_rate_plot")
        .legend(Legend::default())
        .include_y(0.0)
        .y_axis_formatter(|mark, _range| format!("{}%", mark.value))
        .show_grid([false, true])
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.hline(average_line);
        });
}
