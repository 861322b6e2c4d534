use anyhow::Result;
use eframe::egui::{self, Color32};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use super::{Chart, Renderer, Series};

const PALETTE: [Color32; 4] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
];

const MARKER_RADIUS: f32 = 3.0;

/// Opens a native window and blocks until it is closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Window;

impl Renderer for Window {
    fn render(&self, chart: &Chart) -> Result<()> {
        let app = ChartApp {
            chart: chart.clone(),
        };

        eframe::run_native(
            &chart.title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| anyhow::anyhow!("Can't show chart {:?}: {}", chart.title, e))
    }
}

struct ChartApp {
    chart: Chart,
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.chart.title);
            show_plot(ui, &self.chart);
        });
    }
}

fn show_plot(ui: &mut egui::Ui, chart: &Chart) {
    let labels = chart.labels.clone();
    let x_axis = AxisHints::new_x()
        .label(chart.x_label.clone())
        .formatter(move |grid_mark, _range| label_at(&labels, grid_mark.value));
    let y_axis = AxisHints::new_y()
        .label(chart.y_label.clone())
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
        .placement(HPlacement::Left);

    Plot::new("rates")
        .legend(Legend::default().position(Corner::LeftTop))
        .custom_x_axes(vec![x_axis])
        .custom_y_axes(vec![y_axis])
        .show(ui, |plot_ui| {
            for (series, color) in chart.series.iter().zip(PALETTE.iter().cycle()) {
                // Same name on every piece keeps one legend entry per series.
                for segment in segments(series) {
                    plot_ui.line(
                        Line::new(&series.name, PlotPoints::new(segment.clone())).color(*color),
                    );
                    if series.markers {
                        plot_ui.points(
                            Points::new(&series.name, PlotPoints::new(segment))
                                .color(*color)
                                .radius(MARKER_RADIUS),
                        );
                    }
                }
            }
        });
}

/// Date label for an x grid mark; marks between days stay blank.
fn label_at(labels: &[String], x: f64) -> String {
    if x.fract() != 0.0 || x < 0.0 {
        return String::new();
    }

    labels.get(x as usize).cloned().unwrap_or_default()
}

/// Runs of consecutive present values as `[x, y]` points.
fn segments(series: &Series) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (i, value) in series.values.iter().enumerate() {
        match value {
            Some(y) => current.push([i as f64, *y]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_on_whole_days() {
        let labels = vec!["20.04.2022".to_string(), "21.04.2022".to_string()];

        assert_eq!(label_at(&labels, 0.0), "20.04.2022");
        assert_eq!(label_at(&labels, 1.0), "21.04.2022");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -1.0), "");
        assert_eq!(label_at(&labels, 2.0), "");
    }

    #[test]
    fn gaps_split_series_into_segments() {
        let series = Series {
            name: "PrivatBank".to_string(),
            values: vec![Some(1.0), Some(2.0), None, Some(4.0), None],
            markers: true,
        };

        assert_eq!(
            segments(&series),
            vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[3.0, 4.0]]]
        );
    }
}
