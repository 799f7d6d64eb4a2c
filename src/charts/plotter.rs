//! Chart Plotter Module
//! Close price and its moving average as an interactive egui_plot line chart.

use crate::stats::TrendSummary;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

pub const PRICE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const AVERAGE_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange
pub const BULLISH_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
pub const BEARISH_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Creates the trend chart shown under each analyzed table.
pub struct ChartPlotter;

impl ChartPlotter {
    /// `[row, value]` pairs for the rows that have a value.
    pub fn series_points(values: &[Option<f64>]) -> Vec<[f64; 2]> {
        values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| [i as f64, v]))
            .collect()
    }

    /// Draw price and moving average against row number.
    pub fn draw_trend_chart(ui: &mut egui::Ui, id: &str, summary: &TrendSummary) {
        let price = Self::series_points(&summary.values);
        let average = Self::series_points(&summary.rolling_average);
        let last = price.last().copied();

        Plot::new(format!("trend_{}", id))
            .height(260.0)
            .legend(Legend::default())
            .x_axis_label("Row")
            .y_axis_label(summary.column.clone())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(price))
                        .color(PRICE_COLOR)
                        .width(1.5)
                        .name(&summary.column),
                );

                if !average.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(average))
                            .color(AVERAGE_COLOR)
                            .width(1.5)
                            .name(summary.average_column_name()),
                    );
                }

                // Highlight the latest close
                if let Some(point) = last {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![point]))
                            .radius(4.0)
                            .color(Self::signal_color(summary))
                            .name("Latest"),
                    );
                }
            });
    }

    pub fn signal_color(summary: &TrendSummary) -> Color32 {
        use crate::stats::TrendSignal;
        match summary.signal {
            TrendSignal::Bullish => BULLISH_COLOR,
            TrendSignal::Bearish => BEARISH_COLOR,
            TrendSignal::Neutral | TrendSignal::InsufficientData => Color32::GRAY,
        }
    }
}
