//! Price trend line chart over the technical samples.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use stockdash_core::PriceSeries;

use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, series: &PriceSeries, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Price Trend (NSE) ", theme.accent_bold()));

    // Non-numeric samples are skipped; the line joins their neighbours.
    let data = series.points();
    let (min_y, max_y) = series.bounds().unwrap_or((0.0, 1.0));
    let padding = ((max_y - min_y).abs() * 0.05).max(1.0);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = series.len().saturating_sub(1) as f64;

    let dataset = Dataset::default()
        .name("NSE")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme.accent))
        .graph_type(GraphType::Line)
        .data(&data);

    let x_labels: Vec<Span> = match (series.labels.first(), series.labels.last()) {
        (Some(first), Some(last)) if series.len() > 1 => vec![
            Span::styled(first.as_str(), theme.muted()),
            Span::styled(last.as_str(), theme.muted()),
        ],
        (Some(only), _) => vec![Span::styled(only.as_str(), theme.muted())],
        _ => Vec::new(),
    };

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Period", theme.muted()))
                .style(theme.muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("₹", theme.muted()))
                .style(theme.muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme.muted()),
                    Span::styled(format!("{y_max:.0}"), theme.muted()),
                ]),
        );

    f.render_widget(chart, area);
}
