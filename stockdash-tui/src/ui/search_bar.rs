//! Ticker input box and the loading / error line beneath it.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockdash_core::Phase;

use crate::app::AppState;
use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Ticker ", theme.muted()))
        .title_bottom(Span::styled(" [Enter] fetch ", theme.muted()));

    let line = Line::from(vec![
        Span::styled("> ", theme.accent()),
        Span::styled(app.input.as_str(), theme.accent_bold()),
        Span::styled("_", theme.accent()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

/// `Loading...` while a request is in flight, the error text after a failure.
pub fn render_fetch_line(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let line = match app.fetch.phase() {
        Phase::Loading { ticker } => Line::from(Span::styled(
            format!(" Loading {ticker}..."),
            theme.warning(),
        )),
        Phase::Empty { .. } | Phase::Failed { .. } => Line::from(Span::styled(
            format!(" {}", app.fetch.error().unwrap_or_default()),
            theme.negative(),
        )),
        Phase::Idle | Phase::Loaded { .. } => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}
