//! Peer comparison table with the CSV export hint.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use stockdash_core::present::peer_rows;
use stockdash_core::StockSnapshot;

use crate::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, snapshot: &StockSnapshot, theme: &Theme) {
    let rows: Vec<Row> = peer_rows(snapshot)
        .into_iter()
        .map(|peer| {
            Row::new(vec![
                Cell::from(Span::styled(peer.company, theme.text())),
                Cell::from(Span::styled(peer.price, theme.text())),
                Cell::from(Span::styled(peer.change, theme.change_style(peer.change_class))),
                Cell::from(Span::styled(peer.rating, theme.muted())),
            ])
        })
        .collect();

    let header = Row::new(vec!["Company", "Price", "Change", "Rating"]).style(theme.accent_bold());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(" Peer Comparison ", theme.accent_bold()))
        .title_bottom(Line::from(Span::styled(" [Ctrl+X] Export CSV ", theme.muted())).right_aligned());

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}
