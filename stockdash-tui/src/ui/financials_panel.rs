//! Financials grid: one card per metric from the first financials period.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockdash_core::present::financial_cards;
use stockdash_core::StockSnapshot;

use crate::theme::Theme;

pub const HEIGHT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, snapshot: &StockSnapshot, theme: &Theme) {
    let cards = financial_cards(Some(snapshot));
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (col, card) in cols.iter().zip(&cards) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(format!(" {} ", card.label), theme.muted()));
        let value = Paragraph::new(Span::styled(card.value.as_str(), theme.text())).block(block);
        f.render_widget(value, *col);
    }
}
