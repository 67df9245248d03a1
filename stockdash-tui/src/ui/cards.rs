//! Overview cards: a 3×2 grid of headline values.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockdash_core::present::{overview_cards, Card};
use stockdash_core::StockSnapshot;

use crate::theme::Theme;

/// Two rows of bordered one-line cards.
pub const HEIGHT: u16 = 6;

pub fn render(f: &mut Frame, area: Rect, snapshot: &StockSnapshot, theme: &Theme) {
    let cards = overview_cards(snapshot);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    for (row, chunk) in rows.iter().zip(cards.chunks(3)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(*row);
        for (col, card) in cols.iter().zip(chunk) {
            render_card(f, *col, card, theme);
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &Card, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(format!(" {} ", card.title), theme.muted()));

    let style = match card.change {
        Some(class) => theme.change_style(class),
        None => theme.text(),
    };
    let value = Paragraph::new(Span::styled(card.value.as_str(), style)).block(block);
    f.render_widget(value, area);
}
