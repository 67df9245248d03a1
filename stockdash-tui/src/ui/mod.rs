//! Top-level UI layout — title, ticker input, dashboard body, status bar.

pub mod cards;
pub mod chart_panel;
pub mod financials_panel;
pub mod overlays;
pub mod peers_panel;
pub mod search_bar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use stockdash_core::present::{has_peers, price_series};
use stockdash_core::StockSnapshot;

use crate::app::{AppState, Overlay};
use crate::theme::Theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = app.theme();
    f.render_widget(Block::default().style(theme.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // input
            Constraint::Length(1), // loading / error
            Constraint::Min(3),    // body
            Constraint::Length(1), // status
        ])
        .split(f.area());

    draw_title(f, chunks[0], app, &theme);
    search_bar::render(f, chunks[1], app, &theme);
    search_bar::render_fetch_line(f, chunks[2], app, &theme);

    match app.fetch.snapshot() {
        Some(snapshot) => draw_body(f, chunks[3], snapshot, &theme),
        None => draw_empty_body(f, chunks[3], &theme),
    }

    status_bar::render(f, chunks[4], app, &theme);

    match app.overlay {
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[3], app, &theme),
        Overlay::None => {}
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Stock Dashboard ", theme.accent_bold()),
        Span::styled(format!("[{} theme]", app.theme_mode.label()), theme.muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Cards, then the optional chart, then financials, then the optional peer table.
fn draw_body(f: &mut Frame, area: Rect, snapshot: &StockSnapshot, theme: &Theme) {
    let series = price_series(snapshot);
    let show_peers = has_peers(Some(snapshot));

    let mut constraints = vec![Constraint::Length(cards::HEIGHT)];
    if !series.is_empty() {
        constraints.push(Constraint::Min(8));
    }
    constraints.push(Constraint::Length(financials_panel::HEIGHT));
    if show_peers {
        constraints.push(Constraint::Min(5));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut slots = chunks.iter().copied();

    if let Some(slot) = slots.next() {
        cards::render(f, slot, snapshot, theme);
    }
    if !series.is_empty() {
        if let Some(slot) = slots.next() {
            chart_panel::render(f, slot, &series, theme);
        }
    }
    if let Some(slot) = slots.next() {
        financials_panel::render(f, slot, snapshot, theme);
    }
    if show_peers {
        if let Some(slot) = slots.next() {
            peers_panel::render(f, slot, snapshot, theme);
        }
    }
}

fn draw_empty_body(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Type a ticker (e.g. INFY) and press Enter to fetch.",
            theme.muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::{WorkerCommand, WorkerResponse};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use stockdash_core::snapshot::{CompanyProfile, PeerCompany, TechnicalSample};
    use stockdash_core::FetchError;

    fn app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, PathBuf::from(".")), cmd_rx)
    }

    fn resolve(
        app: &mut AppState,
        rx: &mpsc::Receiver<WorkerCommand>,
        outcome: Result<Option<StockSnapshot>, FetchError>,
    ) {
        app.input = "INFY".into();
        app.submit();
        let Ok(WorkerCommand::Fetch { seq, .. }) = rx.try_recv() else {
            panic!("expected fetch");
        };
        app.apply_response(WorkerResponse::Fetched { seq, outcome });
    }

    fn render(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn full_snapshot() -> StockSnapshot {
        StockSnapshot {
            company_name: Some("Infosys Limited".into()),
            percent_change: Some("-1.5".into()),
            stock_technical_data: vec![
                TechnicalSample {
                    days: Some("5".into()),
                    nse_price: Some("1500".into()),
                },
                TechnicalSample {
                    days: Some("10".into()),
                    nse_price: Some("1480".into()),
                },
            ],
            company_profile: Some(CompanyProfile {
                peer_company_list: vec![PeerCompany {
                    company_name: Some("TCS".into()),
                    price: Some("3500".into()),
                    ..PeerCompany::default()
                }],
            }),
            ..StockSnapshot::default()
        }
    }

    #[test]
    fn idle_screen_shows_title_and_hint() {
        let (app, _rx) = app();
        let screen = render(&app);
        assert!(screen.contains("Stock Dashboard"));
        assert!(screen.contains("press Enter to fetch"));
    }

    #[test]
    fn loaded_screen_shows_every_section() {
        let (mut app, rx) = app();
        resolve(&mut app, &rx, Ok(Some(full_snapshot())));
        let screen = render(&app);
        assert!(screen.contains("Infosys Limited"));
        assert!(screen.contains("Price Trend"));
        assert!(screen.contains("Total Revenue"));
        assert!(screen.contains("Peer Comparison"));
        assert!(screen.contains("[Ctrl+X] Export CSV"));
    }

    #[test]
    fn sparse_snapshot_hides_chart_and_peers() {
        let (mut app, rx) = app();
        resolve(&mut app, &rx, Ok(Some(StockSnapshot::default())));
        let screen = render(&app);
        assert!(screen.contains("Total Revenue"));
        assert!(!screen.contains("Price Trend"));
        assert!(!screen.contains("Peer Comparison"));
    }

    #[test]
    fn failure_shows_message_and_no_body() {
        let (mut app, rx) = app();
        resolve(&mut app, &rx, Err(FetchError::Network("timeout".into())));
        let screen = render(&app);
        assert!(screen.contains("Failed to fetch data: timeout"));
        assert!(!screen.contains("Total Revenue"));
    }

    #[test]
    fn error_overlay_renders() {
        let (mut app, rx) = app();
        resolve(&mut app, &rx, Ok(None));
        app.push_error(crate::app::ErrorCategory::Export, "disk full".into(), "INFY".into());
        app.overlay = Overlay::ErrorHistory;
        let screen = render(&app);
        assert!(screen.contains("Error History"));
        assert!(screen.contains("disk full"));
    }
}
