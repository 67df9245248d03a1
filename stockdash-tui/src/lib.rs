//! Stockdash TUI — terminal stock dashboard.
//!
//! Layout, top to bottom:
//! 1. Title bar with the active theme
//! 2. Ticker input and the loading / error line
//! 3. Overview cards, price trend chart, financials grid, peer table
//! 4. Status bar

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use theme::{Theme, ThemeMode};
