//! Layout definitions for the TUI
//!
//! Tabs across the top, the active view in the middle, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// View tabs and the period selector
    pub tabs: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(5),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the dashboard view
pub struct DashboardLayout {
    /// Totals line
    pub summary: Rect,
    /// Goal gauge
    pub goal: Rect,
    pub categories: Rect,
    pub months: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Summary
                Constraint::Length(3), // Goal
                Constraint::Min(4),    // Breakdown
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        Self {
            summary: rows[0],
            goal: rows[1],
            categories: columns[0],
            months: columns[1],
        }
    }
}

/// Header plus content, used by the list and daily views
pub struct MainPanelLayout {
    pub header: Rect,
    pub content: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Content
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
