use crate::app::App;
use crate::ui::widgets::charts::render_accident_chart;
use crate::ui::widgets::map::render_spot_map;
use crate::ui::widgets::popup::centered_rect;
use blackspot_tui::view::{initial_center, to_chart_series, to_markers, LoadStatus, ViewContent};
use blackspot_tui::{Year, DISTRICTS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

const HIGHLIGHT: Color = Color::Rgb(0, 0, 238);

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Length(3), // Year and district selectors
            Constraint::Min(8),    // Chart and map
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_heading(app, f, layout[0]);
    render_selectors(app, f, layout[1]);
    render_content(app, f, layout[2]);
    render_status_line(app, f, layout[3]);
    render_shortcuts(f, layout[4]);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_heading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Incheon Black Spots ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let heading = Paragraph::new(TextLine::from(Span::styled(
        app.dashboard.heading(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(heading, area);
}

fn render_selectors(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    let selection = app.dashboard.selection();

    let years: Vec<TextLine<'_>> = Year::ALL
        .iter()
        .map(|year| TextLine::from(year.to_string()))
        .collect();
    let year_tabs = selector_tabs(years, " Year ").select(selection.year().index());
    f.render_widget(year_tabs, chunks[0]);

    let districts: Vec<TextLine<'_>> = DISTRICTS
        .iter()
        .map(|district| TextLine::from(district.name))
        .collect();
    let district_tabs = selector_tabs(districts, " District ").select(selection.district().index());
    f.render_widget(district_tabs, chunks[1]);
}

fn selector_tabs<'a>(titles: Vec<TextLine<'a>>, title: &'a str) -> Tabs<'a> {
    Tabs::new(titles)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"))
}

fn render_content(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.dashboard.result().content() {
        ViewContent::Fetching => {
            let throbber = Throbber::default()
                .label(ViewContent::Fetching.message().unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .throbber_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
            let mut state = app.throbber_state.clone();
            f.render_stateful_widget(throbber, centered_line(area), &mut state);
        }
        ViewContent::Records(records) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);

            render_accident_chart(&to_chart_series(records), f, chunks[0]);

            let markers = to_markers(records);
            if let Some(center) = initial_center(records) {
                render_spot_map(center, &markers, f, chunks[1]);
            }
        }
        other => {
            let color = if matches!(other, ViewContent::Failed) {
                Color::Red
            } else {
                Color::Gray
            };
            let message = Paragraph::new(Span::styled(
                other.message().unwrap_or_default(),
                Style::default().fg(color),
            ))
            .alignment(Alignment::Center);
            f.render_widget(message, centered_line(area));
        }
    }
}

fn centered_line(area: Rect) -> Rect {
    let width = area.width.min(30);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height / 2,
        width,
        height: 1.min(area.height),
    }
}

fn render_status_line(app: &App, f: &mut Frame<'_>, area: Rect) {
    let result = app.dashboard.result();
    let status = result.status();
    let status_style = match status {
        LoadStatus::Pending => Style::default().fg(Color::Yellow),
        LoadStatus::Success => Style::default().fg(Color::Green),
        LoadStatus::Failure => Style::default().fg(Color::Red),
    };

    let mut spans = vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(status.as_str(), status_style.add_modifier(Modifier::BOLD)),
    ];

    if status == LoadStatus::Success {
        spans.push(Span::styled(
            format!(" | {} spots", result.records().len()),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(
            format!(" | updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}

fn shortcuts_line() -> TextLine<'static> {
    let keys = [
        ("←/→", "District"),
        ("↑/↓", "Year"),
        ("1-8", "Jump"),
        ("r", "Refresh"),
        ("?", "Help"),
        ("q", "Quit"),
    ];

    let mut spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        let sep = if i + 1 == keys.len() { "" } else { " | " };
        spans.push(Span::styled(
            format!(": {desc}{sep}"),
            Style::default().fg(Color::Gray),
        ));
    }
    TextLine::from(spans)
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn key_line(key: &'static str, desc: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(desc),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Incheon Black Spots",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Accident black spots per district and survey year, as reported by the public accident API.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key_line("  ←/→ h/l", " - Previous / next district"),
        key_line("  ↑/↓ k/j", " - Previous / next year"),
        key_line("  Tab", " - Next year"),
        key_line("  1-8", " - Jump to district by position"),
        key_line("  r", " - Fetch the current selection again"),
        key_line("  ?/F1", " - Toggle this help popup"),
        key_line("  q", " - Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Districts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    for (i, district) in DISTRICTS.iter().enumerate() {
        lines.push(TextLine::from(format!(
            "  {} - {} ({})",
            i + 1,
            district.name,
            district.district_code
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blackspot_tui::api::{AccidentRecord, AccidentSource, FetchError};
    use blackspot_tui::view::Selection;
    use blackspot_tui::District;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    struct Never;

    #[async_trait]
    impl AccidentSource for Never {
        async fn fetch(&self, _: District, _: Year) -> Result<Vec<AccidentRecord>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn screen_text(app: &App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|f| render_main(app, f))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    #[tokio::test]
    async fn pending_result_shows_fetching_message() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Arc::new(Never), Selection::default());
        app.refresh();

        let text = screen_text(&app)?;
        assert!(text.contains("fetching data..."));
        assert!(text.contains("pending"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_result_shows_no_data_message() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Arc::new(Never), Selection::default());
        app.refresh();
        app.wait_for_outcome().await;

        let text = screen_text(&app)?;
        assert!(text.contains('자'));
        assert!(text.contains("success"));
        Ok(())
    }

    #[test]
    fn help_lists_every_district() {
        let lines = build_help_lines();
        for district in &DISTRICTS {
            assert!(lines
                .iter()
                .any(|line| line.to_string().contains(district.name)));
        }
    }
}
