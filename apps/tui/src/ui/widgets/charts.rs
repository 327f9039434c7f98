use blackspot_tui::view::chart::max_value;
use blackspot_tui::view::{ChartRow, Metric};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

const LINE_COLOR: Color = Color::Rgb(0xff, 0x73, 0x00);

pub const fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Occurrences => Color::Rgb(0xa8, 0x40, 0xff),
        Metric::Injuries => Color::Rgb(0x00, 0x99, 0x66),
        Metric::SeriousInjuries => Color::Rgb(0xff, 0xcb, 0x05),
        Metric::Deaths => Color::Rgb(0xe7, 0x1d, 0x36),
    }
}

/// Grouped bars per black spot with the occurrence trend underneath.
pub fn render_accident_chart(rows: &[ChartRow], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Black Spots ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(65),
            Constraint::Min(4),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(legend_line()), split[0]);
    render_metric_bars(rows, f, split[1]);
    render_occurrence_line(rows, f, split[2]);
}

fn legend_line() -> TextLine<'static> {
    let mut spans = Vec::new();
    for metric in Metric::ALL {
        spans.push(Span::styled("■ ", Style::default().fg(metric_color(metric))));
        spans.push(Span::styled(
            format!("{}  ", metric.label()),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled("─ ", Style::default().fg(LINE_COLOR)));
    spans.push(Span::styled(
        Metric::Occurrences.label(),
        Style::default().fg(Color::Gray),
    ));
    TextLine::from(spans)
}

fn render_metric_bars(rows: &[ChartRow], f: &mut Frame<'_>, area: Rect) {
    let bar_sets: Vec<Vec<Bar<'_>>> = rows
        .iter()
        .map(|row| {
            Metric::ALL
                .iter()
                .map(|metric| {
                    Bar::default()
                        .value(u64::from(row.value(*metric)))
                        .style(Style::default().fg(metric_color(*metric)))
                        .value_style(
                            Style::default()
                                .fg(Color::Black)
                                .bg(metric_color(*metric))
                                .add_modifier(Modifier::BOLD),
                        )
                })
                .collect()
        })
        .collect();

    let mut chart = BarChart::default()
        .bar_width(2)
        .bar_gap(0)
        .group_gap(2)
        .max(u64::from(max_value(rows)));

    for (row, bars) in rows.iter().zip(&bar_sets) {
        chart = chart.data(
            BarGroup::default()
                .label(TextLine::from(row.label.clone()))
                .bars(bars),
        );
    }

    f.render_widget(chart, area);
}

fn render_occurrence_line(rows: &[ChartRow], f: &mut Frame<'_>, area: Rect) {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index as f64, f64::from(row.occurrence_count)))
        .collect();

    let top = rows
        .iter()
        .map(|row| row.occurrence_count)
        .max()
        .unwrap_or(0)
        .max(1);
    let right = rows.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .name(Metric::Occurrences.label())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(LINE_COLOR))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, right]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, f64::from(top)])
                .labels(vec![Span::raw("0"), Span::raw(top.to_string())]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn row(label: &str, occurrences: u32) -> ChartRow {
        ChartRow {
            label: label.to_string(),
            occurrence_count: occurrences,
            injury_count: 2,
            serious_injury_count: 1,
            death_count: 0,
        }
    }

    #[test]
    fn renders_rows_with_legend() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        let rows = vec![row("인천 남동구", 9), row("인천 부평구", 4)];
        terminal.draw(|f| render_accident_chart(&rows, f, f.area()))?;

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Black Spots"));
        assert!(text.contains('■'));
        Ok(())
    }

    #[test]
    fn metric_colors_are_distinct() {
        for (i, a) in Metric::ALL.iter().enumerate() {
            for b in &Metric::ALL[i + 1..] {
                assert_ne!(metric_color(*a), metric_color(*b));
            }
        }
    }
}
