use blackspot_tui::view::{GeoPoint, Marker, Viewport};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const MARKER_COLOR: Color = Color::Rgb(0xe7, 0x1d, 0x36);

/// Plots every black spot around `center`, framed so all of them are visible.
pub fn render_spot_map(center: GeoPoint, markers: &[Marker], f: &mut Frame<'_>, area: Rect) {
    let viewport = Viewport::framing(center, markers);
    let coords: Vec<(f64, f64)> = markers
        .iter()
        .map(|marker| (marker.position.lng, marker.position.lat))
        .collect();

    let title = format!(" Map ({:.4}, {:.4}) ", center.lat, center.lng);
    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds(viewport.lng_bounds())
        .y_bounds(viewport.lat_bounds())
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &coords,
                color: MARKER_COLOR,
            });
            ctx.layer();
            for marker in markers.iter().filter(|m| !m.label.is_empty()) {
                ctx.print(
                    marker.position.lng,
                    marker.position.lat,
                    Span::styled(marker.label.clone(), Style::default().fg(Color::White)),
                );
            }
        });

    f.render_widget(canvas, area);
}
