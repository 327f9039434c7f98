use blackspot_tui::view::{
    initial_center, to_chart_series, to_markers, ChartRow, GeoPoint, LoadStatus, Marker,
    ViewContent,
};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;

use crate::app::{handle_input, App};
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run a single fetch for the initial selection and print it (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    let status = app.refresh_now().await;
    log::debug!("headless fetch settled: {status}");

    let report = build_headless_report(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_text(&report);
    }

    Ok(())
}

fn render_headless_text(report: &HeadlessReport) {
    println!("\n{}", report.heading);
    println!("{}", "=".repeat(report.heading.chars().count() * 2));

    if let Some(message) = &report.message {
        println!("{message}");
        return;
    }

    println!("\nBlack spots:");
    for row in &report.rows {
        println!(
            "- {} | 발생 {} | 부상 {} | 중상 {} | 사망 {}",
            row.label,
            row.occurrence_count,
            row.injury_count,
            row.serious_injury_count,
            row.death_count
        );
    }

    println!("\nMarkers:");
    for marker in &report.markers {
        println!(
            "- {:.5}, {:.5} {}",
            marker.position.lat, marker.position.lng, marker.label
        );
    }

    if let Some(center) = report.center {
        println!("\nMap center: {:.5}, {:.5}", center.lat, center.lng);
    }
}

fn build_headless_report(app: &App) -> HeadlessReport {
    let selection = app.dashboard.selection();
    let result = app.dashboard.result();
    let content = result.content();

    let (rows, markers, center) = match content {
        ViewContent::Records(records) => (
            to_chart_series(records),
            to_markers(records),
            initial_center(records),
        ),
        _ => (Vec::new(), Vec::new(), None),
    };

    HeadlessReport {
        heading: app.dashboard.heading(),
        year: selection.year().value(),
        district: selection.district().name,
        status: result.status(),
        message: content.message(),
        rows,
        markers,
        center,
    }
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    heading: String,
    year: u16,
    district: &'static str,
    status: LoadStatus,
    message: Option<&'static str>,
    rows: Vec<ChartRow>,
    markers: Vec<Marker>,
    center: Option<GeoPoint>,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    app.refresh();

    loop {
        app.update();
        app.drain_outcomes();

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Let spawned fetches make progress between polls
        tokio::task::yield_now().await;

        if matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Non-fatal: the next tick draws again
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        log::warn!("Redraw after resize failed: {e}");
                    }
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events
                }
            }
        }
    }
    Ok(())
}
