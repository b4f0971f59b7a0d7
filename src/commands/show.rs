use anyhow::Result;
use cronograma_core::Day;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::render::Renderer;
use cronograma_core::session::Session;
use cronograma_core::storage::FileStorage;
use cronograma_core::visibility::{VisibilityEntry, VisibilityTracker};
use owo_colors::OwoColorize;
use tokio::time::Instant;

use super::open_session;
use crate::render::{Render, render_header, render_view};
use crate::utils::tui::is_interactive;

pub async fn run(config: &CronogramaConfig, day: Option<Day>, animate: bool) -> Result<()> {
    let animate = animate && is_interactive();
    let renderer = if animate {
        Renderer::with_tracker(VisibilityTracker::new())
    } else {
        Renderer::immediate()
    };

    let mut session = open_session(config, renderer).await?;
    if let Some(day) = day {
        session.select_day(day);
    }

    if animate {
        reveal(&mut session).await;
    } else {
        println!("{}", render_view(session.view()));
    }

    Ok(())
}

/// Print rows as they scroll into the terminal, each one waiting for its
/// stagger delay measured from the start of the reveal.
async fn reveal(session: &mut Session<FileStorage>) {
    println!("{}", render_header());

    let started = Instant::now();
    let rows: Vec<_> = session.view().rows.iter().map(|row| row.id).collect();

    for id in rows {
        if session.notify(&[VisibilityEntry::visible(id)]).is_empty() {
            continue;
        }
        let Some(row) = session.view().row(id) else {
            continue;
        };
        tokio::time::sleep_until(started + row.delay).await;
        println!("{}", row.render());
    }

    println!();
    println!("{}", session.view().counter().dimmed());
}
