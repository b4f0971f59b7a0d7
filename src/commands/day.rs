use anyhow::Result;
use cronograma_core::Day;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::render::Renderer;
use owo_colors::OwoColorize;

use super::open_session;
use crate::render::render_view;

pub async fn run(config: &CronogramaConfig, day: Day) -> Result<()> {
    let mut session = open_session(config, Renderer::immediate()).await?;

    if day == session.selection().day {
        println!("{}", format!("{} is already selected", config.day_label(day)).dimmed());
    } else if !session.store().contains_day(day) {
        println!("{}", format!("No activities scheduled for {}", config.day_label(day)).yellow());
    }

    let view = session.select_day(day);
    println!("{}", render_view(view));

    Ok(())
}
