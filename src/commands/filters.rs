use anyhow::Result;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::render::Renderer;
use owo_colors::OwoColorize;

use super::open_session;
use crate::render::Render;

pub async fn run(config: &CronogramaConfig) -> Result<()> {
    let session = open_session(config, Renderer::immediate()).await?;

    let days: Vec<String> = session
        .day_options(&config.days, |day| config.day_label(day))
        .iter()
        .map(|o| o.render())
        .collect();

    let all = if session.selection().all_active() {
        format!("{} {}", "●".green(), "Todos")
    } else {
        format!("{} {}", "○".dimmed(), "Todos".dimmed())
    };
    let mut buttons = vec![all];
    buttons.extend(session.filter_options().iter().map(|o| o.render()));

    println!("{}", "Días".bold());
    println!("  {}", days.join(" "));
    println!("{}", "Filtros".bold());
    println!("  {}", buttons.join("  "));
    println!();
    println!("{}", session.view().counter().dimmed());

    Ok(())
}
