use anyhow::Result;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::render::Renderer;

use super::open_session;
use crate::render::{Render, render_view};

pub async fn run(config: &CronogramaConfig) -> Result<()> {
    let mut session = open_session(config, Renderer::immediate()).await?;
    session.toggle_all();

    let buttons: Vec<String> = session.filter_options().iter().map(|o| o.render()).collect();
    println!("{}", buttons.join("  "));
    println!();
    println!("{}", render_view(session.view()));

    Ok(())
}
