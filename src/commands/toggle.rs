use anyhow::Result;
use cronograma_core::Category;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::render::Renderer;
use owo_colors::OwoColorize;

use super::open_session;
use crate::render::{Render, render_view};

pub async fn run(config: &CronogramaConfig, category: &Category) -> Result<()> {
    let mut session = open_session(config, Renderer::immediate()).await?;

    let Some(filter) = category.filter() else {
        println!(
            "{}",
            format!("'{}' is always shown; filters unchanged", category).dimmed()
        );
        println!("{}", render_view(session.view()));
        return Ok(());
    };

    session.toggle(category);

    if let Some(option) = session.filter_options().into_iter().find(|o| o.filter == filter) {
        println!("{}", option.render());
        println!();
    }
    println!("{}", render_view(session.view()));

    Ok(())
}
