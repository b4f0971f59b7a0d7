pub mod all;
pub mod config;
pub mod day;
pub mod filters;
pub mod show;
pub mod toggle;

use anyhow::Result;
use cronograma_core::config::CronogramaConfig;
use cronograma_core::filter_state::FilterState;
use cronograma_core::render::Renderer;
use cronograma_core::session::Session;
use cronograma_core::storage::FileStorage;

use crate::utils::tui::{create_spinner, is_interactive};

/// Restore saved choices and load the schedule, with a spinner on a terminal.
pub async fn open_session(config: &CronogramaConfig, renderer: Renderer) -> Result<Session<FileStorage>> {
    let source = config.source()?;
    let filters = FilterState::new(config.storage()?, config.default_day);

    if !is_interactive() {
        return Ok(Session::start(&source, filters, renderer).await);
    }

    let spinner = create_spinner(format!("Cargando {}", source));
    let session = Session::start(&source, filters, renderer).await;
    spinner.finish_and_clear();

    Ok(session)
}
