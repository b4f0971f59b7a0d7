use anyhow::Result;
use cronograma_core::config::CronogramaConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CronogramaConfig) -> Result<()> {
    let config_path = CronogramaConfig::config_path()?;
    let storage = config.storage()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Schedule:  {}", config.source()?);
    println!("  Storage:   {}", storage.path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in toml::to_string_pretty(config)?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
