//! TUI rendering traits for cronograma types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to cronograma-core types using owo_colors.

use cronograma_core::category::StyleToken;
use cronograma_core::render::{HEADER, RenderOutput, RenderedRow};
use cronograma_core::session::{DayOption, FilterOption};
use owo_colors::OwoColorize;

/// Width of the time column, enough for "10:00 - 11:30".
const TIME_WIDTH: usize = 13;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn bar(style: &StyleToken) -> String {
    let (r, g, b) = style.accent;
    "▌".truecolor(r, g, b).to_string()
}

fn chip(label: &str, style: &StyleToken) -> String {
    let (r, g, b) = style.accent;
    format!(" {} ", label).on_truecolor(r, g, b).truecolor(0x02, 0x01, 0x17).to_string()
}

pub fn render_header() -> String {
    format!(
        "  {:<width$} {}",
        HEADER[0].bold(),
        HEADER[1].bold(),
        width = TIME_WIDTH
    )
}

impl Render for RenderedRow {
    fn render(&self) -> String {
        let time = format!("{:<width$}", self.time, width = TIME_WIDTH);
        let activity = if self.category.is_receso() {
            self.activity.italic().dimmed().to_string()
        } else {
            self.activity.clone()
        };

        match self.badge {
            Some(badge) => format!(
                "{} {} {} {}",
                bar(&self.style),
                time.dimmed(),
                activity,
                chip(badge, &self.style)
            ),
            None => format!("{} {} {}", bar(&self.style), time.dimmed(), activity),
        }
    }
}

impl Render for DayOption {
    fn render(&self) -> String {
        let label = format!("[{}]", self.label);
        if self.selected {
            label.bold().reversed().to_string()
        } else {
            label.dimmed().to_string()
        }
    }
}

impl Render for FilterOption {
    fn render(&self) -> String {
        let label = self.filter.label();
        if self.pressed {
            format!("{} {}", "●".green(), label)
        } else {
            format!("{} {}", "○".dimmed(), label.dimmed())
        }
    }
}

/// The full list: header, rows and the counter.
pub fn render_view(view: &RenderOutput) -> String {
    let mut lines = vec![render_header()];
    lines.extend(view.rows.iter().map(|row| row.render()));
    lines.push(String::new());
    lines.push(view.counter().dimmed().to_string());
    lines.join("\n")
}
