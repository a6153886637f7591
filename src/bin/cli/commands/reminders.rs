use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub async fn run(app: &App, all: bool, format: &OutputFormat) -> Result<()> {
    let now = app.now();
    let reminders = if all {
        app.outbox().list().await
    } else {
        app.outbox().pending(now).await
    }
    .context("Failed to read reminder outbox")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reminders)?);
        }
        OutputFormat::Plain => {
            if reminders.is_empty() {
                println!("No reminders{}.", if all { "" } else { " pending" });
                return Ok(());
            }

            for reminder in &reminders {
                let state = if reminder.is_pending(now) { "pending" } else { "fired" };
                println!(
                    "{}  {:<7}  {}",
                    terminal::format_datetime(reminder.trigger_at),
                    state,
                    reminder.body
                );
            }

            println!("\n{} reminders total", reminders.len());
        }
    }

    Ok(())
}
