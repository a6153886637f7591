use anyhow::{Context, Result};

use revsmart_lib::concepts::NewConcept;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(
    app: &App,
    name: String,
    description: String,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let now = app.now();
    let concept = app
        .repository()
        .add_concept(NewConcept { name, description }, now)
        .await
        .context("Failed to add concept")?;

    // The concept is already stored; a reminder failure is reported but does
    // not fail the command.
    let reminder = if app.reminders_enabled() {
        match app.dispatcher().dispatch_for_new_concept(&concept, now).await {
            Ok(reminder) => reminder,
            Err(e) => {
                log::warn!("Failed to schedule reminder for '{}': {}", concept.name, e);
                eprintln!("Warning: could not schedule a reminder: {}", e);
                None
            }
        }
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "concept": concept,
                "reminder": reminder,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Added {}",
                terminal::paint(&format!("\"{}\"", concept.name), Color::BOLD, use_color)
            );
            let plan = concept
                .checkpoints
                .iter()
                .map(|d| terminal::format_date(*d))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  Reviews planned: {}", plan);
            if let Some(reminder) = reminder {
                println!(
                    "  Reminder set for {}",
                    terminal::format_datetime(reminder.trigger_at)
                );
            }
            println!("  ID: {}", concept.id);
        }
    }

    Ok(())
}
