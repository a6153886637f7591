use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let concept = app.find_concept(query).await?;
    let removed = app
        .repository()
        .remove_concept(concept.id)
        .await
        .context("Failed to remove concept")?;

    // A failed cleanup does not undo the removal
    let cancelled = match app.outbox().cancel_for(removed.id).await {
        Ok(count) => count,
        Err(e) => {
            log::warn!("Failed to cancel reminders for {}: {}", removed.id, e);
            0
        }
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": removed.id.to_string(),
                "name": removed.name,
                "removed": true,
                "remindersCancelled": cancelled,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Removed \"{}\"", removed.name);
            if cancelled > 0 {
                println!("  Cancelled {} pending reminder(s)", cancelled);
            }
        }
    }

    Ok(())
}
