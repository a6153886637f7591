use anyhow::{Context, Result};

use revsmart_lib::concepts::dashboard::status;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(
    app: &App,
    query: &str,
    success: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let concept = app.find_concept(query).await?;
    let now = app.now();

    let updated = app
        .repository()
        .record_review(concept.id, success, now)
        .await
        .context("Failed to record review")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "concept": updated,
                "success": success,
                "nextReviewAt": updated.next_review_at(),
                "status": status(&updated, now),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let outcome = if success {
                terminal::paint("Remembered", Color::GREEN, use_color)
            } else {
                terminal::paint("Forgot", Color::RED, use_color)
            };
            println!("{} \"{}\"", outcome, updated.name);
            if let Some(next) = updated.next_review_at() {
                println!(
                    "  Next review: {} ({})",
                    terminal::format_datetime(next),
                    terminal::format_relative(next, now)
                );
            }
        }
    }

    Ok(())
}
