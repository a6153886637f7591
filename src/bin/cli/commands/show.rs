use anyhow::Result;

use revsmart_lib::concepts::dashboard::{is_due, status};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let concept = app.find_concept(query).await?;
    let now = app.now();
    let status = status(&concept, now);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "concept": concept,
                "status": status,
                "isDue": is_due(&concept, now),
                "nextReviewAt": concept.next_review_at(),
                "reviewDates": concept.review_dates(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&concept.name, Color::BOLD, use_color));
            println!("{}", concept.description);
            println!();

            println!("Review Schedule:");
            match concept.next_review_at() {
                Some(next) => println!(
                    "  Next Review: {} ({})",
                    terminal::format_date(next),
                    terminal::format_relative(next, now)
                ),
                None => println!("  Next Review: unscheduled"),
            }
            match concept.last_reviewed_at() {
                Some(last) => println!("  Last Review: {}", terminal::format_date(last)),
                None => println!("  Last Review: never"),
            }
            println!(
                "  Status: {}",
                terminal::paint(&status.to_string(), terminal::status_color(status), use_color)
            );

            println!();
            println!("Planned checkpoints:");
            for date in &concept.checkpoints {
                println!("  {}", terminal::format_date(*date));
            }

            if !concept.review_log.is_empty() {
                println!();
                println!("Reviews:");
                for entry in &concept.review_log {
                    let outcome = match entry.success {
                        Some(true) => terminal::paint("remembered", Color::GREEN, use_color),
                        Some(false) => terminal::paint("forgot", Color::RED, use_color),
                        None => terminal::paint("unknown", Color::DIM, use_color),
                    };
                    let reviewed = entry
                        .reviewed_at
                        .map(terminal::format_date)
                        .unwrap_or_else(|| "-".repeat(10));
                    println!(
                        "  {}  {:<10}  next {}",
                        reviewed,
                        outcome,
                        terminal::format_date(entry.scheduled_for)
                    );
                }
            }

            println!();
            println!("ID: {}", concept.id);
        }
    }

    Ok(())
}
