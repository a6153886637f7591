use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use revsmart_lib::concepts::Concept;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub async fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = app.now();
    let dashboard = app
        .repository()
        .dashboard(now)
        .await
        .context("Failed to load concepts")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}",
                terminal::paint(&format!("Welcome, {}!", dashboard.user_name), Color::BOLD, use_color)
            );
            println!();
            println!(
                "Review Progress: {}/{}  {}",
                dashboard.progress.completed,
                dashboard.progress.total,
                terminal::progress_bar(&dashboard.progress, 20)
            );

            println!();
            println!("{}", terminal::paint("Concepts Due Today", Color::BOLD, use_color));
            if dashboard.due.is_empty() {
                println!("  No concepts due today. Great job!");
            } else {
                print_table(&dashboard.due, now, Color::RED, use_color);
            }

            println!();
            println!("{}", terminal::paint("Upcoming Concepts", Color::BOLD, use_color));
            if dashboard.upcoming.is_empty() {
                println!("  Nothing scheduled. Add a concept with `add`.");
            } else {
                print_table(&dashboard.upcoming, now, Color::GRAY, use_color);
            }
        }
    }

    Ok(())
}

fn print_table(concepts: &[Concept], now: DateTime<Utc>, when_color: &str, use_color: bool) {
    let name_width = concepts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);
    let desc_width = 40;

    for concept in concepts {
        let when = match concept.next_review_at() {
            Some(next) => format!(
                "{} ({})",
                terminal::format_date(next),
                terminal::format_relative(next, now)
            ),
            None => "unscheduled".to_string(),
        };

        println!(
            "  {:<nw$}  {:<dw$}  {}",
            terminal::truncate(&concept.name, name_width),
            terminal::truncate(&concept.description, desc_width),
            terminal::paint(&when, when_color, use_color),
            nw = name_width,
            dw = desc_width
        );
    }
}
