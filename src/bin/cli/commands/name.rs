use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub async fn run(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let name = app
        .repository()
        .set_user_name(name)
        .await
        .context("Failed to save name")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "userName": name });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Welcome, {}!", name);
        }
    }

    Ok(())
}
