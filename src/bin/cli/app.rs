use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use revsmart_lib::concepts::{Concept, ConceptRepository};
use revsmart_lib::config::Settings;
use revsmart_lib::reminders::{OutboxNotifier, ReminderDispatcher};
use revsmart_lib::AppState;

/// Shared application state for CLI commands
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let settings = Settings::load(config_path, data_dir)
            .context("Failed to load settings")?;
        let state = AppState::open(settings).context("Failed to open concept store")?;
        Ok(Self { state })
    }

    pub fn repository(&self) -> &ConceptRepository {
        &self.state.repository
    }

    pub fn dispatcher(&self) -> &ReminderDispatcher {
        &self.state.dispatcher
    }

    pub fn outbox(&self) -> &OutboxNotifier {
        &self.state.outbox
    }

    pub fn reminders_enabled(&self) -> bool {
        self.state.settings.reminders.enabled
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Find a concept by id, exact name, or unique name prefix (case-insensitive)
    pub async fn find_concept(&self, query: &str) -> Result<Concept> {
        if let Ok(id) = Uuid::parse_str(query.trim()) {
            return self
                .repository()
                .get_concept(id)
                .await
                .with_context(|| format!("No concept with id {}", id));
        }

        let mut matches = self
            .repository()
            .find_by_name(query)
            .await
            .context("Failed to load concepts")?;

        match matches.len() {
            0 => {
                let all = self.repository().load().await.context("Failed to load concepts")?;
                if all.is_empty() {
                    bail!("No concept matching '{}'. No concepts yet; add one with `add`.", query);
                }
                bail!("No concept matching '{}'. Available concepts:\n{}", query,
                    all.iter().map(|c| format!("  - {}", c.name)).collect::<Vec<_>>().join("\n"))
            }
            1 => Ok(matches.remove(0)),
            _ => bail!("Ambiguous concept '{}'. Matches:\n{}", query,
                matches.iter().map(|c| format!("  - {} ({})", c.name, c.id)).collect::<Vec<_>>().join("\n")),
        }
    }
}
