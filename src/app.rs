use crate::api::CampaignApi;
use crate::campaign::{prepare_for_submission, CampaignDraft, WizardStep};
use crate::config::Config;
use crate::error::AppResult;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::state::{CampaignStore, SharedStore};
use anyhow::Result;
use log::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Commands accepted by the application.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the wizard steps with their routes.
    Steps,
    /// Print the validation status of a draft file.
    Validate { path: PathBuf },
    /// Print the wire payload built from a draft file.
    Payload { path: PathBuf },
    /// Load a campaign from the API and print it.
    Show { id: String },
    /// Save a draft file to the API.
    Save { path: PathBuf },
    /// Submit a draft file for review.
    Publish { path: PathBuf },
}

/// Oversees command execution against the campaign store.
///
pub struct App {
    config: Config,
    store: SharedStore,
}

impl App {
    /// Run a single command according to the given configuration.
    ///
    pub async fn start(config: Config, command: Command) -> Result<()> {
        debug!("Running command {:?}...", command);
        let app = App {
            config,
            store: Arc::new(Mutex::new(CampaignStore::new())),
        };
        match command {
            Command::Steps => app.steps(),
            Command::Validate { path } => app.validate(&path).await?,
            Command::Payload { path } => app.payload(&path)?,
            Command::Show { id } => app.show(id).await?,
            Command::Save { path } => app.save(&path).await?,
            Command::Publish { path } => app.publish(&path).await?,
        }
        Ok(())
    }

    fn steps(&self) {
        for step in WizardStep::all() {
            let requires = step
                .validation_section()
                .map(|section| format!("{:?}", section))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:>2}. {:<28} {:<22} {}",
                step.position() + 1,
                step,
                requires,
                step.route()
            );
        }
    }

    async fn validate(&self, path: &Path) -> AppResult<()> {
        self.open(path).await?;
        let store = self.store.lock().await;
        println!("{}", serde_json::to_string_pretty(store.validation())?);
        Ok(())
    }

    fn payload(&self, path: &Path) -> AppResult<()> {
        let draft = read_draft(path)?;
        let prepared = prepare_for_submission(&draft);
        let output = json!({
            "payload": prepared.payload,
            "diagnostics": prepared.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    async fn show(&self, id: String) -> Result<()> {
        let api = self.api()?;
        NetworkEventHandler::new(&self.store, &api)
            .handle(NetworkEvent::Load { id })
            .await?;
        let store = self.store.lock().await;
        println!("{}", serde_json::to_string_pretty(store.draft())?);
        println!("overall: {:?}", store.validation().overall());
        Ok(())
    }

    async fn save(&self, path: &Path) -> Result<()> {
        self.open(path).await?;
        let api = self.api()?;
        let id = NetworkEventHandler::new(&self.store, &api).save_draft().await?;
        println!("saved {}", id.unwrap_or_default());
        Ok(())
    }

    async fn publish(&self, path: &Path) -> Result<()> {
        self.open(path).await?;
        let api = self.api()?;
        let id = NetworkEventHandler::new(&self.store, &api).publish().await?;
        let store = self.store.lock().await;
        println!(
            "submitted {} -> {}",
            id.unwrap_or_default(),
            store.router().current().unwrap_or_default()
        );
        Ok(())
    }

    /// Replace the store with a validated draft read from disk.
    ///
    async fn open(&self, path: &Path) -> AppResult<()> {
        let draft = read_draft(path)?;
        *self.store.lock().await = CampaignStore::with_draft(draft);
        Ok(())
    }

    fn api(&self) -> AppResult<CampaignApi> {
        Ok(CampaignApi::new(
            &self.config.base_url,
            self.config.access_token.as_deref(),
        )?)
    }
}

/// Read a draft saved as JSON in the local (nested) shape.
///
pub fn read_draft(path: &Path) -> AppResult<CampaignDraft> {
    debug!("Reading draft from {}...", path.display());
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignStatus;
    use crate::state::store::tests::complete_store;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use httpmock::MockServer;
    use uuid::Uuid;

    fn temp_draft_path() -> PathBuf {
        let name: Uuid = UUIDv4.fake();
        std::env::temp_dir().join(format!("draft-{}.json", name))
    }

    #[test]
    fn test_read_draft() -> AppResult<()> {
        let path = temp_draft_path();
        std::fs::write(
            &path,
            r#"{ "status": "draft", "dealDetails": { "title": "Spa day" } }"#,
        )?;
        let draft = read_draft(&path)?;
        assert_eq!(draft.status, CampaignStatus::Draft);
        assert_eq!(draft.deal_details.title, "Spa day");
        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_read_draft_missing_file() {
        let result = read_draft(Path::new("/nonexistent/draft.json"));
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_publish_complete_draft_file() -> Result<()> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/campaigns/publish")
                    .json_body_partial(r#"{ "title": "Spa day" }"#);
                then.status(201)
                    .json_body(json!({ "_id": "c7", "status": "pending_review" }));
            })
            .await;

        let store = complete_store();
        let mut draft = serde_json::to_value(store.draft())?;
        draft["paymentInfo"] = json!({
            "bankName": "ING",
            "routingNumber": "INGBNL2A",
            "accountNumber": "NL91ABNA0417164300",
            "taxId": "NL123456789B01"
        });
        let path = temp_draft_path();
        std::fs::write(&path, serde_json::to_string(&draft)?)?;

        let read = read_draft(&path)?;
        assert_eq!(read.payment_info, store.draft().payment_info);
        assert!(CampaignStore::with_draft(read).validation().is_complete());

        let mut config = Config::new();
        config.base_url = server.base_url();
        let result = App::start(config, Command::Publish { path: path.clone() }).await;
        std::fs::remove_file(&path)?;
        result?;
        mock.assert_async().await;
        Ok(())
    }
}
