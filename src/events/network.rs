use crate::api::{ApiError, CampaignApi};
use crate::campaign::{prepare_for_submission, CampaignStatus};
use crate::state::{SharedStore, StateError, INCOMPLETE_SUBMISSION_MESSAGE};
use anyhow::Result;
use log::*;

const SAVE_FAILED_MESSAGE: &str = "Failed to save campaign draft.";
const PUBLISH_FAILED_MESSAGE: &str = "Failed to publish campaign.";

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load { id: String },
    SaveDraft,
    Publish,
}

/// Specify struct for managing the campaign store with network events.
///
/// The store lock is only held while reading from or writing to the store,
/// never across a request.
pub struct Handler<'a> {
    store: &'a SharedStore,
    api: &'a CampaignApi,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to the store.
    ///
    pub fn new(store: &'a SharedStore, api: &'a CampaignApi) -> Self {
        Handler { store, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Load { id } => self.load(&id).await?,
            Event::SaveDraft => {
                self.save_draft().await?;
            }
            Event::Publish => {
                self.publish().await?;
            }
        }
        Ok(())
    }

    /// Replace the draft with the remote campaign. On failure the draft is
    /// left untouched and the error recorded in the store.
    ///
    pub async fn load(&mut self, id: &str) -> Result<(), StateError> {
        info!("Loading campaign {}...", id);
        self.store.lock().await.begin_request();

        match self.api.campaign(id).await {
            Ok(remote) => {
                self.store.lock().await.apply_loaded(remote);
                info!("Loaded campaign {}.", id);
                Ok(())
            }
            Err(e) => {
                let message = format!("Error loading campaign: {}", e.reason());
                self.store.lock().await.fail_request(&message);
                Err(StateError::Api { message, source: e })
            }
        }
    }

    /// Create or update the draft remotely, returning the campaign id.
    ///
    pub async fn save_draft(&mut self) -> Result<Option<String>, StateError> {
        let (id, prepared) = {
            let mut store = self.store.lock().await;
            store.begin_request();
            let draft = store.draft();
            (draft.id.clone(), prepare_for_submission(draft))
        };
        info!("Saving campaign draft {}...", id.as_deref().unwrap_or("(new)"));

        match self.api.save_draft(id.as_deref(), &prepared.payload).await {
            Ok(remote) => {
                let id = self
                    .store
                    .lock()
                    .await
                    .apply_saved(remote, CampaignStatus::Draft);
                info!("Saved campaign draft {}.", id.as_deref().unwrap_or("(no id)"));
                Ok(id)
            }
            Err(e) => Err(self.record_failure(e, SAVE_FAILED_MESSAGE, false).await),
        }
    }

    /// Submit the campaign for review. Nothing is sent unless every required
    /// section is complete.
    ///
    pub async fn publish(&mut self) -> Result<Option<String>, StateError> {
        let (id, prepared) = {
            let mut store = self.store.lock().await;
            if !store.validation().is_complete() {
                store.reject_submission(INCOMPLETE_SUBMISSION_MESSAGE);
                return Err(StateError::ValidationIncomplete);
            }
            store.begin_request();
            let draft = store.draft();
            (draft.id.clone(), prepare_for_submission(draft))
        };
        info!("Publishing campaign {}...", id.as_deref().unwrap_or("(new)"));

        match self.api.publish(id.as_deref(), &prepared.payload).await {
            Ok(remote) => {
                let mut store = self.store.lock().await;
                let id = store.apply_saved(remote, CampaignStatus::PendingReview);
                store.complete_submission();
                info!("Submitted campaign {} for review.", id.as_deref().unwrap_or("(no id)"));
                Ok(id)
            }
            Err(e) => Err(self.record_failure(e, PUBLISH_FAILED_MESSAGE, true).await),
        }
    }

    /// Record a failed save or publish, preferring the server's message.
    ///
    async fn record_failure(&self, e: ApiError, fallback: &str, submitting: bool) -> StateError {
        let message = e.server_message().unwrap_or(fallback).to_string();
        let mut store = self.store.lock().await;
        if submitting {
            store.reject_submission(&message);
        } else {
            store.fail_request(&message);
        }
        StateError::Api { message, source: e }
    }
}
