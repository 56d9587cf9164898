//! Campaign wizard state management module.
//!
//! This module contains the state held while a campaign is being built:
//! - `CampaignStore`, the sole mutation surface for the draft and its validation
//! - `Router`, the route history produced by step navigation
//! - State error handling

mod error;
mod navigation;
pub(crate) mod store;

pub use error::{StateError, INCOMPLETE_SUBMISSION_MESSAGE};
pub use navigation::Router;
pub use store::CampaignStore;

/// Store shared between the caller and the network handler.
pub type SharedStore = std::sync::Arc<tokio::sync::Mutex<CampaignStore>>;
