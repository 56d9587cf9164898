//! Wire representations exchanged with the campaigns API.
//!
//! The remote shape is flatter than the local draft: deal details, merchant
//! fields and SEO fields live at the top level, services are plain names and
//! the pricing is either a flat price or a list of options, never both.

use crate::campaign::model::*;
use crate::campaign::patch::{
    FinePrintPatch, GroupBuyPatch, PromotionPatch, SeoPatch, VoucherInstructionsPatch,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Flat pricing, sent only for deals without priced options.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPricing {
    pub price: Option<f64>,
    pub original_price: Option<f64>,
}

/// Media item as stored by the API.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMediaItem {
    pub media_id: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub is_primary: bool,
    pub service: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub privacy_status: String,
}

impl From<&MediaItem> for WireMediaItem {
    fn from(item: &MediaItem) -> Self {
        WireMediaItem {
            media_id: item.media_id.clone(),
            url: item.url.clone(),
            kind: item.kind,
            is_primary: item.is_primary,
            service: item.service.clone().unwrap_or_else(|| "other".to_string()),
            title: item.title.clone(),
            description: item.description.clone(),
            tags: item.tags.clone(),
            privacy_status: item
                .privacy_status
                .clone()
                .unwrap_or_else(|| "public".to_string()),
        }
    }
}

/// The configuration of the active promotion mechanism, keyed by its wire
/// field name.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PromotionConfig {
    DiscountConfig(DiscountConfig),
    BogoConfig(BogoConfig),
    TieredDiscountConfig(TieredDiscountConfig),
    GiftWithPurchaseConfig(GiftWithPurchaseConfig),
    CreditPointsConfig(CreditPointsConfig),
}

/// Promotion as sent to the API: the mechanism and its config only.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePromotion {
    pub mechanism: PromotionMechanism,
    #[serde(flatten)]
    pub config: PromotionConfig,
    pub name: String,
    pub description: String,
    pub code: String,
    pub auto_apply: bool,
    pub stackable_with_all_others: bool,
    pub priority_level: u8,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_order_value: f64,
    pub min_order_quantity: u32,
    pub applies_to: AppliesTo,
    pub currency: String,
    pub max_uses_per_user: u32,
    pub max_total_uses: u32,
}

/// Request body for the draft and publish endpoints.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: CampaignStatus,
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub is_virtual: bool,
    pub is_giftable: bool,
    #[serde(flatten)]
    pub pricing: Option<FlatPricing>,
    pub options: Vec<DealOption>,
    pub services: Vec<String>,
    pub media: Vec<WireMediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_video_url: Option<String>,
    pub highlights: Vec<String>,
    pub description: String,
    pub fine_print: FinePrint,
    pub voucher_instructions: VoucherInstructions,
    pub merchant_name: String,
    pub merchant_email: String,
    pub merchant_phone: String,
    pub business_website: String,
    #[serde(rename = "instagramURL")]
    pub instagram_url: String,
    #[serde(rename = "facebookURL")]
    pub facebook_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting_options: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub group_buy: GroupBuy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<WirePromotion>,
}

/// Campaign record returned by the API. Every field is optional; missing
/// fields are resolved against the local draft when merging.
///
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteCampaign {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub status: Option<CampaignStatus>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub is_virtual: Option<bool>,
    pub is_giftable: Option<bool>,
    /// `None` when absent, `Some(None)` when explicitly `null`.
    #[serde(deserialize_with = "nullable")]
    pub price: Option<Option<f64>>,
    #[serde(deserialize_with = "nullable")]
    pub original_price: Option<Option<f64>>,
    pub options: Option<Vec<DealOption>>,
    pub services: Option<Vec<String>>,
    pub media: Option<Vec<MediaItem>>,
    pub highlights: Option<Vec<String>>,
    pub description: Option<String>,
    pub fine_print: Option<FinePrintPatch>,
    pub voucher_instructions: Option<VoucherInstructionsPatch>,
    pub merchant_name: Option<String>,
    pub merchant_email: Option<String>,
    pub merchant_phone: Option<String>,
    pub business_website: Option<String>,
    #[serde(rename = "instagramURL")]
    pub instagram_url: Option<String>,
    #[serde(rename = "facebookURL")]
    pub facebook_url: Option<String>,
    pub targeting_options: Option<serde_json::Value>,
    pub publish_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub seo: Option<SeoPatch>,
    pub group_buy: Option<GroupBuyPatch>,
    pub promotion: Option<PromotionPatch>,
}

/// Deserialize a present field, keeping an explicit `null` as `Some(None)`.
///
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Error body returned by the API on non-success responses.
///
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
