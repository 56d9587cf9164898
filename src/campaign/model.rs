//! Campaign draft data structures.
//!
//! These types hold the nested, UI-friendly representation of a campaign
//! while it is being built step by step. The flatter shape exchanged with the
//! remote API lives in `crate::api::resource`.

use super::steps::WizardStep;
use chrono::{DateTime, Duration, Utc};
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a campaign.
///
/// Variants are ordered so that client-side transitions can only move forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    New,
    Draft,
    PendingReview,
    Published,
    Archived,
}

impl CampaignStatus {
    /// Return the later of the current status and `target`.
    ///
    pub fn advance_to(self, target: CampaignStatus) -> CampaignStatus {
        self.max(target)
    }
}

/// Defines a service offered under the campaign.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
}

/// Core deal details shown on the listing.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealDetails {
    pub title: String,
    pub subtitle: String,
    pub category: String,
    pub is_virtual: bool,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub is_giftable: bool,
}

/// Merchant details denormalized onto the deal.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MerchantInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_website: Vec<String>,
    pub business_description: String,
    pub business_type: String,
    #[serde(rename = "instagramURL")]
    pub instagram_url: String,
    #[serde(rename = "facebookURL")]
    pub facebook_url: String,
}

impl Default for MerchantInfo {
    fn default() -> Self {
        MerchantInfo {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            business_website: vec![String::new()],
            business_description: String::new(),
            business_type: String::new(),
            instagram_url: String::new(),
            facebook_url: String::new(),
        }
    }
}

/// GeoJSON point, coordinates as `[longitude, latitude]`.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

fn point_type() -> String {
    "Point".to_string()
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GeoPoint {
            kind: point_type(),
            coordinates: vec![longitude, latitude],
        }
    }

    /// Placeholder used when a location has not been geocoded yet.
    ///
    pub fn placeholder() -> Self {
        GeoPoint::new(0.0, 0.0)
    }

    pub fn has_coordinate_pair(&self) -> bool {
        self.coordinates.len() == 2
    }
}

/// A physical location where vouchers can be redeemed.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub geo: Option<GeoPoint>,
}

impl BusinessLocation {
    pub fn has_coordinate_pair(&self) -> bool {
        self.geo.as_ref().map_or(false, GeoPoint::has_coordinate_pair)
    }
}

/// How customers redeem the voucher.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoucherInstructions {
    pub redemption_method: String,
    pub appointment_required: Option<bool>,
    pub contact_method: String,
    pub contact_value: String,
    pub service_area: String,
    pub business_locations: Vec<BusinessLocation>,
    pub additional_instructions: String,
}

/// Redemption constraints attached to the deal.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinePrint {
    pub voucher_limit: i64,
    pub repurchase_days: i64,
    pub valid_months: u32,
    pub single_use: bool,
    pub booking_limit: bool,
    pub booking_limit_value: i64,
    pub valid_for_new_customers_only: bool,
    pub age_restriction: bool,
    pub age_restriction_value: i64,
    pub other_restrictions: String,
}

impl Default for FinePrint {
    fn default() -> Self {
        FinePrint {
            voucher_limit: 1,
            repurchase_days: 30,
            valid_months: 3,
            single_use: false,
            booking_limit: false,
            booking_limit_value: 1,
            valid_for_new_customers_only: false,
            age_restriction: false,
            age_restriction_value: 18,
            other_restrictions: String::new(),
        }
    }
}

/// Merchant payout details. Held for the business-info step only; read from
/// local draft files but never serialized.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfo {
    pub bank_name: String,
    pub routing_number: String,
    pub account_number: String,
    pub tax_id: String,
    pub currency: String,
}

impl Default for PaymentInfo {
    fn default() -> Self {
        PaymentInfo {
            bank_name: String::new(),
            routing_number: String::new(),
            account_number: String::new(),
            tax_id: String::new(),
            currency: "EUR".to_string(),
        }
    }
}

/// A priced variant of the deal.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub stock: i64,
}

#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

/// A photo or video attached to the deal.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub id: String, // client-side identifier
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub is_primary: bool,
    pub media_id: Option<String>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub service: Option<String>,
    pub privacy_status: Option<String>,
}

/// Search engine metadata for the deal page.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    pub meta_description: String,
    pub keywords: Vec<String>,
}

/// Group-buy settings: the deal activates once enough participants join
/// within the time window.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupBuy {
    pub enabled: bool,
    pub min_participants: i64,
    pub max_participants: i64,
    pub duration_minutes: i64,
    pub auto_join: bool,
    pub auto_lock: bool,
    pub discount_tiers: Vec<serde_json::Value>,
    pub invite_boost_enabled: bool,
    pub invite_boost_slots: i64,
    pub early_access_minutes: i64,
    pub referral_boost: i64,
}

impl Default for GroupBuy {
    fn default() -> Self {
        GroupBuy {
            enabled: false,
            min_participants: 2,
            max_participants: 10,
            duration_minutes: 60 * 24,
            auto_join: true,
            auto_lock: true,
            discount_tiers: vec![],
            invite_boost_enabled: false,
            invite_boost_slots: 0,
            early_access_minutes: 0,
            referral_boost: 0,
        }
    }
}

/// Promotion mechanism. Exactly one sub-configuration applies at a time.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionMechanism {
    Discount,
    BuyGetFree,
    TieredDiscount,
    GiftWithPurchase,
    CreditPoints,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    #[default]
    PercentageOff,
    FixedAmountOff,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdType {
    #[default]
    Value,
    Quantity,
}

/// Which products a promotion rule applies to.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppliesTo {
    pub applies_to_type: String,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub collections: Vec<String>,
}

impl Default for AppliesTo {
    fn default() -> Self {
        AppliesTo {
            applies_to_type: "all_eligible".to_string(),
            products: vec![],
            categories: vec![],
            collections: vec![],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountConfig {
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: f64,
    pub max_discount_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BogoConfig {
    pub buy_quantity: u32,
    pub buy_condition: AppliesTo,
    pub get_quantity: u32,
    pub get_discount_type: DiscountType,
    pub get_discount_value: f64,
    pub get_condition: AppliesTo,
    pub max_gets_per_order: u32,
}

impl Default for BogoConfig {
    fn default() -> Self {
        BogoConfig {
            buy_quantity: 1,
            buy_condition: AppliesTo::default(),
            get_quantity: 1,
            get_discount_type: DiscountType::PercentageOff,
            get_discount_value: 0.0,
            get_condition: AppliesTo::default(),
            max_gets_per_order: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountTier {
    pub threshold: f64,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TieredDiscountConfig {
    pub threshold_type: ThresholdType,
    pub tiers: Vec<DiscountTier>,
    pub applies_to: AppliesTo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftWithPurchaseConfig {
    pub gift_products: Vec<String>,
    pub quantity_per_threshold: u32,
}

impl Default for GiftWithPurchaseConfig {
    fn default() -> Self {
        GiftWithPurchaseConfig {
            gift_products: vec![],
            quantity_per_threshold: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditPointsConfig {
    pub points_multiplier: f64,
    pub fixed_points: u32,
    pub points_per_value: f64,
}

/// Promotion attached to the deal.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Promotion {
    pub mechanism: Option<PromotionMechanism>,
    pub discount_config: DiscountConfig,
    pub bogo_config: BogoConfig,
    pub tiered_discount_config: TieredDiscountConfig,
    pub gift_with_purchase_config: GiftWithPurchaseConfig,
    pub credit_points_config: CreditPointsConfig,
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

impl Default for Promotion {
    fn default() -> Self {
        let now = Utc::now();
        Promotion {
            mechanism: None,
            discount_config: DiscountConfig::default(),
            bogo_config: BogoConfig::default(),
            tiered_discount_config: TieredDiscountConfig::default(),
            gift_with_purchase_config: GiftWithPurchaseConfig::default(),
            credit_points_config: CreditPointsConfig::default(),
            name: String::new(),
            description: String::new(),
            code: String::new(),
            auto_apply: false,
            stackable_with_all_others: false,
            priority_level: 50,
            start_date: now,
            end_date: now + Duration::days(365),
            min_order_value: 0.0,
            min_order_quantity: 0,
            applies_to: AppliesTo::default(),
            currency: "EUR".to_string(),
            max_uses_per_user: 0,
            max_total_uses: 0,
        }
    }
}

/// The campaign being assembled by the wizard.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignDraft {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String, // internal only
    pub status: CampaignStatus,
    pub current_step: WizardStep,
    pub selected_category: Option<String>,
    pub selected_services: Vec<Service>,
    pub selected_template: Option<String>,
    pub template_applied: bool,
    pub deal_details: DealDetails,
    pub targeting_options: Option<serde_json::Value>,
    pub merchant_info: MerchantInfo,
    pub voucher_instructions: VoucherInstructions,
    pub fine_print: FinePrint,
    #[serde(skip_serializing)]
    pub payment_info: PaymentInfo,
    pub options: Vec<DealOption>,
    pub media: Vec<MediaItem>,
    pub highlights: Vec<String>,
    pub descriptions: String,
    pub promotion: Promotion,
    pub schedule: Option<serde_json::Value>,
    pub publish_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub seo: Seo,
    pub group_buy: GroupBuy,
}

impl Default for CampaignDraft {
    fn default() -> Self {
        CampaignDraft {
            id: None,
            name: String::new(),
            status: CampaignStatus::New,
            current_step: WizardStep::first(),
            selected_category: None,
            selected_services: vec![],
            selected_template: None,
            template_applied: false,
            deal_details: DealDetails::default(),
            targeting_options: None,
            merchant_info: MerchantInfo::default(),
            voucher_instructions: VoucherInstructions::default(),
            fine_print: FinePrint::default(),
            payment_info: PaymentInfo::default(),
            options: vec![],
            media: vec![],
            highlights: vec![],
            descriptions: String::new(),
            promotion: Promotion::default(),
            schedule: None,
            publish_at: None,
            expires_at: None,
            created_at: None,
            updated_at: None,
            seo: Seo::default(),
            group_buy: GroupBuy::default(),
        }
    }
}

impl CampaignDraft {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}
