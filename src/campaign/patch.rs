//! Partial section updates.
//!
//! Each patch mirrors one section with every field optional. Merging a patch
//! produces a new section value where the fields present in the patch are
//! overwritten and every other field is carried over unchanged.

use super::model::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generate a patch struct for a section type along with its merge method.
///
macro_rules! section_patch {
    (
        $(#[$meta:meta])*
        $patch:ident => $section:ident {
            $($(#[$field_meta:meta])* $field:ident: $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $patch {
            $(
                $(#[$field_meta])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $patch {
            /// Return `section` with the fields set in this patch overwritten.
            ///
            pub fn merged(&self, section: &$section) -> $section {
                let mut next = section.clone();
                $(
                    if let Some(value) = &self.$field {
                        next.$field = value.clone();
                    }
                )*
                next
            }
        }
    };
}

section_patch! {
    /// Partial update for [`DealDetails`].
    DealDetailsPatch => DealDetails {
        title: String,
        subtitle: String,
        category: String,
        is_virtual: bool,
        price: Option<f64>,
        original_price: Option<f64>,
        is_giftable: bool,
    }
}

section_patch! {
    /// Partial update for [`MerchantInfo`].
    MerchantInfoPatch => MerchantInfo {
        name: String,
        email: String,
        phone: String,
        business_website: Vec<String>,
        business_description: String,
        business_type: String,
        #[serde(rename = "instagramURL")]
        instagram_url: String,
        #[serde(rename = "facebookURL")]
        facebook_url: String,
    }
}

section_patch! {
    /// Partial update for [`VoucherInstructions`].
    VoucherInstructionsPatch => VoucherInstructions {
        redemption_method: String,
        appointment_required: Option<bool>,
        contact_method: String,
        contact_value: String,
        service_area: String,
        business_locations: Vec<BusinessLocation>,
        additional_instructions: String,
    }
}

section_patch! {
    /// Partial update for [`FinePrint`].
    FinePrintPatch => FinePrint {
        voucher_limit: i64,
        repurchase_days: i64,
        valid_months: u32,
        single_use: bool,
        booking_limit: bool,
        booking_limit_value: i64,
        valid_for_new_customers_only: bool,
        age_restriction: bool,
        age_restriction_value: i64,
        other_restrictions: String,
    }
}

section_patch! {
    /// Partial update for [`Seo`].
    SeoPatch => Seo {
        meta_description: String,
        keywords: Vec<String>,
    }
}

section_patch! {
    /// Partial update for [`GroupBuy`].
    GroupBuyPatch => GroupBuy {
        enabled: bool,
        min_participants: i64,
        max_participants: i64,
        duration_minutes: i64,
        auto_join: bool,
        auto_lock: bool,
        discount_tiers: Vec<serde_json::Value>,
        invite_boost_enabled: bool,
        invite_boost_slots: i64,
        early_access_minutes: i64,
        referral_boost: i64,
    }
}

section_patch! {
    /// Partial update for [`Promotion`].
    PromotionPatch => Promotion {
        mechanism: Option<PromotionMechanism>,
        discount_config: DiscountConfig,
        bogo_config: BogoConfig,
        tiered_discount_config: TieredDiscountConfig,
        gift_with_purchase_config: GiftWithPurchaseConfig,
        credit_points_config: CreditPointsConfig,
        name: String,
        description: String,
        code: String,
        auto_apply: bool,
        stackable_with_all_others: bool,
        priority_level: u8,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        min_order_value: f64,
        min_order_quantity: u32,
        applies_to: AppliesTo,
        currency: String,
        max_uses_per_user: u32,
        max_total_uses: u32,
    }
}

section_patch! {
    /// Partial update for a single [`DealOption`].
    DealOptionPatch => DealOption {
        name: String,
        description: String,
        price: f64,
        original_price: Option<f64>,
        stock: i64,
    }
}

/// A partial update addressed to one section of the draft.
///
#[derive(Clone, Debug, PartialEq)]
pub enum SectionPatch {
    DealDetails(DealDetailsPatch),
    MerchantInfo(MerchantInfoPatch),
    VoucherInstructions(VoucherInstructionsPatch),
    FinePrint(FinePrintPatch),
    Seo(SeoPatch),
    GroupBuy(GroupBuyPatch),
    Promotion(PromotionPatch),
}

impl SectionPatch {
    /// Replace the addressed section of `draft` with its merged value.
    ///
    pub fn apply(&self, draft: &mut CampaignDraft) {
        match self {
            SectionPatch::DealDetails(p) => draft.deal_details = p.merged(&draft.deal_details),
            SectionPatch::MerchantInfo(p) => draft.merchant_info = p.merged(&draft.merchant_info),
            SectionPatch::VoucherInstructions(p) => {
                draft.voucher_instructions = p.merged(&draft.voucher_instructions)
            }
            SectionPatch::FinePrint(p) => draft.fine_print = p.merged(&draft.fine_print),
            SectionPatch::Seo(p) => draft.seo = p.merged(&draft.seo),
            SectionPatch::GroupBuy(p) => draft.group_buy = p.merged(&draft.group_buy),
            SectionPatch::Promotion(p) => draft.promotion = p.merged(&draft.promotion),
        }
    }
}
