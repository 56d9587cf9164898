//! Translation between the local draft and the API wire shape.

use super::model::*;
use crate::api::resource::{
    CampaignPayload, FlatPricing, PromotionConfig, RemoteCampaign, WireMediaItem, WirePromotion,
};
use chrono::{DateTime, Months, Utc};
use log::*;

/// Payload ready to send, plus any data-shape diagnostics raised while
/// building it.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedSubmission {
    pub payload: CampaignPayload,
    pub diagnostics: Vec<String>,
}

/// Expiry date `valid_months` calendar months after `publish_at`, clamped to
/// the end of shorter months. `None` when it cannot be calculated.
///
pub fn expiry_from(publish_at: DateTime<Utc>, valid_months: u32) -> Option<DateTime<Utc>> {
    if valid_months == 0 {
        return None;
    }
    publish_at.checked_add_months(Months::new(valid_months))
}

fn wire_promotion(mechanism: PromotionMechanism, promotion: &Promotion) -> WirePromotion {
    let config = match mechanism {
        PromotionMechanism::Discount => {
            PromotionConfig::DiscountConfig(promotion.discount_config.clone())
        }
        PromotionMechanism::BuyGetFree => PromotionConfig::BogoConfig(promotion.bogo_config.clone()),
        PromotionMechanism::TieredDiscount => {
            PromotionConfig::TieredDiscountConfig(promotion.tiered_discount_config.clone())
        }
        PromotionMechanism::GiftWithPurchase => {
            PromotionConfig::GiftWithPurchaseConfig(promotion.gift_with_purchase_config.clone())
        }
        PromotionMechanism::CreditPoints => {
            PromotionConfig::CreditPointsConfig(promotion.credit_points_config.clone())
        }
    };
    WirePromotion {
        mechanism,
        config,
        name: promotion.name.clone(),
        description: promotion.description.clone(),
        code: promotion.code.clone(),
        auto_apply: promotion.auto_apply,
        stackable_with_all_others: promotion.stackable_with_all_others,
        priority_level: promotion.priority_level,
        start_date: promotion.start_date,
        end_date: promotion.end_date,
        min_order_value: promotion.min_order_value,
        min_order_quantity: promotion.min_order_quantity,
        applies_to: promotion.applies_to.clone(),
        currency: promotion.currency.clone(),
        max_uses_per_user: promotion.max_uses_per_user,
        max_total_uses: promotion.max_total_uses,
    }
}

fn primary_url(media: &[MediaItem], kind: MediaType) -> Option<String> {
    media
        .iter()
        .find(|item| item.kind == kind && item.is_primary)
        .map(|item| item.url.clone())
}

/// Build the wire payload for a draft.
///
/// Selection helpers, validation state, the current step, the internal name,
/// template flags, the schedule and payment details are never part of the
/// payload.
///
pub fn prepare_for_submission(draft: &CampaignDraft) -> PreparedSubmission {
    let mut diagnostics = Vec::new();
    let mut diagnose = |message: String| {
        warn!("{}", message);
        diagnostics.push(message);
    };

    let details = &draft.deal_details;
    let pricing = if draft.has_options() {
        None
    } else {
        Some(FlatPricing {
            price: details.price,
            original_price: details.original_price,
        })
    };

    let mut voucher_instructions = draft.voucher_instructions.clone();
    for location in voucher_instructions.business_locations.iter_mut() {
        if !location.has_coordinate_pair() {
            diagnose(format!(
                "Geocoding not performed for location '{}, {}'; sending placeholder coordinates",
                location.address, location.city
            ));
            location.geo = Some(GeoPoint::placeholder());
        }
    }

    let expires_at = match (draft.expires_at, draft.publish_at) {
        (Some(expires_at), _) => Some(expires_at),
        (None, Some(publish_at)) => {
            let computed = expiry_from(publish_at, draft.fine_print.valid_months);
            if computed.is_none() {
                diagnose(format!(
                    "expiresAt could not be calculated from publishAt {} and validMonths {}",
                    publish_at, draft.fine_print.valid_months
                ));
            }
            computed
        }
        (None, None) => {
            diagnose("expiresAt could not be calculated: publishAt is not set".to_string());
            None
        }
    };

    let merchant = &draft.merchant_info;
    let payload = CampaignPayload {
        id: draft.id.clone(),
        status: draft.status,
        title: details.title.clone(),
        subtitle: details.subtitle.clone(),
        category: details.category.clone(),
        is_virtual: details.is_virtual,
        is_giftable: details.is_giftable,
        pricing,
        options: draft.options.clone(),
        services: draft
            .selected_services
            .iter()
            .map(|service| service.name.clone())
            .collect(),
        media: draft.media.iter().map(WireMediaItem::from).collect(),
        primary_image_url: primary_url(&draft.media, MediaType::Image),
        primary_video_url: primary_url(&draft.media, MediaType::Video),
        highlights: draft.highlights.clone(),
        description: draft.descriptions.clone(),
        fine_print: draft.fine_print.clone(),
        voucher_instructions,
        merchant_name: merchant.name.clone(),
        merchant_email: merchant.email.clone(),
        merchant_phone: merchant.phone.clone(),
        business_website: merchant.business_website.first().cloned().unwrap_or_default(),
        instagram_url: merchant.instagram_url.clone(),
        facebook_url: merchant.facebook_url.clone(),
        targeting_options: draft.targeting_options.clone(),
        publish_at: draft.publish_at,
        expires_at,
        meta_description: draft.seo.meta_description.clone(),
        keywords: draft.seo.keywords.clone(),
        group_buy: draft.group_buy.clone(),
        promotion: draft
            .promotion
            .mechanism
            .map(|mechanism| wire_promotion(mechanism, &draft.promotion)),
    };

    PreparedSubmission {
        payload,
        diagnostics,
    }
}

/// How missing remote fields are resolved when merging.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeMode {
    /// Loading a campaign: missing flat fields fall back to their defaults.
    Replace,
    /// Merging a save/publish response: missing or empty fields keep the
    /// locally held value.
    Preserve,
}

fn pick<T: Default>(remote: Option<T>, local: T, mode: MergeMode) -> T {
    match (remote, mode) {
        (Some(value), _) => value,
        (None, MergeMode::Replace) => T::default(),
        (None, MergeMode::Preserve) => local,
    }
}

fn pick_text(remote: Option<String>, local: &str, mode: MergeMode) -> String {
    match (remote, mode) {
        (Some(value), MergeMode::Replace) => value,
        (Some(value), MergeMode::Preserve) if !value.is_empty() => value,
        (None, MergeMode::Replace) => String::new(),
        (_, MergeMode::Preserve) => local.to_string(),
    }
}

fn with_client_ids(media: Vec<MediaItem>) -> Vec<MediaItem> {
    media
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            if item.id.is_empty() {
                item.id = item
                    .media_id
                    .clone()
                    .unwrap_or_else(|| format!("media-{}", index));
            }
            item
        })
        .collect()
}

/// Merge a remote campaign record into the local draft, returning the new
/// draft. Payment details, the current step and local-only selections are
/// always kept from `draft`.
///
pub fn merge_remote(draft: &CampaignDraft, remote: RemoteCampaign, mode: MergeMode) -> CampaignDraft {
    let mut next = draft.clone();
    let remote_has_options = remote.options.as_ref().map_or(false, |o| !o.is_empty());

    next.id = remote.id.or_else(|| draft.id.clone());
    next.status = match (remote.status, mode) {
        (Some(status), MergeMode::Replace) => status,
        (Some(status), MergeMode::Preserve) => draft.status.advance_to(status),
        (None, _) => draft.status,
    };

    let local = &draft.deal_details;
    let (price, original_price) = if remote_has_options && mode == MergeMode::Replace {
        (None, None)
    } else {
        (
            pick(remote.price, local.price, mode),
            pick(remote.original_price, local.original_price, mode),
        )
    };
    if mode == MergeMode::Replace {
        next.selected_category = remote.category.clone().filter(|c| !c.is_empty());
    }
    next.deal_details = DealDetails {
        title: pick_text(remote.title, &local.title, mode),
        subtitle: pick_text(remote.subtitle, &local.subtitle, mode),
        category: pick_text(remote.category, &local.category, mode),
        is_virtual: pick(remote.is_virtual, local.is_virtual, mode),
        price,
        original_price,
        is_giftable: pick(remote.is_giftable, local.is_giftable, mode),
    };

    let merchant = &draft.merchant_info;
    next.merchant_info = MerchantInfo {
        name: pick_text(remote.merchant_name, &merchant.name, mode),
        email: pick_text(remote.merchant_email, &merchant.email, mode),
        phone: pick_text(remote.merchant_phone, &merchant.phone, mode),
        business_website: match (remote.business_website.filter(|w| !w.is_empty()), mode) {
            (Some(website), _) => vec![website],
            (None, MergeMode::Replace) => vec![String::new()],
            (None, MergeMode::Preserve) => merchant.business_website.clone(),
        },
        instagram_url: pick_text(remote.instagram_url, &merchant.instagram_url, mode),
        facebook_url: pick_text(remote.facebook_url, &merchant.facebook_url, mode),
        ..merchant.clone()
    };

    let remote_locations = remote
        .voucher_instructions
        .as_ref()
        .and_then(|patch| patch.business_locations.clone());
    if let Some(patch) = remote.voucher_instructions {
        next.voucher_instructions = patch.merged(&draft.voucher_instructions);
    }
    if mode == MergeMode::Replace {
        next.voucher_instructions.business_locations = remote_locations
            .unwrap_or_default()
            .into_iter()
            .map(|mut location| {
                if location.geo.is_none() {
                    debug!("Location '{}' loaded without coordinates", location.address);
                    location.geo = Some(GeoPoint::placeholder());
                }
                location
            })
            .collect();
    }
    if let Some(patch) = remote.fine_print {
        next.fine_print = patch.merged(&draft.fine_print);
    }
    if let Some(patch) = remote.group_buy {
        next.group_buy = patch.merged(&draft.group_buy);
    }
    if let Some(patch) = remote.promotion {
        next.promotion = patch.merged(&draft.promotion);
    }
    next.seo = match (remote.seo, mode) {
        (Some(patch), MergeMode::Replace) => patch.merged(&Seo::default()),
        (Some(patch), MergeMode::Preserve) => patch.merged(&draft.seo),
        (None, MergeMode::Replace) => Seo::default(),
        (None, MergeMode::Preserve) => draft.seo.clone(),
    };

    next.options = pick(remote.options, draft.options.clone(), mode);
    if let Some(media) = remote.media {
        next.media = with_client_ids(media);
    }
    if let Some(services) = remote.services {
        next.selected_services = services
            .into_iter()
            .map(|name| Service {
                id: name.clone(),
                name,
            })
            .collect();
    } else if mode == MergeMode::Replace {
        next.selected_services = vec![];
    }
    next.highlights = pick(remote.highlights, draft.highlights.clone(), mode);
    next.descriptions = pick_text(remote.description, &draft.descriptions, mode);
    next.targeting_options = remote
        .targeting_options
        .or_else(|| draft.targeting_options.clone());
    next.publish_at = pick(remote.publish_at.map(Some), draft.publish_at, mode);
    next.expires_at = pick(remote.expires_at.map(Some), draft.expires_at, mode);
    next.created_at = remote.created_at.or(draft.created_at);
    next.updated_at = remote.updated_at.or(draft.updated_at);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::steps::WizardStep;
    use chrono::TimeZone;
    use fake::{Fake, Faker};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn priced_draft() -> CampaignDraft {
        let mut draft = CampaignDraft::default();
        draft.deal_details.title = "Spa day".to_string();
        draft.deal_details.price = Some(49.0);
        draft.deal_details.original_price = Some(99.0);
        draft
    }

    #[test]
    fn test_options_omit_flat_prices() {
        let mut draft = priced_draft();
        let option: DealOption = Faker.fake();
        draft.options = vec![option];
        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        assert!(json.get("price").is_none());
        assert!(json.get("originalPrice").is_none());
        assert_eq!(json["options"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_flat_prices_without_options() {
        let draft = priced_draft();
        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        assert_eq!(json["price"], 49.0);
        assert_eq!(json["originalPrice"], 99.0);
        assert_eq!(json["title"], "Spa day");

        let unpriced = CampaignDraft::default();
        let json = serde_json::to_value(prepare_for_submission(&unpriced).payload).unwrap();
        assert!(json.get("price").unwrap().is_null());
    }

    #[test]
    fn test_expires_at_computed_from_valid_months() {
        let mut draft = CampaignDraft::default();
        draft.fine_print.valid_months = 3;
        draft.publish_at = Some(date(2024, 1, 15));
        let prepared = prepare_for_submission(&draft);
        assert_eq!(prepared.payload.expires_at, Some(date(2024, 4, 15)));
        assert!(prepared.diagnostics.is_empty());
    }

    #[test]
    fn test_explicit_expires_at_is_kept() {
        let mut draft = CampaignDraft::default();
        draft.publish_at = Some(date(2024, 1, 15));
        draft.expires_at = Some(date(2024, 12, 31));
        assert_eq!(
            prepare_for_submission(&draft).payload.expires_at,
            Some(date(2024, 12, 31))
        );
    }

    #[test]
    fn test_uncalculable_expiry_is_a_diagnostic() {
        let draft = CampaignDraft::default();
        let prepared = prepare_for_submission(&draft);
        assert_eq!(prepared.payload.expires_at, None);
        assert_eq!(prepared.diagnostics.len(), 1);
        let json = serde_json::to_value(&prepared.payload).unwrap();
        assert!(json.get("expiresAt").is_none());

        let mut zero_months = CampaignDraft::default();
        zero_months.publish_at = Some(date(2024, 1, 15));
        zero_months.fine_print.valid_months = 0;
        let prepared = prepare_for_submission(&zero_months);
        assert_eq!(prepared.payload.expires_at, None);
        assert!(prepared.diagnostics[0].contains("validMonths 0"));
    }

    #[test]
    fn test_expiry_clamps_to_month_end() {
        assert_eq!(expiry_from(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(expiry_from(date(2024, 1, 31), 0), None);
    }

    #[test]
    fn test_flattens_services_merchant_and_seo() {
        let mut draft = CampaignDraft::default();
        draft.selected_services = vec![
            Service {
                id: "s1".to_string(),
                name: "Massage".to_string(),
            },
            Service {
                id: "s2".to_string(),
                name: "Sauna".to_string(),
            },
        ];
        draft.merchant_info.name = "Salon".to_string();
        draft.merchant_info.business_website =
            vec!["https://salon.nl".to_string(), "https://salon.com".to_string()];
        draft.merchant_info.instagram_url = "https://instagram.com/salon".to_string();
        draft.seo.meta_description = "Relax".to_string();
        draft.seo.keywords = vec!["spa".to_string()];
        draft.descriptions = "A full day".to_string();

        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        assert_eq!(json["services"], json!(["Massage", "Sauna"]));
        assert_eq!(json["merchantName"], "Salon");
        assert_eq!(json["businessWebsite"], "https://salon.nl");
        assert_eq!(json["instagramURL"], "https://instagram.com/salon");
        assert_eq!(json["metaDescription"], "Relax");
        assert_eq!(json["keywords"], json!(["spa"]));
        assert_eq!(json["description"], "A full day");
    }

    #[test]
    fn test_strips_local_only_fields() {
        let mut draft = CampaignDraft::default();
        draft.name = "Internal Q3 push".to_string();
        draft.selected_category = Some("beauty".to_string());
        draft.selected_template = Some("spa-classic".to_string());
        draft.current_step = WizardStep::Review;
        draft.schedule = Some(json!({ "days": ["mon"] }));
        draft.payment_info.account_number = "NL91ABNA0417164300".to_string();
        draft.payment_info.bank_name = "ABN".to_string();

        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "name",
            "selectedCategory",
            "selectedServices",
            "selectedTemplate",
            "dealDetails",
            "validationStatus",
            "currentStep",
            "paymentInfo",
            "merchantInfo",
            "seo",
            "templateApplied",
            "schedule",
            "descriptions",
        ] {
            assert!(!object.contains_key(key), "payload must not contain {}", key);
        }
        let text = json.to_string();
        assert!(!text.contains("NL91ABNA0417164300"));
        assert!(!text.contains("ABN"));
    }

    #[test]
    fn test_primary_media_per_type() {
        let mut draft = CampaignDraft::default();
        draft.media = vec![
            MediaItem {
                id: "1".to_string(),
                url: "https://cdn/a.jpg".to_string(),
                ..MediaItem::default()
            },
            MediaItem {
                id: "2".to_string(),
                url: "https://cdn/b.jpg".to_string(),
                is_primary: true,
                ..MediaItem::default()
            },
            MediaItem {
                id: "3".to_string(),
                url: "https://cdn/c.mp4".to_string(),
                kind: MediaType::Video,
                is_primary: true,
                ..MediaItem::default()
            },
        ];
        let payload = prepare_for_submission(&draft).payload;
        assert_eq!(payload.primary_image_url.as_deref(), Some("https://cdn/b.jpg"));
        assert_eq!(payload.primary_video_url.as_deref(), Some("https://cdn/c.mp4"));
        assert_eq!(payload.media[0].service, "other");
    }

    #[test]
    fn test_locations_without_coordinates_get_placeholder() {
        let mut draft = CampaignDraft::default();
        draft.voucher_instructions.business_locations = vec![BusinessLocation {
            address: "Damrak 1".to_string(),
            ..BusinessLocation::default()
        }];
        let prepared = prepare_for_submission(&draft);
        let location = &prepared.payload.voucher_instructions.business_locations[0];
        assert_eq!(location.geo, Some(GeoPoint::placeholder()));
        assert!(prepared.diagnostics.iter().any(|d| d.contains("Damrak 1")));
        // The draft itself is not modified.
        assert_eq!(draft.voucher_instructions.business_locations[0].geo, None);
    }

    #[test]
    fn test_promotion_sends_only_active_config() {
        let mut draft = CampaignDraft::default();
        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        assert!(json.get("promotion").is_none());

        draft.promotion.mechanism = Some(PromotionMechanism::GiftWithPurchase);
        draft.promotion.gift_with_purchase_config.gift_products = vec!["tote".to_string()];
        let json = serde_json::to_value(prepare_for_submission(&draft).payload).unwrap();
        let promotion = json["promotion"].as_object().unwrap();
        assert_eq!(promotion["mechanism"], "gift_with_purchase");
        assert!(promotion.contains_key("giftWithPurchaseConfig"));
        assert!(!promotion.contains_key("discountConfig"));
        assert!(!promotion.contains_key("bogoConfig"));
    }

    fn remote(value: serde_json::Value) -> RemoteCampaign {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_load_maps_flat_fields_into_sections() {
        let mut draft = CampaignDraft::default();
        draft.payment_info.bank_name = "ING".to_string();
        draft.current_step = WizardStep::Photos;
        let loaded = merge_remote(
            &draft,
            remote(json!({
                "_id": "c42",
                "status": "draft",
                "title": "Spa day",
                "category": "beauty",
                "price": 49.0,
                "services": ["Massage"],
                "merchantName": "Salon",
                "businessWebsite": "https://salon.nl",
                "description": "A full day",
                "highlights": ["Sauna"],
                "finePrint": { "validMonths": 6 },
                "voucherInstructions": {
                    "redemptionMethod": "in_store",
                    "businessLocations": [{ "address": "Damrak 1" }]
                },
                "media": [{ "url": "https://cdn/a.jpg", "type": "image", "mediaId": "m1" }]
            })),
            MergeMode::Replace,
        );
        assert_eq!(loaded.id.as_deref(), Some("c42"));
        assert_eq!(loaded.status, CampaignStatus::Draft);
        assert_eq!(loaded.deal_details.title, "Spa day");
        assert_eq!(loaded.deal_details.price, Some(49.0));
        assert_eq!(loaded.selected_category.as_deref(), Some("beauty"));
        assert_eq!(loaded.selected_services[0].name, "Massage");
        assert_eq!(loaded.merchant_info.business_website, vec!["https://salon.nl"]);
        assert_eq!(loaded.descriptions, "A full day");
        assert_eq!(loaded.fine_print.valid_months, 6);
        assert_eq!(loaded.fine_print.voucher_limit, 1);
        assert_eq!(
            loaded.voucher_instructions.business_locations[0].geo,
            Some(GeoPoint::placeholder())
        );
        assert_eq!(loaded.media[0].id, "m1");
        assert_eq!(loaded.payment_info.bank_name, "ING");
        assert_eq!(loaded.current_step, WizardStep::Photos);
    }

    #[test]
    fn test_load_prefers_options_over_flat_price() {
        let loaded = merge_remote(
            &CampaignDraft::default(),
            remote(json!({
                "price": 10.0,
                "originalPrice": 20.0,
                "options": [{ "id": "o1", "name": "60 min", "price": 49.0, "stock": 5 }]
            })),
            MergeMode::Replace,
        );
        assert_eq!(loaded.deal_details.price, None);
        assert_eq!(loaded.deal_details.original_price, None);
        assert_eq!(loaded.options.len(), 1);
    }

    #[test]
    fn test_load_defaults_missing_flat_fields() {
        let mut draft = priced_draft();
        draft.seo.meta_description = "stale".to_string();
        let loaded = merge_remote(&draft, remote(json!({ "_id": "c1" })), MergeMode::Replace);
        assert_eq!(loaded.deal_details.title, "");
        assert_eq!(loaded.deal_details.price, None);
        assert_eq!(loaded.seo, Seo::default());
        assert_eq!(loaded.merchant_info.business_website, vec![String::new()]);
    }

    #[test]
    fn test_saved_response_preserves_local_fields() {
        let mut draft = priced_draft();
        draft.status = CampaignStatus::PendingReview;
        draft.merchant_info.email = "a@b.com".to_string();
        draft.selected_services = vec![Service {
            id: "svc-1".to_string(),
            name: "Massage".to_string(),
        }];
        let saved = merge_remote(
            &draft,
            remote(json!({
                "_id": "c9",
                "status": "draft",
                "title": "",
                "createdAt": "2024-01-01T10:00:00Z",
                "updatedAt": "2024-01-02T10:00:00Z"
            })),
            MergeMode::Preserve,
        );
        assert_eq!(saved.id.as_deref(), Some("c9"));
        assert_eq!(saved.status, CampaignStatus::PendingReview);
        assert_eq!(saved.deal_details.title, "Spa day");
        assert_eq!(saved.deal_details.price, Some(49.0));
        assert_eq!(saved.merchant_info.email, "a@b.com");
        assert_eq!(saved.selected_services[0].id, "svc-1");
        assert!(saved.created_at.is_some());
        assert!(saved.updated_at.is_some());
    }

    #[test]
    fn test_load_drops_locations_of_previous_draft() {
        let mut draft = CampaignDraft::default();
        draft.voucher_instructions.business_locations = vec![BusinessLocation {
            address: "Old street 1".to_string(),
            city: "Utrecht".to_string(),
            ..BusinessLocation::default()
        }];
        let loaded = merge_remote(
            &draft,
            remote(json!({ "_id": "b", "title": "Other" })),
            MergeMode::Replace,
        );
        assert!(loaded.voucher_instructions.business_locations.is_empty());

        let loaded = merge_remote(
            &draft,
            remote(json!({
                "_id": "b",
                "voucherInstructions": {
                    "businessLocations": [
                        { "address": "Damrak 1" },
                        { "address": "Dam 2", "geo": { "type": "Point", "coordinates": [4.89, 52.37] } }
                    ]
                }
            })),
            MergeMode::Replace,
        );
        let locations = &loaded.voucher_instructions.business_locations;
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].address, "Damrak 1");
        assert_eq!(locations[0].geo, Some(GeoPoint::placeholder()));
        assert_eq!(
            locations[1].geo.as_ref().map(|g| g.coordinates.clone()),
            Some(vec![4.89, 52.37])
        );
    }

    #[test]
    fn test_saved_response_keeps_locations_without_placeholder() {
        let mut draft = priced_draft();
        draft.voucher_instructions.business_locations = vec![BusinessLocation {
            address: "Old street 1".to_string(),
            ..BusinessLocation::default()
        }];
        let saved = merge_remote(&draft, remote(json!({ "_id": "c1" })), MergeMode::Preserve);
        let locations = &saved.voucher_instructions.business_locations;
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].geo, None);
    }

    #[test]
    fn test_saved_response_null_price_clears_local_price() {
        let draft = priced_draft();
        let saved = merge_remote(
            &draft,
            remote(json!({ "_id": "c1", "price": null })),
            MergeMode::Preserve,
        );
        assert_eq!(saved.deal_details.price, None);
        assert_eq!(saved.deal_details.original_price, Some(99.0));
    }
}
