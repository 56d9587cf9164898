//! Section validators.
//!
//! Pure functions from section content to validation status. Composite
//! sections return one status per leaf field, keyed by the leaf names in
//! [`Section::leaves`](super::validation::Section::leaves).

use super::model::*;
use super::validation::Status;
use crate::utils::text::{is_blank, is_present, is_valid_email};
use chrono::{DateTime, Utc};

/// Leaf name paired with its status.
pub type LeafStatus = (&'static str, Status);

pub fn category(selected: Option<&str>) -> Status {
    Status::from(is_present(selected))
}

pub fn services(services: &[Service]) -> Status {
    Status::from(!services.is_empty())
}

pub fn template(selected: Option<&str>) -> Status {
    Status::from(selected.is_some())
}

/// Validate deal details. Flat prices are only required when the deal has no
/// priced options.
///
pub fn deal_details(details: &DealDetails, has_options: bool) -> [LeafStatus; 7] {
    let price_ok = |price: Option<f64>| has_options || price.map_or(false, |p| p >= 0.0);
    [
        ("title", Status::from(!is_blank(&details.title))),
        ("subtitle", Status::from(!is_blank(&details.subtitle))),
        ("category", Status::from(!is_blank(&details.category))),
        // Typed booleans are always well-formed.
        ("isVirtual", Status::Complete),
        ("price", Status::from(price_ok(details.price))),
        ("originalPrice", Status::from(price_ok(details.original_price))),
        ("isGiftable", Status::Complete),
    ]
}

/// Validate the merchant fields of the business-info section. Payment and
/// tax leaves are validated separately.
///
pub fn merchant_info(info: &MerchantInfo) -> [LeafStatus; 8] {
    let optional_link = |link: &str| link.is_empty() || !is_blank(link);
    [
        ("name", Status::from(!is_blank(&info.name))),
        ("email", Status::from(is_valid_email(&info.email))),
        ("phone", Status::from(!is_blank(&info.phone))),
        (
            "website",
            Status::from(info.business_website.iter().any(|link| !is_blank(link))),
        ),
        ("description", Status::from(!is_blank(&info.business_description))),
        ("type", Status::from(!is_blank(&info.business_type))),
        ("instagram", Status::from(optional_link(&info.instagram_url))),
        ("facebook", Status::from(optional_link(&info.facebook_url))),
    ]
}

pub fn payment(info: &PaymentInfo) -> Status {
    Status::from(
        !is_blank(&info.bank_name)
            && !is_blank(&info.account_number)
            && !is_blank(&info.routing_number),
    )
}

pub fn tax(info: &PaymentInfo) -> Status {
    Status::from(!is_blank(&info.tax_id))
}

fn location_is_complete(location: &BusinessLocation) -> bool {
    !is_blank(&location.address)
        && !is_blank(&location.city)
        && !is_blank(&location.zip_code)
        && !is_blank(&location.country)
        && location.has_coordinate_pair()
}

pub fn voucher_instructions(instructions: &VoucherInstructions) -> Status {
    let has_redemption = !is_blank(&instructions.redemption_method);
    let has_contact = (!is_blank(&instructions.contact_method)
        && !is_blank(&instructions.contact_value))
        || !instructions.business_locations.is_empty();
    let locations_ok = instructions
        .business_locations
        .iter()
        .all(location_is_complete);
    Status::from(has_redemption && has_contact && locations_ok)
}

pub fn fine_print(fine_print: &FinePrint) -> Status {
    Status::from(fine_print.voucher_limit > 0 && fine_print.valid_months > 0)
}

/// Validate group-buy settings. A disabled group buy is always complete.
///
pub fn group_buy(group_buy: &GroupBuy) -> [LeafStatus; 4] {
    if !group_buy.enabled {
        return [
            ("enabled", Status::Complete),
            ("minParticipants", Status::Complete),
            ("maxParticipants", Status::Complete),
            ("durationMinutes", Status::Complete),
        ];
    }
    [
        ("enabled", Status::Complete),
        ("minParticipants", Status::from(group_buy.min_participants >= 2)),
        (
            "maxParticipants",
            Status::from(group_buy.max_participants >= group_buy.min_participants),
        ),
        ("durationMinutes", Status::from(group_buy.duration_minutes > 0)),
    ]
}

pub fn options(options: &[DealOption]) -> Status {
    Status::from(
        !options.is_empty()
            && options
                .iter()
                .all(|o| !is_blank(&o.name) && o.price > 0.0 && o.stock >= 0),
    )
}

pub fn media(items: &[MediaItem]) -> Status {
    Status::from(
        items
            .iter()
            .any(|item| item.kind == MediaType::Image && !is_blank(&item.url)),
    )
}

pub fn seo(seo: &Seo) -> [LeafStatus; 2] {
    [
        ("metaDescription", Status::from(!is_blank(&seo.meta_description))),
        (
            "keywords",
            Status::from(!seo.keywords.is_empty() && seo.keywords.iter().all(|k| !is_blank(k))),
        ),
    ]
}

pub fn highlights(highlights: &[String]) -> Status {
    Status::from(!highlights.is_empty() && highlights.iter().all(|h| !is_blank(h)))
}

pub fn descriptions(descriptions: &str) -> Status {
    Status::from(!is_blank(descriptions))
}

pub fn publish_at(publish_at: Option<DateTime<Utc>>) -> Status {
    Status::from(publish_at.is_some())
}

fn discount_value_ok(kind: DiscountType, value: f64) -> bool {
    match kind {
        DiscountType::PercentageOff => value > 0.0 && value <= 100.0,
        DiscountType::FixedAmountOff => value > 0.0,
    }
}

/// Validate the promotion: a mechanism is chosen, the window is not empty,
/// and the chosen mechanism's configuration is usable.
///
pub fn promotion(promotion: &Promotion) -> Status {
    let mechanism = match promotion.mechanism {
        Some(mechanism) => mechanism,
        None => return Status::Incomplete,
    };
    if promotion.end_date <= promotion.start_date {
        return Status::Incomplete;
    }
    let config_ok = match mechanism {
        PromotionMechanism::Discount => {
            let config = &promotion.discount_config;
            discount_value_ok(config.kind, config.value)
        }
        PromotionMechanism::BuyGetFree => {
            let config = &promotion.bogo_config;
            config.buy_quantity >= 1 && config.get_quantity >= 1
        }
        PromotionMechanism::TieredDiscount => {
            let tiers = &promotion.tiered_discount_config.tiers;
            !tiers.is_empty()
                && tiers
                    .iter()
                    .all(|tier| discount_value_ok(tier.discount_type, tier.discount_value))
                && tiers.windows(2).all(|pair| pair[0].threshold < pair[1].threshold)
        }
        PromotionMechanism::GiftWithPurchase => {
            let config = &promotion.gift_with_purchase_config;
            !config.gift_products.is_empty() && config.quantity_per_threshold >= 1
        }
        PromotionMechanism::CreditPoints => {
            let config = &promotion.credit_points_config;
            config.points_multiplier > 0.0 || config.fixed_points > 0 || config.points_per_value > 0.0
        }
    };
    Status::from(config_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fake::{Fake, Faker};

    fn status_of(leaves: &[LeafStatus], name: &str) -> Status {
        leaves
            .iter()
            .find(|(leaf, _)| *leaf == name)
            .map(|(_, status)| *status)
            .unwrap()
    }

    #[test]
    fn test_deal_details_requires_trimmed_text() {
        let details = DealDetails {
            title: "  ".to_string(),
            subtitle: "Relax".to_string(),
            category: "beauty".to_string(),
            price: Some(10.0),
            original_price: Some(20.0),
            ..DealDetails::default()
        };
        let leaves = deal_details(&details, false);
        assert_eq!(status_of(&leaves, "title"), Status::Incomplete);
        assert_eq!(status_of(&leaves, "subtitle"), Status::Complete);
        assert_eq!(status_of(&leaves, "price"), Status::Complete);
        assert_eq!(status_of(&leaves, "isVirtual"), Status::Complete);
    }

    #[test]
    fn test_deal_details_prices_depend_on_options() {
        let details = DealDetails {
            price: Some(-1.0),
            ..DealDetails::default()
        };
        let flat = deal_details(&details, false);
        assert_eq!(status_of(&flat, "price"), Status::Incomplete);
        assert_eq!(status_of(&flat, "originalPrice"), Status::Incomplete);

        let with_options = deal_details(&details, true);
        assert_eq!(status_of(&with_options, "price"), Status::Complete);
        assert_eq!(status_of(&with_options, "originalPrice"), Status::Complete);

        let free = DealDetails {
            price: Some(0.0),
            original_price: Some(0.0),
            ..DealDetails::default()
        };
        assert_eq!(status_of(&deal_details(&free, false), "price"), Status::Complete);
    }

    #[test]
    fn test_merchant_info() {
        let info = MerchantInfo {
            name: "Salon".to_string(),
            email: "not-an-email".to_string(),
            phone: "+31 20 123 4567".to_string(),
            business_website: vec!["".to_string(), "https://salon.nl".to_string()],
            business_description: "Hair and nails".to_string(),
            business_type: "sole_provider".to_string(),
            instagram_url: String::new(),
            facebook_url: "   ".to_string(),
        };
        let leaves = merchant_info(&info);
        assert_eq!(status_of(&leaves, "email"), Status::Incomplete);
        assert_eq!(status_of(&leaves, "website"), Status::Complete);
        assert_eq!(status_of(&leaves, "instagram"), Status::Complete);
        assert_eq!(status_of(&leaves, "facebook"), Status::Incomplete);

        let fixed = MerchantInfo {
            email: "a@b.com".to_string(),
            ..info
        };
        assert_eq!(status_of(&merchant_info(&fixed), "email"), Status::Complete);
    }

    #[test]
    fn test_website_needs_one_non_blank_link() {
        let info = MerchantInfo {
            business_website: vec![" ".to_string()],
            ..MerchantInfo::default()
        };
        assert_eq!(status_of(&merchant_info(&info), "website"), Status::Incomplete);
    }

    #[test]
    fn test_payment_and_tax() {
        let mut info = PaymentInfo::default();
        assert_eq!(payment(&info), Status::Incomplete);
        info.bank_name = "ING".to_string();
        info.account_number = "123".to_string();
        info.routing_number = "456".to_string();
        assert_eq!(payment(&info), Status::Complete);
        assert_eq!(tax(&info), Status::Incomplete);
        info.tax_id = "NL001".to_string();
        assert_eq!(tax(&info), Status::Complete);
    }

    fn location() -> BusinessLocation {
        BusinessLocation {
            address: "Damrak 1".to_string(),
            city: "Amsterdam".to_string(),
            state: String::new(),
            zip_code: "1012LG".to_string(),
            country: "NL".to_string(),
            geo: Some(GeoPoint::new(4.89, 52.37)),
        }
    }

    #[test]
    fn test_voucher_instructions_contact_or_location() {
        let mut instructions = VoucherInstructions {
            redemption_method: "in_store".to_string(),
            ..VoucherInstructions::default()
        };
        assert_eq!(voucher_instructions(&instructions), Status::Incomplete);

        instructions.contact_method = "phone".to_string();
        instructions.contact_value = "+31 20 123 4567".to_string();
        assert_eq!(voucher_instructions(&instructions), Status::Complete);

        instructions.contact_value = String::new();
        instructions.business_locations = vec![location()];
        assert_eq!(voucher_instructions(&instructions), Status::Complete);
    }

    #[test]
    fn test_voucher_instructions_rejects_incomplete_location() {
        let mut broken = location();
        broken.geo = None;
        let instructions = VoucherInstructions {
            redemption_method: "in_store".to_string(),
            contact_method: "email".to_string(),
            contact_value: "a@b.com".to_string(),
            business_locations: vec![location(), broken],
            ..VoucherInstructions::default()
        };
        assert_eq!(voucher_instructions(&instructions), Status::Incomplete);
    }

    #[test]
    fn test_fine_print() {
        assert_eq!(fine_print(&FinePrint::default()), Status::Complete);
        let zero_months = FinePrint {
            valid_months: 0,
            ..FinePrint::default()
        };
        assert_eq!(fine_print(&zero_months), Status::Incomplete);
        let zero_limit = FinePrint {
            voucher_limit: 0,
            ..FinePrint::default()
        };
        assert_eq!(fine_print(&zero_limit), Status::Incomplete);
    }

    #[test]
    fn test_group_buy_disabled_is_complete() {
        let disabled = GroupBuy {
            min_participants: 0,
            duration_minutes: 0,
            ..GroupBuy::default()
        };
        assert!(group_buy(&disabled)
            .iter()
            .all(|(_, status)| *status == Status::Complete));
    }

    #[test]
    fn test_group_buy_max_below_min() {
        let enabled = GroupBuy {
            enabled: true,
            min_participants: 2,
            max_participants: 1,
            duration_minutes: 60,
            ..GroupBuy::default()
        };
        let leaves = group_buy(&enabled);
        assert_eq!(status_of(&leaves, "minParticipants"), Status::Complete);
        assert_eq!(status_of(&leaves, "maxParticipants"), Status::Incomplete);
        assert_eq!(status_of(&leaves, "durationMinutes"), Status::Complete);
    }

    #[test]
    fn test_options() {
        assert_eq!(options(&[]), Status::Incomplete);
        let option = DealOption {
            id: "o1".to_string(),
            name: "60 minutes".to_string(),
            price: 49.0,
            stock: 0,
            ..DealOption::default()
        };
        assert_eq!(options(&[option.clone()]), Status::Complete);
        let free = DealOption {
            price: 0.0,
            ..option.clone()
        };
        assert_eq!(options(&[option.clone(), free]), Status::Incomplete);
        let oversold = DealOption { stock: -1, ..option };
        assert_eq!(options(&[oversold]), Status::Incomplete);
    }

    #[test]
    fn test_media_needs_an_image_with_url() {
        let video = MediaItem {
            url: "https://cdn/v.mp4".to_string(),
            kind: MediaType::Video,
            ..MediaItem::default()
        };
        assert_eq!(media(&[video.clone()]), Status::Incomplete);
        let empty_image = MediaItem::default();
        assert_eq!(media(&[video.clone(), empty_image]), Status::Incomplete);
        let mut image: MediaItem = Faker.fake();
        image.kind = MediaType::Image;
        image.url = "https://cdn/p.jpg".to_string();
        assert_eq!(media(&[video, image]), Status::Complete);
    }

    #[test]
    fn test_seo() {
        let seo_data = Seo {
            meta_description: "Best spa in town".to_string(),
            keywords: vec!["spa".to_string(), " ".to_string()],
        };
        let leaves = seo(&seo_data);
        assert_eq!(status_of(&leaves, "metaDescription"), Status::Complete);
        assert_eq!(status_of(&leaves, "keywords"), Status::Incomplete);
        assert_eq!(status_of(&seo(&Seo::default()), "keywords"), Status::Incomplete);
    }

    #[test]
    fn test_simple_sections() {
        assert_eq!(category(None), Status::Incomplete);
        assert_eq!(category(Some(" ")), Status::Incomplete);
        assert_eq!(category(Some("beauty")), Status::Complete);
        let picked: [Service; 2] = Faker.fake();
        assert_eq!(services(&picked), Status::Complete);
        assert_eq!(services(&[]), Status::Incomplete);
        assert_eq!(template(Some("spa-classic")), Status::Complete);
        assert_eq!(highlights(&["Sauna".to_string()]), Status::Complete);
        assert_eq!(highlights(&["Sauna".to_string(), "".to_string()]), Status::Incomplete);
        assert_eq!(descriptions("\n"), Status::Incomplete);
        assert_eq!(
            publish_at(Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())),
            Status::Complete
        );
    }

    #[test]
    fn test_promotion_requires_mechanism_and_valid_config() {
        let mut promo = Promotion::default();
        assert_eq!(promotion(&promo), Status::Incomplete);

        promo.mechanism = Some(PromotionMechanism::Discount);
        assert_eq!(promotion(&promo), Status::Incomplete);
        promo.discount_config.value = 20.0;
        assert_eq!(promotion(&promo), Status::Complete);
        promo.discount_config.value = 120.0;
        assert_eq!(promotion(&promo), Status::Incomplete);
        promo.discount_config.kind = DiscountType::FixedAmountOff;
        assert_eq!(promotion(&promo), Status::Complete);

        promo.end_date = promo.start_date - Duration::days(1);
        assert_eq!(promotion(&promo), Status::Incomplete);
    }

    #[test]
    fn test_promotion_tiers_must_increase() {
        let mut promo = Promotion {
            mechanism: Some(PromotionMechanism::TieredDiscount),
            ..Promotion::default()
        };
        assert_eq!(promotion(&promo), Status::Incomplete);
        promo.tiered_discount_config.tiers = vec![
            DiscountTier {
                threshold: 50.0,
                discount_type: DiscountType::PercentageOff,
                discount_value: 5.0,
            },
            DiscountTier {
                threshold: 100.0,
                discount_type: DiscountType::PercentageOff,
                discount_value: 10.0,
            },
        ];
        assert_eq!(promotion(&promo), Status::Complete);
        promo.tiered_discount_config.tiers.swap(0, 1);
        assert_eq!(promotion(&promo), Status::Incomplete);
    }

    #[test]
    fn test_promotion_other_mechanisms() {
        let mut promo = Promotion {
            mechanism: Some(PromotionMechanism::BuyGetFree),
            ..Promotion::default()
        };
        assert_eq!(promotion(&promo), Status::Complete);

        promo.mechanism = Some(PromotionMechanism::GiftWithPurchase);
        assert_eq!(promotion(&promo), Status::Incomplete);
        promo.gift_with_purchase_config.gift_products = vec!["tote-bag".to_string()];
        assert_eq!(promotion(&promo), Status::Complete);

        promo.mechanism = Some(PromotionMechanism::CreditPoints);
        assert_eq!(promotion(&promo), Status::Incomplete);
        promo.credit_points_config.fixed_points = 100;
        assert_eq!(promotion(&promo), Status::Complete);
    }
}
