use super::error::StateError;
use super::navigation::Router;
use crate::api::RemoteCampaign;
use crate::campaign::steps::CAMPAIGNS_ROUTE;
use crate::campaign::validate::{self, LeafStatus};
use crate::campaign::*;
use chrono::{DateTime, Utc};
use log::*;

/// Houses the campaign being built along with its validation record and the
/// transient request flags.
///
/// Every mutation of the draft goes through this type. Setters merge their
/// input, then run the matching validator so statuses are always derived
/// from the data they describe.
#[derive(Clone, Debug, Default)]
pub struct CampaignStore {
    draft: CampaignDraft,
    validation: ValidationStatus,
    loading: bool,
    error: Option<String>,
    last_saved_at: Option<DateTime<Utc>>,
    router: Router,
    media_seq: usize,
}

impl CampaignStore {
    pub fn new() -> Self {
        CampaignStore::default()
    }

    /// Returns a store holding the given draft, fully validated.
    ///
    pub fn with_draft(draft: CampaignDraft) -> Self {
        let mut store = CampaignStore {
            draft,
            ..CampaignStore::default()
        };
        store.revalidate_all();
        store
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn validation(&self) -> &ValidationStatus {
        &self.validation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_step(&self) -> WizardStep {
        self.draft.current_step
    }

    /// Reset the draft and validation to a brand-new campaign and navigate to
    /// the first step.
    ///
    pub fn create_new(&mut self) -> &mut Self {
        debug!("Starting a new campaign...");
        self.draft = CampaignDraft::default();
        self.validation = ValidationStatus::default();
        self.error = None;
        self.last_saved_at = None;
        let first = WizardStep::first();
        self.draft.current_step = first;
        self.router.push(first.route());
        self
    }

    /// Shallow-merge a partial section. No validation is run.
    ///
    pub fn update_section(&mut self, patch: SectionPatch) -> &mut Self {
        patch.apply(&mut self.draft);
        self
    }

    /// Record a validation status. See [`ValidationStatus::set`].
    ///
    pub fn update_validation_status(
        &mut self,
        section: Section,
        status: Status,
        leaf: Option<&str>,
    ) -> &mut Self {
        self.validation.set(section, status, leaf);
        self
    }

    fn record_leaves(&mut self, section: Section, leaves: &[LeafStatus]) {
        for (leaf, status) in leaves {
            self.validation.set(section, *status, Some(*leaf));
        }
    }

    fn validate_deal_details(&mut self) {
        let leaves = validate::deal_details(&self.draft.deal_details, self.draft.has_options());
        self.record_leaves(Section::DealDetails, &leaves);
    }

    fn validate_options(&mut self) {
        let status = validate::options(&self.draft.options);
        self.validation.set(Section::Options, status, None);
        self.validate_deal_details();
    }

    fn validate_media(&mut self) {
        let status = validate::media(&self.draft.media);
        self.validation.set(Section::Photos, status, None);
    }

    fn validate_merchant_info(&mut self) {
        let leaves = validate::merchant_info(&self.draft.merchant_info);
        self.record_leaves(Section::BusinessInfo, &leaves);
    }

    fn validate_publish_at(&mut self) {
        let status = validate::publish_at(self.draft.publish_at);
        self.validation.set(Section::PublishAt, status, None);
    }

    fn refresh_expiry(&mut self) {
        self.draft.expires_at = self
            .draft
            .publish_at
            .and_then(|publish_at| expiry_from(publish_at, self.draft.fine_print.valid_months));
    }

    pub fn set_selected_category(&mut self, category: &str) -> &mut Self {
        self.draft.selected_category = Some(category.to_string());
        self.draft.deal_details.category = category.to_string();
        let status = validate::category(Some(category));
        self.validation.set(Section::Category, status, None);
        let leaves = validate::deal_details(&self.draft.deal_details, self.draft.has_options());
        if let Some((leaf, status)) = leaves.iter().find(|(leaf, _)| *leaf == "category") {
            self.validation.set(Section::DealDetails, *status, Some(*leaf));
        }
        self
    }

    pub fn set_selected_services(&mut self, services: Vec<Service>) -> &mut Self {
        self.draft.selected_services = services;
        let status = validate::services(&self.draft.selected_services);
        self.validation.set(Section::Services, status, None);
        self
    }

    pub fn set_selected_template(&mut self, template: Option<String>) -> &mut Self {
        self.draft.selected_template = template;
        let status = validate::template(self.draft.selected_template.as_deref());
        self.validation.set(Section::Template, status, None);
        self
    }

    pub fn set_deal_details(&mut self, patch: DealDetailsPatch) -> &mut Self {
        self.draft.deal_details = patch.merged(&self.draft.deal_details);
        self.validate_deal_details();
        self
    }

    pub fn set_targeting_options(&mut self, options: Option<serde_json::Value>) -> &mut Self {
        self.draft.targeting_options = options;
        self
    }

    pub fn set_schedule(&mut self, schedule: Option<serde_json::Value>) -> &mut Self {
        self.draft.schedule = schedule;
        self
    }

    pub fn set_options(&mut self, options: Vec<DealOption>) -> &mut Self {
        self.draft.options = options;
        self.validate_options();
        self
    }

    /// Merge a patch into the option with the given client-side id.
    ///
    pub fn update_option(&mut self, id: &str, patch: DealOptionPatch) -> &mut Self {
        match self.draft.options.iter_mut().find(|option| option.id == id) {
            Some(option) => *option = patch.merged(option),
            None => warn!("No option with id {} to update", id),
        }
        self.validate_options();
        self
    }

    pub fn remove_option(&mut self, id: &str) -> &mut Self {
        self.draft.options.retain(|option| option.id != id);
        self.validate_options();
        self
    }

    pub fn set_media(&mut self, media: Vec<MediaItem>) -> &mut Self {
        self.draft.media = media;
        self.validate_media();
        self
    }

    /// Append a media item, assigning a client-side id when it has none.
    ///
    pub fn add_media_item(&mut self, mut item: MediaItem) -> &mut Self {
        if item.id.is_empty() {
            self.media_seq += 1;
            item.id = format!("local-media-{}", self.media_seq);
        }
        self.draft.media.push(item);
        self.validate_media();
        self
    }

    pub fn remove_media_item(&mut self, id: &str) -> &mut Self {
        self.draft.media.retain(|item| item.id != id);
        self.validate_media();
        self
    }

    /// Flag the item as primary and clear the flag on other items of the
    /// same media type.
    ///
    pub fn set_primary_media_item(&mut self, id: &str) -> &mut Self {
        let kind = match self.draft.media.iter().find(|item| item.id == id) {
            Some(item) => item.kind,
            None => {
                warn!("No media item with id {} to mark as primary", id);
                return self;
            }
        };
        for item in self.draft.media.iter_mut().filter(|item| item.kind == kind) {
            item.is_primary = item.id == id;
        }
        self
    }

    pub fn update_descriptions(&mut self, descriptions: &str) -> &mut Self {
        self.draft.descriptions = descriptions.to_string();
        let status = validate::descriptions(&self.draft.descriptions);
        self.validation.set(Section::Descriptions, status, None);
        self
    }

    pub fn update_highlights(&mut self, highlights: Vec<String>) -> &mut Self {
        self.draft.highlights = highlights;
        let status = validate::highlights(&self.draft.highlights);
        self.validation.set(Section::Highlights, status, None);
        self
    }

    pub fn update_fine_print(&mut self, patch: FinePrintPatch) -> &mut Self {
        let months_changed = patch
            .valid_months
            .map_or(false, |months| months != self.draft.fine_print.valid_months);
        self.draft.fine_print = patch.merged(&self.draft.fine_print);
        if months_changed && self.draft.publish_at.is_some() {
            self.refresh_expiry();
        }
        let status = validate::fine_print(&self.draft.fine_print);
        self.validation.set(Section::FinePrint, status, None);
        self
    }

    pub fn update_voucher_instructions(&mut self, patch: VoucherInstructionsPatch) -> &mut Self {
        self.draft.voucher_instructions = patch.merged(&self.draft.voucher_instructions);
        let status = validate::voucher_instructions(&self.draft.voucher_instructions);
        self.validation.set(Section::VoucherInstructions, status, None);
        self
    }

    /// Replace the payout details. The tax id is kept when `info` has none.
    ///
    pub fn update_payment_info(&mut self, info: PaymentInfo) -> &mut Self {
        let tax_id = if info.tax_id.is_empty() {
            self.draft.payment_info.tax_id.clone()
        } else {
            info.tax_id.clone()
        };
        self.draft.payment_info = PaymentInfo { tax_id, ..info };
        let status = validate::payment(&self.draft.payment_info);
        self.validation.set(Section::BusinessInfo, status, Some("payment"));
        self
    }

    pub fn update_tax_info(&mut self, tax_id: &str) -> &mut Self {
        self.draft.payment_info.tax_id = tax_id.to_string();
        let status = validate::tax(&self.draft.payment_info);
        self.validation.set(Section::BusinessInfo, status, Some("tax"));
        self
    }

    pub fn update_merchant_info(&mut self, patch: MerchantInfoPatch) -> &mut Self {
        self.draft.merchant_info = patch.merged(&self.draft.merchant_info);
        self.validate_merchant_info();
        self
    }

    /// Set the publish date and recompute the expiry, clearing it when it
    /// cannot be calculated.
    ///
    pub fn update_publish_at(&mut self, publish_at: Option<DateTime<Utc>>) -> &mut Self {
        self.draft.publish_at = publish_at;
        self.refresh_expiry();
        self.validate_publish_at();
        self
    }

    pub fn update_seo(&mut self, patch: SeoPatch) -> &mut Self {
        self.draft.seo = patch.merged(&self.draft.seo);
        let leaves = validate::seo(&self.draft.seo);
        self.record_leaves(Section::Seo, &leaves);
        self
    }

    pub fn update_group_buy(&mut self, patch: GroupBuyPatch) -> &mut Self {
        self.draft.group_buy = patch.merged(&self.draft.group_buy);
        let leaves = validate::group_buy(&self.draft.group_buy);
        self.record_leaves(Section::GroupBuy, &leaves);
        self
    }

    pub fn update_promotion(&mut self, patch: PromotionPatch) -> &mut Self {
        self.draft.promotion = patch.merged(&self.draft.promotion);
        let status = validate::promotion(&self.draft.promotion);
        self.validation.set(Section::Promotion, status, None);
        self
    }

    /// Run every validator against the current draft.
    ///
    /// Review and submit statuses are not derived from data and are left as
    /// they are.
    pub fn revalidate_all(&mut self) -> &mut Self {
        let draft = &self.draft;
        let simple = [
            (Section::Category, validate::category(draft.selected_category.as_deref())),
            (Section::Services, validate::services(&draft.selected_services)),
            (Section::Template, validate::template(draft.selected_template.as_deref())),
            (Section::Promotion, validate::promotion(&draft.promotion)),
            (Section::Highlights, validate::highlights(&draft.highlights)),
            (Section::Descriptions, validate::descriptions(&draft.descriptions)),
            (Section::FinePrint, validate::fine_print(&draft.fine_print)),
            (
                Section::VoucherInstructions,
                validate::voucher_instructions(&draft.voucher_instructions),
            ),
        ];
        let business = [
            ("payment", validate::payment(&draft.payment_info)),
            ("tax", validate::tax(&draft.payment_info)),
        ];
        let group_buy = validate::group_buy(&draft.group_buy);
        let seo = validate::seo(&draft.seo);

        for (section, status) in simple {
            self.validation.set(section, status, None);
        }
        self.validate_options();
        self.validate_media();
        self.validate_publish_at();
        self.validate_merchant_info();
        self.record_leaves(Section::BusinessInfo, &business);
        self.record_leaves(Section::GroupBuy, &group_buy);
        self.record_leaves(Section::Seo, &seo);
        self
    }

    /// Set the current step without navigating.
    ///
    pub fn set_current_step(&mut self, step: WizardStep) -> &mut Self {
        self.draft.current_step = step;
        self
    }

    /// Set the current step from its route identifier, e.g. `fine-print`.
    ///
    pub fn set_current_step_id(&mut self, id: &str) -> Result<&mut Self, StateError> {
        let step = id.parse::<WizardStep>().map_err(StateError::UnknownStep)?;
        Ok(self.set_current_step(step))
    }

    fn go_to(&mut self, step: Option<WizardStep>) -> &mut Self {
        if let Some(step) = step {
            self.draft.current_step = step;
            self.router.push(step.route());
        }
        self
    }

    /// Move to the following step, if any.
    ///
    pub fn go_to_next_step(&mut self) -> &mut Self {
        let next = self.draft.current_step.next();
        self.go_to(next)
    }

    /// Move to the preceding step, if any.
    ///
    pub fn go_to_previous_step(&mut self) -> &mut Self {
        let previous = self.draft.current_step.previous();
        self.go_to(previous)
    }

    /// Mark a request as started.
    ///
    pub(crate) fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a failed request. The draft itself is left untouched.
    ///
    pub(crate) fn fail_request(&mut self, message: &str) {
        error!("{}", message);
        self.error = Some(message.to_string());
        self.loading = false;
    }

    /// Replace the draft with a freshly loaded remote record.
    ///
    pub(crate) fn apply_loaded(&mut self, remote: RemoteCampaign) {
        self.draft = merge_remote(&self.draft, remote, MergeMode::Replace);
        self.finish_request();
    }

    /// Merge a save or publish response, advancing the status to at least
    /// `status`. Returns the campaign id.
    ///
    pub(crate) fn apply_saved(
        &mut self,
        remote: RemoteCampaign,
        status: CampaignStatus,
    ) -> Option<String> {
        let mut next = merge_remote(&self.draft, remote, MergeMode::Preserve);
        next.status = next.status.advance_to(status);
        self.draft = next;
        self.finish_request();
        self.draft.id.clone()
    }

    fn finish_request(&mut self) {
        self.last_saved_at = Some(Utc::now());
        self.revalidate_all();
        self.loading = false;
    }

    /// Record a successful publish and leave the wizard.
    ///
    pub(crate) fn complete_submission(&mut self) {
        self.validation.set(Section::Submit, Status::Complete, None);
        self.router.push(CAMPAIGNS_ROUTE);
    }

    pub(crate) fn reject_submission(&mut self, message: &str) {
        self.validation.set(Section::Submit, Status::Error, None);
        self.fail_request(message);
    }
}
