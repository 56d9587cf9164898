//! Wizard step sequence.
//!
//! The ordered step list and the validation section each step requires are
//! declared together in [`STEP_TABLE`], so the overall validation check can
//! never drift from the step order.

use super::validation::Section;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Route prefix under which every wizard step is served.
pub const WIZARD_ROUTE_PREFIX: &str = "/onboarding/campaign-creation";

/// Route shown after a campaign has been submitted for review.
pub const CAMPAIGNS_ROUTE: &str = "/merchant/campaigns";

/// Specifying the wizard steps, in order.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    CategorySelection,
    ServiceSelection,
    ServicesAddedConfirmation,
    TemplateSelection,
    DealDetails,
    PromotionTypeSelection,
    Photos,
    Highlights,
    Descriptions,
    FinePrint,
    VoucherInstructions,
    BusinessInfo,
    GroupBuy,
    Review,
    Submit,
}

/// Step order paired with the validation section that must be complete for
/// the step to count towards the overall status. `None` marks steps that are
/// purely navigational or administrative.
pub const STEP_TABLE: [(WizardStep, Option<Section>); 15] = [
    (WizardStep::CategorySelection, Some(Section::Category)),
    (WizardStep::ServiceSelection, Some(Section::Services)),
    (WizardStep::ServicesAddedConfirmation, None),
    (WizardStep::TemplateSelection, Some(Section::Template)),
    (WizardStep::DealDetails, Some(Section::DealDetails)),
    (WizardStep::PromotionTypeSelection, Some(Section::Promotion)),
    (WizardStep::Photos, Some(Section::Photos)),
    (WizardStep::Highlights, Some(Section::Highlights)),
    (WizardStep::Descriptions, Some(Section::Descriptions)),
    (WizardStep::FinePrint, Some(Section::FinePrint)),
    (WizardStep::VoucherInstructions, Some(Section::VoucherInstructions)),
    (WizardStep::BusinessInfo, Some(Section::BusinessInfo)),
    (WizardStep::GroupBuy, Some(Section::GroupBuy)),
    (WizardStep::Review, None),
    (WizardStep::Submit, None),
];

impl WizardStep {
    pub fn first() -> WizardStep {
        STEP_TABLE[0].0
    }

    /// Iterate over every step in wizard order.
    ///
    pub fn all() -> impl Iterator<Item = WizardStep> {
        STEP_TABLE.iter().map(|(step, _)| *step)
    }

    /// Iterate over the sections required for the overall status.
    ///
    pub fn required_sections() -> impl Iterator<Item = Section> {
        STEP_TABLE.iter().filter_map(|(_, section)| *section)
    }

    pub fn position(self) -> usize {
        STEP_TABLE
            .iter()
            .position(|(step, _)| *step == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Option<WizardStep> {
        STEP_TABLE.get(self.position() + 1).map(|(step, _)| *step)
    }

    pub fn previous(self) -> Option<WizardStep> {
        self.position()
            .checked_sub(1)
            .and_then(|index| STEP_TABLE.get(index))
            .map(|(step, _)| *step)
    }

    pub fn validation_section(self) -> Option<Section> {
        STEP_TABLE[self.position()].1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::CategorySelection => "category-selection",
            WizardStep::ServiceSelection => "service-selection",
            WizardStep::ServicesAddedConfirmation => "services-added-confirmation",
            WizardStep::TemplateSelection => "template-selection",
            WizardStep::DealDetails => "deal-details",
            WizardStep::PromotionTypeSelection => "promotion-type-selection",
            WizardStep::Photos => "photos",
            WizardStep::Highlights => "highlights",
            WizardStep::Descriptions => "descriptions",
            WizardStep::FinePrint => "fine-print",
            WizardStep::VoucherInstructions => "voucher-instructions",
            WizardStep::BusinessInfo => "business-info",
            WizardStep::GroupBuy => "group-buy",
            WizardStep::Review => "review",
            WizardStep::Submit => "submit",
        }
    }

    /// Route embedding the step identifier.
    ///
    pub fn route(self) -> String {
        format!("{}/{}", WIZARD_ROUTE_PREFIX, self.as_str())
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WizardStep::all()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
