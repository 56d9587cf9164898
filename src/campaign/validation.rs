//! Validation status record.
//!
//! Mirrors the section structure of the campaign draft. Simple sections hold
//! one status; composite sections hold one status per leaf field plus a `main`
//! status that is always derived from the leaves.

use super::steps::WizardStep;
use log::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Validation state of a section or leaf field.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Incomplete,
    Complete,
    Error,
}

impl From<bool> for Status {
    fn from(valid: bool) -> Self {
        if valid {
            Status::Complete
        } else {
            Status::Incomplete
        }
    }
}

/// Specifying the validated sections.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Category,
    Services,
    Template,
    DealDetails,
    Promotion,
    Options,
    Photos,
    Highlights,
    Descriptions,
    FinePrint,
    VoucherInstructions,
    BusinessInfo,
    GroupBuy,
    Seo,
    PublishAt,
    Review,
    Submit,
}

impl Section {
    pub const ALL: [Section; 17] = [
        Section::Category,
        Section::Services,
        Section::Template,
        Section::DealDetails,
        Section::Promotion,
        Section::Options,
        Section::Photos,
        Section::Highlights,
        Section::Descriptions,
        Section::FinePrint,
        Section::VoucherInstructions,
        Section::BusinessInfo,
        Section::GroupBuy,
        Section::Seo,
        Section::PublishAt,
        Section::Review,
        Section::Submit,
    ];

    /// Leaf fields of a composite section; empty for simple sections.
    ///
    pub fn leaves(self) -> &'static [&'static str] {
        match self {
            Section::DealDetails => &[
                "title",
                "subtitle",
                "category",
                "isVirtual",
                "price",
                "originalPrice",
                "isGiftable",
            ],
            Section::BusinessInfo => &[
                "name",
                "email",
                "phone",
                "website",
                "description",
                "type",
                "payment",
                "tax",
                "instagram",
                "facebook",
            ],
            Section::GroupBuy => &[
                "enabled",
                "minParticipants",
                "maxParticipants",
                "durationMinutes",
            ],
            Section::Seo => &["metaDescription", "keywords"],
            _ => &[],
        }
    }

    pub fn is_composite(self) -> bool {
        !self.leaves().is_empty()
    }
}

/// Status of a composite section.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompositeStatus {
    main: Status,
    #[serde(flatten)]
    leaves: BTreeMap<&'static str, Status>,
}

impl CompositeStatus {
    fn new(leaves: &'static [&'static str]) -> Self {
        CompositeStatus {
            main: Status::Incomplete,
            leaves: leaves.iter().map(|leaf| (*leaf, Status::Incomplete)).collect(),
        }
    }

    pub fn main(&self) -> Status {
        self.main
    }

    pub fn leaf(&self, name: &str) -> Option<Status> {
        self.leaves.get(name).copied()
    }

    /// Set a leaf and re-derive `main`. Returns false for unknown leaves.
    ///
    fn set_leaf(&mut self, name: &str, status: Status) -> bool {
        match self.leaves.get_mut(name) {
            Some(slot) => {
                *slot = status;
                self.main = aggregate(self.leaves.values().copied());
                true
            }
            None => false,
        }
    }

    fn set_all(&mut self, status: Status) {
        for slot in self.leaves.values_mut() {
            *slot = status;
        }
        self.main = aggregate(self.leaves.values().copied());
    }
}

/// Roll leaf statuses up: any error wins, then all-complete, else incomplete.
///
pub fn aggregate(statuses: impl IntoIterator<Item = Status>) -> Status {
    let mut all_complete = true;
    for status in statuses {
        match status {
            Status::Error => return Status::Error,
            Status::Incomplete => all_complete = false,
            Status::Complete => (),
        }
    }
    Status::from(all_complete)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionStatus {
    Simple(Status),
    Composite(CompositeStatus),
}

impl SectionStatus {
    fn for_section(section: Section) -> Self {
        if section.is_composite() {
            SectionStatus::Composite(CompositeStatus::new(section.leaves()))
        } else {
            SectionStatus::Simple(Status::Incomplete)
        }
    }

    /// Top-level status: the value itself, or `main` for composite sections.
    ///
    pub fn status(&self) -> Status {
        match self {
            SectionStatus::Simple(status) => *status,
            SectionStatus::Composite(composite) => composite.main(),
        }
    }
}

/// Validation record for a whole campaign draft.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationStatus {
    #[serde(flatten)]
    sections: BTreeMap<Section, SectionStatus>,
    overall: Status,
}

impl Default for ValidationStatus {
    fn default() -> Self {
        ValidationStatus {
            sections: Section::ALL
                .iter()
                .map(|section| (*section, SectionStatus::for_section(*section)))
                .collect(),
            overall: Status::Incomplete,
        }
    }
}

impl ValidationStatus {
    /// Top-level status of a section.
    ///
    pub fn get(&self, section: Section) -> Status {
        self.sections
            .get(&section)
            .map(SectionStatus::status)
            .unwrap_or_default()
    }

    /// Status of a leaf field of a composite section.
    ///
    pub fn leaf(&self, section: Section, leaf: &str) -> Option<Status> {
        match self.sections.get(&section) {
            Some(SectionStatus::Composite(composite)) => composite.leaf(leaf),
            _ => None,
        }
    }

    pub fn overall(&self) -> Status {
        self.overall
    }

    pub fn is_complete(&self) -> bool {
        self.overall == Status::Complete
    }

    /// Record a status and recompute the overall status.
    ///
    /// With a leaf, only that leaf of a composite section is set and its
    /// `main` is re-derived. Without one, a simple section is set directly and
    /// every leaf of a composite section takes the status. `main` itself is
    /// derived and cannot be targeted.
    ///
    pub fn set(&mut self, section: Section, status: Status, leaf: Option<&str>) {
        let entry = self
            .sections
            .entry(section)
            .or_insert_with(|| SectionStatus::for_section(section));
        match (entry, leaf) {
            (SectionStatus::Composite(composite), Some(leaf)) => {
                if !composite.set_leaf(leaf, status) {
                    warn!("Ignoring status for unknown field {:?}.{}", section, leaf);
                }
            }
            (SectionStatus::Composite(composite), None) => composite.set_all(status),
            (SectionStatus::Simple(slot), None) => *slot = status,
            (SectionStatus::Simple(slot), Some(leaf)) => {
                debug!(
                    "Section {:?} has no fields, applying status for '{}' to the section",
                    section, leaf
                );
                *slot = status;
            }
        }
        self.recompute_overall();
    }

    /// Overall is complete iff every section required by the step table is.
    ///
    pub fn recompute_overall(&mut self) {
        let complete = WizardStep::required_sections().all(|s| self.get(s) == Status::Complete);
        self.overall = Status::from(complete);
    }
}
