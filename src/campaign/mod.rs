//! The campaign draft domain: data model, wizard steps, section validation
//! and conversion to and from the API wire shape.

pub mod model;
pub mod patch;
pub mod steps;
pub mod transform;
pub mod validate;
pub mod validation;

pub use model::*;
pub use patch::*;
pub use steps::WizardStep;
pub use transform::{expiry_from, merge_remote, prepare_for_submission, MergeMode, PreparedSubmission};
pub use validation::{CompositeStatus, Section, SectionStatus, Status, ValidationStatus};
