//! Incident notification domain: form snapshot, field state machine,
//! validation gate and email composition

pub mod compose;
pub mod domain;
pub mod session;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{derive_flags, normalize, FieldFlags, FieldState};
pub use domain::validation::{has_decrease_in_bets, ValidationGap};

pub use compose::{compose, derive_state, DerivedState, RenderContext};
pub use session::{FieldChange, FormSession};

// Re-export template selectors from critnotify-email
pub use critnotify_email::{EmailPhase, RenderedEmail, TemplateKind};
