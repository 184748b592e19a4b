//! Editing session over a form snapshot
//!
//! Every change overwrites one field, drops values whose fields became
//! hidden, and re-derives flags and the rendered email from scratch.

use std::str::FromStr;

use crate::compose::{derive_state, DerivedState, RenderContext};
use crate::domain::entities::{Field, FieldError, FormSnapshot};
use crate::domain::state::normalize;

/// A single `field=value` edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl FromStr for FieldChange {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| FieldError::Malformed(s.to_string()))?;

        Ok(Self {
            field: name.parse()?,
            value: value.to_string(),
        })
    }
}

/// Holds the current snapshot and the context it renders with
#[derive(Debug, Clone)]
pub struct FormSession {
    snapshot: FormSnapshot,
    context: RenderContext,
}

impl FormSession {
    pub fn new(snapshot: FormSnapshot, context: RenderContext) -> Self {
        Self {
            snapshot: normalize(&snapshot),
            context,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Apply one edit and re-derive everything
    pub fn apply(&mut self, change: FieldChange) -> Result<DerivedState, FieldError> {
        let mut next = self.snapshot.clone();
        next.set(change.field, &change.value)?;
        self.snapshot = normalize(&next);

        tracing::debug!(field = %change.field, "Applied field change");

        Ok(self.current())
    }

    /// Derived state for the snapshot as it stands
    pub fn current(&self) -> DerivedState {
        derive_state(&self.snapshot, &self.context)
    }
}
