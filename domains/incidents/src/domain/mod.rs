//! Incidents domain layer: entities, field state machine, validation

pub mod entities;
pub mod state;
pub mod validation;
