//! Domain model for synchronized dashboard records.
//!
//! # Responsibility
//! - Define canonical stored-record and candidate shapes per entity kind.
//! - Own the per-kind disappearance policy configuration.
//!
//! # Invariants
//! - Every stored record is identified by a stable external identity key.
//! - Candidates carry the identity key plus all mutable fields; a field
//!   absent from a candidate means "cleared", not "preserved".

pub mod agent;
pub mod event;
pub mod kind;
pub mod memory;
pub mod task;
