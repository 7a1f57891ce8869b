//! Guest list analysis for a multi-tenant wedding RSVP manager.
//!
//! The [`guests`] module holds the pure core (name normalisation, variant generation,
//! duplicate grouping and attendance statistics) together with the collaborator seams the
//! surrounding service plugs storage into.

pub mod config;
pub mod error;
pub mod guests;
pub mod telemetry;
