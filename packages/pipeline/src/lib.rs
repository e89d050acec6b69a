#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Relational stages of the parcel revenue pipeline.
//!
//! [`enrich`] left-joins parcel geometry to assessor rows and derives
//! per-row tax/area metrics; [`aggregate`] collapses the join product to
//! exactly one row per parcel; [`stats`] summarizes revenue-per-acre
//! distributions by land use. All three are pure whole-relation
//! transforms with no I/O.

pub mod aggregate;
pub mod enrich;
pub mod stats;

pub use aggregate::aggregate;
pub use enrich::enrich;
pub use stats::{LanduseStats, landuse_stats};
