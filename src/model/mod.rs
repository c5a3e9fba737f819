//! Data model for root system architectures (RSA).
//!
//! # RSA representation
//! An RSA is a set of [Axe]s of one or several plants. Each axe is a traced
//! root branch given as a path of segments from its plant's origin to its
//! tip, referenced by [AxeId]. Segment geometry (lengths) is kept apart from
//! the axes, in a [SegmentMap].
//!
//! After [hierarchy inference](crate::hierarchy), each plant forms a tree:
//!
//! | [AxeType] | Parent | Per plant |
//! |------|---------------|----------|
//! | `Primary` | none | exactly one |
//! | `Lateral` | a primary axe | any number |
//!
//! # Storing axes
//! The algorithms of this crate access axes through the [RsaBuilder]
//! trait. [AxeArena] is the provided implementation; implement
//! [RsaBuilder] on your own storage to reuse the algorithms without it.

pub mod axe;
pub mod axe_arena;
pub mod rsa_builder;
pub mod segment_map;

// Axe
pub use axe::Axe;
pub use axe::AxeId;
pub use axe::AxeType;
pub use axe::Length;
pub use axe::PlantId;
pub use axe::SegmentId;
// Storage
pub use axe_arena::AxeArena;
pub use rsa_builder::RsaBuilder;
pub use segment_map::SegmentMap;
