//! Rsamerge is a library to infer the hierarchy of root system
//! architectures (RSA) and to score merges of their axes.
//!
//! An upstream extraction pipeline produces a noisy set of candidate axes
//! (polylines with geometric overlaps). This crate provides:
//! - Hierarchy inference: one primary axe per plant, all other axes
//!   lateral and attached to the primary axe they share the longest path
//!   prefix with. See [crate::hierarchy].
//! - Lateral axe models: a distribution fitted to a geometric
//!   merge-affinity value of all lateral axes ([crate::metric]), whose
//!   dispersion tells a merge optimizer whether combining two axes makes
//!   the lateral population look more coherent. See [crate::lateral].
//! - Incremental statistics: merges are evaluated on sufficient statistics
//!   in O(1), without refitting. See [crate::stats].
//! - RSA storage: the [RsaBuilder](model::RsaBuilder) contract and the
//!   arena implementation [AxeArena](model::AxeArena). See [crate::model].
//!
//! Limitations:
//! - Proposing merge candidates is left to the caller
//! - Only one model kind ([ModelKind::Arabidopsis]) is known
//!
//! # Usage pattern
//! ```
//! use rsamerge::model::{Axe, AxeArena};
//! use rsamerge::{get_model, set_axe_type};
//!
//! let mut rsa = AxeArena::new();
//! let s0 = rsa.add_segment(10.0);
//! let s1 = rsa.add_segment(90.0);
//! let s2 = rsa.add_segment(20.0);
//! let s3 = rsa.add_segment(15.0);
//! let primary = rsa.add_axe(Axe::new(0, vec![s0, s1], 100.0, 100.0).with_order(1));
//! let a = rsa.add_axe(Axe::new(0, vec![s0, s2], 30.0, 20.0));
//! let b = rsa.add_axe(Axe::new(0, vec![s0, s3], 25.0, 15.0));
//!
//! // Once per RSA
//! set_axe_type(&mut rsa)?;
//!
//! // Fit, then try merging `a` and `b`
//! let mut model = get_model("Arabidopsis")?;
//! model.fit(&rsa)?;
//! let merged = Axe::new(0, vec![s0, s2], 30.0, 20.0).with_parent(primary, 10.0);
//! let evaluation = model.evaluate_merge(&rsa, a, b, &merged)?;
//! if evaluation.std <= model.value()? {
//!     model.commit(evaluation);
//! }
//! # Ok::<(), rsamerge::RsaError>(())
//! ```

pub mod error;
pub mod hierarchy;
pub mod lateral;
pub mod metric;
pub mod model;
pub mod registry;
pub mod stats;

pub use error::{RsaError, RsaErrorType};
pub use hierarchy::set_axe_type;
pub use lateral::{LateralAxisModel, MergeEvaluation};
pub use registry::{ModelKind, get_model};
