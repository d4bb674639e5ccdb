//! Equivalence verification
//!
//! See `checker.rs` for the protocol and `oracle.rs` for the sequential
//! reference generators.

pub mod checker;
pub mod oracle;

pub use checker::{
    check_equivalence, compare_stream, run_protocol, verify_all_lanes, EquivalenceOutcome,
    EquivalenceReport,
};
pub use oracle::{ReferenceMersenneTwister, ReferenceOracle, ReferenceXorShift};
