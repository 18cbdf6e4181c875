//! PANS k-omega-SST turbulence closure.
//!
//! This crate computes the eddy viscosity and the source terms of the
//! unresolved turbulence kinetic energy (`kU`) and unresolved specific
//! dissipation rate (`omegaU`) transport equations. The fraction of turbulence
//! that is modelled rather than resolved is controlled per cell by `fK` and
//! `fOmega`, derived from a filter width supplied by a `FilterWidth` provider.
//!
//! Discretisation, convection and diffusion belong to the host solver; the
//! closure hands it a `TransportEquation` through the `TransportSolver` trait
//! and receives the updated field back.

pub mod blending;
pub mod closure;
pub mod coeffs;
pub mod equation;
pub mod error;
pub mod flow;
pub mod resolution;
pub mod sources;
pub mod sst;
pub mod viscosity;

pub use blending::{BlendingFields, BlendingInputs};
pub use closure::{CorrectionReport, CorrectionStage, InitialFields, PansKOmegaSst};
pub use coeffs::{ConfigVersion, DecayControl, Limits, ModelCoefficients, PansCoeffs, SasCoeffs};
pub use equation::{PointImplicitSolver, TransportEquation, TransportSolver};
pub use error::{ModelError, ModelResult};
pub use flow::{FlowInvariants, FlowState};
pub use resolution::{ResolutionControl, ResolutionFields};
pub use sources::{SasInputs, SourceAssembler, SourceContribution, SourceInputs};
pub use sst::{SstBase, SstCoeffs};
pub use viscosity::NutUpdate;
