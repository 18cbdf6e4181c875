//! PANS k-omega-SST closure state and its correction cycle.

use crate::blending::{self, BlendingFields, BlendingInputs};
use crate::coeffs::{ConfigVersion, ModelCoefficients};
use crate::equation::{TransportEquation, TransportSolver};
use crate::error::{ModelError, ModelResult};
use crate::flow::{FlowInvariants, FlowState};
use crate::resolution::ResolutionControl;
use crate::sources::{SasInputs, SourceAssembler, SourceInputs};
use crate::sst::SstBase;
use crate::viscosity::{NutUpdate, correct_nut};
use pans_config::ClosureDict;
use pans_core::{Real, ScalarField};
use pans_delta::{FilterWidth, build_filter_width};
use pans_mesh::MeshGeometry;
use std::fmt;
use tracing::{debug, info, warn};

/// Stage of the correction cycle.
///
/// Advances `Idle -> BlendingComputed -> SourcesAssembled -> EquationsSolved
/// -> ViscosityUpdated -> Idle` within a single call to
/// [`PansKOmegaSst::correct`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorrectionStage {
    #[default]
    Idle,
    BlendingComputed,
    SourcesAssembled,
    EquationsSolved,
    ViscosityUpdated,
}

impl CorrectionStage {
    fn next(self) -> Self {
        match self {
            Self::Idle => Self::BlendingComputed,
            Self::BlendingComputed => Self::SourcesAssembled,
            Self::SourcesAssembled => Self::EquationsSolved,
            Self::EquationsSolved => Self::ViscosityUpdated,
            Self::ViscosityUpdated => Self::Idle,
        }
    }
}

impl fmt::Display for CorrectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::BlendingComputed => "blending computed",
            Self::SourcesAssembled => "sources assembled",
            Self::EquationsSolved => "equations solved",
            Self::ViscosityUpdated => "viscosity updated",
        };
        f.write_str(name)
    }
}

/// How the unresolved fields are initialised.
#[derive(Clone, Debug)]
pub enum InitialFields {
    /// Unresolved fields and fK read back from a previous run.
    Restart {
        k_u: ScalarField,
        omega_u: ScalarField,
        f_k: ScalarField,
    },
    /// Total fields; fK starts at its upper limit and the unresolved fields
    /// are derived from it.
    Totals { k: ScalarField, omega: ScalarField },
}

/// Summary of one correction, for logging and monitoring.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionReport {
    pub config_version: ConfigVersion,
    pub k_u_bounded: usize,
    pub omega_u_bounded: usize,
    pub nut_clipped: usize,
    pub f_k_range: (Real, Real),
    pub nut_max: Real,
}

/// PANS k-omega-SST closure over one mesh.
///
/// Owns the unresolved fields, the resolution-control fields and the eddy
/// viscosity. All mutation happens through [`correct`](Self::correct) and
/// [`reconfigure`](Self::reconfigure), so `&mut self` rules out re-entrant
/// corrections.
pub struct PansKOmegaSst<'m> {
    mesh: &'m dyn MeshGeometry,
    coeffs: ModelCoefficients,
    version: ConfigVersion,
    base: SstBase,
    resolution: ResolutionControl,
    filter_width: Box<dyn FilterWidth>,

    k_u: ScalarField,
    omega_u: ScalarField,
    f_k: ScalarField,
    f_omega: ScalarField,
    nut: ScalarField,
    f23: ScalarField,
    stage: CorrectionStage,
}

impl fmt::Debug for PansKOmegaSst<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PansKOmegaSst")
            .field("n_cells", &self.n_cells())
            .field("version", &self.version)
            .field("delta", &self.filter_width.name())
            .field("stage", &self.stage)
            .finish()
    }
}

impl<'m> PansKOmegaSst<'m> {
    /// Build the closure from a validated dictionary and initial fields.
    pub fn from_dict(
        mesh: &'m dyn MeshGeometry,
        dict: &ClosureDict,
        initial: InitialFields,
    ) -> ModelResult<Self> {
        Self::new(mesh, ModelCoefficients::from_dict(dict)?, initial)
    }

    pub fn new(
        mesh: &'m dyn MeshGeometry,
        coeffs: ModelCoefficients,
        initial: InitialFields,
    ) -> ModelResult<Self> {
        let n = mesh.n_cells();
        let base = SstBase::new(coeffs.sst.clone());
        let resolution = ResolutionControl::new(&coeffs.pans, coeffs.sst.beta_star);
        let filter_width = build_filter_width(&coeffs.delta, &coeffs.delta_coeffs)?;

        let (mut k_u, mut omega_u, f_k) = match initial {
            InitialFields::Restart { k_u, omega_u, f_k } => {
                k_u.ensure_len(n, "kU")?;
                omega_u.ensure_len(n, "omegaU")?;
                f_k.ensure_len(n, "fK")?;
                let f_k = f_k.map(|v| resolution.clamp_f_k(v));
                (k_u, omega_u, f_k)
            }
            InitialFields::Totals { k, omega } => {
                k.ensure_len(n, "k")?;
                omega.ensure_len(n, "omega")?;
                let (_, u_lim) = resolution.limits();
                let f_k = ScalarField::uniform(n, u_lim);
                let f_omega = resolution.f_omega_cell(u_lim);
                (k.map(|v| u_lim * v), omega.map(|v| f_omega * v), f_k)
            }
        };
        let f_omega = resolution.f_omega(&f_k);

        let k_bounded = k_u.bound(coeffs.limits.k_min);
        let omega_bounded = omega_u.bound(coeffs.limits.omega_min);
        if k_bounded + omega_bounded > 0 {
            warn!(
                k_bounded,
                omega_bounded, "initial unresolved fields raised to their floors"
            );
        }

        let nu = ScalarField::zeros(n);
        let s2 = ScalarField::zeros(n);
        let f23 = blending::f23(&base, &k_u, &omega_u, mesh.wall_distance(), &nu)?;
        let nut = correct_nut(&base, &coeffs.limits, &k_u, &omega_u, &f23, &s2)?.nut;

        info!(
            n_cells = n,
            delta = filter_width.name(),
            f3 = coeffs.sst.f3,
            decay_control = coeffs.decay.is_some(),
            sas = coeffs.sas.is_some(),
            "PANS k-omega-SST closure initialised"
        );

        Ok(Self {
            mesh,
            coeffs,
            version: ConfigVersion::default(),
            base,
            resolution,
            filter_width,
            k_u,
            omega_u,
            f_k,
            f_omega,
            nut,
            f23,
            stage: CorrectionStage::Idle,
        })
    }

    pub fn n_cells(&self) -> usize {
        self.mesh.n_cells()
    }

    pub fn coefficients(&self) -> &ModelCoefficients {
        &self.coeffs
    }

    pub fn config_version(&self) -> ConfigVersion {
        self.version
    }

    pub fn stage(&self) -> CorrectionStage {
        self.stage
    }

    pub fn k_u(&self) -> &ScalarField {
        &self.k_u
    }

    pub fn omega_u(&self) -> &ScalarField {
        &self.omega_u
    }

    pub fn f_k(&self) -> &ScalarField {
        &self.f_k
    }

    pub fn f_omega(&self) -> &ScalarField {
        &self.f_omega
    }

    pub fn nut(&self) -> &ScalarField {
        &self.nut
    }

    /// Limiter blend used in the last viscosity update.
    pub fn f23(&self) -> &ScalarField {
        &self.f23
    }

    /// Total turbulence kinetic energy `kU / fK`.
    pub fn k(&self) -> ScalarField {
        unresolved_to_total(&self.k_u, &self.f_k)
    }

    /// Total specific dissipation rate `omegaU / fOmega`.
    pub fn omega(&self) -> ScalarField {
        unresolved_to_total(&self.omega_u, &self.f_omega)
    }

    /// Total dissipation rate `betaStar k omega`.
    pub fn epsilon(&self) -> ScalarField {
        let beta_star = self.coeffs.sst.beta_star;
        self.k()
            .values()
            .iter()
            .zip(self.omega().iter())
            .map(|(k, w)| beta_star * k * w)
            .collect()
    }

    /// Current filter width from the configured provider.
    pub fn delta(&self) -> ScalarField {
        self.filter_width.delta(self.mesh)
    }

    /// Effective diffusivity of `kU` for the given F1 and molecular viscosity.
    pub fn d_k_u_eff(&self, f1: &ScalarField, nu: &ScalarField) -> ModelResult<ScalarField> {
        self.assembler()
            .d_k_u_eff(f1, &self.f_k, &self.f_omega, &self.nut, nu)
    }

    /// Effective diffusivity of `omegaU` for the given F1 and molecular viscosity.
    pub fn d_omega_u_eff(&self, f1: &ScalarField, nu: &ScalarField) -> ModelResult<ScalarField> {
        self.assembler()
            .d_omega_u_eff(f1, &self.f_k, &self.f_omega, &self.nut, nu)
    }

    /// Blending functions of the current state. Does not modify anything.
    pub fn blending(&self, nu: &ScalarField) -> ModelResult<(BlendingFields, ScalarField)> {
        let grad_k = self.mesh.grad(&self.k_u)?;
        let grad_omega = self.mesh.grad(&self.omega_u)?;
        let cd = blending::cross_diffusion(
            self.coeffs.sst.alpha_omega2,
            &grad_k,
            &grad_omega,
            &self.omega_u,
        )?;
        let fields = blending::evaluate(
            &self.base,
            &BlendingInputs {
                k_u: &self.k_u,
                omega_u: &self.omega_u,
                wall_distance: self.mesh.wall_distance(),
                nu,
                cd_k_omega: &cd,
            },
        )?;
        Ok((fields, cd))
    }

    /// Recompute the eddy viscosity from the current unresolved fields.
    ///
    /// Returns the number of clipped cells.
    pub fn correct_nut(&mut self, flow: &FlowState) -> ModelResult<usize> {
        flow.validate(self.n_cells())?;
        let inv = flow.invariants();
        self.update_nut(&flow.nu, &inv.s2)
    }

    fn update_nut(&mut self, nu: &ScalarField, s2: &ScalarField) -> ModelResult<usize> {
        let (f23, update) = self.viscosity(&self.k_u, &self.omega_u, nu, s2)?;
        self.f23 = f23;
        self.nut = update.nut;
        Ok(update.clipped)
    }

    /// F23 and the eddy viscosity of the given unresolved fields.
    fn viscosity(
        &self,
        k_u: &ScalarField,
        omega_u: &ScalarField,
        nu: &ScalarField,
        s2: &ScalarField,
    ) -> ModelResult<(ScalarField, NutUpdate)> {
        let f23 = blending::f23(&self.base, k_u, omega_u, self.mesh.wall_distance(), nu)?;
        let update = correct_nut(&self.base, &self.coeffs.limits, k_u, omega_u, &f23, s2)?;
        Ok((f23, update))
    }

    /// Advance the closure by one step.
    ///
    /// Order: blending, `kU` solve, `omegaU` solve, resolution control, eddy
    /// viscosity. Both transport equations are handed to `solver`; solved
    /// fields are bounded from below before use. The state is replaced only
    /// once every stage has succeeded; on error it is left as it was and the
    /// stage returns to idle.
    pub fn correct(
        &mut self,
        flow: &FlowState,
        solver: &mut dyn TransportSolver,
    ) -> ModelResult<CorrectionReport> {
        if self.stage != CorrectionStage::Idle {
            warn!(stage = %self.stage, "previous correction did not complete");
            self.stage = CorrectionStage::Idle;
        }
        match self.run_correction(flow, solver) {
            Ok(report) => {
                debug!(?report, "correction complete");
                Ok(report)
            }
            Err(err) => {
                warn!(stage = %self.stage, error = %err, "correction aborted, state kept");
                self.stage = CorrectionStage::Idle;
                Err(err)
            }
        }
    }

    fn run_correction(
        &mut self,
        flow: &FlowState,
        solver: &mut dyn TransportSolver,
    ) -> ModelResult<CorrectionReport> {
        let n = self.n_cells();
        flow.validate(n)?;
        if self.coeffs.sas.is_some() && flow.mag_laplacian_u.is_none() {
            return Err(ModelError::InvalidInput {
                what: "scale-adaptive source needs |laplacian(U)|".to_string(),
            });
        }

        let inv = flow.invariants();
        let grad_k = self.mesh.grad(&self.k_u)?;
        let grad_omega = self.mesh.grad(&self.omega_u)?;
        let cd = blending::cross_diffusion(
            self.coeffs.sst.alpha_omega2,
            &grad_k,
            &grad_omega,
            &self.omega_u,
        )?;
        let blend = blending::evaluate(
            &self.base,
            &BlendingInputs {
                k_u: &self.k_u,
                omega_u: &self.omega_u,
                wall_distance: self.mesh.wall_distance(),
                nu: &flow.nu,
                cd_k_omega: &cd,
            },
        )?;
        self.advance();

        let d_k = self.d_k_u_eff(&blend.f1, &flow.nu)?;
        let d_omega = self.d_omega_u_eff(&blend.f1, &flow.nu)?;
        let delta = self.delta();

        // kU
        let k_sources = {
            let inputs = self.source_inputs(flow, &inv, &blend, &cd, &self.k_u);
            let assembler = self.assembler();
            let mut sources = assembler.k_u_equation(&inputs)?;
            sources.add(&assembler.k_source(&inputs)?)?;
            sources
        };
        self.advance();

        let mut k_u = solver.solve(&TransportEquation {
            name: "kU",
            field: &self.k_u,
            rho: &flow.rho,
            diffusivity: &d_k,
            sources: &k_sources,
            dt: flow.dt,
        })?;
        k_u.ensure_len(n, "solved kU")?;
        let k_u_bounded = k_u.bound(self.coeffs.limits.k_min);

        // omegaU, with sources evaluated on the updated kU
        let omega_sources = {
            let inputs = self.source_inputs(flow, &inv, &blend, &cd, &k_u);
            let assembler = self.assembler();
            let mut sources = assembler.omega_u_equation(&inputs)?;
            sources.add(&assembler.omega_source(&inputs)?)?;
            if let Some(mag_laplacian_u) = &flow.mag_laplacian_u {
                sources.add(&assembler.qsas(
                    &inputs,
                    &SasInputs {
                        delta: &delta,
                        mag_laplacian_u,
                        grad_k_u: &grad_k,
                        grad_omega_u: &grad_omega,
                        dt: flow.dt,
                    },
                )?)?;
            }
            sources
        };

        let mut omega_u = solver.solve(&TransportEquation {
            name: "omegaU",
            field: &self.omega_u,
            rho: &flow.rho,
            diffusivity: &d_omega,
            sources: &omega_sources,
            dt: flow.dt,
        })?;
        omega_u.ensure_len(n, "solved omegaU")?;
        let omega_u_bounded = omega_u.bound(self.coeffs.limits.omega_min);
        self.advance();

        // Totals use the fK of the previous step
        let res = self.resolution.evaluate(
            &unresolved_to_total(&k_u, &self.f_k),
            &unresolved_to_total(&omega_u, &self.f_omega),
            &delta,
        )?;
        let (f23, update) = self.viscosity(&k_u, &omega_u, &flow.nu, &inv.s2)?;
        self.advance();

        self.k_u = k_u;
        self.omega_u = omega_u;
        self.f_k = res.f_k;
        self.f_omega = res.f_omega;
        self.f23 = f23;
        self.nut = update.nut;

        if k_u_bounded + omega_u_bounded > 0 {
            warn!(
                k_u_bounded,
                omega_u_bounded, "unresolved fields bounded after solve"
            );
        }
        let nut_clipped = update.clipped;
        if nut_clipped > 0 {
            warn!(nut_clipped, "eddy viscosity clipped");
        }

        let report = CorrectionReport {
            config_version: self.version,
            k_u_bounded,
            omega_u_bounded,
            nut_clipped,
            f_k_range: (
                self.f_k.min().unwrap_or(Real::NAN),
                self.f_k.max().unwrap_or(Real::NAN),
            ),
            nut_max: self.nut.max().unwrap_or(0.0),
        };
        self.advance();
        Ok(report)
    }

    /// Re-read coefficients from `dict`.
    ///
    /// Returns `Ok(false)` if nothing changed. On success the configuration
    /// version is incremented, the filter-width provider is rebuilt when its
    /// settings changed, and fK is clamped into the new limits. On error the
    /// closure is left untouched.
    pub fn reconfigure(&mut self, dict: &ClosureDict) -> ModelResult<bool> {
        let coeffs = ModelCoefficients::from_dict(dict)?;
        if coeffs == self.coeffs {
            debug!(version = %self.version, "reconfigure: coefficients unchanged");
            return Ok(false);
        }

        let filter_width = if coeffs.delta_differs(&self.coeffs) {
            Some(build_filter_width(&coeffs.delta, &coeffs.delta_coeffs)?)
        } else {
            None
        };

        self.base = SstBase::new(coeffs.sst.clone());
        self.resolution = ResolutionControl::new(&coeffs.pans, coeffs.sst.beta_star);
        if let Some(filter_width) = filter_width {
            self.filter_width = filter_width;
        }
        self.f_k = self.f_k.map(|v| self.resolution.clamp_f_k(v));
        self.f_omega = self.resolution.f_omega(&self.f_k);
        self.coeffs = coeffs;
        self.version = self.version.next();

        info!(
            version = %self.version,
            delta = self.filter_width.name(),
            "closure reconfigured"
        );
        Ok(true)
    }

    fn assembler(&self) -> SourceAssembler<'_> {
        SourceAssembler::new(
            &self.base,
            self.coeffs.decay.as_ref(),
            self.coeffs.sas.as_ref(),
        )
    }

    fn source_inputs<'a>(
        &'a self,
        flow: &'a FlowState,
        inv: &'a FlowInvariants,
        blend: &'a BlendingFields,
        cd: &'a ScalarField,
        k_u: &'a ScalarField,
    ) -> SourceInputs<'a> {
        SourceInputs {
            k_u,
            omega_u: &self.omega_u,
            f_k: &self.f_k,
            f_omega: &self.f_omega,
            nut: &self.nut,
            rho: &flow.rho,
            s2: &inv.s2,
            g_by_nu: &inv.g_by_nu,
            div_u: &inv.div_u,
            f1: &blend.f1,
            f23: &blend.f23,
            cd_k_omega: cd,
        }
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        debug!(from = %self.stage, to = %next, "correction stage");
        self.stage = next;
    }
}

/// Total field `phi_u / f` of an unresolved field and its resolution factor.
fn unresolved_to_total(unresolved: &ScalarField, factor: &ScalarField) -> ScalarField {
    unresolved
        .values()
        .iter()
        .zip(factor.iter())
        .map(|(u, f)| u / f)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::PointImplicitSolver;
    use pans_core::units::m;
    use pans_mesh::{ChannelSpec, channel};

    fn small_channel() -> pans_mesh::CellMesh {
        channel(&ChannelSpec {
            nx: 2,
            ny: 4,
            nz: 1,
            length: m(0.2),
            height: m(0.4),
            depth: m(0.1),
            ..ChannelSpec::default()
        })
        .unwrap()
    }

    fn totals(n: usize) -> InitialFields {
        InitialFields::Totals {
            k: ScalarField::uniform(n, 1e-2),
            omega: ScalarField::uniform(n, 10.0),
        }
    }

    #[test]
    fn totals_initialisation_uses_upper_limit() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let model = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(n)).unwrap();
        assert!(model.f_k().iter().all(|&f| f == 1.0));
        assert!((model.k()[0] - 1e-2).abs() < 1e-15);
        assert!((model.omega()[3] - 10.0).abs() < 1e-12);
        assert_eq!(model.stage(), CorrectionStage::Idle);
    }

    #[test]
    fn restart_clamps_f_k() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let model = PansKOmegaSst::new(
            &mesh,
            ModelCoefficients::default(),
            InitialFields::Restart {
                k_u: ScalarField::uniform(n, 1e-3),
                omega_u: ScalarField::uniform(n, 1.0),
                f_k: ScalarField::uniform(n, 5.0),
            },
        )
        .unwrap();
        assert!(model.f_k().iter().all(|&f| f == 1.0));
    }

    #[test]
    fn wrong_initial_size_is_rejected() {
        let mesh = small_channel();
        let err = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(3)).unwrap_err();
        assert!(matches!(err, ModelError::Core(_)));
    }

    #[test]
    fn correct_returns_to_idle() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let mut model = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(n)).unwrap();
        let flow = FlowState::quiescent(n, 1.5e-5, 1e-3);
        let report = model.correct(&flow, &mut PointImplicitSolver).unwrap();
        assert_eq!(model.stage(), CorrectionStage::Idle);
        assert_eq!(report.config_version, ConfigVersion(0));
    }

    /// Point-implicit solve for kU, hard failure for omegaU.
    struct OmegaFails;

    impl TransportSolver for OmegaFails {
        fn solve(&mut self, equation: &TransportEquation<'_>) -> ModelResult<ScalarField> {
            if equation.name == "omegaU" {
                return Err(ModelError::Solver {
                    equation: equation.name,
                    what: "diverged".to_string(),
                });
            }
            PointImplicitSolver.solve(equation)
        }
    }

    #[test]
    fn failed_omega_solve_keeps_previous_state() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let mut model = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(n)).unwrap();
        let mut g = nalgebra::Matrix3::zeros();
        g[(1, 0)] = 20.0;
        let flow = FlowState::incompressible(vec![g; n], 1.5e-5, 1e-3);

        let k_u = model.k_u().clone();
        let omega_u = model.omega_u().clone();
        let f_k = model.f_k().clone();
        let nut = model.nut().clone();

        let err = model.correct(&flow, &mut OmegaFails).unwrap_err();
        assert!(matches!(err, ModelError::Solver { equation: "omegaU", .. }));
        assert_eq!(model.k_u(), &k_u);
        assert_eq!(model.omega_u(), &omega_u);
        assert_eq!(model.f_k(), &f_k);
        assert_eq!(model.nut(), &nut);
        assert_eq!(model.stage(), CorrectionStage::Idle);

        // The next step starts from the untouched state
        model.correct(&flow, &mut PointImplicitSolver).unwrap();
        assert_ne!(model.k_u(), &k_u);
    }

    #[test]
    fn sas_without_laplacian_is_rejected() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let mut dict = ClosureDict::default();
        dict.sas = Some(Default::default());
        let mut model = PansKOmegaSst::from_dict(&mesh, &dict, totals(n)).unwrap();
        let flow = FlowState::quiescent(n, 1.5e-5, 1e-3);
        assert!(matches!(
            model.correct(&flow, &mut PointImplicitSolver),
            Err(ModelError::InvalidInput { .. })
        ));
        assert_eq!(model.stage(), CorrectionStage::Idle);
    }

    #[test]
    fn reconfigure_detects_changes() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let mut model = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(n)).unwrap();

        let mut dict = ClosureDict::default();
        assert!(!model.reconfigure(&dict).unwrap());
        assert_eq!(model.config_version(), ConfigVersion(0));

        dict.pans.fk_upper_limit = 0.6;
        assert!(model.reconfigure(&dict).unwrap());
        assert_eq!(model.config_version(), ConfigVersion(1));
        assert!(model.f_k().iter().all(|&f| f == 0.6));
    }

    #[test]
    fn failed_reconfigure_leaves_state_untouched() {
        let mesh = small_channel();
        let n = mesh.n_cells();
        let mut model = PansKOmegaSst::new(&mesh, ModelCoefficients::default(), totals(n)).unwrap();

        let mut dict = ClosureDict::default();
        dict.delta = "noSuchDelta".into();
        assert!(matches!(
            model.reconfigure(&dict),
            Err(ModelError::Delta(_))
        ));
        assert_eq!(model.coefficients().delta, "cubeRootVol");
        assert_eq!(model.config_version(), ConfigVersion(0));
    }
}
