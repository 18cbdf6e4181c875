use clap::{Parser, Subcommand};
use nalgebra::Matrix3;
use pans_config::{ClosureDict, ConfigError, load_json, load_yaml, save_json, save_yaml};
use pans_core::ScalarField;
use pans_core::units::m;
use pans_delta::filter_width_catalog;
use pans_mesh::{CellMesh, ChannelSpec, ChannelWalls, MeshGeometry, channel};
use pans_model::{FlowState, InitialFields, ModelResult, PansKOmegaSst, PointImplicitSolver};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "pans-cli")]
#[command(about = "PANS k-omega-SST closure driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a coefficient dictionary
    Validate {
        /// Path to the dictionary (YAML, or JSON with a .json extension)
        dict_path: PathBuf,
    },
    /// Write a dictionary holding every default coefficient
    Init {
        /// Output path (YAML, or JSON with a .json extension)
        output: PathBuf,
    },
    /// List available filter-width providers
    Deltas,
    /// Run the closure on a Cartesian channel with a prescribed velocity profile
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Path to the dictionary
    dict_path: PathBuf,
    /// Number of correction steps
    #[arg(long, default_value_t = 50)]
    steps: usize,
    /// Cells along the channel
    #[arg(long, default_value_t = 4)]
    nx: usize,
    /// Cells across the channel
    #[arg(long, default_value_t = 32)]
    ny: usize,
    /// Channel height in metres
    #[arg(long, default_value_t = 1.0)]
    height: f64,
    /// Bulk velocity in m/s
    #[arg(long, default_value_t = 1.0)]
    velocity: f64,
    /// Walls at both y = 0 and y = height (Poiseuille profile) instead of
    /// y = 0 only (linear shear)
    #[arg(long)]
    two_walls: bool,
    /// Time step in seconds
    #[arg(long, default_value_t = 1e-3)]
    dt: f64,
    /// Kinematic viscosity in m^2/s
    #[arg(long, default_value_t = 1.5e-5)]
    nu: f64,
    /// Initial total k
    #[arg(long, default_value_t = 1e-3)]
    k0: f64,
    /// Initial total omega
    #[arg(long, default_value_t = 10.0)]
    omega0: f64,
    /// Write the final wall-normal profile as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ModelResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { dict_path } => cmd_validate(&dict_path),
        Commands::Init { output } => cmd_init(&output),
        Commands::Deltas => {
            cmd_deltas();
            Ok(())
        }
        Commands::Run(args) => cmd_run(&args),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_dict(path: &Path) -> ModelResult<ClosureDict> {
    let dict = if is_json(path) {
        load_json(path)?
    } else {
        load_yaml(path)?
    };
    Ok(dict)
}

fn cmd_validate(dict_path: &Path) -> ModelResult<()> {
    println!("Validating dictionary: {}", dict_path.display());
    let dict = load_dict(dict_path)?;
    // Also resolves the filter width, which plain validation does not
    pans_delta::build_filter_width(&dict.delta, &dict.delta_coeffs)?;
    println!("✓ Dictionary is valid (delta: {})", dict.delta);
    Ok(())
}

fn cmd_init(output: &Path) -> ModelResult<()> {
    let dict = ClosureDict::default();
    if is_json(output) {
        save_json(output, &dict)?;
    } else {
        save_yaml(output, &dict)?;
    }
    println!("✓ Wrote default dictionary to {}", output.display());
    Ok(())
}

fn cmd_deltas() {
    println!("Filter-width providers:");
    for entry in filter_width_catalog() {
        println!(
            "  {:<12} {} (aliases: {})",
            entry.canonical_id,
            entry.display_name,
            entry.aliases.join(", ")
        );
    }
}

fn cmd_run(args: &RunArgs) -> ModelResult<()> {
    let dict = load_dict(&args.dict_path)?;
    let spec = ChannelSpec {
        nx: args.nx,
        ny: args.ny,
        nz: 1,
        length: m(args.height * args.nx as f64 / args.ny as f64),
        height: m(args.height),
        depth: m(args.height / args.ny as f64),
        walls: if args.two_walls {
            ChannelWalls::BottomAndTop
        } else {
            ChannelWalls::Bottom
        },
    };
    let mesh = channel(&spec)?;
    let n = mesh.n_cells();
    println!(
        "Running {} steps on a {}x{} channel ({} cells)",
        args.steps, args.nx, args.ny, n
    );

    info!(
        delta = %dict.delta,
        sas = dict.sas.is_some(),
        decay_control = dict.decay_control.is_some(),
        "closure dictionary loaded"
    );

    let mut flow = prescribed_flow(&mesh, args);
    if dict.sas.is_some() {
        flow = flow.with_mag_laplacian_u(velocity_laplacian(&mesh, args));
    }

    let mut model = PansKOmegaSst::from_dict(
        &mesh,
        &dict,
        InitialFields::Totals {
            k: ScalarField::uniform(n, args.k0),
            omega: ScalarField::uniform(n, args.omega0),
        },
    )?;
    let mut solver = PointImplicitSolver;

    for step in 1..=args.steps {
        let report = model.correct(&flow, &mut solver)?;
        println!(
            "step {:>4}: fK [{:.3}, {:.3}]  nut_max {:.3e}  bounded kU/omegaU {}/{}",
            step,
            report.f_k_range.0,
            report.f_k_range.1,
            report.nut_max,
            report.k_u_bounded,
            report.omega_u_bounded,
        );
    }

    let csv = profile_csv(&mesh, &spec, &model);
    match &args.output {
        Some(path) => {
            std::fs::write(path, csv).map_err(ConfigError::from)?;
            println!("✓ Profile written to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

/// `du/dy` of the prescribed streamwise profile at height `y`.
fn shear_rate(y: f64, args: &RunArgs) -> f64 {
    let h = args.height;
    if args.two_walls {
        // u = 6 U y (h - y) / h^2
        6.0 * args.velocity * (h - 2.0 * y) / (h * h)
    } else {
        // u = 2 U y / h
        2.0 * args.velocity / h
    }
}

fn prescribed_flow(mesh: &CellMesh, args: &RunArgs) -> FlowState {
    let grad_u = mesh
        .centres()
        .iter()
        .map(|c| {
            let mut g = Matrix3::zeros();
            g[(1, 0)] = shear_rate(c.y, args);
            g
        })
        .collect();
    FlowState::incompressible(grad_u, args.nu, args.dt)
}

fn velocity_laplacian(mesh: &CellMesh, args: &RunArgs) -> ScalarField {
    let value = if args.two_walls {
        12.0 * args.velocity / (args.height * args.height)
    } else {
        0.0
    };
    ScalarField::uniform(mesh.n_cells(), value)
}

/// First column of cells, wall to wall.
fn profile_csv(mesh: &CellMesh, spec: &ChannelSpec, model: &PansKOmegaSst<'_>) -> String {
    let k = model.k();
    let omega = model.omega();
    let mut out = String::from("y,wall_distance,kU,omegaU,k,omega,fK,nut\n");
    for j in 0..spec.ny {
        let cell = spec.index(0, j, 0);
        let _ = writeln!(
            out,
            "{:.6},{:.6},{:.6e},{:.6e},{:.6e},{:.6e},{:.4},{:.6e}",
            mesh.centres()[cell].y,
            mesh.wall_distance()[cell],
            model.k_u()[cell],
            model.omega_u()[cell],
            k[cell],
            omega[cell],
            model.f_k()[cell],
            model.nut()[cell],
        );
    }
    out
}
