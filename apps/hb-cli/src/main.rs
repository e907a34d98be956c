use clap::{Parser, Subcommand};
use hb_app::{
    AppError, AppResult, BaseboardService, SunPosition, build_model, construction_reports,
    evaluate_screen, load_document, summarize, surface_reports,
};
use hb_core::Diagnostics;
use hb_core::units::{raw, w};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hb-cli")]
#[command(about = "heatbal CLI - zone heat-balance constructions, screens and baseboards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an input document and run start-up
    Validate {
        /// Path to the input document (YAML or JSON)
        input_path: PathBuf,
    },
    /// Report nominal R and U of every construction
    Constructions {
        /// Path to the input document (YAML or JSON)
        input_path: PathBuf,
        /// Also report U with films for every surface
        #[arg(long)]
        surfaces: bool,
    },
    /// Evaluate the screen on a window
    Screen {
        /// Path to the input document (YAML or JSON)
        input_path: PathBuf,
        /// Window surface name
        surface: String,
        /// Sun azimuth, degrees clockwise from north
        #[arg(long, requires = "altitude", conflicts_with_all = ["phi", "theta"])]
        azimuth: Option<f64>,
        /// Sun altitude, degrees
        #[arg(long, requires = "azimuth")]
        altitude: Option<f64>,
        /// Relative solar altitude to the window normal, degrees
        #[arg(long, requires = "theta")]
        phi: Option<f64>,
        /// Relative solar azimuth to the window normal, degrees
        #[arg(long, requires = "phi")]
        theta: Option<f64>,
    },
    /// Run an electric baseboard for one or more timesteps
    Baseboard {
        /// Path to the input document (YAML or JSON)
        input_path: PathBuf,
        /// Baseboard name
        unit: String,
        /// Remaining zone heating load in W
        #[arg(long)]
        load: f64,
        /// Number of timesteps to run
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "hb-cli");

    match cli.command {
        Commands::Validate { input_path } => cmd_validate(&input_path),
        Commands::Constructions {
            input_path,
            surfaces,
        } => cmd_constructions(&input_path, surfaces),
        Commands::Screen {
            input_path,
            surface,
            azimuth,
            altitude,
            phi,
            theta,
        } => {
            let sun = match (azimuth, altitude, phi, theta) {
                (Some(azimuth_deg), Some(altitude_deg), _, _) => SunPosition::Sky {
                    azimuth_deg,
                    altitude_deg,
                },
                (_, _, Some(phi_deg), Some(theta_deg)) => SunPosition::Relative { phi_deg, theta_deg },
                _ => {
                    return Err(AppError::InvalidInput(
                        "give --azimuth/--altitude or --phi/--theta".to_string(),
                    ));
                }
            };
            cmd_screen(&input_path, &surface, sun)
        }
        Commands::Baseboard {
            input_path,
            unit,
            load,
            steps,
        } => cmd_baseboard(&input_path, &unit, load, steps),
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for d in diagnostics.iter() {
        println!("  {d}");
    }
}

fn cmd_validate(input_path: &Path) -> AppResult<()> {
    println!("Validating input: {}", input_path.display());
    let doc = load_document(input_path)?;
    let summary = summarize(&doc);
    println!(
        "  {} (version {}): {} materials, {} constructions, {} zones, {} surfaces, {} baseboards",
        summary.name,
        summary.version,
        summary.materials,
        summary.constructions,
        summary.zones,
        summary.surfaces,
        summary.baseboards
    );

    match build_model(&doc) {
        Ok(startup) => {
            print_diagnostics(&startup.diagnostics);
            println!(
                "✓ Start-up succeeded ({} warning(s))",
                startup.diagnostics.warning_count()
            );
            Ok(())
        }
        Err(AppError::Startup { diagnostics }) => {
            print_diagnostics(&diagnostics);
            Err(AppError::Startup { diagnostics })
        }
        Err(e) => Err(e),
    }
}

fn cmd_constructions(input_path: &Path, surfaces: bool) -> AppResult<()> {
    let doc = load_document(input_path)?;
    let model = build_model(&doc)?.model;

    println!(
        "{:<32} {:>10} {:>10} {:<14} {:<6} {:<6}",
        "Construction", "R [m2K/W]", "U [W/m2K]", "Roughness", "Window", "Valid"
    );
    for c in construction_reports(&model)? {
        let u = c
            .nominal_u
            .map(|u| format!("{u:.3}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:>10.3} {:>10} {:<14} {:<6} {:<6}",
            c.name, c.nominal_r, u, c.outside_roughness, c.is_window, c.valid
        );
    }

    if surfaces {
        println!();
        println!(
            "{:<32} {:<16} {:<32} {:>12}",
            "Surface", "Zone", "Outside boundary", "U+films"
        );
        for s in surface_reports(&model)? {
            let u = if s.films_valid {
                format!("{:.3}", s.u_with_films)
            } else {
                format!("{:.3}*", s.u_with_films)
            };
            println!("{:<32} {:<16} {:<32} {:>12}", s.name, s.zone, s.boundary, u);
        }
    }
    Ok(())
}

fn cmd_screen(input_path: &Path, surface: &str, sun: SunPosition) -> AppResult<()> {
    let doc = load_document(input_path)?;
    let mut model = build_model(&doc)?.model;
    let optics = evaluate_screen(&mut model, surface, sun)?;

    println!("Screen on {surface}:");
    println!("  Beam-beam transmittance:        {:.6}", optics.bm_bm_trans);
    println!("  Beam-diffuse transmittance:     {:.6}", optics.bm_dif_trans);
    println!("  Visible beam-beam:              {:.6}", optics.bm_bm_trans_vis);
    println!("  Visible beam-diffuse:           {:.6}", optics.bm_dif_trans_vis);
    println!("  Front reflectance:              {:.6}", optics.refl_front);
    println!("  Front absorptance:              {:.6}", optics.abs_front);
    println!("  Back beam-beam transmittance:   {:.6}", optics.bm_bm_trans_back);
    println!("  Back reflectance:               {:.6}", optics.refl_back);
    println!("  Back absorptance:               {:.6}", optics.abs_back);
    Ok(())
}

fn cmd_baseboard(input_path: &Path, unit: &str, load: f64, steps: usize) -> AppResult<()> {
    if !load.is_finite() {
        return Err(AppError::InvalidInput(format!("load must be finite, got {load}")));
    }
    let doc = load_document(input_path)?;
    let model = build_model(&doc)?.model;
    let mut service = BaseboardService::from_document(&doc, &model)?;

    println!(
        "{:>5} {:>12} {:>12} {:>10} {:>14} {:>14}",
        "Step", "Met [W]", "Elec [W]", "Out [C]", "Heat [J]", "Elec [J]"
    );
    for step in 1..=steps {
        let result = service.step(&model, unit, w(load))?;
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>10.2} {:>14.1} {:>14.1}",
            step,
            raw::watts(result.power_met),
            raw::watts(result.electric_power),
            raw::celsius(result.outlet_temperature),
            result.energy,
            result.electric_energy
        );
    }

    for entry in service.output().sizing() {
        println!("Sizing: {} {}: {} = {:.2}", entry.object_type, entry.name, entry.description, entry.value);
    }
    print_diagnostics(service.diagnostics());
    Ok(())
}
