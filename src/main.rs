use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use fisurf::io::{self, pdb, tables};
use fisurf::model::RadiusTable;
use fisurf::utils::logger;
use fisurf::{color_surface, ColorOutcome, Config, FiError};

#[derive(Parser)]
#[command(name = "fisurf")]
#[command(about = "Color a molecular surface by per-atom fi values", long_about = None)]
struct Cli {
    /// Input PDB file (atoms and element columns)
    pdb: PathBuf,

    /// Surface mesh (Wavefront OBJ)
    surface: PathBuf,

    /// Property table JSON: { residue: { atom: fi } }
    #[arg(short, long)]
    properties: PathBuf,

    /// Radius table JSON: { element: radius }; built-in vdW radii otherwise
    #[arg(short, long)]
    radii: Option<PathBuf>,

    /// Output color layer JSON
    #[arg(short, long, default_value = "fi_cols.json")]
    output: PathBuf,

    /// Config JSON file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Proximity radius for candidate atoms
    #[arg(long)]
    max_distance: Option<f64>,

    /// Do not fall back to the nearest atom; vertices with no atom in range
    /// get the sentinel color
    #[arg(long, action = ArgAction::SetTrue)]
    no_fallback: bool,

    /// Keep raw fi values instead of rescaling them into [0, 1]
    #[arg(long, action = ArgAction::SetTrue)]
    raw: bool,

    /// Resolve surface vertices on all cores
    #[arg(long, action = ArgAction::SetTrue)]
    parallel: bool,

    /// Write JSON dumps of intermediate mappings into this directory
    #[arg(long, value_name = "DIR")]
    dump: Option<PathBuf>,

    /// Persist the effective settings to the config file
    #[arg(long, action = ArgAction::SetTrue)]
    write_config: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logger::init(logger::level_from_flags(cli.verbose, cli.quiet)) {
        eprintln!("fisurf: could not install logger: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), FiError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    apply_overrides(&mut config, cli);

    if cli.write_config {
        match &cli.config {
            Some(path) => config.save_to(path)?,
            None => {
                config.save()?;
            }
        }
    }

    let generic = pdb::load_specific_to_generic_file(&cli.pdb)?;
    let atoms = pdb::read_atoms_file(&cli.pdb)?;
    let properties = tables::load_property_table(&cli.properties)?;
    let radii = match &cli.radii {
        Some(path) => tables::load_radius_table(path)?,
        None => RadiusTable::builtin(),
    };
    let mut mesh = io::load_surface(&cli.surface)?;

    match color_surface(&atoms, &properties, &radii, &generic, &mut mesh, &config)? {
        ColorOutcome::Colored(report) => {
            tables::write_color_layer(&cli.output, &report.layer)?;
            log::info!(
                "{} atoms, {} spatial queries, {} vertices without data",
                report.atoms,
                report.queries,
                report.unmatched
            );
        }
        ColorOutcome::EmptyCloud => {
            log::warn!("{:?} has no ATOM records, nothing to color", cli.pdb);
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(d) = cli.max_distance {
        config.max_distance = d;
    }
    if cli.no_fallback {
        config.use_nearest_fallback = false;
    }
    if cli.raw {
        config.normalize = false;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if let Some(dir) = &cli.dump {
        config.dump_dir = Some(dir.clone());
    }
}
