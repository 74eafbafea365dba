//! ogcalc - Command Line Interface
//!
//! This is the main entry point for the formula calculator.
//! Run with `--help` to see all available options.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ogcalc::{
    acceleration::halving_cost,
    cost::{build_energy_cost, total_build_cost},
    data::{embedded_catalog, load_classic_catalog, load_lifeform_catalog, TechCatalog},
    display::{
        display_build_time, display_cost, display_production, display_simulation, format_amount,
        format_duration, level_label,
    },
    lifeforms::{build_energy_cost_lf, build_time_lf, total_build_cost_lf},
    models::{BoosterTier, BuildTimeModifiers, FormulaModel, PlayerClass, ProductionInput, TechId},
    production::{hourly_consumption, production_rate, production_rate_split, storage_capacity},
    simulation::play_greedy,
    time::build_time,
};

/// Command-line arguments for ogcalc.
#[derive(Parser, Debug)]
#[command(name = "ogcalc")]
#[command(author, version, about = "OGame production, cost and build time calculator", long_about = None)]
struct Cli {
    /// Universe speed multiplier
    #[arg(short, long, global = true, default_value = "1")]
    speed: f64,

    /// Classic tech table CSV (defaults to the built-in table)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hourly production of a mine, synthesizer, power plant or satellites
    Production(ProductionArgs),

    /// Hourly energy or deuterium consumption of a producer
    Consumption {
        /// Technology name or id
        #[arg(short, long)]
        tech: String,
        #[arg(short, long)]
        level: i32,
        /// Power setting in percent
        #[arg(long, default_value = "100")]
        power: f64,
    },

    /// Storage capacity of a storage building level
    Storage {
        #[arg(short, long)]
        level: i32,
    },

    /// Cost of upgrading, demolishing or building units
    Cost {
        /// Technology name or id
        #[arg(short, long)]
        tech: String,
        /// Current level (ignored for ships and defense)
        #[arg(long, default_value = "0")]
        from: i32,
        /// Target level, or number of units
        #[arg(long)]
        to: i32,
        /// Ion technology level (demolition discount)
        #[arg(long, default_value = "0")]
        ion: i32,
    },

    /// Duration of upgrading, demolishing, researching or building units
    Time {
        /// Technology name or id
        #[arg(short, long)]
        tech: String,
        #[arg(long, default_value = "0")]
        from: i32,
        #[arg(long)]
        to: i32,
        #[command(flatten)]
        facilities: FacilityArgs,
    },

    /// Dark Matter cost of halving a duration
    Halving {
        /// Technology name or id
        #[arg(short, long)]
        tech: String,
        /// Remaining time in seconds
        #[arg(long)]
        seconds: f64,
    },

    /// Cost and energy of a Lifeforms level range
    LfCost {
        /// Lifeforms tech table CSV
        #[arg(long)]
        table: PathBuf,
        /// Lifeforms technology id
        #[arg(short, long)]
        tech: u32,
        #[arg(long, default_value = "0")]
        from: i32,
        #[arg(long)]
        to: i32,
        #[arg(long, default_value = "0")]
        ion: i32,
        /// Research cost reduction in percent
        #[arg(long, default_value = "0")]
        research_reduction: f64,
        /// Building cost reduction as a fraction (Megalith)
        #[arg(long, default_value = "0")]
        building_reduction: f64,
    },

    /// Duration of a Lifeforms level range
    LfTime {
        /// Lifeforms tech table CSV
        #[arg(long)]
        table: PathBuf,
        /// Lifeforms technology id
        #[arg(short, long)]
        tech: u32,
        #[arg(long, default_value = "0")]
        from: i32,
        #[arg(long)]
        to: i32,
        #[arg(long, default_value = "0")]
        robotics: i32,
        #[arg(long, default_value = "0")]
        nanite: i32,
        /// Research time reduction in percent
        #[arg(long, default_value = "0")]
        research_reduction: f64,
        /// Building time reduction as a fraction (Megalith)
        #[arg(long, default_value = "0")]
        megalith: f64,
    },

    /// Play the factory economy game with the greedy strategy
    Simulate {
        /// Episode length in seconds
        #[arg(long, default_value = "3600")]
        max_time: f64,
    },

    /// List the technologies in the tech table
    List,
}

#[derive(Args, Debug)]
struct ProductionArgs {
    /// Technology name or id
    #[arg(short, long)]
    tech: String,

    /// Building level or number of satellites
    #[arg(short, long)]
    level: i32,

    #[arg(long, default_value = "0")]
    energy_tech: i32,

    #[arg(long, default_value = "0")]
    plasma_tech: i32,

    /// Maximum planet temperature
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    max_temp: f64,

    /// Planet position (1..15)
    #[arg(long, default_value = "0")]
    position: u32,

    #[arg(long)]
    geologist: bool,

    #[arg(long)]
    engineer: bool,

    /// All five officers hired
    #[arg(long)]
    all_officers: bool,

    /// Production factor in percent (below 100 when energy is short)
    #[arg(long, default_value = "100")]
    production_factor: f64,

    /// Power setting in percent
    #[arg(long, default_value = "100")]
    power: f64,

    /// Booster tier: 0 none, 1 bronze, 2 silver, 3 gold
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
    booster: u8,

    #[arg(long, value_enum, default_value = "general")]
    class: ClassArg,

    /// Member of a Trader alliance
    #[arg(long)]
    trader: bool,
}

#[derive(Args, Debug)]
struct FacilityArgs {
    #[arg(long, default_value = "0")]
    robotics: i32,
    #[arg(long, default_value = "0")]
    nanite: i32,
    #[arg(long, default_value = "0")]
    lab: i32,
    #[arg(long, default_value = "0")]
    shipyard: i32,
    /// Research time multiplier (e.g. 0.75 with the Technocrat)
    #[arg(long, default_value = "1")]
    technocrat: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ClassArg {
    Collector,
    General,
    Explorer,
}

impl From<ClassArg> for PlayerClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Collector => PlayerClass::Collector,
            ClassArg::General => PlayerClass::General,
            ClassArg::Explorer => PlayerClass::Explorer,
        }
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Option<PathBuf>) -> Result<TechCatalog, Box<dyn Error>> {
    let catalog = match path {
        Some(path) => {
            info!(path = %path.display(), "loading tech table");
            load_classic_catalog(path)?
        }
        None => embedded_catalog()?,
    };
    Ok(catalog)
}

fn resolve(catalog: &TechCatalog, query: &str) -> Result<TechId, Box<dyn Error>> {
    catalog
        .find(query)
        .ok_or_else(|| format!("unknown technology '{}', run `ogcalc list`", query).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(?cli, "parsed arguments");

    let catalog = load_catalog(&cli.data)?;

    match cli.command {
        Command::Production(args) => {
            let tech = resolve(&catalog, &args.tech)?;
            let booster = BoosterTier::from_level(args.booster).unwrap_or_default();
            let input = ProductionInput {
                energy_tech_level: args.energy_tech,
                plasma_tech_level: args.plasma_tech,
                max_temp: args.max_temp,
                position: args.position,
                speed_factor: cli.speed,
                geologist: args.geologist,
                engineer: args.engineer,
                production_factor: args.production_factor / 100.0,
                power_factor: args.power / 100.0,
                booster,
                all_officers: args.all_officers,
                player_class: args.class.into(),
                trader_alliance: args.trader,
                ..ProductionInput::new(tech, args.level)
            };
            let rows = production_rate_split(&input);
            let title = format!("{} level {}", catalog.name(tech), args.level);
            display_production(&title, &rows, production_rate(&input));
            let consumption =
                hourly_consumption(tech, args.level, cli.speed, input.power_factor);
            if consumption > 0.0 {
                println!("  {:<16}  {:>16}/h", "Consumption", format_amount(consumption));
            }
        }
        Command::Consumption { tech, level, power } => {
            let tech = resolve(&catalog, &tech)?;
            let consumption = hourly_consumption(tech, level, cli.speed, power / 100.0);
            println!(
                "{} level {}: {}/h",
                catalog.name(tech),
                level,
                format_amount(consumption)
            );
        }
        Command::Storage { level } => {
            println!(
                "Storage level {}: {}",
                level,
                format_amount(storage_capacity(level))
            );
        }
        Command::Cost {
            tech,
            from,
            to,
            ion,
        } => {
            let tech = resolve(&catalog, &tech)?;
            let cost = total_build_cost(tech, from, to, &catalog.techs, ion);
            let energy = if to > from {
                build_energy_cost(tech, to, &catalog.techs).amount()
            } else {
                0.0
            };
            let kind = FormulaModel::Classic.kind_of(tech);
            let title = format!("{} {} {} -> {}", catalog.name(tech), level_label(kind), from, to);
            display_cost(&title, &cost, (energy > 0.0).then_some(energy));
        }
        Command::Time {
            tech,
            from,
            to,
            facilities,
        } => {
            let tech = resolve(&catalog, &tech)?;
            let modifiers = BuildTimeModifiers {
                robotics_factory: facilities.robotics,
                nanite_factory: facilities.nanite,
                research_lab: facilities.lab,
                technocrat_factor: facilities.technocrat,
                shipyard: facilities.shipyard,
                universe_speed: cli.speed,
            };
            let seconds = build_time(
                tech,
                from,
                to,
                &catalog.techs,
                &modifiers,
                &catalog.research_requirements,
            );
            let kind = FormulaModel::Classic.kind_of(tech);
            let title = format!("{} {} {} -> {}", catalog.name(tech), level_label(kind), from, to);
            display_build_time(&title, seconds, halving_cost(tech, seconds.max(0.0)));
        }
        Command::Halving { tech, seconds } => {
            let tech = resolve(&catalog, &tech)?;
            println!(
                "Halving {} for {}: {} DM",
                catalog.name(tech),
                format_duration(seconds),
                format_amount(halving_cost(tech, seconds))
            );
        }
        Command::LfCost {
            table,
            tech,
            from,
            to,
            ion,
            research_reduction,
            building_reduction,
        } => {
            let lifeforms = load_lifeform_catalog(&table)?;
            let tech = TechId(tech);
            let cost = total_build_cost_lf(
                tech,
                from,
                to,
                &lifeforms.techs,
                ion,
                research_reduction,
                building_reduction,
            );
            let energy = if to > from {
                build_energy_cost_lf(tech, to, &lifeforms.techs, ion)
            } else {
                0.0
            };
            let name = lifeforms
                .names
                .get(&tech)
                .cloned()
                .unwrap_or_else(|| format!("#{}", tech.0));
            display_cost(
                &format!("{} level {} -> {}", name, from, to),
                &cost,
                (energy > 0.0).then_some(energy),
            );
        }
        Command::LfTime {
            table,
            tech,
            from,
            to,
            robotics,
            nanite,
            research_reduction,
            megalith,
        } => {
            let lifeforms = load_lifeform_catalog(&table)?;
            let tech = TechId(tech);
            let seconds = build_time_lf(
                tech,
                from,
                to,
                &lifeforms.techs,
                robotics,
                nanite,
                cli.speed,
                research_reduction,
                megalith,
            );
            let name = lifeforms
                .names
                .get(&tech)
                .cloned()
                .unwrap_or_else(|| format!("#{}", tech.0));
            display_build_time(
                &format!("{} level {} -> {}", name, from, to),
                seconds,
                halving_cost(TechId(tech.lifeform_local()), seconds),
            );
        }
        Command::Simulate { max_time } => {
            if !max_time.is_finite() || max_time < 0.0 {
                return Err(format!(
                    "episode length must be finite and non-negative, got {}",
                    max_time
                )
                .into());
            }
            info!(max_time, "simulating factory game");
            display_simulation(&play_greedy(max_time));
        }
        Command::List => {
            println!("{:>6}  {:<32} {:>8}", "Id", "Name", "Lab");
            println!("----------------------------------------------------------------");
            for id in catalog.sorted_ids() {
                let lab = catalog
                    .research_requirements
                    .get(&id)
                    .map(|level| level.to_string())
                    .unwrap_or_default();
                println!("{:>6}  {:<32} {:>8}", id.0, catalog.name(id), lab);
            }
        }
    }

    Ok(())
}
