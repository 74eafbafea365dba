//! Tech table loading for ogcalc.
//!
//! Tech tables are CSV files with one row per technology. A classic table
//! covering the base game's buildings, researches, ships and defense is
//! embedded in the crate; Lifeforms tables are supplied by the caller.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::models::{
    ClassicTechData, ClassicTechRow, ClassicTechTable, FormulaModel, LifeformTechRow,
    LifeformTechTable, ResearchRequirements, TechId, TechKind,
};

const EMBEDDED_CLASSIC: &str = include_str!("../data/classic_techs.csv");

/// Errors raised while loading a tech table.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("tech {id} is listed more than once")]
    DuplicateTech { id: u32 },

    #[error("tech {id} has an invalid {field}: {value}")]
    InvalidValue {
        id: u32,
        field: &'static str,
        value: f64,
    },

    /// Buildings and researches must grow geometrically.
    #[error("tech {id} has growth {growth}, expected a value above 1")]
    InvalidGrowth { id: u32, growth: f64 },
}

/// A classic tech table together with names and Research Lab prerequisites.
#[derive(Debug, Clone, Default)]
pub struct TechCatalog {
    pub techs: ClassicTechTable,
    pub research_requirements: ResearchRequirements,
    pub names: HashMap<TechId, String>,
}

impl TechCatalog {
    /// Display name of a technology, or its number if unnamed.
    pub fn name(&self, tech: TechId) -> String {
        self.names
            .get(&tech)
            .cloned()
            .unwrap_or_else(|| format!("#{}", tech.0))
    }

    /// Resolves a numeric id or a case-insensitive name.
    ///
    /// # Example
    ///
    /// ```
    /// use ogcalc::data::embedded_catalog;
    /// use ogcalc::models::TechId;
    ///
    /// let catalog = embedded_catalog().unwrap();
    /// assert_eq!(catalog.find("metal mine"), Some(TechId(1)));
    /// assert_eq!(catalog.find("124"), Some(TechId(124)));
    /// assert_eq!(catalog.find("warp core"), None);
    /// ```
    pub fn find(&self, query: &str) -> Option<TechId> {
        let query = query.trim();
        if let Ok(id) = query.parse::<u32>() {
            let tech = TechId(id);
            return self.techs.contains_key(&tech).then_some(tech);
        }
        self.names
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(query))
            .map(|(tech, _)| *tech)
    }

    /// Technologies sorted by identifier.
    pub fn sorted_ids(&self) -> Vec<TechId> {
        let mut ids: Vec<TechId> = self.techs.keys().copied().collect();
        ids.sort();
        ids
    }
}

/// A Lifeforms tech table together with names.
#[derive(Debug, Clone, Default)]
pub struct LifeformCatalog {
    pub techs: LifeformTechTable,
    pub names: HashMap<TechId, String>,
}

fn check_finite(id: u32, field: &'static str, value: f64) -> Result<(), DataError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DataError::InvalidValue { id, field, value })
    }
}

fn check_growth(id: u32, kind: TechKind, growth: f64) -> Result<(), DataError> {
    check_finite(id, "growth", growth)?;
    if kind != TechKind::Unit && growth <= 1.0 {
        return Err(DataError::InvalidGrowth { id, growth });
    }
    Ok(())
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a classic tech table from CSV.
///
/// # CSV Format
///
/// Expected columns: `id, name, metal, crystal, deuterium, growth, lab_level`
///
/// `lab_level` is left empty for everything but researches.
pub fn read_classic_catalog<R: Read>(reader: R) -> Result<TechCatalog, DataError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog = TechCatalog::default();
    for result in rdr.deserialize() {
        let row: ClassicTechRow = result?;
        let tech = TechId(row.id);
        if catalog.techs.contains_key(&tech) {
            warn!(id = row.id, "duplicate classic tech row");
            return Err(DataError::DuplicateTech { id: row.id });
        }
        check_finite(row.id, "metal", row.metal)?;
        check_finite(row.id, "crystal", row.crystal)?;
        check_finite(row.id, "deuterium", row.deuterium)?;
        check_growth(row.id, FormulaModel::Classic.kind_of(tech), row.growth)?;

        catalog.techs.insert(
            tech,
            ClassicTechData::new(row.metal, row.crystal, row.deuterium, row.growth),
        );
        if let Some(lab_level) = row.lab_level {
            catalog.research_requirements.insert(tech, lab_level);
        }
        catalog.names.insert(tech, row.name);
    }
    debug!(techs = catalog.techs.len(), "loaded classic tech table");
    Ok(catalog)
}

/// Loads a classic tech table from a CSV file.
pub fn load_classic_catalog(path: &Path) -> Result<TechCatalog, DataError> {
    read_classic_catalog(open(path)?)
}

/// The classic tech table shipped with the crate.
pub fn embedded_catalog() -> Result<TechCatalog, DataError> {
    read_classic_catalog(EMBEDDED_CLASSIC.as_bytes())
}

/// Reads a Lifeforms tech table from CSV.
///
/// # CSV Format
///
/// Expected columns: `id, name, metal, crystal, deuterium, energy, duration,
/// metal_growth, crystal_growth, deuterium_growth, energy_growth,
/// duration_growth`
pub fn read_lifeform_catalog<R: Read>(reader: R) -> Result<LifeformCatalog, DataError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut catalog = LifeformCatalog::default();
    for result in rdr.deserialize() {
        let row: LifeformTechRow = result?;
        let tech = TechId(row.id);
        if catalog.techs.contains_key(&tech) {
            warn!(id = row.id, "duplicate lifeforms tech row");
            return Err(DataError::DuplicateTech { id: row.id });
        }
        check_finite(row.id, "metal", row.metal)?;
        check_finite(row.id, "crystal", row.crystal)?;
        check_finite(row.id, "deuterium", row.deuterium)?;
        check_finite(row.id, "energy", row.energy)?;
        check_finite(row.id, "duration", row.duration)?;
        let kind = FormulaModel::Lifeforms.kind_of(tech);
        for growth in [row.metal_growth, row.crystal_growth, row.deuterium_growth] {
            check_growth(row.id, kind, growth)?;
        }
        check_finite(row.id, "energy_growth", row.energy_growth)?;
        check_finite(row.id, "duration_growth", row.duration_growth)?;

        catalog.techs.insert(tech, row.to_data());
        catalog.names.insert(tech, row.name);
    }
    debug!(techs = catalog.techs.len(), "loaded lifeforms tech table");
    Ok(catalog)
}

/// Loads a Lifeforms tech table from a CSV file.
pub fn load_lifeform_catalog(path: &Path) -> Result<LifeformCatalog, DataError> {
    read_lifeform_catalog(open(path)?)
}
