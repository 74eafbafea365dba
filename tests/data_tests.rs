//! Tests for tech table loading.

use std::path::Path;

use ogcalc::cost::{build_cost, total_build_cost};
use ogcalc::data::{
    embedded_catalog, load_classic_catalog, read_classic_catalog, read_lifeform_catalog,
    DataError,
};
use ogcalc::lifeforms::build_cost_lf;
use ogcalc::models::{FormulaModel, Resources, TechId, TechKind};

const CLASSIC_HEADER: &str = "id,name,metal,crystal,deuterium,growth,lab_level\n";
const LIFEFORM_HEADER: &str = "id,name,metal,crystal,deuterium,energy,duration,\
metal_growth,crystal_growth,deuterium_growth,energy_growth,duration_growth\n";

#[test]
fn test_embedded_catalog_loads() {
    let catalog = embedded_catalog().expect("embedded table should be valid");

    assert_eq!(catalog.techs.len(), 62);
    assert_eq!(catalog.name(TechId::METAL_MINE), "Metal Mine");
    assert_eq!(catalog.name(TechId(9999)), "#9999");
    assert_eq!(catalog.research_requirements.get(&TechId::ASTROPHYSICS), Some(&3));
    assert_eq!(catalog.research_requirements.get(&TechId::METAL_MINE), None);
}

#[test]
fn test_embedded_catalog_covers_every_category() {
    let catalog = embedded_catalog().expect("embedded table should be valid");
    let kinds: Vec<TechKind> = catalog
        .sorted_ids()
        .into_iter()
        .map(|id| FormulaModel::Classic.kind_of(id))
        .collect();

    assert!(kinds.contains(&TechKind::Building));
    assert!(kinds.contains(&TechKind::Research));
    assert!(kinds.contains(&TechKind::Unit));
}

#[test]
fn test_embedded_catalog_every_research_has_lab_level() {
    let catalog = embedded_catalog().expect("embedded table should be valid");
    for id in catalog.sorted_ids() {
        let is_research = FormulaModel::Classic.kind_of(id) == TechKind::Research;
        assert_eq!(
            catalog.research_requirements.contains_key(&id),
            is_research,
            "tech {}",
            id
        );
    }
}

#[test]
fn test_embedded_catalog_feeds_formulas() {
    let catalog = embedded_catalog().expect("embedded table should be valid");
    assert_eq!(
        total_build_cost(TechId::METAL_MINE, 0, 2, &catalog.techs, 0),
        Resources::new(150.0, 37.0, 0.0)
    );
    assert_eq!(
        build_cost(TechId::ASTROPHYSICS, 2, &catalog.techs),
        Resources::new(7000.0, 14000.0, 7000.0)
    );
}

#[test]
fn test_sorted_ids() {
    let catalog = embedded_catalog().expect("embedded table should be valid");
    let ids = catalog.sorted_ids();
    assert_eq!(ids.first(), Some(&TechId::METAL_MINE));
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_find_by_name_or_id() {
    let catalog = embedded_catalog().expect("embedded table should be valid");
    assert_eq!(catalog.find("Crystal Mine"), Some(TechId::CRYSTAL_MINE));
    assert_eq!(catalog.find("  SOLAR satellite "), Some(TechId::SOLAR_SATELLITE));
    assert_eq!(catalog.find("113"), Some(TechId(113)));
    assert_eq!(catalog.find("7"), None);
    assert_eq!(catalog.find(""), None);
}

#[test]
fn test_read_classic_catalog_from_text() {
    let csv = format!(
        "{}1, Metal Mine, 60, 15, 0, 1.5,\n113,Energy Technology,0,800,400,2,1\n204,Light Fighter,3000,1000,0,1,\n",
        CLASSIC_HEADER
    );
    let catalog = read_classic_catalog(csv.as_bytes()).expect("valid table");

    assert_eq!(catalog.techs.len(), 3);
    assert_eq!(catalog.techs[&TechId(1)].cost, [60.0, 15.0, 0.0]);
    assert_eq!(catalog.techs[&TechId(1)].growth, 1.5);
    assert_eq!(catalog.research_requirements.len(), 1);
    assert_eq!(catalog.name(TechId(204)), "Light Fighter");
}

#[test]
fn test_duplicate_rows_are_rejected() {
    let csv = format!("{}1,Metal Mine,60,15,0,1.5,\n1,Metal Mine,60,15,0,1.5,\n", CLASSIC_HEADER);
    let result = read_classic_catalog(csv.as_bytes());
    assert!(matches!(result, Err(DataError::DuplicateTech { id: 1 })));
}

#[test]
fn test_flat_growth_only_allowed_for_units() {
    let building = format!("{}1,Metal Mine,60,15,0,1,\n", CLASSIC_HEADER);
    let result = read_classic_catalog(building.as_bytes());
    assert!(matches!(result, Err(DataError::InvalidGrowth { id: 1, .. })));

    let unit = format!("{}202,Small Cargo,2000,2000,0,1,\n", CLASSIC_HEADER);
    assert!(read_classic_catalog(unit.as_bytes()).is_ok());
}

#[test]
fn test_negative_cost_is_rejected() {
    let csv = format!("{}2,Crystal Mine,-48,24,0,1.6,\n", CLASSIC_HEADER);
    match read_classic_catalog(csv.as_bytes()) {
        Err(DataError::InvalidValue { id, field, value }) => {
            assert_eq!(id, 2);
            assert_eq!(field, "metal");
            assert_eq!(value, -48.0);
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_malformed_number_is_a_csv_error() {
    let csv = format!("{}2,Crystal Mine,lots,24,0,1.6,\n", CLASSIC_HEADER);
    let result = read_classic_catalog(csv.as_bytes());
    assert!(matches!(result, Err(DataError::Csv(_))));
}

#[test]
fn test_missing_file_reports_path() {
    let path = Path::new("data/does_not_exist.csv");
    match load_classic_catalog(path) {
        Err(err @ DataError::Io { .. }) => {
            assert!(err.to_string().contains("does_not_exist.csv"));
        }
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_load_classic_catalog_from_disk() {
    let path = Path::new("data/classic_techs.csv");
    if !path.exists() {
        return;
    }
    let catalog = load_classic_catalog(path).expect("Failed to load data");
    assert_eq!(catalog.techs.len(), embedded_catalog().map(|c| c.techs.len()).unwrap_or(0));
}

#[test]
fn test_read_lifeform_catalog() {
    let csv = format!(
        "{}11001,Residential Sector,7,2,0,0,40,1.2,1.2,1.2,1,1.21\n\
         11101,Intergalactic Envoys,5000,3200,1500,0,1000,1.3,1.3,1.3,1,1.2\n",
        LIFEFORM_HEADER
    );
    let catalog = read_lifeform_catalog(csv.as_bytes()).expect("valid table");

    assert_eq!(catalog.techs.len(), 2);
    assert_eq!(catalog.names[&TechId(11001)], "Residential Sector");
    let data = catalog.techs[&TechId(11001)];
    assert_eq!(data.duration, 40.0);
    assert_eq!(data.duration_growth, 1.21);
    assert_eq!(
        build_cost_lf(TechId(11001), 5, &catalog.techs, 0.0),
        Resources::new(72.0, 20.0, 0.0)
    );
}

#[test]
fn test_lifeform_growth_is_validated() {
    let csv = format!("{}11001,Residential Sector,7,2,0,0,40,0.9,1.2,1.2,1,1.21\n", LIFEFORM_HEADER);
    let result = read_lifeform_catalog(csv.as_bytes());
    assert!(matches!(result, Err(DataError::InvalidGrowth { id: 11001, .. })));
}
