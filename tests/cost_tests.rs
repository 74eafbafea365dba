//! Tests for classic cost formulas.

use ogcalc::cost::{build_cost, build_energy_cost, deconstruct_cost, total_build_cost};
use ogcalc::models::{ClassicTechData, ClassicTechTable, EnergyRequirement, Resources, TechId};

fn tech_table() -> ClassicTechTable {
    let mut table = ClassicTechTable::new();
    table.insert(TechId(1), ClassicTechData::new(60.0, 15.0, 0.0, 1.5));
    table.insert(TechId(2), ClassicTechData::new(48.0, 24.0, 0.0, 1.6));
    table.insert(TechId(33), ClassicTechData::new(0.0, 50000.0, 100000.0, 2.0));
    table.insert(TechId(36), ClassicTechData::new(200.0, 0.0, 50.0, 5.0));
    table.insert(TechId(41), ClassicTechData::new(20000.0, 40000.0, 20000.0, 2.0));
    table.insert(TechId(113), ClassicTechData::new(0.0, 800.0, 400.0, 2.0));
    table.insert(TechId(124), ClassicTechData::new(4000.0, 8000.0, 4000.0, 1.75));
    table.insert(TechId(199), ClassicTechData::new(0.0, 0.0, 0.0, 3.0));
    table.insert(TechId(204), ClassicTechData::new(3000.0, 1000.0, 0.0, 1.0));
    table
}

#[test]
fn test_build_cost_single_level() {
    let table = tech_table();
    assert_eq!(build_cost(TechId(1), 1, &table), Resources::new(60.0, 15.0, 0.0));
    assert_eq!(build_cost(TechId(1), 10, &table), Resources::new(2306.0, 576.0, 0.0));
    assert_eq!(build_cost(TechId(2), 5, &table), Resources::new(314.0, 157.0, 0.0));
}

#[test]
fn test_build_cost_invalid_input() {
    let table = tech_table();
    assert_eq!(build_cost(TechId(1), 0, &table), Resources::ZERO);
    assert_eq!(build_cost(TechId(1), -2, &table), Resources::ZERO);
    assert_eq!(build_cost(TechId(3), 5, &table), Resources::ZERO);
}

#[test]
fn test_astrophysics_rounds_to_hundreds() {
    let table = tech_table();
    assert_eq!(build_cost(TechId(124), 2, &table), Resources::new(7000.0, 14000.0, 7000.0));
    // 12250 is half way and rounds up
    assert_eq!(build_cost(TechId(124), 3, &table), Resources::new(12300.0, 24500.0, 12300.0));
    assert_eq!(build_cost(TechId(124), 5, &table), Resources::new(37500.0, 75000.0, 37500.0));
}

#[test]
fn test_total_cost_matches_sum_of_levels() {
    let table = tech_table();
    for tech in [TechId(1), TechId(2), TechId(113), TechId(124)] {
        let mut expected = Resources::ZERO;
        for level in 1..=12 {
            expected += build_cost(tech, level, &table);
        }
        assert_eq!(total_build_cost(tech, 0, 12, &table, 0), expected);
    }
    assert_eq!(
        total_build_cost(TechId(1), 0, 10, &table, 0),
        Resources::new(6796.0, 1694.0, 0.0)
    );
}

#[test]
fn test_total_cost_empty_range() {
    let table = tech_table();
    for tech in [TechId(1), TechId(113), TechId(124), TechId(999)] {
        assert_eq!(total_build_cost(tech, 5, 5, &table, 0), Resources::ZERO);
    }
}

#[test]
fn test_total_cost_for_units_ignores_current_count() {
    let table = tech_table();
    let expected = Resources::new(30000.0, 10000.0, 0.0);
    assert_eq!(total_build_cost(TechId(204), 0, 10, &table, 0), expected);
    assert_eq!(total_build_cost(TechId(204), 25, 10, &table, 0), expected);
}

#[test]
fn test_total_cost_downgrade_sums_each_level() {
    let table = tech_table();
    assert_eq!(
        total_build_cost(TechId(1), 10, 7, &table, 0),
        Resources::new(3245.0, 810.0, 0.0)
    );
    assert_eq!(
        total_build_cost(TechId(1), 10, 7, &table, 5),
        Resources::new(2595.0, 647.0, 0.0)
    );

    let mut expected = Resources::ZERO;
    for level in 7..10 {
        expected += deconstruct_cost(TechId(1), level, &table, 0);
    }
    assert_eq!(total_build_cost(TechId(1), 10, 7, &table, 0), expected);
}

#[test]
fn test_deconstruct_cost() {
    let table = tech_table();
    assert_eq!(deconstruct_cost(TechId(1), 9, &table, 0), Resources::new(1537.0, 384.0, 0.0));
    // level 0 uses growth^-1
    assert_eq!(deconstruct_cost(TechId(1), 0, &table, 0), Resources::new(40.0, 10.0, 0.0));
    assert_eq!(deconstruct_cost(TechId(1), -1, &table, 0), Resources::ZERO);
}

#[test]
fn test_deconstruct_forbidden() {
    let table = tech_table();
    assert_eq!(deconstruct_cost(TechId(33), 3, &table, 0), Resources::ZERO);
    assert_eq!(deconstruct_cost(TechId(41), 3, &table, 0), Resources::ZERO);
    assert_eq!(deconstruct_cost(TechId(113), 3, &table, 0), Resources::ZERO);
    assert_eq!(deconstruct_cost(TechId(204), 3, &table, 0), Resources::ZERO);
    assert_eq!(deconstruct_cost(TechId(5), 3, &table, 0), Resources::ZERO);
}

#[test]
fn test_build_energy_cost() {
    let table = tech_table();
    assert_eq!(build_energy_cost(TechId(33), 3, &table), EnergyRequirement::Energy(4000.0));
    assert_eq!(build_energy_cost(TechId(36), 4, &table), EnergyRequirement::Energy(781.0));
    assert_eq!(build_energy_cost(TechId(199), 1, &table), EnergyRequirement::Energy(300000.0));
    assert_eq!(build_energy_cost(TechId(1), 5, &table), EnergyRequirement::Energy(0.0));
}

#[test]
fn test_build_energy_cost_sentinels() {
    let table = tech_table();
    assert_eq!(build_energy_cost(TechId(33), 0, &table), EnergyRequirement::Energy(0.0));

    let unknown = build_energy_cost(TechId(98), 3, &table);
    assert_eq!(unknown, EnergyRequirement::UnknownTech(Resources::ZERO));
    assert_eq!(unknown.amount(), 0.0);
}
