//! Integration tests for evosim

use evosim::config::{FounderConfig, HabitatConfig};
use evosim::shell::Shell;
use evosim::{Config, Ecosystem, Food, Organism, SurvivalPolicy, Traits};
use std::io::Cursor;

/// Stop growing worlds before they get too large to simulate quickly
const POPULATION_CAP: usize = 5_000;

fn founder(genome: &str, temp: i32, water: i32, diet: &[Food], birth_rate: i32) -> FounderConfig {
    FounderConfig {
        genome: genome.to_string(),
        temp_tolerance: temp,
        water_need: water,
        diet: diet.to_vec(),
        birth_rate: Some(birth_rate),
        life_span: None,
        food_needed: None,
    }
}

#[test]
fn test_full_simulation_cycle() {
    let mut ecosystem = Ecosystem::new_with_seed(Config::default(), 12345);
    let limits = ecosystem.config.limits;

    while ecosystem.generation < 50 && ecosystem.population() < POPULATION_CAP {
        ecosystem.step();

        // Verify basic invariants
        for habitat in &ecosystem.habitats {
            assert!(habitat.new_gen.is_empty());
            for org in habitat.wildlife() {
                assert!(org.is_alive());
                assert!(org.traits.temp_tolerance >= limits.min_temp);
                assert!(org.traits.temp_tolerance <= limits.max_temp);
                assert!(org.traits.water_need >= limits.min_water);
                assert!(org.traits.water_need <= limits.max_water);
            }
        }
    }
    assert!(ecosystem.generation > 0);
}

#[test]
fn test_all_founders_short_run() {
    let mut ecosystem = Ecosystem::new_with_seed(Config::with_all_founders(), 12345);
    ecosystem.run(8);

    assert_eq!(ecosystem.generation, 8);
    assert_eq!(ecosystem.stats.population, ecosystem.population());
}

#[test]
fn test_phases_match_step() {
    let config = Config::with_all_founders();

    let mut stepped = Ecosystem::new_with_seed(config.clone(), 555);
    let mut manual = Ecosystem::new_with_seed(config, 555);

    for _ in 0..5 {
        stepped.step();

        manual.breed_all();
        manual.migrate();
        manual.age_all();
        manual.remove_all_dead();
    }

    for (a, b) in stepped.habitats.iter().zip(&manual.habitats) {
        assert_eq!(a.wildlife, b.wildlife);
    }
}

#[test]
fn test_every_newborn_is_accounted_for() {
    let mut ecosystem = Ecosystem::new_with_seed(Config::with_all_founders(), 2468);

    while ecosystem.generation < 20 && ecosystem.population() < POPULATION_CAP {
        let before = ecosystem.population();
        let stats = ecosystem.step().clone();

        assert_eq!(stats.births, stats.settled + stats.migrated + stats.dropped);
        assert_eq!(
            ecosystem.population(),
            before + stats.settled + stats.migrated - stats.deaths
        );
    }
}

#[test]
fn test_dropped_total_ignores_stats_interval() {
    let mut config = Config::default();
    config.logging.stats_interval = 5;
    let mut ecosystem = Ecosystem::new_with_seed(config, 4242);

    let mut per_step = 0;
    while ecosystem.generation < 20 && ecosystem.population() < POPULATION_CAP {
        per_step += ecosystem.step().dropped;
    }
    assert_eq!(ecosystem.stats.total_dropped, per_step);
}

#[test]
fn test_unfit_newborn_disappears() {
    let mut config = Config::default();
    config.simulation.survival_policy = SurvivalPolicy::Strict;
    let mut ecosystem = Ecosystem::new_with_seed(config, 1);

    // Grass eater at temperature 3: the forest is the only habitat that warm
    // and it has no grass.
    let diet = [Food::Grass].into_iter().collect();
    let misfit = Organism::new("xx", Traits::new(3, 1, diet, 1, 1, 4));
    ecosystem.habitats[0].new_gen.push(misfit.clone());

    let report = ecosystem.migrate();
    assert_eq!(report.dropped, 1);
    assert!(ecosystem
        .habitats
        .iter()
        .all(|h| !h.wildlife.contains(&misfit)));
}

#[test]
fn test_two_founders_one_generation() {
    let mut config = Config::default();
    config.habitats = vec![HabitatConfig {
        name: "Meadow".to_string(),
        temperature: 4,
        water: 2,
        foods: vec![Food::Grass],
        founders: vec![
            founder("ba", 4, 2, &[Food::Grass], 2),
            founder("ab", 4, 2, &[Food::Grass], 2),
        ],
    }];

    for seed in 0..10 {
        let mut ecosystem = Ecosystem::new_with_seed(config.clone(), seed);
        ecosystem.step();

        let meadow = &ecosystem.habitats[0];
        let parents = meadow.wildlife.iter().filter(|o| o.generation == 0).count();
        let children = meadow.wildlife.iter().filter(|o| o.generation == 1).count();
        assert_eq!(parents, 2);
        assert!(children <= 2);
    }
}

#[test]
fn test_lifespan_limits_lineage() {
    // Founders that cannot breed successfully die out within their life span
    let mut config = Config::default();
    config.habitats = vec![HabitatConfig {
        name: "Island".to_string(),
        temperature: 3,
        water: 1,
        foods: vec![Food::Fruit],
        founders: vec![founder("ab", 3, 1, &[Food::Fruit], 1)],
    }];

    let mut ecosystem = Ecosystem::new_with_seed(config, 9);
    ecosystem.run(3);
    assert_eq!(ecosystem.population(), 1);
    ecosystem.step();
    assert!(ecosystem.is_extinct());
}

#[test]
fn test_stats_tracking() {
    let mut config = Config::default();
    config.logging.stats_interval = 2;

    let mut ecosystem = Ecosystem::new_with_seed(config, 33333);
    let mut seen = Vec::new();
    ecosystem.run_with_callback(10, |eco| seen.push(eco.stats.generation));

    assert_eq!(seen, (1..=10).collect::<Vec<u64>>());
    let series = ecosystem.stats_history.population_series();
    assert_eq!(series.len(), 5);
    assert_eq!(series.last().unwrap().0, 10);
    assert_eq!(ecosystem.stats.population, ecosystem.population());
}

#[test]
fn test_config_file_drives_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.yaml");

    let mut config = Config::with_all_founders();
    config.simulation.seed = Some(31);
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    let mut from_file = Ecosystem::new(loaded);
    let mut direct = Ecosystem::new(config);
    from_file.run(8);
    direct.run(8);

    assert_eq!(from_file.seed(), 31);
    assert_eq!(from_file.wildlife_totals(), direct.wildlife_totals());
}

#[test]
fn test_shell_session() {
    let mut ecosystem = Ecosystem::new_with_seed(Config::default(), 7);
    let mut output = Vec::new();

    Shell::new(Cursor::new("2\n1\n0\n3\n0\n0\n"), &mut output)
        .run(&mut ecosystem)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(ecosystem.generation, 5);
    assert_eq!(text.matches("How many generations").count(), 3);
    assert!(text.contains("Desert:  "));
}
