use super::support::*;
use super::*;

fn small_world() -> WorldConfig {
    WorldConfig {
        depth: 24,
        width: 24,
        ..WorldConfig::default()
    }
}

#[test]
fn non_positive_dimensions_fall_back_to_defaults() {
    let sim = Simulation::with_dimensions(0, -3, 1).expect("simulation should initialize");
    assert_eq!(sim.grid().depth(), DEFAULT_DEPTH);
    assert_eq!(sim.grid().width(), DEFAULT_WIDTH);
    assert_eq!(sim.config().depth, DEFAULT_DEPTH);
}

#[test]
fn config_validation_rejects_out_of_range_start_hour() {
    let mut cfg = small_world();
    cfg.start_hour = 24;
    let err = Simulation::new(cfg, 1).expect_err("config should be rejected");
    assert!(matches!(err, SimError::InvalidConfig(_)));
    assert!(err.to_string().contains("start_hour"));
}

#[test]
fn same_seed_replays_the_same_history() {
    let mut first = Simulation::new(small_world(), 42).expect("simulation should initialize");
    let mut second = Simulation::new(small_world(), 42).expect("simulation should initialize");
    assert_eq!(first.snapshot(), second.snapshot());

    let first_reports = first.run_for(15);
    let second_reports = second.run_for(15);
    assert_eq!(first_reports, second_reports);
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn different_seeds_populate_differently() {
    let first = Simulation::new(small_world(), 1).expect("simulation should initialize");
    let second = Simulation::new(small_world(), 2).expect("simulation should initialize");
    assert_ne!(first.snapshot().cells, second.snapshot().cells);
}

#[test]
fn reset_restores_the_initial_generation() {
    let mut sim = Simulation::new(small_world(), 9).expect("simulation should initialize");
    let initial = sim.snapshot();

    sim.run_for(6);
    sim.reset();
    assert_eq!(sim.step_count(), 0);
    assert_eq!(sim.hour(), sim.config().start_hour);
    assert_eq!(sim.weather(), Weather::Sunny);
    assert_eq!(sim.phase(), SimulationPhase::Populated);
    assert_eq!(sim.snapshot(), initial);
}

#[test]
fn populate_leaves_cells_empty_when_nothing_spawns() {
    let sim = Simulation::new(test_config(5, 5), 3).expect("simulation should initialize");
    assert!(sim.grid().is_empty());
    assert!(sim.population().is_empty());
    assert!(!sim.is_viable());
}

#[test]
fn certain_plant_spawn_fills_every_cell_with_plants() {
    let mut cfg = test_config(4, 6);
    cfg.spawn.plant = 1.0;
    cfg.spawn.shark = 1.0;
    let sim = Simulation::new(cfg, 4).expect("simulation should initialize");

    let census = sim.census();
    assert_eq!(census.count(Species::Plant), 24);
    assert_eq!(census.total(), 24);
}

#[test]
fn idle_simulation_has_no_agents_until_reset() {
    let mut sim = Simulation::idle(small_world(), 5).expect("simulation should initialize");
    assert_eq!(sim.phase(), SimulationPhase::Idle);
    assert!(sim.grid().is_empty());

    sim.reset();
    assert_eq!(sim.phase(), SimulationPhase::Populated);
    assert!(!sim.grid().is_empty());
}

#[test]
fn step_moves_the_phase_to_running_or_terminated() {
    let mut sim = Simulation::new(small_world(), 6).expect("simulation should initialize");
    let report = sim.step();
    let expected = if report.viable {
        SimulationPhase::Running
    } else {
        SimulationPhase::Terminated
    };
    assert_eq!(sim.phase(), expected);
    assert_eq!(report.step, 1);
    assert_eq!(sim.metrics(), &report.metrics);
}

#[test]
fn run_for_stops_on_the_first_non_viable_step() {
    let mut sim = empty_sim(test_config(1, 3), 7);
    add_plant(&mut sim, loc(0, 0), 100);
    let shark = add_agent(&mut sim, Species::Shark, loc(0, 2), Sex::Male, 3);
    set_food(&mut sim, shark, 1);
    assert!(sim.is_viable());

    let reports = sim.run_for(10);
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].viable);
    assert_eq!(sim.step_count(), 1);
    assert_eq!(sim.phase(), SimulationPhase::Terminated);
}

#[test]
fn run_for_on_a_non_viable_world_runs_nothing() {
    let mut sim = empty_sim(test_config(2, 2), 8);
    add_plant(&mut sim, loc(0, 0), 100);

    let reports = sim.run_for(5);
    assert!(reports.is_empty());
    assert_eq!(sim.step_count(), 0);
    assert_eq!(sim.phase(), SimulationPhase::Terminated);
}

#[test]
fn run_for_with_a_huge_budget_on_a_non_viable_world_returns_nothing() {
    let mut sim = empty_sim(test_config(2, 2), 11);
    add_plant(&mut sim, loc(0, 0), 100);

    let reports = sim.run_for(u32::MAX);
    assert!(reports.is_empty());
    assert_eq!(sim.phase(), SimulationPhase::Terminated);
}

#[test]
fn run_for_runs_every_requested_step_while_viable() {
    let mut cfg = test_config(3, 3);
    cfg.start_hour = 22;
    let mut sim = empty_sim(cfg, 9);
    add_plant(&mut sim, loc(0, 0), 100);
    // Asleep all night and well fed.
    let shark = add_agent(&mut sim, Species::Shark, loc(2, 2), Sex::Male, 3);
    set_food(&mut sim, shark, 20);

    let reports = sim.run_for(4);
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|report| report.viable));
    assert_eq!(sim.step_count(), 4);
    assert_eq!(agent(&sim, shark).location(), Some(loc(2, 2)));
}

#[test]
fn snapshot_lists_live_cells_in_row_major_order() {
    let mut sim = empty_sim(test_config(2, 2), 10);
    add_agent(&mut sim, Species::Shark, loc(1, 1), Sex::Male, 3);
    add_plant(&mut sim, loc(0, 1), 10);
    let dead = add_agent(&mut sim, Species::Turtle, loc(1, 0), Sex::Male, 3);
    sim.population
        .get_mut(dead)
        .expect("turtle should exist")
        .set_dead();

    let snapshot = sim.snapshot();
    let locations: Vec<Location> = snapshot.cells.iter().map(|cell| cell.location).collect();
    assert_eq!(locations, vec![loc(0, 1), loc(1, 1)]);
    assert_eq!(snapshot.species_at(loc(1, 0)), None);
    assert_eq!(snapshot.depth, 2);
    assert_eq!(snapshot.weather_label, "Sunny");
    assert_eq!(snapshot.clock_label, "9 am");
}
