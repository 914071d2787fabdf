use super::support::*;
use super::*;

#[test]
fn grazer_takes_the_cell_of_a_plant_it_bites() {
    let mut sim = empty_sim(test_config(1, 3), 1);
    let plant = add_plant(&mut sim, loc(0, 0), 100);
    let turtle = add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);
    set_food(&mut sim, turtle, 20);

    // The plant was written first, so the grazer overwrites it even though it survived
    // the bite.
    let report = sim.step();
    assert_eq!(report.metrics.plants_bitten, 1);
    assert_eq!(report.metrics.deaths_by(DeathCause::GrazedOut), 0);
    assert_eq!(report.metrics.evictions, 1);
    assert!(sim.agent(plant).is_none());

    let turtle = agent(&sim, turtle);
    assert_eq!(turtle.location(), Some(loc(0, 0)));
    assert_eq!(turtle.food_level(), Some(5));
}

#[test]
fn grazer_that_finishes_a_plant_takes_its_cell() {
    let mut cfg = test_config(1, 2);
    cfg.plant.growth_rate = 0;
    let mut sim = empty_sim(cfg, 2);
    let plant = add_plant(&mut sim, loc(0, 0), 3);
    let turtle = add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);
    set_food(&mut sim, turtle, 20);

    let report = sim.step();
    assert_eq!(report.metrics.deaths_by(DeathCause::GrazedOut), 1);
    assert_eq!(report.metrics.evictions, 0);
    assert!(sim.agent(plant).is_none());
    assert_eq!(report.census.count(Species::Plant), 0);

    let turtle = agent(&sim, turtle);
    assert_eq!(turtle.location(), Some(loc(0, 0)));
    assert_eq!(turtle.food_level(), Some(3));
}

#[test]
fn hunter_eats_adjacent_prey_and_takes_its_cell() {
    let mut sim = empty_sim(test_config(1, 2), 3);
    let shark = add_agent(&mut sim, Species::Shark, loc(0, 0), Sex::Male, 3);
    set_food(&mut sim, shark, 5);
    let turtle = add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);

    let report = sim.step();
    assert_eq!(report.metrics.deaths_by(DeathCause::Predation), 1);
    assert_eq!(report.metrics.visited, 2);
    assert!(sim.agent(turtle).is_none());
    assert_eq!(report.census.count(Species::Shark), 1);

    let shark = agent(&sim, shark);
    assert_eq!(shark.location(), Some(loc(0, 1)));
    assert_eq!(shark.food_level(), Some(11));
}

#[test]
fn a_meal_sets_the_food_level_to_its_value() {
    let mut sim = empty_sim(test_config(1, 2), 4);
    let shark = add_agent(&mut sim, Species::Shark, loc(0, 0), Sex::Male, 3);
    set_food(&mut sim, shark, 20);
    add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);

    sim.step();
    assert_eq!(agent(&sim, shark).food_level(), Some(11));
}

#[test]
fn prey_that_already_moved_cannot_be_caught() {
    let mut sim = empty_sim(test_config(1, 3), 5);
    let turtle = add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);
    add_agent(&mut sim, Species::Shark, loc(0, 0), Sex::Male, 3);

    let report = sim.step();
    assert_eq!(report.metrics.deaths_by(DeathCause::Predation), 0);
    assert!(agent(&sim, turtle).is_alive());
}

#[test]
fn hunters_ignore_species_off_their_menu() {
    let mut sim = empty_sim(test_config(1, 2), 6);
    add_agent(&mut sim, Species::Orca, loc(0, 0), Sex::Male, 5);
    add_agent(&mut sim, Species::Iguana, loc(0, 1), Sex::Male, 5);

    let report = sim.step();
    assert_eq!(report.metrics.deaths_by(DeathCause::Predation), 0);
    assert_eq!(report.census.count(Species::Orca), 1);
    assert_eq!(report.census.count(Species::Iguana), 1);
}

#[test]
fn first_hunter_to_claim_prey_wins() {
    let mut sim = empty_sim(test_config(1, 3), 7);
    let first = add_agent(&mut sim, Species::Shark, loc(0, 0), Sex::Male, 3);
    add_agent(&mut sim, Species::Turtle, loc(0, 1), Sex::Male, 1);
    let second = add_agent(&mut sim, Species::Shark, loc(0, 2), Sex::Male, 3);

    let report = sim.step();
    assert_eq!(report.metrics.deaths_by(DeathCause::Predation), 1);
    assert_eq!(agent(&sim, first).location(), Some(loc(0, 1)));
    // Boxed in between the wall and the winner.
    assert!(sim.agent(second).is_none());
    assert_eq!(report.metrics.deaths_by(DeathCause::Overcrowding), 1);
}

#[test]
fn hunter_pair_with_adjacent_prey_on_a_small_grid() {
    let mut sim = empty_sim(test_config(3, 3), 8);
    let female = add_agent(&mut sim, Species::Shark, loc(1, 1), Sex::Female, 5);
    add_agent(&mut sim, Species::Shark, loc(0, 0), Sex::Male, 5);
    let prey = add_agent(&mut sim, Species::Turtle, loc(2, 2), Sex::Male, 1);
    let free_before: HashSet<Location> = (0..3)
        .flat_map(|row| (0..3).map(move |col| loc(row, col)))
        .filter(|cell| sim.grid().occupant_at(*cell).is_none())
        .collect();

    let report = sim.step();
    let prey_gone = sim.agent(prey).map_or(true, |prey| !prey.is_alive());
    assert!(prey_gone || report.metrics.births == 1);
    assert!(report.metrics.births <= 1);

    // The female acts before her mate is written, so she hunts instead of breeding.
    assert!(prey_gone);
    assert_eq!(agent(&sim, female).location(), Some(loc(2, 2)));
    for cell in sim.snapshot().cells {
        if cell.species == Species::Shark && cell.location != loc(2, 2) {
            assert!(free_before.contains(&cell.location) || cell.location == loc(1, 1));
        }
    }
    assert_eq!(report.census.count(Species::Shark) as u64, 2 + report.metrics.births);
}
