//! Tests for the factory-economy simulation.

use ogcalc::models::{Action, FactoryKind};
use ogcalc::simulation::{greedy_action, play_greedy, FactoryEpisode, FactoryGame};

fn broke_game() -> FactoryGame {
    FactoryGame {
        steel: 0.0,
        crystals: 0.0,
        ..FactoryGame::new()
    }
}

#[test]
fn test_starting_game() {
    let game = FactoryGame::new();
    assert_eq!(game.state(), [1000.0, 1000.0, 1.0, 1.0, 1.0, 0.0]);
    assert_eq!(game.net_worth(), 2675.0);
    assert_eq!(game.electricity_production(), 20.0);
    assert_eq!(game.electricity_consumption(), 25.0);
    assert_eq!(game.cost(FactoryKind::Steel), (200.0, 100.0));
    assert_eq!(game.cost(FactoryKind::Crystal), (300.0, 150.0));
    assert_eq!(game.cost(FactoryKind::Electricity), (400.0, 200.0));
}

#[test]
fn test_purchase_needs_power() {
    let mut game = FactoryGame::new();
    assert!(!game.can_buy(FactoryKind::Steel));
    assert!(!game.buy(FactoryKind::Steel));
    assert_eq!(game.steel, 1000.0);

    assert!(game.buy(FactoryKind::Electricity));
    assert_eq!(game.electricity_factories, 2);
    assert_eq!((game.steel, game.crystals), (600.0, 800.0));
    assert!(game.can_buy(FactoryKind::Steel));
}

#[test]
fn test_purchase_needs_resources() {
    let mut game = broke_game();
    assert!(!game.can_buy(FactoryKind::Electricity));
    assert!(!game.buy(FactoryKind::Electricity));
    assert_eq!(game.electricity_factories, 1);
}

#[test]
fn test_simulate_time_accumulates_production() {
    let mut game = FactoryGame::new();
    game.simulate_time(10.0);
    assert_eq!(game.steel, 1050.0);
    assert_eq!(game.crystals, 1030.0);
    assert_eq!(game.time_elapsed, 10.0);
}

#[test]
fn test_time_to_afford() {
    let game = broke_game();
    // 400 steel at 5/s against 200 crystals at 3/s
    assert_eq!(game.time_to_afford(FactoryKind::Electricity), 80.0);
    assert_eq!(FactoryGame::new().time_to_afford(FactoryKind::Steel), 0.0);

    let idle = FactoryGame {
        crystal_factories: 0,
        ..broke_game()
    };
    assert_eq!(idle.time_to_afford(FactoryKind::Steel), f64::INFINITY);
}

#[test]
fn test_net_worth_counts_factory_prices() {
    let mut game = FactoryGame::new();
    assert!(game.buy(FactoryKind::Electricity));
    // 400 + 200 moved from stock into the second power plant
    assert_eq!(game.net_worth(), 2675.0);
}

#[test]
fn test_reset() {
    let mut game = FactoryGame::new();
    game.simulate_time(100.0);
    game.buy(FactoryKind::Electricity);
    game.reset();
    assert_eq!(game, FactoryGame::new());
}

#[test]
fn test_episode_steps() {
    let mut episode = FactoryEpisode::new(300.0);

    let outcome = episode.step(Action::Build(FactoryKind::Steel));
    assert_eq!(outcome.reward, 2675.0);
    assert!(!outcome.done);
    assert_eq!(outcome.bought, Some(false));

    let outcome = episode.step(Action::Build(FactoryKind::Electricity));
    assert_eq!(outcome.reward, 0.0);
    assert_eq!(outcome.bought, Some(true));
    assert_eq!(episode.game().time_to_afford(FactoryKind::Electricity), 40.0);

    let outcome = episode.step(Action::Build(FactoryKind::Electricity));
    assert_eq!(outcome.reward, 320.0);
    assert_eq!(outcome.bought, Some(true));
    assert_eq!(outcome.state, [0.0, 520.0, 1.0, 1.0, 3.0, 40.0]);

    let outcome = episode.step(Action::Wait);
    assert_eq!(outcome.reward, 2080.0);
    assert!(outcome.done);
    assert_eq!(outcome.bought, None);
    assert_eq!(episode.game().time_elapsed, 300.0);
    assert_eq!(episode.game().net_worth(), 5075.0);
    assert_eq!(episode.remaining_time(), 0.0);
}

#[test]
fn test_build_waits_at_most_the_remaining_time() {
    let mut episode = FactoryEpisode::new(30.0);
    episode.step(Action::Build(FactoryKind::Electricity));

    // the third power plant needs 40s of production
    let outcome = episode.step(Action::Build(FactoryKind::Electricity));
    assert_eq!(outcome.bought, Some(false));
    assert!(outcome.done);
    assert_eq!(episode.game().time_elapsed, 30.0);
}

#[test]
fn test_episode_reset_restarts_rewards() {
    let mut episode = FactoryEpisode::new(300.0);
    episode.step(Action::Wait);

    assert_eq!(episode.reset(), [1000.0, 1000.0, 1.0, 1.0, 1.0, 0.0]);
    let outcome = episode.step(Action::Build(FactoryKind::Steel));
    assert_eq!(outcome.reward, 2675.0);
}

#[test]
fn test_greedy_action() {
    // only power plants have electricity to spare at the start
    assert_eq!(
        greedy_action(&FactoryGame::new(), 300.0),
        Action::Build(FactoryKind::Electricity)
    );
    assert_eq!(greedy_action(&broke_game(), 50.0), Action::Wait);
    assert_eq!(
        greedy_action(&broke_game(), 80.0),
        Action::Build(FactoryKind::Electricity)
    );
}

#[test]
fn test_play_greedy_short_episode() {
    let summary = play_greedy(300.0);
    assert_eq!(summary.steps, 8);
    assert_eq!(summary.purchases, 7);
    assert_eq!(summary.net_worth, 8345.0);
    assert_eq!(summary.total_reward, summary.net_worth);
    assert_eq!(
        (
            summary.steel_factories,
            summary.crystal_factories,
            summary.electricity_factories
        ),
        (3, 3, 4)
    );
    assert_eq!(summary.time_elapsed, 300.0);
}

#[test]
fn test_play_greedy_one_hour() {
    let summary = play_greedy(3600.0);
    assert_eq!(summary.steps, 19);
    assert_eq!(summary.purchases, 18);
    assert!((summary.net_worth - 150001.666_666_666_66).abs() < 1e-6);
    assert_eq!(
        (
            summary.steel_factories,
            summary.crystal_factories,
            summary.electricity_factories
        ),
        (7, 6, 8)
    );
}

#[test]
fn test_zero_length_episode() {
    let summary = play_greedy(0.0);
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.time_elapsed, 0.0);
    assert_eq!(summary.net_worth, 2675.0);
}
