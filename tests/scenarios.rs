use q_snake::game::{Action, GameConfig, GameState, Observation, Position, Snake};
use q_snake::rl::{QAgent, QLearningConfig, QTable, SnakeEnvironment, Transition};
use q_snake::GameError;

fn scripted(snake: Snake, food: Position, size: usize) -> SnakeEnvironment {
    let state = GameState::new(snake, food, size);
    SnakeEnvironment::from_state(GameConfig::new(size).with_seed(11), state).unwrap()
}

#[test]
fn reset_places_snake_at_center_and_food_elsewhere() {
    let mut env = SnakeEnvironment::new(GameConfig::new(10)).unwrap();
    let obs = env.reset();

    assert_eq!((obs.head_x, obs.head_y), (5, 5));
    assert_ne!((obs.food_x, obs.food_y), (5, 5));
    assert_eq!(env.snake().len(), 1);
}

#[test]
fn four_ups_reach_the_top_row_side() {
    // Food in a corner keeps it off the path.
    let mut env = scripted(Snake::new(Position::new(5, 5)), Position::new(0, 9), 10);

    let mut last = None;
    for _ in 0..4 {
        last = Some(env.step(Action::Up).unwrap());
    }

    let (obs, reward, done) = last.unwrap();
    assert_eq!((obs.head_x, obs.head_y), (5, 1));
    assert_eq!(reward, 0.0);
    assert!(!done);
}

#[test]
fn left_from_origin_hits_the_wall() {
    let mut env = scripted(Snake::new(Position::new(0, 0)), Position::new(3, 3), 5);

    let (obs, reward, done) = env.step(Action::Left).unwrap();

    assert_eq!(reward, -1.0);
    assert!(done);
    assert_eq!(obs.head(), Position::new(0, 0));
}

#[test]
fn done_flips_exactly_once() {
    let mut env = scripted(Snake::new(Position::new(1, 1)), Position::new(3, 3), 4);

    let (_, _, done) = env.step(Action::Up).unwrap();
    assert!(!done);

    let (_, reward, done) = env.step(Action::Up).unwrap();
    assert!(done);
    assert_eq!(reward, -1.0);

    assert_eq!(env.step(Action::Down), Err(GameError::EpisodeTerminated));
    assert!(env.is_done());

    env.reset();
    assert!(!env.is_done());
}

#[test]
fn eating_grows_the_snake_and_moves_the_food() {
    let mut env = scripted(Snake::new(Position::new(2, 2)), Position::new(3, 2), 6);

    let (obs, reward, done) = env.step(Action::Right).unwrap();

    assert_eq!(reward, 1.0);
    assert!(!done);
    assert_eq!(env.snake().len(), 2);
    assert_eq!(obs.head(), Position::new(3, 2));
    assert!(!env.snake().occupies(env.food()));
    assert_eq!(env.score(), 1);
}

#[test]
fn plain_moves_keep_length() {
    let body = vec![Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)];
    let mut env = scripted(Snake::from_segments(body).unwrap(), Position::new(0, 0), 6);

    let (_, reward, done) = env.step(Action::Right).unwrap();

    assert_eq!(reward, 0.0);
    assert!(!done);
    assert_eq!(env.snake().len(), 3);
}

#[test]
fn get_state_is_idempotent() {
    let env = SnakeEnvironment::new(GameConfig::new(8).with_seed(2)).unwrap();
    assert_eq!(env.get_state(), env.get_state());
}

#[test]
fn unknown_symbol_is_rejected() {
    let mut env = SnakeEnvironment::new(GameConfig::new(8).with_seed(2)).unwrap();
    let before = env.get_state();

    assert!(matches!(
        env.step_symbol("JUMP"),
        Err(GameError::InvalidAction(_))
    ));
    assert_eq!(env.get_state(), before);
    assert_eq!(env.state().steps, 0);
}

#[test]
fn greedy_agent_picks_the_strictly_best_action() {
    let state = Observation::new(Position::new(4, 4), Position::new(7, 4));
    let mut table = QTable::new();
    table.set(state, Action::Up, 0.2);
    table.set(state, Action::Right, 0.5);

    let config = QLearningConfig {
        epsilon: 0.0,
        seed: Some(8),
        ..Default::default()
    };
    let mut agent = QAgent::with_table(table, config);

    for _ in 0..100 {
        assert_eq!(agent.choose_action(&state), Action::Right);
    }
}

#[test]
fn one_update_moves_only_the_visited_entry() {
    let state = Observation::new(Position::new(1, 1), Position::new(3, 3));
    let next = Observation::new(Position::new(2, 1), Position::new(3, 3));

    let mut table = QTable::new();
    table.set(state, Action::Right, 0.5);
    table.set(state, Action::Up, -0.25);
    table.set(next, Action::Down, 2.0);
    let before = table.entries();

    let config = QLearningConfig {
        alpha: 0.1,
        gamma: 0.9,
        seed: Some(1),
        ..Default::default()
    };
    let mut agent = QAgent::with_table(table, config);

    agent.update(&Transition::new(state, Action::Right, 1.0, next, false));

    let target = 1.0 + 0.9 * 2.0;
    let expected = 0.5 + 0.1 * (target - 0.5);
    assert_eq!(agent.table().get(&state, Action::Right), expected);

    for entry in before {
        if entry.state == state && entry.action == Action::Right {
            continue;
        }
        assert_eq!(agent.table().get(&entry.state, entry.action), entry.value);
    }
    assert_eq!(agent.table().len(), 3);
}

#[test]
fn one_by_one_grid_is_rejected() {
    assert!(matches!(
        SnakeEnvironment::new(GameConfig::new(1)),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(SnakeEnvironment::new(GameConfig::new(2)).is_ok());
}
