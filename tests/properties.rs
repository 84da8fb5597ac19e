use proptest::prelude::*;

use q_snake::game::{Action, GameConfig, Position};
use q_snake::rl::{QAgent, QLearningConfig, SnakeEnvironment, Transition};

fn action_strategy() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

proptest! {
    #[test]
    fn reset_is_centered_for_any_grid(size in 2usize..40, seed in any::<u64>()) {
        let mut env = SnakeEnvironment::new(GameConfig::new(size).with_seed(seed)).unwrap();
        let obs = env.reset();
        let center = (size / 2) as i32;

        prop_assert_eq!(obs.head(), Position::new(center, center));
        prop_assert_ne!(obs.food(), obs.head());
        prop_assert_eq!(env.snake().len(), 1);
        prop_assert!(env.state().is_in_bounds(obs.food()));
    }

    #[test]
    fn random_episodes_keep_the_invariants(
        size in 2usize..12,
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let mut env = SnakeEnvironment::new(GameConfig::new(size).with_seed(seed)).unwrap();
        env.reset();

        for action in actions {
            let len_before = env.snake().len();
            let obs_before = env.get_state();
            let (obs, reward, done) = env.step(action).unwrap();

            if done {
                prop_assert_eq!(reward, -1.0);
                prop_assert_eq!(obs, obs_before);
                prop_assert_eq!(env.snake().len(), len_before);
                prop_assert!(env.step(action).is_err());
                break;
            }

            prop_assert!(env.state().is_in_bounds(obs.head()));
            if reward == 1.0 {
                prop_assert_eq!(env.snake().len(), len_before + 1);
            } else {
                prop_assert_eq!(reward, 0.0);
                prop_assert_eq!(env.snake().len(), len_before);
            }

            // Food stays off the body unless the grid is completely full.
            if env.snake().len() < size * size {
                prop_assert!(!env.snake().occupies(env.food()));
            }
            prop_assert_eq!(env.get_state(), env.get_state());
        }
    }

    #[test]
    fn update_applies_exactly_alpha_times_td_error(
        alpha in 0.01f64..=1.0,
        gamma in 0.0f64..=1.0,
        reward in -1.0f64..=1.0,
        done in any::<bool>(),
    ) {
        let state = q_snake::game::Observation::new(Position::new(1, 1), Position::new(4, 4));
        let next = q_snake::game::Observation::new(Position::new(1, 0), Position::new(4, 4));
        let config = QLearningConfig { alpha, gamma, seed: Some(0), ..Default::default() };
        let mut agent = QAgent::new(config);

        let td_error = agent.update(&Transition::new(state, Action::Up, reward, next, done));

        // Empty table: previous value and bootstrap are both 0.0.
        prop_assert_eq!(td_error, reward);
        prop_assert_eq!(agent.table().get(&state, Action::Up), 0.0 + alpha * reward);
        prop_assert_eq!(agent.table().len(), 1);
    }
}
