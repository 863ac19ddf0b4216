//! Property tests for the simulation laws

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use flapper::Tuning;
use flapper::sim::{
    Aabb, Avatar, GamePhase, GameState, ObstacleStream, activate, avatar_out_of_bounds, collides,
    scoring, tick,
};

fn any_box() -> impl Strategy<Value = Aabb> {
    (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..600.0, 1.0f32..600.0)
        .prop_map(|(x, y, w, h)| Aabb::new(Vec2::new(x, y), Vec2::new(w, h)))
}

proptest! {
    #[test]
    fn gravity_adds_exactly(vel in -1000.0f32..1000.0, gravity in 0.0f32..5.0) {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.vel_y = vel;
        avatar.apply_gravity(gravity);
        prop_assert_eq!(avatar.vel_y, vel + gravity);
    }

    #[test]
    fn jump_overwrites(vel in -1000.0f32..1000.0, jump in -20.0f32..0.0) {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.vel_y = vel;
        avatar.apply_jump(jump);
        prop_assert_eq!(avatar.vel_y, jump);
    }

    #[test]
    fn integrate_never_moves_x(vel in -50.0f32..50.0, steps in 1usize..100) {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.vel_y = vel;
        for _ in 0..steps {
            avatar.integrate();
        }
        prop_assert_eq!(avatar.pos.x, 50.0);
        prop_assert_eq!(avatar.size, Vec2::new(34.0, 24.0));
    }

    #[test]
    fn collision_is_symmetric(a in any_box(), b in any_box()) {
        prop_assert_eq!(collides(&a, &b), collides(&b, &a));
    }

    #[test]
    fn touching_edges_never_collide(a in any_box(), w in 1.0f32..300.0, h in 1.0f32..300.0, dy in -200.0f32..200.0) {
        let right_neighbour = Aabb::new(Vec2::new(a.right(), a.top() + dy), Vec2::new(w, h));
        let below = Aabb::new(Vec2::new(a.left() + dy, a.bottom()), Vec2::new(w, h));
        prop_assert!(!collides(&a, &right_neighbour));
        prop_assert!(!collides(&a, &below));
    }

    #[test]
    fn top_edge_at_or_above_zero_is_out(y in -100.0f32..=0.0, vel in 0.0f32..20.0) {
        let mut avatar = Avatar::new(&Tuning::default());
        avatar.pos.y = y;
        avatar.vel_y = vel;
        prop_assert!(avatar_out_of_bounds(&avatar, 640.0));
    }

    #[test]
    fn pair_scored_at_most_once(offset in -349i32..=-100, frames in 1usize..400) {
        let tuning = Tuning::default();
        let avatar = Avatar::new(&tuning);
        let mut stream = ObstacleStream::new();
        stream.push_pair(offset, &tuning);

        let mut points = 0;
        for _ in 0..frames {
            for pair in stream.pairs_mut() {
                pair.x += tuning.scroll_speed;
                if scoring::evaluate(&avatar, pair) {
                    points += 1;
                }
            }
        }
        prop_assert!(points <= 1);
        let cleared = 360.0 + tuning.scroll_speed * frames as f32 + 64.0 < 50.0;
        prop_assert_eq!(points == 1, cleared);
    }

    #[test]
    fn one_spawn_per_interval(seed in any::<u64>(), interval in 1u64..200, frames in 1u64..2000) {
        let tuning = Tuning { spawn_interval: interval, ..Tuning::default() };
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut stream = ObstacleStream::new();

        let mut spawns = 0u64;
        for frame in 1..=frames {
            if stream.tick(frame, &mut rng, &tuning) {
                spawns += 1;
            }
        }
        prop_assert_eq!(spawns, frames / interval);
        prop_assert_eq!(stream.len() as u64, spawns);
    }

    #[test]
    fn prune_leaves_survivors_untouched(xs in proptest::collection::vec(-200.0f32..400.0, 1..20)) {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new();
        for _ in &xs {
            stream.push_pair(-200, &tuning);
        }
        for (pair, x) in stream.pairs_mut().iter_mut().zip(&xs) {
            pair.x = *x;
        }
        let expected: Vec<_> = stream
            .pairs()
            .iter()
            .filter(|p| p.x + 64.0 >= 0.0)
            .cloned()
            .collect();

        let removed = stream.prune();
        prop_assert_eq!(removed, xs.len() - expected.len());
        prop_assert_eq!(stream.pairs(), expected.as_slice());
        prop_assert_eq!(stream.prune(), 0);
    }

    #[test]
    fn restart_always_resets(seed in any::<u64>(), frames in 0u32..600, flap_every in 5u32..40) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut events = Vec::new();
        activate(&mut state, &mut events);
        for frame in 0..frames {
            if frame % flap_every == 0 {
                activate(&mut state, &mut events);
            }
            tick(&mut state, &mut events);
        }

        // Force the end state from wherever the run got to
        state.avatar.pos.y = 1000.0;
        tick(&mut state, &mut events);
        if state.phase == GamePhase::Running {
            state.phase = GamePhase::Ended;
        }

        activate(&mut state, &mut events);
        prop_assert_eq!(state.phase, GamePhase::Running);
        prop_assert_eq!(state.score, 0);
        prop_assert!(state.obstacles.is_empty());
        prop_assert_eq!(&state.avatar, &Avatar::new(&state.tuning));
    }
}
