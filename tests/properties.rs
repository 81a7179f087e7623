use glam::Vec2;
use pirate_battles::Tuning;
use pirate_battles::sim::kinematics::update_player;
use pirate_battles::sim::{
    Cannonball, GameEvent, Island, Layout, Ship, Side, TickInput, World, WorldConfig, tick,
};
use proptest::prelude::*;

fn any_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(forward, back, left, right, fire)| TickInput {
            forward,
            back,
            left,
            right,
            fire,
            quit: false,
        },
    )
}

fn point() -> impl Strategy<Value = Vec2> {
    (40.0f32..1160.0, 40.0f32..760.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn health_stays_in_range(hits in prop::collection::vec(0u32..300, 0..40)) {
        let tuning = Tuning::default();
        let mut ship = Ship::new_player(1, Vec2::ZERO, &tuning);
        let mut last = ship.health().unwrap_or(0);
        for damage in hits {
            let health = ship.take_damage(damage).unwrap_or(0);
            prop_assert!(health <= 100);
            prop_assert!(health <= last);
            prop_assert_eq!(health, last.saturating_sub(damage));
            last = health;
        }
    }

    #[test]
    fn island_rejection_is_all_or_nothing(
        start in point(),
        heading in 0.0f32..360.0,
        speed in 0.0f32..4.0,
        island in point(),
        radius in 10.0f32..120.0,
        input in any_input(),
    ) {
        let tuning = Tuning::default();
        let islands = [Island { pos: island, radius }];
        let mut ship = Ship::new_player(1, start, &tuning);
        ship.heading = heading;
        ship.speed = speed;

        let moved = update_player(&mut ship, &input, &islands, &tuning);
        if moved {
            prop_assert!(!islands[0].contains(ship.pos));
        } else {
            prop_assert_eq!(ship.pos, start);
            prop_assert_eq!(ship.speed, 0.0);
        }
    }

    #[test]
    fn cannonballs_never_hit_their_own_side(
        offset in (-20.0f32..20.0, -20.0f32..20.0),
        player_side in any::<bool>(),
    ) {
        let fired_by = if player_side { Side::Player } else { Side::Enemy };
        let target = Vec2::new(600.0, 400.0);
        let mut layout = Layout::empty(if player_side { target } else { Vec2::new(100.0, 100.0) });
        if !player_side {
            layout.enemy_spawns.push(target);
        }
        let mut world = World::new(
            WorldConfig {
                tuning: Tuning { enemy_fire_chance: 0.0, ..Default::default() },
                layout,
            },
            3,
        )
        .expect("valid config");
        if let Some(enemy) = world.enemies.first_mut() {
            enemy.speed = 0.0;
        }
        let id = world.next_entity_id();
        // Heading "up" with zero speed keeps the ball on the hull
        world.cannonballs.push(Cannonball {
            id,
            pos: target + Vec2::new(offset.0, offset.1),
            heading: 90.0,
            speed: 0.0,
            radius: 5.0,
            fired_by,
        });

        let events = tick(&mut world, &TickInput::default());
        prop_assert!(events.is_empty());
        prop_assert_eq!(world.player_health(), 100);
        prop_assert_eq!(world.enemies.len(), if player_side { 0 } else { 1 });
        prop_assert_eq!(world.cannonballs.len(), 1);
    }

    #[test]
    fn score_matches_counters(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any_input(), 1..400),
    ) {
        let mut world = World::new(WorldConfig::default(), seed).expect("default config");
        let mut sunk = 0u64;
        let mut collected = 0u64;

        for input in &inputs {
            let before = world.score;
            let events = tick(&mut world, input);
            let tick_sunk = events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                .count() as u64;
            let tick_collected = events
                .iter()
                .filter(|e| matches!(e, GameEvent::TreasureCollected { .. }))
                .count() as u64;
            prop_assert_eq!(world.score - before, tick_sunk * 100 + tick_collected * 50);
            sunk += tick_sunk;
            collected += tick_collected;
        }

        prop_assert_eq!(u64::from(world.enemies_destroyed), sunk);
        prop_assert_eq!(u64::from(world.treasures_collected), collected);
        prop_assert_eq!(world.enemies.len() as u64 + sunk, 4);
        prop_assert_eq!(world.treasures.len() as u64 + collected, 7);
        prop_assert!(world.player_health() <= 100);
    }

    #[test]
    fn same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any_input(), 1..200),
    ) {
        let mut a = World::new(WorldConfig::default(), seed).expect("default config");
        let mut b = World::new(WorldConfig::default(), seed).expect("default config");
        for input in &inputs {
            let ea = tick(&mut a, input);
            let eb = tick(&mut b, input);
            prop_assert_eq!(ea, eb);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn entity_order_stays_sorted(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any_input(), 1..300),
    ) {
        let tuning = Tuning { enemy_fire_chance: 0.2, ..Default::default() };
        let config = WorldConfig { tuning, layout: Layout::default() };
        let mut world = World::new(config, seed).expect("valid config");
        for input in &inputs {
            tick(&mut world, input);
            prop_assert!(world.enemies.windows(2).all(|w| w[0].id < w[1].id));
            prop_assert!(world.cannonballs.windows(2).all(|w| w[0].id < w[1].id));
            prop_assert!(world.treasures.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
