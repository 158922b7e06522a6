use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use ascifight::board::TeamId;
use ascifight::config::GameConfig;
use ascifight::game::Game;
use ascifight::movegen::{random_batch, random_orders};
use ascifight::setup::ring_layout;

fn bench_random_orders(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = SmallRng::seed_from_u64(42);
    let board = ring_layout(&config, &mut rng).unwrap();
    c.bench_function("random_orders_one_team", |b| {
        b.iter(|| random_orders(black_box(&board), TeamId(0), &mut rng))
    });
}

fn bench_execute_game_step(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut agents = SmallRng::seed_from_u64(7);

    c.bench_function("execute_game_step_4_teams", |b| {
        b.iter_batched(
            || {
                let game = Game::new(
                    ring_layout(&config, &mut agents).unwrap(),
                    config.rules.clone(),
                    SmallRng::seed_from_u64(1),
                );
                let orders = random_batch(game.board(), &mut agents);
                (game, orders)
            },
            |(mut game, orders)| {
                let applied = game.execute_game_step(black_box(&orders)).unwrap().len();
                applied
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_game(c: &mut Criterion) {
    let mut config = GameConfig::default();
    config.rules.max_ticks = 100;
    let mut group = c.benchmark_group("full_game");
    group.sample_size(20);
    group.bench_function("100_ticks_random_agents", |b| {
        let mut agents = SmallRng::seed_from_u64(3);
        b.iter(|| {
            let mut game = Game::new(
                ring_layout(&config, &mut agents).unwrap(),
                config.rules.clone(),
                SmallRng::seed_from_u64(5),
            );
            while !game.check_game_end() {
                let orders = random_batch(game.board(), &mut agents);
                game.execute_game_step(&orders).unwrap();
            }
            let teams = game.final_scores().len();
            teams
        })
    });
    group.finish();
}

criterion_group!(benches, bench_random_orders, bench_execute_game_step, bench_full_game);
criterion_main!(benches);
