//! Ring layout for a fresh board.
//!
//! Bases sit on a circle around the map centre, one per team at equal angle
//! steps. Flags start on their bases and each team's actors are scattered
//! over the 5x5 area around its base. No walls are placed.

use std::f64::consts::{FRAC_PI_4, PI};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{BoardBuilder, BoardData, BoardError, Coordinates, TeamId, SPAWN_RADIUS};
use crate::config::GameConfig;

/// Angle of the first base, measured from the y axis.
const BASE_ANGLE: f64 = FRAC_PI_4;

/// Distance from the centre: between a quarter of the map and two cells
/// short of the reachable edge. The square layouts (two and four teams) may
/// reach into the corners.
fn radius_bounds(map_size: u16, teams: usize) -> (i32, i32) {
    let half = f64::from(map_size) / 2.0;
    let min = (half / 2.0) as i32;
    let stretch = if matches!(teams, 2 | 4) { 1.4142 } else { 1.0 };
    let max = (stretch * f64::from(map_size) / 2.0) as i32 - 2;
    (min, max.max(min))
}

/// Base coordinates for every team, in team order.
pub fn base_positions<R: Rng + ?Sized>(
    map_size: u16,
    teams: usize,
    rng: &mut R,
) -> Result<Vec<Coordinates>, BoardError> {
    let (min, max) = radius_bounds(map_size, teams);
    let radius = f64::from(rng.gen_range(min..=max));
    let half = f64::from(map_size) / 2.0;
    let step = 2.0 * PI / teams as f64;

    (0..teams)
        .map(|i| {
            let angle = BASE_ANGLE + i as f64 * step;
            let x = (angle.sin() * radius + half) as i32;
            let y = (angle.cos() * radius + half) as i32;
            Coordinates::new(x, y, map_size)
        })
        .collect()
}

/// Builds the opening board for `config`.
pub fn ring_layout<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<BoardData, BoardError> {
    let map_size = config.rules.map_size;
    let bases = base_positions(map_size, config.teams.len(), rng)?;

    let mut builder = BoardBuilder::new(map_size, config.actors.clone());
    for team in &config.teams {
        builder = builder.team(team.name.clone(), team.password.clone());
    }

    let mut taken: Vec<Coordinates> = bases.clone();
    for ((i, base), team_config) in bases.iter().enumerate().zip(&config.teams) {
        let team = TeamId(i);
        builder = builder.base(team, *base);

        let mut places: Vec<Coordinates> = base
            .area(SPAWN_RADIUS, map_size)
            .into_iter()
            .filter(|c| !taken.contains(c))
            .collect();
        places.shuffle(rng);
        if places.len() < config.actors.len() {
            return Err(BoardError::NoSpawnRoom {
                team: team_config.name.clone(),
                base: *base,
            });
        }
        for (ident, at) in places.into_iter().take(config.actors.len()).enumerate() {
            builder = builder.actor(team, ident, at);
            taken.push(at);
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn radius_stays_inside_the_map() {
        assert_eq!(radius_bounds(15, 4), (3, 8));
        assert_eq!(radius_bounds(15, 3), (3, 5));
        assert_eq!(radius_bounds(10, 2), (2, 5));
    }

    #[test]
    fn bases_are_distinct_and_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        for teams in 2..=6 {
            let bases = base_positions(20, teams, &mut rng).unwrap();
            assert_eq!(bases.len(), teams);
            for (i, b) in bases.iter().enumerate() {
                assert!(!bases[..i].contains(b));
            }
        }
    }

    #[test]
    fn default_config_layout_is_consistent() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = ring_layout(&config, &mut rng).unwrap();
            board.check_invariants().unwrap();
            assert!(board.walls().next().is_none());
            for team in board.teams() {
                assert!(board.flag_is_at_home(team.id()));
                let base = board.base_coordinates(team.id());
                for actor in board.actors_of_team(team.id()) {
                    let at = board.actor_coordinates(actor.key).unwrap();
                    assert!(base.area(SPAWN_RADIUS, board.map_size()).contains(&at));
                    assert_ne!(at, base);
                }
            }
        }
    }

    #[test]
    fn crowded_map_reports_missing_spawn_room() {
        let mut config = GameConfig::default();
        config.rules.map_size = 10;
        config.actors = vec![crate::board::ActorKind::Runner; 20];
        config.teams = (0..6)
            .map(|i| crate::config::TeamConfig {
                name: format!("team{i}"),
                password: String::new(),
            })
            .collect();
        let err = ring_layout(&config, &mut SmallRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, BoardError::NoSpawnRoom { .. }), "{err}");
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();
        let a = ring_layout(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
        let b = ring_layout(&config, &mut SmallRng::seed_from_u64(3)).unwrap();
        for team in a.teams() {
            assert_eq!(a.base_coordinates(team.id()), b.base_coordinates(team.id()));
            for actor in a.actors_of_team(team.id()) {
                assert_eq!(a.actor_coordinates(actor.key), b.actor_coordinates(actor.key));
            }
        }
    }
}
