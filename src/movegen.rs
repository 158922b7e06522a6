//! Random order generation.
//!
//! Produces one order per actor, restricted to the kinds the actor's
//! capability profile allows. Used by the simulation binary and benchmarks.

use rand::Rng;

use crate::board::{Actor, BoardData, Direction, Order, OrderKind, TeamId};

/// The order kinds `actor` can attempt. Moving is always possible.
pub fn usable_kinds(actor: &Actor) -> Vec<OrderKind> {
    let mut kinds = vec![OrderKind::Move];
    if actor.can_grab() || actor.flag.is_some() {
        kinds.push(OrderKind::GrabPut);
    }
    if actor.can_attack() {
        kinds.push(OrderKind::Attack);
    }
    if actor.can_build() {
        kinds.push(OrderKind::Build);
    }
    if actor.can_destroy() {
        kinds.push(OrderKind::Destroy);
    }
    kinds
}

/// Picks one random order for each of the team's actors.
pub fn random_orders(board: &BoardData, team: TeamId, rng: &mut impl Rng) -> Vec<Order> {
    let name = &board.team(team).name;
    board
        .actors_of_team(team)
        .iter()
        .map(|actor| {
            let kinds = usable_kinds(actor);
            let kind = kinds[rng.gen_range(0..kinds.len())];
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            Order::new(kind, name.clone(), actor.key.ident, direction)
        })
        .collect()
}

/// Random orders for every team on the board, team by team.
pub fn random_batch(board: &BoardData, rng: &mut impl Rng) -> Vec<Order> {
    let mut orders = Vec::new();
    for team in board.teams() {
        orders.extend(random_orders(board, team.id(), rng));
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::setup::ring_layout;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn one_order_per_actor_with_usable_kind() {
        let mut rng = SmallRng::seed_from_u64(42);
        let board = ring_layout(&GameConfig::default(), &mut rng).unwrap();
        for _ in 0..50 {
            let orders = random_orders(&board, TeamId(2), &mut rng);
            assert_eq!(orders.len(), board.roster().len());
            for (ident, order) in orders.iter().enumerate() {
                assert_eq!(order.team, "yellow");
                assert_eq!(order.actor, ident);
                let actor = &board.actors_of_team(TeamId(2))[ident];
                assert!(usable_kinds(actor).contains(&order.kind));
            }
        }
    }

    #[test]
    fn guardian_only_moves() {
        let mut rng = SmallRng::seed_from_u64(1);
        let board = ring_layout(&GameConfig::default(), &mut rng).unwrap();
        let guardian = board
            .actors_of_team(TeamId(0))
            .iter()
            .find(|a| a.kind == crate::board::ActorKind::Guardian)
            .unwrap();
        assert_eq!(usable_kinds(guardian), vec![OrderKind::Move]);
    }

    #[test]
    fn batch_covers_every_team() {
        let mut rng = SmallRng::seed_from_u64(9);
        let board = ring_layout(&GameConfig::default(), &mut rng).unwrap();
        let batch = random_batch(&board, &mut rng);
        assert_eq!(batch.len(), board.teams().len() * board.roster().len());
    }
}
