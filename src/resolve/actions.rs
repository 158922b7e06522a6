//! Per-order resolution engine.
//!
//! A [`BoardActions`] borrows the board exclusively for the duration of one
//! tick. Each entry point validates one order, runs its Bernoulli trial
//! against the actor's capability, mutates the board, and returns a
//! [`Resolution`]. Follow-up rules (flag return, capture) run inline.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use super::outcome::{Rejection, Resolution};
use super::record::Action;
use crate::board::{
    ActorKey, BoardData, CapabilityProfile, Coordinates, Direction, OrderKind, TeamId,
    SPAWN_RADIUS,
};
use crate::config::Ruleset;

/// Exclusive, tick-scoped access to the board for resolving orders.
pub struct BoardActions<'a, R: Rng> {
    board: &'a mut BoardData,
    rules: &'a Ruleset,
    rng: &'a mut R,
}

impl<'a, R: Rng> BoardActions<'a, R> {
    /// Borrows the board, rules and random source for one tick.
    pub fn new(board: &'a mut BoardData, rules: &'a Ruleset, rng: &'a mut R) -> Self {
        BoardActions { board, rules, rng }
    }

    /// Read access to the board being resolved.
    pub fn board(&self) -> &BoardData {
        self.board
    }

    /// The cell one step from the actor in `direction`, clamped at the border.
    pub fn calc_target_coordinates(&self, key: ActorKey, direction: Direction) -> Coordinates {
        self.position(key).step(direction, self.board.map_size())
    }

    /// Dispatches to the entry point for `kind`.
    pub fn resolve(&mut self, kind: OrderKind, key: ActorKey, direction: Direction) -> Resolution {
        match kind {
            OrderKind::Move => self.move_actor(key, direction),
            OrderKind::Attack => self.attack(key, direction),
            OrderKind::GrabPut => self.grab_put(key, direction),
            OrderKind::Build => self.build(key, direction),
            OrderKind::Destroy => self.destroy(key, direction),
        }
    }

    /// Steps one cell; a carried flag moves along.
    pub fn move_actor(&mut self, key: ActorKey, direction: Direction) -> Resolution {
        let origin = self.position(key);
        let destination = self.calc_target_coordinates(key, direction);

        let blocked = if destination == origin {
            Some(Rejection::OutOfBounds)
        } else if self.board.actor_at(destination).is_some() {
            Some(Rejection::Occupied)
        } else if self.board.base_at(destination).is_some() {
            Some(Rejection::Base)
        } else if self.board.is_wall(destination) {
            Some(Rejection::Wall)
        } else {
            None
        };
        if let Some(reason) = blocked {
            warn!(actor = %key, %destination, "did not move, {}", reason);
            return Resolution::rejected(reason);
        }

        self.board.relocate_actor(key, destination);
        if let Some(flag) = self.carried(key) {
            self.board.set_flag_coordinates(flag, destination);
        }
        info!(actor = %key, %origin, %destination, "moved");

        let scorers = self.check_flag_return(key);
        Resolution::applied(Action::Move {
            actor: key,
            origin,
            destination,
        })
        .with_scorers(scorers)
    }

    /// On a hit the target respawns and the attacker's team is the single scorer.
    pub fn attack(&mut self, key: ActorKey, direction: Direction) -> Resolution {
        let probability = self.probability(key, |p| p.attack);
        if probability <= 0.0 {
            warn!(actor = %key, "can not attack");
            return Resolution::rejected(Rejection::Incapable);
        }

        let destination = self.calc_target_coordinates(key, direction);
        let target = match self.board.actor_at(destination) {
            // a step clamped at the border lands on the attacker itself
            Some(target) if target != key => target,
            _ => {
                warn!(actor = %key, %destination, "no target on target coordinates");
                return Resolution::rejected(Rejection::NoTarget);
            }
        };

        if !self.trial(probability) {
            info!(actor = %key, %target, "attacked and missed");
            return Resolution::missed();
        }
        info!(actor = %key, %target, "attacked and hit");
        self.respawn(target);
        Resolution::applied(Action::Attack {
            actor: key,
            target,
            destination,
        })
        .with_scorers(vec![key.team])
    }

    /// Puts down the carried flag, or tries to grab one if the actor has none.
    pub fn grab_put(&mut self, key: ActorKey, direction: Direction) -> Resolution {
        let destination = self.calc_target_coordinates(key, direction);
        match self.carried(key) {
            Some(flag) => self.put(key, flag, destination),
            None => self.grab(key, destination),
        }
    }

    fn put(&mut self, key: ActorKey, flag: TeamId, destination: Coordinates) -> Resolution {
        if let Some(receiver) = self.board.actor_at(destination) {
            let reason = match self.board.actor(receiver) {
                Some(r) if !r.can_grab() => Some(Rejection::ReceiverCannotCarry),
                Some(r) if r.flag.is_some() => Some(Rejection::ReceiverHasFlag),
                _ => None,
            };
            if let Some(reason) = reason {
                warn!(actor = %key, %receiver, "can not hand over the flag, {}", reason);
                return Resolution::rejected(reason);
            }

            self.board.set_flag_coordinates(flag, destination);
            self.board.actor_mut(key).flag = None;
            self.board.actor_mut(receiver).flag = Some(flag);
            info!(actor = %key, %receiver, %flag, "handed the flag over");

            let scorers = self.check_flag_return(receiver);
            return Resolution::applied(Action::Put {
                actor: key,
                destination,
                flag,
                target: Some(receiver),
            })
            .with_scorers(scorers);
        }

        if self.board.is_wall(destination) {
            warn!(actor = %key, %destination, "can not put the flag on a wall");
            return Resolution::rejected(Rejection::Wall);
        }

        self.board.set_flag_coordinates(flag, destination);
        self.board.actor_mut(key).flag = None;
        info!(actor = %key, %flag, %destination, "put the flag down");

        let scorers = self.check_captures(Some(flag));
        Resolution::applied(Action::Put {
            actor: key,
            destination,
            flag,
            target: None,
        })
        .with_scorers(scorers)
    }

    fn grab(&mut self, key: ActorKey, destination: Coordinates) -> Resolution {
        let Some(flag) = self.board.flag_at(destination) else {
            warn!(actor = %key, %destination, "no flag at coordinates");
            return Resolution::rejected(Rejection::NoFlag);
        };

        let probability = self.probability(key, |p| p.grab);
        if !self.trial(probability) {
            info!(actor = %key, %flag, "grabbed and missed the flag");
            return Resolution::missed();
        }

        let previous = self.board.flag_carrier(flag);
        if let Some(previous) = previous {
            self.board.actor_mut(previous).flag = None;
        }
        let here = self.position(key);
        self.board.set_flag_coordinates(flag, here);
        self.board.actor_mut(key).flag = Some(flag);
        match previous {
            Some(previous) => info!(actor = %key, %flag, from = %previous, "grabbed the flag"),
            None => info!(actor = %key, %flag, "grabbed the flag"),
        }

        let scorers = self.check_flag_return(key);
        Resolution::applied(Action::Grab {
            actor: key,
            destination,
            flag,
            target: previous,
        })
        .with_scorers(scorers)
    }

    /// Raises a wall on an empty neighbouring cell.
    pub fn build(&mut self, key: ActorKey, direction: Direction) -> Resolution {
        let probability = self.probability(key, |p| p.build);
        if probability <= 0.0 {
            warn!(actor = %key, "can not build");
            return Resolution::rejected(Rejection::Incapable);
        }

        let destination = self.calc_target_coordinates(key, direction);
        if !self.board.is_empty_cell(destination) {
            warn!(actor = %key, %destination, "target field is not empty");
            return Resolution::rejected(Rejection::NotEmpty);
        }

        if !self.trial(probability) {
            info!(actor = %key, %destination, "building did not work");
            return Resolution::missed();
        }
        self.board.add_wall(destination);
        info!(actor = %key, %destination, "built a wall");
        Resolution::applied(Action::Build {
            actor: key,
            destination,
        })
    }

    /// Removes a wall from a neighbouring cell.
    pub fn destroy(&mut self, key: ActorKey, direction: Direction) -> Resolution {
        let probability = self.probability(key, |p| p.destroy);
        if probability <= 0.0 {
            warn!(actor = %key, "can not destroy");
            return Resolution::rejected(Rejection::Incapable);
        }

        let destination = self.calc_target_coordinates(key, direction);
        if !self.board.is_wall(destination) {
            warn!(actor = %key, %destination, "target field does not contain a wall");
            return Resolution::rejected(Rejection::NoWall);
        }

        if !self.trial(probability) {
            info!(actor = %key, %destination, "destruction did not work");
            return Resolution::missed();
        }
        self.board.remove_wall(destination);
        info!(actor = %key, %destination, "destroyed a wall");
        Resolution::applied(Action::Destroy {
            actor: key,
            destination,
        })
    }

    /// Scores every flag (or just `flag`) lying on a base of another team.
    ///
    /// With `home_flag_required`, the base's team must have its own flag at
    /// home; otherwise the flag stays where it is, uncaptured.
    pub fn check_captures(&mut self, flag: Option<TeamId>) -> Vec<TeamId> {
        let flags: Vec<TeamId> = match flag {
            Some(flag) => vec![flag],
            None => self.board.teams().iter().map(|t| t.id()).collect(),
        };

        let mut scorers = Vec::new();
        for flag in flags {
            let at = self.board.flag_coordinates(flag);
            let Some(base_team) = self.board.base_at(at) else {
                continue;
            };
            if base_team == flag {
                continue;
            }
            if !self.rules.home_flag_required || self.board.flag_is_at_home(base_team) {
                info!(team = %self.board.team(base_team).name, %flag, "captured flag");
                self.return_flag_to_base(flag);
                scorers.push(base_team);
            } else {
                warn!(team = %self.board.team(base_team).name, %flag, "can not capture, flag not at home");
            }
        }
        scorers
    }

    /// Moves a defeated actor to a random free cell around its base.
    ///
    /// A carried flag is dropped where the actor died. If the spawn area is
    /// full the actor stays put.
    pub fn respawn(&mut self, key: ActorKey) {
        let base = self.board.base_coordinates(key.team);
        let free: Vec<Coordinates> = base
            .area(SPAWN_RADIUS, self.board.map_size())
            .into_iter()
            .filter(|c| self.board.is_empty_cell(*c))
            .collect();

        let Some(&spawn) = free.choose(&mut *self.rng) else {
            warn!(actor = %key, %base, "no free cell to respawn on");
            return;
        };
        if let Some(flag) = self.board.actor_mut(key).flag.take() {
            info!(actor = %key, %flag, "dropped the flag");
        }
        self.board.relocate_actor(key, spawn);
        info!(actor = %key, coordinates = %spawn, "respawned");
    }

    /// Sends the actor's own flag home if the actor stands on it.
    fn check_flag_return(&mut self, key: ActorKey) -> Vec<TeamId> {
        let team = key.team;
        if self.board.flag_coordinates(team) != self.position(key) {
            return Vec::new();
        }
        self.return_flag_to_base(team);
        info!(actor = %key, "returned own flag to base");
        self.check_captures(None)
    }

    fn return_flag_to_base(&mut self, flag: TeamId) {
        if let Some(carrier) = self.board.flag_carrier(flag) {
            self.board.actor_mut(carrier).flag = None;
        }
        let home = self.board.base_coordinates(flag);
        self.board.set_flag_coordinates(flag, home);
    }

    fn position(&self, key: ActorKey) -> Coordinates {
        self.board.actors_coordinates[&key]
    }

    fn carried(&self, key: ActorKey) -> Option<TeamId> {
        self.board.actor(key).and_then(|a| a.flag)
    }

    fn probability(&self, key: ActorKey, pick: impl Fn(&CapabilityProfile) -> f64) -> f64 {
        self.board.actor(key).map_or(0.0, |a| pick(&a.profile()))
    }

    fn trial(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }
}
