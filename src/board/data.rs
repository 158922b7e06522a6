//! Authoritative board state.
//!
//! Keeps bidirectional position indexes for actors and bases, per-team flag
//! positions, and the wall set. Occupancy rules:
//!
//! - exclusive: actor/actor, actor/wall, actor/base, base/wall
//! - shared: a flag may sit on an actor (carried), on a base (resting), or
//!   alone on open ground; several flags may share a cell
//!
//! The reverse flag view is computed on demand because flags are few and
//! may stack. Writes are `pub(crate)` and only the resolution engine and the
//! builder call them.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::actor::{Actor, ActorKey, ActorKind, CapabilityProfile};
use super::coordinates::Coordinates;
use super::error::BoardError;
use super::team::{Team, TeamId};

/// Anything that can occupy a cell, as reported by [`BoardData::all_objects_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoardObject {
    Base(TeamId),
    Actor(ActorKey),
    Flag(TeamId),
    Wall,
}

/// The mutable spatial state of one game.
#[derive(Debug, Clone)]
pub struct BoardData {
    pub(crate) map_size: u16,
    pub(crate) teams: Vec<Team>,
    pub(crate) names_teams: HashMap<String, TeamId>,
    pub(crate) roster: Vec<ActorKind>,
    /// Indexed by `[team][ident]`.
    pub(crate) actors: Vec<Vec<Actor>>,
    pub(crate) actors_coordinates: HashMap<ActorKey, Coordinates>,
    pub(crate) coordinates_actors: HashMap<Coordinates, ActorKey>,
    /// Indexed by owning team.
    pub(crate) flags_coordinates: Vec<Coordinates>,
    /// Indexed by owning team.
    pub(crate) bases_coordinates: Vec<Coordinates>,
    pub(crate) coordinates_bases: HashMap<Coordinates, TeamId>,
    pub(crate) walls: HashSet<Coordinates>,
}

impl BoardData {
    /// Side length of the square map.
    pub fn map_size(&self) -> u16 {
        self.map_size
    }

    /// Convenience constructor for coordinates on this board.
    pub fn coordinates(&self, x: i32, y: i32) -> Result<Coordinates, BoardError> {
        Coordinates::new(x, y, self.map_size)
    }

    /// All teams, in number order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The team behind `id`. Panics on an id from another board.
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    /// Looks a team up by name.
    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.names_teams.get(name).copied()
    }

    /// Like [`team_id`](Self::team_id), returning the team itself.
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.team_id(name).map(|id| self.team(id))
    }

    /// The actor kinds every team fields, in id order.
    pub fn roster(&self) -> &[ActorKind] {
        &self.roster
    }

    /// Each roster kind with its capability profile.
    pub fn actor_properties(&self) -> Vec<(ActorKind, CapabilityProfile)> {
        self.roster.iter().map(|k| (*k, k.profile())).collect()
    }

    /// The actor behind `key`, if it exists.
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key.team.index())?.get(key.ident)
    }

    /// Resolves an external `(team name, actor id)` reference.
    pub fn actor_key(&self, team: &str, ident: usize) -> Result<ActorKey, BoardError> {
        let team_id = self
            .team_id(team)
            .ok_or_else(|| BoardError::UnknownTeam(team.to_string()))?;
        if ident >= self.roster.len() {
            return Err(BoardError::UnknownActor {
                team: team.to_string(),
                ident,
            });
        }
        Ok(ActorKey::new(team_id, ident))
    }

    /// A team's actors, in id order.
    pub fn actors_of_team(&self, team: TeamId) -> &[Actor] {
        self.actors.get(team.index()).map_or(&[], |a| a.as_slice())
    }

    /// Every actor of every team, team by team.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().flatten()
    }

    /// Where the actor stands.
    pub fn actor_coordinates(&self, key: ActorKey) -> Option<Coordinates> {
        self.actors_coordinates.get(&key).copied()
    }

    /// The actor standing at `coordinates`, if any.
    pub fn actor_at(&self, coordinates: Coordinates) -> Option<ActorKey> {
        self.coordinates_actors.get(&coordinates).copied()
    }

    /// Where a team's flag lies, carried or not.
    pub fn flag_coordinates(&self, team: TeamId) -> Coordinates {
        self.flags_coordinates[team.index()]
    }

    /// All flags lying at `coordinates`, in team order.
    pub fn flags_at(&self, coordinates: Coordinates) -> impl Iterator<Item = TeamId> + '_ {
        self.flags_coordinates
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == coordinates)
            .map(|(i, _)| TeamId(i))
    }

    /// The flag a grab at `coordinates` would take. When flags stack, the one
    /// of the highest-numbered team is on top.
    pub fn flag_at(&self, coordinates: Coordinates) -> Option<TeamId> {
        self.flags_at(coordinates).last()
    }

    /// The actor currently carrying `flag`, if any.
    pub fn flag_carrier(&self, flag: TeamId) -> Option<ActorKey> {
        self.actors().find(|a| a.flag == Some(flag)).map(|a| a.key)
    }

    /// Where a team's base is.
    pub fn base_coordinates(&self, team: TeamId) -> Coordinates {
        self.bases_coordinates[team.index()]
    }

    /// The team whose base is at `coordinates`, if any.
    pub fn base_at(&self, coordinates: Coordinates) -> Option<TeamId> {
        self.coordinates_bases.get(&coordinates).copied()
    }

    /// True if a wall stands at `coordinates`.
    pub fn is_wall(&self, coordinates: Coordinates) -> bool {
        self.walls.contains(&coordinates)
    }

    /// All walls, in no particular order.
    pub fn walls(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.walls.iter().copied()
    }

    /// True if the team's flag lies on its own base.
    pub fn flag_is_at_home(&self, team: TeamId) -> bool {
        self.flag_coordinates(team) == self.base_coordinates(team)
    }

    /// Everything at `coordinates`: base, actor, flags, then wall.
    pub fn all_objects_at(&self, coordinates: Coordinates) -> Vec<BoardObject> {
        let mut objects = Vec::new();
        if let Some(team) = self.base_at(coordinates) {
            objects.push(BoardObject::Base(team));
        }
        if let Some(key) = self.actor_at(coordinates) {
            objects.push(BoardObject::Actor(key));
        }
        objects.extend(self.flags_at(coordinates).map(BoardObject::Flag));
        if self.is_wall(coordinates) {
            objects.push(BoardObject::Wall);
        }
        objects
    }

    /// True if nothing at all stands at `coordinates`.
    pub fn is_empty_cell(&self, coordinates: Coordinates) -> bool {
        self.actor_at(coordinates).is_none()
            && self.base_at(coordinates).is_none()
            && self.flag_at(coordinates).is_none()
            && !self.is_wall(coordinates)
    }

    /// Verifies the occupancy invariants. Used by tests and debug assertions.
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        let within = |c: Coordinates| c.x() < self.map_size && c.y() < self.map_size;
        for (c, key) in &self.coordinates_actors {
            if self.actors_coordinates.get(key) != Some(c) {
                return Err(BoardError::Inconsistent(*c));
            }
        }
        for (key, c) in &self.actors_coordinates {
            if !within(*c) || self.coordinates_actors.get(c) != Some(key) {
                return Err(BoardError::Inconsistent(*c));
            }
            if self.is_wall(*c) || self.base_at(*c).is_some() {
                return Err(BoardError::Inconsistent(*c));
            }
        }
        let mut carried = HashSet::new();
        for actor in self.actors() {
            if let Some(flag) = actor.flag {
                if !carried.insert(flag) {
                    return Err(BoardError::FlagCarriedTwice(self.team(flag).name.clone()));
                }
                if self.actor_coordinates(actor.key) != Some(self.flag_coordinates(flag)) {
                    return Err(BoardError::Inconsistent(self.flag_coordinates(flag)));
                }
            }
        }
        for flag in &self.flags_coordinates {
            if !within(*flag) {
                return Err(BoardError::Inconsistent(*flag));
            }
        }
        Ok(())
    }

    pub(crate) fn actor_mut(&mut self, key: ActorKey) -> &mut Actor {
        &mut self.actors[key.team.index()][key.ident]
    }

    /// Moves an actor (not its flag) and keeps both indexes in step.
    pub(crate) fn relocate_actor(&mut self, key: ActorKey, to: Coordinates) {
        if let Some(from) = self.actors_coordinates.insert(key, to) {
            self.coordinates_actors.remove(&from);
        }
        self.coordinates_actors.insert(to, key);
    }

    pub(crate) fn set_flag_coordinates(&mut self, flag: TeamId, to: Coordinates) {
        self.flags_coordinates[flag.index()] = to;
    }

    pub(crate) fn add_wall(&mut self, at: Coordinates) {
        self.walls.insert(at);
    }

    pub(crate) fn remove_wall(&mut self, at: Coordinates) {
        self.walls.remove(&at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::builder::BoardBuilder;

    fn board() -> BoardData {
        let at = |x, y| Coordinates::new(x, y, 10).unwrap();
        BoardBuilder::new(10, vec![ActorKind::Generalist, ActorKind::Runner])
            .team("red", "r")
            .team("blue", "b")
            .base(TeamId(0), at(2, 2))
            .base(TeamId(1), at(7, 7))
            .actor(TeamId(0), 0, at(3, 2))
            .actor(TeamId(0), 1, at(2, 3))
            .actor(TeamId(1), 0, at(6, 7))
            .actor(TeamId(1), 1, at(7, 6))
            .wall(at(5, 5))
            .build()
            .unwrap()
    }

    #[test]
    fn lookups_by_coordinates_and_by_object_agree() {
        let b = board();
        let key = ActorKey::new(TeamId(1), 0);
        let c = b.actor_coordinates(key).unwrap();
        assert_eq!(b.actor_at(c), Some(key));
        assert_eq!(b.base_at(b.base_coordinates(TeamId(0))), Some(TeamId(0)));
        assert_eq!(b.flag_at(b.base_coordinates(TeamId(1))), Some(TeamId(1)));
        assert!(b.is_wall(b.coordinates(5, 5).unwrap()));
    }

    #[test]
    fn all_objects_lists_base_and_flag() {
        let b = board();
        let home = b.base_coordinates(TeamId(0));
        assert_eq!(
            b.all_objects_at(home),
            vec![BoardObject::Base(TeamId(0)), BoardObject::Flag(TeamId(0))]
        );
        assert_eq!(b.all_objects_at(b.coordinates(5, 5).unwrap()), vec![BoardObject::Wall]);
        assert!(b.all_objects_at(b.coordinates(0, 9).unwrap()).is_empty());
    }

    #[test]
    fn stacked_flags_are_all_reported() {
        let mut b = board();
        let home = b.base_coordinates(TeamId(0));
        b.set_flag_coordinates(TeamId(1), home);
        assert_eq!(b.flags_at(home).collect::<Vec<_>>(), vec![TeamId(0), TeamId(1)]);
        assert_eq!(b.flag_at(home), Some(TeamId(1)));
        assert!(!b.flag_is_at_home(TeamId(1)));
        assert!(b.flag_is_at_home(TeamId(0)));
    }

    #[test]
    fn relocate_updates_both_indexes() {
        let mut b = board();
        let key = ActorKey::new(TeamId(0), 0);
        let old = b.actor_coordinates(key).unwrap();
        let new = b.coordinates(4, 2).unwrap();
        b.relocate_actor(key, new);
        assert_eq!(b.actor_at(new), Some(key));
        assert_eq!(b.actor_at(old), None);
        assert!(b.check_invariants().is_ok());
    }

    #[test]
    fn actor_key_rejects_unknown_references() {
        let b = board();
        assert_eq!(b.actor_key("blue", 1), Ok(ActorKey::new(TeamId(1), 1)));
        assert_eq!(b.actor_key("green", 0), Err(BoardError::UnknownTeam("green".into())));
        assert!(matches!(b.actor_key("red", 2), Err(BoardError::UnknownActor { ident: 2, .. })));
    }

    #[test]
    fn teams_are_found_by_name() {
        let b = board();
        let blue = b.team_by_name("blue").unwrap();
        assert_eq!(blue.id(), TeamId(1));
        assert_eq!(blue.password, "b");
        assert_eq!(b.team_id("red"), Some(TeamId(0)));
        assert!(b.team_by_name("green").is_none());
    }

    #[test]
    fn actors_of_team_in_id_order() {
        let b = board();
        let idents: Vec<_> = b.actors_of_team(TeamId(1)).iter().map(|a| a.key.ident).collect();
        assert_eq!(idents, vec![0, 1]);
        assert_eq!(b.actor_properties().len(), 2);
    }
}
