//! Validated construction of an initial board.
//!
//! Map generation hands its layout to the core through this builder. Every
//! occupancy invariant is checked once in [`BoardBuilder::build`]; after that
//! only the resolution engine mutates the board.

use std::collections::{HashMap, HashSet};

use super::actor::{Actor, ActorKey, ActorKind};
use super::coordinates::Coordinates;
use super::data::BoardData;
use super::error::BoardError;
use super::team::{Team, TeamId};
use super::MIN_MAP_SIZE;

/// Collects a board layout and checks it on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    map_size: u16,
    roster: Vec<ActorKind>,
    teams: Vec<Team>,
    bases: HashMap<TeamId, Coordinates>,
    flags: HashMap<TeamId, Coordinates>,
    actors: HashMap<ActorKey, Coordinates>,
    carriers: Vec<(ActorKey, TeamId)>,
    walls: HashSet<Coordinates>,
}

impl BoardBuilder {
    /// Starts a board where every team fields `roster`, one actor per entry.
    pub fn new(map_size: u16, roster: Vec<ActorKind>) -> Self {
        BoardBuilder {
            map_size,
            roster,
            teams: Vec::new(),
            bases: HashMap::new(),
            flags: HashMap::new(),
            actors: HashMap::new(),
            carriers: Vec::new(),
            walls: HashSet::new(),
        }
    }

    /// Adds a team. Teams are numbered in the order they are added.
    pub fn team(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        let number = self.teams.len();
        self.teams.push(Team::new(name, password, number));
        self
    }

    /// Places a team's base. Its flag starts there unless [`flag`](Self::flag) moves it.
    pub fn base(mut self, team: TeamId, at: Coordinates) -> Self {
        self.bases.insert(team, at);
        self
    }

    /// Moves a team's flag off its base.
    pub fn flag(mut self, team: TeamId, at: Coordinates) -> Self {
        self.flags.insert(team, at);
        self
    }

    /// Places actor `ident` of `team`. Every roster entry must be placed.
    pub fn actor(mut self, team: TeamId, ident: usize, at: Coordinates) -> Self {
        self.actors.insert(ActorKey::new(team, ident), at);
        self
    }

    /// Hands `flag` to an already placed actor; the flag follows the actor's cell.
    pub fn carrying(mut self, team: TeamId, ident: usize, flag: TeamId) -> Self {
        self.carriers.push((ActorKey::new(team, ident), flag));
        self
    }

    /// Adds a single wall.
    pub fn wall(mut self, at: Coordinates) -> Self {
        self.walls.insert(at);
        self
    }

    /// Adds several walls at once.
    pub fn walls(mut self, cells: impl IntoIterator<Item = Coordinates>) -> Self {
        self.walls.extend(cells);
        self
    }

    /// Checks the layout and produces the board.
    pub fn build(self) -> Result<BoardData, BoardError> {
        ActorKind::validate_catalog()?;
        if self.map_size < MIN_MAP_SIZE {
            return Err(BoardError::MapTooSmall(self.map_size));
        }
        if self.teams.is_empty() {
            return Err(BoardError::NoTeams);
        }
        if self.roster.is_empty() {
            return Err(BoardError::EmptyRoster);
        }

        let mut names_teams = HashMap::new();
        for team in &self.teams {
            if names_teams.insert(team.name.clone(), team.id()).is_some() {
                return Err(BoardError::DuplicateTeam(team.name.clone()));
            }
        }

        let map_size = self.map_size;
        let check_bounds = |c: Coordinates| -> Result<(), BoardError> {
            Coordinates::new(i32::from(c.x()), i32::from(c.y()), map_size).map(|_| ())
        };
        for wall in &self.walls {
            check_bounds(*wall)?;
        }

        let mut bases_coordinates = Vec::with_capacity(self.teams.len());
        let mut coordinates_bases = HashMap::new();
        for team in &self.teams {
            let at = *self
                .bases
                .get(&team.id())
                .ok_or_else(|| BoardError::MissingBase(team.name.clone()))?;
            check_bounds(at)?;
            if self.walls.contains(&at) || coordinates_bases.insert(at, team.id()).is_some() {
                return Err(BoardError::Occupied(at));
            }
            bases_coordinates.push(at);
        }

        let mut actors = Vec::with_capacity(self.teams.len());
        let mut actors_coordinates = HashMap::new();
        let mut coordinates_actors = HashMap::new();
        for team in &self.teams {
            let mut members = Vec::with_capacity(self.roster.len());
            for (ident, kind) in self.roster.iter().enumerate() {
                let key = ActorKey::new(team.id(), ident);
                let at = *self.actors.get(&key).ok_or_else(|| BoardError::UnplacedActor {
                    team: team.name.clone(),
                    ident,
                })?;
                check_bounds(at)?;
                if self.walls.contains(&at)
                    || coordinates_bases.contains_key(&at)
                    || coordinates_actors.insert(at, key).is_some()
                {
                    return Err(BoardError::Occupied(at));
                }
                actors_coordinates.insert(key, at);
                members.push(Actor::new(key, *kind));
            }
            actors.push(members);
        }
        for key in self.actors.keys() {
            if !actors_coordinates.contains_key(key) {
                return Err(unknown_actor(&self.teams, *key));
            }
        }

        let mut flags_coordinates = bases_coordinates.clone();
        for (team, at) in &self.flags {
            let slot = flags_coordinates
                .get_mut(team.index())
                .ok_or_else(|| BoardError::UnknownTeam(team.to_string()))?;
            check_bounds(*at)?;
            *slot = *at;
        }

        let mut carried = HashSet::new();
        for (key, flag) in &self.carriers {
            let at = *actors_coordinates
                .get(key)
                .ok_or_else(|| unknown_actor(&self.teams, *key))?;
            let slot = flags_coordinates
                .get_mut(flag.index())
                .ok_or_else(|| BoardError::UnknownTeam(flag.to_string()))?;
            let actor = &mut actors[key.team.index()][key.ident];
            if !carried.insert(*flag) || actor.flag.is_some() || !actor.can_grab() {
                return Err(BoardError::FlagCarriedTwice(self.teams[flag.index()].name.clone()));
            }
            actor.flag = Some(*flag);
            *slot = at;
        }

        let board = BoardData {
            map_size: self.map_size,
            teams: self.teams,
            names_teams,
            roster: self.roster,
            actors,
            actors_coordinates,
            coordinates_actors,
            flags_coordinates,
            bases_coordinates,
            coordinates_bases,
            walls: self.walls,
        };
        board.check_invariants()?;
        Ok(board)
    }
}

fn unknown_actor(teams: &[Team], key: ActorKey) -> BoardError {
    match teams.get(key.team.index()) {
        Some(team) => BoardError::UnknownActor {
            team: team.name.clone(),
            ident: key.ident,
        },
        None => BoardError::UnknownTeam(key.team.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: u16 = 10;

    fn at(x: i32, y: i32) -> Coordinates {
        Coordinates::new(x, y, SIZE).unwrap()
    }

    fn two_teams() -> BoardBuilder {
        BoardBuilder::new(SIZE, vec![ActorKind::Runner])
            .team("red", "")
            .team("blue", "")
            .base(TeamId(0), at(1, 1))
            .base(TeamId(1), at(8, 8))
            .actor(TeamId(0), 0, at(2, 1))
            .actor(TeamId(1), 0, at(7, 8))
    }

    #[test]
    fn valid_layout_builds() {
        let board = two_teams().build().unwrap();
        assert_eq!(board.teams().len(), 2);
        assert!(board.flag_is_at_home(TeamId(0)));
        assert!(board.flag_is_at_home(TeamId(1)));
    }

    #[test]
    fn rejects_small_maps_and_empty_rosters() {
        assert_eq!(
            BoardBuilder::new(3, vec![ActorKind::Runner]).team("a", "").build().unwrap_err(),
            BoardError::MapTooSmall(3)
        );
        assert_eq!(
            BoardBuilder::new(SIZE, vec![]).team("a", "").build().unwrap_err(),
            BoardError::EmptyRoster
        );
        assert_eq!(
            BoardBuilder::new(SIZE, vec![ActorKind::Runner]).build().unwrap_err(),
            BoardError::NoTeams
        );
    }

    #[test]
    fn rejects_duplicate_team_names() {
        let err = BoardBuilder::new(SIZE, vec![ActorKind::Runner])
            .team("red", "")
            .team("red", "")
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::DuplicateTeam("red".into()));
    }

    #[test]
    fn rejects_actor_on_wall_base_or_actor() {
        let on_wall = two_teams().wall(at(2, 1)).build().unwrap_err();
        assert_eq!(on_wall, BoardError::Occupied(at(2, 1)));

        let on_base = two_teams().actor(TeamId(0), 0, at(8, 8)).build().unwrap_err();
        assert_eq!(on_base, BoardError::Occupied(at(8, 8)));

        let stacked = two_teams().actor(TeamId(1), 0, at(2, 1)).build().unwrap_err();
        assert_eq!(stacked, BoardError::Occupied(at(2, 1)));
    }

    #[test]
    fn rejects_missing_placements() {
        let err = BoardBuilder::new(SIZE, vec![ActorKind::Runner, ActorKind::Guardian])
            .team("red", "")
            .base(TeamId(0), at(1, 1))
            .actor(TeamId(0), 0, at(2, 1))
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::UnplacedActor { team: "red".into(), ident: 1 });

        let err = BoardBuilder::new(SIZE, vec![ActorKind::Runner])
            .team("red", "")
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::MissingBase("red".into()));
    }

    #[test]
    fn walls_are_added_in_bulk() {
        let board = two_teams().walls([at(4, 4), at(4, 5), at(4, 4)]).build().unwrap();
        assert!(board.is_wall(at(4, 4)));
        assert!(board.is_wall(at(4, 5)));
        assert_eq!(board.walls().count(), 2);

        let err = two_teams().walls([at(5, 5), at(8, 8)]).build().unwrap_err();
        assert_eq!(err, BoardError::Occupied(at(8, 8)));
    }

    #[test]
    fn rejects_coordinates_from_a_larger_map() {
        let far = Coordinates::new(15, 15, 20).unwrap();
        let err = two_teams().wall(far).build().unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { x: 15, y: 15, map_size: SIZE });
    }

    #[test]
    fn carried_flag_follows_its_carrier() {
        let board = two_teams().carrying(TeamId(0), 0, TeamId(1)).build().unwrap();
        let carrier = ActorKey::new(TeamId(0), 0);
        assert_eq!(board.flag_coordinates(TeamId(1)), at(2, 1));
        assert_eq!(board.flag_carrier(TeamId(1)), Some(carrier));
        assert_eq!(board.actor(carrier).unwrap().flag, Some(TeamId(1)));
    }

    #[test]
    fn a_flag_cannot_have_two_carriers() {
        let err = two_teams()
            .carrying(TeamId(0), 0, TeamId(1))
            .carrying(TeamId(1), 0, TeamId(1))
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::FlagCarriedTwice("blue".into()));
    }
}
