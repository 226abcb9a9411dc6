use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer identifier of a player (reference data owns allocation).
pub type PlayerId = u32;

/// Reference entity for a squad member. Read-only from the engine's
/// perspective; roster management lives outside the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl Player {
    /// Age in whole years on the given date, if a birth date is recorded.
    pub fn age(&self, on: NaiveDate) -> Option<u32> {
        let born = self.birth_date?;
        let days = on.signed_duration_since(born).num_days();
        if days < 0 {
            return None;
        }
        Some((days / 365) as u32)
    }
}

/// Playing position, ordered goalkeeper-first for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Fullback,
    CentreBack,
    DefensiveMidfielder,
    Midfielder,
    Winger,
    Forward,
}

impl Position {
    /// Display ordering rank: goalkeeper first, forwards last.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Fullback => 1,
            Position::CentreBack => 2,
            Position::DefensiveMidfielder => 3,
            Position::Midfielder => 4,
            Position::Winger => 5,
            Position::Forward => 6,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Position::Fullback | Position::CentreBack)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Position::DefensiveMidfielder | Position::Midfielder)
    }

    pub fn is_attacker(&self) -> bool {
        matches!(self, Position::Winger | Position::Forward)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Fullback => "Fullback",
            Position::CentreBack => "Centre-back",
            Position::DefensiveMidfielder => "Defensive midfielder",
            Position::Midfielder => "Midfielder",
            Position::Winger => "Winger",
            Position::Forward => "Forward",
        };
        f.write_str(name)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Goalkeeper" => Ok(Position::Goalkeeper),
            "Fullback" => Ok(Position::Fullback),
            "Centre-back" => Ok(Position::CentreBack),
            "Defensive midfielder" => Ok(Position::DefensiveMidfielder),
            "Midfielder" => Ok(Position::Midfielder),
            "Winger" => Ok(Position::Winger),
            "Forward" => Ok(Position::Forward),
            other => Err(format!("unknown position: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sort_rank_orders_goalkeeper_first_forward_last() {
        let order = [
            Position::Goalkeeper,
            Position::Fullback,
            Position::CentreBack,
            Position::DefensiveMidfielder,
            Position::Midfielder,
            Position::Winger,
            Position::Forward,
        ];
        for window in order.windows(2) {
            assert!(window[0].sort_rank() < window[1].sort_rank());
        }
    }

    #[test]
    fn age_is_whole_years() {
        let player = Player {
            id: 7,
            name: "Test".into(),
            position: Position::Winger,
            birth_date: Some(date(2000, 6, 15)),
        };
        assert_eq!(player.age(date(2024, 6, 20)), Some(24));
        assert_eq!(player.age(date(2024, 6, 10)), Some(23));
    }

    #[test]
    fn age_is_none_without_birth_date() {
        let player =
            Player { id: 7, name: "Test".into(), position: Position::Winger, birth_date: None };
        assert_eq!(player.age(date(2024, 1, 1)), None);
    }

    #[test]
    fn position_round_trips_through_display() {
        for pos in [
            Position::Goalkeeper,
            Position::Fullback,
            Position::CentreBack,
            Position::DefensiveMidfielder,
            Position::Midfielder,
            Position::Winger,
            Position::Forward,
        ] {
            assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
        }
    }
}
