use std::cmp::Ordering;

use super::types::TeamStanding;

/// Measures teams are ordered by, most significant first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiebreakCriteria {
    RoundsWon,
    // A tie beats a loss once win counts are level.
    RoundsTied,
    TicketDifferential,
}

pub const TIEBREAK_ORDER: [TiebreakCriteria; 3] = [
    TiebreakCriteria::RoundsWon,
    TiebreakCriteria::RoundsTied,
    TiebreakCriteria::TicketDifferential,
];

impl TiebreakCriteria {
    /// `Less` means `a` ranks above `b`
    pub fn compare(self, a: &TeamStanding, b: &TeamStanding) -> Ordering {
        match self {
            TiebreakCriteria::RoundsWon => b.rounds_won.cmp(&a.rounds_won),
            TiebreakCriteria::RoundsTied => b.rounds_tied.cmp(&a.rounds_tied),
            TiebreakCriteria::TicketDifferential => b.ticket_differential.cmp(&a.ticket_differential),
        }
    }
}

/// Full tie-break comparison; teams equal on every measure compare `Equal`
pub fn compare(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    TIEBREAK_ORDER
        .iter()
        .map(|criteria| criteria.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(team_id: i64, won: i32, tied: i32, diff: i64) -> TeamStanding {
        TeamStanding {
            team_id,
            rounds_won: won,
            rounds_tied: tied,
            ticket_differential: diff,
            ..TeamStanding::default()
        }
    }

    #[test]
    fn test_wins_dominate() {
        let a = standing(1, 3, 0, -500);
        let b = standing(2, 2, 5, 900);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_ties_break_equal_wins() {
        let a = standing(1, 2, 0, 300);
        let b = standing(2, 2, 1, -10);
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_differential_breaks_equal_wins_and_ties() {
        let a = standing(1, 1, 1, -20);
        let b = standing(2, 1, 1, 15);
        assert_eq!(compare(&a, &b), Ordering::Greater);
        assert_eq!(compare(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_identical_measures_compare_equal() {
        let a = standing(1, 1, 1, 5);
        let b = standing(2, 1, 1, 5);
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }
}
