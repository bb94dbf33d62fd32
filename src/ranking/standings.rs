use std::collections::BTreeMap;

use log::debug;

use super::tiebreak;
use super::types::TeamStanding;
use crate::domain::{MatchResult, TeamId, Winner};

/// Aggregates results into ranked standings.
///
/// Every mapped team on either side of a result gets a row. Rows are ordered by
/// the tie-break hierarchy and ranked 1..n; teams equal on every measure keep
/// ascending team id order and still receive distinct ranks.
pub fn compute_standings(results: &[MatchResult]) -> Vec<TeamStanding> {
    if results.is_empty() {
        return Vec::new();
    }

    let standings = accumulate(results);
    debug!("Aggregated {} results into {} team standings", results.len(), standings.len());

    rank_standings(standings)
}

fn accumulate(results: &[MatchResult]) -> Vec<TeamStanding> {
    let mut by_team: BTreeMap<TeamId, TeamStanding> = BTreeMap::new();

    for result in results {
        for team_id in [result.team1_id, result.team2_id].into_iter().flatten() {
            by_team
                .entry(team_id)
                .or_insert_with(|| TeamStanding::new(team_id));
        }
    }

    for standing in by_team.values_mut() {
        for result in results {
            apply_result(standing, result);
        }
    }

    by_team.into_values().collect()
}

fn apply_result(standing: &mut TeamStanding, result: &MatchResult) {
    let Some((own, opponent)) = result.tickets_for(standing.team_id) else {
        return;
    };

    match result.winner {
        Winner::Team(winner) if winner == standing.team_id => standing.rounds_won += 1,
        Winner::Tie => standing.rounds_tied += 1,
        Winner::Team(_) => standing.rounds_lost += 1,
    }

    standing.ticket_differential += i64::from(own) - i64::from(opponent);
}

/// Sorts by the tie-break hierarchy and assigns 1-based ranks
pub fn rank_standings(mut standings: Vec<TeamStanding>) -> Vec<TeamStanding> {
    // Stable sort: fully tied teams keep their incoming order
    standings.sort_by(tiebreak::compare);

    for (position, standing) in standings.iter_mut().enumerate() {
        standing.rank = position as i32 + 1;
    }

    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::cmp::Ordering;

    fn result(team1: i64, team2: i64, tickets1: i32, tickets2: i32) -> MatchResult {
        let now = NaiveDateTime::default();
        MatchResult {
            id: 0,
            tournament_id: 1,
            match_id: 1,
            map_id: 1,
            round_id: None,
            week: Some("W1".to_string()),
            team1_id: Some(team1),
            team2_id: Some(team2),
            winner: Winner::from_tickets(Some(team1), Some(team2), tickets1, tickets2),
            team1_tickets: tickets1,
            team2_tickets: tickets2,
            created_at: now,
            updated_at: now,
        }
    }

    fn find(standings: &[TeamStanding], team_id: i64) -> &TeamStanding {
        standings.iter().find(|s| s.team_id == team_id).unwrap()
    }

    #[test]
    fn test_empty_results_give_empty_standings() {
        assert!(compute_standings(&[]).is_empty());
    }

    #[test]
    fn test_win_and_loss_accumulate_differential() {
        // A beats B 200-150, then loses to C 80-120
        let results = vec![result(1, 2, 200, 150), result(1, 3, 80, 120)];

        let standings = compute_standings(&results);

        let a = find(&standings, 1);
        assert_eq!((a.rounds_won, a.rounds_tied, a.rounds_lost), (1, 0, 1));
        assert_eq!(a.ticket_differential, 10);

        let b = find(&standings, 2);
        assert_eq!((b.rounds_won, b.rounds_lost, b.ticket_differential), (0, 1, -50));

        let c = find(&standings, 3);
        assert_eq!((c.rounds_won, c.ticket_differential, c.rank), (1, 40, 1));
    }

    #[test]
    fn test_team_on_second_side_uses_its_own_tickets() {
        let results = vec![result(2, 1, 90, 130)];

        let standings = compute_standings(&results);

        assert_eq!(find(&standings, 1).ticket_differential, 40);
        assert_eq!(find(&standings, 1).rounds_won, 1);
        assert_eq!(find(&standings, 2).ticket_differential, -40);
    }

    #[test]
    fn test_tie_ranks_above_loss() {
        // 1 and 2 tie, 3 loses to 4, 4 ties nobody
        let results = vec![result(1, 2, 100, 100), result(3, 4, 50, 60)];

        let standings = compute_standings(&results);

        assert_eq!(standings[0].team_id, 4);
        assert_eq!(find(&standings, 1).rounds_tied, 1);
        assert!(find(&standings, 1).rank < find(&standings, 3).rank);
        assert!(find(&standings, 2).rank < find(&standings, 3).rank);
    }

    #[test]
    fn test_unmapped_results_contribute_no_rows() {
        let mut unmapped = result(1, 2, 300, 0);
        unmapped.team1_id = None;
        unmapped.team2_id = None;
        unmapped.winner = Winner::Tie;

        assert!(compute_standings(&[unmapped.clone()]).is_empty());

        let standings = compute_standings(&[unmapped, result(1, 2, 10, 20)]);
        assert_eq!(standings.len(), 2);
        let team1 = find(&standings, 1);
        assert_eq!((team1.rounds_won, team1.rounds_tied, team1.rounds_lost), (0, 0, 1));
    }

    #[test]
    fn test_fully_tied_teams_get_distinct_ranks_by_team_id() {
        let results = vec![result(7, 3, 100, 100)];

        let standings = compute_standings(&results);

        assert_eq!(standings[0].team_id, 3);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].team_id, 7);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_ranking_order_respects_tiebreak_hierarchy() {
        let mut standings = Vec::new();
        let mut team_id = 0;
        for won in [2, 0, 3, 1] {
            for tied in [1, 0, 2] {
                for diff in [-25, 40, 0] {
                    team_id += 1;
                    standings.push(TeamStanding {
                        team_id,
                        rounds_won: won,
                        rounds_tied: tied,
                        ticket_differential: diff,
                        ..TeamStanding::default()
                    });
                }
            }
        }

        let ranked = rank_standings(standings);

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.rounds_won >= b.rounds_won);
            if a.rounds_won == b.rounds_won {
                assert!(a.rounds_tied >= b.rounds_tied);
                if a.rounds_tied == b.rounds_tied {
                    assert!(a.ticket_differential >= b.ticket_differential);
                }
            }
            assert_ne!(tiebreak::compare(a, b), Ordering::Greater);
            assert_eq!(b.rank, a.rank + 1);
        }
        assert_eq!(ranked[0].rank, 1);
    }
}
