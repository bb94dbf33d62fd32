use std::collections::HashSet;

use super::types::{Resolution, RosterScore, Unresolvable};
use crate::domain::{Round, Roster, TeamId};

/// Infers which roster played under each of the round's two labels.
///
/// The pairing is the strongest statistical signal available, not a guarantee;
/// callers must let an administrator override it. Ties between equally strong
/// rosters go to the one listed first, so the result is deterministic for a
/// fixed input.
pub fn resolve_teams(round: &Round, rosters: &[Roster]) -> Result<Resolution, Unresolvable> {
    if round.players.is_empty() {
        return Err(Unresolvable::NoParticipants);
    }
    if rosters.is_empty() {
        return Err(Unresolvable::NoRosters);
    }

    // 1. Split observed players by label
    let (round_a, round_b) = partition_players(round);

    // 2. Score every roster against both sides, keeping only overlapping ones
    let scores: Vec<RosterScore> = rosters
        .iter()
        .map(|roster| score_roster(roster, &round_a, &round_b))
        .filter(RosterScore::is_viable)
        .collect();

    if scores.len() < 2 {
        return Err(Unresolvable::InsufficientSignal { viable: scores.len() });
    }

    // 3. Strongest label A roster, then the strongest label B roster among the rest
    let team1_id = pick_best(&scores, None, |s| (s.score_a, s.margin_a()))
        .map(|s| s.team_id)
        .ok_or(Unresolvable::InsufficientSignal { viable: scores.len() })?;
    let team2_id = pick_best(&scores, Some(team1_id), |s| (s.score_b, s.margin_b()))
        .map(|s| s.team_id)
        .ok_or(Unresolvable::NoSecondTeam)?;

    Ok(Resolution {
        team1_id,
        team2_id,
        scores,
    })
}

fn partition_players(round: &Round) -> (HashSet<&str>, HashSet<&str>) {
    let mut round_a = HashSet::new();
    let mut round_b = HashSet::new();

    for player in &round.players {
        if player.team_label == round.label1 {
            round_a.insert(player.player_name.as_str());
        } else if player.team_label == round.label2 {
            round_b.insert(player.player_name.as_str());
        }
    }

    (round_a, round_b)
}

fn score_roster(roster: &Roster, round_a: &HashSet<&str>, round_b: &HashSet<&str>) -> RosterScore {
    let members: HashSet<&str> = roster.members.iter().map(String::as_str).collect();

    RosterScore {
        team_id: roster.team_id,
        name: roster.name.clone(),
        score_a: members.iter().filter(|m| round_a.contains(*m)).count(),
        score_b: members.iter().filter(|m| round_b.contains(*m)).count(),
    }
}

/// Highest key wins; on equal keys the earlier roster is kept
fn pick_best<F>(scores: &[RosterScore], exclude: Option<TeamId>, key: F) -> Option<&RosterScore>
where
    F: Fn(&RosterScore) -> (usize, i64),
{
    let mut best: Option<&RosterScore> = None;

    for candidate in scores.iter().filter(|s| Some(s.team_id) != exclude) {
        match best {
            Some(current) if key(candidate) <= key(current) => {}
            _ => best = Some(candidate),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlayerObservation;

    fn round(players: &[(&str, &str)]) -> Round {
        Round {
            id: 1,
            label1: "Axis".to_string(),
            label2: "Allies".to_string(),
            tickets1: Some(200),
            tickets2: Some(150),
            players: players
                .iter()
                .map(|(name, label)| PlayerObservation {
                    player_name: name.to_string(),
                    team_label: label.to_string(),
                })
                .collect(),
        }
    }

    fn roster(team_id: i64, name: &str, members: &[&str]) -> Roster {
        Roster {
            team_id,
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_maps_labels_to_overlapping_rosters() {
        let round = round(&[("p1", "Axis"), ("p2", "Axis"), ("p3", "Allies"), ("p4", "Allies")]);
        let rosters = vec![
            roster(10, "Red", &["p1", "p2", "p5"]),
            roster(20, "Blue", &["p3"]),
        ];

        let resolution = resolve_teams(&round, &rosters).unwrap();

        assert_eq!(resolution.team1_id, 10);
        assert_eq!(resolution.team2_id, 20);
        let red = resolution.score_of(10).unwrap();
        assert_eq!((red.score_a, red.score_b), (2, 0));
        let blue = resolution.score_of(20).unwrap();
        assert_eq!((blue.score_a, blue.score_b), (0, 1));
        assert_eq!(red.confidence_a(), 1.0);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let round = round(&[("a", "Axis"), ("b", "Allies"), ("c", "Axis"), ("d", "Allies")]);
        let rosters = vec![
            roster(1, "One", &["a", "b"]),
            roster(2, "Two", &["c", "d"]),
            roster(3, "Three", &["a", "d"]),
        ];

        let first = resolve_teams(&round, &rosters).unwrap();
        for _ in 0..20 {
            assert_eq!(resolve_teams(&round, &rosters).unwrap(), first);
        }
    }

    #[test]
    fn test_score_ties_broken_by_margin() {
        // "Mixed" and "Clean" each have one Axis player, but "Clean" has nobody on Allies
        let round = round(&[("a", "Axis"), ("b", "Axis"), ("c", "Allies"), ("d", "Allies")]);
        let rosters = vec![
            roster(1, "Mixed", &["a", "c"]),
            roster(2, "Clean", &["b"]),
            roster(3, "Other", &["d"]),
        ];

        let resolution = resolve_teams(&round, &rosters).unwrap();

        assert_eq!(resolution.team1_id, 2);
        // "Other" and "Mixed" both have one Allies player; "Other" has the cleaner margin
        assert_eq!(resolution.team2_id, 3);
    }

    #[test]
    fn test_second_team_excludes_first_pick() {
        // Roster 1 dominates both labels; label B must go to someone else
        let round = round(&[("a", "Axis"), ("b", "Allies"), ("c", "Allies"), ("d", "Allies")]);
        let rosters = vec![roster(1, "Big", &["a", "b", "c"]), roster(2, "Small", &["d"])];

        let resolution = resolve_teams(&round, &rosters).unwrap();

        assert_eq!(resolution.team1_id, 1);
        assert_eq!(resolution.team2_id, 2);
    }

    #[test]
    fn test_single_viable_roster_is_unresolvable() {
        let round = round(&[("p1", "Axis"), ("p3", "Allies")]);
        let rosters = vec![roster(1, "Red", &["p1", "p3"]), roster(2, "Blue", &["zz"])];

        assert_eq!(
            resolve_teams(&round, &rosters),
            Err(Unresolvable::InsufficientSignal { viable: 1 })
        );
    }

    #[test]
    fn test_empty_inputs_fail() {
        let empty_round = round(&[]);
        let rosters = vec![roster(1, "Red", &["p1"])];
        assert_eq!(resolve_teams(&empty_round, &rosters), Err(Unresolvable::NoParticipants));

        let round = round(&[("p1", "Axis")]);
        assert_eq!(resolve_teams(&round, &[]), Err(Unresolvable::NoRosters));
    }

    #[test]
    fn test_unknown_labels_are_ignored() {
        let round = round(&[("p1", "Spectator"), ("p2", "Axis"), ("p3", "Allies")]);
        let rosters = vec![
            roster(1, "Red", &["p1", "p2"]),
            roster(2, "Blue", &["p3"]),
            roster(3, "Ghosts", &["p1"]),
        ];

        let resolution = resolve_teams(&round, &rosters).unwrap();

        assert_eq!(resolution.scores.len(), 2);
        assert!(resolution.score_of(3).is_none());
    }
}
