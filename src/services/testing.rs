use crate::database::{self, create_memory_pool, setup, DbPool};
use crate::domain::{MatchId, PlayerObservation, RoundId, TeamId, TournamentId};

/// A tournament with three rosters and matches spread over two weeks
pub struct Seeded {
    pub pool: DbPool,
    pub tournament_id: TournamentId,
    pub red: TeamId,
    pub blue: TeamId,
    pub green: TeamId,
    pub w1_red_blue: MatchId,
    pub w1_red_green: MatchId,
    pub w2_blue_green: MatchId,
    pub unscheduled: MatchId,
}

pub fn seed() -> Seeded {
    let pool = create_memory_pool().unwrap();
    let conn = database::get_connection(&pool).unwrap();
    setup::reset_database(&conn).unwrap();

    let tournament = database::tournaments::insert_tournament(&conn, "Spring Cup").unwrap();
    let team = |name: &str, members: &[&str]| {
        let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
        database::teams::insert_team(&conn, tournament.id, name, &members)
            .unwrap()
            .id
    };
    let red = team("Red", &["p1", "p2", "p5"]);
    let blue = team("Blue", &["p3", "p4"]);
    let green = team("Green", &["p6", "p7"]);

    let scheduled = |week: Option<&str>, team1: TeamId, team2: TeamId| {
        database::matches::insert_match(&conn, tournament.id, week, team1, team2)
            .unwrap()
            .id
    };
    let w1_red_blue = scheduled(Some("W1"), red, blue);
    let w1_red_green = scheduled(Some("W1"), red, green);
    let w2_blue_green = scheduled(Some("W2"), blue, green);
    let unscheduled = scheduled(None, red, green);

    drop(conn);
    Seeded {
        pool,
        tournament_id: tournament.id,
        red,
        blue,
        green,
        w1_red_blue,
        w1_red_green,
        w2_blue_green,
        unscheduled,
    }
}

/// Stores a round with "Axis"/"Allies" labels
pub fn insert_round(
    pool: &DbPool,
    axis: &[&str],
    allies: &[&str],
    tickets1: Option<i32>,
    tickets2: Option<i32>,
) -> RoundId {
    let players: Vec<PlayerObservation> = axis
        .iter()
        .map(|name| (name, "Axis"))
        .chain(allies.iter().map(|name| (name, "Allies")))
        .map(|(name, label)| PlayerObservation {
            player_name: name.to_string(),
            team_label: label.to_string(),
        })
        .collect();

    let conn = database::get_connection(pool).unwrap();
    database::rounds::insert_round(&conn, "Axis", "Allies", tickets1, tickets2, &players, None)
        .unwrap()
        .id
}
