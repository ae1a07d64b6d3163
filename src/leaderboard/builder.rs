use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::riot::league_api::{LeagueApi, LeagueEntryDto};
use crate::riot::ranks::{Division, Tier, SOLO_QUEUE};
use crate::store::{Roster, TrackedPlayer};
use crate::Error;

/// One row of the rendered leaderboard. Derived fresh each cycle, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub riot_id: String,
    pub tier: Tier,
    pub division: Division,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub hot_streak: bool,
}

impl RankedEntry {
    fn standing(&self) -> (Tier, Division, i32) {
        (self.tier, self.division, self.league_points)
    }
}

/// Fetches standings for every tracked player and returns the sorted,
/// truncated leaderboard. A failed lookup only drops the affected player.
pub async fn build(api: &LeagueApi, roster: &Roster, concurrency: usize) -> Vec<RankedEntry> {
    info!(
        players = roster.players.len(),
        limit = roster.limit,
        "Building leaderboard"
    );

    let entries: Vec<RankedEntry> = stream::iter(roster.players.clone())
        .map(|player| async move { fetch_player_entry(api, &player).await })
        // buffered, not buffer_unordered: roster order is the tie-break.
        .buffered(concurrency)
        .collect::<Vec<Option<RankedEntry>>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    info!(resolved = entries.len(), "Collected ranked standings");
    rank_entries(entries, roster.limit)
}

/// Stable descending sort on (tier, division, LP), then truncation. Exact
/// ties keep roster order.
pub fn rank_entries(mut entries: Vec<RankedEntry>, limit: usize) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.standing().cmp(&a.standing()));
    entries.truncate(limit);
    entries
}

/// Runs the three-step lookup chain for one player. Misses and errors both
/// collapse into `None` so one bad player never aborts the cycle.
async fn fetch_player_entry(api: &LeagueApi, player: &TrackedPlayer) -> Option<RankedEntry> {
    let riot_id = player.riot_id();

    let result: Result<Option<RankedEntry>, Error> = async {
        let Some(account) = api.account_by_riot_id(&riot_id).await? else {
            return Ok(None);
        };
        let Some(summoner) = api.summoner_by_puuid(&account.puuid).await? else {
            return Ok(None);
        };
        let Some(entries) = api.entries_by_summoner(&summoner.id).await? else {
            return Ok(None);
        };

        Ok(solo_queue_entry(entries).map(|entry| RankedEntry {
            riot_id: riot_id.to_string(),
            tier: entry.tier,
            division: entry.division,
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            hot_streak: entry.hot_streak,
        }))
    }
    .await;

    match result {
        Ok(Some(entry)) => Some(entry),
        Ok(None) => {
            info!(player = %riot_id, "No solo queue standing this cycle, player skipped");
            None
        }
        Err(e) => {
            warn!(player = %riot_id, error = %e, "Lookup chain failed, skipping player");
            None
        }
    }
}

fn solo_queue_entry(entries: Vec<LeagueEntryDto>) -> Option<LeagueEntryDto> {
    entries.into_iter().find(|e| e.queue_type == SOLO_QUEUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(riot_id: &str, tier: Tier, division: Division, lp: i32) -> RankedEntry {
        RankedEntry {
            riot_id: riot_id.to_string(),
            tier,
            division,
            league_points: lp,
            wins: 0,
            losses: 0,
            hot_streak: false,
        }
    }

    #[test]
    fn tier_dominates_division_dominates_lp() {
        let entries = vec![
            entry("P1#1", Tier::Gold, Division::II, 40),
            entry("P2#1", Tier::Gold, Division::I, 10),
            entry("P3#1", Tier::Platinum, Division::IV, 0),
        ];

        let ranked = rank_entries(entries, 10);
        let order: Vec<&str> = ranked.iter().map(|e| e.riot_id.as_str()).collect();
        assert_eq!(order, ["P3#1", "P2#1", "P1#1"]);
    }

    #[test]
    fn truncates_to_the_display_limit() {
        let entries = vec![
            entry("P1#1", Tier::Gold, Division::II, 40),
            entry("P2#1", Tier::Gold, Division::I, 10),
            entry("P3#1", Tier::Platinum, Division::IV, 0),
        ];

        let ranked = rank_entries(entries, 2);
        let order: Vec<&str> = ranked.iter().map(|e| e.riot_id.as_str()).collect();
        assert_eq!(order, ["P3#1", "P2#1"]);
    }

    #[test]
    fn zero_limit_yields_an_empty_board() {
        let entries = vec![entry("P1#1", Tier::Gold, Division::II, 40)];
        assert!(rank_entries(entries, 0).is_empty());
    }

    #[test]
    fn exact_ties_keep_roster_order() {
        let entries = vec![
            entry("First#1", Tier::Silver, Division::III, 50),
            entry("Second#1", Tier::Silver, Division::III, 50),
            entry("Third#1", Tier::Silver, Division::III, 50),
        ];

        let ranked = rank_entries(entries, 10);
        let order: Vec<&str> = ranked.iter().map(|e| e.riot_id.as_str()).collect();
        assert_eq!(order, ["First#1", "Second#1", "Third#1"]);
    }

    #[test]
    fn higher_lp_wins_within_a_division() {
        let entries = vec![
            entry("Low#1", Tier::Diamond, Division::I, 20),
            entry("High#1", Tier::Diamond, Division::I, 75),
        ];

        let ranked = rank_entries(entries, 10);
        assert_eq!(ranked[0].riot_id, "High#1");
    }

    fn league_entry(queue_type: &str) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue_type.to_string(),
            tier: Tier::Gold,
            division: Division::I,
            league_points: 1,
            wins: 1,
            losses: 1,
            hot_streak: false,
        }
    }

    #[test]
    fn selects_only_the_solo_queue_entry() {
        let entries = vec![
            league_entry("RANKED_FLEX_SR"),
            league_entry(SOLO_QUEUE),
        ];
        assert_eq!(
            solo_queue_entry(entries).map(|e| e.queue_type),
            Some(SOLO_QUEUE.to_string())
        );
    }

    #[test]
    fn flex_only_players_are_excluded() {
        let entries = vec![league_entry("RANKED_FLEX_SR")];
        assert!(solo_queue_entry(entries).is_none());
    }
}
