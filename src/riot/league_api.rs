use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::riot::ranks::{Division, Tier};
use crate::riot::riot_id::RiotId;
use crate::{fmt, Error};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub id: String,
    pub puuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: Tier,
    #[serde(rename = "rank")]
    pub division: Division,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub hot_streak: bool,
}

/// Thin typed client for the three Riot lookups the leaderboard needs.
///
/// Every lookup maps a non-success response to `Ok(None)` after logging the
/// status and body; callers treat that, like any transport error, as "skip
/// this player for the cycle".
#[derive(Clone, Debug)]
pub struct LeagueApi {
    http: reqwest::Client,
    api_key: String,
    account_host: String,
    platform_host: String,
}

impl LeagueApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.riot_api_key.clone(),
            account_host: config.account_host.clone(),
            platform_host: config.platform_host.clone(),
        }
    }

    /// Resolves a `name#tag` handle to the account's PUUID.
    pub async fn account_by_riot_id(&self, id: &RiotId) -> Result<Option<AccountDto>, Error> {
        let url = fmt!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.account_host,
            id.game_name,
            id.tag_line
        );
        info!(player = %id, url, "Fetching Riot account");
        let response = self
            .http
            .get(&url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(player = %id, %status, body, "Account lookup failed");
            return Ok(None);
        }

        Ok(Some(response.json::<AccountDto>().await?))
    }

    /// Resolves a PUUID to the platform-scoped summoner record.
    pub async fn summoner_by_puuid(&self, puuid: &str) -> Result<Option<SummonerDto>, Error> {
        let url = fmt!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_host,
            puuid
        );
        info!(puuid, url, "Fetching summoner record");
        let response = self
            .http
            .get(&url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(puuid, %status, body, "Summoner lookup failed");
            return Ok(None);
        }

        Ok(Some(response.json::<SummonerDto>().await?))
    }

    /// Returns all ranked-queue entries for a summoner. A summoner with no
    /// ranked standing yields an empty list, not a failure.
    pub async fn entries_by_summoner(
        &self,
        summoner_id: &str,
    ) -> Result<Option<Vec<LeagueEntryDto>>, Error> {
        let url = fmt!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            self.platform_host,
            summoner_id
        );
        info!(summoner_id, url, "Fetching league entries");
        let response = self
            .http
            .get(&url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(summoner_id, %status, body, "League entries lookup failed");
            return Ok(None);
        }

        let entries = response.json::<Vec<LeagueEntryDto>>().await?;
        info!(summoner_id, count = entries.len(), "Fetched league entries");
        Ok(Some(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::ranks::SOLO_QUEUE;

    #[test]
    fn league_entry_deserializes_riot_payload() {
        let json = r#"{
            "leagueId": "c0bd2345-1111-2222-3333-444455556666",
            "queueType": "RANKED_SOLO_5x5",
            "tier": "PLATINUM",
            "rank": "IV",
            "summonerId": "abc123",
            "leaguePoints": 57,
            "wins": 41,
            "losses": 38,
            "veteran": false,
            "inactive": false,
            "freshBlood": true,
            "hotStreak": true
        }"#;

        let entry: LeagueEntryDto = serde_json::from_str(json).unwrap();
        assert_eq!(entry.queue_type, SOLO_QUEUE);
        assert_eq!(entry.tier, Tier::Platinum);
        assert_eq!(entry.division, Division::IV);
        assert_eq!(entry.league_points, 57);
        assert_eq!(entry.wins, 41);
        assert_eq!(entry.losses, 38);
        assert!(entry.hot_streak);
    }

    #[test]
    fn account_and_summoner_deserialize() {
        let account: AccountDto = serde_json::from_str(
            r#"{"puuid": "p-123", "gameName": "Faker", "tagLine": "KR1"}"#,
        )
        .unwrap();
        assert_eq!(account.puuid, "p-123");

        let summoner: SummonerDto = serde_json::from_str(
            r#"{"id": "enc-1", "accountId": "acc-1", "puuid": "p-123",
                "profileIconId": 10, "revisionDate": 0, "summonerLevel": 431}"#,
        )
        .unwrap();
        assert_eq!(summoner.id, "enc-1");
        assert_eq!(summoner.puuid, "p-123");
    }
}
