//! Campaign repository contracts and SQLite implementation.

use crate::model::campaign::{Campaign, CampaignId};
use crate::repo::{parse_positive_u32, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

const CAMPAIGN_SELECT_SQL: &str = "SELECT
    id,
    name,
    campaign_start,
    campaign_weeks
FROM campaigns";

/// Repository interface for ad campaign storage.
pub trait CampaignRepository {
    fn create_campaign(&self, campaign: &Campaign) -> RepoResult<CampaignId>;
    fn get_campaign(&self, id: CampaignId) -> RepoResult<Option<Campaign>>;
    /// All campaigns, most recently started first.
    fn list_campaigns(&self) -> RepoResult<Vec<Campaign>>;
}

/// SQLite-backed campaign repository.
pub struct SqliteCampaignRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCampaignRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CampaignRepository for SqliteCampaignRepository<'_> {
    fn create_campaign(&self, campaign: &Campaign) -> RepoResult<CampaignId> {
        campaign.validate()?;

        self.conn.execute(
            "INSERT INTO campaigns (id, name, campaign_start, campaign_weeks)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                campaign.id.to_string(),
                campaign.name.as_str(),
                campaign.campaign_start,
                i64::from(campaign.campaign_weeks),
            ],
        )?;

        Ok(campaign.id)
    }

    fn get_campaign(&self, id: CampaignId) -> RepoResult<Option<Campaign>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAMPAIGN_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_campaign_row(row)?));
        }
        Ok(None)
    }

    fn list_campaigns(&self) -> RepoResult<Vec<Campaign>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CAMPAIGN_SELECT_SQL} ORDER BY campaign_start DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut campaigns = Vec::new();
        while let Some(row) = rows.next()? {
            campaigns.push(parse_campaign_row(row)?);
        }
        Ok(campaigns)
    }
}

fn parse_campaign_row(row: &Row<'_>) -> RepoResult<Campaign> {
    let id_text: String = row.get("id")?;
    let campaign = Campaign {
        id: parse_uuid(&id_text, "campaigns.id")?,
        name: row.get("name")?,
        campaign_start: row.get("campaign_start")?,
        campaign_weeks: parse_positive_u32(
            row.get::<_, i64>("campaign_weeks")?,
            "campaigns.campaign_weeks",
        )?,
    };
    campaign.validate()?;
    Ok(campaign)
}
