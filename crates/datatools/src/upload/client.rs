use std::time::Duration;

use storage::models::{Achievement, AthleteKey, DisciplineState};
use tracing::warn;

use super::models::{AthleteUpload, GroupMemberUpdate, GroupUpload, TimetableFile};
use crate::error::Result;

/// Client for the event API. Every call reports plain success or failure;
/// a failed record never aborts the batch, that is the caller's contract.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    retry_pause: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            retry_pause: Duration::from_secs(1),
        }
    }

    /// Overrides the pause before the single retry. Tests shrink this.
    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    pub async fn create_athlete(&self, athlete: &AthleteUpload) -> Result<bool> {
        let url = format!("{}/api/athlete", self.base_url);
        let response = self.client.post(&url).json(athlete).send().await?;
        Ok(response.status().is_success())
    }

    /// Splices an athlete into a group roster. A failed attempt is retried
    /// exactly once after a fixed pause, then reported as failure.
    pub async fn add_group_member(&self, group_name: &str, member: &AthleteKey) -> Result<bool> {
        let body = GroupMemberUpdate {
            athlete_ids: vec![member.clone()],
        };

        if self.put_group(group_name, &body).await? {
            return Ok(true);
        }
        tokio::time::sleep(self.retry_pause).await;
        self.put_group(group_name, &body).await
    }

    async fn put_group(&self, group_name: &str, body: &GroupMemberUpdate) -> Result<bool> {
        let url = format!("{}/api/group", self.base_url);
        let response = self
            .client
            .put(&url)
            .query(&[("name", group_name)])
            .json(body)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    pub async fn create_group(&self, group: &GroupUpload) -> Result<bool> {
        let url = format!("{}/api/group", self.base_url);
        let response = self.client.post(&url).json(group).send().await?;
        Ok(response.status().is_success())
    }

    pub async fn create_achievement(
        &self,
        key: &AthleteKey,
        achievement: &Achievement,
    ) -> Result<bool> {
        let url = format!("{}/api/achievement", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("name", key.name.as_str()), ("surname", key.surname.as_str())])
            .json(achievement)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    /// Uploads the timetable, then creates every group it schedules with
    /// the competition type implied by its discipline count.
    pub async fn upload_timetable(&self, timetable: &TimetableFile) -> Result<bool> {
        let url = format!("{}/api/time_table", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(timetable.as_value())
            .send()
            .await?;
        if !response.status().is_success() {
            return Ok(false);
        }

        let mut all_created = true;
        for (name, competition_type) in timetable.group_competition_types() {
            let Some(competition_type) = competition_type else {
                warn!("group '{name}' has a discipline count without a competition type");
                all_created = false;
                continue;
            };
            let created = self
                .create_group(&GroupUpload {
                    name: name.clone(),
                    athlete_ids: Vec::new(),
                    competition_type,
                })
                .await?;
            if !created {
                warn!("group '{name}' not created");
            }
            all_created &= created;
        }

        Ok(all_created)
    }

    pub async fn set_discipline_state(
        &self,
        group_name: &str,
        state: DisciplineState,
    ) -> Result<bool> {
        let url = format!("{}/api/discipline_state", self.base_url);
        let response = self
            .client
            .put(&url)
            .query(&[("name", group_name)])
            .json(&state)
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}
