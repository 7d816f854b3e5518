#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod ports;

use tracing::debug;

use crate::error::{Result, WorkforceError};
use crate::types::{Mission, MissionId, MissionStatus, SelectedAgent};

pub use ports::{MissionStore, StoreFuture};

/// Typed CRUD over an injected [`MissionStore`].
///
/// `save` and `update` are both full-record overwrites. There is no merge and
/// no concurrency guard: callers that read-modify-write the same mission must
/// await each write before issuing the next.
pub struct MissionRepository<S> {
    store: S,
}

impl<S: MissionStore> MissionRepository<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Inserts or replaces the record at `mission.mission_id`.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` if the store is not open, or
    /// `WorkforceError::StorageFailure` if the write is rejected.
    pub async fn save(&self, mission: &Mission) -> Result<()> {
        debug!("save mission {}", mission.mission_id);
        self.store.put_mission(mission).await
    }

    /// `Ok(None)` when no record exists.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn get_by_id(&self, id: &MissionId) -> Result<Option<Mission>> {
        self.store.get_mission(id).await
    }

    /// Same as [`MissionRepository::save`].
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn update(&self, mission: &Mission) -> Result<()> {
        self.save(mission).await
    }

    /// Deleting an absent id succeeds.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn delete(&self, id: &MissionId) -> Result<()> {
        debug!("delete mission {id}");
        self.store.delete_mission(id).await
    }

    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn list_all(&self) -> Result<Vec<Mission>> {
        self.store.list_missions().await
    }

    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn list_by_status(&self, status: MissionStatus) -> Result<Vec<Mission>> {
        self.store.list_missions_by_status(status).await
    }

    /// Newest `created_at` first.
    ///
    /// # Errors
    /// Returns `WorkforceError::NotReady` or `WorkforceError::StorageFailure`.
    pub async fn list_recent(&self) -> Result<Vec<Mission>> {
        self.store.list_missions_recent().await
    }

    /// Validates then saves a new mission. Nothing is written when
    /// validation fails.
    ///
    /// # Errors
    /// Returns `WorkforceError::InvalidMission` if [`Mission::validate`]
    /// rejects the record, otherwise the errors of `save`.
    pub async fn create_mission(&self, mission: &Mission) -> Result<()> {
        mission.validate()?;
        self.save(mission).await
    }

    /// Validates then overwrites an existing mission record.
    ///
    /// # Errors
    /// Same as [`MissionRepository::create_mission`].
    pub async fn update_mission(&self, mission: &Mission) -> Result<()> {
        mission.validate()?;
        self.update(mission).await
    }

    /// Replaces the mission's agent team and refreshes `updated_at`. The rest
    /// of the stored record is written back as read, without validation.
    ///
    /// # Errors
    /// Returns `WorkforceError::InvalidMission` for a blank id,
    /// `WorkforceError::NotFound` if no record exists, otherwise the errors of
    /// `update`.
    pub async fn add_selected_agents_to_mission(
        &self,
        id: &MissionId,
        team: Vec<SelectedAgent>,
    ) -> Result<Mission> {
        let mut mission = self.require(id).await?;
        debug!("assign {} agent(s) to mission {id}", team.len());
        mission.ai_team = Some(team);
        mission.touch();
        self.update(&mission).await?;
        Ok(mission)
    }

    /// Moves a mission to another lifecycle status.
    ///
    /// # Errors
    /// Same as [`MissionRepository::add_selected_agents_to_mission`].
    pub async fn set_status(&self, id: &MissionId, status: MissionStatus) -> Result<Mission> {
        let mut mission = self.require(id).await?;
        debug!("mission {id}: {} -> {status}", mission.status);
        mission.status = status;
        mission.touch();
        self.update(&mission).await?;
        Ok(mission)
    }

    async fn require(&self, id: &MissionId) -> Result<Mission> {
        if id.is_blank() {
            return Err(WorkforceError::InvalidMission(
                "mission_id is required".to_string(),
            ));
        }
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WorkforceError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests;
