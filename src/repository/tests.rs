#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use super::{MissionRepository, MissionStore, StoreFuture};
use crate::error::WorkforceError;
use crate::store::RecordStore;
use crate::types::mission::fixtures::{coding_mission, writing_mission};
use crate::types::{AgentTool, DomainPayload, Mission, MissionId, MissionStatus, SelectedAgent};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct FakeStore {
    records: Arc<Mutex<HashMap<MissionId, Mission>>>,
    ready: Arc<Mutex<bool>>,
    reject_writes: Arc<Mutex<bool>>,
    writes: Arc<Mutex<u32>>,
}

impl FakeStore {
    async fn opened() -> Self {
        let store = Self::default();
        *store.ready.lock().await = true;
        store
    }

    async fn with_rejected_writes(self) -> Self {
        *self.reject_writes.lock().await = true;
        self
    }

    async fn check_ready(&self) -> Result<(), WorkforceError> {
        if *self.ready.lock().await {
            Ok(())
        } else {
            Err(WorkforceError::NotReady)
        }
    }

    async fn write_count(&self) -> u32 {
        *self.writes.lock().await
    }

    async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

impl MissionStore for FakeStore {
    fn put_mission<'a>(&'a self, mission: &'a Mission) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_ready().await?;
            if *self.reject_writes.lock().await {
                return Err(WorkforceError::storage("put_mission", "quota exceeded"));
            }
            *self.writes.lock().await += 1;
            self.records
                .lock()
                .await
                .insert(mission.mission_id.clone(), mission.clone());
            Ok(())
        })
    }

    fn get_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, Option<Mission>> {
        Box::pin(async move {
            self.check_ready().await?;
            Ok(self.records.lock().await.get(id).cloned())
        })
    }

    fn delete_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_ready().await?;
            self.records.lock().await.remove(id);
            Ok(())
        })
    }

    fn list_missions(&self) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(async move {
            self.check_ready().await?;
            Ok(self.records.lock().await.values().cloned().collect())
        })
    }

    fn list_missions_by_status(&self, status: MissionStatus) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(async move {
            self.check_ready().await?;
            Ok(self
                .records
                .lock()
                .await
                .values()
                .filter(|m| m.status == status)
                .cloned()
                .collect())
        })
    }

    fn list_missions_recent(&self) -> StoreFuture<'_, Vec<Mission>> {
        Box::pin(async move {
            let mut missions = self.list_missions().await?;
            missions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(missions)
        })
    }
}

fn team() -> Vec<SelectedAgent> {
    vec![
        SelectedAgent::new(
            "phase-1",
            "Research",
            AgentTool::new("Perplexity", "https://www.perplexity.ai"),
        ),
        SelectedAgent::new("phase-2", "Drafting", AgentTool::new("Claude", "https://claude.ai")),
    ]
}

#[tokio::test]
async fn save_then_get_returns_equal_record() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mission = writing_mission("round trip");

    repo.save(&mission).await.unwrap();

    assert_eq!(repo.get_by_id(&mission.mission_id).await.unwrap(), Some(mission));
}

#[tokio::test]
async fn saving_twice_is_idempotent() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mission = coding_mission("twice");

    repo.save(&mission).await.unwrap();
    let once = repo.list_all().await.unwrap();
    repo.save(&mission).await.unwrap();
    let twice = repo.list_all().await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(repo.store().len().await, 1);
}

#[tokio::test]
async fn update_is_full_overwrite() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mut mission = writing_mission("v1");
    mission.ai_team = Some(team());
    repo.save(&mission).await.unwrap();

    mission.ai_team = None;
    mission.description = String::new();
    repo.update(&mission).await.unwrap();

    let stored = repo.get_by_id(&mission.mission_id).await.unwrap().unwrap();
    assert_eq!(stored.ai_team, None);
    assert!(stored.description.is_empty());
}

#[tokio::test]
async fn delete_twice_then_get_is_not_found() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mission = writing_mission("gone");
    repo.save(&mission).await.unwrap();

    repo.delete(&mission.mission_id).await.unwrap();
    repo.delete(&mission.mission_id).await.unwrap();

    assert_eq!(repo.get_by_id(&mission.mission_id).await.unwrap(), None);
}

#[tokio::test]
async fn unopened_store_surfaces_not_ready() {
    let repo = MissionRepository::new(FakeStore::default());
    let mission = writing_mission("early");

    assert!(matches!(repo.save(&mission).await, Err(WorkforceError::NotReady)));
    assert!(matches!(
        repo.create_mission(&mission).await,
        Err(WorkforceError::NotReady)
    ));
    assert!(matches!(repo.list_all().await, Err(WorkforceError::NotReady)));
}

#[tokio::test]
async fn rejected_write_is_storage_failure() {
    let repo = MissionRepository::new(FakeStore::opened().await.with_rejected_writes().await);
    let result = repo.save(&writing_mission("full disk")).await;
    assert!(matches!(result, Err(WorkforceError::StorageFailure(msg)) if msg.contains("quota")));
}

#[tokio::test]
async fn create_without_id_is_invalid_and_writes_nothing() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mut mission = writing_mission("anonymous");
    mission.mission_id = MissionId::new("");

    let result = repo.create_mission(&mission).await;

    assert!(matches!(result, Err(WorkforceError::InvalidMission(_))));
    assert_eq!(repo.store().write_count().await, 0);
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_mission_also_validates() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mut mission = coding_mission("nameless");
    mission.name = "  ".to_string();
    assert!(matches!(
        repo.update_mission(&mission).await,
        Err(WorkforceError::InvalidMission(_))
    ));
}

#[tokio::test]
async fn assigning_agents_requires_existing_record() {
    let repo = MissionRepository::new(FakeStore::opened().await);

    assert!(matches!(
        repo.add_selected_agents_to_mission(&MissionId::new("missing"), team())
            .await,
        Err(WorkforceError::NotFound(id)) if id == "missing"
    ));
    assert!(matches!(
        repo.add_selected_agents_to_mission(&MissionId::new(""), team()).await,
        Err(WorkforceError::InvalidMission(_))
    ));
}

#[tokio::test]
async fn assigning_agents_replaces_team_and_touches_timestamp() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mut mission = writing_mission("staffed");
    mission.updated_at = None;
    repo.create_mission(&mission).await.unwrap();

    let updated = repo
        .add_selected_agents_to_mission(&mission.mission_id, team())
        .await
        .unwrap();

    assert_eq!(updated.created_at, mission.created_at);
    assert!(updated.updated_at.is_some());
    let stored = repo.get_by_id(&mission.mission_id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(
        stored
            .ai_team
            .unwrap()
            .iter()
            .map(|s| s.agent.name.as_str())
            .collect::<Vec<_>>(),
        ["Perplexity", "Claude"]
    );
}

#[tokio::test]
async fn status_changes_are_persisted() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mission = coding_mission("lifecycle");
    repo.create_mission(&mission).await.unwrap();

    repo.set_status(&mission.mission_id, MissionStatus::Active)
        .await
        .unwrap();

    let active = repo.list_by_status(MissionStatus::Active).await.unwrap();
    assert_eq!(active.len(), 1);
    assert!(repo
        .list_by_status(MissionStatus::Draft)
        .await
        .unwrap()
        .is_empty());
}

fn with_loose_reference(mut mission: Mission) -> Mission {
    if let DomainPayload::Writing(writing) = &mut mission.domain {
        writing.context_schema.references = vec!["see the style guide".to_string()];
    }
    mission
}

#[tokio::test]
async fn assigning_agents_to_a_plainly_saved_record_skips_validation() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mission = with_loose_reference(writing_mission("imported"));
    assert!(mission.validate().is_err());
    repo.save(&mission).await.unwrap();

    let updated = repo
        .add_selected_agents_to_mission(&mission.mission_id, team())
        .await
        .unwrap();

    assert_eq!(updated.ai_team.as_ref().map(Vec::len), Some(2));
    assert_eq!(updated.domain, mission.domain);
    assert_eq!(
        repo.get_by_id(&mission.mission_id).await.unwrap(),
        Some(updated)
    );
}

#[tokio::test]
async fn status_change_on_updated_record_skips_validation() {
    let repo = MissionRepository::new(FakeStore::opened().await);
    let mut mission = coding_mission("renamed");
    repo.save(&mission).await.unwrap();
    mission.name = String::new();
    repo.update(&mission).await.unwrap();

    let completed = repo
        .set_status(&mission.mission_id, MissionStatus::Completed)
        .await
        .unwrap();

    assert_eq!(completed.status, MissionStatus::Completed);
    assert!(completed.name.is_empty());
    assert_eq!(
        repo.list_by_status(MissionStatus::Completed)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(matches!(
        repo.set_status(&MissionId::new("missing"), MissionStatus::Active)
            .await,
        Err(WorkforceError::NotFound(id)) if id == "missing"
    ));
}

#[tokio::test]
async fn repository_works_over_the_sqlite_store() {
    let store = RecordStore::in_memory();
    let repo = MissionRepository::new(&store);
    let mission = coding_mission("sqlite");

    assert!(matches!(
        repo.create_mission(&mission).await,
        Err(WorkforceError::NotReady)
    ));

    store.open().await.unwrap();
    repo.create_mission(&mission).await.unwrap();
    let updated = repo
        .add_selected_agents_to_mission(&mission.mission_id, team())
        .await
        .unwrap();

    assert_eq!(repo.get_by_id(&mission.mission_id).await.unwrap(), Some(updated));
    assert_eq!(repo.list_recent().await.unwrap().len(), 1);
}
