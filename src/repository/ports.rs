use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Mission, MissionId, MissionStatus};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Keyed persistence the repository writes through. Implementations report
/// `NotReady` until they can serve requests and `StorageFailure` when the
/// backend rejects a call; absence is `Ok(None)`, never an error.
pub trait MissionStore: Send + Sync {
    fn put_mission<'a>(&'a self, mission: &'a Mission) -> StoreFuture<'a, ()>;

    fn get_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, Option<Mission>>;

    fn delete_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, ()>;

    fn list_missions(&self) -> StoreFuture<'_, Vec<Mission>>;

    fn list_missions_by_status(&self, status: MissionStatus) -> StoreFuture<'_, Vec<Mission>>;

    fn list_missions_recent(&self) -> StoreFuture<'_, Vec<Mission>>;
}

impl<S: MissionStore + ?Sized> MissionStore for &S {
    fn put_mission<'a>(&'a self, mission: &'a Mission) -> StoreFuture<'a, ()> {
        (**self).put_mission(mission)
    }

    fn get_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, Option<Mission>> {
        (**self).get_mission(id)
    }

    fn delete_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, ()> {
        (**self).delete_mission(id)
    }

    fn list_missions(&self) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions()
    }

    fn list_missions_by_status(&self, status: MissionStatus) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions_by_status(status)
    }

    fn list_missions_recent(&self) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions_recent()
    }
}

impl<S: MissionStore + ?Sized> MissionStore for Arc<S> {
    fn put_mission<'a>(&'a self, mission: &'a Mission) -> StoreFuture<'a, ()> {
        (**self).put_mission(mission)
    }

    fn get_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, Option<Mission>> {
        (**self).get_mission(id)
    }

    fn delete_mission<'a>(&'a self, id: &'a MissionId) -> StoreFuture<'a, ()> {
        (**self).delete_mission(id)
    }

    fn list_missions(&self) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions()
    }

    fn list_missions_by_status(&self, status: MissionStatus) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions_by_status(status)
    }

    fn list_missions_recent(&self) -> StoreFuture<'_, Vec<Mission>> {
        (**self).list_missions_recent()
    }
}
