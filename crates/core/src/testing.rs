//! In-memory store used by the unit tests of the tracker and admin editor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::store::{ActivityStore, BackendError, UseCaseStore};
use crate::types::{DbId, Timestamp};
use crate::use_case::{UseCase, UseCaseDraft};

#[derive(Default)]
struct State {
    next_id: DbId,
    /// Logical clock so ordering by time is deterministic.
    tick: i64,
    use_cases: Vec<UseCase>,
    favorites: Vec<(DbId, DbId, i64)>,
    recent: Vec<(DbId, DbId, i64)>,
    calls: Vec<&'static str>,
    /// A single store call that fails while every other call succeeds.
    failing_call: Option<&'static str>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a [`BackendError`].
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Make only the named store call fail, e.g. `"list_all"`.
    pub fn fail_on(&self, call: &'static str) {
        self.state.lock().unwrap().failing_call = Some(call);
    }

    /// Seed a use case directly, bypassing validation.
    pub fn seed(&self, title: &str, tags: &[&str], category: &str) -> DbId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.tick += 1;
        let id = state.next_id;
        let at = at_tick(state.tick);
        state.use_cases.push(UseCase {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            href: "#".to_string(),
            image: String::new(),
            created_at: at,
            updated_at: at,
        });
        id
    }

    /// Remove a use case without touching favorites or recent views.
    pub fn remove_use_case(&self, id: DbId) {
        self.state.lock().unwrap().use_cases.retain(|uc| uc.id != id);
    }

    pub fn favorite_rows(&self, user_id: DbId) -> Vec<DbId> {
        let state = self.state.lock().unwrap();
        state
            .favorites
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .map(|(_, c, _)| *c)
            .collect()
    }

    pub fn recent_rows(&self, user_id: DbId) -> Vec<(DbId, i64)> {
        let state = self.state.lock().unwrap();
        state
            .recent
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .map(|(_, c, t)| (*c, *t))
            .collect()
    }

    /// Names of the store calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, State>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if self.fail.load(Ordering::SeqCst) || state.failing_call == Some(call) {
            return Err(BackendError::new(format!("{call} failed")));
        }
        Ok(state)
    }
}

fn at_tick(tick: i64) -> Timestamp {
    Utc::now() + Duration::seconds(tick)
}

#[async_trait]
impl UseCaseStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<UseCase>, BackendError> {
        let state = self.enter("list_all")?;
        let mut all = state.use_cases.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get_by_ids(&self, ids: &[DbId]) -> Result<Vec<UseCase>, BackendError> {
        let state = self.enter("get_by_ids")?;
        Ok(state
            .use_cases
            .iter()
            .filter(|uc| ids.contains(&uc.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: &UseCaseDraft) -> Result<UseCase, BackendError> {
        let mut state = self.enter("insert")?;
        state.next_id += 1;
        state.tick += 1;
        let at = at_tick(state.tick);
        let use_case = UseCase {
            id: state.next_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            tags: draft.tags.clone(),
            href: draft.href.clone(),
            image: draft.image.clone(),
            created_at: at,
            updated_at: at,
        };
        state.use_cases.push(use_case.clone());
        Ok(use_case)
    }

    async fn update(
        &self,
        id: DbId,
        patch: &UseCaseDraft,
    ) -> Result<Option<UseCase>, BackendError> {
        let mut state = self.enter("update")?;
        state.tick += 1;
        let at = at_tick(state.tick);
        let Some(existing) = state.use_cases.iter_mut().find(|uc| uc.id == id) else {
            return Ok(None);
        };
        existing.title = patch.title.clone();
        existing.description = patch.description.clone();
        existing.category = patch.category.clone();
        existing.tags = patch.tags.clone();
        existing.href = patch.href.clone();
        existing.image = patch.image.clone();
        existing.updated_at = at;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, BackendError> {
        let mut state = self.enter("delete")?;
        let before = state.use_cases.len();
        state.use_cases.retain(|uc| uc.id != id);
        Ok(state.use_cases.len() < before)
    }
}

#[async_trait]
impl ActivityStore for InMemoryStore {
    async fn favorite_ids(&self, user_id: DbId) -> Result<Vec<DbId>, BackendError> {
        let state = self.enter("favorite_ids")?;
        let mut rows: Vec<_> = state
            .favorites
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        Ok(rows.into_iter().map(|(_, c, _)| c).collect())
    }

    async fn insert_favorite(&self, user_id: DbId, use_case_id: DbId) -> Result<(), BackendError> {
        let mut state = self.enter("insert_favorite")?;
        if state
            .favorites
            .iter()
            .any(|(u, c, _)| *u == user_id && *c == use_case_id)
        {
            return Ok(());
        }
        state.tick += 1;
        let tick = state.tick;
        state.favorites.push((user_id, use_case_id, tick));
        Ok(())
    }

    async fn delete_favorite(&self, user_id: DbId, use_case_id: DbId) -> Result<bool, BackendError> {
        let mut state = self.enter("delete_favorite")?;
        let before = state.favorites.len();
        state
            .favorites
            .retain(|(u, c, _)| !(*u == user_id && *c == use_case_id));
        Ok(state.favorites.len() < before)
    }

    async fn upsert_recent_view(&self, user_id: DbId, use_case_id: DbId) -> Result<(), BackendError> {
        let mut state = self.enter("upsert_recent_view")?;
        state.tick += 1;
        let tick = state.tick;
        match state
            .recent
            .iter_mut()
            .find(|(u, c, _)| *u == user_id && *c == use_case_id)
        {
            Some(row) => row.2 = tick,
            None => state.recent.push((user_id, use_case_id, tick)),
        }
        Ok(())
    }

    async fn recent_view_ids(&self, user_id: DbId, limit: i64) -> Result<Vec<DbId>, BackendError> {
        let state = self.enter("recent_view_ids")?;
        let mut rows: Vec<_> = state
            .recent
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        Ok(rows
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(_, c, _)| c)
            .collect())
    }
}
