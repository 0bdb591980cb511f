use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::model::MatchModel;
use crate::route::create_router;
use crate::schema::{CreateMatchSchema, Stat, UpdateMatchSchema};
use crate::store::MatchStore;
use crate::AppState;

/// In-memory stand-in for postgres. Each call takes the lock once, which gives the same
/// per-statement atomicity the real `UPDATE` relies on.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<i32, MatchModel>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// How many storage operations have been issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn with_row<F>(&self, id: i32, f: F) -> u64
    where
        F: FnOnce(&mut MatchModel),
    {
        self.touch();
        match self.rows.lock().unwrap().get_mut(&id) {
            Some(m) => {
                f(m);
                1
            }
            None => 0,
        }
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn list_matches(&self) -> Result<Vec<MatchModel>> {
        self.touch();
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create_match(&self, new: &CreateMatchSchema) -> Result<MatchModel> {
        self.touch();
        let id = i32::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)?;
        let m = MatchModel {
            id,
            home_team: new.home_team.clone(),
            away_team: new.away_team.clone(),
            match_date: new.match_date,
            goals: 0,
            yellow_cards: 0,
            red_cards: 0,
            extra_time: Some(String::new()),
        };
        self.rows.lock().unwrap().insert(id, m.clone());
        Ok(m)
    }

    async fn get_match(&self, id: i32) -> Result<Option<MatchModel>> {
        self.touch();
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update_match(&self, id: i32, new: &UpdateMatchSchema) -> Result<u64> {
        Ok(self.with_row(id, |m| {
            m.home_team = new.home_team.clone();
            m.away_team = new.away_team.clone();
            m.match_date = new.match_date;
        }))
    }

    async fn delete_match(&self, id: i32) -> Result<u64> {
        self.touch();
        Ok(self.rows.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }

    async fn increment_stat(&self, id: i32, stat: Stat) -> Result<u64> {
        Ok(self.with_row(id, |m| match stat {
            Stat::Goals => m.goals += 1,
            Stat::YellowCards => m.yellow_cards += 1,
            Stat::RedCards => m.red_cards += 1,
        }))
    }

    async fn set_extra_time(&self, id: i32, extra_time: &str) -> Result<u64> {
        Ok(self.with_row(id, |m| m.extra_time = Some(extra_time.to_owned())))
    }
}

/// A store whose every call fails, as if the database went away.
pub struct FailingStore;

#[async_trait]
impl MatchStore for FailingStore {
    async fn list_matches(&self) -> Result<Vec<MatchModel>> {
        Err(anyhow!("connection reset"))
    }

    async fn create_match(&self, _new: &CreateMatchSchema) -> Result<MatchModel> {
        Err(anyhow!("connection reset"))
    }

    async fn get_match(&self, _id: i32) -> Result<Option<MatchModel>> {
        Err(anyhow!("connection reset"))
    }

    async fn update_match(&self, _id: i32, _m: &UpdateMatchSchema) -> Result<u64> {
        Err(anyhow!("connection reset"))
    }

    async fn delete_match(&self, _id: i32) -> Result<u64> {
        Err(anyhow!("connection reset"))
    }

    async fn increment_stat(&self, _id: i32, _stat: Stat) -> Result<u64> {
        Err(anyhow!("connection reset"))
    }

    async fn set_extra_time(&self, _id: i32, _extra_time: &str) -> Result<u64> {
        Err(anyhow!("connection reset"))
    }
}

pub fn router_with<S>(store: S) -> (Router, Arc<S>)
where
    S: MatchStore + 'static,
{
    let store = Arc::new(store);
    let state = AppState { store: store.clone() };
    (create_router(Arc::new(state)), store)
}

pub async fn send(app: &Router, method: Method, uri: &str, json: Option<Value>) -> (StatusCode, Bytes) {
    let body = match json {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    (status, to_bytes(res.into_body(), usize::MAX).await.unwrap())
}
