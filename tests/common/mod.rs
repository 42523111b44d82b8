#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;

use pulsemetry::application::services::{
    AnalyticsService, AppService, AuthService, IngestService, LinkService,
};
use pulsemetry::domain::entities::{
    ApiKey, ApiKeyWithApp, Application, DeviceBucket, NewApiKey, NewApplication, NewEvent,
    NewShortLink, RecentEvent, ShortLink, SummaryFilter, UserOverview,
};
use pulsemetry::domain::repositories::{
    ApiKeyRepository, ApplicationRepository, EventRepository, ShortLinkRepository,
};
use pulsemetry::error::AppError;
use pulsemetry::infrastructure::cache::{CacheResult, CacheService};
use pulsemetry::routes::router;
use pulsemetry::state::{AppState, DatabaseHealth};

pub const TEST_BASE_URL: &str = "http://pm.test";

/// In-memory backing store shared by all fake repositories.
///
/// Kept around by the tests to assert on stored rows directly.
#[derive(Default)]
pub struct InMemoryStore {
    pub apps: Mutex<Vec<Application>>,
    pub keys: Mutex<Vec<ApiKey>>,
    pub events: Mutex<Vec<NewEvent>>,
    pub links: Mutex<Vec<ShortLink>>,
}

impl InMemoryStore {
    fn app_name(&self, app_id: &str) -> String {
        self.apps
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == app_id)
            .map(|a| a.name.clone())
            .unwrap_or_default()
    }

    fn with_app(&self, key: &ApiKey) -> ApiKeyWithApp {
        ApiKeyWithApp {
            id: key.id.clone(),
            app_id: key.app_id.clone(),
            api_key: key.api_key.clone(),
            is_revoked: key.is_revoked,
            expires_at: key.expires_at,
            created_at: key.created_at,
            revoked_at: key.revoked_at,
            app_name: self.app_name(&key.app_id),
        }
    }

    fn matching_events(&self, filter: &SummaryFilter) -> Vec<NewEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.event_name == filter.event_name
                    && filter.app_id.as_ref().is_none_or(|a| &e.app_id == a)
                    && e.event_time >= filter.start
                    && e.event_time <= filter.end
            })
            .cloned()
            .collect()
    }

    fn user_events(&self, user_id: &str, app_id: Option<&str>) -> Vec<NewEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && app_id.is_none_or(|a| e.app_id == a))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn create_with_key(
        &self,
        new_app: NewApplication,
        new_key: NewApiKey,
    ) -> Result<(Application, ApiKey), AppError> {
        let now = Utc::now();
        let app = Application {
            id: new_app.id,
            name: new_app.name,
            description: new_app.description,
            created_at: now,
            updated_at: now,
        };
        let key = ApiKey {
            id: new_key.id,
            app_id: new_key.app_id,
            api_key: new_key.api_key,
            is_revoked: false,
            expires_at: None,
            created_at: now,
            revoked_at: None,
        };

        self.apps.lock().unwrap().push(app.clone());
        self.keys.lock().unwrap().push(key.clone());
        Ok((app, key))
    }

    async fn find_by_id(&self, app_id: &str) -> Result<Option<Application>, AppError> {
        Ok(self
            .apps
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == app_id)
            .cloned())
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryStore {
    async fn find_usable(&self, api_key: &str) -> Result<Option<ApiKeyWithApp>, AppError> {
        let now = Utc::now();
        let found = self
            .keys
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.api_key == api_key && k.is_usable(now))
            .cloned();
        Ok(found.map(|k| self.with_app(&k)))
    }

    async fn list_for_app(&self, app_id: &str) -> Result<Vec<ApiKeyWithApp>, AppError> {
        let rows: Vec<ApiKey> = self
            .keys
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|k| k.app_id == app_id)
            .cloned()
            .collect();
        Ok(rows.iter().map(|k| self.with_app(k)).collect())
    }

    async fn revoke(&self, api_key_id: &str) -> Result<bool, AppError> {
        let mut keys = self.keys.lock().unwrap();
        match keys.iter_mut().find(|k| k.id == api_key_id && !k.is_revoked) {
            Some(key) => {
                key.is_revoked = true;
                key.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn regenerate(&self, app_id: &str, new_key: NewApiKey) -> Result<ApiKey, AppError> {
        let now = Utc::now();
        let mut keys = self.keys.lock().unwrap();

        for key in keys.iter_mut().filter(|k| k.app_id == app_id && !k.is_revoked) {
            key.is_revoked = true;
            key.revoked_at = Some(now);
        }

        let key = ApiKey {
            id: new_key.id,
            app_id: new_key.app_id,
            api_key: new_key.api_key,
            is_revoked: false,
            expires_at: None,
            created_at: now,
            revoked_at: None,
        };
        keys.push(key.clone());
        Ok(key)
    }

    async fn find_active_for_app(&self, app_id: &str) -> Result<Option<ApiKey>, AppError> {
        let now = Utc::now();
        Ok(self
            .keys
            .lock()
            .unwrap()
            .iter()
            .find(|k| k.app_id == app_id && k.is_usable(now))
            .cloned())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn insert(&self, new_event: NewEvent) -> Result<String, AppError> {
        let id = new_event.id.clone();
        self.events.lock().unwrap().push(new_event);
        Ok(id)
    }

    async fn device_breakdown(
        &self,
        filter: &SummaryFilter,
    ) -> Result<Vec<DeviceBucket>, AppError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for event in self.matching_events(filter) {
            let device = event
                .device_type
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("unknown")
                .to_string();
            *counts.entry(device).or_insert(0) += 1;
        }

        let mut buckets: Vec<DeviceBucket> = counts
            .into_iter()
            .map(|(device_type, count)| DeviceBucket { device_type, count })
            .collect();
        buckets.sort_by(|a, b| b.count.cmp(&a.count).then(a.device_type.cmp(&b.device_type)));
        Ok(buckets)
    }

    async fn unique_users(&self, filter: &SummaryFilter) -> Result<i64, AppError> {
        let mut users: Vec<String> = self
            .matching_events(filter)
            .into_iter()
            .map(|e| e.user_id)
            .collect();
        users.sort();
        users.dedup();
        Ok(users.len() as i64)
    }

    async fn user_overview<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
    ) -> Result<Option<UserOverview>, AppError> {
        let events = self.user_events(user_id, app_id);
        if events.is_empty() {
            return Ok(None);
        }

        let first_seen = events.iter().map(|e| e.event_time).min().unwrap();
        let last_seen = events.iter().map(|e| e.event_time).max().unwrap();
        let last_ip = events
            .iter()
            .filter(|e| e.ip.is_some())
            .max_by_key(|e| e.event_time)
            .and_then(|e| e.ip.clone());

        Ok(Some(UserOverview {
            total_events: events.len() as i64,
            first_seen,
            last_seen,
            last_ip,
        }))
    }

    async fn recent_events<'a>(
        &self,
        user_id: &str,
        app_id: Option<&'a str>,
        limit: i64,
    ) -> Result<Vec<RecentEvent>, AppError> {
        let mut events = self.user_events(user_id, app_id);
        events.sort_by(|a, b| b.event_time.cmp(&a.event_time));
        Ok(events
            .into_iter()
            .take(limit as usize)
            .map(|e| RecentEvent {
                event_name: e.event_name,
                event_time: e.event_time,
                properties: e.properties,
            })
            .collect())
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.iter().any(|l| l.slug == new_link.slug) {
            return Err(AppError::conflict(format!(
                "Slug already exists: {}",
                new_link.slug
            )));
        }

        let now = Utc::now();
        let link = ShortLink {
            id: new_link.id,
            app_id: new_link.app_id,
            slug: new_link.slug,
            original_url: new_link.original_url,
            clicks: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.slug == slug)
            .cloned())
    }

    async fn increment_clicks(&self, link_id: &str) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == link_id) {
            link.clicks += 1;
            link.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// In-memory cache, TTL ignored.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, payload: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Always-healthy database probe.
pub struct OkDatabase;

#[async_trait]
impl DatabaseHealth for OkDatabase {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Builds an [`AppState`] over fresh in-memory fakes.
///
/// Returns the store and cache so tests can seed and assert directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryStore>, Arc<MemoryCache>) {
    let store = Arc::new(InMemoryStore::default());
    let cache = Arc::new(MemoryCache::default());

    let state = AppState {
        auth_service: Arc::new(AuthService::new(store.clone())),
        app_service: Arc::new(AppService::new(store.clone(), store.clone())),
        ingest_service: Arc::new(IngestService::new(store.clone())),
        analytics_service: Arc::new(AnalyticsService::new(store.clone(), cache.clone(), 300)),
        link_service: Arc::new(LinkService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            TEST_BASE_URL.to_string(),
        )),
        cache: cache.clone(),
        database: Arc::new(OkDatabase),
        started_at: Instant::now(),
    };

    (state, store, cache)
}

/// Spins up a test server over the full router.
///
/// Rate limiting runs in proxy mode with generous limits; every request
/// carries a forwarded client IP so the limiter always has a key.
pub fn test_server(state: AppState) -> TestServer {
    // The replenish-interval * burst product must fit the governor's
    // nanosecond arithmetic, so the burst cannot be arbitrarily large.
    let app = router(state, true, 10_000, 1_000_000);
    let mut server = TestServer::new(app).unwrap();
    server.add_header(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_static("203.0.113.10"),
    );
    server
}

/// Registers an application through the API, returning `(app_id, api_key)`.
pub async fn register_app(server: &TestServer, name: &str) -> (String, String) {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({"name": name}))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    (
        body["data"]["appId"].as_str().unwrap().to_string(),
        body["data"]["apiKey"].as_str().unwrap().to_string(),
    )
}
