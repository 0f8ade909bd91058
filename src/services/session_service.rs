//! Session Context
//!
//! Anonymous-session correlation for trips not owned by an authenticated
//! account. The session id is an explicit value threaded through the
//! pipeline, with create/rotate/clear lifecycle operations.
//!
//! Each session carries a destination -> coordinate cache so one view-load
//! issues at most one geocode per distinct destination, and a generation
//! counter: a geocode that resolves after the session's inputs changed is
//! discarded rather than applied.

use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::map::GeoPoint;
use crate::services::geocoding_service::GeocodingService;

#[derive(Debug)]
pub struct SessionContext {
    pub session_id: String,
    generation: u64,
    geocode_cache: HashMap<String, GeoPoint>,
}

impl SessionContext {
    pub fn create() -> Self {
        Self {
            session_id: format!("session_{}", Uuid::new_v4().simple()),
            generation: 0,
            geocode_cache: HashMap::new(),
        }
    }

    /// Drop cached lookups and invalidate any in-flight geocode.
    pub fn clear(&mut self) {
        self.geocode_cache.clear();
        self.generation += 1;
    }

    /// Replace the session id and start from a clean slate.
    pub fn rotate(&mut self) {
        self.session_id = format!("session_{}", Uuid::new_v4().simple());
        self.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cached_coordinates(&self, destination: &str) -> Option<GeoPoint> {
        self.geocode_cache.get(&cache_key(destination)).copied()
    }

    /// Store a resolved coordinate, unless the session moved on while the
    /// lookup was in flight. Returns whether the result was kept.
    pub fn store_coordinates(
        &mut self,
        destination: &str,
        point: GeoPoint,
        generation: u64,
    ) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding stale geocode for '{}' (generation {} != {})",
                destination, generation, self.generation
            );
            return false;
        }
        self.geocode_cache.insert(cache_key(destination), point);
        true
    }
}

fn cache_key(destination: &str) -> String {
    destination.trim().to_lowercase()
}

/// Upper bound on tracked sessions. Ids are client-supplied, so the registry
/// must not grow with every unknown header value.
pub const MAX_SESSIONS: usize = 1024;

/// Server-side registry of anonymous sessions, keyed by session id.
/// In-memory only; persistence stays an external concern.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionContext>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionContext>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Resolve a destination through the session's cache, geocoding on a
    /// miss. The result of a lookup that outlived its generation is returned
    /// to the caller but not cached.
    pub async fn resolve_destination(
        &self,
        session_id: &str,
        geocoder: &GeocodingService,
        destination: &str,
    ) -> GeoPoint {
        let generation = {
            let mut sessions = self.lock();
            if !sessions.contains_key(session_id) {
                evict_if_full(&mut sessions);
            }
            let session = sessions
                .entry(session_id.to_string())
                .or_insert_with(SessionContext::create);
            if let Some(point) = session.cached_coordinates(destination) {
                return point;
            }
            session.generation()
        };

        // Lock released during the network call.
        let point = geocoder.resolve(destination).await;

        let mut sessions = self.lock();
        if let Some(session) = sessions.get_mut(session_id) {
            session.store_coordinates(destination, point, generation);
        }
        point
    }

    /// Invalidate a session's in-flight lookups and cached coordinates.
    pub fn clear(&self, session_id: &str) {
        if let Some(session) = self.lock().get_mut(session_id) {
            session.clear();
        }
    }

    /// Rotate a session id, returning the replacement id.
    pub fn rotate(&self, session_id: &str) -> String {
        let mut sessions = self.lock();
        if let Some(mut session) = sessions.remove(session_id) {
            session.rotate();
            let new_id = session.session_id.clone();
            sessions.insert(new_id.clone(), session);
            new_id
        } else {
            evict_if_full(&mut sessions);
            let session = SessionContext::create();
            let new_id = session.session_id.clone();
            sessions.insert(new_id.clone(), session);
            new_id
        }
    }

    pub fn session_count(&self) -> usize {
        self.lock().len()
    }
}

// Drops an arbitrary session once the registry is at capacity.
fn evict_if_full(sessions: &mut HashMap<String, SessionContext>) {
    if sessions.len() < MAX_SESSIONS {
        return;
    }
    if let Some(key) = sessions.keys().next().cloned() {
        sessions.remove(&key);
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
