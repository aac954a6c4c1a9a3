//! In-memory session registry. Sessions live for the process lifetime —
//! nothing is persisted, matching the browser-session model this service
//! fronts.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::session::controller::SessionController;

#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<Uuid, Arc<SessionController>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, controller: SessionController) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(controller));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<SessionController>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Drops a session. Returns false if the id was unknown. Without this
    /// the registry would only ever grow — creation is an open endpoint.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }
}
