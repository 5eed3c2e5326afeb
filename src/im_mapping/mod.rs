//! Memoized user → direct-message channel lookup.
//!
//! Entries are only ever added. A miss opens the IM through the API once;
//! concurrent misses for the same user wait on that single request instead
//! of issuing their own.

use crate::api::SlackApiTrait;
use crate::errors::SlackResult;
use crate::types::{ChannelId, Im, UserId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, instrument};

/// Cache of direct-message channel IDs keyed by user
pub struct ImMapping {
    api: Arc<dyn SlackApiTrait>,
    mapping: RwLock<HashMap<UserId, ChannelId>>,
    in_flight: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl ImMapping {
    /// Create a mapping seeded with known IMs. Later duplicates win.
    pub fn new(api: Arc<dyn SlackApiTrait>, ims: impl IntoIterator<Item = Im>) -> Self {
        let mapping = Self {
            api,
            mapping: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        };
        mapping.add_mappings(ims);
        mapping
    }

    /// Record one IM
    pub fn add_mapping(&self, im: Im) {
        self.mapping.write().insert(im.user_id, im.id);
    }

    /// Record several IMs
    pub fn add_mappings(&self, ims: impl IntoIterator<Item = Im>) {
        let mut mapping = self.mapping.write();
        for im in ims {
            mapping.insert(im.user_id, im.id);
        }
    }

    /// Cached channel for a user, without touching the network
    pub fn get(&self, user_id: &UserId) -> Option<ChannelId> {
        self.mapping.read().get(user_id).cloned()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.mapping.read().len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.mapping.read().is_empty()
    }

    /// Direct-message channel for a user, opening it on first use
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn im_for(&self, user_id: &UserId) -> SlackResult<ChannelId> {
        if let Some(channel) = self.get(user_id) {
            debug!(channel = %channel, "IM cache hit");
            return Ok(channel);
        }

        let gate = self
            .in_flight
            .lock()
            .entry(user_id.clone())
            .or_default()
            .clone();
        let _guard = gate.lock().await;

        // another task may have resolved it while we waited
        if let Some(channel) = self.get(user_id) {
            debug!(channel = %channel, "IM resolved by concurrent lookup");
            return Ok(channel);
        }

        debug!("IM cache miss, opening channel");
        let result = self.api.im_open(user_id).await;

        if let Ok(im) = &result {
            self.add_mapping(im.clone());
        }
        self.release_gate(user_id, &gate);

        result.map(|im| im.id)
    }
}

impl ImMapping {
    /// Drop the gate for `user_id` unless a later lookup has replaced it
    fn release_gate(&self, user_id: &UserId, gate: &Arc<AsyncMutex<()>>) {
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(user_id)
            .is_some_and(|current| Arc::ptr_eq(current, gate))
        {
            in_flight.remove(user_id);
        }
    }
}

impl std::fmt::Debug for ImMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImMapping")
            .field("entries", &self.len())
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}
