// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection pool keyed by URI
//!
//! New connections are verified with a ping before they are handed out.
//! A connection only goes back to the idle list through
//! [`PooledConnection::release`]; one that is discarded or dropped (failed
//! query, cancellation, panic) is never reused. With `max_idle_per_uri = 0`
//! every query connects and tears down its own connection.

use super::traits::{DocumentStore, StoreConnection};
use super::types::StoreResult;
use crate::config::PoolConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

struct IdleConnection {
    connection: Box<dyn StoreConnection>,
    idle_since: Instant,
}

struct PoolInner {
    store: Arc<dyn DocumentStore>,
    config: PoolConfig,
    idle: Mutex<HashMap<String, Vec<IdleConnection>>>,
}

/// URI-keyed pool of verified store connections
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    pub fn new(store: Arc<dyn DocumentStore>, config: PoolConfig) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                store,
                config,
                idle: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// Check out a connection for `uri`, reusing an idle one when available
    pub async fn acquire(&self, uri: &str) -> StoreResult<PooledConnection> {
        if let Some(connection) = self.take_idle(uri) {
            log::debug!("pool: reusing idle {} connection", self.inner.store.name());
            return Ok(self.wrap(uri, connection));
        }
        self.connect_verified(uri).await
    }

    /// Open and verify a brand-new connection, bypassing the idle list
    pub async fn connect_verified(&self, uri: &str) -> StoreResult<PooledConnection> {
        log::debug!("pool: opening new {} connection", self.inner.store.name());
        let connection = self.inner.store.connect(uri).await?;
        if let Err(e) = connection.ping().await {
            connection.close().await;
            return Err(e);
        }
        Ok(self.wrap(uri, connection))
    }

    /// Number of idle connections held for `uri`
    pub fn idle_count(&self, uri: &str) -> usize {
        self.inner.idle.lock().get(uri).map_or(0, Vec::len)
    }

    /// Close connections idle for longer than the configured timeout.
    ///
    /// Returns the number of connections evicted.
    pub async fn evict_idle(&self) -> usize {
        let timeout = self.inner.config.idle_timeout;
        let expired: Vec<IdleConnection> = {
            let mut idle = self.inner.idle.lock();
            let mut expired = Vec::new();
            for connections in idle.values_mut() {
                let (stale, fresh): (Vec<_>, Vec<_>) = connections
                    .drain(..)
                    .partition(|entry| entry.idle_since.elapsed() >= timeout);
                *connections = fresh;
                expired.extend(stale);
            }
            idle.retain(|_, connections| !connections.is_empty());
            expired
        };

        let count = expired.len();
        for entry in expired {
            entry.connection.close().await;
        }
        if count > 0 {
            log::debug!("pool: evicted {} idle connection(s)", count);
        }
        count
    }

    /// Close every idle connection
    pub async fn clear(&self) {
        let drained: Vec<IdleConnection> = {
            let mut idle = self.inner.idle.lock();
            idle.drain().flat_map(|(_, connections)| connections).collect()
        };
        for entry in drained {
            entry.connection.close().await;
        }
    }

    fn take_idle(&self, uri: &str) -> Option<Box<dyn StoreConnection>> {
        let timeout = self.inner.config.idle_timeout;
        let mut idle = self.inner.idle.lock();
        let connections = idle.get_mut(uri)?;
        // Expired entries are dropped here; `evict_idle` closes them politely
        connections.retain(|entry| entry.idle_since.elapsed() < timeout);
        connections.pop().map(|entry| entry.connection)
    }

    fn wrap(&self, uri: &str, connection: Box<dyn StoreConnection>) -> PooledConnection {
        PooledConnection {
            connection,
            uri: uri.to_string(),
            pool: self.clone(),
        }
    }

    /// Put a healthy connection back, or hand it back to the caller to
    /// close when the idle list for its URI is full
    fn give_back(
        &self,
        uri: String,
        connection: Box<dyn StoreConnection>,
    ) -> Option<Box<dyn StoreConnection>> {
        let max_idle = self.inner.config.max_idle_per_uri;
        let mut idle = self.inner.idle.lock();
        let connections = idle.entry(uri).or_default();
        if connections.len() >= max_idle {
            return Some(connection);
        }
        connections.push(IdleConnection {
            connection,
            idle_since: Instant::now(),
        });
        None
    }
}

/// A connection checked out of a [`ConnectionPool`]
///
/// Dropping it without calling `release` closes the connection instead of
/// returning it to the idle list.
pub struct PooledConnection {
    connection: Box<dyn StoreConnection>,
    uri: String,
    pool: ConnectionPool,
}

impl PooledConnection {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Return the connection to the pool for reuse
    pub async fn release(self) {
        let Self {
            connection,
            uri,
            pool,
        } = self;
        if let Some(overflow) = pool.give_back(uri, connection) {
            overflow.close().await;
        }
    }

    /// Close the connection instead of returning it to the pool
    pub async fn discard(self) {
        self.connection.close().await;
    }
}

impl std::ops::Deref for PooledConnection {
    type Target = dyn StoreConnection;

    fn deref(&self) -> &Self::Target {
        self.connection.as_ref()
    }
}
