use std::collections::HashSet;
use std::time::Duration;

use futures_util::future::try_join_all;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::types::CardRecord;

const CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or HTTP failure on any request; the whole call is aborted and
    /// the caller must not assume any records were obtained.
    #[error("catalog request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("catalog entry {0} has no front sprite")]
    MissingImage(u32),
    #[error("cannot draw {wanted} distinct ids from [1, {max_id}]")]
    InvalidParams { wanted: usize, max_id: u32 },
}

/// Wire shape of a catalog entry; only the fields the game consumes.
#[derive(Debug, Deserialize)]
struct RawEntity {
    name: String,
    sprites: RawSprites,
}

#[derive(Debug, Deserialize)]
struct RawSprites {
    front_default: Option<String>,
}

/// Client for the remote creature catalog.
///
/// One GET per entity id under a configurable base URL; no auth, no retry.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    /// Build a client for `base_url` (trailing slash optional).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { base_url, http }
    }

    /// Fetch `n` distinct random entity records with ids in `[1, max_id]`.
    ///
    /// Ids are drawn with a set-based rejection loop (redraw on collision),
    /// then all fetches are issued concurrently and joined: any individual
    /// failure fails the whole call with no partial results and no per-item
    /// retry.
    pub async fn fetch_random_records<R: Rng>(
        &self,
        n: usize,
        max_id: u32,
        rng: &mut R,
    ) -> Result<Vec<CardRecord>, CatalogError> {
        if n == 0 || (max_id as usize) < n {
            return Err(CatalogError::InvalidParams { wanted: n, max_id });
        }

        let mut seen: HashSet<u32> = HashSet::with_capacity(n);
        let mut ids: Vec<u32> = Vec::with_capacity(n);
        while ids.len() < n {
            let candidate = rng.gen_range(1..=max_id);
            if seen.insert(candidate) {
                ids.push(candidate);
            }
        }

        tracing::debug!(n, max_id, ?ids, "fetching catalog records");
        let records = try_join_all(ids.iter().map(|&id| self.fetch_one(id))).await?;
        Ok(records)
    }

    async fn fetch_one(&self, id: u32) -> Result<CardRecord, CatalogError> {
        let url = format!("{}/{id}", self.base_url);
        let raw: RawEntity = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let image_ref = raw
            .sprites
            .front_default
            .ok_or(CatalogError::MissingImage(id))?;
        Ok(CardRecord {
            id,
            name: raw.name,
            image_ref,
        })
    }
}
