//! Durable association ledger between external entities and remote ones.
//!
//! The ledger stores one entry per entity created on the remote service so
//! repeated runs find the existing remote id instead of creating a
//! duplicate. Entries are never mutated; the whole set persists to a single
//! JSON file and an absent file is the empty-ledger initial state.
//!
//! The ledger does not reject duplicate keys itself: callers are expected
//! to `lookup` before `record` (find-or-create). Lookups return the first
//! match, so an accidental duplicate leaves the original binding in force.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Partition of the association space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationKind {
    /// A property or contact record on the remote service.
    Record,
    /// A folder (operation) on the remote service.
    Operation,
}

/// One externally-owned identifier bound to a remote identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    #[serde(rename = "type")]
    pub kind: AssociationKind,
    #[serde(rename = "externalId")]
    pub external_id: String,
    #[serde(rename = "remoteId")]
    pub remote_id: i64,
}

/// In-memory view of the durable association set.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: Vec<Association>,
}

impl Ledger {
    /// Load the ledger from its durable slot. A missing file is the empty
    /// initial state, not an error.
    pub fn load(path: PathBuf) -> Result<Self> {
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parse ledger {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read ledger {}", path.display()))
            }
        };
        Ok(Ledger { path, entries })
    }

    /// First remote id recorded for `(kind, external_id)`, if any.
    pub fn lookup(&self, kind: AssociationKind, external_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind && entry.external_id == external_id)
            .map(|entry| entry.remote_id)
    }

    /// Append one association and persist the full set.
    pub fn record(
        &mut self,
        kind: AssociationKind,
        external_id: &str,
        remote_id: i64,
    ) -> Result<()> {
        self.entries.push(Association {
            kind,
            external_id: external_id.to_string(),
            remote_id,
        });
        self.persist()?;
        tracing::debug!(?kind, external_id, remote_id, "association recorded");
        Ok(())
    }

    /// Discard all entries and persist the empty set. All previously known
    /// remote associations become invalid for callers.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Association] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole set through a temp file then rename, so a crash
    /// mid-write cannot leave a truncated ledger behind.
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(&self.entries).context("serialize ledger")?;
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("ledger");
        let tmp_path = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!(".{file_name}.tmp"));
        fs::write(&tmp_path, &bytes)
            .with_context(|| format!("write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("persist {}", self.path.display()))?;
        Ok(())
    }
}
