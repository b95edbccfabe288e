//! Shared validation for loaded reference records

use crate::{ReferenceError, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};
use tradle_core::{Centroid, CountryRecord};

/// Collects records in file order, dropping unusable ones
#[derive(Debug, Default)]
pub(crate) struct RecordSet {
    records: Vec<CountryRecord>,
    seen: HashSet<String>,
    skipped: usize,
    duplicates: usize,
}

impl RecordSet {
    pub(crate) fn push(&mut self, position: usize, name: Option<String>, centroid: Option<Centroid>) {
        let name = match name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                warn!("Record {} has no name, skipping", position);
                self.skipped += 1;
                return;
            }
        };

        let centroid = match centroid {
            Some(c) if c.is_valid() => c,
            Some(c) => {
                warn!(
                    "{} has out-of-range centroid ({}, {}), skipping",
                    name, c.latitude, c.longitude
                );
                self.skipped += 1;
                return;
            }
            None => {
                warn!("{} has no usable coordinates, skipping", name);
                self.skipped += 1;
                return;
            }
        };

        // First occurrence wins
        if !self.seen.insert(name.clone()) {
            warn!("Duplicate country {}, keeping first occurrence", name);
            self.duplicates += 1;
            return;
        }

        self.records.push(CountryRecord { name, centroid });
    }

    pub(crate) fn finish(self, path: &Path) -> Result<Vec<CountryRecord>> {
        info!(
            "Loaded {} countries from {:?} ({} skipped, {} duplicates)",
            self.records.len(),
            path,
            self.skipped,
            self.duplicates
        );

        if self.records.is_empty() {
            return Err(ReferenceError::Empty(path.to_path_buf()));
        }
        Ok(self.records)
    }
}
