//! Replay facade backed by a recorded device snapshot.
//!
//! A snapshot is a JSON document holding what an agent answered for a set of
//! scalars and walks, plus the platform's ifIndex to port id mapping for the
//! device. [`SnapshotQuery`] serves those answers through the regular
//! [`SnmpQuery`] and [`PortCache`] traits, so drivers can be exercised
//! without a live agent.
//!
//! ```json
//! {
//!   "device": { "device_id": 1, "hostname": "sw1", "sys_object_id": ".1.3.6.1.4.1.674.10895.3020" },
//!   "scalars": { ".1.3.6.1.4.1.89.1.7.0": "12" },
//!   "tables": {
//!     "agentAuthMgrPortHostMode": [ { "index": "3", "fields": { "agentAuthMgrPortHostMode": "multiHost" } } ]
//!   },
//!   "ports": { "3": 1003 }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use nms_types::Device;

use crate::error::{DriverError, DriverResult};
use crate::snmp::{PortCache, QueryOptions, SnmpQuery, SnmpTable, TableRow};

/// One recorded table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub index: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Recorded agent answers for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub device: Device,
    #[serde(default)]
    pub scalars: BTreeMap<String, String>,
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<SnapshotRow>>,
    #[serde(default)]
    pub ports: BTreeMap<u32, u64>,
}

impl Snapshot {
    pub fn new(device: Device) -> Self {
        Self {
            device,
            scalars: BTreeMap::new(),
            tables: BTreeMap::new(),
            ports: BTreeMap::new(),
        }
    }

    /// Loads a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> DriverResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DriverError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| DriverError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn scalar(&self, oid: &str) -> Option<&String> {
        self.scalars.get(oid).or_else(|| {
            // Numeric OIDs may be recorded with or without the leading dot
            match oid.strip_prefix('.') {
                Some(bare) => self.scalars.get(bare),
                None => self.scalars.get(&format!(".{}", oid)),
            }
        })
    }

    /// Rows for a walk of `root`.
    ///
    /// A recorded table wins. Otherwise the walk is answered from the
    /// scalars at or below `root`, the way an agent answers a walk of a
    /// numeric subtree.
    fn walk(&self, root: &str) -> SnmpTable {
        if let Some(rows) = self.tables.get(root) {
            return rows
                .iter()
                .map(|row| TableRow {
                    index: row.index.clone(),
                    fields: row
                        .fields
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                })
                .collect();
        }

        let mut rows = Vec::new();
        if let Some(value) = self.scalar(root) {
            rows.push(TableRow::new("").with_field(root, value.clone()));
        }
        // An instance may be recorded both with and without the leading dot
        let bare_root = root.trim_start_matches('.');
        let prefix = format!("{}.", bare_root);
        let mut seen = BTreeSet::new();
        for (oid, value) in &self.scalars {
            let bare = oid.trim_start_matches('.');
            if bare == bare_root {
                continue;
            }
            if let Some(index) = bare.strip_prefix(&prefix) {
                if seen.insert(index) {
                    rows.push(TableRow::new(index).with_field(root, value.clone()));
                }
            }
        }
        SnmpTable::new(rows)
    }

    fn check_device(&self, device: &Device, target: &str) -> DriverResult<()> {
        if device.device_id != self.device.device_id {
            return Err(DriverError::snmp(
                device.device_id.to_string(),
                target,
                format!("no snapshot recorded for device {}", device.device_id),
            ));
        }
        Ok(())
    }
}

/// [`SnmpQuery`] and [`PortCache`] implementation replaying a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotQuery {
    snapshot: Snapshot,
}

impl SnapshotQuery {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn device(&self) -> &Device {
        &self.snapshot.device
    }
}

#[async_trait]
impl SnmpQuery for SnapshotQuery {
    async fn get(
        &self,
        device: &Device,
        oid: &str,
        _options: &QueryOptions,
    ) -> DriverResult<Option<String>> {
        self.snapshot.check_device(device, oid)?;
        Ok(self.snapshot.scalar(oid).cloned())
    }

    async fn walk(
        &self,
        device: &Device,
        root: &str,
        _options: &QueryOptions,
    ) -> DriverResult<SnmpTable> {
        self.snapshot.check_device(device, root)?;
        Ok(self.snapshot.walk(root))
    }
}

#[async_trait]
impl PortCache for SnapshotQuery {
    async fn port_id_from_if_index(
        &self,
        if_index: u32,
        device: &Device,
    ) -> DriverResult<Option<u64>> {
        if device.device_id != self.snapshot.device.device_id {
            return Ok(None);
        }
        Ok(self.snapshot.ports.get(&if_index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SNAPSHOT_JSON: &str = r#"{
        "device": { "device_id": 1, "hostname": "sw1", "sys_object_id": ".1.3.6.1.4.1.674.10895.3042" },
        "scalars": {
            "agentAuthMgrAdminMode.0": "enable",
            "1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0": "5 Secs ( 12.0%)"
        },
        "tables": {
            "agentAuthMgrPortHostMode": [
                { "index": "3", "fields": { "agentAuthMgrPortHostMode": "multiHost" } }
            ]
        },
        "ports": { "3": 1003 }
    }"#;

    fn query() -> SnapshotQuery {
        SnapshotQuery::new(serde_json::from_str(SNAPSHOT_JSON).unwrap())
    }

    #[tokio::test]
    async fn test_get_scalar() {
        let q = query();
        let device = q.device().clone();
        let opts = QueryOptions::new();

        assert_eq!(
            q.get(&device, "agentAuthMgrAdminMode.0", &opts).await.unwrap().as_deref(),
            Some("enable")
        );
        assert_eq!(
            q.get(&device, ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0", &opts)
                .await
                .unwrap()
                .as_deref(),
            Some("5 Secs ( 12.0%)")
        );
        assert_eq!(q.get(&device, "sysDescr.0", &opts).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_walk_recorded_table() {
        let q = query();
        let device = q.device().clone();
        let table = q
            .walk(&device, "agentAuthMgrPortHostMode", &QueryOptions::new())
            .await
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].index, "3");
        assert_eq!(table.rows()[0].get("agentAuthMgrPortHostMode"), Some("multiHost"));
    }

    #[tokio::test]
    async fn test_walk_numeric_subtree_from_scalars() {
        let q = query();
        let device = q.device().clone();
        let table = q
            .walk(&device, "1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9", &QueryOptions::new())
            .await
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].index, "0");
        assert_eq!(table.rows()[0].first_value(), Some("5 Secs ( 12.0%)"));
    }

    #[tokio::test]
    async fn test_walk_emits_each_instance_once() {
        let root = "1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0";
        let mut snapshot = query().snapshot().clone();
        snapshot.scalars.clear();
        snapshot.scalars.insert(root.to_string(), "5 Secs ( 12.0%)".to_string());
        snapshot.scalars.insert(format!(".{}", root), "5 Secs ( 12.0%)".to_string());
        snapshot.scalars.insert(format!("{}.1", root), "5 Secs ( 3.0%)".to_string());
        snapshot.scalars.insert(format!(".{}.1", root), "5 Secs ( 3.0%)".to_string());
        let q = SnapshotQuery::new(snapshot);
        let device = q.device().clone();

        for walked in [root.to_string(), format!(".{}", root)] {
            let table = q.walk(&device, &walked, &QueryOptions::new()).await.unwrap();
            assert_eq!(
                table.iter().map(|row| row.index.as_str()).collect::<Vec<_>>(),
                vec!["", "1"]
            );
        }
    }

    #[tokio::test]
    async fn test_walk_missing_is_empty() {
        let q = query();
        let device = q.device().clone();
        let table = q
            .walk(&device, "agentAuthMgrClientStatusTable", &QueryOptions::new())
            .await
            .unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_other_device_is_an_error() {
        let q = query();
        let other = Device::new(2, ".1.3.6.1.4.1.674.10895.3042");
        let err = q
            .get(&other, "agentAuthMgrAdminMode.0", &QueryOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(q.port_id_from_if_index(3, &other).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_port_cache() {
        let q = query();
        let device = q.device().clone();
        assert_eq!(q.port_id_from_if_index(3, &device).await.unwrap(), Some(1003));
        assert_eq!(q.port_id_from_if_index(4, &device).await.unwrap(), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();

        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.device.hostname, "sw1");
        assert_eq!(snapshot.ports.get(&3), Some(&1003));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Snapshot::load("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, DriverError::Io { .. }));
    }
}
