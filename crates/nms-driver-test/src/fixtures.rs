//! Test fixtures for driver scenarios
//!
//! Provides reusable agent snapshots and query wrappers for driver testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use nms_driver_common::{
    DriverError, DriverResult, PortCache, QueryOptions, Snapshot, SnapshotQuery, SnapshotRow,
    SnmpQuery, SnmpTable,
};
use nms_types::{Device, DeviceId};

/// Builds a [`Snapshot`] one recorded answer at a time
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Start a snapshot for a device
    pub fn new(device_id: u64, sys_object_id: &str) -> Self {
        let device = Device::new(DeviceId::new(device_id), sys_object_id)
            .with_hostname(format!("test-switch-{}", device_id));
        Self {
            snapshot: Snapshot::new(device),
        }
    }

    /// Record a scalar answer
    pub fn scalar(mut self, oid: impl Into<String>, value: impl Into<String>) -> Self {
        self.snapshot.scalars.insert(oid.into(), value.into());
        self
    }

    /// Record one row of a walk
    pub fn row(mut self, root: impl Into<String>, row: SnapshotRow) -> Self {
        self.snapshot.tables.entry(root.into()).or_default().push(row);
        self
    }

    /// Record a single-column row, the column named after the root
    pub fn column(
        self,
        root: &str,
        index: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let row = SnapshotRow {
            index: index.into(),
            fields: BTreeMap::from([(root.to_string(), value.into())]),
        };
        self.row(root, row)
    }

    /// Map an interface index to a platform port id
    pub fn port(mut self, if_index: u32, port_id: u64) -> Self {
        self.snapshot.ports.insert(if_index, port_id);
        self
    }

    pub fn device(&self) -> &Device {
        &self.snapshot.device
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    /// Build a replay facade ready to hand to a driver
    pub fn query(self) -> Arc<SnapshotQuery> {
        Arc::new(SnapshotQuery::new(self.snapshot))
    }
}

/// Encodes text the way DNOS renders hex display strings, NUL terminated
pub fn encode_hex_string(text: &str) -> String {
    text.bytes()
        .map(|b| format!("{:02X}", b))
        .chain(std::iter::once("00".to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds one row of `agentAuthMgrClientStatusTable`
#[derive(Debug, Clone)]
pub struct ClientRowBuilder {
    index: String,
    fields: BTreeMap<String, String>,
}

impl ClientRowBuilder {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set an arbitrary column
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn mac(self, mac: &str) -> Self {
        self.field("agentAuthMgrClientMacAddress", mac)
    }

    pub fn interface(self, if_index: impl ToString) -> Self {
        self.field("agentAuthMgrInterface", if_index.to_string())
    }

    /// User name, hex encoded as the agent reports it
    pub fn user_name(self, name: &str) -> Self {
        self.field("agentAuthMgrClientUserName", encode_hex_string(name))
    }

    pub fn auth_state(self, state: &str) -> Self {
        self.field("agentAuthMgrClientAuthState", state)
    }

    pub fn auth_status(self, status: &str) -> Self {
        self.field("agentAuthMgrClientAuthstatus", status)
    }

    pub fn vlan(self, vlan: &str) -> Self {
        self.field("agentAuthMgrClientVlanAssigned", vlan)
    }

    pub fn vlan_reason(self, reason: &str) -> Self {
        self.field("agentAuthMgrClientAuthVlanAssignedReason", reason)
    }

    pub fn session_timeout(self, seconds: u64) -> Self {
        self.field("agentAuthMgrClientSessionTimeout", seconds.to_string())
    }

    pub fn session_time(self, seconds: u64) -> Self {
        self.field("agentAuthMgrClientSessionTime", seconds.to_string())
    }

    pub fn method(self, method: &str) -> Self {
        self.field("agentAuthMgrClientAuthMethod", method)
    }

    pub fn build(self) -> SnapshotRow {
        SnapshotRow {
            index: self.index,
            fields: self.fields,
        }
    }
}

/// Common PowerConnect agent fixtures
pub mod powerconnect_fixtures {
    use super::*;

    pub const ADMIN_MODE: &str = "agentAuthMgrAdminMode.0";
    pub const CLIENT_STATUS_TABLE: &str = "agentAuthMgrClientStatusTable";
    pub const PORT_HOST_MODE: &str = "agentAuthMgrPortHostMode";

    pub const PC5524_SYS_OBJECT_ID: &str = ".1.3.6.1.4.1.674.10895.3020";
    pub const N2048_SYS_OBJECT_ID: &str = ".1.3.6.1.4.1.674.10895.3063";
    pub const PC6248_SYS_OBJECT_ID: &str = ".1.3.6.1.4.1.674.10895.3010";

    pub const RADLAN_CPU_UTIL: &str = ".1.3.6.1.4.1.89.1.7.0";
    pub const DNOS_CPU_LOAD: &str = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9.0";
    pub const FASTPATH_CPU_LOAD: &str = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.4.0";

    /// Typical DNOS CPU load string
    pub const LOAD_STRING: &str =
        "    5 Secs ( 12.3456%)   60 Secs ( 9.1241%)  300 Secs ( 8.0002%)";

    /// 55xx switch reporting 17% utilization
    pub fn nv55xx_switch(device_id: u64) -> SnapshotBuilder {
        SnapshotBuilder::new(device_id, PC5524_SYS_OBJECT_ID).scalar(RADLAN_CPU_UTIL, "17")
    }

    /// DNOS switch with one CPU load instance
    pub fn dnos_switch(device_id: u64) -> SnapshotBuilder {
        SnapshotBuilder::new(device_id, N2048_SYS_OBJECT_ID).scalar(DNOS_CPU_LOAD, LOAD_STRING)
    }

    /// DNOS switch with the authentication manager enabled and one client
    /// authorized on interface 5
    pub fn nac_enabled_switch(device_id: u64) -> SnapshotBuilder {
        SnapshotBuilder::new(device_id, N2048_SYS_OBJECT_ID)
            .scalar(ADMIN_MODE, "enable")
            .row(CLIENT_STATUS_TABLE, authorized_client("1", "00:11:22:33:44:55", 5))
            .column(PORT_HOST_MODE, "5", "multiAuth")
            .port(5, 1005)
    }

    /// Client that authenticated and was authorized by 802.1X
    pub fn authorized_client(index: &str, mac: &str, if_index: u32) -> SnapshotRow {
        ClientRowBuilder::new(index)
            .mac(mac)
            .interface(if_index)
            .user_name("alice")
            .auth_state("success")
            .auth_status("authorized")
            .vlan("10")
            .vlan_reason("radius")
            .session_timeout(3600)
            .session_time(120)
            .method("dot1x")
            .build()
    }
}

/// Kind of a recorded facade request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Get,
    Walk,
}

/// One request seen by a [`RecordingQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCall {
    pub kind: QueryKind,
    pub target: String,
    pub options: QueryOptions,
}

/// Wraps a facade and records every request in order
pub struct RecordingQuery<Q> {
    inner: Q,
    calls: Mutex<Vec<QueryCall>>,
}

impl<Q> RecordingQuery<Q> {
    pub fn new(inner: Q) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<QueryCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Targets of the requests seen so far
    pub fn targets(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.target).collect()
    }

    fn record(&self, kind: QueryKind, target: &str, options: &QueryOptions) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(QueryCall {
                kind,
                target: target.to_string(),
                options: options.clone(),
            });
        }
    }
}

#[async_trait]
impl<Q: SnmpQuery> SnmpQuery for RecordingQuery<Q> {
    async fn get(
        &self,
        device: &Device,
        oid: &str,
        options: &QueryOptions,
    ) -> DriverResult<Option<String>> {
        self.record(QueryKind::Get, oid, options);
        self.inner.get(device, oid, options).await
    }

    async fn walk(
        &self,
        device: &Device,
        root: &str,
        options: &QueryOptions,
    ) -> DriverResult<SnmpTable> {
        self.record(QueryKind::Walk, root, options);
        self.inner.walk(device, root, options).await
    }
}

#[async_trait]
impl<Q: PortCache> PortCache for RecordingQuery<Q> {
    async fn port_id_from_if_index(
        &self,
        if_index: u32,
        device: &Device,
    ) -> DriverResult<Option<u64>> {
        self.inner.port_id_from_if_index(if_index, device).await
    }
}

/// Facade whose every request fails, optionally only for some targets
#[derive(Debug, Clone)]
pub struct FailingQuery<Q = SnapshotQuery> {
    inner: Option<Q>,
    fail_on: Vec<String>,
}

impl FailingQuery {
    /// Fails every request
    pub fn always() -> Self {
        Self {
            inner: None,
            fail_on: Vec::new(),
        }
    }
}

impl<Q> FailingQuery<Q> {
    /// Fails requests for `target`, answering the rest from `inner`
    pub fn on(inner: Q, target: impl Into<String>) -> Self {
        Self {
            inner: Some(inner),
            fail_on: vec![target.into()],
        }
    }

    fn check(&self, device: &Device, target: &str) -> DriverResult<&Q> {
        match &self.inner {
            Some(inner) if !self.fail_on.iter().any(|t| t == target) => Ok(inner),
            _ => Err(DriverError::snmp(
                device.hostname.clone(),
                target,
                "Timeout: No Response",
            )),
        }
    }
}

#[async_trait]
impl<Q: SnmpQuery> SnmpQuery for FailingQuery<Q> {
    async fn get(
        &self,
        device: &Device,
        oid: &str,
        options: &QueryOptions,
    ) -> DriverResult<Option<String>> {
        self.check(device, oid)?.get(device, oid, options).await
    }

    async fn walk(
        &self,
        device: &Device,
        root: &str,
        options: &QueryOptions,
    ) -> DriverResult<SnmpTable> {
        self.check(device, root)?.walk(device, root, options).await
    }
}

/// Port cache whose lookups always fail
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPortCache;

#[async_trait]
impl PortCache for FailingPortCache {
    async fn port_id_from_if_index(
        &self,
        if_index: u32,
        _device: &Device,
    ) -> DriverResult<Option<u64>> {
        Err(DriverError::port_cache(if_index, "port cache unavailable"))
    }
}
