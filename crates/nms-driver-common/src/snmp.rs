//! SNMP query facade and port cache collaborator.
//!
//! Drivers never speak the wire protocol. They ask a [`SnmpQuery`] for a
//! scalar or a table walk and receive already decoded string values. How the
//! request is sent, retried or timed out is entirely the facade's business.

use async_trait::async_trait;
use std::collections::HashMap;

use nms_types::Device;

use crate::error::DriverResult;

/// Key-value tuple representing a column name and its decoded value.
pub type FieldValue = (String, String);

/// Collection of column values for one table row.
pub type FieldValues = Vec<FieldValue>;

/// Output options for a query.
///
/// Mirrors the knobs of the underlying tool chain: which MIB modules to load,
/// where to find them, and whether enumerations come back as their symbolic
/// names (`enable`) rather than numbers (`1`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub mibs: Vec<String>,
    pub mib_dir: Option<String>,
    pub hide_mib: bool,
    pub enum_strings: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds MIB modules used to resolve symbolic names.
    pub fn mibs<I, S>(mut self, mibs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mibs.extend(mibs.into_iter().map(Into::into));
        self
    }

    /// Sets the vendor MIB directory to search.
    pub fn mib_dir(mut self, dir: impl Into<String>) -> Self {
        self.mib_dir = Some(dir.into());
        self
    }

    /// Strips the `MODULE::` prefix from returned field names.
    pub fn hide_mib(mut self) -> Self {
        self.hide_mib = true;
        self
    }

    /// Returns enumerations as their symbolic string form.
    pub fn enum_strings(mut self) -> Self {
        self.enum_strings = true;
        self
    }
}

/// One row of a table walk.
///
/// `index` is the instance suffix below the table entry (possibly dotted and
/// possibly empty for scalar instances). Walking a bare numeric root yields
/// rows whose single field is named after that root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub index: String,
    pub fields: FieldValues,
}

impl TableRow {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            fields: FieldValues::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Value of the first column, used for single-column walks.
    pub fn first_value(&self) -> Option<&str> {
        self.fields.first().map(|(_, v)| v.as_str())
    }
}

/// Result of a table walk, in agent order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnmpTable {
    rows: Vec<TableRow>,
}

impl SnmpTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter()
    }

    /// Indexes one column by row index.
    ///
    /// Rows without the column are left out. Duplicate indexes keep the last
    /// value seen.
    pub fn values_by_index(&self, field: &str) -> HashMap<String, String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(field).map(|v| (row.index.clone(), v.to_string())))
            .collect()
    }
}

impl FromIterator<TableRow> for SnmpTable {
    fn from_iter<T: IntoIterator<Item = TableRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SnmpTable {
    type Item = &'a TableRow;
    type IntoIter = std::slice::Iter<'a, TableRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// The protocol query facade.
///
/// `Ok(None)` and an empty table mean "no data" and are not errors. `Err` is
/// reserved for failures of the facade itself and is propagated unchanged by
/// every driver.
#[async_trait]
pub trait SnmpQuery: Send + Sync {
    /// Fetches a single scalar value.
    async fn get(
        &self,
        device: &Device,
        oid: &str,
        options: &QueryOptions,
    ) -> DriverResult<Option<String>>;

    /// Walks a table, column or numeric subtree.
    async fn walk(
        &self,
        device: &Device,
        root: &str,
        options: &QueryOptions,
    ) -> DriverResult<SnmpTable>;
}

/// Resolves a device's interface index to the platform's port id.
#[async_trait]
pub trait PortCache: Send + Sync {
    /// Returns `None` when the interface is unknown to the platform.
    async fn port_id_from_if_index(
        &self,
        if_index: u32,
        device: &Device,
    ) -> DriverResult<Option<u64>>;
}
