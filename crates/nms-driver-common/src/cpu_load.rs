//! Generic CPU-load table driver.
//!
//! Many embedded switch agents (VxWorks based ones in particular) publish
//! processor load as a small table or a single instance below a vendor root.
//! This driver discovers one `table-cpu` processor per row found under the
//! root and polls each one by its stored OID. Vendor drivers hold one of these
//! and delegate to it for whatever they do not handle themselves.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

use nms_types::{Device, Oid};

use crate::driver::{ProcessorDiscovery, ProcessorPolling};
use crate::error::DriverResult;
use crate::processor::{
    parse_usage, Processor, ProcessorReadings, ProcessorType, StoredProcessor,
};
use crate::snmp::{QueryOptions, SnmpQuery};

/// Discovers and polls processors found under a CPU-load root.
#[derive(Clone)]
pub struct CpuLoadTable {
    snmp: Arc<dyn SnmpQuery>,
    root: Oid,
}

impl CpuLoadTable {
    pub fn new(snmp: Arc<dyn SnmpQuery>, root: Oid) -> Self {
        Self { snmp, root }
    }

    pub fn root(&self) -> &Oid {
        &self.root
    }

    /// Polls a single stored processor.
    pub async fn poll_one(
        &self,
        device: &Device,
        processor: &StoredProcessor,
    ) -> DriverResult<Option<u8>> {
        let raw = self
            .snmp
            .get(device, processor.oid.as_str(), &QueryOptions::new())
            .await?;

        let usage = raw.as_deref().and_then(parse_usage);
        if usage.is_none() {
            debug!(
                processor_id = processor.processor_id,
                oid = %processor.oid,
                raw = ?raw,
                "No usable CPU load value"
            );
        }
        Ok(usage)
    }
}

impl std::fmt::Debug for CpuLoadTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuLoadTable")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProcessorDiscovery for CpuLoadTable {
    #[instrument(skip(self, device), fields(device = %device.device_id, root = %self.root))]
    async fn discover_processors(&self, device: &Device) -> DriverResult<Vec<Processor>> {
        let table = self
            .snmp
            .walk(device, self.root.as_str(), &QueryOptions::new())
            .await?;

        if table.is_empty() {
            trace!("CPU load root returned no rows");
            return Ok(Vec::new());
        }

        let mut processors = Vec::with_capacity(table.len());
        for (position, row) in table.iter().enumerate() {
            let oid = match self.root.join_index(&row.index) {
                Ok(oid) => oid,
                Err(e) => {
                    warn!(index = %row.index, "Skipping CPU load row with bad index: {}", e);
                    continue;
                }
            };

            if row.first_value().and_then(parse_usage).is_none() {
                debug!(oid = %oid, "Skipping CPU load row without a load value");
                continue;
            }

            processors.push(Processor::discover(
                ProcessorType::TableCpu,
                device.device_id,
                oid,
                position as u32,
            ));
        }

        debug!("Discovered {} CPU load processor(s)", processors.len());
        Ok(processors)
    }
}

#[async_trait]
impl ProcessorPolling for CpuLoadTable {
    #[instrument(skip(self, device, processors), fields(device = %device.device_id))]
    async fn poll_processors(
        &self,
        device: &Device,
        processors: &[StoredProcessor],
    ) -> DriverResult<ProcessorReadings> {
        let mut readings = ProcessorReadings::new();
        for processor in processors {
            let usage = self.poll_one(device, processor).await?;
            readings.insert(processor.processor_id, usage);
        }
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;
    use crate::snmp::{SnmpTable, TableRow};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const ROOT: &str = ".1.3.6.1.4.1.674.10895.5000.2.6132.1.1.1.1.4.9";

    #[derive(Default)]
    struct FakeSnmp {
        scalars: HashMap<String, String>,
        walks: HashMap<String, SnmpTable>,
        fail: bool,
    }

    #[async_trait]
    impl SnmpQuery for FakeSnmp {
        async fn get(
            &self,
            device: &Device,
            oid: &str,
            _options: &QueryOptions,
        ) -> DriverResult<Option<String>> {
            if self.fail {
                return Err(DriverError::snmp(device.hostname.clone(), oid, "Timeout"));
            }
            Ok(self.scalars.get(oid).cloned())
        }

        async fn walk(
            &self,
            _device: &Device,
            root: &str,
            _options: &QueryOptions,
        ) -> DriverResult<SnmpTable> {
            Ok(self.walks.get(root).cloned().unwrap_or_default())
        }
    }

    fn device() -> Device {
        Device::new(7, ".1.3.6.1.4.1.674.10895.3042").with_hostname("sw7")
    }

    #[tokio::test]
    async fn test_discover_one_per_row() {
        let mut snmp = FakeSnmp::default();
        snmp.walks.insert(
            ROOT.to_string(),
            vec![
                TableRow::new("0").with_field(ROOT, "5 Secs ( 10.5%) 60 Secs ( 9.0%)"),
                TableRow::new("1").with_field(ROOT, "42"),
            ]
            .into_iter()
            .collect(),
        );
        let driver = CpuLoadTable::new(Arc::new(snmp), ROOT.parse().unwrap());

        let found = driver.discover_processors(&device()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].processor_type, ProcessorType::TableCpu);
        assert_eq!(found[0].oid.as_str(), format!("{}.0", ROOT));
        assert_eq!(found[1].index, 1);
        assert!(found.iter().all(|p| p.usage == 0));
    }

    #[tokio::test]
    async fn test_discover_skips_rows_without_load() {
        let mut snmp = FakeSnmp::default();
        snmp.walks.insert(
            ROOT.to_string(),
            vec![TableRow::new("0").with_field(ROOT, "not supported")]
                .into_iter()
                .collect(),
        );
        let driver = CpuLoadTable::new(Arc::new(snmp), ROOT.parse().unwrap());

        assert!(driver.discover_processors(&device()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_discover_empty_walk() {
        let driver = CpuLoadTable::new(Arc::new(FakeSnmp::default()), ROOT.parse().unwrap());
        assert!(driver.discover_processors(&device()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_poll_every_record_gets_an_entry() {
        let mut snmp = FakeSnmp::default();
        snmp.scalars.insert(
            format!("{}.0", ROOT),
            "5 Secs ( 33.3%) 60 Secs ( 20.0%) 300 Secs ( 10.0%)".to_string(),
        );
        let driver = CpuLoadTable::new(Arc::new(snmp), ROOT.parse().unwrap());

        let processors = vec![
            StoredProcessor {
                processor_id: 1,
                processor_type: ProcessorType::TableCpu,
                oid: format!("{}.0", ROOT).parse().unwrap(),
            },
            StoredProcessor {
                processor_id: 2,
                processor_type: ProcessorType::TableCpu,
                oid: format!("{}.5", ROOT).parse().unwrap(),
            },
        ];

        let readings = driver.poll_processors(&device(), &processors).await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[&1], Some(33));
        assert_eq!(readings[&2], None);
    }

    #[tokio::test]
    async fn test_poll_propagates_query_failure() {
        let snmp = FakeSnmp {
            fail: true,
            ..Default::default()
        };
        let driver = CpuLoadTable::new(Arc::new(snmp), ROOT.parse().unwrap());
        let processors = vec![StoredProcessor {
            processor_id: 1,
            processor_type: ProcessorType::TableCpu,
            oid: format!("{}.0", ROOT).parse().unwrap(),
        }];

        let err = driver.poll_processors(&device(), &processors).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
