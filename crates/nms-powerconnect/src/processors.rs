//! Processor discovery and polling for PowerConnect

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use nms_driver_common::{
    parse_usage, DriverResult, Processor, ProcessorDiscovery, ProcessorPolling,
    ProcessorReadings, ProcessorType, QueryOptions, StoredProcessor,
};
use nms_types::Device;

use crate::powerconnect::PowerConnect;
use crate::tables::RADLAN_CPU_UTIL_OID;
use crate::variant::PowerConnectVariant;

impl PowerConnect {
    /// Polls one 55xx utilization scalar
    async fn poll_scalar_cpu(
        &self,
        device: &Device,
        processor: &StoredProcessor,
    ) -> DriverResult<Option<u8>> {
        let raw = self
            .snmp
            .get(device, processor.oid.as_str(), &QueryOptions::new())
            .await?;

        let usage = raw.as_deref().and_then(parse_usage);
        trace!(
            processor_id = processor.processor_id,
            raw = ?raw,
            usage = ?usage,
            "Polled scalar CPU"
        );
        Ok(usage)
    }
}

#[async_trait]
impl ProcessorDiscovery for PowerConnect {
    #[instrument(skip(self, device), fields(device = %device.device_id, sys_object_id = %device.sys_object_id))]
    async fn discover_processors(&self, device: &Device) -> DriverResult<Vec<Processor>> {
        let variant = PowerConnectVariant::classify(&device.sys_object_id);
        debug!(variant = %variant, "Classified PowerConnect device");

        if variant == PowerConnectVariant::Nv55xx {
            return Ok(vec![Processor::discover(
                ProcessorType::ScalarCpu,
                device.device_id,
                RADLAN_CPU_UTIL_OID.parse()?,
                0,
            )]);
        }

        self.cpu_load_table(device)?
            .discover_processors(device)
            .await
    }
}

#[async_trait]
impl ProcessorPolling for PowerConnect {
    #[instrument(skip(self, device, processors), fields(device = %device.device_id, count = processors.len()))]
    async fn poll_processors(
        &self,
        device: &Device,
        processors: &[StoredProcessor],
    ) -> DriverResult<ProcessorReadings> {
        let base = self.cpu_load_table(device)?;
        let mut readings = ProcessorReadings::new();

        for processor in processors {
            match processor.processor_type {
                ProcessorType::ScalarCpu => {
                    let usage = self.poll_scalar_cpu(device, processor).await?;
                    readings.insert(processor.processor_id, usage);
                }
                _ => {
                    let polled = base
                        .poll_processors(device, std::slice::from_ref(processor))
                        .await?;
                    readings.extend(polled);
                }
            }
        }

        Ok(readings)
    }
}
