/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use crate::domain::{
    readers, Battery, Connectivity, Identity, ManualInspection, Meta, QcReport, ReportError,
    SpecSection, SystemCheck,
};
use crate::ports::{InventorySource, QcReportingService};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Domain service that assembles the QC report
///
/// Runs the four pipeline stages (identity, specs, battery,
/// connectivity/system) strictly in sequence, each consuming its own
/// inventory tables.
/// The report is composed once at the end from the stage return values;
/// no section is mutated after assembly.
pub struct ReportAssemblyService {
    /// Inventory source (platform-specific)
    source: Arc<dyn InventorySource>,
}

impl ReportAssemblyService {
    pub fn new(source: Arc<dyn InventorySource>) -> Self {
        Self { source }
    }

    /// Stage 1: machine identity.
    async fn read_identity(&self) -> Result<Identity, ReportError> {
        let system = self
            .source
            .computer_system()
            .await
            .map_err(|e| ReportError::StageFailed(format!("identity collection failed: {}", e)))?;
        let firmware = self
            .source
            .firmware()
            .await
            .map_err(|e| ReportError::StageFailed(format!("firmware read failed: {}", e)))?;
        Ok(readers::read_identity(&system, &firmware))
    }

    /// Stage 2: hardware specs.
    ///
    /// Re-queries the computer-system table for the memory total rather
    /// than sharing state with the identity stage; reads are idempotent
    /// and the stages stay independent.
    async fn read_specs(&self) -> Result<SpecSection, ReportError> {
        let processor = self
            .source
            .processor()
            .await
            .map_err(|e| ReportError::StageFailed(format!("CPU collection failed: {}", e)))?;
        let system = self
            .source
            .computer_system()
            .await
            .map_err(|e| ReportError::StageFailed(format!("memory total read failed: {}", e)))?;
        let modules = self
            .source
            .memory_modules()
            .await
            .map_err(|e| ReportError::StageFailed(format!("memory modules read failed: {}", e)))?;
        let controllers = self.source.video_controllers().await.map_err(|e| {
            ReportError::StageFailed(format!("video controller read failed: {}", e))
        })?;
        let disks = self
            .source
            .disk_drives()
            .await
            .map_err(|e| ReportError::StageFailed(format!("disk drive read failed: {}", e)))?;

        Ok(SpecSection {
            cpu: readers::read_cpu(&processor),
            ram: readers::read_ram(&system, &modules),
            gpu: readers::read_gpus(&controllers),
            storage: readers::read_storage(&disks),
        })
    }

    /// Stage 3: battery, with its own recovery boundary. A missing table
    /// is the normal case on desktops and is never an error for the run.
    async fn read_battery(&self) -> Battery {
        match self.source.battery_capacities().await {
            Ok(records) => readers::evaluate_battery(&records),
            Err(e) => {
                warn!("battery tables unavailable, reporting not present: {}", e);
                Battery::not_present()
            }
        }
    }

    /// Stage 4a: connectivity classification over the flat device list.
    async fn read_connectivity(&self) -> Connectivity {
        match self.source.pnp_devices().await {
            Ok(devices) => {
                debug!("classifying {} attached devices", devices.len());
                readers::classify_connectivity(&devices)
            }
            Err(e) => {
                warn!("device enumeration failed, connectivity defaults used: {}", e);
                Connectivity::default()
            }
        }
    }

    /// Stage 4b: OS identity and driver-error collection.
    async fn read_system_check(&self) -> SystemCheck {
        let driver_issues = match self.source.error_devices().await {
            Ok(devices) => readers::collect_driver_issues(&devices),
            Err(e) => {
                warn!("error-device enumeration failed: {}", e);
                Vec::new()
            }
        };

        match self.source.operating_system().await {
            Ok(os) => readers::read_system_check(&os, driver_issues),
            Err(e) => {
                warn!("OS identity read failed: {}", e);
                SystemCheck {
                    driver_issues,
                    ..SystemCheck::default()
                }
            }
        }
    }
}

#[async_trait]
impl QcReportingService for ReportAssemblyService {
    async fn assemble_report(&self) -> QcReport {
        let meta = Meta::now();
        info!("hardware scan started");

        let mut run_error: Option<String> = None;

        let identity = match self.read_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                error!("identity stage failed: {}", e);
                run_error = Some(e.to_string());
                Identity::fallback()
            }
        };

        // An identity failure aborts the combined identity+specs stage.
        let specs = if run_error.is_none() {
            match self.read_specs().await {
                Ok(specs) => specs,
                Err(e) => {
                    error!("spec stage failed: {}", e);
                    run_error = Some(e.to_string());
                    SpecSection::default()
                }
            }
        } else {
            SpecSection::default()
        };

        let battery = self.read_battery().await;
        let connectivity = self.read_connectivity().await;
        let system_check = self.read_system_check().await;

        info!(
            "hardware scan finished for serial {}",
            identity.serial_number
        );

        QcReport {
            meta,
            identity,
            specs,
            battery,
            connectivity,
            system_check,
            manual_inspection: ManualInspection::default(),
            error: run_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SystemError, FALLBACK_SERIAL};
    use crate::ports::{
        BatteryCapacityRecord, ComputerSystemRecord, DiskDriveRecord, FirmwareRecord,
        MemoryModuleRecord, OperatingSystemRecord, PnpDeviceRecord, ProcessorRecord,
        VideoControllerRecord,
    };

    /// Inventory source backed by fixtures, with per-table failure switches.
    #[derive(Default)]
    struct MockInventorySource {
        fail_computer_system: bool,
        fail_processor: bool,
        fail_battery: bool,
        fail_pnp: bool,
    }

    fn table_error(table: &str) -> SystemError {
        SystemError::QueryFailed {
            table: table.to_string(),
            detail: "mock failure".to_string(),
        }
    }

    #[async_trait]
    impl InventorySource for MockInventorySource {
        async fn computer_system(&self) -> Result<ComputerSystemRecord, SystemError> {
            if self.fail_computer_system {
                return Err(table_error("computer_system"));
            }
            Ok(ComputerSystemRecord {
                manufacturer: Some("LENOVO ".to_string()),
                model: Some("ThinkPad T480".to_string()),
                total_memory_bytes: Some(17_179_869_184),
            })
        }

        async fn firmware(&self) -> Result<FirmwareRecord, SystemError> {
            Ok(FirmwareRecord {
                serial_number: Some("PF0ABCDE".to_string()),
                version: Some("N24ET65W".to_string()),
            })
        }

        async fn processor(&self) -> Result<ProcessorRecord, SystemError> {
            if self.fail_processor {
                return Err(table_error("processor"));
            }
            Ok(ProcessorRecord {
                name: Some("Intel(R) Core(TM) i5-8250U".to_string()),
                cores: Some(4),
                threads: Some(8),
            })
        }

        async fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, SystemError> {
            Ok(vec![MemoryModuleRecord {
                speed_mhz: Some(2400),
                memory_type: Some("DDR4".to_string()),
            }])
        }

        async fn video_controllers(&self) -> Result<Vec<VideoControllerRecord>, SystemError> {
            Ok(vec![VideoControllerRecord {
                name: Some("Intel(R) UHD Graphics 620".to_string()),
            }])
        }

        async fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, SystemError> {
            Ok(vec![DiskDriveRecord {
                model: Some("Samsung SSD 860".to_string()),
                media_type: None,
                size_bytes: Some(500_107_862_016),
                status: Some("OK".to_string()),
            }])
        }

        async fn battery_capacities(&self) -> Result<Vec<BatteryCapacityRecord>, SystemError> {
            if self.fail_battery {
                return Err(table_error("battery"));
            }
            Ok(vec![BatteryCapacityRecord {
                design_capacity_mwh: Some(5000),
                full_charge_capacity_mwh: Some(4000),
            }])
        }

        async fn pnp_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
            if self.fail_pnp {
                return Err(table_error("pnp_devices"));
            }
            Ok(vec![
                PnpDeviceRecord {
                    name: Some("Intel(R) Wi-Fi 6 AX201".to_string()),
                },
                PnpDeviceRecord {
                    name: Some("Intel(R) Wireless Bluetooth(R)".to_string()),
                },
                PnpDeviceRecord {
                    name: Some("Integrated Camera".to_string()),
                },
            ])
        }

        async fn error_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
            Ok(vec![PnpDeviceRecord {
                name: Some("Unknown PCI Device".to_string()),
            }])
        }

        async fn operating_system(&self) -> Result<OperatingSystemRecord, SystemError> {
            Ok(OperatingSystemRecord {
                caption: Some("Microsoft Windows 11 Pro".to_string()),
                architecture: Some("64-bit".to_string()),
            })
        }
    }

    fn service(source: MockInventorySource) -> ReportAssemblyService {
        ReportAssemblyService::new(Arc::new(source))
    }

    #[tokio::test]
    async fn happy_path_assembles_every_section() {
        let report = service(MockInventorySource::default()).assemble_report().await;

        assert!(report.error.is_none());
        assert_eq!(report.identity.brand, "LENOVO");
        assert_eq!(report.identity.serial_number, "PF0ABCDE");
        assert_eq!(report.specs.cpu.cores, 4);
        assert_eq!(report.specs.ram.total_gb, 16);
        assert_eq!(report.specs.storage[0].health_percent, 100);
        assert!(report.battery.present);
        assert_eq!(report.battery.wear_level_percent, 20.0);
        assert_eq!(report.connectivity.wifi_module, "Intel(R) Wi-Fi 6 AX201");
        assert!(report.connectivity.bluetooth_present);
        assert!(report.connectivity.webcam_present);
        assert_eq!(report.system_check.driver_issues, vec!["Unknown PCI Device"]);
    }

    #[tokio::test]
    async fn identity_failure_keeps_schema_complete() {
        let report = service(MockInventorySource {
            fail_computer_system: true,
            ..Default::default()
        })
        .assemble_report()
        .await;

        assert!(report.error.is_some());
        assert_eq!(report.identity.serial_number, FALLBACK_SERIAL);
        // Combined stage aborted: specs fall back to defaults.
        assert_eq!(report.specs.cpu.cores, 0);
        assert_eq!(report.specs.ram.speed, "Unknown");
        // Later stages still ran.
        assert!(report.battery.present);
        assert!(report.connectivity.bluetooth_present);

        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "meta",
            "identity",
            "specs",
            "battery",
            "connectivity",
            "system_check",
            "manual_inspection",
            "error",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[tokio::test]
    async fn spec_failure_preserves_collected_identity() {
        let report = service(MockInventorySource {
            fail_processor: true,
            ..Default::default()
        })
        .assemble_report()
        .await;

        assert!(report.error.is_some());
        assert_eq!(report.identity.serial_number, "PF0ABCDE");
        assert_eq!(report.specs.cpu.name, "");
        assert!(report.battery.present);
    }

    #[tokio::test]
    async fn battery_failure_never_propagates() {
        let report = service(MockInventorySource {
            fail_battery: true,
            ..Default::default()
        })
        .assemble_report()
        .await;

        assert!(report.error.is_none());
        assert!(!report.battery.present);
        assert_eq!(report.battery.design_capacity_mwh, 0);
    }

    #[tokio::test]
    async fn pnp_failure_recovers_to_default_connectivity() {
        let report = service(MockInventorySource {
            fail_pnp: true,
            ..Default::default()
        })
        .assemble_report()
        .await;

        assert!(report.error.is_none());
        assert_eq!(report.connectivity.wifi_module, "Not Detected");
        assert!(!report.connectivity.bluetooth_present);
        assert_eq!(report.connectivity.audio_device, "Standard Audio");
    }

    #[tokio::test]
    async fn repeated_runs_differ_only_in_timestamp() {
        let svc = service(MockInventorySource::default());
        let mut first = serde_json::to_value(svc.assemble_report().await).unwrap();
        let mut second = serde_json::to_value(svc.assemble_report().await).unwrap();

        first["meta"]
            .as_object_mut()
            .unwrap()
            .remove("scan_timestamp");
        second["meta"]
            .as_object_mut()
            .unwrap()
            .remove("scan_timestamp");
        assert_eq!(first, second);
    }
}
