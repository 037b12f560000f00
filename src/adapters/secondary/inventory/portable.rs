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

//! Best-effort inventory source for non-Windows machines
//!
//! Built on `sysinfo` for CPU/memory/disk inventory and the `battery` crate
//! for capacity readings. Tables with no portable equivalent (memory
//! modules, video controllers, plug-and-play devices) return empty lists so
//! the pipeline reports nothing detected instead of fabricating records.
//! Useful for development machines and integration tests; production QC
//! runs use the WMI source.

use crate::domain::SystemError;
use crate::ports::{
    BatteryCapacityRecord, ComputerSystemRecord, DiskDriveRecord, FirmwareRecord,
    InventorySource, MemoryModuleRecord, OperatingSystemRecord, PnpDeviceRecord,
    ProcessorRecord, VideoControllerRecord,
};
use async_trait::async_trait;
use battery::units::energy::watt_hour;
use log::debug;
use sysinfo::{Disks, System};

pub struct PortableInventorySource;

impl PortableInventorySource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PortableInventorySource {
    fn default() -> Self {
        Self::new()
    }
}

fn disk_kind_tag(kind: sysinfo::DiskKind) -> Option<String> {
    match kind {
        sysinfo::DiskKind::SSD => Some("SSD".to_string()),
        sysinfo::DiskKind::HDD => Some("HDD".to_string()),
        sysinfo::DiskKind::Unknown(_) => None,
    }
}

#[async_trait]
impl InventorySource for PortableInventorySource {
    async fn computer_system(&self) -> Result<ComputerSystemRecord, SystemError> {
        let mut sys = System::new();
        sys.refresh_memory();
        Ok(ComputerSystemRecord {
            // No portable manufacturer/model source; readers map these to
            // "Unknown".
            manufacturer: None,
            model: None,
            total_memory_bytes: Some(sys.total_memory()),
        })
    }

    async fn firmware(&self) -> Result<FirmwareRecord, SystemError> {
        Ok(FirmwareRecord {
            serial_number: None,
            version: None,
        })
    }

    async fn processor(&self) -> Result<ProcessorRecord, SystemError> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let name = sys.cpus().first().map(|cpu| cpu.brand().to_string());
        let threads = sys.cpus().len() as u32;
        let cores = sys
            .physical_core_count()
            .map(|count| count as u32)
            .unwrap_or(threads);
        Ok(ProcessorRecord {
            name,
            cores: Some(cores),
            threads: Some(threads),
        })
    }

    async fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, SystemError> {
        // Per-slot module data is not observable portably.
        Ok(Vec::new())
    }

    async fn video_controllers(&self) -> Result<Vec<VideoControllerRecord>, SystemError> {
        Ok(Vec::new())
    }

    async fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, SystemError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .iter()
            .map(|disk| DiskDriveRecord {
                model: Some(disk.name().to_string_lossy().to_string()),
                media_type: disk_kind_tag(disk.kind()),
                size_bytes: Some(disk.total_space()),
                // No portable SMART status; scores as degraded downstream.
                status: None,
            })
            .collect())
    }

    async fn battery_capacities(&self) -> Result<Vec<BatteryCapacityRecord>, SystemError> {
        let manager = battery::Manager::new()
            .map_err(|e| SystemError::ConnectionFailed(format!("battery manager: {}", e)))?;
        let batteries = manager
            .batteries()
            .map_err(|e| SystemError::TableMissing(format!("battery list: {}", e)))?;

        let mut records = Vec::new();
        for item in batteries {
            let batt = match item {
                Ok(batt) => batt,
                Err(e) => {
                    debug!("skipping unreadable battery: {}", e);
                    continue;
                }
            };
            let design_wh = batt.energy_full_design().get::<watt_hour>() as f64;
            let full_wh = batt.energy_full().get::<watt_hour>() as f64;
            records.push(BatteryCapacityRecord {
                design_capacity_mwh: Some((design_wh * 1000.0).round() as u32),
                full_charge_capacity_mwh: Some((full_wh * 1000.0).round() as u32),
            });
        }
        Ok(records)
    }

    async fn pnp_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
        // No portable flat device enumeration; connectivity legitimately
        // reports nothing detected.
        Ok(Vec::new())
    }

    async fn error_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
        Ok(Vec::new())
    }

    async fn operating_system(&self) -> Result<OperatingSystemRecord, SystemError> {
        Ok(OperatingSystemRecord {
            caption: System::long_os_version(),
            architecture: System::cpu_arch(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn processor_reports_positive_counts() {
        let source = PortableInventorySource::new();
        let cpu = source.processor().await.unwrap();
        assert!(cpu.threads.unwrap() > 0);
        assert!(cpu.cores.unwrap() > 0);
    }

    #[tokio::test]
    async fn memory_total_is_nonzero() {
        let source = PortableInventorySource::new();
        let system = source.computer_system().await.unwrap();
        assert!(system.total_memory_bytes.unwrap() > 0);
    }

    #[tokio::test]
    async fn unobservable_tables_are_empty_not_errors() {
        let source = PortableInventorySource::new();
        assert!(source.memory_modules().await.unwrap().is_empty());
        assert!(source.video_controllers().await.unwrap().is_empty());
        assert!(source.pnp_devices().await.unwrap().is_empty());
        assert!(source.error_devices().await.unwrap().is_empty());
    }

    #[test]
    fn disk_kinds_map_to_tags() {
        assert_eq!(disk_kind_tag(sysinfo::DiskKind::SSD).as_deref(), Some("SSD"));
        assert_eq!(disk_kind_tag(sysinfo::DiskKind::HDD).as_deref(), Some("HDD"));
        assert_eq!(disk_kind_tag(sysinfo::DiskKind::Unknown(0)), None);
    }
}
