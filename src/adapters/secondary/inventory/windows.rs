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

//! WMI-backed inventory source for Windows targets
//!
//! Each query runs on a blocking task with a fresh COM apartment: WMI
//! connections are not `Send`, so they never cross an await point.

use crate::domain::SystemError;
use crate::ports::{
    BatteryCapacityRecord, ComputerSystemRecord, DiskDriveRecord, FirmwareRecord,
    InventorySource, MemoryModuleRecord, OperatingSystemRecord, PnpDeviceRecord,
    ProcessorRecord, VideoControllerRecord,
};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wmi::{COMLibrary, WMIConnection};

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_ComputerSystem")]
#[serde(rename_all = "PascalCase")]
struct Win32ComputerSystem {
    manufacturer: Option<String>,
    model: Option<String>,
    // CIM uint64 properties arrive as strings over the COM variant layer
    total_physical_memory: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_BIOS")]
#[serde(rename_all = "PascalCase")]
struct Win32Bios {
    serial_number: Option<String>,
    #[serde(rename = "SMBIOSBIOSVersion")]
    smbios_bios_version: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_Processor")]
#[serde(rename_all = "PascalCase")]
struct Win32Processor {
    name: Option<String>,
    number_of_cores: Option<u32>,
    number_of_logical_processors: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_PhysicalMemory")]
#[serde(rename_all = "PascalCase")]
struct Win32PhysicalMemory {
    speed: Option<u32>,
    #[serde(rename = "SMBIOSMemoryType")]
    smbios_memory_type: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_VideoController")]
#[serde(rename_all = "PascalCase")]
struct Win32VideoController {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_DiskDrive")]
#[serde(rename_all = "PascalCase")]
struct Win32DiskDrive {
    model: Option<String>,
    media_type: Option<String>,
    size: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "BatteryStaticData")]
#[serde(rename_all = "PascalCase")]
struct BatteryStaticData {
    designed_capacity: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "BatteryFullChargedCapacity")]
#[serde(rename_all = "PascalCase")]
struct BatteryFullChargedCapacity {
    full_charged_capacity: Option<u32>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_PnPEntity")]
#[serde(rename_all = "PascalCase")]
struct Win32PnpEntity {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename = "Win32_OperatingSystem")]
#[serde(rename_all = "PascalCase")]
struct Win32OperatingSystem {
    caption: Option<String>,
    #[serde(rename = "OSArchitecture")]
    os_architecture: Option<String>,
}

/// Map SMBIOS memory-type codes to the labels used in reports.
fn memory_type_label(code: u32) -> Option<String> {
    let label = match code {
        20 => "DDR",
        21 => "DDR2",
        24 => "DDR3",
        26 => "DDR4",
        30 => "LPDDR4",
        34 => "DDR5",
        35 => "LPDDR5",
        _ => return None,
    };
    Some(label.to_string())
}

/// Map WMI media-type vocabulary to the schema's disk type tags.
fn media_type_tag(media_type: &str) -> String {
    if media_type.contains("Fixed") {
        "Fixed Disk".to_string()
    } else if media_type.contains("External") {
        "External Disk".to_string()
    } else if media_type.contains("Removable") {
        "Removable Disk".to_string()
    } else {
        media_type.to_string()
    }
}

fn parse_u64(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn connection_error(e: wmi::WMIError) -> SystemError {
    SystemError::ConnectionFailed(e.to_string())
}

fn query_error(table: &str, e: wmi::WMIError) -> SystemError {
    SystemError::QueryFailed {
        table: table.to_string(),
        detail: e.to_string(),
    }
}

/// Run one query against the default CIMV2 namespace on a blocking task.
async fn query_table<T>(table: &'static str) -> Result<Vec<T>, SystemError>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let com = COMLibrary::new().map_err(connection_error)?;
        let connection = WMIConnection::new(com).map_err(connection_error)?;
        connection.query::<T>().map_err(|e| query_error(table, e))
    })
    .await
    .map_err(|e| SystemError::IoError(format!("blocking query task failed: {}", e)))?
}

/// Run one raw WQL query against the default namespace.
async fn raw_query<T>(table: &'static str, wql: &'static str) -> Result<Vec<T>, SystemError>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let com = COMLibrary::new().map_err(connection_error)?;
        let connection = WMIConnection::new(com).map_err(connection_error)?;
        connection
            .raw_query::<T>(wql)
            .map_err(|e| query_error(table, e))
    })
    .await
    .map_err(|e| SystemError::IoError(format!("blocking query task failed: {}", e)))?
}

/// Run one query against the `root\WMI` namespace, where the battery
/// capacity tables live.
async fn query_wmi_namespace<T>(table: &'static str) -> Result<Vec<T>, SystemError>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let com = COMLibrary::new().map_err(connection_error)?;
        let connection =
            WMIConnection::with_namespace_path("root\\WMI", com).map_err(connection_error)?;
        connection.query::<T>().map_err(|e| query_error(table, e))
    })
    .await
    .map_err(|e| SystemError::IoError(format!("blocking query task failed: {}", e)))?
}

/// Inventory source backed by the Windows management interface
pub struct WmiInventorySource;

impl WmiInventorySource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WmiInventorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventorySource for WmiInventorySource {
    async fn computer_system(&self) -> Result<ComputerSystemRecord, SystemError> {
        let rows: Vec<Win32ComputerSystem> = query_table("Win32_ComputerSystem").await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SystemError::TableMissing("Win32_ComputerSystem".to_string()))?;
        Ok(ComputerSystemRecord {
            manufacturer: row.manufacturer,
            model: row.model,
            total_memory_bytes: parse_u64(row.total_physical_memory),
        })
    }

    async fn firmware(&self) -> Result<FirmwareRecord, SystemError> {
        let rows: Vec<Win32Bios> = query_table("Win32_BIOS").await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SystemError::TableMissing("Win32_BIOS".to_string()))?;
        Ok(FirmwareRecord {
            serial_number: row.serial_number,
            version: row.smbios_bios_version,
        })
    }

    async fn processor(&self) -> Result<ProcessorRecord, SystemError> {
        let rows: Vec<Win32Processor> = query_table("Win32_Processor").await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SystemError::TableMissing("Win32_Processor".to_string()))?;
        Ok(ProcessorRecord {
            name: row.name,
            cores: row.number_of_cores,
            threads: row.number_of_logical_processors,
        })
    }

    async fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, SystemError> {
        let rows: Vec<Win32PhysicalMemory> = query_table("Win32_PhysicalMemory").await?;
        Ok(rows
            .into_iter()
            .map(|row| MemoryModuleRecord {
                speed_mhz: row.speed,
                memory_type: row.smbios_memory_type.and_then(memory_type_label),
            })
            .collect())
    }

    async fn video_controllers(&self) -> Result<Vec<VideoControllerRecord>, SystemError> {
        let rows: Vec<Win32VideoController> = query_table("Win32_VideoController").await?;
        Ok(rows
            .into_iter()
            .map(|row| VideoControllerRecord { name: row.name })
            .collect())
    }

    async fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, SystemError> {
        let rows: Vec<Win32DiskDrive> = query_table("Win32_DiskDrive").await?;
        Ok(rows
            .into_iter()
            .map(|row| DiskDriveRecord {
                model: row.model,
                media_type: row.media_type.as_deref().map(media_type_tag),
                size_bytes: parse_u64(row.size),
                status: row.status,
            })
            .collect())
    }

    async fn battery_capacities(&self) -> Result<Vec<BatteryCapacityRecord>, SystemError> {
        let static_rows: Vec<BatteryStaticData> = query_wmi_namespace("BatteryStaticData").await?;
        let full_rows: Vec<BatteryFullChargedCapacity> =
            query_wmi_namespace("BatteryFullChargedCapacity").await?;
        debug!(
            "battery tables: {} static rows, {} full-charge rows",
            static_rows.len(),
            full_rows.len()
        );
        Ok(static_rows
            .into_iter()
            .zip(full_rows)
            .map(|(static_row, full_row)| BatteryCapacityRecord {
                design_capacity_mwh: static_row.designed_capacity,
                full_charge_capacity_mwh: full_row.full_charged_capacity,
            })
            .collect())
    }

    async fn pnp_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
        let rows: Vec<Win32PnpEntity> = query_table("Win32_PnPEntity").await?;
        Ok(rows
            .into_iter()
            .map(|row| PnpDeviceRecord { name: row.name })
            .collect())
    }

    async fn error_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError> {
        let rows: Vec<Win32PnpEntity> = raw_query(
            "Win32_PnPEntity",
            "SELECT * FROM Win32_PnPEntity WHERE ConfigManagerErrorCode <> 0",
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| PnpDeviceRecord { name: row.name })
            .collect())
    }

    async fn operating_system(&self) -> Result<OperatingSystemRecord, SystemError> {
        let rows: Vec<Win32OperatingSystem> = query_table("Win32_OperatingSystem").await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SystemError::TableMissing("Win32_OperatingSystem".to_string()))?;
        Ok(OperatingSystemRecord {
            caption: row.caption,
            architecture: row.os_architecture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smbios_memory_codes_map_to_labels() {
        assert_eq!(memory_type_label(26).as_deref(), Some("DDR4"));
        assert_eq!(memory_type_label(34).as_deref(), Some("DDR5"));
        assert_eq!(memory_type_label(2), None);
    }

    #[test]
    fn media_type_vocabulary_maps_to_schema_tags() {
        assert_eq!(media_type_tag("Fixed hard disk media"), "Fixed Disk");
        assert_eq!(media_type_tag("External hard disk media"), "External Disk");
        assert_eq!(media_type_tag("Removable media"), "Removable Disk");
        assert_eq!(media_type_tag("Tape drive"), "Tape drive");
    }

    #[test]
    fn uint64_strings_parse_with_whitespace() {
        assert_eq!(parse_u64(Some(" 17179869184 ".to_string())), Some(17_179_869_184));
        assert_eq!(parse_u64(Some("garbage".to_string())), None);
        assert_eq!(parse_u64(None), None);
    }
}
