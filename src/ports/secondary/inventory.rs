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

use crate::domain::SystemError;
use async_trait::async_trait;

/// Raw computer-system record
///
/// Records carry source values as-is; trimming and defaulting belong to the
/// domain readers, not the adapters.
#[derive(Debug, Clone, Default)]
pub struct ComputerSystemRecord {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub total_memory_bytes: Option<u64>,
}

/// Raw firmware/BIOS record
#[derive(Debug, Clone, Default)]
pub struct FirmwareRecord {
    pub serial_number: Option<String>,
    pub version: Option<String>,
}

/// Raw processor record
#[derive(Debug, Clone, Default)]
pub struct ProcessorRecord {
    pub name: Option<String>,
    pub cores: Option<u32>,
    pub threads: Option<u32>,
}

/// Raw memory-module record (one per populated slot)
#[derive(Debug, Clone, Default)]
pub struct MemoryModuleRecord {
    pub speed_mhz: Option<u32>,
    pub memory_type: Option<String>,
}

/// Raw display-adapter record
#[derive(Debug, Clone, Default)]
pub struct VideoControllerRecord {
    pub name: Option<String>,
}

/// Raw physical-disk record
#[derive(Debug, Clone, Default)]
pub struct DiskDriveRecord {
    pub model: Option<String>,
    pub media_type: Option<String>,
    pub size_bytes: Option<u64>,
    pub status: Option<String>,
}

/// Raw battery capacity reading (static design vs. current full charge)
#[derive(Debug, Clone, Default)]
pub struct BatteryCapacityRecord {
    pub design_capacity_mwh: Option<u32>,
    pub full_charge_capacity_mwh: Option<u32>,
}

/// Raw plug-and-play device record
#[derive(Debug, Clone, Default)]
pub struct PnpDeviceRecord {
    pub name: Option<String>,
}

/// Raw operating-system record
#[derive(Debug, Clone, Default)]
pub struct OperatingSystemRecord {
    pub caption: Option<String>,
    pub architecture: Option<String>,
}

/// Secondary port - hardware inventory source
///
/// Abstracts the operating system's management interface as a set of
/// read-only tabular queries. Adapters implement this per platform; the
/// domain never learns how a table was obtained. Every query is attempted
/// exactly once per run, with no retry policy.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Computer-system identity and total physical memory
    async fn computer_system(&self) -> Result<ComputerSystemRecord, SystemError>;

    /// Firmware serial number and version
    async fn firmware(&self) -> Result<FirmwareRecord, SystemError>;

    /// Processor name and core/thread counts
    async fn processor(&self) -> Result<ProcessorRecord, SystemError>;

    /// One record per populated memory slot
    async fn memory_modules(&self) -> Result<Vec<MemoryModuleRecord>, SystemError>;

    /// Display adapters in enumeration order
    async fn video_controllers(&self) -> Result<Vec<VideoControllerRecord>, SystemError>;

    /// Physical disk drives
    async fn disk_drives(&self) -> Result<Vec<DiskDriveRecord>, SystemError>;

    /// Battery capacity tables; may be missing entirely on machines
    /// without a battery or sources that do not expose them
    async fn battery_capacities(&self) -> Result<Vec<BatteryCapacityRecord>, SystemError>;

    /// Flat, unordered enumeration of all attached devices
    async fn pnp_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError>;

    /// Devices currently reporting a nonzero configuration error code
    async fn error_devices(&self) -> Result<Vec<PnpDeviceRecord>, SystemError>;

    /// Operating-system caption and architecture
    async fn operating_system(&self) -> Result<OperatingSystemRecord, SystemError>;
}
