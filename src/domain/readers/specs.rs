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

//! Specification readers: CPU, RAM, GPU, storage

use super::identity::trimmed_or_unknown;
use crate::domain::{CpuSpec, RamSpec, StorageDevice};
use crate::ports::{
    ComputerSystemRecord, DiskDriveRecord, MemoryModuleRecord, ProcessorRecord,
    VideoControllerRecord,
};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Round a raw byte count to binary (1024-based) GB, nearest integer.
pub fn round_binary_gb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_GB).round() as u64
}

/// Copy processor fields verbatim; no derived computation.
pub fn read_cpu(record: &ProcessorRecord) -> CpuSpec {
    CpuSpec {
        name: trimmed_or_unknown(record.name.as_deref()),
        cores: record.cores.unwrap_or(0),
        threads: record.threads.unwrap_or(0),
    }
}

/// Derive the RAM section.
///
/// Total capacity comes from the computer-system record; slot count is the
/// number of populated module records. Type and speed are taken from the
/// first module only (a documented simplification, not an aggregate).
pub fn read_ram(system: &ComputerSystemRecord, modules: &[MemoryModuleRecord]) -> RamSpec {
    let first = modules.first();
    let speed = first
        .and_then(|m| m.speed_mhz)
        .map(|mhz| format!("{} MHz", mhz))
        .unwrap_or_else(|| "Unknown".to_string());
    let type_ = first
        .and_then(|m| m.memory_type.clone())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    RamSpec {
        total_gb: round_binary_gb(system.total_memory_bytes.unwrap_or(0)),
        slots_used: modules.len(),
        type_,
        speed,
    }
}

/// Collect display adapter names, preserving enumeration order, no dedup.
pub fn read_gpus(controllers: &[VideoControllerRecord]) -> Vec<String> {
    controllers
        .iter()
        .filter_map(|c| c.name.as_deref())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Coarse two-valued health score from a raw disk status string.
///
/// 100 iff the status is exactly "OK" (case-sensitive); anything else,
/// including "Pred Fail" or an absent status, scores 50. Not a SMART
/// computation.
pub fn storage_health(status: &str) -> u8 {
    if status == "OK" {
        100
    } else {
        50
    }
}

/// Normalize physical disk records.
pub fn read_storage(disks: &[DiskDriveRecord]) -> Vec<StorageDevice> {
    disks
        .iter()
        .map(|disk| {
            let status = disk
                .status
                .clone()
                .unwrap_or_else(|| "Unknown".to_string());
            StorageDevice {
                model: trimmed_or_unknown(disk.model.as_deref()),
                type_: disk
                    .media_type
                    .clone()
                    .unwrap_or_else(|| "Fixed Disk".to_string()),
                capacity_gb: round_binary_gb(disk.size_bytes.unwrap_or(0)),
                health_percent: storage_health(&status),
                smart_status: status,
            }
        })
        .collect()
}
