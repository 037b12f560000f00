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

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serial number substituted when the identity stage never produced one.
pub const FALLBACK_SERIAL: &str = "ERROR_READ";

/// Wi-Fi module label when no matching device was found.
pub const WIFI_NOT_DETECTED: &str = "Not Detected";

/// Fixed audio label. There is no real audio-device enumeration; downstream
/// consumers expect this exact constant.
pub const AUDIO_PLACEHOLDER: &str = "Standard Audio";

/// Fixed activation label; no activation probing is implemented.
pub const ACTIVATION_LABEL: &str = "Checked";

/// Represents the complete QC audit report (root aggregate)
///
/// All sections are always present; partial data is expressed through
/// sentinel/default values, never by omitting keys. The only conditional
/// key is `error`, attached when identity/spec collection failed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QcReport {
    /// Scan metadata
    pub meta: Meta,
    /// Machine identity (the report is keyed by its serial number)
    pub identity: Identity,
    /// Hardware specification inventory
    pub specs: SpecSection,
    /// Battery health evaluation
    pub battery: Battery,
    /// Connectivity hardware classification
    pub connectivity: Connectivity,
    /// OS and driver status
    pub system_check: SystemCheck,
    /// Physical-inspection checklist, filled by a human reviewer later
    pub manual_inspection: ManualInspection,
    /// Failure description when identity/spec collection aborted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QcReport {
    /// File name the report is written under, derived from the serial number.
    pub fn file_name(&self) -> String {
        format!("QC_{}.json", self.identity.file_safe_serial())
    }
}

/// Scan metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Meta {
    /// ISO-8601 wall-clock timestamp taken at scan start
    pub scan_timestamp: String,
    /// Collector version string
    pub script_version: String,
}

impl Meta {
    /// Capture the current wall clock and collector version.
    pub fn now() -> Self {
        Self {
            scan_timestamp: chrono::Local::now().to_rfc3339(),
            script_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Machine identity as reported by the management interface
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Identity {
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
    /// Device serial number (report identity key)
    pub serial_number: String,
    /// Firmware/BIOS version
    pub bios_version: String,
}

impl Identity {
    /// Fallback identity used when the identity stage failed outright, so a
    /// report file can still be named deterministically.
    pub fn fallback() -> Self {
        Self {
            brand: "Unknown".to_string(),
            model: "Unknown".to_string(),
            serial_number: FALLBACK_SERIAL.to_string(),
            bios_version: "Unknown".to_string(),
        }
    }

    /// Serial number with every path-unsafe character replaced by `_`.
    ///
    /// Alphanumerics and `-` pass through; everything else (slashes, spaces,
    /// OEM placeholders with dots) is mapped to `_`.
    pub fn file_safe_serial(&self) -> String {
        self.serial_number
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    }
}

/// Hardware specification inventory
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SpecSection {
    /// Processor
    pub cpu: CpuSpec,
    /// Memory
    pub ram: RamSpec,
    /// Display adapter names in enumeration order
    pub gpu: Vec<String>,
    /// Physical disks
    pub storage: Vec<StorageDevice>,
}

/// Processor specification
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CpuSpec {
    /// Processor name
    pub name: String,
    /// Physical core count
    pub cores: u32,
    /// Logical thread count
    pub threads: u32,
}

/// Memory specification
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RamSpec {
    /// Total capacity in binary GB, rounded to the nearest integer
    pub total_gb: u64,
    /// Number of populated module slots
    pub slots_used: usize,
    /// Memory type from the first module record, or "Unknown"
    #[serde(rename = "type")]
    pub type_: String,
    /// Speed from the first module record, or "Unknown"
    pub speed: String,
}

impl Default for RamSpec {
    fn default() -> Self {
        Self {
            total_gb: 0,
            slots_used: 0,
            type_: "Unknown".to_string(),
            speed: "Unknown".to_string(),
        }
    }
}

/// Physical disk entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageDevice {
    /// Disk model string
    pub model: String,
    /// Media type tag
    #[serde(rename = "type")]
    pub type_: String,
    /// Capacity in binary GB, rounded to the nearest integer
    pub capacity_gb: u64,
    /// Raw status string as reported by the source
    pub smart_status: String,
    /// Coarse health score: 100 when the status is exactly "OK", else 50
    pub health_percent: u8,
}

/// Battery health evaluation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Battery {
    /// Whether a battery data source was available
    pub present: bool,
    /// Design capacity in mWh
    pub design_capacity_mwh: u32,
    /// Full-charge capacity in mWh
    pub full_charge_capacity_mwh: u32,
    /// Wear percentage, one decimal place; 0 when either capacity is non-positive
    pub wear_level_percent: f64,
    /// Fixed placeholder; no cycle-count source is wired in
    pub cycle_count: u32,
}

impl Battery {
    /// The defined value for machines without a readable battery.
    pub fn not_present() -> Self {
        Self {
            present: false,
            design_capacity_mwh: 0,
            full_charge_capacity_mwh: 0,
            wear_level_percent: 0.0,
            cycle_count: 0,
        }
    }
}

/// Connectivity hardware classification
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Connectivity {
    /// Wi-Fi module name, or "Not Detected"
    pub wifi_module: String,
    /// Any Bluetooth device present
    pub bluetooth_present: bool,
    /// Any camera/webcam device present
    pub webcam_present: bool,
    /// Fixed audio label (see [`AUDIO_PLACEHOLDER`])
    pub audio_device: String,
}

impl Default for Connectivity {
    fn default() -> Self {
        Self {
            wifi_module: WIFI_NOT_DETECTED.to_string(),
            bluetooth_present: false,
            webcam_present: false,
            audio_device: AUDIO_PLACEHOLDER.to_string(),
        }
    }
}

/// OS identity and driver status
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SystemCheck {
    /// OS caption and architecture
    pub os_info: String,
    /// Activation status label
    pub activation_status: String,
    /// Friendly names of devices reporting a driver/configuration error
    pub driver_issues: Vec<String>,
}

impl Default for SystemCheck {
    fn default() -> Self {
        Self {
            os_info: "Unknown".to_string(),
            activation_status: ACTIVATION_LABEL.to_string(),
            driver_issues: Vec::new(),
        }
    }
}

/// Physical-inspection checklist
///
/// Never populated by the collector; each field serializes as `null` and is
/// filled in by a human reviewer downstream.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ManualInspection {
    pub phys_body_ok: Option<bool>,
    pub phys_engsel_ok: Option<bool>,
    pub phys_lcd_ok: Option<bool>,
    pub phys_keyboard_ok: Option<bool>,
    pub phys_port_ok: Option<bool>,
    pub phys_camera_test_ok: Option<bool>,
    pub phys_sound_test_ok: Option<bool>,
}

/// Configuration for a collector run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory the report file is written to; `None` means the directory
    /// containing the running executable
    pub output_dir: Option<PathBuf>,
    /// Wait for an operator keypress before exiting
    pub pause_on_exit: bool,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            pause_on_exit: true,
            verbose: false,
        }
    }
}

impl ReportConfig {
    /// Apply overrides from an optional TOML config file.
    pub fn overlay(mut self, file: &ReportConfigFile) -> Self {
        if let Some(dir) = &file.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if let Some(pause) = file.pause_on_exit {
            self.pause_on_exit = pause;
        }
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
        }
        self
    }
}

/// On-disk collector configuration, all fields optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfigFile {
    pub output_dir: Option<PathBuf>,
    pub pause_on_exit: Option<bool>,
    pub verbose: Option<bool>,
}

impl ReportConfigFile {
    /// Load overrides from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Config-file loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
