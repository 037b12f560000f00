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

//! Identity normalization

use crate::domain::Identity;
use crate::ports::{ComputerSystemRecord, FirmwareRecord};

/// Trim a raw source string; absent or blank values become "Unknown".
pub(crate) fn trimmed_or_unknown(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Normalize manufacturer/model/serial/firmware strings into an [`Identity`].
///
/// OEM sources pad these fields with trailing whitespace; every field is
/// trimmed before it enters the report.
pub fn read_identity(system: &ComputerSystemRecord, firmware: &FirmwareRecord) -> Identity {
    Identity {
        brand: trimmed_or_unknown(system.manufacturer.as_deref()),
        model: trimmed_or_unknown(system.model.as_deref()),
        serial_number: trimmed_or_unknown(firmware.serial_number.as_deref()),
        bios_version: trimmed_or_unknown(firmware.version.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fields_are_trimmed() {
        let system = ComputerSystemRecord {
            manufacturer: Some("  LENOVO  ".to_string()),
            model: Some("ThinkPad T480 \t".to_string()),
            total_memory_bytes: None,
        };
        let firmware = FirmwareRecord {
            serial_number: Some(" PF0ABCDE ".to_string()),
            version: Some("N24ET65W (1.40 )".to_string()),
        };

        let identity = read_identity(&system, &firmware);
        assert_eq!(identity.brand, "LENOVO");
        assert_eq!(identity.model, "ThinkPad T480");
        assert_eq!(identity.serial_number, "PF0ABCDE");
        assert_eq!(identity.bios_version, "N24ET65W (1.40 )");
    }

    #[test]
    fn absent_fields_become_unknown() {
        let identity = read_identity(
            &ComputerSystemRecord::default(),
            &FirmwareRecord {
                serial_number: Some("   ".to_string()),
                version: None,
            },
        );
        assert_eq!(identity.brand, "Unknown");
        assert_eq!(identity.model, "Unknown");
        assert_eq!(identity.serial_number, "Unknown");
        assert_eq!(identity.bios_version, "Unknown");
    }
}
