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

//! Connectivity classification and driver-issue collection

use crate::domain::{
    Connectivity, SystemCheck, ACTIVATION_LABEL, AUDIO_PLACEHOLDER, WIFI_NOT_DETECTED,
};
use crate::ports::{OperatingSystemRecord, PnpDeviceRecord};

/// Classify connectivity hardware from a flat, unordered device list.
///
/// One linear scan with substring matches against each device's friendly
/// name; entries with no name are skipped. Presence flags are independent
/// of input order. The Wi-Fi module name is captured from the first
/// matching device and never overwritten; first-match is the documented
/// tie-break. Audio is a fixed label; there is no real audio enumeration.
pub fn classify_connectivity(devices: &[PnpDeviceRecord]) -> Connectivity {
    let mut wifi_module: Option<String> = None;
    let mut bluetooth_present = false;
    let mut webcam_present = false;

    for device in devices {
        let name = match device.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        if wifi_module.is_none() && (name.contains("Wi-Fi") || name.contains("Wireless")) {
            wifi_module = Some(name.to_string());
        }
        if name.contains("Bluetooth") {
            bluetooth_present = true;
        }
        if name.contains("Camera") || name.contains("Webcam") {
            webcam_present = true;
        }
    }

    Connectivity {
        wifi_module: wifi_module.unwrap_or_else(|| WIFI_NOT_DETECTED.to_string()),
        bluetooth_present,
        webcam_present,
        audio_device: AUDIO_PLACEHOLDER.to_string(),
    }
}

/// Copy error-device friendly names verbatim: order preserved, entries with
/// no name skipped, duplicates kept.
pub fn collect_driver_issues(devices: &[PnpDeviceRecord]) -> Vec<String> {
    devices
        .iter()
        .filter_map(|device| device.name.as_deref())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the system-check section from the OS record and collected issues.
pub fn read_system_check(os: &OperatingSystemRecord, driver_issues: Vec<String>) -> SystemCheck {
    let caption = os.caption.as_deref().map(str::trim).unwrap_or("");
    let architecture = os.architecture.as_deref().map(str::trim).unwrap_or("");
    let os_info = match (caption.is_empty(), architecture.is_empty()) {
        (false, false) => format!("{} {}", caption, architecture),
        (false, true) => caption.to_string(),
        (true, false) => architecture.to_string(),
        (true, true) => "Unknown".to_string(),
    };

    SystemCheck {
        os_info,
        activation_status: ACTIVATION_LABEL.to_string(),
        driver_issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str) -> PnpDeviceRecord {
        PnpDeviceRecord {
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn classification_is_order_independent() {
        let names = ["USB Hub", "Intel Bluetooth", "HD Webcam", "Wi-Fi 6 Adapter"];

        // Every rotation of the list classifies the same way.
        for start in 0..names.len() {
            let rotated: Vec<PnpDeviceRecord> = (0..names.len())
                .map(|i| device(names[(start + i) % names.len()]))
                .collect();

            let connectivity = classify_connectivity(&rotated);
            assert!(connectivity.bluetooth_present, "rotation {start}");
            assert!(connectivity.webcam_present, "rotation {start}");
            assert_eq!(connectivity.wifi_module, "Wi-Fi 6 Adapter");
            assert_eq!(connectivity.audio_device, "Standard Audio");
        }
    }

    #[test]
    fn wifi_capture_is_first_match() {
        let devices = vec![
            device("Intel(R) Wi-Fi 6 AX201 160MHz"),
            device("Microsoft Wi-Fi Direct Virtual Adapter"),
        ];
        let connectivity = classify_connectivity(&devices);
        assert_eq!(connectivity.wifi_module, "Intel(R) Wi-Fi 6 AX201 160MHz");
    }

    #[test]
    fn wireless_substring_also_matches() {
        let connectivity = classify_connectivity(&[device("Qualcomm Atheros Wireless Adapter")]);
        assert_eq!(
            connectivity.wifi_module,
            "Qualcomm Atheros Wireless Adapter"
        );
    }

    #[test]
    fn nameless_devices_are_skipped() {
        let devices = vec![PnpDeviceRecord { name: None }, device("")];
        let connectivity = classify_connectivity(&devices);
        assert_eq!(connectivity.wifi_module, WIFI_NOT_DETECTED);
        assert!(!connectivity.bluetooth_present);
        assert!(!connectivity.webcam_present);
    }

    #[test]
    fn driver_issues_pass_through_verbatim() {
        let devices = vec![
            device("Unknown PCI Device"),
            device("Generic Network Adapter"),
            PnpDeviceRecord { name: None },
            device("Unknown PCI Device"),
        ];
        assert_eq!(
            collect_driver_issues(&devices),
            vec![
                "Unknown PCI Device",
                "Generic Network Adapter",
                "Unknown PCI Device"
            ]
        );
    }

    #[test]
    fn system_check_joins_caption_and_architecture() {
        let os = OperatingSystemRecord {
            caption: Some("Microsoft Windows 11 Pro ".to_string()),
            architecture: Some("64-bit".to_string()),
        };
        let check = read_system_check(&os, vec!["Unknown PCI Device".to_string()]);
        assert_eq!(check.os_info, "Microsoft Windows 11 Pro 64-bit");
        assert_eq!(check.activation_status, "Checked");
        assert_eq!(check.driver_issues, vec!["Unknown PCI Device"]);

        let check = read_system_check(&OperatingSystemRecord::default(), Vec::new());
        assert_eq!(check.os_info, "Unknown");
        assert!(check.driver_issues.is_empty());
    }
}
