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

//! Battery wear evaluation

use crate::domain::Battery;
use crate::ports::BatteryCapacityRecord;

/// Evaluate battery wear from design vs. full-charge capacity.
///
/// Uses the first capacity record. Wear is
/// `round((1 - full/design) * 100, 1)` and only computed when both
/// capacities are positive; a non-positive reading means "no meaningful
/// wear signal", reported as 0 rather than an error. An empty record list
/// yields the defined not-present value with all numeric fields zero.
///
/// `cycle_count` stays 0: the capacity tables carry no cycle data and no
/// other source is wired in.
pub fn evaluate_battery(records: &[BatteryCapacityRecord]) -> Battery {
    let record = match records.first() {
        Some(record) => record,
        None => return Battery::not_present(),
    };

    let design = record.design_capacity_mwh.unwrap_or(0);
    let full = record.full_charge_capacity_mwh.unwrap_or(0);

    let wear = if design > 0 && full > 0 {
        let raw = (1.0 - full as f64 / design as f64) * 100.0;
        (raw * 10.0).round() / 10.0
    } else {
        0.0
    };

    Battery {
        present: true,
        design_capacity_mwh: design,
        full_charge_capacity_mwh: full,
        wear_level_percent: wear,
        cycle_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacities(design: u32, full: u32) -> Vec<BatteryCapacityRecord> {
        vec![BatteryCapacityRecord {
            design_capacity_mwh: Some(design),
            full_charge_capacity_mwh: Some(full),
        }]
    }

    #[test]
    fn wear_formula_rounds_to_one_decimal() {
        let battery = evaluate_battery(&capacities(5000, 4000));
        assert!(battery.present);
        assert_eq!(battery.wear_level_percent, 20.0);

        let battery = evaluate_battery(&capacities(57_000, 48_123));
        assert_eq!(battery.wear_level_percent, 15.6);
    }

    #[test]
    fn non_positive_capacity_yields_zero_wear_without_fault() {
        let battery = evaluate_battery(&capacities(0, 4000));
        assert!(battery.present);
        assert_eq!(battery.wear_level_percent, 0.0);

        let battery = evaluate_battery(&capacities(5000, 0));
        assert_eq!(battery.wear_level_percent, 0.0);
        assert_eq!(battery.full_charge_capacity_mwh, 0);
    }

    #[test]
    fn missing_source_reports_not_present_with_all_zeros() {
        let battery = evaluate_battery(&[]);
        assert!(!battery.present);
        assert_eq!(battery.design_capacity_mwh, 0);
        assert_eq!(battery.full_charge_capacity_mwh, 0);
        assert_eq!(battery.wear_level_percent, 0.0);
        assert_eq!(battery.cycle_count, 0);
    }

    #[test]
    fn cycle_count_stays_at_placeholder_zero() {
        let battery = evaluate_battery(&capacities(5000, 4500));
        assert_eq!(battery.cycle_count, 0);
    }
}
