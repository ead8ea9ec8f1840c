//! Property tests for the validation gate and metric chain
//!
//! This file verifies:
//! - Determinism: same record → same result
//! - Idempotence: re-validating valid records yields no errors
//! - Arithmetic laws of the rounded metric chain
//!
//! These tests use proptest for automated property verification.

use proptest::prelude::*;

use machine_health::telemetry::{
    compute_and_classify, metrics, round2, validate, validate_batch, ClassificationPolicy,
    MachineRecord, RawRow, Status, ValidationError,
};

// ============================================================================
// Strategies
// ============================================================================

fn two_decimals(range: std::ops::Range<u32>) -> impl Strategy<Value = f64> {
    range.prop_map(|hundredths| hundredths as f64 / 100.0)
}

prop_compose! {
    fn valid_record()(
        row in 1usize..1000,
        runtime_hours in two_decimals(1..1_000_000),
        vibration_level in two_decimals(1..10_000),
        temperature in two_decimals(0..20_001),
        maintenance_threshold in two_decimals(0..10_001),
        max_operating_hours in two_decimals(1..1_000_000),
        scaling_factor in two_decimals(1..1_000),
    ) -> MachineRecord {
        MachineRecord {
            row,
            machine_id: format!("M{}", row),
            runtime_hours,
            vibration_level,
            temperature,
            maintenance_threshold,
            max_operating_hours,
            scaling_factor,
        }
    }
}

prop_compose! {
    /// Records whose failure risk stays at or below 4.00
    fn low_risk_record()(
        base in valid_record(),
        vibration_level in two_decimals(10..200),
        scaling_factor in two_decimals(10..200),
    ) -> MachineRecord {
        MachineRecord { vibration_level, scaling_factor, ..base }
    }
}

fn renumbered(records: Vec<MachineRecord>) -> Vec<MachineRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| MachineRecord {
            row: index + 1,
            ..record
        })
        .collect()
}

// ============================================================================
// Validation properties
// ============================================================================

mod validation {
    use super::*;

    proptest! {
        #[test]
        fn prop_revalidation_is_idempotent(
            records in prop::collection::vec(valid_record(), 1..20)
        ) {
            let records = renumbered(records);
            let rows: Vec<RawRow> = records.iter().map(MachineRecord::to_raw_row).collect();

            let validated = validate(&rows).expect("valid records must validate");
            prop_assert_eq!(&validated, &records);

            let again: Vec<RawRow> = validated.iter().map(MachineRecord::to_raw_row).collect();
            prop_assert_eq!(validate(&again).expect("second pass"), records);
        }

        #[test]
        fn prop_out_of_range_threshold_rejects_whole_batch(
            records in prop::collection::vec(valid_record(), 2..10),
            bad_index in any::<prop::sample::Index>(),
            threshold in 100.01f64..10_000.0,
        ) {
            let records = renumbered(records);
            let bad = bad_index.index(records.len());
            let rows: Vec<RawRow> = records
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let row = record.to_raw_row();
                    if i == bad {
                        row.with("maintenance_threshold", threshold)
                    } else {
                        row
                    }
                })
                .collect();

            let report = validate_batch(&rows).expect_err("batch must be rejected");
            prop_assert_eq!(report.errors.len(), 1);
            let is_threshold_error = matches!(
                &report.errors[0],
                ValidationError::InvalidValue { row, .. } if *row == bad + 1
            );
            prop_assert!(is_threshold_error);
            prop_assert_eq!(report.machine_count, records.len());
        }

        #[test]
        fn prop_missing_field_reported_once_per_row(
            records in prop::collection::vec(valid_record(), 1..10),
            field_index in 0usize..7,
        ) {
            let records = renumbered(records);
            let field = machine_health::telemetry::Field::ALL[field_index];
            let rows: Vec<RawRow> = records
                .iter()
                .map(|record| {
                    let mut row = record.to_raw_row();
                    row.values.remove(field.as_str());
                    row
                })
                .collect();

            let report = validate_batch(&rows).expect_err("batch must be rejected");
            prop_assert_eq!(report.errors.len(), records.len());
            for (i, error) in report.errors.iter().enumerate() {
                prop_assert_eq!(
                    error,
                    &ValidationError::MissingField { field, row: i + 1 }
                );
            }
        }
    }
}

// ============================================================================
// Metric chain properties
// ============================================================================

mod metric_chain {
    use super::*;

    proptest! {
        #[test]
        fn prop_failure_risk_is_rounded_product(record in valid_record()) {
            if let Ok(result) = compute_and_classify(&record) {
                prop_assert_eq!(
                    result.metrics.predicted_failure_risk,
                    round2(record.vibration_level * record.scaling_factor)
                );
            }
        }

        #[test]
        fn prop_computation_is_deterministic(record in valid_record()) {
            prop_assert_eq!(compute_and_classify(&record), compute_and_classify(&record));
        }

        #[test]
        fn prop_efficiency_inverts_failure_risk(record in low_risk_record()) {
            let result = compute_and_classify(&record).expect("risk is never zero here");
            let m = result.metrics;
            let reconstructed = m.efficiency_ratio * m.predicted_failure_risk;
            prop_assert!(
                (reconstructed - record.runtime_hours).abs() <= 0.02 + 1e-9,
                "{} * {} = {} vs runtime {}",
                m.efficiency_ratio,
                m.predicted_failure_risk,
                reconstructed,
                record.runtime_hours
            );
        }

        #[test]
        fn prop_composite_uses_rounded_inputs(record in valid_record()) {
            if let Ok(result) = compute_and_classify(&record) {
                let m = result.metrics;
                let policy = ClassificationPolicy::default();
                prop_assert_eq!(
                    m.composite_score,
                    metrics::composite_score(m.operating_margin, m.maintenance_urgency_ratio, &policy)
                );
                prop_assert_eq!(m.composite_score, round2(m.composite_score));
            }
        }

        #[test]
        fn prop_status_matches_conditions(record in valid_record()) {
            if let Ok(result) = compute_and_classify(&record) {
                let m = result.metrics;
                let expected = m.composite_score >= 75.0
                    && (0.90..=9.90).contains(&m.efficiency_ratio)
                    && m.maintenance_urgency_ratio <= record.maintenance_threshold;
                prop_assert_eq!(result.status == Status::Optimal, expected);
                prop_assert_eq!(result.checks.is_optimal(), expected);
            }
        }
    }
}
