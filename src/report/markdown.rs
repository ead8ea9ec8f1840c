//! Markdown rendering
//!
//! Every metric is printed with two decimals, matching the precision the
//! pipeline computes at.

use crate::error::MaintenanceError;
use crate::telemetry::{
    BatchSummary, ClassificationPolicy, Field, MachineRecord, MetricResult, Presence,
    RecordEvaluation, ValidationReport, Validity,
};

/// Render the data validation report
pub fn render_validation(report: &ValidationReport) -> String {
    let mut out = String::from("# Data Validation Report\n");

    out.push_str("## Data Structure Check:\n");
    out.push_str(&format!("- Number of machines: {}\n", report.machine_count));
    out.push_str(&format!(
        "- Number of fields per record: {}\n\n",
        report.field_count
    ));

    out.push_str("## Required Fields Check:\n");
    for status in &report.fields {
        let presence = match status.presence {
            Presence::Present => "present",
            Presence::Missing => "missing",
        };
        let validity = match status.validity {
            Validity::Valid => "valid",
            Validity::Invalid => "invalid",
        };
        out.push_str(&format!("- {}: {}, {}\n", status.field, presence, validity));
    }

    out.push_str("\n## Validation Summary:\n");
    if report.is_valid() {
        out.push_str("Data validation is successful!");
    } else {
        out.push_str("Validation failed with the following errors:\n```\n");
        let lines: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        out.push_str(&lines.join("\n"));
        out.push_str("\n```");
    }

    out
}

/// Render the per-machine analysis of an evaluated batch
pub fn render_analysis(
    evaluations: &[RecordEvaluation],
    summary: &BatchSummary,
    policy: &ClassificationPolicy,
) -> String {
    let mut out = String::from("# Predictive Maintenance Analysis Summary:\n");
    out.push_str(&format!(
        "- **Total Machines Evaluated:** {}\n",
        summary.total
    ));
    out.push_str(&format!("- **Optimal:** {}\n", summary.optimal));
    out.push_str(&format!(
        "- **Requires Maintenance:** {}\n",
        summary.requires_maintenance
    ));
    if summary.computation_errors > 0 {
        out.push_str(&format!(
            "- **Not Evaluated:** {}\n",
            summary.computation_errors
        ));
    }
    out.push_str("\n## Detailed Analysis per Machine:\n");

    let sections: Vec<String> = evaluations
        .iter()
        .map(|evaluation| render_machine(evaluation, policy))
        .collect();
    out.push_str(&sections.join("---\n\n"));

    out
}

fn render_machine(evaluation: &RecordEvaluation, policy: &ClassificationPolicy) -> String {
    let record = &evaluation.record;
    let mut out = format!("**Machine {}**\n\n", record.machine_id);
    out.push_str(&render_inputs(record));

    match &evaluation.outcome {
        Ok(result) => {
            out.push_str(&render_calculations(record, result, policy));
            out.push_str(&render_recommendation(result));
        }
        Err(error) => {
            out.push_str("### Calculation Error:\n");
            out.push_str(&format!("- {}\n", MaintenanceError::from(error)));
            out.push_str("- **Status:** Not evaluated\n\n");
        }
    }

    out
}

fn render_inputs(record: &MachineRecord) -> String {
    let label = |field: Field| match field {
        Field::MachineId => "Machine ID",
        Field::RuntimeHours => "Runtime Hours",
        Field::VibrationLevel => "Vibration Level",
        Field::Temperature => "Temperature",
        Field::MaintenanceThreshold => "Maintenance Threshold (%)",
        Field::MaxOperatingHours => "Max Operating Hours",
        Field::ScalingFactor => "Scaling Factor",
    };

    let mut out = String::from("### Input Data:\n");
    for field in Field::ALL.into_iter().filter(Field::is_numeric) {
        if let Some(value) = record.numeric(field) {
            out.push_str(&format!("- **{}:** {}\n", label(field), value));
        }
    }
    out.push('\n');
    out
}

fn render_calculations(
    record: &MachineRecord,
    result: &MetricResult,
    policy: &ClassificationPolicy,
) -> String {
    let m = &result.metrics;
    let mut out = String::from("### Detailed Calculations:\n");

    out.push_str("1. **Predicted Failure Risk Calculation:**\n");
    out.push_str("   - **Formula:** Predicted Failure Risk = vibration_level × scaling_factor\n");
    out.push_str(&format!(
        "   - **Steps:** Multiply vibration_level ({}) by scaling_factor ({}).\n",
        record.vibration_level, record.scaling_factor
    ));
    out.push_str(&format!(
        "   - **Final Predicted Failure Risk:** {:.2}\n\n",
        m.predicted_failure_risk
    ));

    out.push_str("2. **Maintenance Urgency Ratio Calculation:**\n");
    out.push_str(
        "   - **Formula:** Maintenance Urgency Ratio = (Predicted Failure Risk / runtime_hours) × 100\n",
    );
    out.push_str(&format!(
        "   - **Steps:** Divide Predicted Failure Risk ({:.2}) by runtime_hours ({}), then multiply by 100.\n",
        m.predicted_failure_risk, record.runtime_hours
    ));
    out.push_str(&format!(
        "   - **Final Maintenance Urgency Ratio:** {:.2}%\n\n",
        m.maintenance_urgency_ratio
    ));

    out.push_str("3. **Operating Margin Calculation:**\n");
    out.push_str(
        "   - **Formula:** Operating Margin = ((max_operating_hours − runtime_hours) / max_operating_hours) × 100\n",
    );
    out.push_str(&format!(
        "   - **Steps:** Subtract runtime_hours ({}) from max_operating_hours ({}), divide by max_operating_hours ({}), then multiply by 100.\n",
        record.runtime_hours, record.max_operating_hours, record.max_operating_hours
    ));
    out.push_str(&format!(
        "   - **Final Operating Margin:** {:.2}%\n\n",
        m.operating_margin
    ));

    let margin_part = m.operating_margin * policy.margin_weight;
    let inverted_urgency = 100.0 - m.maintenance_urgency_ratio;
    let urgency_part = inverted_urgency * policy.urgency_weight;
    out.push_str("4. **Composite Maintenance Score Calculation:**\n");
    out.push_str(&format!(
        "   - **Formula:** Composite Score = (Operating Margin × {}) + ((100 − Maintenance Urgency Ratio) × {})\n",
        policy.margin_weight, policy.urgency_weight
    ));
    out.push_str(&format!(
        "   - **Steps:** Multiply Operating Margin ({:.2}) by {} = {:.2}; subtract Maintenance Urgency Ratio ({:.2}) from 100 = {:.2} and multiply by {} = {:.2}; then add both values.\n",
        m.operating_margin,
        policy.margin_weight,
        margin_part,
        m.maintenance_urgency_ratio,
        inverted_urgency,
        policy.urgency_weight,
        urgency_part
    ));
    out.push_str(&format!(
        "   - **Final Composite Score:** {:.2}\n\n",
        m.composite_score
    ));

    out.push_str("5. **Efficiency Ratio Calculation:**\n");
    out.push_str("   - **Formula:** Efficiency Ratio = runtime_hours / Predicted Failure Risk\n");
    out.push_str(&format!(
        "   - **Steps:** Divide runtime_hours ({}) by Predicted Failure Risk ({:.2}).\n",
        record.runtime_hours, m.predicted_failure_risk
    ));
    out.push_str(&format!(
        "   - **Final Efficiency Ratio:** {:.2}\n\n",
        m.efficiency_ratio
    ));

    out
}

fn render_recommendation(result: &MetricResult) -> String {
    let m = &result.metrics;
    let mut out = String::from("### Final Recommendation:\n");
    out.push_str(&format!("- **Composite Score:** {:.2}\n", m.composite_score));
    out.push_str(&format!(
        "- **Maintenance Urgency Ratio:** {:.2}%\n",
        m.maintenance_urgency_ratio
    ));
    out.push_str(&format!("- **Efficiency Ratio:** {:.2}\n", m.efficiency_ratio));
    out.push_str(&format!("- **Status:** {}\n", result.status));
    out.push_str(&format!(
        "- **Recommended Action:** {}\n",
        result.recommended_action
    ));

    let failed = result.checks.failed();
    if !failed.is_empty() {
        out.push_str(&format!("- **Reason:** {}\n", failed.join("; ")));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{parse_csv, SAMPLE_CSV};
    use crate::telemetry::{evaluate_batch, validate_batch, RawRow};

    #[test]
    fn test_successful_validation_report() {
        let rows = parse_csv(SAMPLE_CSV).unwrap();
        let batch = validate_batch(&rows).unwrap();
        let text = render_validation(&batch.report);

        assert!(text.starts_with("# Data Validation Report\n"));
        assert!(text.contains("- Number of machines: 10\n"));
        assert!(text.contains("- Number of fields per record: 7\n"));
        assert!(text.contains("- temperature: present, valid\n"));
        assert!(text.ends_with("Data validation is successful!"));
    }

    #[test]
    fn test_failed_validation_lists_every_error() {
        let rows = vec![
            RawRow::new(1)
                .with("machine_id", "M1")
                .with("runtime_hours", "10")
                .with("vibration_level", "2")
                .with("temperature", "500")
                .with("maintenance_threshold", "150")
                .with("max_operating_hours", "20")
                .with("scaling_factor", "1"),
        ];
        let report = validate_batch(&rows).unwrap_err();
        let text = render_validation(&report);

        assert!(text.contains("- temperature: present, invalid\n"));
        assert!(text.contains("Validation failed with the following errors:\n```\n"));
        assert!(text.contains("Row 1: Invalid value for temperature: must be between 0 and 200"));
        assert!(text.contains(
            "Row 1: Invalid value for maintenance_threshold: must be between 0 and 100"
        ));
        assert!(text.ends_with("\n```"));
    }

    #[test]
    fn test_analysis_report_sections() {
        let rows = parse_csv(SAMPLE_CSV).unwrap();
        let outcome = evaluate_batch(&rows, &Default::default());
        let text = render_analysis(
            outcome.evaluations(),
            &outcome.summary(),
            &Default::default(),
        );

        assert!(text.contains("- **Total Machines Evaluated:** 10\n"));
        assert!(text.contains("- **Optimal:** 8\n"));
        assert!(text.contains("- **Requires Maintenance:** 2\n"));
        assert!(!text.contains("Not Evaluated"));
        assert_eq!(text.matches("---\n\n").count(), 9);
        assert!(text.contains("**Machine M508**"));
        assert!(text.contains("- **Final Efficiency Ratio:** 500.00\n"));
        assert!(text.contains("- **Reason:** composite score below minimum; efficiency ratio outside optimal band\n"));
        assert!(text.contains("- **Recommended Action:** No immediate maintenance required\n"));
    }

    #[test]
    fn test_computation_error_rendered_in_place() {
        let rows = vec![RawRow::new(1)
            .with("machine_id", "TINY")
            .with("runtime_hours", "10")
            .with("vibration_level", "0.001")
            .with("temperature", "40")
            .with("maintenance_threshold", "10")
            .with("max_operating_hours", "20")
            .with("scaling_factor", "1")];
        let outcome = evaluate_batch(&rows, &Default::default());
        let text = render_analysis(
            outcome.evaluations(),
            &outcome.summary(),
            &Default::default(),
        );

        assert!(text.contains("- **Not Evaluated:** 1\n"));
        assert!(text.contains("### Calculation Error:\n"));
        assert!(text.contains("- [E4001] Computation error: Machine TINY (row 1)"));
        assert!(text.contains("predicted failure risk rounds to zero"));
        assert!(!text.contains("### Final Recommendation:"));
    }
}
