//! JSON rendering of batch outcomes

use serde::Serialize;

use crate::error::MaintenanceError;

use crate::telemetry::{
    BatchOutcome, BatchSummary, ComputationError, MachineRecord, MetricResult, ValidationReport,
};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub validation: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BatchSummary>,
    pub results: Vec<JsonEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JsonEntry<'a> {
    Evaluated {
        input: &'a MachineRecord,
        result: &'a MetricResult,
    },
    Failed {
        input: &'a MachineRecord,
        error: &'a ComputationError,
        code: u16,
        message: String,
    },
}

impl<'a> JsonReport<'a> {
    pub fn from_outcome(outcome: &'a BatchOutcome) -> Self {
        let results = outcome
            .evaluations()
            .iter()
            .map(|evaluation| match &evaluation.outcome {
                Ok(result) => JsonEntry::Evaluated {
                    input: &evaluation.record,
                    result,
                },
                Err(error) => {
                    let coded = MaintenanceError::from(error);
                    JsonEntry::Failed {
                        input: &evaluation.record,
                        error,
                        code: coded.code(),
                        message: coded.to_string(),
                    }
                }
            })
            .collect();

        Self {
            validation: outcome.report(),
            summary: (!outcome.is_rejected()).then(|| outcome.summary()),
            results,
        }
    }
}

pub fn render_outcome(outcome: &BatchOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport::from_outcome(outcome))
}
