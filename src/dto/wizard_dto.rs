use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wizard::machine::{Entry, Phase, WizardState};

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerPayload {
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStateResponse {
    pub session_id: Uuid,
    pub step: usize,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub phase: Phase,
    pub transcript: Vec<Entry>,
}

impl WizardStateResponse {
    pub fn from_state(session_id: Uuid, state: WizardState) -> Self {
        let total = state.total_steps();
        let progress_percent = if total > 0 {
            ((state.step * 100 + total / 2) / total) as u8
        } else {
            0
        };
        Self {
            session_id,
            step: state.step,
            total_steps: total,
            progress_percent,
            phase: state.phase,
            transcript: state.transcript,
        }
    }
}
