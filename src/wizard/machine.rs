//! Profile-wizard state machine. The transcript is an append-only log of
//! tagged entries and every transition is a pure function of
//! `(state, event)`, so the whole flow is testable without timers: the
//! timed typing delay is driven from outside by feeding `PromptReady`.

use serde::Serialize;

use crate::models::job_post::NewJobPost;
use crate::wizard::script::{self, AnswerKind, ANONYMOUS_NAME, QUESTIONS};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Entry {
    Prompt {
        step: usize,
        text: &'static str,
    },
    Answer {
        step: usize,
        value: String,
    },
    /// Free-text affordance for the current step.
    InputRequest {
        step: usize,
    },
    /// Multi-choice affordance for the current step.
    OptionsRequest {
        step: usize,
        options: &'static [&'static str],
    },
    Typing,
    Loading,
    Success {
        job_id: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Phase {
    /// Waiting on the user's answer to `step`.
    Asking,
    /// Answer accepted, typing indicator shown; the next prompt appears
    /// when the scheduler fires `PromptReady`.
    AwaitingPrompt,
    /// All steps answered, record creation in flight.
    Submitting,
    /// Record creation failed; recoverable via `Retry`.
    Failed,
    Done { job_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Answer(String),
    /// Only honored on a skippable step; records the fixed placeholder.
    Skip,
    /// The typing delay elapsed.
    PromptReady,
    SubmitSucceeded(String),
    SubmitFailed(String),
    Retry,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    /// The answer failed the step's validator; step and transcript are
    /// unchanged and the message is surfaced inline.
    #[error("{0}")]
    Invalid(String),

    #[error("this action is not available in the wizard's current state")]
    OutOfTurn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: usize,
    pub phase: Phase,
    pub transcript: Vec<Entry>,
    answers: Vec<(&'static str, String)>,
}

impl WizardState {
    /// Seeded with the first prompt and its input affordance.
    pub fn new() -> Self {
        Self {
            step: 0,
            phase: Phase::Asking,
            transcript: vec![
                Entry::Prompt {
                    step: 0,
                    text: QUESTIONS[0].prompt,
                },
                Entry::InputRequest { step: 0 },
            ],
            answers: Vec::new(),
        }
    }

    pub fn total_steps(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn apply(&self, event: Event) -> Result<WizardState, StepError> {
        match (&self.phase, event) {
            (Phase::Asking, Event::Answer(value)) => self.record_answer(value),
            (Phase::Asking, Event::Skip) => {
                if !QUESTIONS[self.step].skippable {
                    return Err(StepError::OutOfTurn);
                }
                self.record_answer(String::new())
            }
            (Phase::AwaitingPrompt, Event::PromptReady) => {
                let mut next = self.clone();
                next.transcript.retain(|e| *e != Entry::Typing);
                next.push_prompt(self.step);
                next.phase = Phase::Asking;
                Ok(next)
            }
            (Phase::Submitting, Event::SubmitSucceeded(job_id)) => {
                let mut next = self.clone();
                next.transcript.retain(|e| *e != Entry::Loading);
                next.transcript.push(Entry::Success {
                    job_id: job_id.clone(),
                });
                next.phase = Phase::Done { job_id };
                Ok(next)
            }
            (Phase::Submitting, Event::SubmitFailed(message)) => {
                let mut next = self.clone();
                next.transcript.retain(|e| *e != Entry::Loading);
                next.transcript.push(Entry::Failed { message });
                next.phase = Phase::Failed;
                Ok(next)
            }
            (Phase::Failed, Event::Retry) => {
                let mut next = self.clone();
                next.transcript
                    .retain(|e| !matches!(e, Entry::Failed { .. }));
                next.transcript.push(Entry::Loading);
                next.phase = Phase::Submitting;
                Ok(next)
            }
            _ => Err(StepError::OutOfTurn),
        }
    }

    fn record_answer(&self, value: String) -> Result<WizardState, StepError> {
        let question = &QUESTIONS[self.step];
        script::validate_answer(question, &value).map_err(StepError::Invalid)?;

        let recorded = if value.trim().is_empty() && question.skippable {
            ANONYMOUS_NAME.to_string()
        } else {
            value
        };

        let mut next = self.clone();
        next.transcript.retain(|e| {
            !matches!(
                e,
                Entry::InputRequest { .. } | Entry::OptionsRequest { .. }
            )
        });
        next.transcript.push(Entry::Answer {
            step: self.step,
            value: recorded.clone(),
        });
        next.answers.push((question.key, recorded));

        if self.step + 1 < QUESTIONS.len() {
            next.step = self.step + 1;
            next.transcript.push(Entry::Typing);
            next.phase = Phase::AwaitingPrompt;
        } else {
            next.transcript.push(Entry::Loading);
            next.phase = Phase::Submitting;
        }
        Ok(next)
    }

    fn push_prompt(&mut self, step: usize) {
        let question = &QUESTIONS[step];
        self.transcript.push(Entry::Prompt {
            step,
            text: question.prompt,
        });
        match question.kind {
            AnswerKind::Options => self.transcript.push(Entry::OptionsRequest {
                step,
                options: question.options,
            }),
            AnswerKind::Input | AnswerKind::Textarea => {
                self.transcript.push(Entry::InputRequest { step })
            }
        }
    }

    fn answer(&self, key: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The assembled profile, available once every step has been
    /// answered (phase `Submitting` or later).
    pub fn collected_profile(&self) -> Option<NewJobPost> {
        Some(NewJobPost {
            name: self.answer("name")?.to_string(),
            age: self.answer("age")?.to_string(),
            visa: self.answer("visa")?.to_string(),
            nationality: self.answer("nationality")?.to_string(),
            experience: self.answer("experience")?.to_string(),
            job: self.answer("job")?.to_string(),
            skills: self.answer("skills")?.to_string(),
            phone: self.answer("phone")?.to_string(),
            location: self.answer("location")?.to_string(),
        })
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
