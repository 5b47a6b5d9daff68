use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::time::sleep;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::time;
use crate::wizard::machine::{Event, Phase, StepError, WizardState};

use super::job_service::JobService;

/// Sessions idle this long are dropped on the next sweep.
const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct Session {
    state: WizardState,
    touched: Instant,
}

/// Drives the profile wizard. Sessions live in memory only, mirroring
/// the browser-session lifetime of the flow; a session is assumed to be
/// driven by a single client, so transitions are not serialized beyond
/// the store lock. Completed sessions are dropped immediately and
/// abandoned ones age out after [`SESSION_TTL`].
#[derive(Clone)]
pub struct WizardService {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    job_service: JobService,
    /// Injected typing-delay scheduler; tests exercise the machine
    /// directly and never wait on it.
    typing_delay: Duration,
}

impl WizardService {
    pub fn new(job_service: JobService, typing_delay: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            job_service,
            typing_delay,
        }
    }

    pub fn start(&self) -> (Uuid, WizardState) {
        self.prune_stale(Instant::now());
        let id = Uuid::new_v4();
        let state = WizardState::new();
        self.store(id, state.clone());
        (id, state)
    }

    pub fn get(&self, id: Uuid) -> Result<WizardState> {
        self.sessions
            .lock()
            .expect("wizard session store poisoned")
            .get(&id)
            .map(|session| session.state.clone())
            .ok_or_else(|| Error::NotFound(format!("Wizard session {} not found", id)))
    }

    pub async fn answer(&self, id: Uuid, value: String) -> Result<WizardState> {
        self.advance(id, Event::Answer(value)).await
    }

    pub async fn skip(&self, id: Uuid) -> Result<WizardState> {
        self.advance(id, Event::Skip).await
    }

    pub async fn retry(&self, id: Uuid) -> Result<WizardState> {
        self.advance(id, Event::Retry).await
    }

    async fn advance(&self, id: Uuid, event: Event) -> Result<WizardState> {
        let state = self.get(id)?;
        let mut next = state.apply(event).map_err(step_error)?;
        self.store(id, next.clone());

        match next.phase {
            Phase::AwaitingPrompt => {
                // Detached: a dropped request future must not cancel the
                // pending prompt and strand the session in AwaitingPrompt.
                let service = self.clone();
                let delivery = tokio::spawn(async move {
                    sleep(service.typing_delay).await;
                    service.deliver_prompt(id)
                });
                next = match delivery.await {
                    Ok(delivered) => delivered?,
                    Err(err) => {
                        tracing::error!(session = %id, error = ?err, "Prompt delivery task failed");
                        self.get(id)?
                    }
                };
            }
            Phase::Submitting => {
                next = self.submit(id, next).await?;
            }
            _ => {}
        }
        Ok(next)
    }

    /// Swaps the typing indicator for the next prompt. Idempotent: a
    /// session that already moved on is returned unchanged.
    fn deliver_prompt(&self, id: Uuid) -> Result<WizardState> {
        let mut sessions = self.sessions.lock().expect("wizard session store poisoned");
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Wizard session {} not found", id)))?;
        if session.state.phase != Phase::AwaitingPrompt {
            return Ok(session.state.clone());
        }
        let next = session
            .state
            .apply(Event::PromptReady)
            .map_err(step_error)?;
        session.state = next.clone();
        session.touched = Instant::now();
        Ok(next)
    }

    async fn submit(&self, id: Uuid, state: WizardState) -> Result<WizardState> {
        let profile = state
            .collected_profile()
            .ok_or_else(|| Error::Internal("Wizard submitted with missing answers".to_string()))?;

        let event = match self.job_service.create(profile, time::now_ms()).await {
            Ok(job_id) => Event::SubmitSucceeded(job_id),
            Err(err) => {
                tracing::error!(session = %id, error = ?err, "Failed to create job post from wizard");
                Event::SubmitFailed("Could not save your profile. Please try again.".to_string())
            }
        };

        let next = state.apply(event).map_err(step_error)?;
        self.store(id, next.clone());
        Ok(next)
    }

    /// Terminal sessions are reclaimed on the spot; everything else is
    /// kept with a fresh idle clock. `Failed` is not terminal (it has a
    /// retry path) and stays resident until the TTL sweep.
    fn store(&self, id: Uuid, state: WizardState) {
        let mut sessions = self.sessions.lock().expect("wizard session store poisoned");
        if matches!(state.phase, Phase::Done { .. }) {
            sessions.remove(&id);
            return;
        }
        sessions.insert(
            id,
            Session {
                state,
                touched: Instant::now(),
            },
        );
    }

    fn prune_stale(&self, now: Instant) {
        self.sessions
            .lock()
            .expect("wizard session store poisoned")
            .retain(|_, session| now.duration_since(session.touched) < SESSION_TTL);
    }
}

fn step_error(err: StepError) -> Error {
    match err {
        StepError::Invalid(msg) => Error::BadRequest(msg),
        StepError::OutOfTurn => {
            Error::Conflict("This action is not available in the wizard's current state".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn service(typing_delay: Duration) -> WizardService {
        // Lazy pool: never connected, these tests stop short of the
        // submission step.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        WizardService::new(JobService::new(pool), typing_delay)
    }

    fn completed_state() -> WizardState {
        let answers = [
            "26-35",
            "Work Permit",
            "Bangladesh",
            "3-5 years",
            "Factory Worker",
            "Forklift certified, 4 years on a packing line",
            "0123456789",
            "Klang",
        ];
        let mut state = WizardState::new().apply(Event::Skip).unwrap();
        for answer in answers {
            state = state.apply(Event::PromptReady).unwrap();
            state = state.apply(Event::Answer(answer.into())).unwrap();
        }
        state
            .apply(Event::SubmitSucceeded("job_1_abcdefg".into()))
            .unwrap()
    }

    #[tokio::test]
    async fn prompt_delivery_survives_a_dropped_request() {
        let svc = service(Duration::from_millis(200));
        let (id, _) = svc.start();

        let request = tokio::spawn({
            let svc = svc.clone();
            async move { svc.answer(id, "Rahim".into()).await }
        });
        sleep(Duration::from_millis(50)).await;
        request.abort();
        sleep(Duration::from_millis(400)).await;

        let state = svc.get(id).expect("session still live");
        assert_eq!(state.phase, Phase::Asking);
        assert_eq!(state.step, 1);

        let next = svc
            .answer(id, "26-35".into())
            .await
            .expect("session answers normally after the drop");
        assert_eq!(next.step, 2);
    }

    #[tokio::test]
    async fn completed_session_is_reclaimed() {
        let svc = service(Duration::ZERO);
        let (id, _) = svc.start();
        svc.store(id, completed_state());
        assert!(svc.get(id).is_err());
    }

    #[tokio::test]
    async fn stale_sessions_are_swept() {
        let svc = service(Duration::ZERO);
        let (id, _) = svc.start();

        svc.prune_stale(Instant::now());
        assert!(svc.get(id).is_ok());

        svc.prune_stale(Instant::now() + SESSION_TTL + Duration::from_secs(1));
        assert!(svc.get(id).is_err());
    }
}
