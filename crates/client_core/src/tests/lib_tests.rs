use super::*;
use shared::{
    domain::{Credentials, Field, CREDENTIALS_KEY},
    error::StoreError,
};
use storage::{CredentialStore, MemoryKeyValueStore};
use tokio::sync::Mutex;

#[derive(Default)]
struct CountingStore {
    inner: MemoryKeyValueStore,
    gets: Mutex<u32>,
    sets: Mutex<u32>,
    clears: Mutex<u32>,
    fail_with: Option<StoreError>,
}

impl CountingStore {
    fn failing(err: StoreError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    async fn gets(&self) -> u32 {
        *self.gets.lock().await
    }

    async fn sets(&self) -> u32 {
        *self.sets.lock().await
    }

    async fn clears(&self) -> u32 {
        *self.clears.lock().await
    }
}

#[async_trait]
impl CredentialStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        *self.gets.lock().await += 1;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        *self.sets.lock().await += 1;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.inner.set(key, value).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.clears.lock().await += 1;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.inner.clear().await
    }
}

struct ScriptedGate {
    outcome: Result<PromptResult, BiometricError>,
    prompts: Mutex<Vec<PromptConfig>>,
}

impl ScriptedGate {
    fn confirming() -> Self {
        Self::resolving(Ok(PromptResult::confirmed()))
    }

    fn cancelling() -> Self {
        Self::resolving(Ok(PromptResult::cancelled()))
    }

    fn resolving(outcome: Result<PromptResult, BiometricError>) -> Self {
        Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        }
    }

    async fn prompt_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl BiometricGate for ScriptedGate {
    async fn prompt(&self, config: &PromptConfig) -> Result<PromptResult, BiometricError> {
        self.prompts.lock().await.push(config.clone());
        self.outcome.clone()
    }
}

async fn fill(
    controller: &mut FormController<Arc<CountingStore>, Arc<ScriptedGate>>,
    first_name: &str,
    last_name: &str,
) {
    controller.edit_field(Field::FirstName, first_name).await;
    controller.edit_field(Field::LastName, last_name).await;
}

fn controller_with(
    store: CountingStore,
    gate: ScriptedGate,
) -> (
    FormController<Arc<CountingStore>, Arc<ScriptedGate>>,
    Arc<CountingStore>,
    Arc<ScriptedGate>,
) {
    let store = Arc::new(store);
    let gate = Arc::new(gate);
    (
        FormController::new(store.clone(), gate.clone()),
        store,
        gate,
    )
}

#[tokio::test]
async fn register_saves_and_moves_to_registered() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;

    let notices = controller.register().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::RegisterSucceeded)]);
    assert_eq!(store.sets().await, 1);
    let state = controller.state();
    assert_eq!(state.phase, Phase::Registered);
    assert!(state.show_login_button);
    assert_eq!(state.first_name, "");
    assert_eq!(state.last_name, "");
    assert_eq!(
        store.inner.get(CREDENTIALS_KEY).await.expect("raw"),
        Some(r#"{"firstName":"Jean","lastName":"Dupont"}"#.to_string())
    );
}

#[tokio::test]
async fn register_with_empty_first_name_never_writes() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "", "Dupont").await;

    let notices = controller.register().await;

    assert!(notices.is_empty(), "validation errors are inline only");
    assert_eq!(store.sets().await, 0);
    assert!(controller.state().errors.contains(Field::FirstName));
    assert_eq!(controller.state().phase, Phase::Empty);
    assert_eq!(controller.state().last_name, "Dupont");
}

#[tokio::test]
async fn failed_write_keeps_inputs_and_phase() {
    let (mut controller, store, _) = controller_with(
        CountingStore::failing(StoreError::Write {
            key: CREDENTIALS_KEY.to_string(),
            reason: "read-only filesystem".to_string(),
        }),
        ScriptedGate::confirming(),
    );
    fill(&mut controller, "Jean", "Dupont").await;

    let notices = controller.register().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::RegisterFailed)]);
    assert_eq!(store.sets().await, 1);
    assert_eq!(controller.state().first_name, "Jean");
    assert_eq!(controller.state().phase, Phase::Empty);
    assert!(!controller.state().show_login_button);
}

#[tokio::test]
async fn cancelled_biometric_never_reads_storage() {
    let (mut controller, store, gate) =
        controller_with(CountingStore::default(), ScriptedGate::cancelling());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;

    let notices = controller.login().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::BiometricCancelled)]);
    assert_eq!(gate.prompt_count().await, 1);
    assert_eq!(store.gets().await, 0);
    assert_eq!(controller.state().loaded_credentials, None);
}

#[tokio::test]
async fn failing_biometric_hardware_never_reads_storage() {
    let (mut controller, store, _) = controller_with(
        CountingStore::default(),
        ScriptedGate::resolving(Err(BiometricError::PromptFailed("sensor busy".to_string()))),
    );
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;

    let notices = controller.login().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::BiometricFailed)]);
    assert_eq!(store.gets().await, 0);
}

#[tokio::test]
async fn confirmed_biometric_reads_storage_exactly_once() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;

    let notices = controller.login().await;

    assert!(notices.is_empty());
    assert_eq!(store.gets().await, 1);
}

#[tokio::test]
async fn register_then_login_loads_the_same_credentials() {
    let (mut controller, _, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;

    controller.login().await;

    assert_eq!(
        controller.state().loaded_credentials,
        Some(Credentials::new("Jean", "Dupont"))
    );
    assert_eq!(controller.state().phase, Phase::LoggedIn);
}

#[tokio::test]
async fn login_without_a_record_alerts_and_keeps_state() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;
    store.inner.clear().await.expect("wipe behind the controller's back");
    let before = controller.state().clone();

    let notices = controller.login().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::LoginFailed)]);
    assert_eq!(controller.state(), &before);
}

#[tokio::test]
async fn re_registering_overwrites_the_single_record() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;
    controller.login().await;

    fill(&mut controller, "Marie", "Curie").await;
    let notices = controller.register().await;
    assert_eq!(notices, vec![Notice::Alert(Alert::RegisterSucceeded)]);
    assert_eq!(controller.state().phase, Phase::Registered);
    assert_eq!(store.inner.len().await, 1);

    controller.login().await;
    assert_eq!(
        controller.state().loaded_credentials,
        Some(Credentials::new("Marie", "Curie"))
    );
}

#[tokio::test]
async fn double_register_writes_twice_last_write_wins() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    // Both presses are captured before the first one is processed.
    let first_press = controller.submission();
    let second_press = controller.submission();

    let first = controller.register_submitted(first_press).await;
    let second = controller.register_submitted(second_press).await;

    assert_eq!(first, vec![Notice::Alert(Alert::RegisterSucceeded)]);
    assert_eq!(second, vec![Notice::Alert(Alert::RegisterSucceeded)]);
    assert_eq!(store.sets().await, 2);
    assert!(controller.state().errors.is_empty());
    assert_eq!(store.inner.len().await, 1);
    assert_eq!(
        store.inner.get(CREDENTIALS_KEY).await.expect("raw"),
        Some(r#"{"firstName":"Jean","lastName":"Dupont"}"#.to_string())
    );
}

#[tokio::test]
async fn submission_reflects_the_current_inputs() {
    let (mut controller, _, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "").await;

    assert_eq!(controller.submission(), Credentials::new("Jean", ""));
}

#[tokio::test]
async fn clear_all_requires_confirmation() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;

    let notices = controller.clear_all().await;
    assert_eq!(
        notices,
        vec![Notice::ConfirmClear(ConfirmationDialog::clear_all())]
    );
    assert_eq!(store.clears().await, 0);

    controller.cancel_clear_all().await;
    assert_eq!(store.clears().await, 0);
    assert_eq!(controller.state().phase, Phase::Registered);
}

#[tokio::test]
async fn confirmed_clear_all_empties_store_and_resets_state() {
    let (mut controller, store, _) =
        controller_with(CountingStore::default(), ScriptedGate::confirming());
    fill(&mut controller, "Jean", "Dupont").await;
    controller.register().await;
    controller.login().await;
    fill(&mut controller, "", "Du").await;
    controller.register().await;

    controller.clear_all().await;
    let notices = controller.confirm_clear_all().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::ClearSucceeded)]);
    assert_eq!(store.clears().await, 1);
    assert!(store.inner.is_empty().await);
    assert_eq!(controller.state(), &UiState::default());
}

#[tokio::test]
async fn failed_clear_alerts_and_keeps_state() {
    let (mut controller, _, _) = controller_with(
        CountingStore::failing(StoreError::Clear("locked".to_string())),
        ScriptedGate::confirming(),
    );
    fill(&mut controller, "Jean", "").await;

    controller.clear_all().await;
    let notices = controller.confirm_clear_all().await;

    assert_eq!(notices, vec![Notice::Alert(Alert::ClearFailed)]);
    assert_eq!(controller.state().first_name, "Jean");
}

#[tokio::test]
async fn unavailable_gate_rejects_every_prompt() {
    let err = UnavailableBiometricGate
        .prompt(&PromptConfig::default())
        .await
        .expect_err("no sensor");
    assert!(matches!(err, BiometricError::Unavailable(_)));
}
