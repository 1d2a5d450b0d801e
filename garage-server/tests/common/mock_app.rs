use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use garage_api::models::SensorEvent;
use garage_server::configs::{Auth, Database, Door, Remote, SchemaManager, Snooze, Storage};
use garage_server::errors::NotifierError;
use garage_server::handles::{
    CheckInState, CommandState, EventState, SnoozeState, checkin_router, command_router,
    event_router, snooze_router,
};
use garage_server::middlewares::RemoteAuthState;
use garage_server::repositories::{
    EventRecordRepository, RemoteCommandRepository, SnoozeRepository,
};
use garage_server::services::{
    AuthService, CheckInService, CommandService, Notifier, SnoozeService, TokenService,
};

pub const TEST_PUSH_KEY: &str = "test-push-key";
pub const AUTHORIZED_EMAIL: &str = "gatekeeper@example.com";

/// Captures published notifications instead of calling out.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<(String, SensorEvent)>>,
}

impl RecordingNotifier {
    pub fn published(&self) -> Vec<(String, SensorEvent)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, event: &SensorEvent) -> Result<(), NotifierError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_owned(), event.clone()));

        Ok(())
    }
}

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub event_repository: Arc<EventRecordRepository>,
    pub command_repository: Arc<RemoteCommandRepository>,
    pub snooze_repository: Arc<SnoozeRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub token_service: Arc<TokenService>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let door = Door {
            too_long_seconds: 60,
        };
        let remote = Remote {
            enabled: true,
            push_key: String::from(TEST_PUSH_KEY),
            authorized_emails: vec![String::from(AUTHORIZED_EMAIL)],
            min_period_seconds: 10,
            command_timeout_seconds: 60,
        };
        let snooze = Snooze { enabled: true };

        let event_repository = Arc::new(EventRecordRepository::new(storage.clone()));
        let command_repository = Arc::new(RemoteCommandRepository::new(storage.clone()));
        let snooze_repository = Arc::new(SnoozeRepository::new(storage.clone()));

        let notifier = Arc::new(RecordingNotifier::default());

        let checkin_service = Arc::new(CheckInService::new(
            event_repository.clone(),
            notifier.clone(),
            &door,
        ));
        let command_service = Arc::new(CommandService::new(command_repository.clone(), &remote));
        let snooze_service = Arc::new(SnoozeService::new(
            event_repository.clone(),
            snooze_repository.clone(),
            &snooze,
        ));

        let auth_service = Arc::new(AuthService::new(&remote));
        let token_service = Arc::new(TokenService::new(Auth {
            secret: String::from("test"),
            expiration: 1000,
        }));

        let auth_state = RemoteAuthState {
            auth_service,
            token_service: token_service.clone(),
        };

        let router = Router::new()
            .merge(checkin_router(CheckInState { checkin_service }))
            .merge(event_router(EventState {
                event_repository: event_repository.clone(),
            }))
            .merge(command_router(
                CommandState { command_service },
                auth_state.clone(),
            ))
            .merge(snooze_router(SnoozeState { snooze_service }, auth_state));

        Self {
            storage,
            event_repository,
            command_repository,
            snooze_repository,
            notifier,
            token_service,
            router,
        }
    }

    pub fn token_for(&self, email: &str) -> String {
        self.token_service.generate_token(email).unwrap().token
    }
}
