use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::RemoteAuthState;
use crate::repositories::{EventRecordRepository, RemoteCommandRepository, SnoozeRepository};
use crate::services::{
    AuthService, CheckInService, CommandService, PushNotifier, SnoozeService, TokenService,
};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    let event_repository = Arc::new(EventRecordRepository::new(storage.clone()));
    let command_repository = Arc::new(RemoteCommandRepository::new(storage.clone()));
    let snooze_repository = Arc::new(SnoozeRepository::new(storage.clone()));

    let notifier = Arc::new(PushNotifier::new(&settings.messaging));

    let checkin_service = Arc::new(CheckInService::new(
        event_repository.clone(),
        notifier,
        &settings.door,
    ));
    let command_service = Arc::new(CommandService::new(command_repository, &settings.remote));
    let snooze_service = Arc::new(SnoozeService::new(
        event_repository.clone(),
        snooze_repository,
        &settings.snooze,
    ));

    let auth_service = Arc::new(AuthService::new(&settings.remote));
    let token_service = Arc::new(TokenService::new(settings.auth.clone()));

    let auth_state = RemoteAuthState {
        auth_service,
        token_service,
    };

    Router::new()
        .merge(checkin_router(CheckInState { checkin_service }))
        .merge(event_router(EventState {
            event_repository: event_repository.clone(),
        }))
        .merge(command_router(
            CommandState { command_service },
            auth_state.clone(),
        ))
        .merge(snooze_router(SnoozeState { snooze_service }, auth_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
