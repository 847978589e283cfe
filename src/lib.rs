pub mod app;
pub mod config;
pub mod database;
pub mod docs;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::repository::DynStore;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    candidate_service::CandidateService, inbox_service::InboxService,
    interview_service::InterviewService, onboarding_service::OnboardingService,
    position_service::PositionService, purchase_order_service::PurchaseOrderService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: DynStore,
    pub auth_service: AuthService,
    pub position_service: PositionService,
    pub candidate_service: CandidateService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
    pub onboarding_service: OnboardingService,
    pub inbox_service: InboxService,
    pub purchase_order_service: PurchaseOrderService,
}

impl AppState {
    pub fn new(store: DynStore, config: Arc<Config>) -> Self {
        let inbox_service = InboxService::new(store.clone());
        let candidate_service = CandidateService::new(store.clone());
        let auth_service = AuthService::new(store.clone(), config.clone(), candidate_service.clone());
        let position_service = PositionService::new(store.clone(), candidate_service.clone());
        let application_service = ApplicationService::new(
            store.clone(),
            candidate_service.clone(),
            inbox_service.clone(),
            config.strict_transitions,
        );
        let interview_service = InterviewService::new(
            store.clone(),
            candidate_service.clone(),
            inbox_service.clone(),
        );
        let onboarding_service = OnboardingService::new(
            store.clone(),
            application_service.clone(),
            candidate_service.clone(),
        );
        let purchase_order_service = PurchaseOrderService::new(store.clone(), inbox_service.clone());

        Self {
            config,
            store,
            auth_service,
            position_service,
            candidate_service,
            application_service,
            interview_service,
            onboarding_service,
            inbox_service,
            purchase_order_service,
        }
    }
}
