use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::dto::{
    application_dto::{
        ApplicationView, ApplyPayload, HistoryEntry, ScheduleResponse, SchedulePayload,
        StatusPayload, SubmitPayload, TransitionPayload, TransitionResponse, TransitionTarget,
    },
    auth_dto::{LoginPayload, LoginResponse, RegisterPayload, UserResponse},
    candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload},
    inbox_dto::{MessageResponse, MessageStatusPayload, ReadAllResponse, UnreadCountResponse},
    interview_dto::{CreateInterviewPayload, SendLinkPayload, UpdateInterviewPayload},
    onboarding_dto::{OnboardingEntry, OnboardingStatusPayload, OnboardingStatusResponse},
    position_dto::{CreatePositionPayload, UpdatePositionPayload},
    purchase_order_dto::{CreatePurchaseOrderPayload, DecisionPayload},
};
use crate::models::{
    application::{
        ApplicationSource, ApplicationStatus, CommunicationEntry, InterviewSummary,
        OnboardingStatus,
    },
    candidate::{Candidate, CandidateStatus},
    interview::{Interview, InterviewResult, InterviewStatus},
    message::ReadState,
    position::{Position, PositionStatus},
    purchase_order::{PurchaseOrder, PurchaseOrderStatus},
    user::Role,
};
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "Smart Submissions API"),
    paths(
        routes::health::health,
        routes::auth::register,
        routes::auth::login,
        routes::auth::me,
        routes::admin::list_users,
        routes::admin::approve_user,
        routes::admin::reject_user,
        routes::position::create_position,
        routes::position::list_positions,
        routes::position::get_position,
        routes::position::update_position,
        routes::position::close_position,
        routes::position::delete_position,
        routes::candidate::create_candidate,
        routes::candidate::list_candidates,
        routes::candidate::my_candidate,
        routes::candidate::get_candidate,
        routes::candidate::update_candidate,
        routes::candidate::delete_candidate,
        routes::application::apply,
        routes::application::submit,
        routes::application::list_applications,
        routes::application::get_application,
        routes::application::history,
        routes::application::review,
        routes::application::reject,
        routes::application::hire,
        routes::application::set_status,
        routes::application::schedule,
        routes::interview::list_interviews,
        routes::interview::my_interviews,
        routes::interview::get_interview,
        routes::interview::create_interview,
        routes::interview::update_interview,
        routes::interview::delete_interview,
        routes::interview::send_link,
        routes::onboarding::list_onboarding,
        routes::onboarding::update_onboarding_status,
        routes::inbox::list_messages,
        routes::inbox::unread_count,
        routes::inbox::set_message_status,
        routes::inbox::read_all,
        routes::purchase_order::create_purchase_order,
        routes::purchase_order::list_purchase_orders,
        routes::purchase_order::get_purchase_order,
        routes::purchase_order::decide_purchase_order,
    ),
    components(schemas(
        Role, UserResponse, RegisterPayload, LoginPayload, LoginResponse,
        Position, PositionStatus, CreatePositionPayload, UpdatePositionPayload,
        Candidate, CandidateStatus, CreateCandidatePayload, UpdateCandidatePayload,
        ApplicationStatus, ApplicationSource, OnboardingStatus, InterviewSummary,
        CommunicationEntry, ApplicationView, ApplyPayload, SubmitPayload, StatusPayload,
        TransitionPayload, TransitionTarget, TransitionResponse, SchedulePayload,
        ScheduleResponse, HistoryEntry,
        Interview, InterviewStatus, InterviewResult, CreateInterviewPayload,
        UpdateInterviewPayload, SendLinkPayload,
        OnboardingEntry, OnboardingStatusPayload, OnboardingStatusResponse,
        ReadState, MessageResponse, MessageStatusPayload, UnreadCountResponse, ReadAllResponse,
        PurchaseOrder, PurchaseOrderStatus, CreatePurchaseOrderPayload, DecisionPayload,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "smart-submissions", description = "Hiring pipeline API")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
