pub mod application_service;
pub mod auth_service;
pub mod candidate_service;
pub mod inbox_service;
pub mod interview_service;
pub mod onboarding_service;
pub mod position_service;
pub mod purchase_order_service;
pub mod workflow;
