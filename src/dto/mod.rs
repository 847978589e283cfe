pub mod application_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod inbox_dto;
pub mod interview_dto;
pub mod onboarding_dto;
pub mod position_dto;
pub mod purchase_order_dto;
