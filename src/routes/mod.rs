pub mod admin;
pub mod application;
pub mod auth;
pub mod candidate;
pub mod health;
pub mod inbox;
pub mod interview;
pub mod onboarding;
pub mod position;
pub mod purchase_order;
