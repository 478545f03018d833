pub mod quiz_reconciler;
pub mod quiz_service;
pub mod session_registry;
pub mod user_service;
