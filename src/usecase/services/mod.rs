pub mod action_service;
pub mod option_service;
pub mod predicate_service;
pub mod table_state_service;
pub mod view_service;
