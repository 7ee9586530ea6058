pub mod controller;
pub mod form_state;
pub mod status;
