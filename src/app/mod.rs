//! Widget orchestration: the mounted instance, its state machine, listener
//! reconciliation and input handling.

pub mod devbar;
pub(crate) mod effects;
pub mod event;
pub mod handler;
pub mod state;
