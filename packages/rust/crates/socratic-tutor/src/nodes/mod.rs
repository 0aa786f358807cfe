mod ask;
mod gateway;
mod quiz;

pub(crate) use ask::{AskRequest, run_ask_mode};
pub(crate) use gateway::run_gateway_mode;
pub(crate) use quiz::run_quiz_mode;
