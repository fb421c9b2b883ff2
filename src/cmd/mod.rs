pub mod classify;
pub mod replay;
