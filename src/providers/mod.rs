pub mod gateway;
pub mod transactions;

/// User agent sent on every outgoing request.
pub const USER_AGENT: &str = "bankctl/0.1";
