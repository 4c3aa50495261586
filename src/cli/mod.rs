pub mod currencies;
pub mod pay;
pub mod setup;
pub mod transactions;
pub mod ui;
