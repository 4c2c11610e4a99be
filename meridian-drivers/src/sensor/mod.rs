//! Temperature sensor drivers

pub mod tcn75a;

pub use tcn75a::{Tcn75a, TCN75A_ADDR};
