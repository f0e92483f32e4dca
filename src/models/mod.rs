//! Domain models shared across the stockplay service.

pub mod query;
pub mod stock;

pub use query::{StockQuery, TimeInterval, TimeMode};
pub use stock::{Point, Stock};
