pub mod aggregate;
pub mod anomaly;
pub mod diff;
pub mod price;
pub mod record;
pub mod snapshot;
pub mod unit_type;
