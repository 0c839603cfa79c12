pub mod analyzer;
pub mod bitflyer;
pub mod config;
pub mod error;
pub mod exchange;
pub mod indicator;
pub mod model;
pub mod reconcile;
pub mod series;
pub mod trader;
