// src/simulators/mod.rs

pub mod gbm;
pub mod price_feed;

pub use gbm::GbmFeed;
pub use price_feed::PriceFeed;
