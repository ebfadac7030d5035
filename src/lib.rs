pub mod app_config;
pub mod console;
pub mod domain;
pub mod evaluator;
mod geo_deserializer;
pub mod notifier;
pub mod position_source;
pub mod sse;
pub mod tracker;
pub mod tracker_listener;
