pub mod config;
pub mod crawler;
pub mod storage;
pub mod telemetry;
