pub mod client;
pub mod configuration;
pub mod domain;
pub mod notify;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
