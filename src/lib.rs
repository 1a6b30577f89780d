pub mod configuration;
pub mod domain;
pub mod relay_client;
pub mod routes;
pub mod startup;
pub mod subscribe_form;
pub mod telemetry;
pub mod upstream_client;
pub mod utils;
