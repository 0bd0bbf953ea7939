pub mod controller;
pub mod language;
pub mod orchestrator;
pub mod routes;
pub mod schema;
