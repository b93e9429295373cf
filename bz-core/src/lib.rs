pub mod artifact;
pub mod bz_client;
pub mod configuration;
pub mod generator;
pub mod reqwest_helpers;
