pub mod config;

pub mod error_convert;

pub mod telemetry;

// Casebook core
pub mod store;

pub mod controller;

pub mod aggregate;

pub mod timeline;

pub mod providers;

pub mod documents;

pub mod inbox;

pub mod links;

pub mod seed;

// REST surface
#[cfg(feature = "server")]
pub mod rest;

#[cfg(feature = "server")]
pub mod openapi;

#[cfg(feature = "server")]
pub mod health;
