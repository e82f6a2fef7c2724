pub mod error;

pub mod analysis;
pub mod case;
pub mod config;
pub mod document;
pub mod event;
pub mod hearing;
pub mod mail;
pub mod monitor;
pub mod party;
pub mod templates;

pub use error::*;

pub use analysis::*;
pub use case::*;
pub use config::*;
pub use document::*;
pub use event::*;
pub use hearing::*;
pub use mail::*;
pub use monitor::*;
pub use party::*;
pub use templates::*;
