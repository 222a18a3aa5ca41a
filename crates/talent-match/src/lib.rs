//! Talent matching core: compatibility scoring between vacancy requirements and
//! candidate skills, with the directory, session, and store layers that feed it.

pub mod config;
pub mod error;
pub mod matching;
pub mod reports;
pub mod session;
pub mod store;
pub mod talent;
pub mod telemetry;
