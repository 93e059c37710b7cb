// nstmine: persistence and visualization helpers for NST subtitle text mining.
//
// This is the library root. The codec owns the semicolon CSV format, the
// stores and corpus loaders build on it, and viz/output present the results.

pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod status;
pub mod store;
pub mod viz;

pub use config::Config;
pub use error::{Result, StoreError};
