//! Inauguration Leads Report Console
//!
//! An interactive terminal front end for triaging inauguration-lead
//! submissions. It reads lead records from the Leads API, applies a
//! debounced name search and status filter, renders the result set as a
//! table, and toggles individual records between PENDING and DONE with an
//! optimistic local update.
//!
//! # Modules
//!
//! - `client`: Leads API client.
//! - `config`: Configuration management.
//! - `console`: Interactive command loop.
//! - `errors`: Error handling types.
//! - `models`: Lead records and API envelopes.
//! - `render`: Plain-text table rendering.
//! - `report`: The report view state machine.

pub mod client;
pub mod config;
pub mod console;
pub mod errors;
pub mod models;
pub mod render;
pub mod report;
