//! # Simple client for the DNSimple v1 record API.
//!
//! Implements a blocking client for creating, retrieving and destroying DNS
//! records through the [DNSimple API]. Every call is a single HTTP request,
//! and failures carry the [Operation] they happened during.
//!
//! ## Examples
//!
//! ```no_run
//! use dnsimple::Client;
//! use dnsimple::record::CreateRecord;
//!
//! let client = Client::builder()
//!     .email("<EMAIL>")
//!     .token("<TOKEN>")
//!     .build()
//!     .unwrap();
//!
//! let id = client
//!     .create_record("example.com", &CreateRecord::new("www", "1.2.3.4", "A").ttl("3600"))
//!     .unwrap();
//! let record = client.retrieve_record(&id).unwrap();
//! assert_eq!(record.string_ttl(), "3600");
//!
//! client.destroy_record(&id).unwrap();
//! ```
//!
//! [DNSimple API]: https://developer.dnsimple.com/

mod client;
mod errors;
pub mod record;
mod utils;

pub use client::*;
pub use errors::*;
