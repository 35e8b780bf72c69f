//! Marquee Search - OMDb metadata client

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Implements the core provider seam against the OMDb search endpoint:
//! request parameter assembly, wire-type decoding, and the mapping of the
//! service's positive/negative response indicators onto the search error
//! taxonomy.

pub mod omdb;

// Re-export main types
pub use omdb::{OmdbClient, OmdbSearchResponse, OmdbSummary};
