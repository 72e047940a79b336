//! HTTP client and listing state machine for the staff directory.
//!
//! [`DirectoryApi`] is a typed wrapper over the REST endpoints.
//! [`ListingController`] drives a listing view the way the frontend does:
//! debounced search input, a descriptor-keyed result cache, speculative
//! next-page prefetch, and a stale-response guard so superseded requests
//! never overwrite newer state.

pub mod api;
pub mod controller;

pub use api::{ClientError, DirectoryApi};
pub use controller::{ListingController, ListingTransport, SEARCH_DEBOUNCE};
