//! `bookwell-datastore` — client for the remote record store.
//!
//! The store exposes a generic query/update HTTP API keyed by table name.
//! Requests are described by immutable specification values ([`Query`],
//! [`Update`], [`Insert`]) built step by step with consuming combinators;
//! [`DataStoreClient`] serializes a spec into exactly one HTTP request.
//! There is no retry and no partial-result handling.

pub mod client;
pub mod query;

pub use client::{DataStoreClient, DataStoreError};
pub use query::{Filter, Insert, OrderBy, Query, Update};
