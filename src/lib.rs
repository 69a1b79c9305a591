//! # Stock Analysis Client
//!
//! > **A typed entity-resource client for the stock-analysis administration API.**
//!
//! This crate keeps a client-side cache of five REST collection resources —
//! Stock, Analysis, Indicator, Portfolio, Position — synchronized with a
//! remote server. Each entity type gets an in-memory store (collection +
//! current entity + request flags), a pure request-lifecycle reducer driving
//! that store, and an HTTP gateway for the five standard operations.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One Engine, Five Resources
//! Every resource here behaves identically: fetch a collection, fetch one
//! record, create, update (full or partial), delete — each call marking the
//! store pending, then fulfilled or rejected. Instead of repeating that
//! plumbing per entity, the [`framework`] writes it once over a generic
//! `T: RestEntity` and the domain types plug in.
//!
//! ### State Without Locks
//! Each entity type's state is owned by exactly one Tokio task and mutated
//! only through the pure [`reduce`](framework::reduce) function, in the order
//! completion events arrive. Observers get snapshots over a watch channel.
//! Overlapping requests against the same store are *not* sequenced; the last
//! completion to arrive wins, and callers that need ordering must wait for
//! each call to resolve.
//!
//! ### Cache Consistency by Refetch
//! After every successful write the client refetches the full collection
//! (with a cache-defeating marker) rather than merging locally. That trades a
//! round trip for having no merge logic to get wrong.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic core: [`RestEntity`](framework::RestEntity),
//! [`EntityState`](framework::EntityState), the reducer, the store task, the
//! [`EntityGateway`](framework::EntityGateway), and the error taxonomy.
//!
//! ### 2. The Interface ([`clients`])
//! [`EntityResource`](clients::EntityResource) couples a gateway with a store
//! handle; the [`EntityClient`](clients::EntityClient) trait plus five typed
//! wrappers ([`StockClient`](clients::StockClient), ...) are what application
//! code holds.
//!
//! ### 3. The Domain ([`domain`])
//! The five entity models with their wire formats, empty defaults, and
//! required-field validation.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`AdminSystem`](lifecycle::AdminSystem) wires transport, gateways, stores,
//! and clients together at startup and shuts them down gracefully.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use stockanalysis_client::clients::EntityClient;
//! use stockanalysis_client::domain::Stock;
//! use stockanalysis_client::framework::ListQuery;
//! use stockanalysis_client::lifecycle::{AdminSystem, Config};
//!
//! stockanalysis_client::lifecycle::setup_tracing();
//! let system = AdminSystem::new(Config::from_env());
//!
//! system.stocks.fetch_all(ListQuery::default()).await?;
//! let stock = system.stocks.create(Stock::new("Acme", "Industrials")).await?;
//! assert!(system.stocks.state().update_success);
//!
//! system.shutdown().await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod domain;
pub mod framework;
pub mod lifecycle;
