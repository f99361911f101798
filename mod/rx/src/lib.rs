//! Rx module — pharmacy entity CRUD behind the auth pipeline.
//!
//! # Resources
//!
//! - **Drug** — stock item with price and quantity, optionally sourced
//!   from a supplier
//! - **Supplier** — drug source, unique by name
//! - **Order** — a doctor's order for a drug, checked against stock
//! - **SalesReport** — aggregated sales figures for a period
//! - **AdminUser / DoctorUser** — login identities for the two roles
//!
//! Every write passes the same pipeline: the DTO is validated (all
//! violations collected) before the repository touches the store;
//! repositories enforce store-level invariants (uniqueness, referential
//! integrity) and nothing else.

pub mod api;
pub mod model;
pub mod repo;
pub mod validate;
