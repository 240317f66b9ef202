//! # jobboard
//!
//! Data-access core for a job-board REST backend on PostgreSQL.
//!
//! Two entity models — companies and jobs — with create / filtered search /
//! get / partial update / remove operations. The dynamic SQL is built by two
//! small fragment builders with automatically numbered placeholders
//! (`$1`, `$2`, ...); everything else is explicit statements.
//!
//! ## Features
//!
//! - **Partial updates**: sparse patches become `SET` fragments via
//!   [`SetFragment`], with attribute-to-column translation and a hard error
//!   on empty payloads
//! - **Filtered search**: optional predicates become conjunctive `WHERE`
//!   fragments via [`WhereFragment`]
//! - **Client-agnostic**: every operation takes an `&impl GenericClient` —
//!   a connection, a pooled connection, or a transaction
//! - **Typed errors**: caller-input errors (`DuplicateKey`, `NotFound`,
//!   `EmptyPayload`, `InvalidRange`) are distinct from infrastructure
//!   failures, ready for HTTP status mapping at the routing layer
//!
//! ## Example
//!
//! ```ignore
//! use jobboard::{Company, CompanyFilter, CompanyPatch, DatabaseConfig};
//!
//! let pool = DatabaseConfig::from_env()?.create_pool()?;
//! let client = pool.get().await?;
//!
//! let matches = Company::find_filtered(
//!     &client,
//!     &CompanyFilter { name: Some("net".into()), ..Default::default() },
//! )
//! .await?;
//!
//! let patched = Company::update(
//!     &client,
//!     "acme",
//!     CompanyPatch { num_employees: Some(50), ..Default::default() },
//! )
//! .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod pool;
pub mod row;
pub mod sql;

pub use client::GenericClient;
pub use config::DatabaseConfig;
pub use error::{ModelError, ModelResult};
pub use model::{
    Company, CompanyFilter, CompanyPatch, CompanyWithJobs, Job, JobFilter, JobPatch, JobSummary,
    NewCompany, NewJob,
};
pub use pool::{create_pool, create_pool_with_config};
pub use row::{FromRow, RowExt};
pub use sql::{FieldMap, SetFragment, WhereFragment};
