//! Resource descriptors
//!
//! Value objects exchanged with the cluster. Field names follow the
//! cluster's JSON (PascalCase for the classic API, camelCase for mesh
//! resources). Nested structures this crate does not interpret are kept as
//! `serde_json::Value`.

pub mod application;
pub mod application_type;
pub mod chaos;
pub mod code_package;
pub mod common;
pub mod compose;
pub mod mesh;
pub mod repair;
pub mod service_type;

pub use application::*;
pub use application_type::*;
pub use chaos::*;
pub use code_package::*;
pub use common::*;
pub use compose::*;
pub use mesh::*;
pub use repair::*;
pub use service_type::*;
