//! # Wireup Graph
//!
//! Dependency graph construction and ordering for the wiring compiler.
//!
//! ## Architecture
//!
//! ```text
//! Annotation[]
//!     │
//!     ├──> Builder (two-phase fold)
//!     │      ├─ Pass 1: one Factory node per alias (uniqueness enforced)
//!     │      ├─ Pass 1b: apply @final / @disable flags
//!     │      └─ Pass 2: resolve wire deps against the full node set
//!     │
//!     ├──> DiConfig (alias → Factory, deterministic enumeration)
//!     │
//!     └──> Scheduler (Kahn's algorithm)
//!            ├─ final/disabled nodes rejected as dependencies
//!            ├─ cycle detection
//!            └─ final nodes partitioned to the order's suffix
//! ```
//!
//! The scheduler is read-only over the graph; it returns an alias order the
//! emitter walks. Validation failures are fatal and carry the offending
//! aliases plus their declaring positions where available.

mod builder;
mod error;
mod schedule;
mod types;

pub use error::{GraphError, Result};
pub use schedule::build_order;
pub use types::{Dependency, DiConfig, Factory};
