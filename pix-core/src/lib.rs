#![forbid(unsafe_code)]

pub mod domain;
pub mod error;

pub mod container {
    pub mod header;
}

pub mod pack {
    pub mod plan;
    pub mod writer;
}

pub mod raster;

// Re-exports: stable API surface
pub use pack::plan::{DEFAULT_MAX_SIDE, PlanSummary, plan_file};
pub use pack::writer::{PackOptions, PackReport, pack};
