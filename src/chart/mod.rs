//! Chart construction: `Dataset` + two team identifiers → `ChartSpec`.
//!
//! Pure and egui-free; the `ui` layer renders the result and the CLI can
//! export it as JSON.

pub mod builder;
pub mod spec;

pub use builder::{build_chart, ChartConfig};
pub use spec::{ChartSpec, Trace};
