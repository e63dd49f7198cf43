//! The selection-driven insight renderer.
//!
//! One call to [`render`] is one render pass: given a borrowed frame and
//! the user's [`ChartSelection`], it computes the aggregation that chart
//! kind needs, describes the chart as a [`ChartSpec`] value for a
//! downstream rendering sink, and derives a short insight sentence from
//! the same aggregation. The renderer holds no state, caches nothing, and
//! never mutates the frame; an empty aggregation is a designed outcome
//! ([`ChartSpec::Empty`]), not an error.

pub mod aggregate;
pub mod error;
pub mod insight;
pub mod render;
pub mod selection;
pub mod spec;

pub use aggregate::{
    AxisCoding, CorrelationMatrix, FrequencyEntry, FrequencyTable, Histogram, HistogramBin,
    HuedScatter, PivotTable, ScatterData, ScatterGroup,
};
pub use error::InsightError;
pub use render::{HISTOGRAM_BINS, PIVOT_DISPLAY_LIMIT, render};
pub use selection::ChartSelection;
pub use spec::{ChartRender, ChartSpec, RenderWarning};
