//! Chart layout, scales and view-models for temperature anomaly charts.
//!
//! This crate provides:
//! - `layout`: explicit chart dimensions, loadable from JSON
//! - `scale`: time and linear scales mapping data onto chart pixels
//! - `brush`: translating a brushed pixel extent into a date interval
//! - `view`: the immutable, serializable `ChartView` an external renderer draws
//!
//! Nothing here draws. A view is a pure projection of a dataset, a selected
//! interval and a layout, so re-projecting with the same inputs gives the
//! same view.

pub mod brush;
pub mod layout;
pub mod scale;
pub mod view;
