pub mod app;
pub mod bounds;
pub mod collection;
pub mod config;
pub mod error;
pub mod mercator;
pub mod metrics;
pub mod point;
pub mod read_kml;
pub mod report;
pub mod svg;
