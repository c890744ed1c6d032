//! Concrete drawing surfaces and rasterisation

pub mod raster;
mod svg;

pub use svg::SvgSurface;
