//! Plotting adapters.

mod svg_biplot_renderer;

pub use svg_biplot_renderer::SvgBiplotRenderer;
