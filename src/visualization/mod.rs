pub mod animation;
pub mod camera;
pub mod colormap;
pub mod contour;
pub mod font;
pub mod raster;
pub mod renderer;
