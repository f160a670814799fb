pub mod gif_filter;
pub mod window;
