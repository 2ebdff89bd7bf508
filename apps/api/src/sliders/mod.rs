// Competency configuration: file loading, normalization, and type discovery.

pub mod defaults;
pub mod handlers;
pub mod loader;

pub use loader::SliderLoader;
