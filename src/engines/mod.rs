//! Image provider implementations.

mod bing_images;
mod google_images;

pub use bing_images::BingImages;
pub use google_images::{GoogleImages, PAGE_SIZE};
