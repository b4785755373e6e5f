//! Getter datasets.

mod dataset_;
mod labeled_image;
mod utils;
mod voc;

pub use dataset_::*;
pub use labeled_image::*;
pub use utils::*;
pub use voc::*;
