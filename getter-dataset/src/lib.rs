//! Getter datasets over labeled image trees and PASCAL VOC detection data.

mod common;
pub mod annotation;
pub mod config;
pub mod dataset;
pub mod error;
pub mod image_io;
pub mod resolve;
pub mod vocabulary;

pub use annotation::VocAnnotation;
pub use dataset::{
    Field, GetterDataset, ImageEntry, LabeledImageDataset, VocDetectionDataset,
    VocDetectionDatasetInit,
};
pub use error::DatasetError;
pub use image_io::{read_image, ColorMode};
pub use resolve::{LocalVocResolver, VocResolver, VocYear};
pub use vocabulary::ClassVocabulary;
