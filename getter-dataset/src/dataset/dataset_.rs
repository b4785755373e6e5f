use crate::common::*;

/// The key of the image getter.
pub const IMAGE_KEY: &str = "img";
/// The key of the label getter.
pub const LABEL_KEY: &str = "label";

/// A value produced by a named getter.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Pixels in `(channels, height, width)` layout.
    Image(Array3<f32>),
    Label(i32),
    Text(String),
}

impl Field {
    pub fn as_image(&self) -> Option<&Array3<f32>> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<i32> {
        match *self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The indexed dataset whose examples are assembled from named getters.
///
/// Each key in [keys](GetterDataset::keys) names a per-index accessor.
/// Nothing is materialized ahead of time; every call reads from disk.
pub trait GetterDataset
where
    Self: Debug + Send + Sync,
{
    /// Get number of examples in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The registered getter keys in example order.
    fn keys(&self) -> &[&'static str];

    /// Run the getter named `key` on the `index`-th example.
    fn get(&self, index: usize, key: &str) -> Result<Field>;

    /// Run every getter on the `index`-th example, in key order.
    fn get_example(&self, index: usize) -> Result<Vec<Field>> {
        self.keys().iter().map(|key| self.get(index, key)).collect()
    }
}
