//! Dataset configuration format.

use crate::{
    common::*,
    dataset::{
        GetterDataset, LabeledImageDataset, VocDetectionDataset, VocDetectionDatasetInit,
        AUTO_DATA_DIR, DEFAULT_MARKER,
    },
    vocabulary::ClassVocabulary,
};

/// Variants of dataset and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DatasetConfig {
    /// Images in a marker directory tree.
    LabeledImage {
        root: PathBuf,
        #[serde(default = "default_marker")]
        marker: String,
    },
    /// PASCAL VOC detection dataset options.
    Voc(VocConfig),
}

impl DatasetConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = json5::from_str(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn load(&self) -> Result<AnyDataset> {
        let dataset = match self {
            Self::LabeledImage { root, marker } => {
                AnyDataset::LabeledImage(LabeledImageDataset::with_marker(root, marker)?)
            }
            Self::Voc(config) => AnyDataset::Voc(config.to_init()?.build()?),
        };
        Ok(dataset)
    }
}

/// PASCAL VOC dataset options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_split")]
    pub split: String,
    #[serde(default = "default_year")]
    pub year: String,
    #[serde(default)]
    pub use_difficult: bool,
    /// Optional classes file, one name per line. The VOC classes are used if absent.
    #[serde(default)]
    pub classes_file: Option<PathBuf>,
}

impl VocConfig {
    pub fn to_init(&self) -> Result<VocDetectionDatasetInit> {
        let Self {
            data_dir,
            split,
            year,
            use_difficult,
            classes_file,
        } = self;

        let classes = match classes_file {
            Some(path) => ClassVocabulary::load(path)?,
            None => ClassVocabulary::voc(),
        };

        Ok(VocDetectionDatasetInit {
            data_dir: data_dir.clone(),
            split: split.clone(),
            year: year.clone(),
            use_difficult: *use_difficult,
            classes,
        })
    }
}

impl Default for VocConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            split: default_split(),
            year: default_year(),
            use_difficult: false,
            classes_file: None,
        }
    }
}

/// A dataset built from a [DatasetConfig].
#[derive(Debug, Clone)]
pub enum AnyDataset {
    LabeledImage(LabeledImageDataset),
    Voc(VocDetectionDataset),
}

impl AnyDataset {
    pub fn as_getter(&self) -> &dyn GetterDataset {
        match self {
            Self::LabeledImage(dataset) => dataset,
            Self::Voc(dataset) => dataset,
        }
    }
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_owned()
}

fn default_data_dir() -> PathBuf {
    AUTO_DATA_DIR.into()
}

fn default_split() -> String {
    "train".to_owned()
}

fn default_year() -> String {
    "2012".to_owned()
}
