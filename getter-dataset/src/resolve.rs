//! Locating the PASCAL VOC data directory for the `"auto"` data directory.

use crate::{common::*, dataset::manifest_path};
use directories::BaseDirs;

/// The environment variable overriding the dataset root directory.
pub const DATASET_ROOT_ENV: &str = "DATASET_ROOT";

/// The PASCAL VOC challenge years with known directory layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocYear {
    #[serde(rename = "2007")]
    Voc2007,
    #[serde(rename = "2012")]
    Voc2012,
}

impl VocYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voc2007 => "2007",
            Self::Voc2012 => "2012",
        }
    }
}

impl FromStr for VocYear {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let year = match text {
            "2007" => Self::Voc2007,
            "2012" => Self::Voc2012,
            _ => bail!("unsupported VOC year '{}'", text),
        };
        Ok(year)
    }
}

impl Display for VocYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces a concrete data directory for a VOC year and split.
pub trait VocResolver
where
    Self: Debug,
{
    fn resolve(&self, year: VocYear, split: &str) -> Result<PathBuf>;
}

/// Finds an already extracted VOC copy under a dataset root directory.
///
/// The data directory is `<root>/voc/VOCdevkit/VOC<year>`. The root is
/// taken from `dataset_root`, then from the `DATASET_ROOT` environment
/// variable, then from the user cache directory.
#[derive(Debug, Clone, Default)]
pub struct LocalVocResolver {
    pub dataset_root: Option<PathBuf>,
}

impl LocalVocResolver {
    pub fn new(dataset_root: impl Into<PathBuf>) -> Self {
        Self {
            dataset_root: Some(dataset_root.into()),
        }
    }

    pub fn dataset_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.dataset_root {
            return Ok(root.clone());
        }
        if let Some(root) = env::var_os(DATASET_ROOT_ENV) {
            return Ok(root.into());
        }
        let dirs = BaseDirs::new()
            .ok_or_else(|| format_err!("unable to determine the user cache directory"))?;
        Ok(dirs.cache_dir().join("getter-dataset"))
    }

    pub fn data_dir(&self, year: VocYear) -> Result<PathBuf> {
        Ok(self
            .dataset_root()?
            .join("voc")
            .join("VOCdevkit")
            .join(format!("VOC{}", year)))
    }
}

impl VocResolver for LocalVocResolver {
    fn resolve(&self, year: VocYear, split: &str) -> Result<PathBuf> {
        let data_dir = self.data_dir(year)?;
        let manifest = manifest_path(&data_dir, split);

        if !manifest.is_file() {
            return Err(DatasetError::DatasetNotFound { path: manifest }.into());
        }

        info!("use VOC{} data directory '{}'", year, data_dir.display());
        Ok(data_dir)
    }
}
