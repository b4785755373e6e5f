use super::*;
use crate::{
    common::*,
    image_io::{read_image, ColorMode},
};

/// The directory name substring selecting top-level directories.
pub const DEFAULT_MARKER: &str = "Abarth";

/// The label assigned to every collected image.
pub const DEFAULT_LABEL: i32 = 0;

/// An image file path relative to the dataset root and its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub label: i32,
}

/// Images collected from a `<root>/<marker dir>/<dir>/<file>` tree.
///
/// Only top-level directories whose name contains the marker are scanned,
/// and only files exactly three levels below the root are collected.
/// Every directory level is visited in file name order, so indices are
/// stable across platforms.
#[derive(Debug, Clone)]
pub struct LabeledImageDataset {
    root: PathBuf,
    entries: Vec<ImageEntry>,
}

impl LabeledImageDataset {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_marker(root, DEFAULT_MARKER)
    }

    pub fn with_marker(root: impl AsRef<Path>, marker: &str) -> Result<Self> {
        let root = root.as_ref().to_owned();
        let mut entries = vec![];

        for top in sorted_dir_entries(&root)? {
            let top_name = top.file_name();
            if !top_name.to_string_lossy().contains(marker) || !top.path().is_dir() {
                continue;
            }

            let count = entries.len();

            for middle in sorted_dir_entries(&top.path())? {
                if !middle.path().is_dir() {
                    continue;
                }

                for file in sorted_dir_entries(&middle.path())? {
                    if !file.path().is_file() {
                        continue;
                    }

                    let path = Path::new(&top_name)
                        .join(middle.file_name())
                        .join(file.file_name());
                    debug!("{}", path.display());

                    entries.push(ImageEntry {
                        path,
                        label: DEFAULT_LABEL,
                    });
                }
            }

            if entries.len() == count {
                warn!("no image files found in '{}'", top.path().display());
            }
        }

        info!(
            "collected {} images under '{}'",
            entries.len(),
            root.display()
        );

        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full path of the `index`-th image file.
    pub fn path(&self, index: usize) -> Result<PathBuf> {
        Ok(self.root.join(&self.entry(index)?.path))
    }

    pub fn get_image(&self, index: usize) -> Result<Array3<f32>> {
        read_image(self.path(index)?, ColorMode::Color)
    }

    /// Always [DEFAULT_LABEL] for a valid index.
    pub fn get_label(&self, index: usize) -> Result<i32> {
        Ok(self.entry(index)?.label)
    }

    fn entry(&self, index: usize) -> Result<&ImageEntry> {
        check_index(index, self.entries.len())?;
        Ok(&self.entries[index])
    }
}

impl GetterDataset for LabeledImageDataset {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> &[&'static str] {
        &[IMAGE_KEY, LABEL_KEY]
    }

    fn get(&self, index: usize, key: &str) -> Result<Field> {
        let field = match key {
            IMAGE_KEY => Field::Image(self.get_image(index)?),
            LABEL_KEY => Field::Label(self.get_label(index)?),
            _ => {
                return Err(DatasetError::UnknownKey {
                    key: key.to_owned(),
                }
                .into())
            }
        };
        Ok(field)
    }
}
