//! Ordered class name lists.

use crate::common::*;

/// The 20 foreground classes of PASCAL VOC in their canonical order.
pub const VOC_CLASS_NAMES: [&str; 20] = [
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// An ordered, duplicate-free list of class names.
///
/// The position of a name in the list is the integer label assigned to
/// objects of that class. Names are stored trimmed and lower-cased, the
/// same form annotation names are looked up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVocabulary {
    names: IndexSet<String>,
}

impl ClassVocabulary {
    /// The PASCAL VOC vocabulary.
    pub fn voc() -> Self {
        Self {
            names: VOC_CLASS_NAMES.iter().map(|&name| name.to_owned()).collect(),
        }
    }

    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| normalize_name(&name.into()))
            .collect();
        let count = names.len();
        let names: IndexSet<_> = names.into_iter().collect();
        ensure!(names.len() == count, "duplicated class names found");
        ensure!(!names.is_empty(), "no classes found");
        Ok(Self { names })
    }

    /// Loads a classes file with one class name per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read classes file '{}'", path.display()))?;
        let lines: Vec<_> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let names: IndexSet<_> = lines.iter().map(|&line| normalize_name(line)).collect();
        ensure!(
            lines.len() == names.len(),
            "duplicated class names found in '{}'",
            path.display()
        );
        ensure!(!names.is_empty(), "no classes found in '{}'", path.display());
        Ok(Self { names })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Default for ClassVocabulary {
    fn default() -> Self {
        Self::voc()
    }
}
