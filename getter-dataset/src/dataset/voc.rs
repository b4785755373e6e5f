use super::*;
use crate::{
    annotation::{AnnotationXml, VocAnnotation},
    common::*,
    image_io::{read_image, ColorMode},
    resolve::{LocalVocResolver, VocResolver, VocYear},
    vocabulary::ClassVocabulary,
};

/// The data directory value asking the resolver for the location.
pub const AUTO_DATA_DIR: &str = "auto";

/// The value returned by the label getter of [VocDetectionDataset].
///
/// The getter is a placeholder. Use
/// [parse_annotation](VocDetectionDataset::parse_annotation) to obtain the
/// real boxes and labels.
pub const PLACEHOLDER_LABEL: &str = "labelAAA";

/// Options of [VocDetectionDataset].
#[derive(Debug, Clone)]
pub struct VocDetectionDatasetInit {
    /// The dataset directory, or `"auto"` to locate it with a [VocResolver].
    pub data_dir: PathBuf,
    /// The split manifest name, such as `train`, `val`, `trainval` or `test`.
    pub split: String,
    /// `"2007"` or `"2012"`. Only consulted when `data_dir` is `"auto"`.
    pub year: String,
    /// Keep objects marked as difficult. Defaults to `false`.
    pub use_difficult: bool,
    /// Class names indexed by the parsed labels. Defaults to the VOC classes.
    pub classes: ClassVocabulary,
}

impl Default for VocDetectionDatasetInit {
    fn default() -> Self {
        Self {
            data_dir: AUTO_DATA_DIR.into(),
            split: "train".into(),
            year: "2012".into(),
            use_difficult: false,
            classes: ClassVocabulary::voc(),
        }
    }
}

impl VocDetectionDatasetInit {
    pub fn build(self) -> Result<VocDetectionDataset> {
        self.build_with_resolver(&LocalVocResolver::default())
    }

    pub fn build_with_resolver(self, resolver: &dyn VocResolver) -> Result<VocDetectionDataset> {
        let Self {
            data_dir,
            split,
            year,
            use_difficult,
            classes,
        } = self;

        let data_dir = match year.parse::<VocYear>() {
            Ok(year) if data_dir == Path::new(AUTO_DATA_DIR) => resolver.resolve(year, &split)?,
            _ => data_dir,
        };

        let manifest = manifest_path(&data_dir, &split);
        let ids: Vec<String> = read_text_file(&manifest)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        info!(
            "loaded {} examples from '{}'",
            ids.len(),
            manifest.display()
        );

        Ok(VocDetectionDataset {
            data_dir,
            split,
            ids,
            use_difficult,
            classes,
        })
    }
}

/// A detection dataset in the PASCAL VOC directory layout.
///
/// The example order is the line order of
/// `<data_dir>/ImageSets/Main/<split>.txt`. Images are read from
/// `JPEGImages/<id>.jpg` and annotations from `Annotations/<id>.xml`.
#[derive(Debug, Clone)]
pub struct VocDetectionDataset {
    data_dir: PathBuf,
    split: String,
    ids: Vec<String>,
    use_difficult: bool,
    classes: ClassVocabulary,
}

impl VocDetectionDataset {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn split(&self) -> &str {
        &self.split
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn use_difficult(&self) -> bool {
        self.use_difficult
    }

    pub fn classes(&self) -> &ClassVocabulary {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn image_path(&self, index: usize) -> Result<PathBuf> {
        let id = self.id(index)?;
        Ok(self
            .data_dir
            .join("JPEGImages")
            .join(format!("{}.jpg", id)))
    }

    pub fn annotation_path(&self, index: usize) -> Result<PathBuf> {
        let id = self.id(index)?;
        Ok(self
            .data_dir
            .join("Annotations")
            .join(format!("{}.xml", id)))
    }

    pub fn get_image(&self, index: usize) -> Result<Array3<f32>> {
        read_image(self.image_path(index)?, ColorMode::Color)
    }

    /// Returns [PLACEHOLDER_LABEL] for a valid index.
    pub fn get_label(&self, index: usize) -> Result<&'static str> {
        self.id(index)?;
        Ok(PLACEHOLDER_LABEL)
    }

    /// Parses the annotation file of the `index`-th example.
    ///
    /// Difficult objects are excluded unless the dataset was built with
    /// `use_difficult`. An annotation without remaining objects yields
    /// empty vectors.
    pub fn parse_annotation(&self, index: usize) -> Result<VocAnnotation> {
        let path = self.annotation_path(index)?;
        let text = read_text_file(&path)?;
        let doc = AnnotationXml::from_xml(&text).map_err(|source| DatasetError::Parse {
            path: path.clone(),
            source,
        })?;
        let annotation = VocAnnotation::from_objects(&doc.objects, &self.classes, self.use_difficult)
            .with_context(|| format!("invalid annotation file '{}'", path.display()))?;
        Ok(annotation)
    }

    fn id(&self, index: usize) -> Result<&str> {
        check_index(index, self.ids.len())?;
        Ok(&self.ids[index])
    }
}

impl GetterDataset for VocDetectionDataset {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn keys(&self) -> &[&'static str] {
        &[IMAGE_KEY, LABEL_KEY]
    }

    fn get(&self, index: usize, key: &str) -> Result<Field> {
        let field = match key {
            IMAGE_KEY => Field::Image(self.get_image(index)?),
            LABEL_KEY => Field::Text(self.get_label(index)?.to_owned()),
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
