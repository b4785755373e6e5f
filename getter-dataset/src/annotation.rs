//! PASCAL VOC annotation files.

use crate::{common::*, vocabulary::ClassVocabulary};

/// The `<annotation>` document.
///
/// `<object>` elements are collected wherever they appear among the
/// children of the root. Elements other than `<object>` and `<filename>`
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationXml {
    pub filename: Option<String>,
    pub objects: Vec<ObjectXml>,
}

impl AnnotationXml {
    pub fn from_xml(text: &str) -> Result<Self, serde_xml_rs::Error> {
        serde_xml_rs::from_str(text)
    }
}

impl<'de> Deserialize<'de> for AnnotationXml {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("annotation", &["filename", "object"], AnnotationVisitor)
    }
}

struct AnnotationVisitor;

impl<'de> Visitor<'de> for AnnotationVisitor {
    type Value = AnnotationXml;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an <annotation> element")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut filename = None;
        let mut objects = vec![];

        // repeated <object> keys arrive one at a time, in document order
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "filename" => filename = Some(map.next_value()?),
                "object" => objects.push(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(AnnotationXml { filename, objects })
    }
}

/// An `<object>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectXml {
    pub name: String,
    /// Missing `<difficult>` elements count as 0.
    #[serde(default)]
    pub difficult: u8,
    pub bndbox: BndBoxXml,
}

impl ObjectXml {
    pub fn is_difficult(&self) -> bool {
        self.difficult == 1
    }
}

/// A `<bndbox>` element in one-based pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct BndBoxXml {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BndBoxXml {
    /// Converts to zero-based `[ymin, xmin, ymax, xmax]`.
    pub fn to_yxyx(&self) -> [f32; 4] {
        let Self {
            xmin,
            ymin,
            xmax,
            ymax,
        } = *self;
        [ymin, xmin, ymax, xmax].map(|value| (value - 1) as f32)
    }
}

/// The boxes, labels and difficulty flags of one image.
///
/// The three vectors are parallel: the `i`-th element of each describes
/// the same object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VocAnnotation {
    /// Boxes in `[ymin, xmin, ymax, xmax]` order, zero-based.
    pub bboxes: Vec<[f32; 4]>,
    /// Indices into the class vocabulary.
    pub labels: Vec<i32>,
    pub difficult: Vec<bool>,
}

impl VocAnnotation {
    /// Collects the objects of an annotation document.
    ///
    /// Difficult objects are dropped unless `use_difficult` is set. An
    /// object whose name is not in `classes` fails the whole annotation.
    /// When no object survives, the result holds three empty vectors.
    pub fn from_objects<'a, I>(
        objects: I,
        classes: &ClassVocabulary,
        use_difficult: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ObjectXml>,
    {
        let mut annotation = Self::default();

        for object in objects {
            if !use_difficult && object.is_difficult() {
                continue;
            }

            let name = object.name.trim().to_lowercase();
            let label = classes
                .index_of(&name)
                .ok_or(DatasetError::UnknownClass { name })?;

            annotation.difficult.push(object.is_difficult());
            annotation.bboxes.push(object.bndbox.to_yxyx());
            annotation.labels.push(label as i32);
        }

        Ok(annotation)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
