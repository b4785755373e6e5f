use anyhow::Result;
use getter_dataset::{
    dataset::{LABEL_KEY, PLACEHOLDER_LABEL},
    ClassVocabulary, DatasetError, Field, GetterDataset, LocalVocResolver,
    VocDetectionDatasetInit,
};
use image::{Rgb, RgbImage};
use std::{fs, path::Path};

const ANNOTATION_2_PLUS_1: &str = r#"<annotation>
    <folder>VOC2007</folder>
    <filename>000001.jpg</filename>
    <size><width>64</width><height>48</height><depth>3</depth></size>
    <object>
        <name>car</name>
        <difficult>0</difficult>
        <bndbox><xmin>20</xmin><ymin>10</ymin><xmax>40</xmax><ymax>30</ymax></bndbox>
    </object>
    <object>
        <name>bottle</name>
        <difficult>1</difficult>
        <bndbox><xmin>2</xmin><ymin>3</ymin><xmax>4</xmax><ymax>5</ymax></bndbox>
    </object>
    <object>
        <name> Person </name>
        <difficult>0</difficult>
        <bndbox><xmin>1</xmin><ymin>1</ymin><xmax>64</xmax><ymax>48</ymax></bndbox>
    </object>
</annotation>
"#;

const ANNOTATION_ONLY_DIFFICULT: &str = r#"<annotation>
    <object>
        <name>dog</name>
        <difficult>1</difficult>
        <bndbox><xmin>5</xmin><ymin>5</ymin><xmax>9</xmax><ymax>9</ymax></bndbox>
    </object>
</annotation>
"#;

const ANNOTATION_UNKNOWN_CLASS: &str = r#"<annotation>
    <object>
        <name>abarth</name>
        <difficult>0</difficult>
        <bndbox><xmin>5</xmin><ymin>5</ymin><xmax>9</xmax><ymax>9</ymax></bndbox>
    </object>
</annotation>
"#;

/// Writes a VOC tree with ids 000001..000005.
///
/// 000004 has a malformed annotation and 000005 has neither an image nor
/// an annotation.
fn build_fixture(data_dir: &Path) -> Result<()> {
    let main = data_dir.join("ImageSets/Main");
    let images = data_dir.join("JPEGImages");
    let annotations = data_dir.join("Annotations");
    fs::create_dir_all(&main)?;
    fs::create_dir_all(&images)?;
    fs::create_dir_all(&annotations)?;

    fs::write(
        main.join("train.txt"),
        "000001\n  000002  \n000003\n000004\n000005\n\n",
    )?;
    fs::write(main.join("val.txt"), "000003\n000001\n")?;

    for id in ["000001", "000002", "000003", "000004"] {
        RgbImage::from_pixel(64, 48, Rgb([200, 100, 50])).save(images.join(format!("{}.jpg", id)))?;
    }

    fs::write(annotations.join("000001.xml"), ANNOTATION_2_PLUS_1)?;
    fs::write(annotations.join("000002.xml"), ANNOTATION_ONLY_DIFFICULT)?;
    fs::write(annotations.join("000003.xml"), ANNOTATION_UNKNOWN_CLASS)?;
    fs::write(annotations.join("000004.xml"), "<annotation><object>")?;

    Ok(())
}

fn init(data_dir: &Path, split: &str, use_difficult: bool) -> VocDetectionDatasetInit {
    VocDetectionDatasetInit {
        data_dir: data_dir.to_owned(),
        split: split.to_owned(),
        use_difficult,
        ..Default::default()
    }
}

fn dataset_error(err: &anyhow::Error) -> &DatasetError {
    err.downcast_ref::<DatasetError>()
        .unwrap_or_else(|| panic!("unexpected error: {:?}", err))
}

#[test]
fn manifest_defines_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;

    let train = init(dir.path(), "train", false).build()?;
    assert_eq!(train.len(), 5);
    assert_eq!(train.ids(), ["000001", "000002", "000003", "000004", "000005"]);

    let val = init(dir.path(), "val", false).build()?;
    assert_eq!(val.len(), 2);
    assert_eq!(val.ids(), ["000003", "000001"]);
    Ok(())
}

#[test]
fn missing_manifest() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;

    let err = init(dir.path(), "trainval", false).build().unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::FileNotFound { path } if path.ends_with("ImageSets/Main/trainval.txt")
    ));
    Ok(())
}

#[test]
fn parse_annotation_filters_difficult() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;

    let dataset = init(dir.path(), "train", false).build()?;
    let annotation = dataset.parse_annotation(0)?;
    assert_eq!(annotation.bboxes, [[9.0, 19.0, 29.0, 39.0], [0.0, 0.0, 47.0, 63.0]]);
    assert_eq!(annotation.labels, [6, 14]);
    assert_eq!(annotation.difficult, [false, false]);

    let dataset = init(dir.path(), "train", true).build()?;
    let annotation = dataset.parse_annotation(0)?;
    assert_eq!(annotation.bboxes.len(), 3);
    assert_eq!(annotation.labels, [6, 4, 14]);
    assert_eq!(annotation.difficult, [false, true, false]);
    assert_eq!(annotation.bboxes[1], [2.0, 1.0, 4.0, 3.0]);
    Ok(())
}

#[test]
fn parse_annotation_without_remaining_objects() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;

    let dataset = init(dir.path(), "train", false).build()?;
    let annotation = dataset.parse_annotation(1)?;
    assert!(annotation.bboxes.is_empty());
    assert!(annotation.labels.is_empty());
    assert!(annotation.difficult.is_empty());

    let dataset = init(dir.path(), "train", true).build()?;
    assert_eq!(dataset.parse_annotation(1)?.labels, [11]);
    Ok(())
}

#[test]
fn parse_annotation_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;
    let dataset = init(dir.path(), "train", false).build()?;

    let err = dataset.parse_annotation(2).unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::UnknownClass { name } if name == "abarth"
    ));

    let err = dataset.parse_annotation(3).unwrap_err();
    assert!(matches!(dataset_error(&err), DatasetError::Parse { .. }));

    let err = dataset.parse_annotation(4).unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::FileNotFound { .. }
    ));

    let err = dataset.parse_annotation(5).unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::IndexOutOfRange { index: 5, len: 5 }
    ));
    Ok(())
}

#[test]
fn custom_vocabulary() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;

    let dataset = VocDetectionDatasetInit {
        classes: ClassVocabulary::new(["Abarth"])?,
        ..init(dir.path(), "train", false)
    }
    .build()?;
    let annotation = dataset.parse_annotation(2)?;
    assert_eq!(annotation.labels, [0]);
    Ok(())
}

#[test]
fn image_and_label_getters() -> Result<()> {
    let dir = tempfile::tempdir()?;
    build_fixture(dir.path())?;
    let dataset = init(dir.path(), "train", false).build()?;

    let image = dataset.get_image(1)?;
    assert_eq!(image.shape(), [3, 48, 64]);

    assert_eq!(dataset.get_label(0)?, PLACEHOLDER_LABEL);
    assert_eq!(
        dataset.get(0, LABEL_KEY)?,
        Field::Text("labelAAA".to_owned())
    );

    let example = dataset.get_example(0)?;
    assert!(example[0].as_image().is_some());
    assert_eq!(example[1].as_text(), Some("labelAAA"));

    let err = dataset.get_image(4).unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::FileNotFound { path } if path.ends_with("JPEGImages/000005.jpg")
    ));
    Ok(())
}

#[test]
fn auto_data_dir() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let data_dir = dir.path().join("voc/VOCdevkit/VOC2007");
    build_fixture(&data_dir)?;
    let resolver = LocalVocResolver::new(dir.path());

    let dataset = VocDetectionDatasetInit {
        year: "2007".into(),
        ..Default::default()
    }
    .build_with_resolver(&resolver)?;
    assert_eq!(dataset.data_dir(), data_dir);
    assert_eq!(dataset.len(), 5);

    let err = VocDetectionDatasetInit {
        year: "2012".into(),
        ..Default::default()
    }
    .build_with_resolver(&resolver)
    .unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::DatasetNotFound { .. }
    ));

    // unsupported years use "auto" as a literal directory
    let err = VocDetectionDatasetInit {
        year: "2010".into(),
        ..Default::default()
    }
    .build_with_resolver(&resolver)
    .unwrap_err();
    assert!(matches!(
        dataset_error(&err),
        DatasetError::FileNotFound { .. }
    ));
    Ok(())
}
