use anyhow::Result;
use clap::{Args, Parser};
use getter_dataset::{
    config::{AnyDataset, DatasetConfig, VocConfig},
    ClassVocabulary, LabeledImageDataset, VocDetectionDataset, VocDetectionDatasetInit,
};
use itertools::izip;
use log::info;
use prettytable::{cell, row, Table};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
/// Inspect labeled image trees and PASCAL VOC datasets
enum Opts {
    /// List the images collected from a marker directory tree
    Images {
        /// dataset root directory
        root: PathBuf,
        /// substring selecting the top-level directories
        #[clap(long, default_value = "Abarth")]
        marker: String,
    },
    /// List the examples of a VOC split
    Voc(VocArgs),
    /// Show the parsed annotation of one VOC example
    Annotation(AnnotationArgs),
    /// Load a dataset from a json5 configuration file
    Config {
        /// configuration file
        config_file: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct VocArgs {
    /// dataset directory, or "auto" to locate an extracted copy
    data_dir: PathBuf,
    #[clap(long, default_value = "train")]
    split: String,
    #[clap(long, default_value = "2012")]
    year: String,
    /// keep objects marked as difficult
    #[clap(long)]
    use_difficult: bool,
    /// classes file with one name per line
    #[clap(long)]
    classes_file: Option<PathBuf>,
}

impl VocArgs {
    fn build(self) -> Result<VocDetectionDataset> {
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
        VocDetectionDatasetInit {
            data_dir,
            split,
            year,
            use_difficult,
            classes,
        }
        .build()
    }
}

#[derive(Debug, Clone, Args)]
struct AnnotationArgs {
    #[clap(flatten)]
    voc: VocArgs,
    /// example index
    index: usize,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    match Opts::parse() {
        Opts::Images { root, marker } => {
            images(root, &marker)?;
        }
        Opts::Voc(args) => {
            print_voc(&args.build()?)?;
        }
        Opts::Annotation(AnnotationArgs { voc, index }) => {
            annotation(&voc.build()?, index)?;
        }
        Opts::Config { config_file } => {
            config(config_file)?;
        }
    }

    Ok(())
}

fn images(root: impl AsRef<Path>, marker: &str) -> Result<()> {
    let dataset = LabeledImageDataset::with_marker(root, marker)?;
    print_images(&dataset);
    Ok(())
}

fn config(config_file: impl AsRef<Path>) -> Result<()> {
    let config = DatasetConfig::open(config_file)?;
    if let DatasetConfig::Voc(VocConfig { data_dir, .. }) = &config {
        info!("loading VOC dataset from '{}'", data_dir.display());
    }

    match config.load()? {
        AnyDataset::LabeledImage(dataset) => print_images(&dataset),
        AnyDataset::Voc(dataset) => print_voc(&dataset)?,
    }
    Ok(())
}

fn print_images(dataset: &LabeledImageDataset) {
    let mut table = Table::new();
    table.add_row(row!["index", "path", "label"]);

    dataset
        .entries()
        .iter()
        .enumerate()
        .for_each(|(index, entry)| {
            table.add_row(row![index, entry.path.display(), entry.label]);
        });

    table.printstd();
    println!("{} images under '{}'", dataset.len(), dataset.root().display());
}

fn print_voc(dataset: &VocDetectionDataset) -> Result<()> {
    let mut table = Table::new();
    table.add_row(row!["index", "id", "objects"]);

    for (index, id) in dataset.ids().iter().enumerate() {
        let annotation = dataset.parse_annotation(index)?;
        table.add_row(row![index, id, annotation.len()]);
    }

    table.printstd();
    println!(
        "{} examples in split '{}' of '{}'",
        dataset.len(),
        dataset.split(),
        dataset.data_dir().display()
    );
    Ok(())
}

fn annotation(dataset: &VocDetectionDataset, index: usize) -> Result<()> {
    let annotation = dataset.parse_annotation(index)?;
    let classes = dataset.classes();

    let mut table = Table::new();
    table.add_row(row!["ymin", "xmin", "ymax", "xmax", "class", "difficult"]);

    for (bbox, &label, &difficult) in izip!(
        &annotation.bboxes,
        &annotation.labels,
        &annotation.difficult
    ) {
        let [ymin, xmin, ymax, xmax] = *bbox;
        let class = classes.name(label as usize).unwrap_or("?");
        table.add_row(row![ymin, xmin, ymax, xmax, class, difficult]);
    }

    table.printstd();
    println!(
        "{} objects in '{}'",
        annotation.len(),
        dataset.annotation_path(index)?.display()
    );
    Ok(())
}
