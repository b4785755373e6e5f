use crate::common::*;

/// Fails with [DatasetError::IndexOutOfRange] unless `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(DatasetError::IndexOutOfRange { index, len }.into());
    }
    Ok(())
}

/// Lists a directory sorted by file name.
pub fn sorted_dir_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let entries: Result<Vec<_>, _> = fs::read_dir(dir)
        .with_context(|| format!("failed to list directory '{}'", dir.display()))?
        .collect();
    let entries = entries.with_context(|| format!("failed to list directory '{}'", dir.display()))?;
    Ok(entries
        .into_iter()
        .sorted_by_key(|entry| entry.file_name())
        .collect())
}

/// Reads a text file, reporting a missing file as [DatasetError::FileNotFound].
pub fn read_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DatasetError::FileNotFound {
            path: path.to_owned(),
        }
        .into(),
        _ => Error::from(err).context(format!("failed to read file '{}'", path.display())),
    })
}

/// The split manifest path `<data_dir>/ImageSets/Main/<split>.txt`.
pub fn manifest_path(data_dir: &Path, split: &str) -> PathBuf {
    data_dir
        .join("ImageSets")
        .join("Main")
        .join(format!("{}.txt", split))
}
