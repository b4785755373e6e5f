pub use crate::error::DatasetError;
pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use indexmap::IndexSet;
pub use itertools::Itertools as _;
pub use log::{debug, info, warn};
pub use ndarray::Array3;
pub use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
pub use std::{
    env,
    fmt::{self, Debug, Display},
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};
