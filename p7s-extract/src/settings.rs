// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings controlling where content is read from and written to.

use {
    crate::{error::P7sError, extract::extract},
    log::{debug, info},
    std::path::{Path, PathBuf},
};

const P7S_EXTENSION: &str = "p7s";

/// Extension given to derived output files when the input isn't a `.p7s` file.
const FALLBACK_EXTENSION: &str = "bin";

/// Resolve a path against the current working directory.
pub fn absolute_path(path: impl AsRef<Path>) -> Result<PathBuf, P7sError> {
    let path = path.as_ref();

    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Derive the path extracted content is written to from the container path.
///
/// `document.pdf.p7s` becomes `document.pdf`. Paths without a `.p7s`
/// extension get `.bin` appended so the container itself is never the
/// destination.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext.eq_ignore_ascii_case(P7S_EXTENSION) => input.with_extension(""),
        _ => {
            let mut name = input
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_default();
            name.push(".");
            name.push(FALLBACK_EXTENSION);

            input.with_file_name(name)
        }
    }
}

/// Describes a single extraction from a file to a file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtractSettings {
    input: PathBuf,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    force: bool,
}

impl ExtractSettings {
    /// Construct an instance reading from the given container path.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// The path of the `.p7s` container.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Explicitly set the path extracted content is written to.
    pub fn set_output(&mut self, path: impl Into<PathBuf>) {
        self.output = Some(path.into());
    }

    /// Set the directory a derived output path is placed in.
    ///
    /// Has no effect if an explicit output path is set.
    pub fn set_output_dir(&mut self, path: impl Into<PathBuf>) {
        self.output_dir = Some(path.into());
    }

    /// Whether an existing output file may be replaced.
    pub fn force(&self) -> bool {
        self.force
    }

    pub fn set_force(&mut self, value: bool) {
        self.force = value;
    }

    /// Ensure the input path refers to an existing file.
    pub fn check_input(&self) -> Result<PathBuf, P7sError> {
        let path = absolute_path(&self.input)?;

        if !path.exists() {
            Err(P7sError::InputNotFound(path))
        } else if path.is_dir() {
            Err(P7sError::InputIsDirectory(path))
        } else {
            Ok(path)
        }
    }

    /// Resolve the absolute path extracted content should be written to.
    pub fn resolve_output_path(&self) -> Result<PathBuf, P7sError> {
        let path = if let Some(output) = &self.output {
            output.clone()
        } else {
            let derived = default_output_path(&self.input);

            match (&self.output_dir, derived.file_name()) {
                (Some(dir), Some(name)) => dir.join(name),
                (Some(dir), None) => dir.join(FALLBACK_EXTENSION),
                (None, _) => derived,
            }
        };

        absolute_path(path)
    }

    /// Ensure the output path may be written to.
    ///
    /// Directories are refused even with `force`.
    pub fn check_output(&self, path: &Path) -> Result<(), P7sError> {
        if path.is_dir() {
            Err(P7sError::OutputIsDirectory(path.to_path_buf()))
        } else if path.exists() && !self.force {
            Err(P7sError::OutputExists(path.to_path_buf()))
        } else {
            Ok(())
        }
    }

    /// Read the container, extract its content, and write it out.
    ///
    /// Returns the path content was written to and its length.
    pub fn extract_file(&self) -> Result<(PathBuf, usize), P7sError> {
        let input = self.check_input()?;
        let output = self.resolve_output_path()?;

        // Checked before reading so a refusal doesn't cost parsing the input.
        self.check_output(&output)?;

        debug!("reading {}", input.display());
        let data = std::fs::read(&input).map_err(|source| P7sError::ReadInput {
            path: input.clone(),
            source,
        })?;

        let content = extract(&data)?;

        info!("writing {} bytes to {}", content.len(), output.display());
        std::fs::write(&output, &content).map_err(|source| P7sError::WriteOutput {
            path: output.clone(),
            source,
        })?;

        Ok((output, content.len()))
    }
}
