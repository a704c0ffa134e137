//! ZIP bundling of batch outputs

use crate::{LabelError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundle rendered label PDFs into a ZIP archive
///
/// Entry names are the bare filenames of the inputs, so the archive
/// unpacks flat regardless of where the outputs were written.
pub fn bundle_outputs(outputs: &[PathBuf], archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for output in outputs {
        let name = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                LabelError::Asset(format!("output has no filename: {}", output.display()))
            })?;

        writer.start_file(name, options)?;
        writer.write_all(&std::fs::read(output)?)?;
    }

    writer.finish()?;
    info!(archive = %archive_path.display(), count = outputs.len(), "bundle written");
    Ok(())
}
