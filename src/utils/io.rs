use std::path::{Path, PathBuf};

use tracing::debug;

use crate::protocol::CodecError;

/// Read a whole file into memory or fail with `InputUnavailable`
pub async fn read_input(path: impl AsRef<Path>) -> Result<Vec<u8>, CodecError> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(CodecError::InputUnavailable)?;
    debug!("Read {} bytes from {:?}", data.len(), path);
    Ok(data)
}

/// Write all bytes or fail
pub async fn write_output(path: impl AsRef<Path>, data: &[u8]) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, data).await?;
    debug!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}

/// `<source><suffix>`, placed in `output_dir` when one is given
pub fn output_path(source: &Path, suffix: &str, output_dir: Option<&Path>) -> PathBuf {
    let mut name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);

    match output_dir {
        Some(dir) => dir.join(name),
        None => source.with_file_name(name),
    }
}
