//! Create-exclusive file moves.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Moves `source` to `destination` without ever replacing an existing file.
///
/// The destination is claimed atomically: first with a hard link (which
/// fails if the name is taken), falling back to copying into a file opened
/// with `create_new` when linking is not possible, such as across devices.
/// Either way a concurrent writer that claimed the name first causes an
/// [`io::ErrorKind::AlreadyExists`] error and the source is left in place.
///
/// # Errors
///
/// Returns `AlreadyExists` if the destination exists, `NotFound` if the
/// source is gone, or any other I/O error from the copy.
pub fn move_exclusive(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::hard_link(source, destination) {
        Ok(()) => {}
        Err(err) if matches!(
            err.kind(),
            io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound
        ) =>
        {
            return Err(err);
        }
        Err(err) => {
            tracing::debug!(error = %err, "hard link failed, copying instead");
            copy_exclusive(source, destination)?;
        }
    }

    // Destination is complete; a leftover temp file is not a failure.
    if let Err(err) = fs::remove_file(source) {
        tracing::warn!(
            path = %source.display(),
            error = %err,
            "failed to remove temporary upload after move"
        );
    }
    Ok(())
}

fn copy_exclusive(source: &Path, destination: &Path) -> io::Result<()> {
    let mut input = File::open(source)?;
    let mut output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;

    let copied = io::copy(&mut input, &mut output).and_then(|_| output.sync_all());
    if let Err(err) = copied {
        drop(output);
        let _ = fs::remove_file(destination);
        return Err(err);
    }
    Ok(())
}
