//! Moves a sorted file into the folder picked from the catalog.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::MoveError;

/// Moves `source` into `destination_dir`, keeping its file name.
///
/// Never overwrites: if the destination already holds a file with that name,
/// the move is refused. Returns the new path of the file.
pub async fn move_into_folder(source: &Path, destination_dir: &Path) -> Result<PathBuf, MoveError> {
    match fs::metadata(source).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(MoveError::SourceNotAFile(source.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MoveError::SourceNotAFile(source.to_path_buf()))
        }
        Err(e) => return Err(MoveError::Io(e, source.to_path_buf())),
    }

    match fs::metadata(destination_dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            return Err(MoveError::DestinationNotADirectory(
                destination_dir.to_path_buf(),
            ))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MoveError::DestinationNotADirectory(
                destination_dir.to_path_buf(),
            ))
        }
        Err(e) => return Err(MoveError::Io(e, destination_dir.to_path_buf())),
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| MoveError::SourceNotAFile(source.to_path_buf()))?;
    let target = destination_dir.join(file_name);

    if fs::try_exists(&target)
        .await
        .map_err(|e| MoveError::Io(e, target.clone()))?
    {
        return Err(MoveError::AlreadyExists(target));
    }

    fs::rename(source, &target)
        .await
        .map_err(|e| MoveError::Io(e, target.clone()))?;

    tracing::info!("Moved {:?} to {:?}", source, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[tokio::test]
    async fn moves_file_into_destination_folder() {
        let temp = tempfile::tempdir().unwrap();
        let inbox = temp.path().join("inbox");
        let taxes = temp.path().join("archive/taxes");
        std_fs::create_dir_all(&inbox).unwrap();
        std_fs::create_dir_all(&taxes).unwrap();
        let source = inbox.join("2024 03 01 - IRS - Notice.pdf");
        std_fs::write(&source, "pdf").unwrap();

        let moved = move_into_folder(&source, &taxes).await.unwrap();

        assert_eq!(moved, taxes.join("2024 03 01 - IRS - Notice.pdf"));
        assert!(!source.exists());
        assert_eq!(std_fs::read_to_string(&moved).unwrap(), "pdf");
    }

    #[tokio::test]
    async fn refuses_to_overwrite_an_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("dest");
        std_fs::create_dir(&dest).unwrap();
        let source = temp.path().join("report.pdf");
        std_fs::write(&source, "new").unwrap();
        std_fs::write(dest.join("report.pdf"), "old").unwrap();

        let err = move_into_folder(&source, &dest).await.unwrap_err();

        assert!(matches!(err, MoveError::AlreadyExists(_)));
        assert!(source.exists());
        assert_eq!(std_fs::read_to_string(dest.join("report.pdf")).unwrap(), "old");
    }

    #[tokio::test]
    async fn rejects_missing_source_and_missing_destination() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("report.pdf");

        let err = move_into_folder(&source, temp.path()).await.unwrap_err();
        assert!(matches!(err, MoveError::SourceNotAFile(_)));

        std_fs::write(&source, "x").unwrap();
        let err = move_into_folder(&source, &temp.path().join("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, MoveError::DestinationNotADirectory(_)));
    }

    #[tokio::test]
    async fn rejects_a_directory_as_source() {
        let temp = tempfile::tempdir().unwrap();
        let folder = temp.path().join("folder");
        std_fs::create_dir(&folder).unwrap();

        let err = move_into_folder(&folder, temp.path()).await.unwrap_err();

        assert!(matches!(err, MoveError::SourceNotAFile(_)));
    }
}
