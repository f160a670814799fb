use std::path::{Path, PathBuf};

use serenity::all::Attachment;
use tracing::{debug, info};

use crate::bot::error::Error;

/// Where a team's banner lives: `<dir>/<team name with spaces as underscores>.<ext>`
pub fn banner_path(banner_dir: &Path, team_name: &str, filename: &str) -> PathBuf {
    let stem: String = team_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "png".to_string());

    banner_dir.join(format!("{}.{}", stem, ext))
}

/// Check that an upload is an image
pub fn is_image(attachment: &Attachment) -> bool {
    attachment
        .content_type
        .as_deref()
        .map(|ct| ct.starts_with("image/"))
        .unwrap_or(false)
}

/// Download an uploaded banner into the banner directory and return its path
pub async fn save_banner(
    banner_dir: &Path,
    team_name: &str,
    attachment: &Attachment,
) -> Result<PathBuf, Error> {
    if !is_image(attachment) {
        return Err(Error::InvalidOperation(format!(
            "{} is not an image.",
            attachment.filename
        )));
    }

    let bytes = attachment.download().await?;
    let path = banner_path(banner_dir, team_name, &attachment.filename);

    tokio::fs::create_dir_all(banner_dir).await?;
    tokio::fs::write(&path, &bytes).await?;

    info!("Saved banner for {} to {}", team_name, path.display());
    Ok(path)
}

/// Remove a banner file. A file that is already gone is not an error.
pub async fn remove_banner(path: &str) -> Result<(), Error> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed banner {}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_path() {
        let dir = Path::new("graphics");
        assert_eq!(
            banner_path(dir, "Alternate Red Dragons", "Banner.PNG"),
            PathBuf::from("graphics/alternate_red_dragons.png")
        );
        assert_eq!(
            banner_path(dir, "Alternate Phoenix", "banner"),
            PathBuf::from("graphics/alternate_phoenix.png")
        );
    }

    #[tokio::test]
    async fn test_remove_missing_banner_is_ok() {
        assert!(remove_banner("graphics/definitely_not_here.png").await.is_ok());
    }
}
