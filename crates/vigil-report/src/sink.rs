use std::path::Path;
use tracing::info;

/// Persist the rendered report to the local artifact path.
///
/// Always runs, whether or not mail delivery is enabled or succeeds.
pub async fn write_report<P: AsRef<Path>>(path: P, html: &str) -> Result<(), std::io::Error> {
    let path = path.as_ref();
    tokio::fs::write(path, html).await?;
    info!(path = %path.display(), bytes = html.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_report() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("rendered.html");

        write_report(&path, "<html>report</html>").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "<html>report</html>");
    }

    #[tokio::test]
    async fn test_write_report_overwrites_previous_run() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("rendered.html");

        write_report(&path, "first").await.unwrap();
        write_report(&path, "second").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "second");
    }

    #[tokio::test]
    async fn test_write_report_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing").join("rendered.html");

        assert!(write_report(&path, "report").await.is_err());
    }
}
