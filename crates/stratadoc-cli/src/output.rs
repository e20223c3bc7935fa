//! Writing rendered pages to the destination directory.

use std::path::{Component, Path};

use anyhow::{bail, Context, Result};
use stratadoc_core::RenderedPage;

/// Write every page below `destination`, creating directories as needed.
/// Returns the number of files written.
pub fn write_pages(destination: &Path, pages: &[RenderedPage]) -> Result<usize> {
    std::fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create output directory '{}'", destination.display()))?;

    for page in pages {
        let relative = Path::new(&page.path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            bail!("Refusing to write page outside the output directory: '{}'", page.path);
        }

        let target = destination.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&target, &page.contents)
            .with_context(|| format!("Failed to write '{}'", target.display()))?;
        tracing::debug!(path = %target.display(), "wrote page");
    }

    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, contents: &str) -> RenderedPage {
        RenderedPage {
            path: path.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn writes_pages_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("docs");
        let pages = [page("index.html", "<html>"), page("api/class-Foo.html", "<p>Foo</p>")];

        let written = write_pages(&destination, &pages).unwrap();

        assert_eq!(written, 2);
        assert_eq!(std::fs::read_to_string(destination.join("index.html")).unwrap(), "<html>");
        assert_eq!(
            std::fs::read_to_string(destination.join("api/class-Foo.html")).unwrap(),
            "<p>Foo</p>"
        );
    }

    #[test]
    fn rejects_paths_escaping_the_destination() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_pages(dir.path(), &[page("../evil.html", "")]).is_err());
        assert!(write_pages(dir.path(), &[page("/abs.html", "")]).is_err());
    }
}
