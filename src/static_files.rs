use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Serves files below `base_dir` for request paths under `url_prefix`.
///
/// `GET /static/app.js` with prefix `/static` reads `<base_dir>/app.js`.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    url_prefix: String,
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(url_prefix: &str, base: P) -> Self {
        let trimmed = url_prefix.trim_matches('/');
        Self {
            url_prefix: format!("/{trimmed}"),
            base_dir: base.into(),
        }
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The part of `path` after `<prefix>/`, or `None` when `path` is not under the prefix.
    #[must_use]
    pub fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.url_prefix.as_str())?;
        if self.url_prefix == "/" {
            return Some(rest);
        }
        rest.strip_prefix('/')
    }

    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        let mut pushed = false;
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => {
                    pb.push(s);
                    pushed = true;
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        pushed.then_some(pb)
    }

    /// Content type for a file extension (case-sensitive, with the leading dot).
    ///
    /// Unknown extensions yield `None` and leave the response content type alone.
    #[must_use]
    pub fn content_type(path: &Path) -> Option<&'static str> {
        let ext = path.extension().and_then(|s| s.to_str())?;
        let ct = match ext {
            "avif" => "image/avif",
            "css" => "text/css; charset=utf-8",
            "gif" => "image/gif",
            "htm" | "html" => "text/html; charset=utf-8",
            "jpeg" | "jpg" => "image/jpeg",
            "js" | "mjs" => "text/javascript; charset=utf-8",
            "json" => "application/json",
            "pdf" => "application/pdf",
            "png" => "image/png",
            "svg" => "image/svg+xml",
            "wasm" => "application/wasm",
            "webp" => "image/webp",
            "xml" => "text/xml; charset=utf-8",
            _ => return None,
        };
        Some(ct)
    }

    /// Read the file at `url_path`, relative to the base directory.
    ///
    /// Paths that escape the base directory through `..` or an absolute root
    /// are reported as not found.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, Option<&'static str>)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}
