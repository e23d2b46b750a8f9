//! HTML rendering for [`Context::html`](crate::context::Context::html).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use minijinja::{path_loader, Environment};
use serde_json::Value;

/// Renders a named template with a data value.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, name: &str, data: &Value) -> anyhow::Result<String>;
}

/// minijinja templates loaded lazily from `<dir>/<name>.html`.
///
/// Every file under `dir` is reachable, so templates can `extends` or
/// `include` their siblings.
pub struct Templates {
    dir: PathBuf,
    env: Environment<'static>,
}

impl Templates {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));
        Self { dir, env }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TemplateEngine for Templates {
    fn render(&self, name: &str, data: &Value) -> anyhow::Result<String> {
        let file = format!("{name}.html");
        let template = self
            .env
            .get_template(&file)
            .with_context(|| format!("loading template {file} from {}", self.dir.display()))?;
        template
            .render(data)
            .with_context(|| format!("rendering template {file}"))
    }
}
