//! Tera rendering engine for the weekly announcement.
//!
//! The built-in template is baked into the binary. A template directory may
//! override it by providing a file with the same name (`weekly.md.tera`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::context::AnnouncementContext;
use crate::error::RenderError;

/// Name of the announcement template.
pub const WEEKLY_TEMPLATE: &str = "weekly.md.tera";

const TPLS: &[(&str, &str)] = &[(WEEKLY_TEMPLATE, include_str!("templates/weekly.md.tera"))];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Override { path: path.into(), source }
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut templates = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
            continue;
        };
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!("template override {name} from {}", path.display());
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect();
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(templates.into_iter().collect::<Vec<_>>())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders [`AnnouncementContext`] into message text.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Renderer with the built-in template only.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            tera: build_tera(None)?,
        })
    }

    /// Renderer whose built-ins are overridden by `*.tera` files in `dir`.
    pub fn with_template_dir(dir: &Path) -> Result<Self, RenderError> {
        Ok(Self {
            tera: build_tera(Some(dir))?,
        })
    }

    /// Render the weekly announcement. Trailing whitespace is trimmed.
    pub fn render(&self, ctx: &AnnouncementContext) -> Result<String, RenderError> {
        let value = serde_json::to_value(ctx)?;
        let context = Context::from_value(value)?;
        let rendered = self.tera.render(WEEKLY_TEMPLATE, &context)?;
        Ok(rendered.trim_end().to_string())
    }
}
