use std::fs;
use std::path::Path;

use minijinja::Environment;

use crate::error::RenderError;

/// The fixed template vocabulary of the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Dto,
    Serializer,
    Endpoint,
    Client,
    Index,
}

impl TemplateName {
    pub const ALL: [TemplateName; 5] = [
        TemplateName::Dto,
        TemplateName::Serializer,
        TemplateName::Endpoint,
        TemplateName::Client,
        TemplateName::Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Dto => "dto",
            TemplateName::Serializer => "serializer",
            TemplateName::Endpoint => "endpoint",
            TemplateName::Client => "client",
            TemplateName::Index => "index",
        }
    }

    /// File name looked up in a template override directory.
    pub fn file_name(&self) -> String {
        format!("{}.ts.j2", self.as_str())
    }

    fn embedded(&self) -> &'static str {
        match self {
            TemplateName::Dto => include_str!("../templates/dto.ts.j2"),
            TemplateName::Serializer => include_str!("../templates/serializer.ts.j2"),
            TemplateName::Endpoint => include_str!("../templates/endpoint.ts.j2"),
            TemplateName::Client => include_str!("../templates/client.ts.j2"),
            TemplateName::Index => include_str!("../templates/index.ts.j2"),
        }
    }
}

/// Template sources, embedded or read from an override directory.
#[derive(Debug, Clone)]
pub struct Templates {
    sources: Vec<(TemplateName, String)>,
}

impl Templates {
    pub fn embedded() -> Self {
        Self {
            sources: TemplateName::ALL
                .into_iter()
                .map(|name| (name, name.embedded().to_string()))
                .collect(),
        }
    }

    /// Embedded templates, with any `{name}.ts.j2` found in `dir` taking
    /// precedence.
    pub fn load(dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut templates = Self::embedded();
        let Some(dir) = dir else {
            return Ok(templates);
        };

        for (name, text) in &mut templates.sources {
            let path = dir.join(name.file_name());
            if !path.is_file() {
                continue;
            }
            log::debug!("using template override {}", path.display());
            *text = fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
        }
        Ok(templates)
    }

    pub fn source(&self, name: TemplateName) -> Option<&str> {
        self.sources
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| source.as_str())
    }

    /// A minijinja environment with every template registered under its
    /// vocabulary name.
    pub fn environment(&self) -> Result<Environment<'_>, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("escape_jsdoc", escape_jsdoc);
        for (name, source) in &self.sources {
            env.add_template(name.as_str(), source)?;
        }
        Ok(env)
    }
}

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}
