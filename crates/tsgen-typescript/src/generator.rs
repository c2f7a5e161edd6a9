use std::path::PathBuf;

use minijinja::Environment;
use serde::Serialize;
use tsgen_core::ir::Api;
use tsgen_core::transform::type_mapper::serializer_name;
use tsgen_core::{CodeGenerator, GeneratedFile};

use crate::context::{IndexContext, client_context, endpoint_context, model_context};
use crate::error::RenderError;
use crate::templates::{TemplateName, Templates};

/// Options for the TypeScript renderer.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Directory whose `{name}.ts.j2` files replace the embedded templates.
    pub templates_dir: Option<PathBuf>,
}

/// Renders an [`Api`] into a TypeScript client: one file per model,
/// serializer and endpoint, plus the client class and barrel files.
pub struct TypescriptGenerator;

impl CodeGenerator for TypescriptGenerator {
    type Config = GeneratorConfig;
    type Error = RenderError;

    fn generate(&self, api: &Api, config: &GeneratorConfig) -> Result<Vec<GeneratedFile>, RenderError> {
        let templates = Templates::load(config.templates_dir.as_deref())?;
        let env = templates.environment()?;
        let mut files = Vec::new();

        let mut domain = Vec::new();
        let mut serializers = Vec::new();
        for model in &api.models {
            let ctx = model_context(model);
            files.push(GeneratedFile {
                path: format!("domain/{}.ts", ctx.name),
                content: render(&env, TemplateName::Dto, &ctx)?,
            });
            domain.push(ctx.name.clone());

            if let Some(serializer) = serializer_name(model) {
                files.push(GeneratedFile {
                    path: format!("serializers/{serializer}.ts"),
                    content: render(&env, TemplateName::Serializer, &ctx)?,
                });
                serializers.push(serializer);
            }
        }

        let mut endpoints = Vec::new();
        for endpoint in &api.endpoints {
            let ctx = endpoint_context(api, endpoint)?;
            let file = format!("{}Endpoint", ctx.pascal_name);
            files.push(GeneratedFile {
                path: format!("endpoints/{file}.ts"),
                content: render(&env, TemplateName::Endpoint, &ctx)?,
            });
            endpoints.push(file);
        }

        files.push(index_file(&env, "domain/index.ts", domain)?);
        files.push(index_file(&env, "serializers/index.ts", serializers)?);
        files.push(index_file(&env, "endpoints/index.ts", endpoints)?);
        files.push(GeneratedFile {
            path: "Client.ts".to_string(),
            content: render(&env, TemplateName::Client, &client_context(api))?,
        });
        files.push(index_file(
            &env,
            "index.ts",
            ["domain", "endpoints", "serializers", "Client"]
                .map(String::from)
                .to_vec(),
        )?);

        log::debug!("rendered {} files", files.len());
        Ok(files)
    }
}

fn index_file(env: &Environment<'_>, path: &str, files: Vec<String>) -> Result<GeneratedFile, RenderError> {
    Ok(GeneratedFile {
        path: path.to_string(),
        content: render(env, TemplateName::Index, &IndexContext { files })?,
    })
}

/// Render a template, trimmed and terminated with a single newline.
fn render<S: Serialize>(env: &Environment<'_>, name: TemplateName, ctx: &S) -> Result<String, RenderError> {
    let rendered = env.get_template(name.as_str())?.render(ctx)?;
    Ok(format!("{}\n", rendered.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsgen_core::ir::{ApiInfo, Model, ModelKind, Primitive, Property};

    fn api_with(models: Vec<Model>) -> Api {
        Api {
            info: ApiInfo {
                title: "Tags".to_string(),
                description: None,
                version: "1".to_string(),
            },
            endpoints: vec![],
            methods: vec![],
            models,
        }
    }

    fn tag() -> Model {
        Model::new(
            Some("Tag".to_string()),
            ModelKind::Object {
                properties: vec![Property {
                    name: "name".to_string(),
                    is_required: true,
                    description: None,
                    model: Model::new(
                        None,
                        ModelKind::Primitive {
                            primitive: Primitive::String,
                        },
                    ),
                }],
            },
        )
    }

    fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
        files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
            .unwrap_or_else(|| panic!("missing {path}"))
    }

    #[test]
    fn test_object_dto() {
        let files = TypescriptGenerator
            .generate(&api_with(vec![tag()]), &GeneratorConfig::default())
            .unwrap();
        insta::assert_snapshot!(file(&files, "domain/Tag.ts"), @r"
        export interface Tag {
          name: string;
        }
        ");
    }

    #[test]
    fn test_primitive_models_have_no_serializer() {
        let status = Model::new(
            Some("Status".to_string()),
            ModelKind::Primitive {
                primitive: Primitive::String,
            },
        );
        let files = TypescriptGenerator
            .generate(&api_with(vec![status, tag()]), &GeneratorConfig::default())
            .unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "domain/Status.ts",
                "domain/Tag.ts",
                "serializers/serializeTag.ts",
                "domain/index.ts",
                "serializers/index.ts",
                "endpoints/index.ts",
                "Client.ts",
                "index.ts",
            ]
        );
        assert_eq!(file(&files, "domain/Status.ts"), "export type Status = string;\n");
        assert_eq!(file(&files, "serializers/index.ts"), "export * from \"./serializeTag\";\n");
        assert_eq!(file(&files, "endpoints/index.ts"), "export {};\n");
    }

    #[test]
    fn test_root_index() {
        let files = TypescriptGenerator
            .generate(&api_with(vec![]), &GeneratorConfig::default())
            .unwrap();
        insta::assert_snapshot!(file(&files, "index.ts"), @r#"
        export * from "./domain";
        export * from "./endpoints";
        export * from "./serializers";
        export * from "./Client";
        "#);
    }
}
