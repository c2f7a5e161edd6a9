use crate::error::ResolveError;
use crate::ir::{Model, ModelKind, Property};
use crate::parse::Document;
use crate::parse::ref_resolve::{ref_name, resolve_or_inline};
use crate::parse::schema::{Schema, SchemaOrRef};

use super::name_normalizer::format_name;
use super::type_mapper::map_primitive;

/// Builds [`Model`]s from schema nodes.
///
/// Keeps the pointers of the references currently being expanded. A
/// reference met again while it is still on that stack becomes a
/// [`ModelKind::Pending`] back-reference instead of being expanded, so
/// self-referencing and mutually-referencing schemas terminate.
pub struct ModelBuilder<'a> {
    doc: &'a Document,
    resolving: Vec<String>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            resolving: Vec::new(),
        }
    }

    /// Build a schema node. `name` names inline schemas; references are
    /// always named after their target.
    pub fn build_schema_or_ref(
        &mut self,
        node: &SchemaOrRef,
        name: Option<&str>,
    ) -> Result<Model, ResolveError> {
        match node {
            SchemaOrRef::Ref { ref_path } => self.build_ref(ref_path),
            SchemaOrRef::Schema(schema) => self.build(schema, name.map(str::to_string)),
        }
    }

    /// Build an inline schema.
    pub fn build(&mut self, schema: &Schema, name: Option<String>) -> Result<Model, ResolveError> {
        let kind = if let Some(one_of) = &schema.one_of {
            ModelKind::Union {
                members: self.build_members(one_of, name.as_deref(), "Option")?,
            }
        } else if let Some(all_of) = &schema.all_of {
            ModelKind::Intersection {
                members: self.build_members(all_of, name.as_deref(), "Part")?,
            }
        } else {
            match schema.single_type() {
                Some("object") => ModelKind::Object {
                    properties: self.build_properties(schema, name.as_deref())?,
                },
                Some("array") => {
                    let item = match &schema.items {
                        Some(items) => {
                            let item_name = name.as_ref().map(|n| format!("{n}Item"));
                            self.build_schema_or_ref(items, item_name.as_deref())?
                        }
                        None => Model::new(None, ModelKind::Unknown),
                    };
                    ModelKind::Array {
                        item: Box::new(item),
                    }
                }
                Some(other) => ModelKind::Primitive {
                    primitive: map_primitive(other, schema.format.as_deref()),
                },
                None => ModelKind::Unknown,
            }
        };

        Ok(Model::new(name, kind).with_description(schema.description.clone()))
    }

    fn build_ref(&mut self, pointer: &str) -> Result<Model, ResolveError> {
        let name = ref_name(pointer)?;

        if self.resolving.iter().any(|p| p == pointer) {
            log::debug!("back-reference to {pointer} while it is being built");
            return Ok(Model::pending(name, pointer));
        }

        let node = SchemaOrRef::Ref {
            ref_path: pointer.to_string(),
        };
        let schema = resolve_or_inline(self.doc, &node)?.into_owned();

        self.resolving.push(pointer.to_string());
        let model = self.build(&schema, Some(name));
        self.resolving.pop();
        model
    }

    fn build_members(
        &mut self,
        members: &[SchemaOrRef],
        name: Option<&str>,
        infix: &str,
    ) -> Result<Vec<Model>, ResolveError> {
        members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let member_name = name.map(|n| format!("{n}{infix}{}", i + 1));
                self.build_schema_or_ref(member, member_name.as_deref())
            })
            .collect()
    }

    fn build_properties(
        &mut self,
        schema: &Schema,
        owner: Option<&str>,
    ) -> Result<Vec<Property>, ResolveError> {
        schema
            .properties
            .iter()
            .map(|(prop_name, node)| self.build_property(schema, owner, prop_name, node))
            .collect()
    }

    fn build_property(
        &mut self,
        owner_schema: &Schema,
        owner: Option<&str>,
        prop_name: &str,
        node: &SchemaOrRef,
    ) -> Result<Property, ResolveError> {
        // Scalars stay inline; composites get a name derived from the owner.
        let (model_name, description) = match node {
            SchemaOrRef::Ref { .. } => (None, None),
            SchemaOrRef::Schema(inline) => {
                let name = owner
                    .filter(|_| inline.is_structural())
                    .map(|o| format!("{o}{}", format_name(prop_name)));
                (name, inline.description.clone())
            }
        };

        Ok(Property {
            name: prop_name.to_string(),
            is_required: owner_schema.required.iter().any(|r| r == prop_name),
            description,
            model: self.build_schema_or_ref(node, model_name.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;
    use crate::parse;

    const DOC: &str = r##"
openapi: "3.0.3"
info:
  title: Models
  version: "1.0"
paths: {}
components:
  schemas:
    Widget:
      type: object
      required: [id]
      properties:
        id:
          type: integer
        label:
          type: string
          description: Display label
        size:
          $ref: "#/components/schemas/widget-size"
        dimensions:
          type: object
          properties:
            width:
              type: number
    widget-size:
      type: string
    WidgetAlias:
      $ref: "#/components/schemas/Widget"
    Node:
      type: object
      properties:
        value:
          type: string
        children:
          type: array
          items:
            $ref: "#/components/schemas/Node"
    Husband:
      type: object
      properties:
        wife:
          $ref: "#/components/schemas/Wife"
    Wife:
      type: object
      properties:
        husband:
          $ref: "#/components/schemas/Husband"
    AliasA:
      $ref: "#/components/schemas/AliasB"
    AliasB:
      $ref: "#/components/schemas/AliasA"
"##;

    fn doc() -> Document {
        parse::from_yaml(DOC).unwrap()
    }

    fn schema(yaml: &str) -> Schema {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn widget_ref() -> SchemaOrRef {
        SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Widget".to_string(),
        }
    }

    #[test]
    fn test_union_member_names() {
        let doc = doc();
        let pet = schema(
            r#"
oneOf:
  - type: object
    properties:
      bark:
        type: boolean
  - type: object
    properties:
      meow:
        type: boolean
"#,
        );
        let model = ModelBuilder::new(&doc).build(&pet, Some("Pet".into())).unwrap();
        let ModelKind::Union { members } = &model.kind else {
            panic!("expected union, got {:?}", model.kind);
        };
        let names: Vec<_> = members.iter().map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec![Some("PetOption1"), Some("PetOption2")]);
        assert_eq!(
            model.literal_type().as_deref(),
            Some("PetOption1 | PetOption2")
        );
    }

    #[test]
    fn test_empty_composition_is_kept() {
        let doc = doc();
        let never = schema("type: object\noneOf: []\n");
        let model = ModelBuilder::new(&doc).build(&never, Some("Never".into())).unwrap();
        assert_eq!(model.kind, ModelKind::Union { members: vec![] });
        assert_eq!(model.literal_type().as_deref(), Some("never"));

        let empty = schema("allOf: []\n");
        let model = ModelBuilder::new(&doc).build(&empty, Some("Empty".into())).unwrap();
        assert_eq!(model.kind, ModelKind::Intersection { members: vec![] });
    }

    #[test]
    fn test_intersection_member_names() {
        let doc = doc();
        let dog = schema(
            r##"
allOf:
  - $ref: "#/components/schemas/Widget"
  - type: object
    properties:
      breed:
        type: string
"##,
        );
        let model = ModelBuilder::new(&doc).build(&dog, Some("Dog".into())).unwrap();
        assert_eq!(model.literal_type().as_deref(), Some("Widget & DogPart2"));
    }

    #[test]
    fn test_array_item_name() {
        let doc = doc();
        let tags = schema("type: array\nitems:\n  type: object\n");
        let model = ModelBuilder::new(&doc).build(&tags, Some("Tags".into())).unwrap();
        let ModelKind::Array { item } = &model.kind else {
            panic!("expected array");
        };
        assert_eq!(item.name.as_deref(), Some("TagsItem"));
        assert_eq!(model.literal_type().as_deref(), Some("TagsItem[]"));
    }

    #[test]
    fn test_array_without_items() {
        let doc = doc();
        let list = schema("type: array\n");
        let model = ModelBuilder::new(&doc).build(&list, Some("List".into())).unwrap();
        assert_eq!(model.literal_type().as_deref(), Some("unknown[]"));
    }

    #[test]
    fn test_ref_named_after_target() {
        let doc = doc();
        let model = ModelBuilder::new(&doc)
            .build_schema_or_ref(&widget_ref(), Some("Ignored"))
            .unwrap();
        assert_eq!(model.name.as_deref(), Some("Widget"));
    }

    #[test]
    fn test_ref_chain_named_after_first_pointer() {
        let doc = doc();
        let alias = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/WidgetAlias".to_string(),
        };
        let model = ModelBuilder::new(&doc).build_schema_or_ref(&alias, None).unwrap();
        assert_eq!(model.name.as_deref(), Some("WidgetAlias"));
        assert_eq!(model.properties().len(), 4);
    }

    #[test]
    fn test_object_properties() {
        let doc = doc();
        let model = ModelBuilder::new(&doc)
            .build_schema_or_ref(&widget_ref(), None)
            .unwrap();
        let props = model.properties();
        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "label", "size", "dimensions"]);

        let required: Vec<_> = props.iter().map(|p| p.is_required).collect();
        assert_eq!(required, vec![true, false, false, false]);

        assert_eq!(props[0].type_name(), "number");
        assert_eq!(props[1].description.as_deref(), Some("Display label"));
        assert_eq!(props[1].model.name, None);
        assert_eq!(props[2].type_name(), "WidgetSize");
        assert_eq!(props[3].type_name(), "WidgetDimensions");
    }

    #[test]
    fn test_binary_primitive() {
        let doc = doc();
        let file = schema("type: string\nformat: binary\n");
        let model = ModelBuilder::new(&doc).build(&file, None).unwrap();
        assert_eq!(
            model.kind,
            ModelKind::Primitive {
                primitive: Primitive::Binary
            }
        );
        assert_eq!(model.type_name(), "Blob");
    }

    #[test]
    fn test_untyped_is_unknown() {
        let doc = doc();
        let any = schema("description: anything\n");
        let model = ModelBuilder::new(&doc).build(&any, None).unwrap();
        assert_eq!(model.kind, ModelKind::Unknown);
        assert_eq!(model.type_name(), "unknown");

        let multi = schema("type: [string, integer]\n");
        let model = ModelBuilder::new(&doc).build(&multi, None).unwrap();
        assert_eq!(model.kind, ModelKind::Unknown);
    }

    #[test]
    fn test_self_reference_terminates() {
        let doc = doc();
        let node = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Node".to_string(),
        };
        let model = ModelBuilder::new(&doc).build_schema_or_ref(&node, None).unwrap();
        let children = &model.properties()[1].model;
        assert_eq!(children.name.as_deref(), Some("NodeChildren"));
        let ModelKind::Array { item } = &children.kind else {
            panic!("expected array");
        };
        assert!(item.is_pending());
        assert_eq!(item.type_name(), "Node");
    }

    #[test]
    fn test_mutual_reference_terminates() {
        let doc = doc();
        let husband = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Husband".to_string(),
        };
        let model = ModelBuilder::new(&doc).build_schema_or_ref(&husband, None).unwrap();
        let wife = &model.properties()[0].model;
        assert_eq!(wife.name.as_deref(), Some("Wife"));
        assert!(!wife.is_pending());
        assert!(wife.properties()[0].model.is_pending());
    }

    #[test]
    fn test_alias_loop_is_error() {
        let doc = doc();
        let alias = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/AliasA".to_string(),
        };
        let err = ModelBuilder::new(&doc).build_schema_or_ref(&alias, None).unwrap_err();
        assert!(matches!(err, ResolveError::CircularRef(_)));
    }

    #[test]
    fn test_unresolved_ref() {
        let doc = doc();
        let missing = SchemaOrRef::Ref {
            ref_path: "#/components/schemas/Missing".to_string(),
        };
        let err = ModelBuilder::new(&doc).build_schema_or_ref(&missing, None).unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvedRef(_)));
    }
}
