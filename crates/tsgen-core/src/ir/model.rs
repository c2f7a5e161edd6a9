use serde::Serialize;

/// A scalar type in the generated type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// `integer` (and `number`) schemas.
    Number,
    String,
    /// `string` with `format: binary`.
    Binary,
    /// Any other scalar type, passed through verbatim (`boolean`, `null`, ...).
    Other(String),
}

impl Primitive {
    pub fn as_type(&self) -> &str {
        match self {
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Binary => "Blob",
            Primitive::Other(name) => name,
        }
    }
}

/// Structural classification of a [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Object { properties: Vec<Property> },
    Array { item: Box<Model> },
    /// `oneOf`
    Union { members: Vec<Model> },
    /// `allOf`
    Intersection { members: Vec<Model> },
    Primitive { primitive: Primitive },
    /// No `type`, or a multi-type array.
    Unknown,
    /// Back-reference to a model whose construction is still in progress
    /// further up the same build. The full model carries the same name.
    Pending { pointer: String },
}

/// One type of the generated type system.
///
/// Two models with the same `name` denote the same type; the name is the
/// deduplication key of the final model list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: ModelKind,
}

impl Model {
    pub fn new(name: Option<String>, kind: ModelKind) -> Self {
        Self {
            name,
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Placeholder for a reference re-entered while it is being built.
    pub fn pending(name: String, pointer: &str) -> Self {
        Self::new(
            Some(name),
            ModelKind::Pending {
                pointer: pointer.to_string(),
            },
        )
    }

    /// Classification label used by templates and `inspect`.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ModelKind::Object { .. } => "object",
            ModelKind::Array { .. } => "array",
            ModelKind::Union { .. } => "union",
            ModelKind::Intersection { .. } => "intersection",
            ModelKind::Primitive { .. } => "primitive",
            ModelKind::Unknown => "unknown",
            ModelKind::Pending { .. } => "reference",
        }
    }

    /// The type expression this model denotes when it has no name.
    pub fn literal_type(&self) -> Option<String> {
        match &self.kind {
            ModelKind::Object { .. } | ModelKind::Unknown => None,
            ModelKind::Array { item } => Some(format!("{}[]", item.type_name())),
            ModelKind::Union { members } if members.is_empty() => Some("never".to_string()),
            ModelKind::Union { members } => Some(join_types(members, " | ")),
            ModelKind::Intersection { members } if members.is_empty() => Some("unknown".to_string()),
            ModelKind::Intersection { members } => Some(join_types(members, " & ")),
            ModelKind::Primitive { primitive } => Some(primitive.as_type().to_string()),
            ModelKind::Pending { .. } => None,
        }
    }

    /// Type as referenced from other code: the name, else the literal type,
    /// else `unknown`.
    pub fn type_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.literal_type())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, ModelKind::Array { .. })
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self.kind,
            ModelKind::Primitive {
                primitive: Primitive::Binary
            }
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.kind, ModelKind::Pending { .. })
    }

    pub fn properties(&self) -> &[Property] {
        match &self.kind {
            ModelKind::Object { properties } => properties,
            _ => &[],
        }
    }

    /// Array element, union/intersection members. Properties are not
    /// included.
    pub fn depends_on(&self) -> Vec<&Model> {
        match &self.kind {
            ModelKind::Array { item } => vec![item.as_ref()],
            ModelKind::Union { members } | ModelKind::Intersection { members } => {
                members.iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Distinct names of the named models this model mentions directly.
    pub fn dependencies(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let direct = self
            .depends_on()
            .into_iter()
            .chain(self.properties().iter().map(|p| &p.model));
        for model in direct {
            if let Some(name) = &model.name
                && !names.contains(name)
            {
                names.push(name.clone());
            }
        }
        names
    }

    /// Every model reachable from this one, pre-order: self, then members
    /// or item, then property models.
    pub fn models(&self) -> Vec<&Model> {
        let mut models = vec![self];
        for dependency in self.depends_on() {
            models.extend(dependency.models());
        }
        for property in self.properties() {
            models.extend(property.model.models());
        }
        models
    }

    /// Structural agreement between two occurrences of a model. A pending
    /// back-reference agrees with any model carrying its name.
    pub fn same_shape(&self, other: &Model) -> bool {
        if self.is_pending() || other.is_pending() {
            return self.name == other.name;
        }
        if self.name != other.name {
            return false;
        }
        match (&self.kind, &other.kind) {
            (ModelKind::Object { properties: a }, ModelKind::Object { properties: b }) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(a, b)| {
                        a.name == b.name
                            && a.is_required == b.is_required
                            && a.model.same_shape(&b.model)
                    })
            }
            (ModelKind::Array { item: a }, ModelKind::Array { item: b }) => a.same_shape(b),
            (ModelKind::Union { members: a }, ModelKind::Union { members: b })
            | (ModelKind::Intersection { members: a }, ModelKind::Intersection { members: b }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.same_shape(b))
            }
            (ModelKind::Primitive { primitive: a }, ModelKind::Primitive { primitive: b }) => a == b,
            (ModelKind::Unknown, ModelKind::Unknown) => true,
            _ => false,
        }
    }
}

fn join_types(models: &[Model], separator: &str) -> String {
    models
        .iter()
        .map(Model::type_name)
        .collect::<Vec<_>>()
        .join(separator)
}

/// A named field of an object model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub model: Model,
}

impl Property {
    pub fn type_name(&self) -> String {
        self.model.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, primitive: Primitive) -> Model {
        Model::new(Some(name.to_string()), ModelKind::Primitive { primitive })
    }

    #[test]
    fn test_type_name_prefers_name() {
        let model = named("PetId", Primitive::Number);
        assert_eq!(model.type_name(), "PetId");
        assert_eq!(model.literal_type().as_deref(), Some("number"));
    }

    #[test]
    fn test_union_literal_joins_member_names() {
        let union = Model::new(
            Some("Pet".to_string()),
            ModelKind::Union {
                members: vec![
                    named("PetOption1", Primitive::String),
                    named("PetOption2", Primitive::Number),
                ],
            },
        );
        assert_eq!(
            union.literal_type().as_deref(),
            Some("PetOption1 | PetOption2")
        );
    }

    #[test]
    fn test_unnamed_object_is_unknown() {
        let object = Model::new(None, ModelKind::Object { properties: vec![] });
        assert_eq!(object.type_name(), "unknown");
    }

    #[test]
    fn test_pending_matches_same_name() {
        let full = Model::new(Some("Node".to_string()), ModelKind::Object { properties: vec![] });
        let pending = Model::pending("Node".to_string(), "#/components/schemas/Node");
        assert!(full.same_shape(&pending));
        assert!(pending.same_shape(&full));

        let other = Model::pending("Leaf".to_string(), "#/components/schemas/Leaf");
        assert!(!full.same_shape(&other));
    }

    #[test]
    fn test_models_preorder() {
        let item = named("TagsItem", Primitive::String);
        let array = Model::new(
            Some("Tags".to_string()),
            ModelKind::Array {
                item: Box::new(item),
            },
        );
        let names: Vec<_> = array
            .models()
            .into_iter()
            .filter_map(|m| m.name.as_deref())
            .collect();
        assert_eq!(names, vec!["Tags", "TagsItem"]);
        assert_eq!(array.type_name(), "Tags");
        assert_eq!(array.literal_type().as_deref(), Some("TagsItem[]"));
    }
}
