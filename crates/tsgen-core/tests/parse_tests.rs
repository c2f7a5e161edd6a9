use tsgen_core::error::ParseError;
use tsgen_core::ir::HttpMethod;
use tsgen_core::parse;
use tsgen_core::parse::parameter::{ParameterLocation, ParameterOrRef};
use tsgen_core::parse::response::ResponseOrRef;
use tsgen_core::parse::schema::{SchemaOrRef, TypeSet};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const COMPOSITION: &str = include_str!("fixtures/composition.yaml");

#[test]
fn parse_petstore_yaml() {
    let doc = parse::from_yaml(PETSTORE).expect("should parse petstore");
    let spec = doc.spec();
    assert_eq!(spec.openapi, "3.0.3");
    assert_eq!(spec.info.title, "Petstore");
    assert_eq!(spec.info.version, "1.0.0");
    assert_eq!(spec.paths.len(), 5);

    let tags: Vec<_> = spec.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["pets", "store"]);

    let components = spec.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 7);
    assert_eq!(components.parameters.len(), 1);
}

const UNSORTED: &str = r##"
openapi: "3.0.3"
info:
  title: Orchard
  version: "1"
tags:
  - name: fruit
paths:
  /zebra:
    get:
      operationId: getZebra
      tags: [fruit]
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Fruit"
  /apple:
    get:
      operationId: getApple
      tags: [fruit]
      responses:
        "204":
          description: ok
components:
  schemas:
    Fruit:
      type: object
      properties:
        zeta:
          type: string
        alpha:
          type: string
"##;

#[test]
fn parse_keeps_document_order() {
    let doc = parse::from_yaml(UNSORTED).unwrap();
    let paths: Vec<_> = doc.spec().paths.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["/zebra", "/apple"]);

    let components = doc.spec().components.as_ref().unwrap();
    let SchemaOrRef::Schema(fruit) = &components.schemas["Fruit"] else {
        panic!("Fruit should be inline");
    };
    let properties: Vec<_> = fruit.properties.keys().map(String::as_str).collect();
    assert_eq!(properties, vec!["zeta", "alpha"]);

    let raw: Vec<_> = doc
        .raw()
        .pointer("/components/schemas/Fruit/properties")
        .and_then(|v| v.as_object())
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(raw, vec!["zeta", "alpha"]);

    let api = tsgen_core::transform::transform(&doc).unwrap();
    let labels: Vec<_> = api.methods.iter().map(|m| m.label()).collect();
    assert_eq!(labels, vec!["getZebra", "getApple"]);
    let tsgen_core::ir::ModelKind::Object { properties } = &api.models[0].kind else {
        panic!("Fruit should be an object");
    };
    let names: Vec<_> = properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn parse_responses_keep_document_order() {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    let get = doc.spec().paths["/pets"].operation(HttpMethod::Get).unwrap();
    let codes: Vec<_> = get.responses.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["201", "200", "default"]);

    match &get.responses["200"] {
        ResponseOrRef::Response(r) => assert!(r.content.contains_key("application/json")),
        ResponseOrRef::Ref { .. } => panic!("expected inline response"),
    }
}

#[test]
fn parse_parameter_locations() {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    let get = doc.spec().paths["/pets"].operation(HttpMethod::Get).unwrap();
    let locations: Vec<_> = get
        .parameters
        .iter()
        .map(|p| match p {
            ParameterOrRef::Parameter(param) => param.location.clone(),
            ParameterOrRef::Ref { .. } => panic!("expected inline parameter"),
        })
        .collect();
    assert_eq!(
        locations,
        vec![ParameterLocation::Query, ParameterLocation::Header]
    );

    let shared = &doc.spec().paths["/pets/{petId}"].parameters;
    assert!(matches!(
        &shared[0],
        ParameterOrRef::Ref { ref_path } if ref_path == "#/components/parameters/PetId"
    ));
}

#[test]
fn parse_composition_schemas() {
    let doc = parse::from_yaml(COMPOSITION).unwrap();
    let schemas = &doc.spec().components.as_ref().unwrap().schemas;

    match &schemas["Animal"] {
        SchemaOrRef::Schema(s) => {
            assert_eq!(s.one_of.as_ref().map(Vec::len), Some(3));
            assert!(s.is_structural());
        }
        SchemaOrRef::Ref { .. } => panic!("expected inline schema"),
    }
    match &schemas["Cat"] {
        SchemaOrRef::Schema(s) => assert_eq!(s.all_of.as_ref().map(Vec::len), Some(2)),
        SchemaOrRef::Ref { .. } => panic!("expected inline schema"),
    }
    match &schemas["Pet"] {
        SchemaOrRef::Schema(s) => {
            assert_eq!(s.schema_type, Some(TypeSet::Single("object".to_string())));
            assert_eq!(s.required, vec!["name"]);
        }
        SchemaOrRef::Ref { .. } => panic!("expected inline schema"),
    }
}

#[test]
fn parse_json_document() {
    let json = r#"{
  "openapi": "3.0.0",
  "info": { "title": "Json", "version": "1" },
  "paths": { "/ping": { "get": { "operationId": "ping", "responses": {} } } }
}"#;
    let doc = parse::from_json(json).unwrap();
    assert_eq!(doc.spec().info.title, "Json");

    let detected = parse::from_str(json).unwrap();
    assert_eq!(detected.spec(), doc.spec());
    assert!(detected.raw().pointer("/paths/~1ping/get").is_some());
}

#[test]
fn parse_str_falls_back_to_yaml() {
    let doc = parse::from_str(PETSTORE).unwrap();
    assert_eq!(doc.spec().info.title, "Petstore");
}

#[test]
fn parse_invalid_version() {
    let yaml = r#"
openapi: "2.0.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(v) if v == "2.0.0"));
}

#[test]
fn parse_swagger_document_rejected() {
    let yaml = r#"
swagger: "2.0"
info:
  title: Test
  version: "1.0"
paths: {}
"#;
    let err = parse::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ParseError::MissingField(f) if f == "openapi"));
}

#[test]
fn parse_malformed_yaml() {
    let err = parse::from_yaml("openapi: [unclosed").unwrap_err();
    assert!(matches!(err, ParseError::Yaml(_)));
}
