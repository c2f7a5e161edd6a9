use tsgen_core::transform::name_normalizer::{
    description_lines, format_name, media_type_suffix, normalize_name, route_to_name,
};

#[test]
fn test_camel_case_input() {
    let n = normalize_name("createChatCompletion");
    assert_eq!(n.pascal_case, "CreateChatCompletion");
    assert_eq!(n.camel_case, "createChatCompletion");
}

#[test]
fn test_pascal_case_input() {
    let n = normalize_name("ChatMessage");
    assert_eq!(n.pascal_case, "ChatMessage");
    assert_eq!(n.camel_case, "chatMessage");
}

#[test]
fn test_kebab_case_input() {
    let n = normalize_name("pet-store-api");
    assert_eq!(n.pascal_case, "PetStoreApi");
    assert_eq!(n.camel_case, "petStoreApi");
}

#[test]
fn test_path_like_input() {
    let n = normalize_name("/pets/{petId}");
    assert_eq!(n.pascal_case, "PetsPetId");
}

#[test]
fn test_single_word() {
    let n = normalize_name("pets");
    assert_eq!(n.pascal_case, "Pets");
    assert_eq!(n.camel_case, "pets");
    assert_eq!(n.to_string(), "pets");
}

#[test]
fn test_identifier_characters_kept() {
    assert_eq!(format_name("$metadata"), "$metadata");
    assert_eq!(format_name("v2 items"), "V2Items");
}

#[test]
fn test_media_type_suffixes() {
    assert_eq!(media_type_suffix("application/json"), "Json");
    assert_eq!(media_type_suffix("application/octet-stream"), "OctetStream");
    assert_eq!(media_type_suffix("multipart/form-data"), "FormData");
}

#[test]
fn test_route_names() {
    assert_eq!(route_to_name("GET", "/users/{userId}/messages"), "listUsersMessages");
    assert_eq!(route_to_name("PUT", "/users/{userId}"), "updateUser");
    assert_eq!(route_to_name("PATCH", "/categories/{id}"), "patchCategory");
}

#[test]
fn test_description_lines() {
    let lines = description_lines(Some("Info for a specific pet.\nReturns JSON or the raw record.\n"));
    assert_eq!(
        lines,
        vec!["Info for a specific pet.", "Returns JSON or the raw record."]
    );
}
