//! Tests for the schema registry and the built-in HTML schema.

use slurry_schema::{
    AttributeKind, Categories, ElementFlags, Schema, SchemaError, html_schema,
};

const BLOCK: Categories = Categories::from_bits(1 << 1);
const INLINE: Categories = Categories::from_bits(1 << 2);

fn tiny_schema() -> Schema {
    let mut schema = Schema::new("urn:tiny", "t");
    schema.element_type("doc", BLOCK, Categories::ROOT, ElementFlags::NONE);
    schema.element_type(
        "para",
        INLINE | Categories::PCDATA,
        BLOCK,
        ElementFlags::NONE,
    );
    schema.element_type("em", INLINE | Categories::PCDATA, INLINE, ElementFlags::RESTARTABLE);
    schema
}

#[test]
fn test_lookup_is_case_insensitive() {
    let schema = tiny_schema();
    assert_eq!(schema.lookup("PARA").map(|t| t.name()), Some("para"));
    assert_eq!(schema.lookup("Para").map(|t| t.namespace()), Some("urn:tiny"));
    assert!(schema.lookup("span").is_none());
}

#[test]
fn test_reserved_types_are_not_looked_up() {
    let schema = tiny_schema();
    assert!(schema.lookup(Schema::PCDATA).is_none());
    assert!(schema.lookup(Schema::ROOT).is_none());
    assert!(schema.root_type().can_contain(schema.lookup("doc").unwrap()));
    assert!(schema.lookup("para").unwrap().can_contain(schema.pcdata_type()));
}

#[test]
fn test_root_element_type_is_first_root_member() {
    let schema = tiny_schema();
    assert_eq!(schema.root_element_type().map(|t| t.name()), Some("doc"));
}

#[test]
fn test_attribute_on_unknown_element_fails() {
    let mut schema = tiny_schema();
    let err = schema
        .attribute("table", "border", AttributeKind::Cdata, Some("0"))
        .unwrap_err();
    assert_eq!(err, SchemaError::UnknownElement("table".to_string()));
    assert!(schema.parent("para", "body").is_err());
}

#[test]
fn test_declared_attributes_and_parent() {
    let mut schema = tiny_schema();
    schema
        .attribute("para", "align", AttributeKind::Nmtoken, Some("left"))
        .unwrap();
    schema.parent("para", "doc").unwrap();

    let para = schema.lookup("para").unwrap();
    assert_eq!(para.attributes().value("align"), Some("left"));
    assert_eq!(para.parent(), Some("doc"));
}

#[test]
fn test_entities_are_case_sensitive() {
    let mut schema = tiny_schema();
    schema.entity("Star", 0x2605);
    assert_eq!(schema.entity_value("Star"), Some(0x2605));
    assert_eq!(schema.entity_value("star"), None);
}

#[test]
fn test_html_schema_builds() {
    assert!(Schema::html().is_ok());
    let schema = html_schema();
    assert_eq!(schema.uri(), "http://www.w3.org/1999/xhtml");
    assert_eq!(schema.prefix(), "html");
    assert_eq!(schema.root_element_type().map(|t| t.name()), Some("html"));
}

#[test]
fn test_html_flags() {
    let schema = html_schema();
    for name in ["b", "i", "em", "strong", "font", "u"] {
        assert!(
            schema.lookup(name).unwrap().has_flag(ElementFlags::RESTARTABLE),
            "{name} should be restartable"
        );
    }
    for name in ["script", "style"] {
        assert!(schema.lookup(name).unwrap().has_flag(ElementFlags::CDATA));
    }
    for name in ["form", "table"] {
        assert!(schema.lookup(name).unwrap().has_flag(ElementFlags::NO_FORCE_CLOSE));
    }
    assert_eq!(schema.lookup("p").unwrap().flags(), ElementFlags::NONE);
}

#[test]
fn test_html_containment() {
    let schema = html_schema();
    let get = |name: &str| schema.lookup(name).unwrap();

    assert!(get("p").can_contain(get("b")));
    assert!(!get("p").can_contain(get("p")));
    assert!(!get("p").can_contain(get("div")));
    assert!(get("body").can_contain(get("b")));
    assert!(get("b").can_contain(get("i")));
    assert!(!get("a").can_contain(get("a")));
    assert!(!get("table").can_contain(schema.pcdata_type()));
    assert!(get("br").model().is_empty());
}

#[test]
fn test_html_embedded_and_edit_elements() {
    let schema = html_schema();
    let get = |name: &str| schema.lookup(name).unwrap();

    assert!(get("object").can_contain(get("param")));
    assert!(get("applet").can_contain(get("param")));
    assert!(get("p").can_contain(get("object")));
    assert!(get("head").can_contain(get("object")));
    assert!(get("p").can_contain(get("embed")));
    assert!(get("embed").model().is_empty());
    assert_eq!(get("embed").parent(), Some("body"));
    assert!(get("body").can_contain(get("ins")));
    assert!(get("del").can_contain(get("div")));
    assert!(get("ins").flags().contains(ElementFlags::RESTARTABLE));
}

#[test]
fn test_html_parents_lead_to_root() {
    let schema = html_schema();
    let mut current = schema.lookup("td").unwrap().clone();
    let mut chain = vec![current.name().to_string()];
    while let Some(parent) = current.parent() {
        current = schema.lookup(parent).unwrap().clone();
        chain.push(current.name().to_string());
    }
    assert_eq!(chain, ["td", "tr", "tbody", "table", "body", "html"]);
    assert_eq!(schema.pcdata_type().parent(), Some("body"));
}

#[test]
fn test_html_default_attributes() {
    let schema = html_schema();
    let td = schema.lookup("td").unwrap().attributes();
    assert_eq!(td.value("colspan"), Some("1"));
    assert_eq!(td.get("id").map(|a| a.kind), Some(AttributeKind::Id));
    assert_eq!(td.value("id"), None);

    let form = schema.lookup("form").unwrap().attributes();
    assert_eq!(form.value("method"), Some("get"));
}

#[test]
fn test_html_entities() {
    let schema = html_schema();
    assert_eq!(schema.entity_value("amp"), Some(38));
    assert_eq!(schema.entity_value("nbsp"), Some(0xA0));
    assert_eq!(schema.entity_value("yuml"), Some(0xFF));
    assert_eq!(schema.entity_value("eacute"), Some(0xE9));
    assert_eq!(schema.entity_value("Alpha"), Some(0x391));
    assert_eq!(schema.entity_value("omega"), Some(0x3C9));
    assert_eq!(schema.entity_value("sigmaf"), Some(0x3C2));
    assert_eq!(schema.entity_value("euro"), Some(0x20AC));
    assert_eq!(schema.entity_value("AMP"), None);
}
