//! Integration tests for the content value model.

use indexmap::IndexMap;
use trellis_content::{
    ContentItem, ContentStream, ReferentialText, Segment, Value, ValueKind, VecStream,
};

#[test]
fn test_blankness_selects_body_fallback() {
    assert!(Value::Scalar(String::new()).is_blank());
    assert!(Value::Scalar("   ".to_owned()).is_blank());
    assert!(Value::Mapping(IndexMap::new()).is_blank());
    assert!(Value::Sequence(Vec::new()).is_blank());
    assert!(Value::RichText(ReferentialText::default()).is_blank());

    assert!(!Value::Scalar("x".to_owned()).is_blank());
    assert!(!Value::Object(ContentItem::new("a1", "article")).is_blank());
    assert!(!Value::RichText(ReferentialText::new(vec![Segment::text("<p>x</p>")])).is_blank());
}

#[test]
fn test_kind_names() {
    assert_eq!(Value::Scalar("x".to_owned()).kind(), ValueKind::Scalar);
    assert_eq!(ValueKind::RichText.to_string(), "rich_text");
    assert_eq!(ValueKind::Mapping.to_string(), "mapping");
}

#[test]
fn test_item_fields_keep_insertion_order() {
    let item = ContentItem::new("a1", "article")
        .with_field("headline", "Hello")
        .with_field("byline", "A. Writer");

    let names: Vec<&str> = item.fields().keys().map(String::as_str).collect();
    assert_eq!(names, ["headline", "byline"]);
    assert_eq!(item.field("byline"), Some(&Value::Scalar("A. Writer".to_owned())));
    assert_eq!(item.field("missing"), None);
}

#[test]
fn test_vec_stream_pages_in_order() {
    let stream = VecStream::new(vec![
        ContentItem::new("a", "article"),
        ContentItem::new("b", "article"),
        ContentItem::new("c", "article"),
    ]);

    let page = stream.fetch(1, 2).expect("fetch should succeed");
    let ids: Vec<&str> = page.iter().map(ContentItem::id).collect();
    assert_eq!(ids, ["b", "c"]);

    let beyond = stream.fetch(3, 2).expect("fetch should succeed");
    assert!(beyond.is_empty());
}

#[test]
fn test_vec_stream_limit_bounds_fetch() {
    let stream = VecStream::new(vec![
        ContentItem::new("a", "article"),
        ContentItem::new("b", "article"),
    ]);

    let page = stream.fetch(0, 1).expect("fetch should succeed");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id(), "a");
}
