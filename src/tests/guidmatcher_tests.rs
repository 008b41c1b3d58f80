// src/tests/guidmatcher_tests.rs

//! tests for `guidmatcher.rs`

#![allow(non_snake_case)]

use crate::data::guid::{GuidId, GuidParseError};
use crate::readers::guidmatcher::{GuidMatch, GuidMatcher, GUID_MATCH_LEN_MAX};
use crate::readers::whitespace::strip_whitespace;
use crate::tests::common::{
    guid_to_struct_text, GUID_A, GUID_A_BRACES, GUID_A_STR, GUID_A_STRUCT, GUID_A_STRUCT_TRUNCATED,
    GUID_A_STR_UPPER, GUID_B, GUID_B_STR,
};

use ::test_case::test_case;

fn find_all(text: &str) -> Vec<GuidMatch> {
    GuidMatcher::new()
        .find_iter(text)
        .collect()
}

#[test_case(GUID_A_STR)]
#[test_case(GUID_A_STR_UPPER)]
#[test_case(GUID_A_STRUCT)]
#[test_case(GUID_A_BRACES)]
#[test_case("0XA864F394,0XC94E,0X4727,0X8E,0XEB,0X89,0X22,0X3E,0X30,0X96,0XAF"; "struct uppercase")]
#[test_case("0xa864f394-0xc94e-0x4727-0x8e-0xeb-0x89-0x22-0x3e-0x30-0x96-0xaf"; "struct with hyphens")]
#[test_case("a864f394c94e47278eeb89223e3096af"; "no separators")]
fn test_GuidMatcher_find_one_form(text: &str) {
    let matches = find_all(text);
    assert_eq!(matches.len(), 1, "matches {:?}", matches);
    assert_eq!(matches[0].to_guid(), Ok(GUID_A));
}

#[test]
fn test_GuidMatcher_braces_match_span() {
    let matches = find_all(GUID_A_BRACES);
    assert_eq!(matches.len(), 1);
    // the outer braces are not part of the match
    let inner: &str = &GUID_A_BRACES[1..GUID_A_BRACES.len() - 1];
    assert_eq!(matches[0].text, inner);
    assert_eq!(matches[0].start, 1);
    assert_eq!(matches[0].end, GUID_A_BRACES.len() - 1);
    assert_eq!(matches[0].text.len(), GUID_MATCH_LEN_MAX);
}

#[test]
fn test_GuidMatcher_fields() {
    let matches = find_all(GUID_A_STRUCT);
    let fields = matches[0].fields;
    assert_eq!(fields.field1, "0xa864f394");
    assert_eq!(fields.field2, ["0xc94e", "0x4727"]);
    assert_eq!(fields.field3, ["0x8e", "0xeb"]);
    assert_eq!(fields.field4, ["0x89", "0x22", "0x3e", "0x30", "0x96", "0xaf"]);
    assert_eq!(fields.canonical_text(), GUID_A_STR);
}

#[test]
fn test_GuidMatcher_hyphenated_fields() {
    let matches = find_all(GUID_A_STR);
    let fields = matches[0].fields;
    assert_eq!(fields.field1, "a864f394");
    assert_eq!(fields.field3, ["8e", "eb"]);
    assert_eq!(fields.canonical_text(), GUID_A_STR);
}

#[test]
fn test_GuidMatcher_positions() {
    let text: String = format!("id:{};other:{}.", GUID_A_STR, GUID_B_STR);
    let matches = find_all(text.as_str());
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].start, 3);
    assert_eq!(matches[0].end, 3 + 36);
    assert_eq!(matches[0].to_guid(), Ok(GUID_A));
    assert_eq!(matches[1].start, 3 + 36 + 7);
    assert_eq!(matches[1].text, GUID_B_STR);
    assert_eq!(matches[1].to_guid(), Ok(GUID_B));
}

#[test]
fn test_GuidMatcher_after_strip_whitespace() {
    let text: &str = "static const GUID g =\n    { 0xa864f394, 0xc94e, 0x4727,\n      { 0x8e, 0xeb, 0x89, 0x22, 0x3e, 0x30, 0x96, 0xaf } };\n";
    let clean: String = strip_whitespace(text);
    let matches = find_all(clean.as_str());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].to_guid(), Ok(GUID_A));
}

#[test]
fn test_GuidMatcher_short_fields() {
    // `0x`-prefixed fields with fewer digits than full width are matched
    let matches = find_all("0x1,0x2,0x3,0x4,0x5,0x6,0x7,0x8,0x9,0xa,0xb");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].fields.field1, "0x1");
    // and fail canonicalization
    assert_eq!(matches[0].to_guid(), Err(GuidParseError::InvalidLength(15)));
}

#[test]
fn test_GuidMatcher_truncated() {
    let matches = find_all(GUID_A_STRUCT_TRUNCATED);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, GUID_A_STRUCT_TRUNCATED);
    assert_eq!(matches[0].to_guid(), Err(GuidParseError::InvalidLength(35)));
}

#[test_case(""; "empty")]
#[test_case("hello world"; "no hex")]
#[test_case("a864f394-c94e-4727"; "too few fields")]
#[test_case("a864f39-c94e-4727-8eeb-89223e3096af"; "short first field")]
#[test_case("0x,0x,0x,0x,0x,0x,0x,0x,0x,0x,0x"; "no digits")]
fn test_GuidMatcher_no_match(text: &str) {
    let matches = find_all(text);
    assert!(matches.is_empty(), "unexpected matches {:?}", matches);
}

#[test]
fn test_GuidMatcher_many() {
    let ids: Vec<GuidId> = (1..=50u128)
        .map(|n| GuidId::from_u128(n.wrapping_mul(0x9e3779b97f4a7c15_f39cc0605cedc834)))
        .collect();
    let mut text = String::new();
    for (n, id) in ids.iter().enumerate() {
        match n % 2 {
            0 => text.push_str(&id.to_string()),
            _ => text.push_str(&guid_to_struct_text(id)),
        }
        text.push(';');
    }
    let found: Vec<GuidId> = find_all(text.as_str())
        .iter()
        .map(|m| m.to_guid().unwrap())
        .collect();
    assert_eq!(found, ids);
}
