use std::collections::BTreeMap;

use bytes::Bytes;
use num_bigint::BigInt;

use super::*;
use crate::bencode::{decode, Value};

fn dict(entries: &[(&'static [u8], Value)]) -> Value {
    Value::Dict(
        entries
            .iter()
            .map(|(k, v)| (Bytes::from_static(k), v.clone()))
            .collect(),
    )
}

fn bytes(b: &'static [u8]) -> Value {
    Value::Bytes(Bytes::from_static(b))
}

#[test]
fn test_needs_escape() {
    assert!(!needs_escape(b"plain text"));
    assert!(!needs_escape(b""));
    assert!(!needs_escape(b"\x7f"));
    assert!(needs_escape(b"tab\there"));
    assert!(needs_escape(b"\x00"));
    assert!(needs_escape(b"\x1f"));
}

#[test]
fn test_plain_text_is_unchanged() {
    for scheme in Scheme::ALL {
        let projection = Projector::new(scheme).project_bytes("héllo wörld".as_bytes());
        assert_eq!(projection.text, "héllo wörld");
        assert!(!projection.escaped);
    }
}

#[test]
fn test_control_bytes_always_escaped() {
    for scheme in Scheme::ALL {
        let projection = Projector::new(scheme).project_bytes(b"a\x01b");
        assert!(projection.escaped, "{scheme} left a control byte unescaped");
    }

    let hex = Projector::new(Scheme::Hex).project_bytes(b"a\x01b");
    assert_eq!(hex.text, "610162");

    let b64 = Projector::new(Scheme::Base64).project_bytes(b"a\x01b");
    assert_eq!(b64.text, "YQFi");
    assert!(!b64.text.chars().any(char::is_control));
}

#[test]
fn test_control_check_precedes_utf8_check() {
    let projection = Projector::new(Scheme::Hex).project_bytes(b"line\nbreak");
    assert!(projection.escaped);
    assert_eq!(projection.text, "6c696e650a627265616b");
}

#[test]
fn test_invalid_utf8_is_escaped() {
    let projection = Projector::new(Scheme::Base64).project_bytes(b"\xde\xad\xbe\xef");
    assert!(projection.escaped);
    assert_eq!(projection.text, "3q2+7w==");

    let projection = Projector::new(Scheme::Raw).project_bytes(b"caf\xe9");
    assert!(projection.escaped);
    assert_eq!(projection.text, "café");
}

#[test]
fn test_plain_dict_keys_not_tagged() {
    let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    for scheme in Scheme::ALL {
        let text = Projector::new(scheme).project(&value);
        let object = text.as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cow", "spam"]);
        assert_eq!(text.get("cow"), Some(&TextValue::from("moo")));
        assert_eq!(text.get("spam"), Some(&TextValue::from("eggs")));
    }
}

#[test]
fn test_escaped_value_tags_key() {
    let value = dict(&[(b"hash", bytes(b"\x00\x11\xff"))]);

    let text = Projector::new(Scheme::Hex).project(&value);
    assert_eq!(text.get("hash$hex"), Some(&TextValue::from("0011ff")));
    assert_eq!(text.get("hash"), None);

    let text = Projector::new(Scheme::Base64).project(&value);
    assert_eq!(text.get("hash$base64"), Some(&TextValue::from("ABH/")));
}

#[test]
fn test_raw_scheme_does_not_tag_key() {
    let value = dict(&[(b"name", bytes(b"caf\xe9"))]);
    let text = Projector::new(Scheme::Raw).project(&value);
    assert_eq!(text.get("name"), Some(&TextValue::from("café")));
}

#[test]
fn test_escaped_key_with_plain_value() {
    let value = dict(&[(b"\xff\xfe", bytes(b"ok"))]);
    let text = Projector::new(Scheme::Hex).project(&value);
    assert_eq!(text.get("fffe"), Some(&TextValue::from("ok")));
}

#[test]
fn test_escaped_key_with_escaped_value() {
    let value = dict(&[(b"\xff", bytes(b"\x01"))]);
    let text = Projector::new(Scheme::Hex).project(&value);
    assert_eq!(text.get("ff$hex"), Some(&TextValue::from("01")));
}

#[test]
fn test_containers_never_tag_keys() {
    let value = dict(&[
        (b"files", Value::List(vec![bytes(b"\xff")])),
        (b"info", dict(&[(b"pieces", bytes(b"\x00"))])),
    ]);
    let text = Projector::new(Scheme::Base64).project(&value);

    assert_eq!(
        text.get("files"),
        Some(&TextValue::List(vec![TextValue::from("/w==")]))
    );
    let info = text.get("info").unwrap();
    assert_eq!(info.get("pieces$base64"), Some(&TextValue::from("AA==")));
}

#[test]
fn test_integers_pass_through() {
    let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
    let value = dict(&[
        (b"big", Value::Integer(big.clone())),
        (b"small", Value::from(7i64)),
    ]);
    let text = Projector::default().project(&value);
    assert_eq!(text.get("big"), Some(&TextValue::Integer(big)));
    assert_eq!(
        text.get("small").and_then(TextValue::as_integer),
        Some(&BigInt::from(7))
    );
}

#[test]
fn test_escaped_values_reverse_to_original_bytes() {
    let payloads: [&[u8]; 4] = [b"\x00", b"\xff\xfe\xfd", b"tab\t", b"\x80abc\x01"];
    for scheme in [Scheme::Hex, Scheme::Base64] {
        for payload in payloads {
            let value = dict(&[(b"v", Value::from(payload))]);
            let text = Projector::new(scheme).project(&value);
            let key = format!("v${}", scheme.suffix().unwrap());
            let emitted = text.get(&key).and_then(TextValue::as_text).unwrap();
            assert_eq!(scheme.unescape(emitted).as_deref(), Some(payload));
        }
    }
}

#[test]
fn test_text_output_independent_of_scheme() {
    let value = decode(b"d4:name9:movie.mkv4:pathl3:abc5:\xc3\xa9t\xc3\xa9ee").unwrap();
    let outputs: Vec<_> = Scheme::ALL
        .into_iter()
        .map(|scheme| Projector::new(scheme).project(&value))
        .collect();
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
    assert_eq!(
        outputs[0].get("path"),
        Some(&TextValue::List(vec!["abc".into(), "été".into()]))
    );
}

#[test]
fn test_key_collision_keeps_later_entry() {
    let value = dict(&[(b"a", bytes(b"\xff")), (b"a$hex", bytes(b"x"))]);
    let (text, stats) = Projector::new(Scheme::Hex).project_with_stats(&value);

    let object = text.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(text.get("a$hex"), Some(&TextValue::from("x")));
    assert_eq!(stats.collisions, 1);
}

#[test]
fn test_projection_stats() {
    let value = decode(b"d1:al1:x1:\x01e1:b1:\xffe").unwrap();
    let (_, stats) = Projector::new(Scheme::Hex).project_with_stats(&value);
    assert_eq!(
        stats,
        ProjectionStats {
            strings: 5,
            escaped: 2,
            tagged_keys: 1,
            collisions: 0,
        }
    );
}

#[test]
fn test_projection_leaves_input_untouched() {
    let value = dict(&[(b"k", bytes(b"\x02"))]);
    let before = value.clone();
    let _ = Projector::new(Scheme::Raw).project(&value);
    assert_eq!(value, before);
}

#[test]
fn test_scheme_parse() {
    assert_eq!("hex".parse::<Scheme>().unwrap(), Scheme::Hex);
    assert_eq!("BASE64".parse::<Scheme>().unwrap(), Scheme::Base64);
    assert_eq!(" raw ".parse::<Scheme>().unwrap(), Scheme::Raw);

    let err = "rot13".parse::<Scheme>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown escaping scheme \"rot13\" (expected hex, base64 or raw)"
    );
}

#[test]
fn test_scheme_names() {
    assert_eq!(Scheme::Hex.to_string(), "hex");
    assert_eq!(Scheme::Base64.suffix(), Some("base64"));
    assert_eq!(Scheme::Raw.suffix(), None);
    assert_eq!(Projector::default().scheme(), Scheme::Base64);
}

#[test]
fn test_unescape_rejects_foreign_text() {
    assert_eq!(Scheme::Hex.unescape("xyz"), None);
    assert_eq!(Scheme::Base64.unescape("@@@"), None);
    assert_eq!(Scheme::Raw.unescape("€"), None);
}

#[test]
fn test_empty_dict_and_list() {
    let value = decode(b"d1:ade1:blee").unwrap();
    let text = Projector::default().project(&value);
    assert_eq!(text.get("a"), Some(&TextValue::Object(BTreeMap::new())));
    assert_eq!(text.get("b"), Some(&TextValue::List(vec![])));
}
