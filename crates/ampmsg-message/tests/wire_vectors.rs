use ampmsg_message::{Argument, Kind, Message, MessageError};
use bytes::Bytes;
use serde_json::json;

struct Vector {
    description: &'static str,
    args: fn() -> Vec<Argument>,
    hex: &'static str,
}

const VECTORS: &[Vector] = &[
    Vector {
        description: "empty message",
        args: Vec::new,
        hex: "10",
    },
    Vector {
        description: "three strings",
        args: || vec!["foo".into(), "bar".into(), "baz".into()],
        hex: "1300000005733a666f6f00000005733a62617200000005733a62617a",
    },
    Vector {
        description: "json object",
        args: || vec![json!({ "foo": "bar" }).into()],
        hex: "110000000f6a3a7b22666f6f223a22626172227d",
    },
    Vector {
        description: "null",
        args: || vec![Argument::null()],
        hex: "11000000066a3a6e756c6c",
    },
    Vector {
        description: "blob",
        args: || vec![Bytes::from_static(b"\x00\xff").into()],
        hex: "1100000004623a00ff",
    },
];

#[test]
fn vectors_encode_to_expected_hex() {
    for vector in VECTORS {
        let msg = Message::from((vector.args)());
        let wire = msg.to_bytes().unwrap();
        assert_eq!(hex::encode(&wire), vector.hex, "{}", vector.description);
    }
}

#[test]
fn vectors_decode_to_expected_args() {
    for vector in VECTORS {
        let wire = hex::decode(vector.hex).unwrap();
        let msg = Message::decode(&wire).unwrap();
        assert_eq!(msg.into_args(), (vector.args)(), "{}", vector.description);
    }
}

#[test]
fn nested_structures_roundtrip() {
    let value = json!({
        "id": 42,
        "tags": ["a", "b"],
        "nested": { "ok": true, "ratio": 0.5, "none": null },
    });
    let msg = Message::from_args([Argument::from(value.clone()), Argument::from(-7i64)]);
    let decoded = Message::decode(&msg.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded[0].as_json(), Some(&value));
    assert_eq!(decoded[1].as_json(), Some(&json!(-7)));
}

#[test]
fn multibyte_text_length_counts_bytes() {
    let msg = Message::from_args(["héllo"]);
    let wire = msg.to_bytes().unwrap();
    assert_eq!(wire.len(), 1 + 4 + 2 + "héllo".len());
    assert_eq!(&wire[1..5], &[0, 0, 0, 8]);
}

#[test]
fn foreign_tag_with_invalid_utf8_is_blob() {
    let wire = hex::decode("1100000005783affc328").unwrap();
    let msg = Message::decode(&wire).unwrap();
    assert_eq!(msg[0].kind(), Kind::Blob);
    assert_eq!(msg[0].as_blob().unwrap().as_ref(), &[0xff, 0xc3, 0x28]);
}

#[test]
fn text_tag_with_invalid_utf8_decodes_lossily() {
    let msg = Message::decode(&[0x11, 0, 0, 0, 5, b's', b':', 0xff, 0xc3, 0x28]).unwrap();
    assert_eq!(msg.len(), 1);
    assert_eq!(msg[0].kind(), Kind::Text);
    assert_eq!(msg[0].as_text(), Some("\u{fffd}\u{fffd}("));
}

#[test]
fn truncated_final_frame_is_malformed() {
    let wire = hex::decode("1200000005733a666f6f00000009733a6261").unwrap();
    let err = Message::decode(&wire).unwrap_err();
    assert!(err.is_malformed(), "{err}");
}

#[test]
fn unsupported_version_is_malformed() {
    let err = Message::decode(&[0x21, 0, 0, 0, 2, b's', b':']).unwrap_err();
    assert!(matches!(err, MessageError::Malformed(_)));
}

#[test]
fn blobs_outlive_reused_input() {
    let mut buf = Message::from_args([Argument::from(b"keep".to_vec())])
        .to_bytes()
        .unwrap()
        .to_vec();
    let msg = Message::decode(&buf).unwrap();
    buf.fill(0);
    assert_eq!(msg[0].as_blob().unwrap().as_ref(), b"keep");
}
