//! Codec round-trips for every kind: null, zero/empty, extreme magnitudes,
//! one typical value, and randomized streams.

use bigdecimal::BigDecimal;
use meridian_db_core::{
    Complex, Date, Instant, Numeric, SparseVectorBuilder, Time, Timestamp, Value, ZonedTime,
    ZonedTimestamp, ALL_KINDS,
};
use meridian_db_wire::{decode_value, decode_value_exact, encode_value, encoded_value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn roundtrip(value: &Value) {
    let encoded = encoded_value(value).unwrap();
    let decoded = decode_value_exact(&encoded).unwrap();
    assert_eq!(&decoded, value, "roundtrip of {value} ({} bytes)", encoded.len());
}

/// Null, zero/empty, minimum/maximum magnitude, and a typical value per kind.
fn sample_values() -> Vec<Value> {
    let mut sparse_typical = SparseVectorBuilder::new(100);
    sparse_typical.push(3, 0.5);
    sparse_typical.push(97, -42.0);
    let mut sparse_full = SparseVectorBuilder::new(3);
    for i in 0..3 {
        sparse_full.push(i, (i + 1) as f64);
    }
    vec![
        Value::Null,
        // Boolean
        Value::Boolean(None),
        Value::Boolean(Some(false)),
        Value::Boolean(Some(true)),
        // Int
        Value::Int(None),
        Value::Int(Some(0)),
        Value::Int(Some(i32::MIN)),
        Value::Int(Some(i32::MAX)),
        Value::Int(Some(-7)),
        // Long
        Value::Long(None),
        Value::Long(Some(0)),
        Value::Long(Some(i64::MIN)),
        Value::Long(Some(i64::MAX)),
        Value::Long(Some(123_456)),
        // Float / Double
        Value::Float(None),
        Value::Float(Some(0.0)),
        Value::Float(Some(f32::MIN_POSITIVE)),
        Value::Float(Some(f32::MAX)),
        Value::Double(None),
        Value::Double(Some(0.0)),
        Value::Double(Some(-0.0)),
        Value::Double(Some(f64::MIN_POSITIVE)),
        Value::Double(Some(f64::MAX)),
        Value::Double(Some(f64::INFINITY)),
        Value::Double(Some(2.718281828)),
        // Numeric
        Value::Numeric(None),
        Value::Numeric(Some(Numeric::ZERO)),
        Value::Numeric(Some(Numeric::from_scaled(i64::MIN))),
        Value::Numeric(Some(Numeric::from_scaled(i64::MAX))),
        Value::Numeric(Some(Numeric::from_f64(1.234568))),
        // Decimal
        Value::Decimal(None),
        Value::Decimal(Some(Box::new(BigDecimal::from(0)))),
        Value::Decimal(Some(Box::new(
            "-99999999999999999999999999.999999999".parse::<BigDecimal>().unwrap(),
        ))),
        Value::Decimal(Some(Box::new("3.14159265358979".parse::<BigDecimal>().unwrap()))),
        // Complex
        Value::Complex(None),
        Value::Complex(Some(Complex::ZERO)),
        Value::Complex(Some(Complex::new(f64::MAX, f64::MIN))),
        Value::Complex(Some(Complex::new(1.5, -2.0))),
        // Temporal
        Value::Date(None),
        Value::Date(Some(Date::from_millis(0))),
        Value::Date(Some(Date::from_ymd(1, 1, 1).unwrap())),
        Value::Date(Some(Date::from_ymd(9999, 12, 31).unwrap())),
        Value::Time(None),
        Value::Time(Some(Time::from_millis(0))),
        Value::Time(Some(Time::from_millis(86_399_999))),
        Value::Timestamp(None),
        Value::Timestamp(Some(Timestamp::from_millis(0))),
        Value::Timestamp(Some(Timestamp::from_millis(i64::MIN))),
        Value::Timestamp(Some(Timestamp::from_millis(i64::MAX))),
        Value::ZonedTime(None),
        Value::ZonedTime(Some(ZonedTime::new(0, 0))),
        Value::ZonedTime(Some(ZonedTime::new(43_200_000, -64_800))),
        Value::ZonedTimestamp(None),
        Value::ZonedTimestamp(Some(ZonedTimestamp::new(0, 64_800))),
        Value::ZonedTimestamp(Some(ZonedTimestamp::new(1_705_314_600_000, -18_000))),
        Value::Instant(None),
        Value::Instant(Some(Instant::new(0, 0))),
        Value::Instant(Some(Instant::new(i64::MAX / 2, 999_999_999))),
        Value::Instant(Some(Instant::new(-1, 1))),
        // Binary / String
        Value::Binary(None),
        Value::Binary(Some(vec![])),
        Value::Binary(Some(vec![0xFF; 300])),
        Value::Binary(Some(vec![0xDE, 0xAD])),
        Value::String(None),
        Value::String(Some(String::new())),
        Value::String(Some("κόσμος 🌍".to_string())),
        Value::String(Some("typical".to_string())),
        // Compounds
        Value::List(vec![]),
        Value::list_from(vec![i64::MIN, 0, i64::MAX]),
        Value::List(vec![
            Value::Null,
            Value::Long(None),
            Value::from("mixed"),
            Value::map_from(vec![(Value::from("k"), Value::Boolean(Some(true)))]),
        ]),
        Value::Set(vec![]),
        Value::set_from(vec!["a", "b"]),
        Value::Map(vec![]),
        Value::map_from(vec![
            (Value::Long(Some(1)), Value::from("one")),
            (Value::from("nested"), Value::list_from(vec![1.5f64])),
        ]),
        Value::from(Vec::<f64>::new()),
        Value::from(vec![f64::MIN, 0.0, f64::MAX]),
        Value::SparseVector(SparseVectorBuilder::new(0).finish()),
        Value::SparseVector(sparse_typical.finish()),
        Value::SparseVector(sparse_full.finish()),
    ]
}

#[test]
fn representative_sample_roundtrips() {
    for value in sample_values() {
        roundtrip(&value);
    }
}

#[test]
fn sample_covers_every_kind() {
    let sampled: std::collections::HashSet<u8> =
        sample_values().iter().map(|v| v.kind().as_u8()).collect();
    for kind in ALL_KINDS {
        assert!(
            sampled.contains(&kind.as_u8()),
            "no sample value of kind {kind}"
        );
    }
}

#[test]
fn nan_payload_bits_survive() {
    let nan = Value::Double(Some(f64::from_bits(0x7ff8_dead_beef_0001)));
    let encoded = encoded_value(&nan).unwrap();
    match decode_value_exact(&encoded).unwrap() {
        Value::Double(Some(f)) => assert_eq!(f.to_bits(), 0x7ff8_dead_beef_0001),
        other => panic!("expected Double, got {other:?}"),
    }
}

#[test]
fn randomized_stream_roundtrips() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut buf = Vec::new();
    let mut expected = Vec::new();
    for _ in 0..500 {
        let value = match rng.gen_range(0..6) {
            0 => Value::Long(Some(rng.gen())),
            1 => Value::Double(Some(rng.gen_range(-1e9..1e9))),
            2 => Value::String(Some(
                (0..rng.gen_range(0..20))
                    .map(|_| rng.gen_range(b'a'..=b'z') as char)
                    .collect(),
            )),
            3 => Value::Boolean(Some(rng.gen_bool(0.5))),
            4 => Value::list_from(
                (0..rng.gen_range(0..5))
                    .map(|_| rng.gen_range(-100i64..100))
                    .collect::<Vec<_>>(),
            ),
            _ => Value::Timestamp(Some(Timestamp::from_millis(rng.gen()))),
        };
        encode_value(&value, &mut buf).unwrap();
        expected.push(value);
    }

    let mut pos = 0;
    let mut decoded = Vec::new();
    while pos < buf.len() {
        let (value, used) = decode_value(&buf[pos..]).unwrap();
        decoded.push(value);
        pos += used;
    }
    assert_eq!(decoded, expected);
}

#[test]
fn every_truncation_of_a_valid_encoding_errors_cleanly() {
    // No panic, no wrong value: every strict prefix either errors or (for
    // multi-value streams) stops early
    for value in sample_values() {
        let encoded = encoded_value(&value).unwrap();
        for cut in 0..encoded.len() {
            let _ = decode_value_exact(&encoded[..cut]);
        }
    }
}
