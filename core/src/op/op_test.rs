#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::error::VmError;
    use crate::op::{equal, exponent, is_in, length, make_range, negate, slice};
    use crate::val::{FloatWidth, Int, IntWidth, Kind, MapVal, Record, RecordType, Val};

    fn nums(n: i64) -> Val {
        Val::from((0..n).collect::<Vec<i64>>())
    }

    #[test]
    fn membership_in_list_uses_equality() {
        let list = Val::from(vec![1, 2, 3]);
        assert!(is_in(&Val::from(3), &list).unwrap());
        assert!(is_in(&Val::from(3u64), &list).unwrap());
        assert!(is_in(&Val::from(2.0), &list).unwrap());
        assert!(!is_in(&Val::from("3"), &list).unwrap());
        assert!(!is_in(&Val::from(4), &list).unwrap());
    }

    #[test]
    fn membership_in_map_checks_keys() {
        let map = Val::map(MapVal::with_entries(Kind::Int(IntWidth::I64), [("a", 1i64)]));
        assert!(is_in(&Val::from("a"), &map).unwrap());
        assert!(!is_in(&Val::from("x"), &map).unwrap());
        assert!(!is_in(&Val::from(1), &map).unwrap());
        let err = is_in(&Val::from(vec![1]), &map).unwrap_err();
        assert!(matches!(err, VmError::Type { op: "in", kind: Kind::List }));
    }

    #[test]
    fn membership_in_record_checks_field_names() {
        let ty = Arc::new(RecordType::new("S").field("f", Kind::Any));
        let rec = Val::record(Record::new(ty));
        assert!(is_in(&Val::from("f"), &rec).unwrap());
        assert!(!is_in(&Val::from("g"), &rec).unwrap());
        assert!(is_in(&Val::from(1), &rec).is_err());
    }

    #[test]
    fn membership_follows_references_and_tolerates_nil() {
        let list = Val::reference(Val::from(vec!["x"]));
        assert!(is_in(&Val::from("x"), &list).unwrap());
        assert!(!is_in(&Val::from("x"), &Val::Nil).unwrap());
        assert!(!is_in(&Val::from("x"), &Val::Null(Kind::List)).unwrap());
        assert!(!is_in(&Val::from("x"), &Val::Null(Kind::Ref)).unwrap());
    }

    #[test]
    fn membership_through_reference_to_map_or_record() {
        let map = Val::reference(Val::map(MapVal::with_entries(Kind::Any, [("a", 1)])));
        assert!(is_in(&Val::from("a"), &map).unwrap());
        assert!(!is_in(&Val::from("b"), &map).unwrap());

        let ty = Arc::new(RecordType::new("S").field("f", Kind::Any));
        let rec = Val::reference(Val::record(Record::new(ty)));
        assert!(is_in(&Val::from("f"), &rec).unwrap());
        assert!(matches!(is_in(&Val::from(1), &rec), Err(VmError::Type { op: "in", .. })));
    }

    #[test]
    fn membership_checks_declared_key_kind() {
        let map = Val::map(MapVal::with_entries(Kind::Int(IntWidth::I64), [("a", 1i64)]).with_key_kind(Kind::Str));
        assert!(is_in(&Val::from("a"), &map).unwrap());
        let err = is_in(&Val::from(1), &map).unwrap_err();
        assert!(matches!(err, VmError::Type { op: "in", kind: Kind::Int(IntWidth::I32) }));
    }

    #[test]
    fn membership_unsupported_on_scalars() {
        let err = is_in(&Val::from(1), &Val::from(5)).unwrap_err();
        assert_eq!(err.to_string(), "operator \"in\" not defined on int32");
        assert!(matches!(is_in(&Val::from("a"), &Val::from("abc")), Err(VmError::Unsupported { .. })));
    }

    #[test]
    fn equality_operator() {
        assert!(equal(&Val::from(1u8), &Val::from(1i64)));
        assert!(!equal(&Val::from(vec![1]), &Val::from(1)));
    }

    #[test]
    fn length_of_containers() {
        assert_eq!(length(&nums(4)).unwrap(), 4);
        assert_eq!(length(&Val::from("héllo")).unwrap(), 5);
        assert_eq!(length(&Val::map(MapVal::with_entries(Kind::Any, [("a", 1), ("b", 2)]))).unwrap(), 2);
        assert_eq!(length(&Val::Null(Kind::List)).unwrap(), 0);
        assert!(matches!(length(&Val::from(3)), Err(VmError::Type { op: "len", .. })));
        assert!(length(&Val::Nil).is_err());
    }

    #[test]
    fn slice_within_bounds() {
        let s = nums(6);
        for i in 0..=6i64 {
            for j in i..=6i64 {
                let out = slice(&s, &Val::from(i), &Val::from(j)).unwrap();
                let expected = Val::from((i..j).collect::<Vec<i64>>());
                assert_eq!(length(&out).unwrap(), (j - i) as usize);
                assert_eq!(out, expected);
            }
        }
    }

    #[test]
    fn slice_clamps_overrun() {
        let s = nums(3);
        assert_eq!(slice(&s, &Val::from(0), &Val::from(10)).unwrap(), s);
        assert_eq!(slice(&s, &Val::from(1), &Val::from(99)).unwrap(), Val::from(vec![1i64, 2]));
        assert_eq!(slice(&s, &Val::from(5), &Val::from(10)).unwrap(), Val::from(Vec::<i64>::new()));
        assert_eq!(slice(&s, &Val::from(2), &Val::from(1)).unwrap(), Val::from(Vec::<i64>::new()));
    }

    #[test]
    fn slice_strings_and_references() {
        let s = Val::from("héllo");
        assert_eq!(slice(&s, &Val::from(1), &Val::from(3)).unwrap(), Val::from("él"));
        assert_eq!(slice(&s, &Val::from(3), &Val::from(50)).unwrap(), Val::from("lo"));
        let r = Val::reference(nums(4));
        assert_eq!(slice(&r, &Val::from(2), &Val::from(4)).unwrap(), Val::from(vec![2i64, 3]));
        let nil_list = Val::Null(Kind::List);
        assert!(slice(&nil_list, &Val::from(0), &Val::from(3)).unwrap().is_nil());
    }

    #[test]
    fn slice_rejects_bad_operands() {
        assert!(matches!(
            slice(&Val::from(1), &Val::from(0), &Val::from(1)),
            Err(VmError::Type { op: "slice", .. })
        ));
        assert!(matches!(
            slice(&nums(3), &Val::from(-1), &Val::from(2)),
            Err(VmError::Lookup { op: "slice", .. })
        ));
        assert!(slice(&nums(3), &Val::from("a"), &Val::from(2)).is_err());
    }

    #[test]
    fn slice_rejects_non_finite_bounds() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                slice(&nums(3), &Val::from(bad), &Val::from(2)),
                Err(VmError::Lookup { op: "slice", .. })
            ));
            assert!(matches!(
                slice(&Val::from("abc"), &Val::from(0), &Val::from(bad)),
                Err(VmError::Lookup { op: "slice", kind: Kind::Str, .. })
            ));
        }
        assert_eq!(slice(&nums(3), &Val::from(0.9), &Val::from(2.5)).unwrap(), Val::from(vec![0i64, 1]));
    }

    macro_rules! test_negate {
        ($name:ident, $input:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let v: Val = $input.into();
                let out = negate(&v).unwrap();
                let expected: Val = $expected.into();
                assert_eq!(out.kind(), v.kind());
                assert_eq!(out, expected);
            }
        };
    }

    test_negate!(negate_i8, 5i8, -5i8);
    test_negate!(negate_i64, -9i64, 9i64);
    test_negate!(negate_isize, 7isize, -7isize);
    test_negate!(negate_i8_min_wraps, i8::MIN, i8::MIN);
    test_negate!(negate_f32, 1.5f32, -1.5f32);
    test_negate!(negate_f64, -0.25f64, 0.25f64);
    test_negate!(negate_u8, 1u8, 255u8);
    test_negate!(negate_u16, 1u16, u16::MAX);
    test_negate!(negate_u32, 10u32, u32::MAX - 9);
    test_negate!(negate_u64_zero, 0u64, 0u64);
    test_negate!(negate_usize, 2usize, usize::MAX - 1);

    #[test]
    fn negate_keeps_width() {
        assert!(matches!(negate(&Val::from(1u8)).unwrap(), Val::Int(Int::U8(255))));
        assert_eq!(negate(&Val::from(2.0f32)).unwrap().kind(), Kind::Float(FloatWidth::F32));
        assert!(matches!(negate(&Val::from("x")), Err(VmError::Type { op: "-", kind: Kind::Str })));
    }

    #[test]
    fn exponent_is_always_double() {
        assert_eq!(exponent(&Val::from(2), &Val::from(10)).unwrap(), 1024.0);
        assert_eq!(exponent(&Val::from(4u8), &Val::from(0.5f32)).unwrap(), 2.0);
        assert_eq!(exponent(&Val::from(2.0), &Val::from(-1)).unwrap(), 0.5);
        assert!(exponent(&Val::from("2"), &Val::from(1)).is_err());
    }

    #[test]
    fn make_range_is_inclusive() {
        assert_eq!(make_range(1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(make_range(3, 3), vec![3]);
        assert_eq!(make_range(-2, 0), vec![-2, -1, 0]);
        assert!(make_range(5, 1).is_empty());
    }
}
