//! Integration tests for tabula-frame

use common_error::TabulaResult;
use tabula_core::{Label, Resolve, Target, Value};
use tabula_frame::{Datum, Frame, Index};

/// `frame[column] < bound`, resolved by hand.
struct LessThan(&'static str, i64);

impl Resolve<Datum> for LessThan {
    type Output = Datum;

    fn resolve(&self, target: &Datum) -> TabulaResult<Datum> {
        target
            .item(&Label::from(self.0))?
            .invoke("lt", vec![Datum::Scalar(Value::from(self.1))], Default::default())
    }
}

/// Every label whose text is longer than one character.
struct LongLabels;

impl Resolve<Frame> for LongLabels {
    type Output = Vec<usize>;

    fn resolve(&self, target: &Frame) -> TabulaResult<Vec<usize>> {
        Ok(target
            .columns()
            .labels()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.as_str().is_some_and(|s| s.len() > 1))
            .map(|(i, _)| i)
            .collect())
    }
}

fn sample() -> Frame {
    Frame::new([
        ("x", vec![1i64, 2, 3, 4, 5]),
        ("xx", vec![5i64, 4, 3, 2, 1]),
    ])
    .unwrap()
}

#[test]
fn test_filter_with_resolved_mask() {
    let df = sample();
    let filtered = df.filter_with(&LessThan("x", 3)).unwrap();
    assert_eq!(filtered.shape(), (2, 2));
    assert_eq!(
        filtered.column(&Label::from("xx")).unwrap().values(),
        &[Value::from(5i64), Value::from(4i64)]
    );
}

#[test]
fn test_assign_with_sees_earlier_assignments() {
    let df = sample();
    let first = LessThan("x", 3);
    let second = LessThan("flag", 1);
    let err = df
        .assign_with([("flag", &first), ("again", &second)])
        .unwrap_err();
    // `flag` is boolean, so comparing it with an integer is a type error
    // rather than a missing column.
    assert!(err.to_string().starts_with("TypeError"));

    let assigned = df.assign_with([("flag", &first)]).unwrap();
    assert_eq!(assigned.shape(), (5, 3));
}

#[test]
fn test_filter_rejects_non_series() {
    struct Scalar;
    impl Resolve<Datum> for Scalar {
        type Output = Datum;
        fn resolve(&self, _target: &Datum) -> TabulaResult<Datum> {
            Ok(Datum::Scalar(Value::Bool(true)))
        }
    }

    assert!(sample().filter_with(&Scalar).is_err());
}

#[test]
fn test_loc_columns() {
    let df = sample();
    let selected = df.loc_columns(&LongLabels).unwrap();
    assert_eq!(selected.columns().labels(), &[Label::from("xx")]);
}

#[test]
fn test_multi_level_columns() {
    let df = Frame::new([
        ("a", vec![1i64]),
        ("b", vec![2i64]),
        ("c", vec![3i64]),
        ("d", vec![4i64]),
    ])
    .unwrap()
    .with_columns(
        Index::from_product(vec![
            vec![Label::from("one"), Label::from("two")],
            vec![Label::from("X"), Label::from("Y")],
        ])
        .with_names([Some("top"), Some("bottom")])
        .unwrap(),
    )
    .unwrap();

    let col = df.column(&Label::from(("two", "X"))).unwrap();
    assert_eq!(col.values(), &[Value::from(3i64)]);
    assert_eq!(df.columns().nlevels(), 2);
}
