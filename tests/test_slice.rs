use rstest::rstest;
use xot::Xot;

mod common;

use common::library;

#[rstest]
#[case(1, None, 0)]
#[case(0, None, 1)]
#[case(-1, None, 1)]
#[case(-2, None, 1)]
#[case(1, Some(1), 0)]
#[case(0, Some(1), 1)]
#[case(-1, Some(1), 1)]
#[case(-2, Some(1), 1)]
fn test_slice_single(#[case] start: isize, #[case] end: Option<isize>, #[case] expected: usize) {
    let mut xot = Xot::new();
    let doc = library(&mut xot);
    assert_eq!(doc.slice(start, end).len(), expected);
}

#[rstest]
#[case(-9, 8)]
#[case(-8, 8)]
#[case(-2, 2)]
#[case(-1, 1)]
#[case(0, 8)]
#[case(1, 7)]
#[case(2, 6)]
#[case(3, 5)]
#[case(4, 4)]
#[case(5, 3)]
#[case(6, 2)]
#[case(7, 1)]
#[case(8, 0)]
#[case(9, 0)]
fn test_slice_open_end(#[case] start: isize, #[case] expected: usize) {
    let mut xot = Xot::new();
    let books = library(&mut xot).find_matching(&xot, "book");
    assert_eq!(books.slice(start, None).len(), expected);
}

#[rstest]
#[case(-9, 5)]
#[case(-8, 5)]
#[case(-2, 0)]
#[case(-1, 0)]
#[case(0, 5)]
#[case(1, 4)]
#[case(2, 3)]
#[case(3, 2)]
#[case(4, 1)]
#[case(5, 0)]
#[case(6, 0)]
#[case(9, 0)]
fn test_slice_to_five(#[case] start: isize, #[case] expected: usize) {
    let mut xot = Xot::new();
    let books = library(&mut xot).find_matching(&xot, "book");
    assert_eq!(books.slice(start, Some(5)).len(), expected);
}

#[rstest]
#[case(-9, 3)]
#[case(-8, 3)]
#[case(-2, 0)]
#[case(-1, 0)]
#[case(0, 3)]
#[case(1, 2)]
#[case(2, 1)]
#[case(3, 0)]
#[case(4, 0)]
#[case(8, 0)]
#[case(9, 0)]
fn test_slice_to_negative(#[case] start: isize, #[case] expected: usize) {
    let mut xot = Xot::new();
    let books = library(&mut xot).find_matching(&xot, "book");
    assert_eq!(books.slice(start, Some(-5)).len(), expected);
}

#[test]
fn test_slice_keeps_order() {
    let mut xot = Xot::new();
    let books = library(&mut xot).find_matching(&xot, "book");
    assert_eq!(
        books.slice(2, Some(5)).ids(&xot),
        vec![Some("3"), Some("4"), Some("1")]
    );
    assert_eq!(books.slice(-2, None).ids(&xot), vec![Some("1"), Some("2")]);
}
