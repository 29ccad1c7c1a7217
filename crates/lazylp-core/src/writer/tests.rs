use super::*;
use crate::types::{Comparison, VarKind, Variable};
use lazylp_expr::{Coefficients, ExprError, FnCoefficients, IndexSet};
use std::collections::BTreeMap;
use std::rc::Rc;

fn registry_with_x() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .declare_variable(Variable::binary("x", IndexSet::range(0..4)))
        .unwrap();
    registry
}

fn render(writer: &LpWriter, registry: &ModelRegistry) -> String {
    let mut out = Vec::new();
    writer.write_to(registry, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn coefficients(pairs: &[(i64, f64)]) -> Rc<dyn Coefficients> {
    Rc::new(pairs.iter().copied().collect::<BTreeMap<i64, f64>>())
}

fn expression_lines(streams: &[TermStream], width: usize) -> Vec<String> {
    let mut packer = LinePacker::new(Vec::new(), width);
    serialize_expression(&mut packer, streams, None, None).unwrap();
    let (bytes, _) = packer.finish().unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_objective_over_default_index() {
    let mut registry = registry_with_x();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry.set_objective(sum, ObjectiveSense::Min).unwrap();

    let text = render(&LpWriter::default(), &registry);
    assert_eq!(text, "MIN\nx_0 + x_1 + x_2 + x_3\nST\nend\n");
}

#[test]
fn test_constraint_with_signed_coefficients() {
    let mut registry = registry_with_x();
    let sum = registry
        .make_sum(
            "x",
            Some(coefficients(&[(0, 2.0), (1, 3.0), (2, -1.0), (3, 4.0)])),
            None,
        )
        .unwrap();
    registry
        .add_constraint(sum, Comparison::LessEqual, 50, None, None)
        .unwrap();

    let text = render(&LpWriter::default(), &registry);
    let lines: Vec<&str> = text.lines().collect();
    let pos = lines.iter().position(|line| *line == "ST").unwrap();
    assert_eq!(lines[pos + 1], "2 x_0 + 3 x_1 - 1 x_2 + 4 x_3");
    assert_eq!(lines[pos + 2], "<= 50");
    assert_eq!(lines.last(), Some(&"end"));
}

#[test]
fn test_max_objective_header() {
    let mut registry = registry_with_x();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry.set_objective(sum, ObjectiveSense::Max).unwrap();
    assert!(render(&LpWriter::default(), &registry).starts_with("MAX\n"));
}

#[test]
fn test_missing_objective_writes_empty_min() {
    let registry = registry_with_x();
    assert_eq!(render(&LpWriter::default(), &registry), "MIN\nST\nend\n");
}

#[test]
fn test_leading_negative_term_kept_as_is() {
    let stream = TermStream::sum(
        "y",
        Some(coefficients(&[(0, -3.0), (1, -0.5)])),
        IndexSet::range(0..2),
    );
    assert_eq!(expression_lines(&[stream], 80), vec!["-3 y_0 - 0.5 y_1"]);
}

#[test]
fn test_each_stream_starts_a_new_line() {
    let x = TermStream::sum("x", None, IndexSet::range(0..2));
    let y = TermStream::sum("y", None, IndexSet::range(0..2));
    assert_eq!(
        expression_lines(&[x, y], 80),
        vec!["x_0 + x_1", " + y_0 + y_1"]
    );
}

#[test]
fn test_lines_respect_width_and_lose_nothing() {
    let stream = TermStream::sum(
        "flow",
        Some(Rc::new(FnCoefficients(|index: &Index| {
            index.as_int().map(|i| (i % 13) as f64 - 6.0)
        }))),
        IndexSet::range(0..500),
    );
    let lines = expression_lines(std::slice::from_ref(&stream), 80);

    assert!(lines.len() > 1);
    assert!(lines.iter().all(|line| line.chars().count() <= 80));

    let rebuilt = lines
        .join("\n")
        .replace(" +\n", "")
        .replace("\n+\n", "")
        .replace("\n+ ", "")
        .replace('\n', "")
        .replace(" + ", "")
        .replace(" - ", "-");
    let expected: String = stream.terms(None).map(|term| term.unwrap()).collect();
    assert_eq!(rebuilt, expected);
}

#[test]
fn test_hundred_short_terms_overflow() {
    let stream = TermStream::from_fn("t", |_row: Option<&Index>| {
        std::iter::repeat_n(Ok::<_, ExprError>("abc".to_string()), 100)
    });
    let lines = expression_lines(&[stream], 80);

    // "abc", twelve " + abc" and a trailing " +": 13 terms per line.
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|line| line.len() <= 80));
    assert_eq!(lines[0].len(), 77);
    assert!(lines[0].ends_with(" +"));
    assert_eq!(lines.last().unwrap(), &format!("abc{}", " + abc".repeat(8)));
}

#[test]
fn test_wrapped_term_within_budget_keeps_line_width() {
    let name = "v".repeat(76);
    let stream = TermStream::sum(name.clone(), None, IndexSet::range(0..2));
    let lines = expression_lines(&[stream], 80);

    assert_eq!(lines, vec![format!("{name}_0 +"), format!("{name}_1")]);
    assert!(lines.iter().all(|line| line.chars().count() <= 80));
}

#[test]
fn test_full_width_terms_put_plus_on_its_own_line() {
    let name = "w".repeat(78);
    let stream = TermStream::sum(name.clone(), None, IndexSet::range(0..2));
    let lines = expression_lines(&[stream], 80);

    assert_eq!(
        lines,
        vec![format!("{name}_0"), "+".to_string(), format!("{name}_1")]
    );
}

#[test]
fn test_wrapped_negative_term_keeps_its_sign() {
    let long = "a".repeat(75);
    let stream = TermStream::from_fn("t", move |_row: Option<&Index>| {
        vec![Ok::<_, ExprError>(long.clone()), Ok("-2 b_0".to_string())]
    });
    let lines = expression_lines(&[stream], 80);
    assert_eq!(lines, vec!["a".repeat(75), "-2 b_0".to_string()]);
}

#[test]
fn test_negative_term_spacing_is_preserved() {
    let stream = TermStream::from_fn("t", |_row: Option<&Index>| {
        ["1 x_0", "- 5 x_1"].map(|term| Ok::<_, ExprError>(term.to_string()))
    });
    assert_eq!(expression_lines(&[stream], 80), vec!["1 x_0 -  5 x_1"]);
}

#[test]
fn test_oversize_term_alone_on_its_line() {
    let long_name = "v".repeat(90);
    let stream = TermStream::sum(long_name.clone(), None, IndexSet::range(0..2));
    let lines = expression_lines(&[stream], 80);
    assert_eq!(
        lines,
        vec![
            format!("{long_name}_0"),
            "+".to_string(),
            format!("{long_name}_1")
        ]
    );
}

#[test]
fn test_indexed_named_block_writes_one_row_per_index() {
    let mut registry = registry_with_x();
    let row_sum = TermStream::from_fn("x", |row: Option<&Index>| {
        let row = row.and_then(Index::as_int).unwrap_or(0);
        (row..row + 2).map(|i| Ok(format!("x_{i}")))
    });
    registry
        .add_constraint(
            row_sum,
            Comparison::GreaterEqual,
            coefficients(&[(0, 1.0), (1, 0.5)]),
            Some(IndexSet::range(0..2)),
            Some("cover"),
        )
        .unwrap();

    let text = render(&LpWriter::default(), &registry);
    assert_eq!(
        text,
        "MIN\nST\ncover_0:\nx_0 + x_1\n>= 1\ncover_1:\nx_1 + x_2\n>= 0.5\nend\n"
    );
}

#[test]
fn test_named_block_label() {
    let mut registry = registry_with_x();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry
        .add_constraint(sum, Comparison::Equal, 2, None, Some("pick_two"))
        .unwrap();
    let text = render(&LpWriter::default(), &registry);
    assert!(text.contains("ST\npick_two:\nx_0 + x_1 + x_2 + x_3\n= 2\n"));
}

#[test]
fn test_blocks_written_in_declaration_order() {
    let mut registry = registry_with_x();
    for rhs in [3, 1, 2] {
        let sum = registry
            .make_sum("x", None, Some(IndexSet::range(0..1)))
            .unwrap();
        registry
            .add_constraint(sum, Comparison::LessEqual, rhs, None, None)
            .unwrap();
    }
    let text = render(&LpWriter::default(), &registry);
    let suffixes: Vec<&str> = text.lines().filter(|l| l.starts_with("<=")).collect();
    assert_eq!(suffixes, vec!["<= 3", "<= 1", "<= 2"]);
}

#[test]
fn test_missing_coefficient_propagates() {
    let mut registry = registry_with_x();
    let sum = registry
        .make_sum("x", Some(coefficients(&[(0, 1.0)])), None)
        .unwrap();
    registry
        .add_constraint(sum, Comparison::LessEqual, 1, None, None)
        .unwrap();

    let err = LpWriter::default()
        .write_to(&registry, Vec::new())
        .unwrap_err();
    match err {
        WriteError::Expr(ExprError::MissingCoefficient { var, index }) => {
            assert_eq!(var, "x");
            assert_eq!(index, Index::Int(1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_rhs_value_propagates() {
    let mut registry = registry_with_x();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry
        .add_constraint(
            sum,
            Comparison::LessEqual,
            coefficients(&[(0, 1.0)]),
            Some(IndexSet::range(0..2)),
            None,
        )
        .unwrap();

    let err = LpWriter::default().estimate(&registry).unwrap_err();
    assert_eq!(err.code(), "EXPR_MISSING_PARAM");
}

#[test]
fn test_estimate_matches_real_write() {
    let mut registry = registry_with_x();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry.set_objective(sum.clone(), ObjectiveSense::Min).unwrap();
    registry
        .add_constraint(sum, Comparison::LessEqual, 2, None, None)
        .unwrap();

    let writer = LpWriter::default();
    let estimated = writer.estimate(&registry).unwrap();
    let mut out = Vec::new();
    let written = writer.write_to(&registry, &mut out).unwrap();

    assert_eq!(estimated, written);
    assert_eq!(written.bytes, out.len() as u64);
    assert_eq!(written.terms, 8);
}

#[test]
fn test_declaration_sections() {
    let mut registry = registry_with_x();
    registry
        .declare_variable(
            Variable::new("y", VarKind::NonNegativeReal)
                .with_upper_bound(coefficients(&[(0, 10.0), (1, 20.0)]))
                .with_default_index(IndexSet::range(0..2)),
        )
        .unwrap();
    registry
        .declare_variable(
            Variable::new("n", VarKind::Integer).with_default_index(IndexSet::values(["a"])),
        )
        .unwrap();
    registry
        .declare_variable(Variable::new("free_floating", VarKind::Real))
        .unwrap();

    let writer = LpWriter::new(WriterConfig::new().with_declarations(true));
    let text = render(&writer, &registry);
    assert_eq!(
        text,
        "MIN\nST\nBOUNDS\nn_a free\n0 <= y_0 <= 10\n0 <= y_1 <= 20\nGENERAL\nn_a\nBINARY\nx_0 x_1 x_2 x_3\nend\n"
    );
}

#[test]
fn test_declarations_off_by_default() {
    let registry = registry_with_x();
    let text = render(&LpWriter::default(), &registry);
    assert!(!text.contains(BINARY_HEADER));
}
