use lazylp_core::{
    Comparison, LpWriter, ModelRegistry, ObjectiveSense, VarKind, Variable, WriteError,
    WriterConfig,
};
use lazylp_expr::{Coefficients, FnCoefficients, Index, IndexSet};
use std::fs;
use std::io::{BufRead, BufReader};
use std::rc::Rc;

fn assignment_model(n: i64) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    let cells = IndexSet::range(0..n).product(IndexSet::range(0..n));
    registry
        .declare_variable(Variable::binary("assign", cells.clone()))
        .unwrap();

    let cost: Rc<dyn Coefficients> = Rc::new(FnCoefficients(|index: &Index| match index {
        Index::Tuple(parts) => {
            let i = parts[0].as_int()?;
            let j = parts[1].as_int()?;
            Some(((i * 7 + j * 3) % 11) as f64 - 5.0)
        }
        _ => None,
    }));
    let objective = registry.make_sum("assign", Some(cost), None).unwrap();
    registry
        .set_objective(objective, ObjectiveSense::Min)
        .unwrap();

    let everything = registry.make_sum("assign", None, None).unwrap();
    registry
        .add_constraint(everything, Comparison::Equal, n as i32, None, Some("total"))
        .unwrap();
    registry
}

#[test]
fn writes_to_disk_and_returns_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ModelRegistry::new();
    registry
        .declare_variable(Variable::binary("x", IndexSet::range(0..4)))
        .unwrap();
    let sum = registry.make_sum("x", None, None).unwrap();
    registry.set_objective(sum, ObjectiveSense::Min).unwrap();

    let path = LpWriter::default()
        .write(&registry, dir.path().join("model.lp"))
        .unwrap();

    assert!(path.is_absolute());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "MIN\nx_0 + x_1 + x_2 + x_3\nST\nend\n"
    );
}

#[test]
fn large_model_respects_line_width() {
    let dir = tempfile::tempdir().unwrap();
    let registry = assignment_model(120);
    let writer = LpWriter::default();

    let estimate = writer.estimate(&registry).unwrap();
    let path = writer.write(&registry, dir.path().join("assign.lp")).unwrap();

    let file = fs::File::open(&path).unwrap();
    let mut lines = 0_u64;
    for line in BufReader::new(file).lines() {
        let line = line.unwrap();
        assert!(line.chars().count() <= 80, "line too wide: {line}");
        lines += 1;
    }
    assert_eq!(lines, estimate.lines);
    assert_eq!(fs::metadata(&path).unwrap().len(), estimate.bytes);
    assert_eq!(estimate.terms, 2 * 120 * 120);
}

#[test]
fn declarations_section_lists_integer_domains() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = assignment_model(2);
    registry
        .declare_variable(
            Variable::new("stock", VarKind::PositiveInteger)
                .with_default_index(IndexSet::values(["north", "south"])),
        )
        .unwrap();

    let writer = LpWriter::new(WriterConfig::new().with_declarations(true));
    let path = writer.write(&registry, dir.path().join("decl.lp")).unwrap();
    let text = fs::read_to_string(path).unwrap();

    assert!(text.contains("BOUNDS\nstock_north >= 1\nstock_south >= 1\n"));
    assert!(text.contains("GENERAL\nstock_north stock_south\n"));
    assert!(text.contains("BINARY\nassign_0_0 assign_0_1 assign_1_0 assign_1_1\n"));
    assert!(text.ends_with("end\n"));
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ModelRegistry::new();
    let result = LpWriter::default().write(&registry, dir.path().join("missing/dir/model.lp"));
    assert!(matches!(result, Err(WriteError::Io(_))));
}

#[test]
fn bulk_writer_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let words = (0..5_000).map(|i| format!("{i}_blah "));
    let path = LpWriter::default()
        .write_bulk(dir.path().join("blah.txt"), words)
        .unwrap();

    assert!(path.is_absolute());
    let text = fs::read_to_string(path).unwrap();
    assert!(text.lines().all(|line| line.len() <= 255));
    assert!(text.starts_with("0_blah 1_blah "));
    assert!(text.ends_with("4999_blah \n"));
}

#[test]
fn bulk_writer_unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = LpWriter::default()
        .write_bulk(dir.path().join("missing/blah.txt"), ["a", "b"]);
    match result {
        Err(err) => assert_eq!(err.code(), "WRITE_IO"),
        Ok(path) => panic!("unexpected write to {}", path.display()),
    }
}
