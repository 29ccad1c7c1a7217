use crate::model::ModelRegistry;
use crate::types::Variable;
use lazylp_expr::{Coefficients, IndexSet, TermStream};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Registry with binary `x` over `0..n`.
pub(super) fn registry_with_x(n: i64) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .declare_variable(Variable::binary("x", IndexSet::range(0..n)))
        .unwrap();
    registry
}

pub(super) fn int_coefficients(pairs: &[(i64, f64)]) -> Rc<dyn Coefficients> {
    Rc::new(pairs.iter().copied().collect::<BTreeMap<i64, f64>>())
}

pub(super) fn drain(stream: &TermStream) -> Vec<String> {
    stream.terms(None).map(|term| term.unwrap()).collect()
}
