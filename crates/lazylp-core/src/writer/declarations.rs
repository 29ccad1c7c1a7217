//! BOUNDS, GENERAL and BINARY sections.
//!
//! Only variables with a default index can be enumerated; the rest are
//! skipped. Every section walks the index lazily, one line or word at a time.

use std::io::Write;

use lazylp_expr::IndexSet;

use super::packer::LinePacker;
use super::{BINARY_HEADER, BOUNDS_HEADER, GENERAL_HEADER, WriteError};
use crate::model::ModelRegistry;
use crate::types::Variable;

pub(crate) fn write_declarations<W: Write>(
    packer: &mut LinePacker<W>,
    registry: &ModelRegistry,
) -> Result<(), WriteError> {
    for variable in registry.variables() {
        if variable.default_index().is_none() {
            tracing::debug!(
                component = "writer",
                operation = "write_declarations",
                status = "skipped",
                variable = variable.name(),
                "Variable has no default index; no declarations written"
            );
        }
    }

    let indexed = || {
        registry
            .variables()
            .filter_map(|variable| variable.default_index().map(|index| (variable, index)))
    };

    let mut bounded = indexed()
        .filter(|(variable, _)| !variable.kind().is_binary())
        .peekable();
    if bounded.peek().is_some() {
        packer.write_line(BOUNDS_HEADER)?;
        for (variable, index) in bounded {
            write_bounds(packer, variable, index)?;
        }
    }

    write_names(
        packer,
        GENERAL_HEADER,
        indexed().filter(|(variable, _)| variable.kind().is_integer()),
    )?;
    write_names(
        packer,
        BINARY_HEADER,
        indexed().filter(|(variable, _)| variable.kind().is_binary()),
    )?;
    Ok(())
}

fn write_bounds<W: Write>(
    packer: &mut LinePacker<W>,
    variable: &Variable,
    index: &IndexSet,
) -> Result<(), WriteError> {
    let (default_lower, default_upper) = variable.kind().default_bounds();
    for i in index.iter() {
        let lower = match variable.lower_bound() {
            Some(bound) => bound.value_at(Some(&i))?,
            None => default_lower,
        };
        let upper = match variable.upper_bound() {
            Some(bound) => bound.value_at(Some(&i))?,
            None => default_upper,
        };
        let name = format!("{}_{}", variable.name(), i);
        packer.write_line(&bound_line(&name, lower, upper))?;
    }
    Ok(())
}

fn write_names<'a, W, I>(
    packer: &mut LinePacker<W>,
    header: &str,
    variables: I,
) -> Result<(), WriteError>
where
    W: Write,
    I: Iterator<Item = (&'a Variable, &'a IndexSet)>,
{
    let mut variables = variables.peekable();
    if variables.peek().is_none() {
        return Ok(());
    }
    packer.write_line(header)?;
    let mut first = true;
    for (variable, index) in variables {
        for i in index.iter() {
            let name = format!("{}_{}", variable.name(), i);
            if first {
                packer.push_word(&name)?;
                first = false;
            } else {
                packer.push_or_wrap(" ", &name, &name)?;
            }
        }
    }
    packer.flush_line()?;
    Ok(())
}

pub(crate) fn bound_line(name: &str, lower: f64, upper: f64) -> String {
    let lower_free = lower == f64::NEG_INFINITY;
    let upper_free = upper == f64::INFINITY;
    match (lower_free, upper_free) {
        (true, true) => format!("{name} free"),
        (false, true) => format!("{name} >= {lower}"),
        (true, false) => format!("-inf <= {name} <= {upper}"),
        (false, false) if lower == upper => format!("{name} = {lower}"),
        (false, false) => format!("{lower} <= {name} <= {upper}"),
    }
}
