//! Coercion of dynamically typed JSON values into numeric arrays.
//!
//! Leaves follow the usual numeric-array conversion rules: numbers are taken
//! as `f64`, booleans become `1.0`/`0.0`, `null` becomes NaN (and is then
//! rejected by the missing-value check), and strings are parsed as floats.
//! Nested arrays must be rectangular.

use alloc::vec::Vec;
use serde_json::Value;

use crate::{IntoNdArray, NdArray, Result, TypeError};

impl IntoNdArray<f64> for &Value {
    fn into_ndarray(self) -> Result<NdArray<f64>> {
        let shape = infer_shape(self);
        let mut data = Vec::with_capacity(shape.iter().product());
        flatten(self, &shape, &mut data)?;
        NdArray::from_shape_vec(shape, data)
    }
}

impl IntoNdArray<f64> for Value {
    fn into_ndarray(self) -> Result<NdArray<f64>> {
        (&self).into_ndarray()
    }
}

// Follows the first element at every depth
fn infer_shape(value: &Value) -> Vec<usize> {
    let mut shape = Vec::new();
    let mut current = value;
    while let Value::Array(items) = current {
        shape.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    shape
}

fn flatten(value: &Value, shape: &[usize], out: &mut Vec<f64>) -> Result<()> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, inner))) => {
            if items.len() != len {
                return Err(TypeError::Ragged.into());
            }
            items.iter().try_for_each(|item| flatten(item, inner, out))
        }
        (Value::Array(_), None) => Err(TypeError::Ragged.into()),
        (Value::Object(_), _) => Err(TypeError::NotArrayLike { found: "object" }.into()),
        (_, Some(_)) => Err(TypeError::Ragged.into()),
        (leaf, None) => {
            out.push(leaf_to_f64(leaf)?);
            Ok(())
        }
    }
}

fn leaf_to_f64(value: &Value) -> Result<f64> {
    let found = match value {
        Value::Null => return Ok(f64::NAN),
        Value::Bool(b) => return Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => return n.as_f64().ok_or(TypeError::NotNumeric { found: "number" }.into()),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => "string",
        },
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    Err(TypeError::NotNumeric { found }.into())
}
