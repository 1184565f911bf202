use std::cmp::Ordering;
use std::rc::Rc;

use super::Value;

/// Truthiness: `none` is falsy, booleans by value, `0`/`0.0` falsy, empty
/// string/list/dict falsy, everything else truthy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::None => false,
        Value::Bool(b) => *b,
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Str(s) => !s.is_empty(),
        Value::List(items) => !items.borrow().is_empty(),
        Value::Dict(entries) => !entries.borrow().is_empty(),
        Value::Function(_) | Value::Class(_) | Value::Instance(_) => true,
    }
}

/// `==`: cross-kind equality is false except integer/float (numeric value)
/// and boolean/integer (boolean as 0/1).
/// Same-kind collections compare structurally; callables/instances/classes
/// compare by identity.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
            *a as f64 == *b
        }
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(a), Value::Integer(b)) | (Value::Integer(b), Value::Bool(a)) => {
            (*a as i64) == *b
        }
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::None, Value::None) => true,
        (Value::List(a), Value::List(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Value::Dict(a), Value::Dict(b)) => {
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len()
                && a.iter().all(|(k, v)| {
                    b.iter()
                        .any(|(bk, bv)| values_equal(k, bk) && values_equal(v, bv))
                })
        }
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// `<`, `>`, `<=`, `>=`: defined only between two numerics or two strings
/// (lexicographic); anything else is an evaluator error.
pub fn compare(a: &Value, b: &Value) -> Result<Ordering, String> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (a, b) if is_numeric(a) && is_numeric(b) => as_f64(a)
            .partial_cmp(&as_f64(b))
            .ok_or_else(|| "cannot compare NaN".to_string()),
        _ => Err(format!(
            "cannot compare {} and {}",
            a.kind_name(),
            b.kind_name()
        )),
    }
}

fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Float(_))
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        _ => unreachable!("as_f64 called on a non-numeric value"),
    }
}

/// `+`, `-`, `*`, `/`, `//`, `%`, `**` between two numerics, plus string/list
/// concatenation and integer-repeat.
pub fn add(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (a, b) if is_numeric(a) && is_numeric(b) => numeric_binop(a, b, |x, y| x + y, |x, y| x + y),
        _ => Err(format!("cannot add {} and {}", a.kind_name(), b.kind_name())),
    }
}

pub fn sub(a: &Value, b: &Value) -> Result<Value, String> {
    if is_numeric(a) && is_numeric(b) {
        numeric_binop(a, b, |x, y| x - y, |x, y| x - y)
    } else {
        Err(format!(
            "cannot subtract {} and {}",
            a.kind_name(),
            b.kind_name()
        ))
    }
}

pub fn mul(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Str(s), Value::Integer(n)) | (Value::Integer(n), Value::Str(s)) => {
            Ok(Value::Str(repeat(s, *n)))
        }
        (Value::List(items), Value::Integer(n)) | (Value::Integer(n), Value::List(items)) => {
            let base = items.borrow().clone();
            let mut result = Vec::new();
            for _ in 0..n.max(0) {
                result.extend(base.iter().cloned());
            }
            Ok(Value::list(result))
        }
        (a, b) if is_numeric(a) && is_numeric(b) => numeric_binop(a, b, |x, y| x * y, |x, y| x * y),
        _ => Err(format!(
            "cannot multiply {} and {}",
            a.kind_name(),
            b.kind_name()
        )),
    }
}

fn repeat(s: &str, n: i64) -> String {
    if n <= 0 {
        String::new()
    } else {
        s.repeat(n as usize)
    }
}

/// `/` always yields float.
pub fn div(a: &Value, b: &Value) -> Result<Value, String> {
    if !is_numeric(a) || !is_numeric(b) {
        return Err(format!("cannot divide {} and {}", a.kind_name(), b.kind_name()));
    }
    let divisor = as_f64(b);
    if divisor == 0.0 {
        return Err("division by zero".to_string());
    }
    Ok(Value::Float(as_f64(a) / divisor))
}

/// `//` yields integer when both operands are integer, float otherwise.
pub fn floor_div(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                return Err("division by zero".to_string());
            }
            Ok(Value::Integer(floor_div_i64(*a, *b)))
        }
        (a, b) if is_numeric(a) && is_numeric(b) => {
            let divisor = as_f64(b);
            if divisor == 0.0 {
                return Err("division by zero".to_string());
            }
            Ok(Value::Float((as_f64(a) / divisor).floor()))
        }
        _ => Err(format!(
            "cannot floor-divide {} and {}",
            a.kind_name(),
            b.kind_name()
        )),
    }
}

/// Floor division on integers: unlike `div_euclid` (whose remainder is
/// always non-negative), this rounds the quotient toward negative
/// infinity so the result matches `(a as f64 / b as f64).floor()` exactly,
/// including when `b` is negative.
fn floor_div_i64(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Modulo follows the sign of the divisor (mathematical modulo).
/// `rem_euclid` always returns a non-negative remainder, which only
/// matches this rule when the divisor is positive — adjust by `b` when the
/// divisor is negative so the result takes its sign instead.
pub fn modulo(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                return Err("modulo by zero".to_string());
            }
            let r = a % b;
            let r = if r != 0 && (r < 0) != (*b < 0) { r + b } else { r };
            Ok(Value::Integer(r))
        }
        (a, b) if is_numeric(a) && is_numeric(b) => {
            let divisor = as_f64(b);
            if divisor == 0.0 {
                return Err("modulo by zero".to_string());
            }
            let dividend = as_f64(a);
            Ok(Value::Float(dividend - divisor * (dividend / divisor).floor()))
        }
        _ => Err(format!(
            "cannot modulo {} and {}",
            a.kind_name(),
            b.kind_name()
        )),
    }
}

pub fn pow(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) if *b >= 0 => {
            Ok(Value::Integer(a.pow(*b as u32)))
        }
        (a, b) if is_numeric(a) && is_numeric(b) => Ok(Value::Float(as_f64(a).powf(as_f64(b)))),
        _ => Err(format!(
            "cannot raise {} to the power of {}",
            a.kind_name(),
            b.kind_name()
        )),
    }
}

fn numeric_binop(
    a: &Value,
    b: &Value,
    int_op: impl Fn(i64, i64) -> i64,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value, String> {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(int_op(*a, *b))),
        _ => Ok(Value::Float(float_op(as_f64(a), as_f64(b)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_integer_float_promotes_to_float() {
        let result = add(&Value::Integer(1), &Value::Float(2.5)).unwrap();
        match result {
            Value::Float(f) => assert_eq!(f, 3.5),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn floor_div_of_two_integers_stays_integer() {
        let result = floor_div(&Value::Integer(7), &Value::Integer(2)).unwrap();
        assert!(matches!(result, Value::Integer(3)));
    }

    #[test]
    fn modulo_follows_sign_of_divisor() {
        let result = modulo(&Value::Integer(-1), &Value::Integer(3)).unwrap();
        assert!(matches!(result, Value::Integer(2)));
    }

    #[test]
    fn modulo_with_a_negative_divisor_is_negative_or_zero() {
        let result = modulo(&Value::Integer(-1), &Value::Integer(-3)).unwrap();
        assert!(matches!(result, Value::Integer(-1)));
        let result = modulo(&Value::Integer(1), &Value::Integer(-3)).unwrap();
        assert!(matches!(result, Value::Integer(-2)));
    }

    #[test]
    fn floor_div_rounds_toward_negative_infinity_with_a_negative_divisor() {
        let result = floor_div(&Value::Integer(-7), &Value::Integer(-2)).unwrap();
        assert!(matches!(result, Value::Integer(3)));
        let result = floor_div(&Value::Integer(7), &Value::Integer(-2)).unwrap();
        assert!(matches!(result, Value::Integer(-4)));
    }

    #[test]
    fn bool_and_integer_are_equal_as_zero_or_one() {
        assert!(values_equal(&Value::Bool(true), &Value::Integer(1)));
        assert!(!values_equal(&Value::Bool(false), &Value::Integer(1)));
    }

    #[test]
    fn cross_kind_equality_is_false_outside_the_documented_pairs() {
        assert!(!values_equal(&Value::Str("1".into()), &Value::Integer(1)));
    }
}
