//! Right-to-left function composition.
//!
//! ```rust
//! use std::sync::Arc;
//! use interpose::chain::{compose, Interposer};
//!
//! let add_one: Interposer<i32> = Arc::new(|x| x + 1);
//! let double: Interposer<i32> = Arc::new(|x| x * 2);
//!
//! // double runs first
//! let g = compose(vec![add_one, double]).unwrap();
//! assert_eq!(g(5), 11);
//! ```

use crate::error::{Error, Result};

use std::sync::Arc;

/// A shareable unary transformation.
pub type Interposer<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Composes `[f1, f2, ..., fn]` into `g(x) = f1(f2(...fn(x)...))`.
///
/// A single function is returned as-is, without wrapping. Composing an empty
/// list fails with [`Error::Configuration`].
pub fn compose<T: 'static>(mut fns: Vec<Interposer<T>>) -> Result<Interposer<T>> {
    match fns.len() {
        0 => Err(Error::Configuration(
            "cannot compose an empty list of interposers".to_string(),
        )),
        1 => Ok(fns.remove(0)),
        _ => Ok(Arc::new(move |input| {
            fns.iter().rev().fold(input, |acc, f| f(acc))
        })),
    }
}
