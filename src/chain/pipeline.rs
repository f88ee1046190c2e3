//! Named, inspectable interposer pipelines.
//!
//! A [`Pipeline`] keeps the ordered list of [`Stage`]s it was built from next
//! to the composed function, so the chain order can be inspected and tested
//! while calls still go through a single composed callable.

use super::compose::{compose, Interposer};
use crate::error::Result;

use std::fmt;
use std::sync::Arc;

/// A single named transformation in a [`Pipeline`].
pub struct Stage<T> {
    name: String,
    func: Interposer<T>,
}

impl<T> Stage<T> {
    /// Creates a stage from a closure.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Creates a stage around an existing interposer without re-wrapping it.
    pub fn from_interposer(name: impl Into<String>, func: Interposer<T>) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    /// Gets the stage name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the underlying interposer.
    pub fn interposer(&self) -> &Interposer<T> {
        &self.func
    }

    /// Runs this stage on its own.
    pub fn apply(&self, input: T) -> T {
        (self.func)(input)
    }
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// An ordered chain of stages applied right to left.
///
/// The last registered stage sees the input first. A pipeline is never
/// mutated in place; recomposing builds a new one.
pub struct Pipeline<T> {
    stages: Vec<Stage<T>>,
    composed: Interposer<T>,
}

impl<T: 'static> Pipeline<T> {
    /// Builds a pipeline from at least one stage.
    pub fn compose(stages: Vec<Stage<T>>) -> Result<Self> {
        let composed = compose(stages.iter().map(|s| Arc::clone(&s.func)).collect())?;
        Ok(Self { stages, composed })
    }

    /// A single pass-through stage.
    pub fn identity() -> Self {
        let stage = Stage::new("identity", |input| input);
        Self {
            composed: Arc::clone(&stage.func),
            stages: vec![stage],
        }
    }

    /// Runs the composed chain.
    pub fn apply(&self, input: T) -> T {
        (self.composed)(input)
    }

    /// Stage names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Gets the stages in registration order.
    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false: an empty pipeline cannot be built.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Gets the composed callable.
    pub fn as_interposer(&self) -> &Interposer<T> {
        &self.composed
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
            composed: Arc::clone(&self.composed),
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
