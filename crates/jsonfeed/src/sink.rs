use alloc::vec::Vec;

use crate::{Frame, Value, error::DecodeError};

/// Receives the values a [`Decoder`](crate::Decoder) completes.
///
/// `stack` lists the containers that are still open, outermost first, so the
/// immediate parent of `value` is `stack.last()`. A value nested inside a
/// container has already been stored in that parent when `on_value` runs. For
/// a top-level value `stack` is empty.
///
/// Any `FnMut(&Value, &[Frame])` closure is a sink.
pub trait ValueSink {
    /// Called once for every completed value.
    fn on_value(&mut self, value: &Value, stack: &[Frame]);

    /// Called with the error that halted the decoder, before it is returned
    /// to the caller.
    fn on_error(&mut self, error: &DecodeError) {
        let _ = error;
    }
}

impl<F> ValueSink for F
where
    F: FnMut(&Value, &[Frame]),
{
    fn on_value(&mut self, value: &Value, stack: &[Frame]) {
        self(value, stack);
    }
}

/// Collects a clone of every emitted value, nested ones included.
///
/// Each container is copied once for itself and once more for every
/// enclosing container, so deeply nested input is expensive here; prefer
/// [`Roots`] or a closure for such documents.
impl ValueSink for Vec<Value> {
    fn on_value(&mut self, value: &Value, _stack: &[Frame]) {
        self.push(value.clone());
    }
}

/// Collects top-level values only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roots {
    values: Vec<Value>,
}

impl Roots {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The values collected so far.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the collector.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl ValueSink for Roots {
    fn on_value(&mut self, value: &Value, stack: &[Frame]) {
        if stack.is_empty() {
            self.values.push(value.clone());
        }
    }
}
