//! Recoverable fault demonstrations.
//!
//! Out-of-range access, integer overflow and a user-defined fault, each
//! surfaced as a `FaultError` value and handled where it occurs.

use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaultError {
    #[error("Index out of range: index {index} but length is {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Overflow: {value} + 1 does not fit in i32")]
    Overflow { value: i32 },

    #[error("{0}")]
    Custom(String),
}

/// Bounds-checked element access.
pub fn element_at(values: &[i32], index: usize) -> Result<i32, FaultError> {
    values
        .get(index)
        .copied()
        .ok_or(FaultError::IndexOutOfRange {
            index,
            len: values.len(),
        })
}

/// Increment that reports overflow instead of wrapping.
pub fn checked_increment(value: i32) -> Result<i32, FaultError> {
    value.checked_add(1).ok_or(FaultError::Overflow { value })
}

/// Increment that wraps on overflow (`i32::MAX + 1 == i32::MIN`).
pub fn wrapping_increment(value: i32) -> i32 {
    value.wrapping_add(1)
}

/// Always fails with the user-defined fault.
pub fn refuse(message: &str) -> Result<(), FaultError> {
    Err(FaultError::Custom(message.to_string()))
}

/// Run the three demonstrations, writing what was caught to `sink`.
/// Returns the caught faults in order.
pub fn run_fault_demos<W: Write + ?Sized>(sink: &mut W) -> io::Result<Vec<FaultError>> {
    let mut caught = Vec::new();
    writeln!(sink, "Faults:")?;

    let numbers = [1, 2, 3];
    match element_at(&numbers, 10) {
        Ok(v) => writeln!(sink, "{v}")?,
        Err(e) => {
            writeln!(sink, "Index out of range")?;
            writeln!(sink, "{e:?}")?;
            caught.push(e);
        }
    }
    // runs whichever arm was taken above
    writeln!(sink, "bounds check finished")?;
    writeln!(sink)?;

    match checked_increment(i32::MAX) {
        Ok(v) => writeln!(sink, "{v}")?,
        Err(e) => {
            writeln!(sink, "Overflow")?;
            writeln!(sink, "{e:?}")?;
            writeln!(sink, "(wrapping would give {})", wrapping_increment(i32::MAX))?;
            caught.push(e);
        }
    }

    if let Err(e) = refuse("That won't work") {
        writeln!(sink, "{e}")?;
        caught.push(e);
    }
    writeln!(sink)?;

    Ok(caught)
}
