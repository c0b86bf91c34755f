//! # **Print Module** - *Bounded Previews for Arrays*
//!
//! Contains the `Display` implementation for `NdArray`
//! and an additional `Print` trait which wraps it to provide
//! `myarr.print()` for any object that implements it.
use std::fmt::{self, Display, Formatter};

use crate::enums::array_data::ArrayData;
use crate::NdArray;

pub(crate) const MAX_PREVIEW: usize = 50;

/// # Print
///
/// Provides a more convenient way to activate `Display`
/// via `myarr.print()`, avoiding the need to write `println!("{}", myarr);`
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T where T: Display {}

impl Display for NdArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let n = self.len();
        writeln!(f, "NdArray<{}> {:?} ({} values)", self.dtype(), self.shape(), n)?;

        let max = n.min(MAX_PREVIEW);
        write!(f, "  [")?;
        for i in 0..max {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value_to_string(self.data(), i))?;
        }
        if n > MAX_PREVIEW {
            write!(f, ", … ({} more)", n - MAX_PREVIEW)?;
        }
        write!(f, "]")
    }
}

// Helper functions

pub(crate) fn value_to_string(data: &ArrayData, idx: usize) -> String {
    match data {
        ArrayData::Float64(v) => format_float(v[idx]),
        ArrayData::Float32(v) => format_float(v[idx] as f64),
        ArrayData::Bool(v) => v[idx].to_string(),
    }
}

pub(crate) fn format_float(v: f64) -> String {
    let s = format!("{:.6}", v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
