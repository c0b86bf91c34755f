//! # ndvek
//!
//! Dense N-dimensional `f64`/`f32`/`bool` arrays over 64-byte aligned
//! `Vec64` buffers, with NumPy-style broadcasting for arithmetic.
//!
//! ## Layout
//! - [`enums`] - dtype tags, the tagged buffer union, operator tags and the error type.
//! - [`structs`] - the [`NdArray`] container and its public operations.
//! - [`kernels`] - shape algebra, broadcast index mapping, dispatch, and the
//!   contiguous buffer primitives everything runs on.
//! - [`traits`] - the element `Float` trait and printing.
//!
//! ## Features
//! - `parallel_proc` - splits large elementwise and broadcast loops across
//!   threads with *Rayon*. Results are identical to the serial path.
//!
//! ## Example
//! ```rust
//! use ndvek::{NdArray, Print};
//!
//! let a = NdArray::from_f64([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let row = NdArray::from_f64([3], vec![10.0, 20.0, 30.0]).unwrap();
//! let out = (&a + &row).unwrap();
//! assert_eq!(out.get(&[1, 2]).unwrap(), 36.0);
//! out.print();
//! ```

pub mod enums {
    pub mod array_data;
    pub mod dtype;
    pub mod error;
    pub mod operators;
}

pub mod structs {
    pub mod nd_array;
}

pub mod kernels {
    pub mod aggregate;
    pub mod broadcast;
    pub mod routing;
    pub mod vector;
}

pub mod traits {
    pub mod print;
    pub mod type_unions;
}

pub use enums::array_data::ArrayData;
pub use enums::dtype::DType;
pub use enums::error::{NdError, Result};
pub use enums::operators::{
    ArithmeticOperator, ComparisonOperator, LogicalOperator, ReductionOperator, ScanOperator,
    UnaryOperator,
};
pub use structs::nd_array::NdArray;
pub use traits::print::Print;
pub use traits::type_unions::Float;

pub use vec64::Vec64;
