//! # Operators Module
//!
//! Operator tags routed through the kernel dispatchers.

use std::fmt;

/// Binary arithmetic operators. These support full broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Elementwise comparisons producing a `Bool` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

/// Elementwise logical operators over `Bool` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Xor,
}

/// Shape and dtype preserving elementwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Abs,
    Neg,
    Sqrt,
    Round,
    Floor,
    Ceil,
    Inv,
}

/// Whole-buffer reductions returning a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionOperator {
    Sum,
    Mean,
    Min,
    Max,
    Prod,
}

/// Flat, left-to-right cumulative scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOperator {
    CumSum,
    CumProd,
}

impl ArithmeticOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "add",
            ArithmeticOperator::Subtract => "subtract",
            ArithmeticOperator::Multiply => "multiply",
            ArithmeticOperator::Divide => "divide",
        }
    }
}

impl ComparisonOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "eq",
            ComparisonOperator::Neq => "neq",
            ComparisonOperator::Lt => "lt",
            ComparisonOperator::Lte => "lte",
            ComparisonOperator::Gt => "gt",
            ComparisonOperator::Gte => "gte",
        }
    }

    /// `Eq` and `Neq` are also defined between two `Bool` arrays.
    #[inline]
    pub fn accepts_bool(&self) -> bool {
        matches!(self, ComparisonOperator::Eq | ComparisonOperator::Neq)
    }
}

impl LogicalOperator {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Xor => "xor",
        }
    }
}

impl UnaryOperator {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperator::Abs => "abs",
            UnaryOperator::Neg => "neg",
            UnaryOperator::Sqrt => "sqrt",
            UnaryOperator::Round => "round",
            UnaryOperator::Floor => "floor",
            UnaryOperator::Ceil => "ceil",
            UnaryOperator::Inv => "inv",
        }
    }
}

impl ReductionOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ReductionOperator::Sum => "sum",
            ReductionOperator::Mean => "mean",
            ReductionOperator::Min => "min",
            ReductionOperator::Max => "max",
            ReductionOperator::Prod => "prod",
        }
    }
}

impl ScanOperator {
    pub fn name(&self) -> &'static str {
        match self {
            ScanOperator::CumSum => "cumsum",
            ScanOperator::CumProd => "cumprod",
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
