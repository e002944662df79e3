//! Algebraic operators

use rasalg_core::{Error, PixelType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary operation folded over the source list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Sum,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to an accumulated value and the next source value.
    ///
    /// Returns `None` when dividing by zero.
    #[inline]
    pub fn apply(self, acc: f64, value: f64) -> Option<f64> {
        match self {
            Operator::Sum => Some(acc + value),
            Operator::Subtract => Some(acc - value),
            Operator::Multiply => Some(acc * value),
            Operator::Divide => {
                if value == 0.0 {
                    None
                } else {
                    Some(acc / value)
                }
            }
        }
    }

    /// Left-to-right fold: `((v0 op v1) op v2) ...`
    ///
    /// `None` if any denominator is zero or `values` is empty.
    pub fn fold(self, values: &[f64]) -> Option<f64> {
        let (&first, rest) = values.split_first()?;
        rest.iter().try_fold(first, |acc, &v| self.apply(acc, v))
    }

    /// Pixel type of the result for sources of `input`
    pub fn output_type(self, input: PixelType) -> PixelType {
        match self {
            Operator::Divide => input.division_output(),
            _ => input,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Sum => "SUM",
            Operator::Subtract => "SUBTRACT",
            Operator::Multiply => "MULTIPLY",
            Operator::Divide => "DIVIDE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" | "add" | "+" => Ok(Operator::Sum),
            "subtract" | "sub" | "-" => Ok(Operator::Subtract),
            "multiply" | "mul" | "*" => Ok(Operator::Multiply),
            "divide" | "div" | "/" => Ok(Operator::Divide),
            _ => Err(Error::InvalidParameter {
                name: "operator",
                value: s.to_string(),
                reason: "expected one of SUM, SUBTRACT, MULTIPLY, DIVIDE".into(),
            }),
        }
    }
}
