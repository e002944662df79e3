//! Parameters for a coverage algebra run

use super::nodata::NoDataRange;
use super::operator::Operator;
use super::roi::Roi;
use serde::{Deserialize, Serialize};

/// Everything that configures one algebra run besides the sources.
///
/// Built once through [`AlgebraParams::builder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgebraParams {
    operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roi: Option<Roi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nodata: Option<NoDataRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_nodata: Option<f64>,
}

impl AlgebraParams {
    pub fn builder(operator: Operator) -> AlgebraParamsBuilder {
        AlgebraParamsBuilder {
            params: AlgebraParams {
                operator,
                roi: None,
                nodata: None,
                destination_nodata: None,
            },
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Region of interest in world coordinates
    pub fn roi(&self) -> Option<&Roi> {
        self.roi.as_ref()
    }

    /// Explicit source no-data range
    pub fn nodata(&self) -> Option<NoDataRange> {
        self.nodata
    }

    /// Explicit value written to skipped pixels
    pub fn destination_nodata(&self) -> Option<f64> {
        self.destination_nodata
    }
}

impl Default for AlgebraParams {
    fn default() -> Self {
        Self::builder(Operator::Sum).build()
    }
}

/// Builder for [`AlgebraParams`]
#[derive(Debug, Clone)]
pub struct AlgebraParamsBuilder {
    params: AlgebraParams,
}

impl AlgebraParamsBuilder {
    pub fn roi(mut self, roi: impl Into<Roi>) -> Self {
        self.params.roi = Some(roi.into());
        self
    }

    pub fn nodata(mut self, range: NoDataRange) -> Self {
        self.params.nodata = Some(range);
        self
    }

    pub fn destination_nodata(mut self, value: f64) -> Self {
        self.params.destination_nodata = Some(value);
        self
    }

    pub fn build(self) -> AlgebraParams {
        self.params
    }
}
