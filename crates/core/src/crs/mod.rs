//! Coordinate Reference System handling
//!
//! The CRS catalog and transform lookup live outside this crate. Here a
//! [`CRS`] is an identifier with an equality predicate, and
//! [`TransformFinder`] is the seam through which callers plug in their
//! transform machinery.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate Reference System representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CRS {
    /// WKT representation (primary)
    wkt: Option<String>,
    /// EPSG code if known
    epsg: Option<u32>,
    /// PROJ string if available
    proj: Option<String>,
    /// Human readable name, ignored by [`CRS::equals_ignore_metadata`]
    #[serde(default)]
    name: Option<String>,
}

impl CRS {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            wkt: None,
            epsg: Some(code),
            proj: None,
            name: None,
        }
    }

    /// Create a CRS from a WKT string
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: Some(wkt.into()),
            epsg: None,
            proj: None,
            name: None,
        }
    }

    /// Create a CRS from a PROJ string
    pub fn from_proj(proj: impl Into<String>) -> Self {
        Self {
            wkt: None,
            epsg: None,
            proj: Some(proj.into()),
            name: None,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326).with_name("WGS 84")
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::from_epsg(3857).with_name("WGS 84 / Pseudo-Mercator")
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Get WKT representation
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Get PROJ string
    pub fn proj(&self) -> Option<&str> {
        self.proj.as_deref()
    }

    /// Get the display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if two CRS describe the same reference frame, ignoring names.
    ///
    /// EPSG codes win when both sides have one. WKT is compared with
    /// whitespace removed, PROJ strings as unordered sets of `+key=value`
    /// tokens.
    pub fn equals_ignore_metadata(&self, other: &CRS) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }

        if let (Some(a), Some(b)) = (&self.wkt, &other.wkt) {
            return strip_whitespace(a) == strip_whitespace(b);
        }

        if let (Some(a), Some(b)) = (&self.proj, &other.proj) {
            return proj_tokens(a) == proj_tokens(b);
        }

        false
    }

    /// Get a string identifier for this CRS
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{}", code);
        }
        if let Some(proj) = &self.proj {
            return proj.clone();
        }
        if let Some(wkt) = &self.wkt {
            let end = wkt
                .char_indices()
                .nth(50)
                .map(|(i, _)| i)
                .unwrap_or(wkt.len());
            return format!("WKT:{}", &wkt[..end]);
        }
        "Unknown".to_string()
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn proj_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

impl fmt::Display for CRS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Default for CRS {
    fn default() -> Self {
        Self::wgs84()
    }
}

/// A coordinate operation between two reference systems.
pub trait CoordinateOperation: Send + Sync {
    /// Whether the operation leaves every coordinate unchanged
    fn is_identity(&self) -> bool;

    /// Transform a single coordinate
    fn transform(&self, x: f64, y: f64) -> (f64, f64);
}

/// The identity operation
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOperation;

impl CoordinateOperation for IdentityOperation {
    fn is_identity(&self) -> bool {
        true
    }

    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

/// Looks up the coordinate operation between two reference systems.
///
/// `Ok(None)` means no operation is known. Errors are reserved for lookup
/// failures such as an unreachable catalog.
pub trait TransformFinder: Send + Sync {
    fn find_transform(
        &self,
        source: &CRS,
        target: &CRS,
    ) -> Result<Option<Box<dyn CoordinateOperation>>>;
}

/// EPSG codes that name the same spherical mercator definition
const WEB_MERCATOR_ALIASES: &[u32] = &[3857, 900913, 3785, 102100, 102113];

/// Finder that only knows EPSG aliases of one definition.
///
/// Equal or aliased codes resolve to [`IdentityOperation`]; everything else
/// has no known operation.
#[derive(Debug, Clone, Default)]
pub struct AliasTransformFinder {
    groups: Vec<Vec<u32>>,
}

impl AliasTransformFinder {
    /// Finder with the built-in web mercator alias group
    pub fn new() -> Self {
        Self {
            groups: vec![WEB_MERCATOR_ALIASES.to_vec()],
        }
    }

    /// Register an additional group of interchangeable EPSG codes
    pub fn with_group(mut self, codes: impl IntoIterator<Item = u32>) -> Self {
        self.groups.push(codes.into_iter().collect());
        self
    }

    fn aliased(&self, a: u32, b: u32) -> bool {
        a == b
            || self
                .groups
                .iter()
                .any(|g| g.contains(&a) && g.contains(&b))
    }
}

impl TransformFinder for AliasTransformFinder {
    fn find_transform(
        &self,
        source: &CRS,
        target: &CRS,
    ) -> Result<Option<Box<dyn CoordinateOperation>>> {
        if source.equals_ignore_metadata(target) {
            return Ok(Some(Box::new(IdentityOperation)));
        }
        match (source.epsg(), target.epsg()) {
            (Some(a), Some(b)) if self.aliased(a, b) => Ok(Some(Box::new(IdentityOperation))),
            _ => Ok(None),
        }
    }
}

/// Whether two optional reference systems describe the same frame.
///
/// Equal ignoring metadata, or related by an operation the finder reports
/// as the identity. Two absent systems are compatible; one absent is not.
pub fn crs_compatible(a: Option<&CRS>, b: Option<&CRS>, finder: &dyn TransformFinder) -> Result<bool> {
    match (a, b) {
        (None, None) => Ok(true),
        (Some(a), Some(b)) => {
            if a.equals_ignore_metadata(b) {
                return Ok(true);
            }
            Ok(finder
                .find_transform(a, b)?
                .map(|op| op.is_identity())
                .unwrap_or(false))
        }
        _ => Ok(false),
    }
}
