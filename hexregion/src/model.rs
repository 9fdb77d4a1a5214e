use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GridError;

pub const MAX_RESOLUTION: u8 = 15;

// Canonical text buffer size of the original encoder (15 digits + slack + NUL).
pub const INDEX_TEXT_CAPACITY: usize = 17;

const RES_OFFSET: u64 = 52;
const RES_MASK: u64 = 0b1111 << RES_OFFSET;
const BASE_CELL_OFFSET: u64 = 45;
const BASE_CELL_MASK: u64 = 0b111_1111 << BASE_CELL_OFFSET;

fn parse_hex_index(s: &str) -> Option<NonZeroU64> {
    if s.is_empty() || s.len() >= INDEX_TEXT_CAPACITY {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(s, 16).ok().and_then(NonZeroU64::new)
}

/// A cell of the hexagonal grid.
///
/// The zero bit pattern is the reserved "no cell" sentinel and cannot be
/// represented, so `Option<CellIndex>` has the size of a raw `u64` and a
/// `None` slot is exactly the sentinel of a two-phase output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(NonZeroU64);

impl CellIndex {
    /// Wrap a raw value without any structural check. Returns `None` for zero.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    pub const fn raw(self) -> u64 {
        self.0.get()
    }

    /// Resolution field of the index (0 coarsest, 15 finest).
    pub const fn resolution(self) -> u8 {
        ((self.raw() & RES_MASK) >> RES_OFFSET) as u8
    }

    /// Base cell number (0..=121 for valid cells).
    pub const fn base_cell(self) -> u8 {
        ((self.raw() & BASE_CELL_MASK) >> BASE_CELL_OFFSET) as u8
    }

    /// Class III resolutions are rotated relative to their parent.
    pub const fn is_res_class_iii(self) -> bool {
        self.resolution() % 2 == 1
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.raw())
    }
}

impl FromStr for CellIndex {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_index(s)
            .map(Self)
            .ok_or_else(|| GridError::InvalidIndex(format!("failed to parse cell index '{}'", s)))
    }
}

impl From<CellIndex> for u64 {
    fn from(c: CellIndex) -> u64 {
        c.raw()
    }
}

/// An oriented edge between two neighboring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedEdgeIndex(NonZeroU64);

impl DirectedEdgeIndex {
    pub const fn from_raw(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    pub const fn raw(self) -> u64 {
        self.0.get()
    }

    pub const fn resolution(self) -> u8 {
        ((self.raw() & RES_MASK) >> RES_OFFSET) as u8
    }
}

impl fmt::Display for DirectedEdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.raw())
    }
}

impl FromStr for DirectedEdgeIndex {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_index(s).map(Self).ok_or_else(|| {
            GridError::InvalidIndex(format!("failed to parse directed edge '{}'", s))
        })
    }
}

impl From<DirectedEdgeIndex> for u64 {
    fn from(e: DirectedEdgeIndex) -> u64 {
        e.raw()
    }
}

// Indexes travel as canonical text: JSON numbers cannot carry 64 bits in JS.
struct RawIndexVisitor;

impl<'de> Visitor<'de> for RawIndexVisitor {
    type Value = NonZeroU64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-zero index as hex text or unsigned integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_hex_index(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        NonZeroU64::new(v).ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }
}

impl Serialize for CellIndex {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellIndex {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(RawIndexVisitor).map(Self)
    }
}

impl Serialize for DirectedEdgeIndex {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DirectedEdgeIndex {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(RawIndexVisitor).map(Self)
    }
}

/// Geographic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn to_coord(self) -> GeoCoord {
        GeoCoord {
            lat: self.lat.to_radians(),
            lng: self.lon.to_radians(),
        }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Finite, with latitude in [-90, 90]. Longitude may wrap.
    pub fn is_in_range(self) -> bool {
        self.is_finite() && self.lat.abs() <= 90.0
    }
}

/// Geographic coordinate in radians, the form the provider and the
/// algorithms work in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_point(self) -> GeoPoint {
        GeoPoint {
            lat: self.lat.to_degrees(),
            lon: self.lng.to_degrees(),
        }
    }
}

/// Implicitly closed loop of vertices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellBoundary {
    pub vertices: Vec<GeoPoint>,
}

impl CellBoundary {
    pub fn new(vertices: Vec<GeoPoint>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn from_coords(coords: &[GeoCoord]) -> Self {
        Self {
            vertices: coords.iter().map(|c| c.to_point()).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub outer: CellBoundary,
    #[serde(default)]
    pub holes: Vec<CellBoundary>,
}

impl Polygon {
    pub fn new(outer: CellBoundary, holes: Vec<CellBoundary>) -> Self {
        Self { outer, holes }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Local planar coordinates, meaningful only near their origin cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIj {
    pub i: i32,
    pub j: i32,
}

impl GridIj {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    Km2 = 0,
    M2 = 1,
    Rads2 = 2,
}

impl TryFrom<i64> for AreaUnit {
    type Error = GridError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(AreaUnit::Km2),
            1 => Ok(AreaUnit::M2),
            2 => Ok(AreaUnit::Rads2),
            _ => Err(GridError::UnsupportedUnit(format!(
                "area unit {} (must be one of Km2=0, M2=1, Rads2=2)",
                v
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Km = 0,
    M = 1,
    Rads = 2,
}

impl TryFrom<i64> for LengthUnit {
    type Error = GridError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(LengthUnit::Km),
            1 => Ok(LengthUnit::M),
            2 => Ok(LengthUnit::Rads),
            _ => Err(GridError::UnsupportedUnit(format!(
                "length unit {} (must be one of Km=0, M=1, Rads=2)",
                v
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_cell() {
        assert!(CellIndex::from_raw(0).is_none());
        assert_eq!(
            std::mem::size_of::<Option<CellIndex>>(),
            std::mem::size_of::<u64>()
        );
    }

    #[test]
    fn bit_fields() {
        let c = CellIndex::from_raw(0x8928308280fffff).unwrap();
        assert_eq!(c.resolution(), 9);
        assert_eq!(c.base_cell(), 20);
        assert!(c.is_res_class_iii());
        assert_eq!(c.to_string(), "8928308280fffff");
    }

    #[test]
    fn text_parse_rejects_garbage() {
        assert!("".parse::<CellIndex>().is_err());
        assert!("xyz".parse::<CellIndex>().is_err());
        assert!("0".parse::<CellIndex>().is_err());
        assert!("1ffffffffffffffff".parse::<CellIndex>().is_err());
        assert!("8928308280FFFFF".parse::<CellIndex>().is_ok());
    }

    #[test]
    fn serde_accepts_text_and_integers() {
        let c: CellIndex = serde_json::from_str("\"8928308280fffff\"").unwrap();
        let n: CellIndex = serde_json::from_str("617700169958293503").unwrap();
        assert_eq!(c, n);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"8928308280fffff\"");
        assert!(serde_json::from_str::<CellIndex>("0").is_err());
        assert!(serde_json::from_str::<CellIndex>("-5").is_err());
    }

    #[test]
    fn unit_codes() {
        assert_eq!(AreaUnit::try_from(2).unwrap(), AreaUnit::Rads2);
        assert!(matches!(
            LengthUnit::try_from(7),
            Err(GridError::UnsupportedUnit(_))
        ));
    }
}
