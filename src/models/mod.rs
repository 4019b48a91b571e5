pub mod cell;
pub mod range;
pub mod sheet;

pub use cell::RawValue;
pub use range::{default_ranges, RangeTable, StationRange};
pub use sheet::{CleanedSheet, Column, NumericColumn, RawSheet, TimestampColumn};
