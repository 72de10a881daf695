//! Loaders and the shared identifier machinery both dashboards join on.

pub mod codes;
pub mod index;
pub mod metadata;
pub mod normalize;
pub mod reshape;
pub mod resolver;
pub mod series;
pub mod table;
pub mod topology;

pub use codes::CountryCode;
pub use index::{FeatureIndex, IdentifierIndex};
pub use metadata::{CountryRecord, CountryTable};
pub use reshape::{reshape, reshape_with_report, ReshapeReport};
pub use resolver::{CountryResolver, IdentifierCandidates, Resolution};
pub use series::{Indicator, SeriesTable, YearSeries};
pub use table::{RawRow, RawTable};
pub use topology::{GeoFeature, Topology};
