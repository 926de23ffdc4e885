pub mod aggregate;

pub use aggregate::{
    Part, PartDto, PartListQuery, PartOrdering, PartSummary, PartType, PartTypeFilterRequest,
    Turnover,
};
