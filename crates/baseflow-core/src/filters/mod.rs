//! Sequential recursive baseflow filters.
//!
//! Every filter is a forward-in-time recurrence on the previous baseflow
//! value, clipped to the observed discharge each day.
pub mod digital;
pub mod lyne_hollick;

pub use digital::{Boughton, Chapman, ChapmanMaxwell, Eckhardt, Ewma, Furey, Ihacres, Willems};
pub use lyne_hollick::LyneHollick;
