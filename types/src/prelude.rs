pub use crate::group::{GroupName, RecordKey};
pub use crate::location::LocationRecord;
pub use crate::observer::Observer;
pub use crate::position::{LookAngle, SatellitePosition, SubPoint};
pub use crate::time::UtcTimestamp;
pub use crate::tle::UnstructuredTle;
