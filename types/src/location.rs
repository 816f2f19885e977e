use derive_more::Display;

/// Location data resolved from the caller's public IP address
#[derive(Clone, Eq, PartialEq, Hash, Debug, Display)]
#[display(fmt = "{}, {}", "city", "region")]
pub struct LocationRecord {
    pub city: String,
    pub region: String,

    /// Combined coordinate string, "lat,lon" [deg]
    pub loc: String,
}
