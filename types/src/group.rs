use derive_more::Display;

/// Satellite group name, derived from the catalog file name (e.g. `GPS-OPS`)
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display(fmt = "{}", _0)]
pub struct GroupName(String);

impl GroupName {
    pub fn new<S: Into<String>>(name: S) -> Self {
        GroupName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupName {
    fn from(value: &str) -> Self {
        GroupName(value.to_owned())
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Arena key for a single computed satellite record
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display(fmt = "{}[{}]", "group", "index")]
pub struct RecordKey {
    pub group: GroupName,
    /// Position of the record within its catalog, in file order
    pub index: usize,
}

impl RecordKey {
    pub fn new(group: GroupName, index: usize) -> Self {
        Self { group, index }
    }
}
