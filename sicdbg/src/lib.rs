use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
pub use serde_json::Error;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SdbLine {
    pub address: u32,
    pub text: String,
    pub line_number: usize,
}

/// Debug symbols for one assembled program: where every source line landed
/// and the address of every label.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sdb {
    pub name: String,
    pub start: u32,
    pub length: u32,
    pub lines: Vec<SdbLine>,
    pub address_map: BTreeMap<u32, usize>,
    pub labels: BTreeMap<String, u32>,
}

impl Sdb {
    pub fn new(name: &str, start: u32, length: u32) -> Self {
        Sdb {
            name: name.into(),
            start,
            length,
            lines: Vec::new(),
            address_map: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    pub fn to_string(&self) -> Result<String, Error> {
        serde_json::to_string(self)
    }

    pub fn from_string(dbg: &str) -> Result<Self, Error> {
        serde_json::from_str(dbg)
    }

    pub fn add_label(&mut self, label: String, address: u32) {
        self.labels.insert(label, address);
    }

    /// Later lines at the same address replace earlier ones in the address map,
    /// so a zero sized line is shadowed by the instruction that follows it.
    pub fn add_line(&mut self, address: u32, text: String, line_number: usize) {
        self.lines.push(SdbLine {
            address,
            text,
            line_number,
        });
        self.address_map.insert(address, self.lines.len() - 1);
    }

    pub fn line_at(&self, address: u32) -> Option<&SdbLine> {
        self.address_map
            .get(&address)
            .and_then(|index| self.lines.get(*index))
    }
}
