// Copyright 2024 pbcloud contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Projection and exact-match filtering of server summaries.
//!
//! Field names are an enumerated type rather than free-form strings, so a
//! typo in a field name is a parse error instead of a silently empty
//! projection.

use std::fmt;
use std::str::FromStr;

use super::servers::ServerInfo;
use super::{Error, ErrorKind, Result};

/// Name of a [`ServerInfo`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Server unique ID.
    Id,
    /// Server display name.
    Name,
    /// Number of CPU cores.
    Cores,
    /// RAM size in megabytes.
    Ram,
    /// Number of attached volumes.
    Disks,
    /// Total size of all attached volumes in gigabytes.
    Storage,
    /// Number of NICs.
    Nics,
    /// MAC addresses, one per NIC.
    Macs,
    /// Lifecycle state of the server resource.
    State,
    /// Power state of the virtual machine.
    VmState,
}

impl Field {
    /// All fields, in the order they appear in a full record.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::Name,
        Field::Cores,
        Field::Ram,
        Field::Disks,
        Field::Storage,
        Field::Nics,
        Field::Macs,
        Field::State,
        Field::VmState,
    ];

    /// The field name as used in output and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Cores => "cores",
            Field::Ram => "ram",
            Field::Disks => "disks",
            Field::Storage => "storage",
            Field::Nics => "nics",
            Field::Macs => "macs",
            Field::State => "state",
            Field::VmState => "vmstate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidInput, format!("unknown field name {}", s))
            })
    }
}

/// Value of a single [`ServerInfo`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A textual value (names, IDs, states).
    Str(String),
    /// A numeric value (counts and sizes).
    Int(u64),
    /// An ordered list of textual values (MAC addresses).
    List(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Value {
        Value::Int(value)
    }
}

impl ServerInfo {
    /// Get the value of a single field.
    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::Id => Value::Str(self.id.clone()),
            Field::Name => Value::Str(self.name.clone()),
            Field::Cores => Value::Int(u64::from(self.cores)),
            Field::Ram => Value::Int(self.ram),
            Field::Disks => Value::Int(self.disks as u64),
            Field::Storage => Value::Int(self.storage),
            Field::Nics => Value::Int(self.nics as u64),
            Field::Macs => Value::List(self.macs.clone()),
            Field::State => Value::Str(self.state.clone()),
            Field::VmState => Value::Str(self.vm_state.clone()),
        }
    }
}

/// A record projected onto a subset of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<(Field, Value)>);

impl Record {
    /// The projected fields, in projection order.
    pub fn fields(&self) -> &[(Field, Value)] {
        &self.0
    }

    /// Get the value of a field, if it survived the projection.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    /// Whether no field survived the projection.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, value) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Project records onto `select` fields, keeping only those matching all
/// `constraints`.
///
/// With `select` of `None` the full field set is kept. A record matches when
/// every constraint field compares equal to the required value; an empty
/// constraint list matches everything. Records projecting to nothing are
/// silently dropped. Input order is preserved.
pub fn select_where(
    info: &[ServerInfo],
    select: Option<&[Field]>,
    constraints: &[(Field, Value)],
) -> Vec<Record> {
    if info.is_empty() {
        return Vec::new();
    }
    // The field set is fixed once for the whole call.
    let select = select.unwrap_or(&Field::ALL);

    let mut result = Vec::new();
    for server in info {
        let matches = constraints
            .iter()
            .all(|(field, value)| server.get(*field) == *value);
        if !matches {
            continue;
        }
        let record = Record(select.iter().map(|&field| (field, server.get(field))).collect());
        if !record.is_empty() {
            result.push(record);
        }
    }
    result
}

/// Render records for output, one per line.
///
/// An empty result renders as an explicit marker line, so "nothing matched"
/// stays distinguishable from producing no output at all.
pub fn format_records(records: &[Record]) -> String {
    if records.is_empty() {
        String::from("no matching servers")
    } else {
        records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
pub mod test {
    #![allow(missing_docs)]

    use std::str::FromStr;

    use super::{format_records, select_where, Field, Value};
    use crate::servers::test::sample_info;
    use crate::ErrorKind;

    #[test]
    fn test_field_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_str(field.as_str()).unwrap(), field);
        }
        assert_eq!(Field::from_str("vmstate").unwrap(), Field::VmState);
    }

    #[test]
    fn test_field_unknown() {
        let err = Field::from_str("vm_state").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_input() {
        assert!(select_where(&[], None, &[]).is_empty());
        assert!(select_where(&[], Some(&[Field::Name]), &[(Field::Cores, Value::Int(2))])
            .is_empty());
    }

    #[test]
    fn test_no_select_no_constraints_keeps_everything() {
        let info = sample_info();
        let records = select_where(&info, None, &[]);
        assert_eq!(records.len(), info.len());
        for (record, server) in records.iter().zip(&info) {
            assert_eq!(record.fields().len(), Field::ALL.len());
            for field in Field::ALL {
                assert_eq!(record.get(field), Some(&server.get(field)));
            }
        }
    }

    #[test]
    fn test_select_and_constraint() {
        let info = sample_info();
        let records = select_where(&info, Some(&[Field::Name]), &[(Field::Cores, Value::Int(2))]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields(), &[(Field::Name, Value::from("Server1"))]);
    }

    #[test]
    fn test_constraint_without_match() {
        let info = sample_info();
        let records = select_where(&info, None, &[(Field::Cores, Value::Int(16))]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_multiple_constraints_must_all_match() {
        let info = sample_info();
        let records = select_where(
            &info,
            Some(&[Field::Id]),
            &[(Field::Cores, Value::Int(4)), (Field::Storage, Value::Int(50))],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::Id), Some(&Value::from("srv-2")));

        let records = select_where(
            &info,
            Some(&[Field::Id]),
            &[(Field::Cores, Value::Int(4)), (Field::Storage, Value::Int(10))],
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_projection_is_dropped() {
        let info = sample_info();
        let records = select_where(&info, Some(&[]), &[]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_list_values_match_exactly() {
        let info = sample_info();
        let records = select_where(
            &info,
            Some(&[Field::Name]),
            &[(Field::Macs, Value::List(vec![String::from("AA:BB:CC:00:00:01")]))],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::Name), Some(&Value::from("Server1")));
    }

    #[test]
    fn test_fixed_projection_without_constraints() {
        let info = sample_info();
        let select = [Field::Id, Field::Name, Field::State, Field::VmState, Field::Macs];
        let records = select_where(&info, Some(&select), &[]);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.fields().len(), select.len());
            assert_eq!(record.get(Field::Cores), None);
        }
        assert_eq!(records[1].get(Field::State), Some(&Value::from("BUSY")));
        assert_eq!(records[1].get(Field::VmState), Some(&Value::from("SHUTOFF")));
    }

    #[test]
    fn test_format_records_one_line_per_record() {
        let info = sample_info();
        let records = select_where(&info, Some(&[Field::Name]), &[]);
        assert_eq!(format_records(&records), "name=Server1\nname=Server2");
    }

    #[test]
    fn test_format_records_empty_result_marker() {
        let info = sample_info();
        let records = select_where(&info, None, &[(Field::Name, Value::from("NoSuchServer"))]);
        assert_eq!(format_records(&records), "no matching servers");
        assert_eq!(format_records(&[]), "no matching servers");
    }

    #[test]
    fn test_record_display() {
        let info = sample_info();
        let records = select_where(
            &info,
            Some(&[Field::Id, Field::Name, Field::State, Field::VmState, Field::Macs]),
            &[(Field::Name, Value::from("Server1"))],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_string(),
            "id=srv-1, name=Server1, state=AVAILABLE, vmstate=RUNNING, macs=[AA:BB:CC:00:00:01]"
        );
    }
}
