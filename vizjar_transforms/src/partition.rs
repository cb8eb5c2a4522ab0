// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping rows by key fields.
//!
//! Two flavors are provided:
//! - [`partition`] groups by one or more fields using a composite string key, and
//! - [`aggregate`] groups by the raw value of a single field, leaving room for a per-group
//!   summary row.
//!
//! Both preserve the first-seen order of groups and the input order of rows inside a group.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use vizjar_core::{Datum, Value};

/// Sentinel group key used when no grouping field is configured.
pub const MAIN_GROUP: &str = "__main";

/// Grouping specification: which fields define group membership.
///
/// A specification is valid if it is a non-blank field name or a non-empty list of non-blank
/// field names. Anything else falls back to a single group holding every row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupBy {
    /// No grouping: a single group.
    #[default]
    None,
    /// Group by a single field.
    Field(String),
    /// Group by several fields (composite key, in order).
    Fields(Vec<String>),
}

impl GroupBy {
    /// Returns the grouping field names if this specification is valid.
    pub fn fields(&self) -> Option<SmallVec<[&str; 2]>> {
        match self {
            Self::None => None,
            Self::Field(f) => (!f.trim().is_empty()).then(|| smallvec::smallvec![f.as_str()]),
            Self::Fields(fs) => {
                if fs.is_empty() || fs.iter().any(|f| f.trim().is_empty()) {
                    None
                } else {
                    Some(fs.iter().map(String::as_str).collect())
                }
            }
        }
    }

    /// Returns `true` if this specification defines at least one grouping field.
    pub fn is_valid(&self) -> bool {
        self.fields().is_some()
    }
}

impl From<&str> for GroupBy {
    fn from(value: &str) -> Self {
        Self::Field(value.into())
    }
}

impl From<String> for GroupBy {
    fn from(value: String) -> Self {
        Self::Field(value)
    }
}

impl From<Vec<String>> for GroupBy {
    fn from(value: Vec<String>) -> Self {
        Self::Fields(value)
    }
}

impl From<Vec<&str>> for GroupBy {
    fn from(value: Vec<&str>) -> Self {
        Self::Fields(value.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for GroupBy {
    fn from(value: [&str; N]) -> Self {
        Self::Fields(value.into_iter().map(Into::into).collect())
    }
}

/// Rows split into groups.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition<'a> {
    /// Groups in first-seen order; rows keep their input order.
    pub groups: Vec<Vec<&'a Datum>>,
    /// The grouping fields in effect (empty when the specification was invalid).
    pub groupby: SmallVec<[String; 2]>,
}

/// Splits `data` into groups sharing equal values across the `groupby` fields.
///
/// The group key joins each field's display form with `.`. An invalid specification yields
/// exactly one group containing all rows (even when `data` is empty).
pub fn partition<'a>(data: &'a [Datum], groupby: &GroupBy) -> Partition<'a> {
    let Some(fields) = groupby.fields() else {
        if *groupby != GroupBy::None {
            tracing::debug!(?groupby, "invalid groupby, using a single group");
        }
        return Partition {
            groups: alloc::vec![data.iter().collect()],
            groupby: SmallVec::new(),
        };
    };

    let mut groups: Vec<Vec<&'a Datum>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for datum in data {
        let i = *index.entry(group_key(datum, &fields)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[i].push(datum);
    }

    Partition {
        groups,
        groupby: fields.iter().map(|f| (*f).to_string()).collect(),
    }
}

fn group_key(datum: &Datum, fields: &[&str]) -> String {
    let mut key = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            key.push('.');
        }
        key.push_str(&datum.value(field).to_string());
    }
    key
}

/// Key of an [`Aggregation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AggregationKey {
    /// The sentinel key used when no grouping field is configured.
    Main,
    /// A raw field value.
    Value(Value),
}

impl AggregationKey {
    /// Returns this key as a value (the sentinel reads as [`MAIN_GROUP`]).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Main => Value::from(MAIN_GROUP),
            Self::Value(v) => v.clone(),
        }
    }
}

/// One aggregation group: its key, its rows and a caller-populated summary.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregation<'a> {
    /// Group key.
    pub key: AggregationKey,
    /// Rows of this group, in input order.
    pub items: Vec<&'a Datum>,
    /// Summary fields, filled in by the caller.
    pub summary: Datum,
}

/// The groups produced by [`aggregate`], in first-seen key order.
#[derive(Clone, Debug)]
pub struct Aggregations<'a> {
    field: Option<String>,
    entries: Vec<Aggregation<'a>>,
    index: HashMap<AggregationKey, usize>,
}

impl<'a> Aggregations<'a> {
    /// Returns the groups in first-seen order.
    pub fn entries(&self) -> &[Aggregation<'a>] {
        &self.entries
    }

    /// Returns the groups mutably (to fill in summaries).
    pub fn entries_mut(&mut self) -> &mut [Aggregation<'a>] {
        &mut self.entries
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the group with the given key.
    pub fn get(&self, key: &AggregationKey) -> Option<&Aggregation<'a>> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Returns the key a row belongs to.
    pub fn key_for(&self, datum: &Datum) -> AggregationKey {
        key_for(self.field.as_deref(), datum)
    }

    /// Returns the group a row belongs to.
    pub fn group_of(&self, datum: &Datum) -> Option<&Aggregation<'a>> {
        self.get(&self.key_for(datum))
    }
}

fn key_for(field: Option<&str>, datum: &Datum) -> AggregationKey {
    match field {
        Some(f) => AggregationKey::Value(datum.value(f).clone()),
        None => AggregationKey::Main,
    }
}

/// Groups rows by the raw value of `field`.
///
/// With no field (or the [`MAIN_GROUP`] sentinel as the field name) every row lands in one
/// group keyed [`AggregationKey::Main`]. Summaries are left empty.
pub fn aggregate<'a>(data: &'a [Datum], field: Option<&str>) -> Aggregations<'a> {
    let field = field.filter(|f| *f != MAIN_GROUP);
    let mut entries: Vec<Aggregation<'a>> = Vec::new();
    let mut index: HashMap<AggregationKey, usize> = HashMap::new();
    for datum in data {
        let key = key_for(field, datum);
        let i = *index.entry(key.clone()).or_insert_with(|| {
            entries.push(Aggregation {
                key,
                items: Vec::new(),
                summary: Datum::new(),
            });
            entries.len() - 1
        });
        entries[i].items.push(datum);
    }
    Aggregations {
        field: field.map(Into::into),
        entries,
        index,
    }
}
