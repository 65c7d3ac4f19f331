// Copyright 2026 The vsphere-ds-check Authors
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

use serde::Deserialize;

/// Space figures for one datastore, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreInfo {
    pub name: String,
    pub free_space_bytes: i64,
    pub capacity_bytes: i64,
}

impl DatastoreInfo {
    pub fn new(name: impl Into<String>, free_space_bytes: i64, capacity_bytes: i64) -> Self {
        Self {
            name: name.into(),
            free_space_bytes,
            capacity_bytes,
        }
    }
}

/// Point-in-time listing of every datastore visible to the vSphere user,
/// in the order govc reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeSnapshot {
    datastores: Vec<DatastoreInfo>,
}

/// JSON structures for `govc datastore.info -json` output. Older govc
/// releases capitalize the field names.
#[derive(Debug, Deserialize)]
struct GovcDatastoreInfoJson {
    #[serde(alias = "Datastores")]
    datastores: Option<Vec<GovcDatastoreJson>>,
}

#[derive(Debug, Deserialize)]
struct GovcDatastoreJson {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Summary")]
    summary: GovcDatastoreSummaryJson,
}

#[derive(Debug, Deserialize)]
struct GovcDatastoreSummaryJson {
    #[serde(rename = "freeSpace", alias = "FreeSpace")]
    free_space: i64,
    #[serde(alias = "Capacity")]
    capacity: i64,
}

impl VolumeSnapshot {
    /// Decode the output of `govc datastore.info -json`.
    ///
    /// `"datastores": null` is what govc prints when nothing matched, and
    /// decodes as an empty snapshot. Missing names or sizes are an error.
    pub fn from_govc_json(json: &str) -> Result<Self, serde_json::Error> {
        let info: GovcDatastoreInfoJson = serde_json::from_str(json)?;
        Ok(info
            .datastores
            .unwrap_or_default()
            .into_iter()
            .map(|ds| DatastoreInfo {
                name: ds.name,
                free_space_bytes: ds.summary.free_space,
                capacity_bytes: ds.summary.capacity,
            })
            .collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatastoreInfo> {
        self.datastores.iter()
    }

    pub fn len(&self) -> usize {
        self.datastores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datastores.is_empty()
    }
}

impl FromIterator<DatastoreInfo> for VolumeSnapshot {
    fn from_iter<I: IntoIterator<Item = DatastoreInfo>>(iter: I) -> Self {
        Self {
            datastores: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VolumeSnapshot {
    type Item = &'a DatastoreInfo;
    type IntoIter = std::slice::Iter<'a, DatastoreInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
