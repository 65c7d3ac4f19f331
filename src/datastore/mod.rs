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

//! Datastore listing module.
//!
//! This module provides the snapshot data model and the reader that
//! obtains it from vSphere through govc.

pub mod info;
pub mod reader;

pub use info::{DatastoreInfo, VolumeSnapshot};
pub use reader::{create_snapshot_source, GovcReader, SnapshotSource};
