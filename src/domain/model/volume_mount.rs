// Copyright 2025 JiangLong.
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

use crate::domain::model::traits::{main_container_mut, PodFragment};
use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::{Pod, VolumeMount as K8sVolumeMount};
use serde::{Deserialize, Serialize};

/// A mount of a named volume into the main container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

impl VolumeMount {
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> Result<Self> {
        let mount = Self {
            name: name.into(),
            mount_path: mount_path.into(),
            sub_path: None,
            read_only: false,
        };
        mount.validate()?;
        Ok(mount)
    }

    pub fn with_sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = Some(sub_path.into());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PodGenError::config_error(
                "volume mount name must not be empty",
            ));
        }
        if self.mount_path.is_empty() {
            return Err(PodGenError::config_error(
                "volume mount path must not be empty",
            ));
        }
        Ok(())
    }

    pub fn to_k8s_client_obj(&self) -> K8sVolumeMount {
        K8sVolumeMount {
            name: self.name.clone(),
            mount_path: self.mount_path.clone(),
            sub_path: self.sub_path.clone(),
            read_only: Some(self.read_only),
            ..Default::default()
        }
    }
}

impl PodFragment for VolumeMount {
    fn attach_to_pod(&self, mut pod: Pod) -> Result<Pod> {
        let container = main_container_mut(&mut pod)?;
        container
            .volume_mounts
            .get_or_insert_with(Vec::new)
            .push(self.to_k8s_client_obj());
        Ok(pod)
    }
}
