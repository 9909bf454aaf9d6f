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

use crate::domain::model::traits::{pod_spec_mut, PodFragment};
use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, EmptyDirVolumeSource, HostPathVolumeSource,
    PersistentVolumeClaimVolumeSource, Pod, Volume as K8sVolume,
};

/// A named volume appended to the Pod's `spec.volumes` list.
///
/// Constructors cover the common volume sources; `from_k8s_obj` accepts
/// any pre-built source the constructors do not model.
#[derive(Debug, Clone)]
pub struct Volume {
    volume: K8sVolume,
}

impl Volume {
    pub fn host_path(name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        Self::validated(K8sVolume {
            name: name.into(),
            host_path: Some(HostPathVolumeSource {
                path: path.into(),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    pub fn empty_dir(name: impl Into<String>) -> Result<Self> {
        Self::validated(K8sVolume {
            name: name.into(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        })
    }

    pub fn config_map(
        name: impl Into<String>,
        config_map_name: impl Into<String>,
    ) -> Result<Self> {
        Self::validated(K8sVolume {
            name: name.into(),
            config_map: Some(ConfigMapVolumeSource {
                name: config_map_name.into(),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    pub fn persistent_volume_claim(
        name: impl Into<String>,
        claim_name: impl Into<String>,
    ) -> Result<Self> {
        Self::validated(K8sVolume {
            name: name.into(),
            persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                claim_name: claim_name.into(),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    pub fn from_k8s_obj(volume: K8sVolume) -> Result<Self> {
        Self::validated(volume)
    }

    pub fn name(&self) -> &str {
        &self.volume.name
    }

    pub fn to_k8s_client_obj(&self) -> K8sVolume {
        self.volume.clone()
    }

    fn validated(volume: K8sVolume) -> Result<Self> {
        if volume.name.is_empty() {
            return Err(PodGenError::config_error("volume name must not be empty"));
        }
        Ok(Self { volume })
    }
}

impl PodFragment for Volume {
    fn attach_to_pod(&self, mut pod: Pod) -> Result<Pod> {
        let spec = pod_spec_mut(&mut pod)?;
        spec.volumes
            .get_or_insert_with(Vec::new)
            .push(self.to_k8s_client_obj());
        Ok(pod)
    }
}
