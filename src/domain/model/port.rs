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
use k8s_openapi::api::core::v1::{ContainerPort, Pod};
use serde::{Deserialize, Serialize};

/// A named network port exposed by the main container.
///
/// The internal field is `container_port`; the wire form uses the
/// external schema's `containerPort` casing, which the conversion owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub name: String,
    pub container_port: i32,
}

impl Port {
    pub fn new(name: impl Into<String>, container_port: i32) -> Result<Self> {
        let port = Self {
            name: name.into(),
            container_port,
        };
        port.validate()?;
        Ok(port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PodGenError::config_error("port name must not be empty"));
        }
        if !(1..=65535).contains(&self.container_port) {
            return Err(PodGenError::ConfigError(format!(
                "containerPort out of range [1, 65535]: {}",
                self.container_port
            )));
        }
        Ok(())
    }

    pub fn to_k8s_client_obj(&self) -> ContainerPort {
        ContainerPort {
            name: Some(self.name.clone()),
            container_port: self.container_port,
            ..Default::default()
        }
    }
}

impl PodFragment for Port {
    fn attach_to_pod(&self, mut pod: Pod) -> Result<Pod> {
        let container = main_container_mut(&mut pod)?;
        container
            .ports
            .get_or_insert_with(Vec::new)
            .push(self.to_k8s_client_obj());
        Ok(pod)
    }
}
