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
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Pod, ResourceRequirements};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compute resource requests and limits for the main container.
///
/// Unlike the list-valued fragments this one owns a scalar field:
/// attaching replaces `spec.containers[0].resources` wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    pub request_cpu: Option<String>,
    pub request_memory: Option<String>,
    pub limit_cpu: Option<String>,
    pub limit_memory: Option<String>,
    pub limit_gpu: Option<String>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.request_cpu = Some(cpu.into());
        self
    }

    pub fn with_request_memory(mut self, memory: impl Into<String>) -> Self {
        self.request_memory = Some(memory.into());
        self
    }

    pub fn with_limit_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.limit_cpu = Some(cpu.into());
        self
    }

    pub fn with_limit_memory(mut self, memory: impl Into<String>) -> Self {
        self.limit_memory = Some(memory.into());
        self
    }

    pub fn with_limit_gpu(mut self, gpu: impl Into<String>) -> Self {
        self.limit_gpu = Some(gpu.into());
        self
    }

    pub fn to_k8s_client_obj(&self) -> ResourceRequirements {
        let mut requests = BTreeMap::new();
        if let Some(ref cpu) = self.request_cpu {
            requests.insert("cpu".to_string(), Quantity(cpu.clone()));
        }
        if let Some(ref memory) = self.request_memory {
            requests.insert("memory".to_string(), Quantity(memory.clone()));
        }

        let mut limits = BTreeMap::new();
        if let Some(ref cpu) = self.limit_cpu {
            limits.insert("cpu".to_string(), Quantity(cpu.clone()));
        }
        if let Some(ref memory) = self.limit_memory {
            limits.insert("memory".to_string(), Quantity(memory.clone()));
        }
        if let Some(ref gpu) = self.limit_gpu {
            limits.insert("nvidia.com/gpu".to_string(), Quantity(gpu.clone()));
        }

        ResourceRequirements {
            requests: (!requests.is_empty()).then_some(requests),
            limits: (!limits.is_empty()).then_some(limits),
            ..Default::default()
        }
    }
}

impl PodFragment for Resources {
    fn attach_to_pod(&self, mut pod: Pod) -> Result<Pod> {
        let container = main_container_mut(&mut pod)?;
        container.resources = Some(self.to_k8s_client_obj());
        Ok(pod)
    }
}
