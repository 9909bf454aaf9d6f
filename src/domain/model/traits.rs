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

use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};

/// A self-contained piece of Pod specification that can fold its
/// contribution into a base Pod object.
///
/// Attaching is purely additive on list-valued fields: entries are
/// appended after whatever the Pod already carries, and fields the
/// fragment does not own are left untouched.
pub trait PodFragment {
    fn attach_to_pod(&self, pod: Pod) -> Result<Pod>;
}

pub(crate) fn pod_spec_mut(pod: &mut Pod) -> Result<&mut PodSpec> {
    pod.spec
        .as_mut()
        .ok_or_else(|| PodGenError::structure_error("Pod has no spec section"))
}

pub(crate) fn main_container_mut(pod: &mut Pod) -> Result<&mut Container> {
    pod_spec_mut(pod)?.containers.first_mut().ok_or_else(|| {
        PodGenError::structure_error("Pod spec has no container to attach to")
    })
}
