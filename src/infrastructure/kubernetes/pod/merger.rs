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

use crate::domain::model::PodFragment;
use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::Pod;
use tracing::debug;

/// Folds each fragment's contribution into `base`, in input order.
///
/// The merge is copy-on-merge: `base` is never mutated and the merged
/// Pod is returned as a new object, so the same base can be reused
/// across calls. Appended entries land after pre-existing ones; entries
/// already in `base` are never removed, reordered, or deduplicated, and
/// fields no fragment owns come through unchanged.
pub fn append_to_pod<F: PodFragment>(base: &Pod, fragments: &[F]) -> Result<Pod> {
    ensure_mergeable(base)?;

    let mut pod = base.clone();
    for fragment in fragments {
        pod = fragment.attach_to_pod(pod)?;
    }

    debug!("merged {} fragment(s) into Pod", fragments.len());
    Ok(pod)
}

// Container-scoped fragments need a container to land in; reject a
// structurally incomplete base before applying anything.
fn ensure_mergeable(base: &Pod) -> Result<()> {
    let spec = base
        .spec
        .as_ref()
        .ok_or_else(|| PodGenError::structure_error("Pod has no spec section"))?;

    if spec.containers.is_empty() {
        return Err(PodGenError::structure_error(
            "Pod spec has no container to attach to",
        ));
    }

    Ok(())
}
