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
use k8s_openapi::api::core::v1::Pod;
use std::path::PathBuf;

/// Loads a caller-supplied base Pod from a YAML manifest, for the
/// [`with_base_pod`](crate::PodGenerator::with_base_pod) path.
///
/// The manifest must declare a `spec` with at least one container;
/// anything merged later attaches to the first one.
pub fn load_base_pod_from_file(file_path: &str) -> Result<Pod> {
    let path = resolve_template_path(file_path)?;

    if !path.exists() {
        return Err(PodGenError::ConfigError(format!(
            "Base Pod file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path)?;
    let pod: Pod = serde_yaml::from_str(&content)?;

    let has_container = pod
        .spec
        .as_ref()
        .is_some_and(|spec| !spec.containers.is_empty());
    if !has_container {
        return Err(PodGenError::ConfigError(format!(
            "Base Pod file {} must declare a spec with at least one container",
            path.display()
        )));
    }

    Ok(pod)
}

pub fn resolve_template_path(path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(path);

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| {
                PodGenError::ConfigError(format!("Cannot get current directory: {}", e))
            })?
            .join(path))
    }
}
