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

use crate::infrastructure::kubernetes::pod::identity::{PodUidSource, RandomUidSource};
use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::{Container, EnvVar, LocalObjectReference, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

// Kubernetes caps object names at DNS subdomain length.
const MAX_POD_ID_LEN: usize = 253;

const VALID_IMAGE_PULL_POLICIES: [&str; 3] = ["Always", "IfNotPresent", "Never"];
const VALID_RESTART_POLICIES: [&str; 3] = ["Always", "OnFailure", "Never"];

/// Assembles a base Pod wire object from a container image and a base
/// name, plus optional overrides.
///
/// Every generated Pod carries a fresh unique name (`<name>-<32 hex>`)
/// and has all list-valued fields present as empty lists, so the object
/// is schema-valid before any fragment is merged in.
pub struct PodGenerator {
    image: String,
    name: String,
    namespace: Option<String>,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    cmds: Vec<String>,
    args: Vec<String>,
    envs: Vec<EnvVar>,
    image_pull_policy: Option<String>,
    restart_policy: Option<String>,
    image_pull_secrets: Vec<String>,
    service_account_name: Option<String>,
    node_selector: BTreeMap<String, String>,
    host_network: bool,
    base_pod: Option<Pod>,
}

impl PodGenerator {
    pub fn new(image: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            name: name.into(),
            namespace: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            cmds: Vec::new(),
            args: Vec::new(),
            envs: Vec::new(),
            image_pull_policy: None,
            restart_policy: None,
            image_pull_secrets: Vec::new(),
            service_account_name: None,
            node_selector: BTreeMap::new(),
            host_network: false,
            base_pod: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels.extend(labels);
        self
    }

    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn with_command(mut self, cmds: Vec<String>) -> Self {
        self.cmds = cmds;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Appends one plain-value environment variable. Calls are kept in
    /// order, so generation stays deterministic.
    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push(EnvVar {
            name: name.into(),
            value: Some(value.into()),
            ..Default::default()
        });
        self
    }

    /// Appends pre-built environment variables, for sources a plain
    /// value cannot express.
    pub fn with_envs(mut self, envs: Vec<EnvVar>) -> Self {
        self.envs.extend(envs);
        self
    }

    pub fn with_image_pull_policy(mut self, policy: impl Into<String>) -> Self {
        self.image_pull_policy = Some(policy.into());
        self
    }

    pub fn with_restart_policy(mut self, policy: impl Into<String>) -> Self {
        self.restart_policy = Some(policy.into());
        self
    }

    pub fn with_image_pull_secrets(mut self, secrets: Vec<String>) -> Self {
        self.image_pull_secrets = secrets;
        self
    }

    pub fn with_service_account(mut self, service_account: impl Into<String>) -> Self {
        self.service_account_name = Some(service_account.into());
        self
    }

    pub fn with_node_selector(mut self, node_selector: BTreeMap<String, String>) -> Self {
        self.node_selector = node_selector;
        self
    }

    pub fn with_host_network(mut self, host_network: bool) -> Self {
        self.host_network = host_network;
        self
    }

    /// Uses a caller-supplied Pod as the skeleton instead of assembling
    /// one. The unique name and structural defaults are still applied;
    /// other overrides captured by this generator are not.
    pub fn with_base_pod(mut self, pod: Pod) -> Self {
        self.base_pod = Some(pod);
        self
    }

    /// Generates the Pod using the process-default UUID v4 source.
    pub fn gen_pod(&self) -> Result<Pod> {
        self.gen_pod_with(&RandomUidSource)
    }

    /// Generates the Pod, drawing the name suffix from `uid_source`.
    pub fn gen_pod_with(&self, uid_source: &dyn PodUidSource) -> Result<Pod> {
        self.validate()?;

        let mut pod = match self.base_pod {
            Some(ref base) => base.clone(),
            None => self.build_base_pod(),
        };

        let pod_id = make_unique_pod_id(&self.name, uid_source.generate_uid());
        pod.metadata.name = Some(pod_id.clone());
        ensure_structural_defaults(&mut pod);

        debug!("generated Pod specification '{}'", pod_id);
        Ok(pod)
    }

    fn validate(&self) -> Result<()> {
        if self.image.is_empty() {
            return Err(PodGenError::config_error("image must not be empty"));
        }
        if self.name.is_empty() {
            return Err(PodGenError::config_error("name must not be empty"));
        }
        if !is_valid_k8s_name(&self.name) {
            return Err(PodGenError::ConfigError(format!(
                "Invalid Pod base name: {}",
                self.name
            )));
        }

        if let Some(ref policy) = self.image_pull_policy {
            if !VALID_IMAGE_PULL_POLICIES.contains(&policy.as_str()) {
                return Err(PodGenError::ConfigError(format!(
                    "Invalid image_pull_policy: {}",
                    policy
                )));
            }
        }
        if let Some(ref policy) = self.restart_policy {
            if !VALID_RESTART_POLICIES.contains(&policy.as_str()) {
                return Err(PodGenError::ConfigError(format!(
                    "Invalid restart_policy: {}",
                    policy
                )));
            }
        }

        Ok(())
    }

    fn build_base_pod(&self) -> Pod {
        let metadata = ObjectMeta {
            namespace: self.namespace.clone(),
            labels: (!self.labels.is_empty()).then(|| self.labels.clone()),
            annotations: (!self.annotations.is_empty()).then(|| self.annotations.clone()),
            ..Default::default()
        };

        let container = Container {
            name: self.name.clone(),
            image: Some(self.image.clone()),
            command: Some(self.cmds.clone()),
            args: Some(self.args.clone()),
            env: Some(self.envs.clone()),
            env_from: Some(Vec::new()),
            ports: Some(Vec::new()),
            volume_mounts: Some(Vec::new()),
            image_pull_policy: self.image_pull_policy.clone(),
            ..Default::default()
        };

        let image_pull_secrets = self
            .image_pull_secrets
            .iter()
            .map(|name| LocalObjectReference {
                name: name.clone(),
            })
            .collect();

        Pod {
            metadata,
            spec: Some(PodSpec {
                containers: vec![container],
                host_network: Some(self.host_network),
                image_pull_secrets: Some(image_pull_secrets),
                volumes: Some(Vec::new()),
                restart_policy: self.restart_policy.clone(),
                service_account_name: self.service_account_name.clone(),
                node_selector: (!self.node_selector.is_empty())
                    .then(|| self.node_selector.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Decorates the base name with a 32-hex-char unique suffix, keeping the
/// whole id within the Kubernetes name length cap.
fn make_unique_pod_id(name: &str, uid: Uuid) -> String {
    let suffix = uid.simple().to_string();
    let max_base_len = MAX_POD_ID_LEN - suffix.len() - 1;
    let base = if name.len() > max_base_len {
        // Names are validated ASCII, so byte slicing is char-safe.
        name[..max_base_len].trim_end_matches('-')
    } else {
        name
    };
    format!("{}-{}", base, suffix)
}

/// Fills in every list-valued field the Pod schema declares, so the
/// serialized document never carries `null` where a list belongs.
fn ensure_structural_defaults(pod: &mut Pod) {
    let spec = pod.spec.get_or_insert_with(PodSpec::default);
    spec.host_network.get_or_insert(false);
    spec.image_pull_secrets.get_or_insert_with(Vec::new);
    spec.volumes.get_or_insert_with(Vec::new);

    for container in &mut spec.containers {
        container.args.get_or_insert_with(Vec::new);
        container.command.get_or_insert_with(Vec::new);
        container.env.get_or_insert_with(Vec::new);
        container.env_from.get_or_insert_with(Vec::new);
        container.ports.get_or_insert_with(Vec::new);
        container.volume_mounts.get_or_insert_with(Vec::new);
    }
}

pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
