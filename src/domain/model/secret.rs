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

use crate::domain::model::traits::{main_container_mut, pod_spec_mut, PodFragment};
use crate::shared::error::{PodGenError, Result};
use k8s_openapi::api::core::v1::{
    EnvFromSource, EnvVar, EnvVarSource, Pod, SecretEnvSource, SecretKeySelector,
    SecretVolumeSource, Volume as K8sVolume, VolumeMount as K8sVolumeMount,
};

/// A reference to a Kubernetes Secret delivered to the main container.
///
/// Three delivery modes: one key as a single environment variable, all
/// keys exported into the environment, or the whole secret mounted as a
/// read-only volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Secret {
    EnvVar {
        env_name: String,
        secret: String,
        key: String,
    },
    EnvFrom {
        secret: String,
    },
    Volume {
        mount_path: String,
        secret: String,
    },
}

impl Secret {
    pub fn env_var(
        env_name: impl Into<String>,
        secret: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self> {
        let spec = Self::EnvVar {
            env_name: env_name.into(),
            secret: secret.into(),
            key: key.into(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn env_from(secret: impl Into<String>) -> Result<Self> {
        let spec = Self::EnvFrom {
            secret: secret.into(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn volume(mount_path: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let spec = Self::Volume {
            mount_path: mount_path.into(),
            secret: secret.into(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn secret_name(&self) -> &str {
        match self {
            Self::EnvVar { secret, .. } | Self::EnvFrom { secret } | Self::Volume { secret, .. } => {
                secret
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.secret_name().is_empty() {
            return Err(PodGenError::config_error("secret name must not be empty"));
        }
        match self {
            Self::EnvVar { env_name, key, .. } => {
                if env_name.is_empty() {
                    return Err(PodGenError::config_error(
                        "secret env variable name must not be empty",
                    ));
                }
                if key.is_empty() {
                    return Err(PodGenError::config_error("secret key must not be empty"));
                }
            }
            Self::Volume { mount_path, .. } => {
                if mount_path.is_empty() {
                    return Err(PodGenError::config_error(
                        "secret mount path must not be empty",
                    ));
                }
            }
            Self::EnvFrom { .. } => {}
        }
        Ok(())
    }

    // Mount volumes need a name of their own; derive it from the secret
    // name so repeated merges stay deterministic.
    fn volume_name(secret: &str) -> String {
        format!("{}-secret-vol", secret)
    }
}

impl PodFragment for Secret {
    fn attach_to_pod(&self, mut pod: Pod) -> Result<Pod> {
        match self {
            Self::EnvVar {
                env_name,
                secret,
                key,
            } => {
                let container = main_container_mut(&mut pod)?;
                container.env.get_or_insert_with(Vec::new).push(EnvVar {
                    name: env_name.clone(),
                    value_from: Some(EnvVarSource {
                        secret_key_ref: Some(SecretKeySelector {
                            name: secret.clone(),
                            key: key.clone(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                });
            }
            Self::EnvFrom { secret } => {
                let container = main_container_mut(&mut pod)?;
                container
                    .env_from
                    .get_or_insert_with(Vec::new)
                    .push(EnvFromSource {
                        secret_ref: Some(SecretEnvSource {
                            name: secret.clone(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    });
            }
            Self::Volume { mount_path, secret } => {
                let volume_name = Self::volume_name(secret);
                {
                    let container = main_container_mut(&mut pod)?;
                    container
                        .volume_mounts
                        .get_or_insert_with(Vec::new)
                        .push(K8sVolumeMount {
                            name: volume_name.clone(),
                            mount_path: mount_path.clone(),
                            read_only: Some(true),
                            ..Default::default()
                        });
                }
                let spec = pod_spec_mut(&mut pod)?;
                spec.volumes.get_or_insert_with(Vec::new).push(K8sVolume {
                    name: volume_name,
                    secret: Some(SecretVolumeSource {
                        secret_name: Some(secret.clone()),
                        ..Default::default()
                    }),
                    ..Default::default()
                });
            }
        }
        Ok(pod)
    }
}
