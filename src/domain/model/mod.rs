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

//! Composable Pod specification fragments

pub mod port;
pub mod resources;
pub mod secret;
pub mod traits;
pub mod volume;
pub mod volume_mount;

pub use self::port::Port;
pub use self::resources::Resources;
pub use self::secret::Secret;
pub use self::traits::PodFragment;
pub use self::volume::Volume;
pub use self::volume_mount::VolumeMount;

use crate::shared::error::Result;
use k8s_openapi::api::core::v1::Pod;

/// The closed set of fragment kinds understood by the merger, for
/// callers that carry heterogeneous fragment sequences.
#[derive(Debug, Clone)]
pub enum Fragment {
    Port(Port),
    Volume(Volume),
    VolumeMount(VolumeMount),
    Secret(Secret),
    Resources(Resources),
}

impl PodFragment for Fragment {
    fn attach_to_pod(&self, pod: Pod) -> Result<Pod> {
        match self {
            Fragment::Port(port) => port.attach_to_pod(pod),
            Fragment::Volume(volume) => volume.attach_to_pod(pod),
            Fragment::VolumeMount(mount) => mount.attach_to_pod(pod),
            Fragment::Secret(secret) => secret.attach_to_pod(pod),
            Fragment::Resources(resources) => resources.attach_to_pod(pod),
        }
    }
}

impl From<Port> for Fragment {
    fn from(port: Port) -> Self {
        Fragment::Port(port)
    }
}

impl From<Volume> for Fragment {
    fn from(volume: Volume) -> Self {
        Fragment::Volume(volume)
    }
}

impl From<VolumeMount> for Fragment {
    fn from(mount: VolumeMount) -> Self {
        Fragment::VolumeMount(mount)
    }
}

impl From<Secret> for Fragment {
    fn from(secret: Secret) -> Self {
        Fragment::Secret(secret)
    }
}

impl From<Resources> for Fragment {
    fn from(resources: Resources) -> Self {
        Fragment::Resources(resources)
    }
}
