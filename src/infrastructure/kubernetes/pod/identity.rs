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

use uuid::Uuid;

/// Source of the unique identifier appended to generated Pod names.
///
/// Generation draws exactly one identifier per Pod. The process-wide
/// default is [`RandomUidSource`]; tests substitute a fixed source to
/// make generated names deterministic.
pub trait PodUidSource: Send + Sync {
    fn generate_uid(&self) -> Uuid;
}

/// Collision-resistant default source backed by UUID v4. `Uuid::new_v4`
/// is safe to call from multiple threads without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUidSource;

impl PodUidSource for RandomUidSource {
    fn generate_uid(&self) -> Uuid {
        Uuid::new_v4()
    }
}
