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

use podgen_kube::{append_to_pod, load_base_pod_from_file, PodGenError, PodGenerator, Port};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

mod test_utils {
    use podgen_kube::PodUidSource;
    use uuid::Uuid;

    pub struct FixedUidSource(pub Uuid);

    impl PodUidSource for FixedUidSource {
        fn generate_uid(&self) -> Uuid {
            self.0
        }
    }

    pub fn static_uuid() -> Uuid {
        Uuid::parse_str("cf4a56d2-8101-4217-b027-2af6216feb48").unwrap()
    }
}

// ============================================================================
// Tests for Pod generation (structural completeness, unique naming)
// ============================================================================

#[test]
fn test_gen_pod_structural_completeness() {
    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .gen_pod()
        .expect("Failed to generate Pod");

    let spec = pod.spec.as_ref().expect("Pod should carry a spec");
    assert_eq!(spec.host_network, Some(false));
    assert_eq!(spec.image_pull_secrets, Some(Vec::new()));
    assert_eq!(spec.volumes, Some(Vec::new()));

    assert_eq!(spec.containers.len(), 1);
    let container = &spec.containers[0];
    assert_eq!(container.name, "base");
    assert_eq!(container.image.as_deref(), Some("airflow-worker:latest"));
    assert_eq!(container.args, Some(Vec::new()));
    assert_eq!(container.command, Some(Vec::new()));
    assert_eq!(container.env, Some(Vec::new()));
    assert_eq!(container.env_from, Some(Vec::new()));
    assert_eq!(container.ports, Some(Vec::new()));
    assert_eq!(container.volume_mounts, Some(Vec::new()));
}

#[test]
fn test_gen_pod_name_with_injected_uid() {
    let uid_source = test_utils::FixedUidSource(test_utils::static_uuid());
    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .gen_pod_with(&uid_source)
        .expect("Failed to generate Pod");

    assert_eq!(
        pod.metadata.name.as_deref(),
        Some("base-cf4a56d281014217b0272af6216feb48")
    );
}

#[test]
fn test_gen_pod_names_differ_between_draws() {
    let generator = PodGenerator::new("airflow-worker:latest", "base");
    let first = generator.gen_pod().unwrap().metadata.name.unwrap();
    let second = generator.gen_pod().unwrap().metadata.name.unwrap();

    assert!(first.starts_with("base-"));
    assert!(second.starts_with("base-"));
    assert_ne!(first, second);
}

// ============================================================================
// Tests for generation input validation
// ============================================================================

#[test]
fn test_gen_pod_rejects_empty_inputs() {
    let err = PodGenerator::new("", "base").gen_pod().unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));

    let err = PodGenerator::new("airflow-worker:latest", "")
        .gen_pod()
        .unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));
}

#[test]
fn test_gen_pod_rejects_invalid_base_name() {
    let err = PodGenerator::new("airflow-worker:latest", "Invalid-Name")
        .gen_pod()
        .unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));
}

#[test]
fn test_gen_pod_rejects_invalid_policies() {
    let err = PodGenerator::new("airflow-worker:latest", "base")
        .with_image_pull_policy("Sometimes")
        .gen_pod()
        .unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));

    let err = PodGenerator::new("airflow-worker:latest", "base")
        .with_restart_policy("Maybe")
        .gen_pod()
        .unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));
}

// ============================================================================
// Tests for optional overrides
// ============================================================================

#[test]
fn test_gen_pod_overrides_land_in_spec() {
    let mut labels = BTreeMap::new();
    labels.insert("app".to_string(), "worker".to_string());
    let mut node_selector = BTreeMap::new();
    node_selector.insert("disktype".to_string(), "ssd".to_string());

    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .with_namespace("pipelines")
        .with_labels(labels.clone())
        .with_command(vec!["airflow".to_string()])
        .with_args(vec!["run".to_string()])
        .with_env_var("QUEUE", "default")
        .with_image_pull_policy("IfNotPresent")
        .with_restart_policy("Never")
        .with_image_pull_secrets(vec!["registry-creds".to_string()])
        .with_service_account("worker-sa")
        .with_node_selector(node_selector.clone())
        .with_host_network(true)
        .gen_pod()
        .expect("Failed to generate Pod");

    assert_eq!(pod.metadata.namespace.as_deref(), Some("pipelines"));
    assert_eq!(pod.metadata.labels, Some(labels));

    let spec = pod.spec.as_ref().unwrap();
    assert_eq!(spec.host_network, Some(true));
    assert_eq!(spec.restart_policy.as_deref(), Some("Never"));
    assert_eq!(spec.service_account_name.as_deref(), Some("worker-sa"));
    assert_eq!(spec.node_selector, Some(node_selector));
    assert_eq!(
        Some(spec.image_pull_secrets.as_ref().unwrap()[0].name.as_str()),
        Some("registry-creds")
    );

    let container = &spec.containers[0];
    assert_eq!(container.command, Some(vec!["airflow".to_string()]));
    assert_eq!(container.args, Some(vec!["run".to_string()]));
    assert_eq!(container.image_pull_policy.as_deref(), Some("IfNotPresent"));
    let env = container.env.as_ref().unwrap();
    assert_eq!(env.len(), 1);
    assert_eq!(env[0].name, "QUEUE");
    assert_eq!(env[0].value.as_deref(), Some("default"));
}

#[test]
fn test_gen_pod_env_vars_keep_insertion_order() {
    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .with_env_var("FIRST", "1")
        .with_env_var("SECOND", "2")
        .with_env_var("THIRD", "3")
        .gen_pod()
        .unwrap();

    let env = pod.spec.unwrap().containers[0].env.clone().unwrap();
    let names: Vec<&str> = env.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["FIRST", "SECOND", "THIRD"]);
}

// ============================================================================
// End-to-end: generation plus port merge, serialized wire shape
// ============================================================================

#[test]
fn test_port_attach_to_pod_wire_shape() {
    let uid_source = test_utils::FixedUidSource(test_utils::static_uuid());
    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .gen_pod_with(&uid_source)
        .expect("Failed to generate Pod");

    let ports = vec![
        Port::new("https", 443).unwrap(),
        Port::new("http", 80).unwrap(),
    ];
    let result = append_to_pod(&pod, &ports).expect("Failed to merge ports");

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "base-cf4a56d281014217b0272af6216feb48"},
            "spec": {
                "containers": [{
                    "args": [],
                    "command": [],
                    "env": [],
                    "envFrom": [],
                    "image": "airflow-worker:latest",
                    "name": "base",
                    "ports": [{
                        "name": "https",
                        "containerPort": 443
                    }, {
                        "name": "http",
                        "containerPort": 80
                    }],
                    "volumeMounts": [],
                }],
                "hostNetwork": false,
                "imagePullSecrets": [],
                "volumes": []
            }
        })
    );
}

// ============================================================================
// Tests for caller-supplied base Pods
// ============================================================================

fn write_manifest(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write manifest");
    file
}

#[test]
fn test_load_base_pod_from_file() {
    let manifest = write_manifest(
        r#"apiVersion: v1
kind: Pod
metadata:
  name: template
spec:
  containers:
    - name: main
      image: busybox
"#,
    );

    let pod = load_base_pod_from_file(manifest.path().to_str().unwrap())
        .expect("Failed to load base Pod");
    let spec = pod.spec.as_ref().unwrap();
    assert_eq!(spec.containers[0].name, "main");
    assert_eq!(spec.containers[0].image.as_deref(), Some("busybox"));
}

#[test]
fn test_load_base_pod_missing_file_fails() {
    let err = load_base_pod_from_file("/nonexistent/pod-template.yaml").unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));
}

#[test]
fn test_load_base_pod_without_containers_fails() {
    let manifest = write_manifest(
        r#"apiVersion: v1
kind: Pod
metadata:
  name: template
"#,
    );

    let err = load_base_pod_from_file(manifest.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, PodGenError::ConfigError(_)));
}

#[test]
fn test_load_base_pod_invalid_yaml_fails() {
    let manifest = write_manifest("spec: [not: {a, pod");

    let err = load_base_pod_from_file(manifest.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, PodGenError::YamlParse(_)));
}

#[test]
fn test_gen_pod_with_base_pod_applies_name_and_defaults() {
    let manifest = write_manifest(
        r#"apiVersion: v1
kind: Pod
metadata:
  name: template
spec:
  containers:
    - name: main
      image: busybox
"#,
    );
    let base = load_base_pod_from_file(manifest.path().to_str().unwrap()).unwrap();

    let uid_source = test_utils::FixedUidSource(test_utils::static_uuid());
    let pod = PodGenerator::new("airflow-worker:latest", "base")
        .with_base_pod(base)
        .gen_pod_with(&uid_source)
        .expect("Failed to generate Pod");

    // The template keeps its own container; only the name and the
    // structural defaults come from the generator.
    assert_eq!(
        pod.metadata.name.as_deref(),
        Some("base-cf4a56d281014217b0272af6216feb48")
    );
    let spec = pod.spec.as_ref().unwrap();
    assert_eq!(spec.containers[0].image.as_deref(), Some("busybox"));
    assert_eq!(spec.containers[0].ports, Some(Vec::new()));
    assert_eq!(spec.host_network, Some(false));
    assert_eq!(spec.volumes, Some(Vec::new()));
}
