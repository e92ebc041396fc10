//! Fixtures shared by unit tests: small `.gltf` + `.bin` files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// Y-up bounds of the single triangle every fixture mesh uses.
pub const FIXTURE_MIN: [f32; 3] = [-1.0, -2.0, -3.0];
pub const FIXTURE_MAX: [f32; 3] = [1.0, 2.0, 3.0];

pub struct FixtureNode {
    pub name: String,
    pub translation: [f32; 3],
    pub mesh: bool,
    pub children: Vec<FixtureNode>,
}

impl FixtureNode {
    pub fn mesh(name: &str, translation: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            translation,
            mesh: true,
            children: Vec::new(),
        }
    }

    pub fn empty(name: &str, translation: [f32; 3]) -> Self {
        Self {
            mesh: false,
            ..Self::mesh(name, translation)
        }
    }

    pub fn with_child(mut self, child: FixtureNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A fresh, empty directory, removed when the returned handle drops.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn push_node(node: &FixtureNode, nodes: &mut Vec<Value>) -> usize {
    let index = nodes.len();
    nodes.push(Value::Null);

    let children: Vec<usize> = node
        .children
        .iter()
        .map(|child| push_node(child, nodes))
        .collect();

    let mut value = json!({
        "name": node.name,
        "translation": node.translation,
    });
    if node.mesh {
        value["mesh"] = json!(0);
    }
    if !children.is_empty() {
        value["children"] = json!(children);
    }

    nodes[index] = value;
    index
}

/// Writes `<name>.gltf` and `<name>.bin` and returns the `.gltf` path.
pub fn write_gltf(dir: &Path, name: &str, roots: &[FixtureNode]) -> PathBuf {
    let vertices: [[f32; 3]; 3] = [FIXTURE_MIN, FIXTURE_MAX, [1.0, -2.0, 3.0]];
    let bytes: Vec<u8> = vertices
        .iter()
        .flatten()
        .flat_map(|component| component.to_le_bytes())
        .collect();

    let bin_name = format!("{name}.bin");
    fs::write(dir.join(&bin_name), &bytes).unwrap();

    let mut nodes = Vec::new();
    let root_indices: Vec<usize> = roots.iter().map(|root| push_node(root, &mut nodes)).collect();

    let document = json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "name": name, "nodes": root_indices }],
        "nodes": nodes,
        "meshes": [{
            "name": "Triangle",
            "primitives": [{ "attributes": { "POSITION": 0 } }]
        }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": FIXTURE_MIN,
            "max": FIXTURE_MAX
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": bytes.len() }],
        "buffers": [{ "byteLength": bytes.len(), "uri": bin_name }]
    });

    let path = dir.join(format!("{name}.gltf"));
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}
