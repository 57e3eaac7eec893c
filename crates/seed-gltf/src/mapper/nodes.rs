//! Node hierarchy resolution.
//!
//! Nodes reference their children by index and the list is not sorted
//! topologically, so each node is built after its children. The walk is
//! depth-first with an explicit stack, and finished nodes are memoized: a
//! child listed under several parents is built once and shared.

use std::sync::{Arc, OnceLock};

use glam::{Mat4, Quat, Vec3};

use crate::error::ResolveError;
use crate::math::{decompose, mat4_from_slice, quat_from_slice, vec3_from_slice};
use crate::model::{Camera, ExtensionData, Mesh, Node};
use crate::raw;

use super::lookup_opt;

enum Slot {
    Unvisited,
    /// On the current resolution path; seeing it again means a cycle.
    InProgress,
    /// Built, with the number of levels below it.
    Done(Arc<Node>, usize),
}

pub(crate) struct NodeResolver<'a> {
    raw: &'a [raw::Node],
    cameras: &'a [Arc<Camera>],
    meshes: &'a [Arc<Mesh>],
    slots: Vec<Slot>,
    max_depth: usize,
}

impl<'a> NodeResolver<'a> {
    pub(crate) fn new(
        raw: &'a [raw::Node],
        cameras: &'a [Arc<Camera>],
        meshes: &'a [Arc<Mesh>],
        max_depth: usize,
    ) -> Self {
        Self {
            raw,
            cameras,
            meshes,
            slots: raw.iter().map(|_| Slot::Unvisited).collect(),
            max_depth,
        }
    }

    /// Resolve every node, returned in declaration order.
    pub(crate) fn resolve_all(mut self) -> Result<Vec<Arc<Node>>, ResolveError> {
        (0..self.raw.len()).map(|i| self.resolve(i)).collect()
    }

    fn resolve(&mut self, root: usize) -> Result<Arc<Node>, ResolveError> {
        if matches!(self.slots[root], Slot::Unvisited) {
            self.walk(root)?;
        }
        self.finished(root)
    }

    /// Build `root` and every unbuilt node below it, children first.
    fn walk(&mut self, root: usize) -> Result<(), ResolveError> {
        let nodes = self.raw;
        // (node, position of the next child to visit)
        let mut stack = vec![(root, 0)];
        self.slots[root] = Slot::InProgress;

        while let Some((index, next)) = stack.pop() {
            let children = nodes[index].children.as_deref().unwrap_or_default();
            let Some(&child) = children.get(next) else {
                let node = self.build(index)?;
                self.slots[index] = node;
                continue;
            };
            stack.push((index, next + 1));

            let child = child_index(child, nodes.len(), || {
                format!("nodes[{index}].children[{next}]")
            })?;
            match self.slots[child] {
                Slot::Done(..) => {}
                Slot::InProgress => return Err(ResolveError::NodeCycle { index: child }),
                Slot::Unvisited => {
                    self.slots[child] = Slot::InProgress;
                    stack.push((child, 0));
                }
            }
        }
        Ok(())
    }

    fn finished(&self, index: usize) -> Result<Arc<Node>, ResolveError> {
        match &self.slots[index] {
            Slot::Done(node, _) => Ok(Arc::clone(node)),
            _ => Err(ResolveError::NodeCycle { index }),
        }
    }

    /// Build one node whose children are all done.
    fn build(&self, index: usize) -> Result<Slot, ResolveError> {
        let nodes = self.raw;
        let raw = &nodes[index];

        let mut children = Vec::new();
        let mut height = 0;
        for (c, &child) in raw.children.iter().flatten().enumerate() {
            let child = child_index(child, nodes.len(), || {
                format!("nodes[{index}].children[{c}]")
            })?;
            if let Slot::Done(_, below) = self.slots[child] {
                height = height.max(below + 1);
            }
            children.push(self.finished(child)?);
        }
        if height > self.max_depth {
            return Err(ResolveError::NodeDepthExceeded {
                index,
                limit: self.max_depth,
            });
        }

        let camera = lookup_opt(self.cameras, raw.camera, "camera", || {
            format!("nodes[{index}].camera")
        })?;
        let mesh = lookup_opt(self.meshes, raw.mesh, "mesh", || format!("nodes[{index}].mesh"))?;

        let (matrix, translation, rotation, scale) = match &raw.matrix {
            Some(values) => {
                let matrix = mat4_from_slice(values);
                let (translation, rotation, scale) = decompose(&matrix);
                (matrix, translation, rotation, scale)
            }
            None => {
                let translation = raw.translation.as_deref().map_or(Vec3::ZERO, vec3_from_slice);
                let rotation = raw.rotation.as_deref().map_or(Quat::IDENTITY, quat_from_slice);
                let scale = raw.scale.as_deref().map_or(Vec3::ONE, vec3_from_slice);
                let matrix = Mat4::from_scale_rotation_translation(scale, rotation, translation);
                (matrix, translation, rotation, scale)
            }
        };

        let node = Arc::new(Node {
            index,
            camera,
            children,
            mesh,
            matrix,
            translation,
            rotation,
            scale,
            weights: raw.weights.as_ref().map(|w| w.iter().map(|&v| v as f32).collect()),
            name: raw.name.clone(),
            extensions: ExtensionData::from_raw(&raw.extensions, &raw.extras),
            skin: OnceLock::new(),
        });
        Ok(Slot::Done(node, height))
    }
}

fn child_index(
    index: i64,
    len: usize,
    referrer: impl FnOnce() -> String,
) -> Result<usize, ResolveError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| ResolveError::OutOfBounds {
            kind: "node",
            index,
            len,
            referrer: referrer(),
        })
}
