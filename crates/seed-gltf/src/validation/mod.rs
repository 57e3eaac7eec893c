//! Structural validation of the raw document.
//!
//! The validator walks the top-level lists in declaration order and stops
//! at the first field that breaks its invariant. A document that passes is
//! safe to hand to the mapper: every enumeration is legal, every numeric
//! field is in range and every index is non-negative. With
//! [`LoadOptions::strict_bounds`] every index is also known to point inside
//! its target list.

mod rules;

use std::fmt::Display;

use crate::error::ValidationError;
use crate::model::{
    AlphaMode, BufferTarget, CameraType, ComponentType, ElementType, Filter, Interpolation,
    MimeType, PrimitiveMode, TargetPath, WrapMode,
};
use crate::options::LoadOptions;
use crate::raw::{self, Gltf};

use rules::Check;

/// The only `asset.version` accepted.
pub const REQUIRED_VERSION: &str = "2.0";

const MIN_BYTE_STRIDE: i64 = 4;
const MAX_BYTE_STRIDE: i64 = 252;
const COLOR_SIZE: usize = 4;
const EMISSIVE_FACTOR_SIZE: usize = 3;
const MATRIX4_SIZE: usize = 16;
const QUATERNION_SIZE: usize = 4;
const VECTOR3_SIZE: usize = 3;

/// Validate `gltf`, failing on the first violation found.
pub fn validate(gltf: &Gltf, options: &LoadOptions) -> Result<(), ValidationError> {
    Validator::new(gltf, options).run()
}

/// Length of every list an index may point into.
#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    buffers: usize,
    buffer_views: usize,
    accessors: usize,
    samplers: usize,
    images: usize,
    textures: usize,
    materials: usize,
    meshes: usize,
    cameras: usize,
    nodes: usize,
    skins: usize,
    scenes: usize,
}

impl Counts {
    fn of(gltf: &Gltf) -> Self {
        fn len<T>(list: &Option<Vec<T>>) -> usize {
            list.as_ref().map_or(0, Vec::len)
        }
        Self {
            buffers: len(&gltf.buffers),
            buffer_views: len(&gltf.buffer_views),
            accessors: len(&gltf.accessors),
            samplers: len(&gltf.samplers),
            images: len(&gltf.images),
            textures: len(&gltf.textures),
            materials: len(&gltf.materials),
            meshes: len(&gltf.meshes),
            cameras: len(&gltf.cameras),
            nodes: len(&gltf.nodes),
            skins: len(&gltf.skins),
            scenes: len(&gltf.scenes),
        }
    }
}

/// Walks a raw document and checks every field.
pub struct Validator<'a> {
    gltf: &'a Gltf,
    counts: Counts,
    strict: bool,
}

impl<'a> Validator<'a> {
    pub fn new(gltf: &'a Gltf, options: &LoadOptions) -> Self {
        Self {
            gltf,
            counts: Counts::of(gltf),
            strict: options.strict_bounds,
        }
    }

    /// Run every check in document order.
    pub fn run(&self) -> Result<(), ValidationError> {
        let gltf = self.gltf;
        rules::equal_to(&gltf.asset.version, REQUIRED_VERSION, "asset.version")?;

        self.each("buffers", &gltf.buffers, Self::buffer)?;
        self.each("bufferViews", &gltf.buffer_views, Self::buffer_view)?;
        self.each("accessors", &gltf.accessors, Self::accessor)?;
        self.each("samplers", &gltf.samplers, Self::sampler)?;
        self.each("images", &gltf.images, Self::image)?;
        self.each("textures", &gltf.textures, Self::texture)?;
        self.each("materials", &gltf.materials, Self::material)?;
        self.each("meshes", &gltf.meshes, Self::mesh)?;
        self.each("cameras", &gltf.cameras, Self::camera)?;
        self.each("nodes", &gltf.nodes, Self::node)?;
        self.each("skins", &gltf.skins, Self::skin)?;
        self.each("animations", &gltf.animations, Self::animation)?;
        self.each("scenes", &gltf.scenes, Self::scene)?;

        if let Some(scene) = gltf.scene {
            self.reference(scene, self.counts.scenes, "scene")?;
        }
        Ok(())
    }

    /// A present top-level list must be non-empty; then check each item.
    fn each<T>(
        &self,
        name: &str,
        list: &Option<Vec<T>>,
        check: impl Fn(&Self, usize, &T) -> Check,
    ) -> Check {
        let Some(list) = list else {
            return Ok(());
        };
        rules::not_empty(list.len(), name)?;
        list.iter()
            .enumerate()
            .try_for_each(|(i, item)| check(self, i, item))
    }

    fn reference(&self, index: i64, count: usize, path: impl Display) -> Check {
        rules::reference(index, self.strict.then_some(count), path)
    }

    fn optional_reference(&self, index: Option<i64>, count: usize, path: impl Display) -> Check {
        match index {
            Some(index) => self.reference(index, count, path),
            None => Ok(()),
        }
    }

    fn buffer(&self, i: usize, buffer: &raw::Buffer) -> Check {
        rules::at_least(buffer.byte_length, 1, format_args!("buffers[{i}].byteLength"))?;
        Ok(())
    }

    fn buffer_view(&self, i: usize, view: &raw::BufferView) -> Check {
        let path = format!("bufferViews[{i}]");
        self.reference(view.buffer, self.counts.buffers, format_args!("{path}.buffer"))?;
        let offset = view.byte_offset.unwrap_or(0);
        rules::at_least(offset, 0, format_args!("{path}.byteOffset"))?;
        rules::at_least(view.byte_length, 1, format_args!("{path}.byteLength"))?;
        if let Some(stride) = view.byte_stride {
            rules::in_range(
                stride,
                MIN_BYTE_STRIDE,
                MAX_BYTE_STRIDE,
                format_args!("{path}.byteStride"),
            )?;
        }
        if let Some(target) = view.target {
            rules::one_of(
                target,
                &BufferTarget::ALL.map(BufferTarget::code),
                format_args!("{path}.target"),
            )?;
        }

        if self.strict {
            let buffer = self
                .gltf
                .buffers
                .as_ref()
                .and_then(|buffers| buffers.get(view.buffer as usize));
            if let Some(buffer) = buffer {
                let end = offset.saturating_add(view.byte_length);
                rules::at_least(
                    buffer.byte_length,
                    end,
                    format_args!("buffers[{}].byteLength (viewed by {path})", view.buffer),
                )?;
            }
        }
        Ok(())
    }

    fn accessor(&self, i: usize, accessor: &raw::Accessor) -> Check {
        let path = format!("accessors[{i}]");
        self.optional_reference(
            accessor.buffer_view,
            self.counts.buffer_views,
            format_args!("{path}.bufferView"),
        )?;
        if let Some(offset) = accessor.byte_offset {
            rules::at_least(offset, 0, format_args!("{path}.byteOffset"))?;
        }
        rules::one_of(
            accessor.component_type,
            &ComponentType::ALL.map(ComponentType::code),
            format_args!("{path}.componentType"),
        )?;
        rules::at_least(accessor.count, 1, format_args!("{path}.count"))?;
        rules::one_of(
            accessor.accessor_type.as_str(),
            &ElementType::ALL.map(ElementType::name),
            format_args!("{path}.type"),
        )?;

        if let Some(element_type) = ElementType::from_name(&accessor.accessor_type) {
            let components = element_type.component_count();
            if let Some(max) = &accessor.max {
                rules::has_size(max.len(), components, format_args!("{path}.max"))?;
            }
            if let Some(min) = &accessor.min {
                rules::has_size(min.len(), components, format_args!("{path}.min"))?;
            }
        }

        if let Some(sparse) = &accessor.sparse {
            self.sparse(sparse, &format!("{path}.sparse"))?;
        }
        Ok(())
    }

    fn sparse(&self, sparse: &raw::Sparse, path: &str) -> Check {
        rules::at_least(sparse.count, 1, format_args!("{path}.count"))?;

        let indices = &sparse.indices;
        self.reference(
            indices.buffer_view,
            self.counts.buffer_views,
            format_args!("{path}.indices.bufferView"),
        )?;
        if let Some(offset) = indices.byte_offset {
            rules::at_least(offset, 0, format_args!("{path}.indices.byteOffset"))?;
        }
        rules::one_of(
            indices.component_type,
            &ComponentType::UNSIGNED.map(ComponentType::code),
            format_args!("{path}.indices.componentType"),
        )?;

        let values = &sparse.values;
        self.reference(
            values.buffer_view,
            self.counts.buffer_views,
            format_args!("{path}.values.bufferView"),
        )?;
        if let Some(offset) = values.byte_offset {
            rules::at_least(offset, 0, format_args!("{path}.values.byteOffset"))?;
        }
        Ok(())
    }

    fn sampler(&self, i: usize, sampler: &raw::Sampler) -> Check {
        let path = format!("samplers[{i}]");
        let wraps = WrapMode::ALL.map(WrapMode::code);
        if let Some(filter) = sampler.mag_filter {
            rules::one_of(
                filter,
                &Filter::MAGNIFICATION.map(Filter::code),
                format_args!("{path}.magFilter"),
            )?;
        }
        if let Some(filter) = sampler.min_filter {
            rules::one_of(
                filter,
                &Filter::ALL.map(Filter::code),
                format_args!("{path}.minFilter"),
            )?;
        }
        if let Some(wrap) = sampler.wrap_s {
            rules::one_of(wrap, &wraps, format_args!("{path}.wrapS"))?;
        }
        if let Some(wrap) = sampler.wrap_t {
            rules::one_of(wrap, &wraps, format_args!("{path}.wrapT"))?;
        }
        Ok(())
    }

    fn image(&self, i: usize, image: &raw::Image) -> Check {
        if let Some(mime_type) = &image.mime_type {
            rules::one_of(
                mime_type.as_str(),
                &MimeType::ALL.map(MimeType::as_str),
                format_args!("images[{i}].mimeType"),
            )?;
        }
        self.optional_reference(
            image.buffer_view,
            self.counts.buffer_views,
            format_args!("images[{i}].bufferView"),
        )?;
        Ok(())
    }

    fn texture(&self, i: usize, texture: &raw::Texture) -> Check {
        self.optional_reference(
            texture.sampler,
            self.counts.samplers,
            format_args!("textures[{i}].sampler"),
        )?;
        self.optional_reference(
            texture.source,
            self.counts.images,
            format_args!("textures[{i}].source"),
        )?;
        Ok(())
    }

    fn texture_info(&self, index: i64, tex_coord: Option<i64>, path: &str) -> Check {
        self.reference(index, self.counts.textures, format_args!("{path}.index"))?;
        if let Some(tex_coord) = tex_coord {
            rules::at_least(tex_coord, 0, format_args!("{path}.texCoord"))?;
        }
        Ok(())
    }

    fn material(&self, i: usize, material: &raw::Material) -> Check {
        let path = format!("materials[{i}]");

        if let Some(pbr) = &material.pbr_metallic_roughness {
            let pbr_path = format!("{path}.pbrMetallicRoughness");
            if let Some(factor) = &pbr.base_color_factor {
                rules::has_size(
                    factor.len(),
                    COLOR_SIZE,
                    format_args!("{pbr_path}.baseColorFactor"),
                )?;
            }
            if let Some(info) = &pbr.base_color_texture {
                self.texture_info(
                    info.index,
                    info.tex_coord,
                    &format!("{pbr_path}.baseColorTexture"),
                )?;
            }
            if let Some(factor) = pbr.metallic_factor {
                rules::in_range(factor, 0.0, 1.0, format_args!("{pbr_path}.metallicFactor"))?;
            }
            if let Some(factor) = pbr.roughness_factor {
                rules::in_range(factor, 0.0, 1.0, format_args!("{pbr_path}.roughnessFactor"))?;
            }
            if let Some(info) = &pbr.metallic_roughness_texture {
                self.texture_info(
                    info.index,
                    info.tex_coord,
                    &format!("{pbr_path}.metallicRoughnessTexture"),
                )?;
            }
        }

        if let Some(info) = &material.normal_texture {
            self.texture_info(info.index, info.tex_coord, &format!("{path}.normalTexture"))?;
        }
        if let Some(info) = &material.occlusion_texture {
            let info_path = format!("{path}.occlusionTexture");
            self.texture_info(info.index, info.tex_coord, &info_path)?;
            if let Some(strength) = info.strength {
                rules::in_range(strength, 0.0, 1.0, format_args!("{info_path}.strength"))?;
            }
        }
        if let Some(info) = &material.emissive_texture {
            self.texture_info(info.index, info.tex_coord, &format!("{path}.emissiveTexture"))?;
        }
        if let Some(factor) = &material.emissive_factor {
            rules::has_size(
                factor.len(),
                EMISSIVE_FACTOR_SIZE,
                format_args!("{path}.emissiveFactor"),
            )?;
        }
        if let Some(mode) = &material.alpha_mode {
            rules::one_of(
                mode.as_str(),
                &AlphaMode::ALL.map(AlphaMode::as_str),
                format_args!("{path}.alphaMode"),
            )?;
        }
        if let Some(cutoff) = material.alpha_cutoff {
            rules::at_least(cutoff, 0.0, format_args!("{path}.alphaCutoff"))?;
        }
        Ok(())
    }

    fn mesh(&self, i: usize, mesh: &raw::Mesh) -> Check {
        let path = format!("meshes[{i}]");
        rules::not_empty(mesh.primitives.len(), format_args!("{path}.primitives"))?;
        for (p, primitive) in mesh.primitives.iter().enumerate() {
            self.primitive(primitive, &format!("{path}.primitives[{p}]"))?;
        }
        if let Some(weights) = &mesh.weights {
            rules::not_empty(weights.len(), format_args!("{path}.weights"))?;
        }
        Ok(())
    }

    fn primitive(&self, primitive: &raw::Primitive, path: &str) -> Check {
        rules::not_empty(primitive.attributes.len(), format_args!("{path}.attributes"))?;
        for (semantic, &accessor) in &primitive.attributes {
            self.reference(
                accessor,
                self.counts.accessors,
                format_args!("{path}.attributes.{semantic}"),
            )?;
        }
        self.optional_reference(
            primitive.indices,
            self.counts.accessors,
            format_args!("{path}.indices"),
        )?;
        self.optional_reference(
            primitive.material,
            self.counts.materials,
            format_args!("{path}.material"),
        )?;
        if let Some(mode) = primitive.mode {
            rules::one_of(
                mode,
                &PrimitiveMode::ALL.map(PrimitiveMode::code),
                format_args!("{path}.mode"),
            )?;
        }

        if let Some(targets) = &primitive.targets {
            rules::not_empty(targets.len(), format_args!("{path}.targets"))?;
            for (t, target) in targets.iter().enumerate() {
                rules::not_empty(target.len(), format_args!("{path}.targets[{t}]"))?;
                for (semantic, &accessor) in target {
                    self.reference(
                        accessor,
                        self.counts.accessors,
                        format_args!("{path}.targets[{t}].{semantic}"),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn camera(&self, i: usize, camera: &raw::Camera) -> Check {
        let path = format!("cameras[{i}]");
        if let Some(ortho) = &camera.orthographic {
            rules::greater_than(ortho.zfar, 0.0, format_args!("{path}.orthographic.zfar"))?;
            rules::at_least(ortho.znear, 0.0, format_args!("{path}.orthographic.znear"))?;
        }
        if let Some(persp) = &camera.perspective {
            if let Some(aspect_ratio) = persp.aspect_ratio {
                rules::greater_than(
                    aspect_ratio,
                    0.0,
                    format_args!("{path}.perspective.aspectRatio"),
                )?;
            }
            rules::greater_than(persp.yfov, 0.0, format_args!("{path}.perspective.yfov"))?;
            if let Some(zfar) = persp.zfar {
                rules::greater_than(zfar, 0.0, format_args!("{path}.perspective.zfar"))?;
            }
            rules::greater_than(persp.znear, 0.0, format_args!("{path}.perspective.znear"))?;
        }
        rules::one_of(
            camera.camera_type.as_str(),
            &CameraType::ALL.map(CameraType::as_str),
            format_args!("{path}.type"),
        )?;

        let reason = format!("when type is {:?}", camera.camera_type);
        match CameraType::from_name(&camera.camera_type) {
            Some(CameraType::Perspective) => {
                rules::present(
                    camera.perspective.as_ref(),
                    &reason,
                    format_args!("{path}.perspective"),
                )?;
            }
            Some(CameraType::Orthographic) => {
                rules::present(
                    camera.orthographic.as_ref(),
                    &reason,
                    format_args!("{path}.orthographic"),
                )?;
            }
            None => {}
        }
        Ok(())
    }

    fn node(&self, i: usize, node: &raw::Node) -> Check {
        let path = format!("nodes[{i}]");
        self.optional_reference(node.camera, self.counts.cameras, format_args!("{path}.camera"))?;
        if let Some(children) = &node.children {
            rules::not_empty(children.len(), format_args!("{path}.children"))?;
            for (c, &child) in children.iter().enumerate() {
                self.reference(child, self.counts.nodes, format_args!("{path}.children[{c}]"))?;
            }
        }
        self.optional_reference(node.skin, self.counts.skins, format_args!("{path}.skin"))?;
        if let Some(matrix) = &node.matrix {
            rules::has_size(matrix.len(), MATRIX4_SIZE, format_args!("{path}.matrix"))?;
        }
        self.optional_reference(node.mesh, self.counts.meshes, format_args!("{path}.mesh"))?;
        if let Some(rotation) = &node.rotation {
            rules::has_size(rotation.len(), QUATERNION_SIZE, format_args!("{path}.rotation"))?;
        }
        if let Some(scale) = &node.scale {
            rules::has_size(scale.len(), VECTOR3_SIZE, format_args!("{path}.scale"))?;
        }
        if let Some(translation) = &node.translation {
            rules::has_size(translation.len(), VECTOR3_SIZE, format_args!("{path}.translation"))?;
        }
        if let Some(weights) = &node.weights {
            rules::not_empty(weights.len(), format_args!("{path}.weights"))?;
        }
        Ok(())
    }

    fn skin(&self, i: usize, skin: &raw::Skin) -> Check {
        let path = format!("skins[{i}]");
        self.optional_reference(
            skin.inverse_bind_matrices,
            self.counts.accessors,
            format_args!("{path}.inverseBindMatrices"),
        )?;
        self.optional_reference(skin.skeleton, self.counts.nodes, format_args!("{path}.skeleton"))?;
        rules::not_empty(skin.joints.len(), format_args!("{path}.joints"))?;
        for (j, &joint) in skin.joints.iter().enumerate() {
            self.reference(joint, self.counts.nodes, format_args!("{path}.joints[{j}]"))?;
        }
        Ok(())
    }

    fn animation(&self, i: usize, animation: &raw::Animation) -> Check {
        let path = format!("animations[{i}]");

        rules::not_empty(animation.channels.len(), format_args!("{path}.channels"))?;
        rules::not_empty(animation.samplers.len(), format_args!("{path}.samplers"))?;
        for (c, channel) in animation.channels.iter().enumerate() {
            let channel_path = format!("{path}.channels[{c}]");
            self.reference(
                channel.sampler,
                animation.samplers.len(),
                format_args!("{channel_path}.sampler"),
            )?;
            self.optional_reference(
                channel.target.node,
                self.counts.nodes,
                format_args!("{channel_path}.target.node"),
            )?;
            rules::one_of(
                channel.target.path.as_str(),
                &TargetPath::ALL.map(TargetPath::as_str),
                format_args!("{channel_path}.target.path"),
            )?;
        }

        for (s, sampler) in animation.samplers.iter().enumerate() {
            let sampler_path = format!("{path}.samplers[{s}]");
            self.reference(
                sampler.input,
                self.counts.accessors,
                format_args!("{sampler_path}.input"),
            )?;
            if let Some(interpolation) = &sampler.interpolation {
                rules::one_of(
                    interpolation.as_str(),
                    &Interpolation::ALL.map(Interpolation::as_str),
                    format_args!("{sampler_path}.interpolation"),
                )?;
            }
            self.reference(
                sampler.output,
                self.counts.accessors,
                format_args!("{sampler_path}.output"),
            )?;
        }
        Ok(())
    }

    fn scene(&self, i: usize, scene: &raw::Scene) -> Check {
        if let Some(nodes) = &scene.nodes {
            rules::not_empty(nodes.len(), format_args!("scenes[{i}].nodes"))?;
            for (n, &node) in nodes.iter().enumerate() {
                self.reference(node, self.counts.nodes, format_args!("scenes[{i}].nodes[{n}]"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Gltf {
        serde_json::from_str(json).unwrap()
    }

    fn check(json: &str) -> Result<(), ValidationError> {
        validate(&parse(json), &LoadOptions::default())
    }

    fn check_lenient(json: &str) -> Result<(), ValidationError> {
        validate(&parse(json), &LoadOptions::default().with_strict_bounds(false))
    }

    /// The first violation in a document holding `body` next to `asset`.
    fn violation(body: &str) -> ValidationError {
        check(&format!(r#"{{"asset": {{"version": "2.0"}}, {body}}}"#)).unwrap_err()
    }

    const ONE_ACCESSOR: &str =
        r#""accessors": [{"componentType": 5126, "count": 1, "type": "SCALAR"}]"#;

    #[test]
    fn test_minimal_document_is_valid() {
        check(r#"{"asset": {"version": "2.0"}}"#).unwrap();
    }

    #[test]
    fn test_wrong_version() {
        let err = check(r#"{"asset": {"version": "1.0"}}"#).unwrap_err();
        assert_eq!(err.path, "asset.version");
        insta::assert_snapshot!(err, @r#"asset.version should be equal to 2.0 but is "1.0""#);
    }

    #[test]
    fn test_empty_top_level_list() {
        let err = check(r#"{"asset": {"version": "2.0"}, "buffers": []}"#).unwrap_err();
        insta::assert_snapshot!(err, @"buffers should not be empty");

        let err = check(r#"{"asset": {"version": "2.0"}, "scenes": []}"#).unwrap_err();
        assert_eq!(err.path, "scenes");
    }

    #[test]
    fn test_component_type() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "accessors": [
                    {"componentType": 5126, "count": 1, "type": "SCALAR"},
                    {"componentType": 5124, "count": 1, "type": "SCALAR"}
                ]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"accessors[1].componentType should be one of [5120, 5121, 5122, 5123, 5125, 5126] but is 5124"
        );
    }

    #[test]
    fn test_min_max_match_element_type() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "accessors": [{
                    "componentType": 5126, "count": 3, "type": "VEC3",
                    "max": [1, 1, 1], "min": [0, 0]
                }]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(err, @"accessors[0].min should have size 3 but has size 2");
    }

    #[test]
    fn test_sparse_indices_must_be_unsigned() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "buffers": [{"byteLength": 64}],
                "bufferViews": [{"buffer": 0, "byteLength": 64}],
                "accessors": [{
                    "componentType": 5126, "count": 4, "type": "SCALAR",
                    "sparse": {
                        "count": 1,
                        "indices": {"bufferView": 0, "componentType": 5126},
                        "values": {"bufferView": 0}
                    }
                }]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "accessors[0].sparse.indices.componentType");
    }

    #[test]
    fn test_base_color_factor_size() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "materials": [
                    {},
                    {"pbrMetallicRoughness": {"baseColorFactor": [1, 1, 1]}}
                ]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"materials[1].pbrMetallicRoughness.baseColorFactor should have size 4 but has size 3"
        );
    }

    #[test]
    fn test_alpha_mode() {
        let err = violation(r#""materials": [{"alphaMode": "FOO"}]"#);
        insta::assert_snapshot!(
            err,
            @r#"materials[0].alphaMode should be one of [OPAQUE, MASK, BLEND] but is "FOO""#
        );
    }

    #[test]
    fn test_negative_joint() {
        let err = check_lenient(
            r#"{
                "asset": {"version": "2.0"},
                "nodes": [{}, {}],
                "skins": [{"joints": [0, 1]}, {"joints": [1, -1]}]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(err, @"skins[1].joints[1] should be at least 0 but is -1");
    }

    #[test]
    fn test_upper_bounds_only_when_strict() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "nodes": [{"children": [3]}]
        }"#;

        let err = check(json).unwrap_err();
        insta::assert_snapshot!(err, @"nodes[0].children[0] should be less than 1 but is 3");
        check_lenient(json).unwrap();
    }

    #[test]
    fn test_buffer_view_past_buffer_end() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "buffers": [{"byteLength": 16}],
                "bufferViews": [{"buffer": 0, "byteOffset": 8, "byteLength": 12}]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"buffers[0].byteLength (viewed by bufferViews[0]) should be at least 20 but is 16"
        );
    }

    #[test]
    fn test_camera_needs_matching_projection() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "cameras": [{
                    "type": "perspective",
                    "orthographic": {"xmag": 1, "ymag": 1, "zfar": 10, "znear": 0}
                }]
            }"#,
        )
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @r#"cameras[0].perspective should be present when type is "perspective""#
        );
    }

    #[test]
    fn test_perspective_znear_positive() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "cameras": [{"type": "perspective", "perspective": {"yfov": 1.0, "znear": 0}}]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "cameras[0].perspective.znear");
    }

    #[test]
    fn test_node_transform_sizes() {
        let err = violation(r#""nodes": [{"rotation": [0, 0, 1]}]"#);
        assert_eq!(err.path, "nodes[0].rotation");

        let err = violation(r#""nodes": [{"matrix": [1, 0, 0, 1]}]"#);
        assert_eq!(err.path, "nodes[0].matrix");
    }

    #[test]
    fn test_channel_sampler_within_animation() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "nodes": [{}],
                "accessors": [{"componentType": 5126, "count": 2, "type": "SCALAR"}],
                "animations": [{
                    "channels": [{"sampler": 1, "target": {"node": 0, "path": "rotation"}}],
                    "samplers": [{"input": 0, "output": 0}]
                }]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "animations[0].channels[0].sampler");
    }

    #[test]
    fn test_target_path() {
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "animations": [{
                    "channels": [{"sampler": 0, "target": {"path": "color"}}],
                    "samplers": [{"input": 0, "output": 0}]
                }]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "animations[0].channels[0].target.path");
    }

    #[test]
    fn test_first_violation_wins() {
        // Both the buffer and the material are invalid; buffers come first.
        let err = check(
            r#"{
                "asset": {"version": "2.0"},
                "materials": [{"alphaCutoff": -1}],
                "buffers": [{"byteLength": 0}]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.path, "buffers[0].byteLength");
    }

    #[test]
    fn test_root_scene_reference() {
        let err = check(r#"{"asset": {"version": "2.0"}, "scene": -1}"#).unwrap_err();
        assert_eq!(err.path, "scene");
    }

    #[test]
    fn test_buffer_view_rules() {
        let view = |fields: &str| {
            violation(&format!(
                r#""buffers": [{{"byteLength": 16}}], "bufferViews": [{{"buffer": 0, {fields}}}]"#
            ))
        };

        let err = view(r#""byteLength": 8, "byteStride": 2"#);
        insta::assert_snapshot!(err, @"bufferViews[0].byteStride should be in [4, 252] but is 2");

        let err = view(r#""byteLength": 8, "byteStride": 256"#);
        assert_eq!(err.path, "bufferViews[0].byteStride");

        let err = view(r#""byteLength": 8, "target": 1"#);
        insta::assert_snapshot!(
            err,
            @"bufferViews[0].target should be one of [34962, 34963] but is 1"
        );

        let err = view(r#""byteOffset": -1, "byteLength": 8"#);
        insta::assert_snapshot!(err, @"bufferViews[0].byteOffset should be at least 0 but is -1");

        let err = view(r#""byteLength": 0"#);
        insta::assert_snapshot!(err, @"bufferViews[0].byteLength should be at least 1 but is 0");
    }

    #[test]
    fn test_accessor_count_and_type() {
        let accessor = |fields: &str| {
            violation(&format!(r#""accessors": [{{"componentType": 5126, {fields}}}]"#))
        };

        let err = accessor(r#""count": 0, "type": "SCALAR""#);
        insta::assert_snapshot!(err, @"accessors[0].count should be at least 1 but is 0");

        let err = accessor(r#""count": 1, "type": "VEC5""#);
        assert_eq!(err.path, "accessors[0].type");
        assert_eq!(
            err.message,
            r#"should be one of [SCALAR, VEC2, VEC3, VEC4, MAT2, MAT3, MAT4] but is "VEC5""#
        );
    }

    #[test]
    fn test_sparse_rules() {
        let accessor = |sparse: &str| {
            format!(
                r#""buffers": [{{"byteLength": 64}}],
                "bufferViews": [{{"buffer": 0, "byteLength": 64}}],
                "accessors": [{{
                    "componentType": 5126, "count": 4, "type": "SCALAR",
                    "sparse": {sparse}
                }}]"#
            )
        };

        let err = violation(&accessor(
            r#"{
                "count": 0,
                "indices": {"bufferView": 0, "componentType": 5123},
                "values": {"bufferView": 0}
            }"#,
        ));
        insta::assert_snapshot!(err, @"accessors[0].sparse.count should be at least 1 but is 0");

        let err = violation(&accessor(
            r#"{
                "count": 1,
                "indices": {"bufferView": 0, "componentType": 5123},
                "values": {"bufferView": -1}
            }"#,
        ));
        insta::assert_snapshot!(
            err,
            @"accessors[0].sparse.values.bufferView should be at least 0 but is -1"
        );
    }

    #[test]
    fn test_sampler_rules() {
        let err = violation(r#""samplers": [{"magFilter": 9986}]"#);
        insta::assert_snapshot!(
            err,
            @"samplers[0].magFilter should be one of [9728, 9729] but is 9986"
        );

        let err = violation(r#""samplers": [{"minFilter": 1}]"#);
        assert_eq!(err.path, "samplers[0].minFilter");

        let err = violation(r#""samplers": [{"wrapS": 1}]"#);
        insta::assert_snapshot!(
            err,
            @"samplers[0].wrapS should be one of [10497, 33648, 33071] but is 1"
        );

        let err = violation(r#""samplers": [{"wrapS": 33071, "wrapT": 9728}]"#);
        assert_eq!(err.path, "samplers[0].wrapT");
    }

    #[test]
    fn test_image_mime_type() {
        let err = violation(r#""images": [{"uri": "a.gif", "mimeType": "image/gif"}]"#);
        assert_eq!(err.path, "images[0].mimeType");
        assert_eq!(err.message, r#"should be one of [image/jpeg, image/png] but is "image/gif""#);
    }

    #[test]
    fn test_material_factors() {
        let err = violation(r#""materials": [{"pbrMetallicRoughness": {"metallicFactor": 1.5}}]"#);
        insta::assert_snapshot!(
            err,
            @"materials[0].pbrMetallicRoughness.metallicFactor should be in [0, 1] but is 1.5"
        );

        let err =
            violation(r#""materials": [{"pbrMetallicRoughness": {"roughnessFactor": -0.5}}]"#);
        assert_eq!(err.path, "materials[0].pbrMetallicRoughness.roughnessFactor");

        let err = violation(
            r#""textures": [{}], "materials": [{"occlusionTexture": {"index": 0, "strength": 2}}]"#,
        );
        insta::assert_snapshot!(
            err,
            @"materials[0].occlusionTexture.strength should be in [0, 1] but is 2"
        );

        let err = violation(r#""materials": [{"emissiveFactor": [1, 1]}]"#);
        insta::assert_snapshot!(
            err,
            @"materials[0].emissiveFactor should have size 3 but has size 2"
        );
    }

    #[test]
    fn test_negative_tex_coord() {
        let err = violation(
            r#""textures": [{}], "materials": [{"normalTexture": {"index": 0, "texCoord": -1}}]"#,
        );
        insta::assert_snapshot!(
            err,
            @"materials[0].normalTexture.texCoord should be at least 0 but is -1"
        );

        let err = violation(
            r#""textures": [{}], "materials": [{"pbrMetallicRoughness": {
                "baseColorTexture": {"index": 0, "texCoord": -2}
            }}]"#,
        );
        assert_eq!(err.path, "materials[0].pbrMetallicRoughness.baseColorTexture.texCoord");
    }

    #[test]
    fn test_primitive_rules() {
        let mesh = |primitive: &str| {
            format!(r#"{ONE_ACCESSOR}, "meshes": [{{"primitives": [{primitive}]}}]"#)
        };

        let err = violation(&mesh(r#"{"attributes": {"POSITION": 0}, "mode": 7}"#));
        insta::assert_snapshot!(
            err,
            @"meshes[0].primitives[0].mode should be one of [0, 1, 2, 3, 4, 5, 6] but is 7"
        );

        let err = violation(&mesh(r#"{"attributes": {}}"#));
        insta::assert_snapshot!(err, @"meshes[0].primitives[0].attributes should not be empty");

        let err = violation(&mesh(r#"{"attributes": {"POSITION": 0}, "targets": []}"#));
        assert_eq!(err.path, "meshes[0].primitives[0].targets");

        let err = violation(&mesh(r#"{"attributes": {"POSITION": 0}, "targets": [{}]}"#));
        assert_eq!(err.path, "meshes[0].primitives[0].targets[0]");

        let err =
            violation(&mesh(r#"{"attributes": {"POSITION": 0}, "targets": [{"POSITION": 1}]}"#));
        insta::assert_snapshot!(
            err,
            @"meshes[0].primitives[0].targets[0].POSITION should be less than 1 but is 1"
        );
    }

    #[test]
    fn test_empty_nested_lists() {
        let cases = [
            (r#""nodes": [{"children": []}]"#.to_string(), "nodes[0].children"),
            (r#""nodes": [{"weights": []}]"#.to_string(), "nodes[0].weights"),
            (r#""meshes": [{"primitives": []}]"#.to_string(), "meshes[0].primitives"),
            (
                format!(
                    r#"{ONE_ACCESSOR}, "meshes": [{{
                        "primitives": [{{"attributes": {{"POSITION": 0}}}}],
                        "weights": []
                    }}]"#
                ),
                "meshes[0].weights",
            ),
            (r#""skins": [{"joints": []}]"#.to_string(), "skins[0].joints"),
            (
                r#""animations": [{"channels": [], "samplers": []}]"#.to_string(),
                "animations[0].channels",
            ),
            (r#""scenes": [{"nodes": []}]"#.to_string(), "scenes[0].nodes"),
        ];
        for (body, path) in cases {
            let err = violation(&body);
            assert_eq!(err.path, path, "{body}");
            assert_eq!(err.message, "should not be empty");
        }
    }

    #[test]
    fn test_empty_animation_samplers_before_channel_references() {
        let err = violation(
            r#""nodes": [{}], "animations": [{
                "channels": [{"sampler": 0, "target": {"node": 0, "path": "scale"}}],
                "samplers": []
            }]"#,
        );
        insta::assert_snapshot!(err, @"animations[0].samplers should not be empty");
    }

    #[test]
    fn test_camera_ranges() {
        let err = violation(
            r#""cameras": [{
                "type": "orthographic",
                "orthographic": {"xmag": 1, "ymag": 1, "zfar": 0, "znear": 0}
            }]"#,
        );
        insta::assert_snapshot!(
            err,
            @"cameras[0].orthographic.zfar should be greater than 0 but is 0"
        );

        let err = violation(
            r#""cameras": [{
                "type": "orthographic",
                "orthographic": {"xmag": 1, "ymag": 1, "zfar": 10, "znear": -1}
            }]"#,
        );
        insta::assert_snapshot!(
            err,
            @"cameras[0].orthographic.znear should be at least 0 but is -1"
        );

        let err = violation(
            r#""cameras": [{
                "type": "perspective",
                "perspective": {"aspectRatio": 0, "yfov": 1, "znear": 0.1}
            }]"#,
        );
        assert_eq!(err.path, "cameras[0].perspective.aspectRatio");

        let err = violation(
            r#""cameras": [{"type": "fisheye", "perspective": {"yfov": 1, "znear": 0.1}}]"#,
        );
        assert_eq!(err.path, "cameras[0].type");
    }

    #[test]
    fn test_interpolation() {
        let err = violation(&format!(
            r#"{ONE_ACCESSOR}, "nodes": [{{}}], "animations": [{{
                "channels": [{{"sampler": 0, "target": {{"node": 0, "path": "translation"}}}}],
                "samplers": [{{"input": 0, "output": 0, "interpolation": "CUBIC"}}]
            }}]"#
        ));
        assert_eq!(err.path, "animations[0].samplers[0].interpolation");
        assert_eq!(err.message, r#"should be one of [LINEAR, STEP, CUBICSPLINE] but is "CUBIC""#);
    }
}
