//! Reference resolution: raw document to asset graph.
//!
//! Lists are mapped in dependency order so that every index can be looked
//! up in a list that is already fully built:
//!
//! buffers, buffer views, accessors, samplers, images, textures,
//! materials, meshes, cameras, nodes, skins, animations, scenes.
//!
//! Skins and nodes reference each other. Nodes are built first; each skin
//! is then bound to its nodes through a write-once weak link.

mod nodes;

use std::fmt::Display;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::math::{vec3_from_slice, vec4_from_slice};
use crate::model::{
    Accessor, AlphaMode, Animation, AnimationSampler, AnimationTarget, Asset, Attributes, Buffer,
    BufferTarget, BufferView, Camera, CameraType, Channel, ComponentType, ElementType,
    ExtensionData, Filter, Image, Interpolation, Material, Mesh, Metadata, MimeType, Node,
    NormalTextureInfo, OcclusionTextureInfo, Orthographic, PbrMetallicRoughness, Perspective,
    Primitive, PrimitiveMode, Projection, Sampler, Scene, Skin, Sparse, SparseIndices,
    SparseValues, TargetPath, Texture, TextureInfo, WrapMode,
};
use crate::options::LoadOptions;
use crate::raw::{self, Gltf, RawAsset};

use nodes::NodeResolver;

type Result<T> = std::result::Result<T, ResolveError>;

/// Map a raw asset into the resolved asset graph.
pub fn map(raw: RawAsset, options: &LoadOptions) -> Result<Asset> {
    Mapper::new(options).map(raw)
}

/// Builds an [`Asset`] from a validated [`RawAsset`].
pub struct Mapper {
    max_node_depth: usize,
    /// Shared by every texture that names no sampler.
    default_sampler: Arc<Sampler>,
    /// Shared by every primitive that names no material.
    default_material: Arc<Material>,
}

impl Mapper {
    pub fn new(options: &LoadOptions) -> Self {
        Self {
            max_node_depth: options.max_node_depth,
            default_sampler: Arc::new(Sampler::default()),
            default_material: Arc::new(Material::default()),
        }
    }

    /// Resolve every reference. Fails on the first index that does not
    /// point into its target list.
    pub fn map(&self, raw: RawAsset) -> Result<Asset> {
        let RawAsset { gltf, buffers, images } = raw;

        let buffers = self.buffers(&gltf, buffers)?;
        let buffer_views = self.buffer_views(&gltf, &buffers)?;
        let accessors = self.accessors(&gltf, &buffer_views)?;
        let samplers = self.samplers(&gltf)?;
        let images = self.images(&gltf, images, &buffer_views)?;
        let textures = self.textures(&gltf, &samplers, &images)?;
        let materials = self.materials(&gltf, &textures)?;
        let meshes = self.meshes(&gltf, &accessors, &materials)?;
        let cameras = self.cameras(&gltf)?;

        let raw_nodes = gltf.nodes.as_deref().unwrap_or_default();
        let nodes =
            NodeResolver::new(raw_nodes, &cameras, &meshes, self.max_node_depth).resolve_all()?;

        let skins = self.skins(&gltf, &accessors, &nodes)?;
        bind_skins(raw_nodes, &nodes, &skins)?;

        let animations = self.animations(&gltf, &accessors, &nodes)?;
        let scenes = self.scenes(&gltf, &nodes)?;
        let scene = lookup_opt(&scenes, gltf.scene, "scene", || "scene".to_string())?;

        tracing::debug!(
            buffers = buffers.len(),
            accessors = accessors.len(),
            textures = textures.len(),
            materials = materials.len(),
            meshes = meshes.len(),
            nodes = nodes.len(),
            skins = skins.len(),
            animations = animations.len(),
            scenes = scenes.len(),
            "mapped asset"
        );

        let asset = &gltf.asset;
        Ok(Asset {
            metadata: Metadata {
                copyright: asset.copyright.clone(),
                generator: asset.generator.clone(),
                version: asset.version.clone(),
                min_version: asset.min_version.clone(),
                extensions: ExtensionData::from_raw(&asset.extensions, &asset.extras),
            },
            extensions_used: gltf.extensions_used.clone(),
            extensions_required: gltf.extensions_required.clone(),
            buffers,
            buffer_views,
            accessors,
            samplers,
            images,
            textures,
            materials,
            meshes,
            cameras,
            nodes,
            skins,
            animations,
            scenes,
            scene,
            extensions: ExtensionData::from_raw(&gltf.extensions, &gltf.extras),
        })
    }

    fn buffers(&self, gltf: &Gltf, data: Vec<Vec<u8>>) -> Result<Vec<Arc<Buffer>>> {
        let mut data = data.into_iter();
        items(&gltf.buffers)
            .iter()
            .enumerate()
            .map(|(index, buffer)| {
                let data = data.next().ok_or(ResolveError::MissingBufferData { index })?;
                Ok(Arc::new(Buffer {
                    index,
                    uri: buffer.uri.clone(),
                    byte_length: to_usize(buffer.byte_length, || {
                        format!("buffers[{index}].byteLength")
                    })?,
                    data,
                    name: buffer.name.clone(),
                    extensions: ExtensionData::from_raw(&buffer.extensions, &buffer.extras),
                }))
            })
            .collect()
    }

    fn buffer_views(&self, gltf: &Gltf, buffers: &[Arc<Buffer>]) -> Result<Vec<Arc<BufferView>>> {
        items(&gltf.buffer_views)
            .iter()
            .enumerate()
            .map(|(index, view)| {
                let buffer = lookup(buffers, view.buffer, "buffer", || {
                    format!("bufferViews[{index}].buffer")
                })?;
                let byte_offset = to_usize(view.byte_offset.unwrap_or(0), || {
                    format!("bufferViews[{index}].byteOffset")
                })?;
                let byte_length = to_usize(view.byte_length, || {
                    format!("bufferViews[{index}].byteLength")
                })?;

                let end = byte_offset.saturating_add(byte_length);
                if end > buffer.data.len() {
                    return Err(ResolveError::ViewOutOfRange {
                        index,
                        end,
                        buffer_len: buffer.data.len(),
                    });
                }

                let target = view
                    .target
                    .map(|code| {
                        known(BufferTarget::from_code(code), code, || {
                            format!("bufferViews[{index}].target")
                        })
                    })
                    .transpose()?;

                Ok(Arc::new(BufferView {
                    index,
                    buffer,
                    byte_offset,
                    byte_length,
                    byte_stride: view
                        .byte_stride
                        .map(|stride| {
                            to_usize(stride, || format!("bufferViews[{index}].byteStride"))
                        })
                        .transpose()?,
                    target,
                    name: view.name.clone(),
                    extensions: ExtensionData::from_raw(&view.extensions, &view.extras),
                }))
            })
            .collect()
    }

    fn accessors(&self, gltf: &Gltf, views: &[Arc<BufferView>]) -> Result<Vec<Arc<Accessor>>> {
        items(&gltf.accessors)
            .iter()
            .enumerate()
            .map(|(index, accessor)| {
                let path = format!("accessors[{index}]");
                let buffer_view = lookup_opt(views, accessor.buffer_view, "buffer view", || {
                    format!("{path}.bufferView")
                })?;
                let component_type = known(
                    ComponentType::from_code(accessor.component_type),
                    accessor.component_type,
                    || format!("{path}.componentType"),
                )?;
                let element_type = known(
                    ElementType::from_name(&accessor.accessor_type),
                    &accessor.accessor_type,
                    || format!("{path}.type"),
                )?;
                let sparse = accessor
                    .sparse
                    .as_ref()
                    .map(|sparse| sparse_accessor(sparse, views, &path))
                    .transpose()?;

                Ok(Arc::new(Accessor {
                    index,
                    buffer_view,
                    byte_offset: to_usize(accessor.byte_offset.unwrap_or(0), || {
                        format!("{path}.byteOffset")
                    })?,
                    component_type,
                    normalized: accessor.normalized.unwrap_or(false),
                    count: to_usize(accessor.count, || format!("{path}.count"))?,
                    element_type,
                    max: accessor.max.as_deref().map(to_f32s),
                    min: accessor.min.as_deref().map(to_f32s),
                    sparse,
                    name: accessor.name.clone(),
                    extensions: ExtensionData::from_raw(&accessor.extensions, &accessor.extras),
                }))
            })
            .collect()
    }

    fn samplers(&self, gltf: &Gltf) -> Result<Vec<Arc<Sampler>>> {
        items(&gltf.samplers)
            .iter()
            .enumerate()
            .map(|(index, sampler)| {
                let filter = |code: Option<i64>, field: &str| {
                    code.map(|code| {
                        known(Filter::from_code(code), code, || {
                            format!("samplers[{index}].{field}")
                        })
                    })
                        .transpose()
                };
                let wrap = |code: Option<i64>, field: &str| {
                    code.map(|code| {
                        known(WrapMode::from_code(code), code, || {
                            format!("samplers[{index}].{field}")
                        })
                    })
                        .transpose()
                        .map(Option::unwrap_or_default)
                };

                Ok(Arc::new(Sampler {
                    index: Some(index),
                    mag_filter: filter(sampler.mag_filter, "magFilter")?,
                    min_filter: filter(sampler.min_filter, "minFilter")?,
                    wrap_s: wrap(sampler.wrap_s, "wrapS")?,
                    wrap_t: wrap(sampler.wrap_t, "wrapT")?,
                    name: sampler.name.clone(),
                    extensions: ExtensionData::from_raw(&sampler.extensions, &sampler.extras),
                }))
            })
            .collect()
    }

    fn images(
        &self,
        gltf: &Gltf,
        data: Vec<Option<Vec<u8>>>,
        views: &[Arc<BufferView>],
    ) -> Result<Vec<Arc<Image>>> {
        let mut data = data.into_iter();
        items(&gltf.images)
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let mime_type = image
                    .mime_type
                    .as_deref()
                    .map(|name| {
                        known(MimeType::from_name(name), name, || {
                            format!("images[{index}].mimeType")
                        })
                    })
                    .transpose()?;

                Ok(Arc::new(Image {
                    index,
                    uri: image.uri.clone(),
                    data: data.next().flatten(),
                    mime_type,
                    buffer_view: lookup_opt(views, image.buffer_view, "buffer view", || {
                        format!("images[{index}].bufferView")
                    })?,
                    name: image.name.clone(),
                    extensions: ExtensionData::from_raw(&image.extensions, &image.extras),
                }))
            })
            .collect()
    }

    fn textures(
        &self,
        gltf: &Gltf,
        samplers: &[Arc<Sampler>],
        images: &[Arc<Image>],
    ) -> Result<Vec<Arc<Texture>>> {
        items(&gltf.textures)
            .iter()
            .enumerate()
            .map(|(index, texture)| {
                let sampler = lookup_opt(samplers, texture.sampler, "sampler", || {
                    format!("textures[{index}].sampler")
                })?
                    .unwrap_or_else(|| Arc::clone(&self.default_sampler));

                Ok(Arc::new(Texture {
                    index,
                    sampler,
                    source: lookup_opt(images, texture.source, "image", || {
                        format!("textures[{index}].source")
                    })?,
                    name: texture.name.clone(),
                    extensions: ExtensionData::from_raw(&texture.extensions, &texture.extras),
                }))
            })
            .collect()
    }

    fn materials(&self, gltf: &Gltf, textures: &[Arc<Texture>]) -> Result<Vec<Arc<Material>>> {
        items(&gltf.materials)
            .iter()
            .enumerate()
            .map(|(index, material)| {
                let path = format!("materials[{index}]");
                let defaults = Material::default();

                let pbr_metallic_roughness = match &material.pbr_metallic_roughness {
                    Some(pbr) => {
                        let pbr_path = format!("{path}.pbrMetallicRoughness");
                        let pbr_defaults = PbrMetallicRoughness::default();
                        PbrMetallicRoughness {
                            base_color_factor: pbr
                                .base_color_factor
                                .as_deref()
                                .map_or(pbr_defaults.base_color_factor, vec4_from_slice),
                            base_color_texture: texture_info(
                                pbr.base_color_texture.as_ref(),
                                textures,
                                &format!("{pbr_path}.baseColorTexture"),
                            )?,
                            metallic_factor: pbr.metallic_factor.map_or(
                                pbr_defaults.metallic_factor,
                                |v| v as f32,
                            ),
                            roughness_factor: pbr.roughness_factor.map_or(
                                pbr_defaults.roughness_factor,
                                |v| v as f32,
                            ),
                            metallic_roughness_texture: texture_info(
                                pbr.metallic_roughness_texture.as_ref(),
                                textures,
                                &format!("{pbr_path}.metallicRoughnessTexture"),
                            )?,
                            extensions: ExtensionData::from_raw(&pbr.extensions, &pbr.extras),
                        }
                    }
                    None => PbrMetallicRoughness::default(),
                };

                let normal_texture = material
                    .normal_texture
                    .as_ref()
                    .map(|info| {
                        Ok::<_, ResolveError>(NormalTextureInfo {
                            texture: lookup(textures, info.index, "texture", || {
                                format!("{path}.normalTexture.index")
                            })?,
                            tex_coord: tex_coord(info.tex_coord, || {
                                format!("{path}.normalTexture.texCoord")
                            })?,
                            scale: info.scale.map_or(1.0, |v| v as f32),
                            extensions: ExtensionData::from_raw(&info.extensions, &info.extras),
                        })
                    })
                    .transpose()?;

                let occlusion_texture = material
                    .occlusion_texture
                    .as_ref()
                    .map(|info| {
                        Ok::<_, ResolveError>(OcclusionTextureInfo {
                            texture: lookup(textures, info.index, "texture", || {
                                format!("{path}.occlusionTexture.index")
                            })?,
                            tex_coord: tex_coord(info.tex_coord, || {
                                format!("{path}.occlusionTexture.texCoord")
                            })?,
                            strength: info.strength.map_or(1.0, |v| v as f32),
                            extensions: ExtensionData::from_raw(&info.extensions, &info.extras),
                        })
                    })
                    .transpose()?;

                let alpha_mode = material
                    .alpha_mode
                    .as_deref()
                    .map(|name| {
                        known(AlphaMode::from_name(name), name, || format!("{path}.alphaMode"))
                    })
                    .transpose()?
                    .unwrap_or(defaults.alpha_mode);

                Ok(Arc::new(Material {
                    index: Some(index),
                    pbr_metallic_roughness,
                    normal_texture,
                    occlusion_texture,
                    emissive_texture: texture_info(
                        material.emissive_texture.as_ref(),
                        textures,
                        &format!("{path}.emissiveTexture"),
                    )?,
                    emissive_factor: material
                        .emissive_factor
                        .as_deref()
                        .map_or(defaults.emissive_factor, vec3_from_slice),
                    alpha_mode,
                    alpha_cutoff: material.alpha_cutoff.map_or(defaults.alpha_cutoff, |v| v as f32),
                    double_sided: material.double_sided.unwrap_or(defaults.double_sided),
                    name: material.name.clone(),
                    extensions: ExtensionData::from_raw(&material.extensions, &material.extras),
                }))
            })
            .collect()
    }

    fn meshes(
        &self,
        gltf: &Gltf,
        accessors: &[Arc<Accessor>],
        materials: &[Arc<Material>],
    ) -> Result<Vec<Arc<Mesh>>> {
        items(&gltf.meshes)
            .iter()
            .enumerate()
            .map(|(index, mesh)| {
                let primitives = mesh
                    .primitives
                    .iter()
                    .enumerate()
                    .map(|(p, primitive)| {
                        self.primitive(
                            primitive,
                            accessors,
                            materials,
                            &format!("meshes[{index}].primitives[{p}]"),
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Arc::new(Mesh {
                    index,
                    primitives,
                    weights: mesh.weights.as_deref().map(to_f32s),
                    name: mesh.name.clone(),
                    extensions: ExtensionData::from_raw(&mesh.extensions, &mesh.extras),
                }))
            })
            .collect()
    }

    fn primitive(
        &self,
        primitive: &raw::Primitive,
        accessors: &[Arc<Accessor>],
        materials: &[Arc<Material>],
        path: &str,
    ) -> Result<Primitive> {
        let primitive_attributes =
            attributes(&primitive.attributes, accessors, &format!("{path}.attributes"))?;
        let targets = primitive
            .targets
            .as_ref()
            .map(|targets| {
                targets
                    .iter()
                    .enumerate()
                    .map(|(t, target)| {
                        attributes(target, accessors, &format!("{path}.targets[{t}]"))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let material = lookup_opt(materials, primitive.material, "material", || {
            format!("{path}.material")
        })?
            .unwrap_or_else(|| Arc::clone(&self.default_material));
        let mode = primitive
            .mode
            .map(|code| known(PrimitiveMode::from_code(code), code, || format!("{path}.mode")))
            .transpose()?
            .unwrap_or_default();

        Ok(Primitive {
            attributes: primitive_attributes,
            indices: lookup_opt(accessors, primitive.indices, "accessor", || {
                format!("{path}.indices")
            })?,
            material,
            mode,
            targets,
            extensions: ExtensionData::from_raw(&primitive.extensions, &primitive.extras),
        })
    }

    fn cameras(&self, gltf: &Gltf) -> Result<Vec<Arc<Camera>>> {
        items(&gltf.cameras)
            .iter()
            .enumerate()
            .map(|(index, camera)| {
                let path = format!("cameras[{index}]");
                let camera_type = known(
                    CameraType::from_name(&camera.camera_type),
                    &camera.camera_type,
                    || format!("{path}.type"),
                )?;

                let missing = |field: &str| ResolveError::Malformed {
                    referrer: format!("{path}.{field}"),
                    reason: "is missing".to_string(),
                };
                let projection = match camera_type {
                    CameraType::Perspective => {
                        let p = camera.perspective.as_ref().ok_or_else(|| missing("perspective"))?;
                        Projection::Perspective(Perspective {
                            aspect_ratio: p.aspect_ratio.map(|v| v as f32),
                            yfov: p.yfov as f32,
                            zfar: p.zfar.map(|v| v as f32),
                            znear: p.znear as f32,
                        })
                    }
                    CameraType::Orthographic => {
                        let o = camera
                            .orthographic
                            .as_ref()
                            .ok_or_else(|| missing("orthographic"))?;
                        Projection::Orthographic(Orthographic {
                            xmag: o.xmag as f32,
                            ymag: o.ymag as f32,
                            zfar: o.zfar as f32,
                            znear: o.znear as f32,
                        })
                    }
                };

                Ok(Arc::new(Camera {
                    index,
                    projection,
                    name: camera.name.clone(),
                    extensions: ExtensionData::from_raw(&camera.extensions, &camera.extras),
                }))
            })
            .collect()
    }

    fn skins(
        &self,
        gltf: &Gltf,
        accessors: &[Arc<Accessor>],
        nodes: &[Arc<Node>],
    ) -> Result<Vec<Arc<Skin>>> {
        items(&gltf.skins)
            .iter()
            .enumerate()
            .map(|(index, skin)| {
                let joints = skin
                    .joints
                    .iter()
                    .enumerate()
                    .map(|(j, &joint)| {
                        lookup(nodes, joint, "node", || format!("skins[{index}].joints[{j}]"))
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Arc::new(Skin {
                    index,
                    inverse_bind_matrices: lookup_opt(
                        accessors,
                        skin.inverse_bind_matrices,
                        "accessor",
                        || format!("skins[{index}].inverseBindMatrices"),
                    )?,
                    skeleton: lookup_opt(nodes, skin.skeleton, "node", || {
                        format!("skins[{index}].skeleton")
                    })?,
                    joints,
                    name: skin.name.clone(),
                    extensions: ExtensionData::from_raw(&skin.extensions, &skin.extras),
                }))
            })
            .collect()
    }

    fn animations(
        &self,
        gltf: &Gltf,
        accessors: &[Arc<Accessor>],
        nodes: &[Arc<Node>],
    ) -> Result<Vec<Animation>> {
        items(&gltf.animations)
            .iter()
            .enumerate()
            .map(|(index, animation)| {
                let path = format!("animations[{index}]");

                let samplers = animation
                    .samplers
                    .iter()
                    .enumerate()
                    .map(|(s, sampler)| {
                        let sampler_path = format!("{path}.samplers[{s}]");
                        let interpolation = sampler
                            .interpolation
                            .as_deref()
                            .map(|name| {
                                known(Interpolation::from_name(name), name, || {
                                    format!("{sampler_path}.interpolation")
                                })
                            })
                            .transpose()?
                            .unwrap_or_default();

                        Ok(Arc::new(AnimationSampler {
                            input: lookup(accessors, sampler.input, "accessor", || {
                                format!("{sampler_path}.input")
                            })?,
                            interpolation,
                            output: lookup(accessors, sampler.output, "accessor", || {
                                format!("{sampler_path}.output")
                            })?,
                            extensions: ExtensionData::from_raw(
                                &sampler.extensions,
                                &sampler.extras,
                            ),
                        }))
                    })
                    .collect::<Result<Vec<_>>>()?;

                let channels = animation
                    .channels
                    .iter()
                    .enumerate()
                    .map(|(c, channel)| {
                        let channel_path = format!("{path}.channels[{c}]");
                        let target = &channel.target;

                        Ok(Channel {
                            sampler: lookup(&samplers, channel.sampler, "animation sampler", || {
                                format!("{channel_path}.sampler")
                            })?,
                            target: AnimationTarget {
                                node: lookup_opt(nodes, target.node, "node", || {
                                    format!("{channel_path}.target.node")
                                })?,
                                path: known(TargetPath::from_name(&target.path), &target.path, || {
                                    format!("{channel_path}.target.path")
                                })?,
                                extensions: ExtensionData::from_raw(
                                    &target.extensions,
                                    &target.extras,
                                ),
                            },
                            extensions: ExtensionData::from_raw(
                                &channel.extensions,
                                &channel.extras,
                            ),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Animation {
                    index,
                    channels,
                    samplers,
                    name: animation.name.clone(),
                    extensions: ExtensionData::from_raw(&animation.extensions, &animation.extras),
                })
            })
            .collect()
    }

    fn scenes(&self, gltf: &Gltf, nodes: &[Arc<Node>]) -> Result<Vec<Arc<Scene>>> {
        items(&gltf.scenes)
            .iter()
            .enumerate()
            .map(|(index, scene)| {
                let roots = scene
                    .nodes
                    .iter()
                    .flatten()
                    .enumerate()
                    .map(|(n, &node)| {
                        lookup(nodes, node, "node", || format!("scenes[{index}].nodes[{n}]"))
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(Arc::new(Scene {
                    index,
                    nodes: roots,
                    name: scene.name.clone(),
                    extensions: ExtensionData::from_raw(&scene.extensions, &scene.extras),
                }))
            })
            .collect()
    }
}

/// Give every node that names a skin its back-reference.
fn bind_skins(raw_nodes: &[raw::Node], nodes: &[Arc<Node>], skins: &[Arc<Skin>]) -> Result<()> {
    for (index, (raw, node)) in raw_nodes.iter().zip(nodes).enumerate() {
        let skin = lookup_opt(skins, raw.skin, "skin", || format!("nodes[{index}].skin"))?;
        let Some(skin) = skin else {
            continue;
        };
        if !node.bind_skin(&skin) {
            return Err(ResolveError::SkinAlreadyBound { node: index });
        }
    }
    Ok(())
}

fn texture_info(
    info: Option<&raw::TextureInfo>,
    textures: &[Arc<Texture>],
    path: &str,
) -> Result<Option<TextureInfo>> {
    info.map(|info| {
        Ok(TextureInfo {
            texture: lookup(textures, info.index, "texture", || format!("{path}.index"))?,
            tex_coord: tex_coord(info.tex_coord, || format!("{path}.texCoord"))?,
            extensions: ExtensionData::from_raw(&info.extensions, &info.extras),
        })
    })
    .transpose()
}

fn attributes(
    raw: &IndexMap<String, i64>,
    accessors: &[Arc<Accessor>],
    path: &str,
) -> Result<Attributes> {
    raw.iter()
        .map(|(semantic, &index)| {
            let accessor = lookup(accessors, index, "accessor", || format!("{path}.{semantic}"))?;
            Ok((semantic.clone(), accessor))
        })
        .collect()
}

fn sparse_accessor(sparse: &raw::Sparse, views: &[Arc<BufferView>], path: &str) -> Result<Sparse> {
    let indices = &sparse.indices;
    let values = &sparse.values;
    Ok(Sparse {
        count: to_usize(sparse.count, || format!("{path}.sparse.count"))?,
        indices: SparseIndices {
            buffer_view: lookup(views, indices.buffer_view, "buffer view", || {
                format!("{path}.sparse.indices.bufferView")
            })?,
            byte_offset: to_usize(indices.byte_offset.unwrap_or(0), || {
                format!("{path}.sparse.indices.byteOffset")
            })?,
            component_type: known(
                ComponentType::from_code(indices.component_type),
                indices.component_type,
                || format!("{path}.sparse.indices.componentType"),
            )?,
            extensions: ExtensionData::from_raw(&indices.extensions, &indices.extras),
        },
        values: SparseValues {
            buffer_view: lookup(views, values.buffer_view, "buffer view", || {
                format!("{path}.sparse.values.bufferView")
            })?,
            byte_offset: to_usize(values.byte_offset.unwrap_or(0), || {
                format!("{path}.sparse.values.byteOffset")
            })?,
            extensions: ExtensionData::from_raw(&values.extensions, &values.extras),
        },
        extensions: ExtensionData::from_raw(&sparse.extensions, &sparse.extras),
    })
}

/// The element at `index`, or an out-of-bounds error naming the referrer.
pub(crate) fn lookup<T>(
    list: &[Arc<T>],
    index: i64,
    kind: &'static str,
    referrer: impl FnOnce() -> String,
) -> Result<Arc<T>> {
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .cloned()
        .ok_or_else(|| ResolveError::OutOfBounds {
            kind,
            index,
            len: list.len(),
            referrer: referrer(),
        })
}

/// [`lookup`] for optional references.
pub(crate) fn lookup_opt<T>(
    list: &[Arc<T>],
    index: Option<i64>,
    kind: &'static str,
    referrer: impl FnOnce() -> String,
) -> Result<Option<Arc<T>>> {
    index.map(|index| lookup(list, index, kind, referrer)).transpose()
}

/// Unwrap a parsed enumeration value.
fn known<T>(value: Option<T>, raw: impl Display, referrer: impl FnOnce() -> String) -> Result<T> {
    value.ok_or_else(|| ResolveError::Malformed {
        referrer: referrer(),
        reason: format!("has unknown value {raw}"),
    })
}

fn items<T>(list: &Option<Vec<T>>) -> &[T] {
    list.as_deref().unwrap_or_default()
}

/// A count, offset or length. Negative values only reach here unvalidated.
fn to_usize(value: i64, referrer: impl FnOnce() -> String) -> Result<usize> {
    usize::try_from(value).map_err(|_| out_of_range(value, referrer))
}

/// An absent texture coordinate set is set 0.
fn tex_coord(value: Option<i64>, referrer: impl FnOnce() -> String) -> Result<u32> {
    value.map_or(Ok(0), |v| u32::try_from(v).map_err(|_| out_of_range(v, referrer)))
}

fn out_of_range(value: i64, referrer: impl FnOnce() -> String) -> ResolveError {
    ResolveError::Malformed {
        referrer: referrer(),
        reason: format!("has out-of-range value {value}"),
    }
}

fn to_f32s(values: &[f64]) -> Vec<f32> {
    values.iter().map(|&v| v as f32).collect()
}
