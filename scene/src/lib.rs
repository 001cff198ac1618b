//! Object selection and transform-editing core for the room editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to the
//! 3D renderer. It owns which placed object is selected, which manipulation
//! tool is active, whether a transform gizmo is bound, and the authoritative
//! transform of every placed object. The renderer is consumed through two
//! narrow seams only: pointer hits arrive as object ids, and live gizmo poses
//! are read through [`gizmo::PoseSource`] for the duration of one commit.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`root`] | Composition root: routes clicks, tool changes and gizmo gestures |
//! | [`engine`] | `wasm-bindgen` facade over [`root::SceneRoot`] for the host page |
//! | [`selection`] | Tools and the single-selection controller |
//! | [`gizmo`] | Gizmo modes, the pose boundary and the drag/release adapter |
//! | [`transform`] | `Vec3`, `Transform` and the per-object transform store |
//! | [`error`] | Error taxonomy shared by all of the above |
//! | [`consts`] | Shared constants |

pub mod consts;
pub mod engine;
pub mod error;
pub mod gizmo;
pub mod root;
pub mod selection;
pub mod transform;
