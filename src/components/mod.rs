//! ECS components for entities.
//!
//! Submodules overview:
//! - [`actionsound`] – sound effects played when actions are pressed
//! - [`inputcontrolled`] – action-driven movement and the camera target marker
//! - [`mapposition`] – world-space position of an entity
//! - [`parallax`] – scroll factor and tiling of background layers
//! - [`rotation`] – rotation angle in degrees
//! - [`scale`] – 2D scale factor for sprites
//! - [`screenposition`] – screen-space position and size for HUD sprites
//! - [`sprite`] – texture reference and source region
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod actionsound;
pub mod inputcontrolled;
pub mod mapposition;
pub mod parallax;
pub mod rotation;
pub mod scale;
pub mod screenposition;
pub mod sprite;
pub mod zindex;
