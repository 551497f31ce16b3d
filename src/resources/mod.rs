//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `cache` – generic keyed cache owning native handles
//! - `camera` – scrolling camera used for world/screen transforms
//! - `gameconfig` – settings and action bindings loaded from `config.ini`
//! - `input` – action mapper turning raw events into per-action states
//! - `level` – scene description loaded from JSON
//! - `renderer` – draw dispatcher with culling and parallax tiling
//! - `resourcemanager` – texture, audio and font caches behind one façade
//! - `worldtime` – simulation time and delta
pub mod cache;
pub mod camera;
pub mod gameconfig;
pub mod input;
pub mod level;
pub mod renderer;
pub mod resourcemanager;
pub mod worldtime;
