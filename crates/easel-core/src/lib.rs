//! Easel Core Types and Definitions
//!
//! This crate provides the foundational types shared by Easel renderers.
//! It includes:
//!
//! - **Colors**: 8-bit RGB colors with CSS parsing and hex encoding ([`color::Color`])
//! - **Geometry**: Points, bounds and affine transforms ([`geometry`] module)
//! - **Elements**: The rendering element tree ([`element`] module)
//! - **Model**: Keyed rendering parameters ([`model::RendererModel`])
//! - **Text**: Font descriptors and text measurement ([`text`] module)

pub mod color;
pub mod element;
pub mod geometry;
pub mod model;
pub mod text;
