//! algviz Core Types
//!
//! This crate provides the foundational types shared by the algviz crates:
//!
//! - **Geometry**: Points, sizes and the [`geometry::Extent`] trait
//! - **Anchors**: The 3×3 anchor grid and its coordinate conversions ([`anchor`] module)
//! - **Identifiers**: String-interned object uids ([`identifier::Id`])
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Structure**: The decoded object graph ([`structure`] module)

pub mod anchor;
pub mod color;
pub mod geometry;
pub mod identifier;
pub mod structure;
