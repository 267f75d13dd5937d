//! Domain Layer
//!
//! The core of Zitify: the deployment model, the fragment merger and the
//! compiler. Nothing in here touches the file system or spawns processes.
//!
//! ## Structure
//!
//! - `entities/` - Document tree, fragments, typed model, flat resources
//! - `value_objects/` - Role tokens, semantics, states, target names
//! - `services/` - Merger, compiler, scope helpers
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
