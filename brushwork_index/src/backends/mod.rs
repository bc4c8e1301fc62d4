// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `octree`: recursive 8-way partition of a fixed world box; prunes whole
//!   subtrees whose bounds the ray misses and visits the rest near to far.
//! - `flatvec`: flat vector with linear scans (small, simple, handy as a
//!   reference when checking the octree).

pub mod flatvec;
pub mod octree;
