//! Skeleton extraction from authored scene graphs.
//!
//! This library converts an externally authored scene graph (nodes with
//! optional typed attributes, parent-child transforms and skin-binding
//! information) into a normalized skeleton forest suitable for runtime
//! animation. Callers pick which attribute categories count as joints;
//! everything else is pruned and the hierarchy is re-rooted onto the
//! nearest accepted ancestors. Bind transforms are reconciled from skin
//! clusters, bind-pose snapshots and evaluated world poses.
//!
//! Scene loading and parsing are out of scope: callers hand over an
//! already-built [`scene::Scene`] and receive a [`skeleton::Skeleton`].

pub mod extract;
pub mod scene;
pub mod skeleton;
pub mod track;
pub mod transform;
