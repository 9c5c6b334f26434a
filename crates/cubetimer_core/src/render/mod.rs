//! Adapters that turn facelet snapshots into something a rendering surface
//! can draw.
//!
//! Adapters only read [`FaceletSnapshot`](crate::FaceletSnapshot)s and never
//! mutate cube state.

mod geometry;
mod net;

pub use geometry::{StickerPlacement, sticker_lattice_position, sticker_placement, twist_rotation};
pub use net::{net_dimensions, net_position, render_net_text};
