//! Render pipelines of the viewer. The wall needs only one: flat coloured,
//! lit geometry plus an unlit screen-space mode for the overlay.

pub mod basic;
