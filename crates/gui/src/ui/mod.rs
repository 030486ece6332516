pub mod controls;
pub mod scene_tree;
pub mod status_bar;
