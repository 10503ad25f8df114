/// Sample image labeling and adjacency learning
pub mod patterns;
