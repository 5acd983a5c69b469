pub mod blast_zone;
pub mod spawn_point;
