pub mod bezier;
pub mod road_strip;
