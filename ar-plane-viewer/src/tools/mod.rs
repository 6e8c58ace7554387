pub mod tap_place;
