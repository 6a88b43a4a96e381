extern crate bio_types;
extern crate csv;
extern crate linked_hash_map;
extern crate multimap;

pub mod seq;
pub mod gene;
pub mod coord;
pub mod locate;
pub mod io;
pub mod error;
