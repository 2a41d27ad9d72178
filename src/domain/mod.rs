pub mod id;
pub mod playlist;
pub mod reference;
pub mod track;
