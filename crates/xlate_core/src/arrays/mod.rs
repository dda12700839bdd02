pub mod index_space;
