pub mod plotters_surface;
pub mod text_table;
pub mod world_bank;
