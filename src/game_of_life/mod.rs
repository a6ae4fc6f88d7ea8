//! Game of Life core functionality

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::Grid;
pub use io::{
    create_example_grids, load_grid_from_file, oracle_input_to_string, save_grid_to_file,
    write_oracle_input,
};
pub use rules::GameOfLifeRules;
