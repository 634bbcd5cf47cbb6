pub mod cubes;
